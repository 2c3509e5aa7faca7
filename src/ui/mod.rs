pub mod braille;
pub mod overlay;
pub mod render;

pub use overlay::{OverlayMessage, OverlayStyle};
pub use render::{field_width_for, pointer_row_to_field_y, render, Theme};
