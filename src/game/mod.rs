pub mod input;
pub mod particles;
pub mod physics;
pub mod round;
pub mod state;

pub use input::{poll_input, InputAction};
pub use particles::{Particle, ParticleColor, ParticleSystem};
pub use physics::{advance, PhysicsEvents};
pub use round::{RoundPhase, RoundState};
pub use state::{Ball, GameState, Geometry, Paddle, Tuning};
