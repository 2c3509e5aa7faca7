use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use std::io;
use std::time::Duration;

use crate::config::KeyBindings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Rematch,
    PaddleUp,
    PaddleDown,
    /// Continuous pointer position: the terminal row under the cursor.
    /// Translated into field space by the render layer.
    Pointer { row: u16 },
}

/// Drain all pending terminal events into actions. Never blocks; the game
/// loop calls this once per frame.
pub fn poll_input(bindings: &KeyBindings) -> io::Result<Vec<InputAction>> {
    let mut actions = Vec::new();

    while event::poll(Duration::from_millis(0))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Esc || matches_binding(&bindings.quit, key.code) {
                    actions.push(InputAction::Quit);
                } else if matches_binding(&bindings.rematch, key.code) {
                    actions.push(InputAction::Rematch);
                } else if key.code == KeyCode::Up || matches_binding(&bindings.paddle_up, key.code)
                {
                    actions.push(InputAction::PaddleUp);
                } else if key.code == KeyCode::Down
                    || matches_binding(&bindings.paddle_down, key.code)
                {
                    actions.push(InputAction::PaddleDown);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved
                | MouseEventKind::Drag(MouseButton::Left)
                | MouseEventKind::Down(MouseButton::Left) => {
                    actions.push(InputAction::Pointer { row: mouse.row });
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(actions)
}

/// Match a configured binding against a pressed key. Bindings are single
/// characters ("W") or named keys ("Up", "Enter", "Esc").
fn matches_binding(binding: &str, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            let mut chars = binding.chars();
            matches!((chars.next(), chars.next()), (Some(b), None) if b.eq_ignore_ascii_case(&c))
        }
        KeyCode::Up => binding.eq_ignore_ascii_case("up"),
        KeyCode::Down => binding.eq_ignore_ascii_case("down"),
        KeyCode::Left => binding.eq_ignore_ascii_case("left"),
        KeyCode::Right => binding.eq_ignore_ascii_case("right"),
        KeyCode::Enter => binding.eq_ignore_ascii_case("enter"),
        KeyCode::Esc => binding.eq_ignore_ascii_case("esc"),
        _ => false,
    }
}
