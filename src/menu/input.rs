// Menu input handling

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;

use super::state::{MenuItem, MenuState};

/// Menu action result
pub enum MenuAction {
    /// Continue in menu
    None,
    /// Begin a match with the menu's current settings
    StartMatch,
    /// Exit application
    Quit,
}

/// Handle menu input and return the next action
pub fn handle_menu_input(menu_state: &mut MenuState) -> Result<MenuAction, io::Error> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key_press(menu_state, key.code));
            }
        }
    }

    Ok(MenuAction::None)
}

fn handle_key_press(menu_state: &mut MenuState, key_code: KeyCode) -> MenuAction {
    match key_code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            menu_state.select_previous();
            MenuAction::None
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            menu_state.select_next();
            MenuAction::None
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            menu_state.adjust(-1);
            MenuAction::None
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            menu_state.adjust(1);
            MenuAction::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => match menu_state.selected_item() {
            MenuItem::StartMatch => MenuAction::StartMatch,
            MenuItem::Quit => MenuAction::Quit,
            // Enter on an adjustable item steps it forward
            MenuItem::Difficulty | MenuItem::GameSpeed => {
                menu_state.adjust(1);
                MenuAction::None
            }
        },
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MenuAction::Quit,
        _ => MenuAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_enter_on_start_begins_a_match() {
        let mut state = MenuState::from_config(&Config::default());
        assert!(matches!(
            handle_key_press(&mut state, KeyCode::Enter),
            MenuAction::StartMatch
        ));
    }

    #[test]
    fn test_enter_on_an_adjustable_item_steps_it() {
        let mut state = MenuState::from_config(&Config::default());
        state.selected_index = 1; // Difficulty
        let before = state.skill_tier;
        assert!(matches!(
            handle_key_press(&mut state, KeyCode::Enter),
            MenuAction::None
        ));
        assert_ne!(state.skill_tier, before);
    }

    #[test]
    fn test_arrows_adjust_the_selected_setting() {
        let mut state = MenuState::from_config(&Config::default());
        state.selected_index = 2; // GameSpeed
        handle_key_press(&mut state, KeyCode::Right);
        assert_eq!(state.speed_multiplier, 1.2);
        handle_key_press(&mut state, KeyCode::Left);
        assert_eq!(state.speed_multiplier, 1.0);
    }

    #[test]
    fn test_q_quits() {
        let mut state = MenuState::from_config(&Config::default());
        assert!(matches!(
            handle_key_press(&mut state, KeyCode::Char('q')),
            MenuAction::Quit
        ));
    }
}
