// Menu state: item selection plus the two adjustable match settings

use crate::ai::{SkillProfile, MAX_SKILL_TIER};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuItem {
    StartMatch,
    Difficulty,
    GameSpeed,
    Quit,
}

impl MenuItem {
    pub fn display_text(&self) -> &str {
        match self {
            MenuItem::StartMatch => "Start Match",
            MenuItem::Difficulty => "Difficulty",
            MenuItem::GameSpeed => "Game Speed",
            MenuItem::Quit => "Quit",
        }
    }

    pub fn all() -> Vec<MenuItem> {
        vec![
            MenuItem::StartMatch,
            MenuItem::Difficulty,
            MenuItem::GameSpeed,
            MenuItem::Quit,
        ]
    }
}

pub struct MenuState {
    pub selected_index: usize,
    pub items: Vec<MenuItem>,
    /// Opponent skill tier chosen in the menu, 0..=3
    pub skill_tier: u8,
    /// Ball speed multiplier chosen in the menu, 0.8..=2.0
    pub speed_multiplier: f32,
}

impl MenuState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            selected_index: 0,
            items: MenuItem::all(),
            skill_tier: config.game.skill_tier,
            speed_multiplier: config.game.speed_multiplier,
        }
    }

    pub fn selected_item(&self) -> MenuItem {
        self.items[self.selected_index]
    }

    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.items.len() - 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected_index < self.items.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
    }

    /// Adjust the selected setting one step in the given direction.
    /// Difficulty wraps around; game speed saturates at its bounds.
    pub fn adjust(&mut self, direction: i8) {
        match self.selected_item() {
            MenuItem::Difficulty => {
                let tiers = MAX_SKILL_TIER as i8 + 1;
                let tier = (self.skill_tier as i8 + direction).rem_euclid(tiers);
                self.skill_tier = tier as u8;
            }
            MenuItem::GameSpeed => {
                let stepped = self.speed_multiplier + 0.2 * direction as f32;
                // One decimal keeps repeated steps from drifting
                self.speed_multiplier = ((stepped * 10.0).round() / 10.0).clamp(0.8, 2.0);
            }
            MenuItem::StartMatch | MenuItem::Quit => {}
        }
    }

    /// The value shown next to an adjustable item
    pub fn value_text(&self, item: MenuItem) -> Option<String> {
        match item {
            MenuItem::Difficulty => Some(format!(
                "< {} >",
                SkillProfile::display_name(self.skill_tier)
            )),
            MenuItem::GameSpeed => Some(format!("< x{:.1} >", self.speed_multiplier)),
            MenuItem::StartMatch | MenuItem::Quit => None,
        }
    }
}
