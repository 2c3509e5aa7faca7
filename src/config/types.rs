// Purrpong configuration types
// All settings carry defaults matching the tuned in-game values

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub commentary: CommentaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            physics: PhysicsConfig::default(),
            display: DisplayConfig::default(),
            keybindings: KeyBindings::default(),
            commentary: CommentaryConfig::default(),
        }
    }
}

impl Config {
    /// Pull every value back into its legal range. Out-of-range input is
    /// clamped rather than rejected so a hand-edited file can never prevent
    /// the game from starting.
    pub fn normalize(&mut self) {
        self.game.skill_tier = self.game.skill_tier.min(crate::ai::MAX_SKILL_TIER);
        self.game.speed_multiplier = self.game.speed_multiplier.clamp(0.8, 2.0);
        self.game.winning_score = self.game.winning_score.max(1);
        self.physics.base_speed = self.physics.base_speed.clamp(1.0, 30.0);
        self.physics.field_width = self.physics.field_width.clamp(200.0, 4000.0);
        self.physics.field_height = self.physics.field_height.clamp(150.0, 3000.0);
        self.display.target_fps = self.display.target_fps.clamp(15, 240);
        self.commentary.timeout_ms = self.commentary.timeout_ms.clamp(100, 10_000);
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    // Opponent skill tier: 0 (easy) to 3 (expert)
    pub skill_tier: u8,

    // Global ball speed multiplier, 0.8 to 2.0
    pub speed_multiplier: f32,

    // Points required to win a match
    pub winning_score: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            skill_tier: 1,
            speed_multiplier: 1.0,
            winning_score: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Ball speed in field units per frame, before the multiplier
    pub base_speed: f32,

    // Field dimensions in field units. Height is fixed; width is re-derived
    // from the terminal aspect ratio while playing.
    pub field_width: f32,
    pub field_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            field_width: 800.0,
            field_height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second
    pub target_fps: u64,

    // Accent colors (RGB values 0-255)
    pub player_color: [u8; 3],
    pub opponent_color: [u8; 3],
    pub ball_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            player_color: [6, 182, 212],    // Cyan
            opponent_color: [236, 72, 153], // Pink
            ball_color: [255, 255, 255],    // White
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Paddle nudge keys (the mouse is the primary control)
    pub paddle_up: String,
    pub paddle_down: String,

    // Game controls
    pub quit: String,
    pub rematch: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            paddle_up: "W".to_string(),
            paddle_down: "S".to_string(),
            quit: "Q".to_string(),
            rematch: "R".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CommentaryConfig {
    // Whether to call the remote commentary service at all.
    // Canned phrases are always available and are shown either way.
    pub enabled: bool,

    // WebSocket endpoint of the commentary service, e.g. "wss://host/commentary".
    // Empty string disables the remote call.
    pub endpoint: String,

    // How long to wait for a remote phrase before giving up on it
    pub timeout_ms: u64,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            timeout_ms: 1500,
        }
    }
}
