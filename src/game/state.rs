use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ai::SkillProfile;
use crate::config::Config;

use super::particles::ParticleSystem;
use super::round::RoundState;

// Field-unit constants. The paddle sizes scale with the field, everything
// else is absolute in field units.
pub const PADDLE_HEIGHT_RATIO: f32 = 0.15;
pub const PADDLE_WIDTH_RATIO: f32 = 0.015;
pub const MIN_PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_MARGIN: f32 = 10.0;
pub const BALL_RADIUS: f32 = 8.0;
pub const EXIT_MARGIN: f32 = 30.0;

// How far past the serving paddle's face the ball is seeded before launch
const SERVE_OFFSET: f32 = 20.0;

/// Values the simulation derives from the config once per match, not per
/// frame: serve speed, the hard speed cap, and the opponent skill profile.
#[derive(Debug, Clone)]
pub struct Tuning {
    pub serve_speed: f32,
    pub speed_cap: f32,
    pub winning_score: u8,
    pub skill: SkillProfile,
}

impl Tuning {
    pub fn from_config(config: &Config) -> Self {
        let serve_speed = config.physics.base_speed * config.game.speed_multiplier;
        Self {
            serve_speed,
            speed_cap: serve_speed * 2.5,
            winning_score: config.game.winning_score,
            skill: SkillProfile::for_tier(config.game.skill_tier),
        }
    }
}

/// Everything derived from the field dimensions. Recomputed only when the
/// dimensions actually change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_height: f32,
    pub paddle_width: f32,
}

impl Geometry {
    pub fn of(field_width: f32, field_height: f32) -> Self {
        Self {
            field_width,
            field_height,
            paddle_height: field_height * PADDLE_HEIGHT_RATIO,
            paddle_width: (field_width * PADDLE_WIDTH_RATIO).max(MIN_PADDLE_WIDTH),
        }
    }

    /// Highest legal paddle y (paddles are anchored by their top edge)
    pub fn paddle_travel(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Resting position: paddle vertically centered
    pub fn paddle_rest_y(&self) -> f32 {
        self.paddle_travel() / 2.0
    }

    /// X of the player paddle's ball-facing edge
    pub fn player_face_x(&self) -> f32 {
        PADDLE_MARGIN + self.paddle_width
    }

    /// X of the opponent paddle's ball-facing edge
    pub fn opponent_face_x(&self) -> f32 {
        self.field_width - PADDLE_MARGIN - self.paddle_width
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    // Scalar speed; grows on paddle hits, reset at every serve
    pub speed: f32,
}

impl Ball {
    /// Park the ball at a serve seed point: stationary, speed reset
    pub fn place(&mut self, x: f32, y: f32, speed: f32) {
        self.x = x;
        self.y = y;
        self.dx = 0.0;
        self.dy = 0.0;
        self.speed = speed;
    }

    pub fn velocity_magnitude(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub y: f32,
    pub target_y: f32,
}

impl Paddle {
    pub fn at(y: f32) -> Self {
        Self { y, target_y: y }
    }

    /// Move a fraction of the way toward the target. Target is always
    /// clamped before it is set, so the position stays in range too.
    pub fn approach(&mut self, fraction: f32) {
        self.y += (self.target_y - self.y) * fraction;
    }

    pub fn center(&self, geom: &Geometry) -> f32 {
        self.y + geom.paddle_height / 2.0
    }
}

/// The single owned state container. Mutated by the kernel once per frame,
/// read by the renderer and the input handlers in between.
pub struct GameState {
    pub geom: Geometry,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub particles: ParticleSystem,
    pub round: RoundState,
    pub player_score: u8,
    pub opponent_score: u8,
    pub rng: SmallRng,
}

impl GameState {
    pub fn new(field_width: f32, field_height: f32) -> Self {
        Self::with_rng(field_width, field_height, SmallRng::from_entropy())
    }

    pub fn with_rng(field_width: f32, field_height: f32, rng: SmallRng) -> Self {
        let geom = Geometry::of(field_width, field_height);
        let rest = geom.paddle_rest_y();
        let ball = Ball {
            x: field_width / 2.0,
            y: field_height / 2.0,
            dx: 0.0,
            dy: 0.0,
            speed: 0.0,
        };
        Self {
            geom,
            ball,
            player: Paddle::at(rest),
            opponent: Paddle::at(rest),
            particles: ParticleSystem::new(),
            round: RoundState::new(),
            player_score: 0,
            opponent_score: 0,
            rng,
        }
    }

    /// Re-derive dimensions after a viewport change. In-flight ball and
    /// paddle state is kept; positions are only re-clamped into the new
    /// bounds. Calling this twice with the same dimensions is a no-op.
    pub fn resize(&mut self, field_width: f32, field_height: f32) {
        if field_width == self.geom.field_width && field_height == self.geom.field_height {
            return;
        }
        self.geom = Geometry::of(field_width, field_height);
        let travel = self.geom.paddle_travel();
        self.player.y = self.player.y.clamp(0.0, travel);
        self.player.target_y = self.player.target_y.clamp(0.0, travel);
        self.opponent.y = self.opponent.y.clamp(0.0, travel);
        self.opponent.target_y = self.opponent.target_y.clamp(0.0, travel);
        self.ball.y = self
            .ball
            .y
            .clamp(BALL_RADIUS, field_height - BALL_RADIUS);
    }

    /// Map a pointer coordinate (field space) onto the player paddle target
    pub fn set_player_target(&mut self, pointer_y: f32) {
        let target = pointer_y - self.geom.paddle_height / 2.0;
        self.player.target_y = target.clamp(0.0, self.geom.paddle_travel());
    }

    /// Keyboard fallback: shift the target by a fixed step
    pub fn nudge_player_target(&mut self, delta: f32) {
        let target = self.player.target_y + delta;
        self.player.target_y = target.clamp(0.0, self.geom.paddle_travel());
    }

    /// Freeze the ball at the serve seed point and start the countdown.
    /// `direction` is the way the ball will travel once launched: +1 seeds
    /// on the left and serves rightward, -1 mirrors.
    pub fn begin_serve(&mut self, direction: f32, serve_speed: f32, now: Instant) {
        let seed_x = if direction > 0.0 {
            self.geom.player_face_x() + SERVE_OFFSET
        } else {
            self.geom.opponent_face_x() - SERVE_OFFSET
        };
        self.ball.place(seed_x, self.geom.field_height / 2.0, serve_speed);
        self.round.start_countdown(direction, now);
    }

    /// Fresh match: scores wiped, first serve in a random direction
    pub fn begin_match(&mut self, serve_speed: f32, now: Instant) {
        self.player_score = 0;
        self.opponent_score = 0;
        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.begin_serve(direction, serve_speed, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::round::RoundPhase;

    fn seeded_state() -> GameState {
        GameState::with_rng(800.0, 600.0, SmallRng::seed_from_u64(7))
    }

    #[test]
    fn test_new_state_centers_paddles() {
        let state = seeded_state();
        let rest = state.geom.paddle_rest_y();
        assert_eq!(state.player.y, rest);
        assert_eq!(state.opponent.y, rest);
        assert_eq!(state.player.target_y, rest);
    }

    #[test]
    fn test_geometry_ratios() {
        let geom = Geometry::of(800.0, 600.0);
        assert_eq!(geom.paddle_height, 90.0);
        assert_eq!(geom.paddle_width, 12.0);
        // Narrow field falls back to the minimum paddle width
        let narrow = Geometry::of(300.0, 600.0);
        assert_eq!(narrow.paddle_width, MIN_PADDLE_WIDTH);
    }

    #[test]
    fn test_resize_same_dimensions_is_noop() {
        let mut state = seeded_state();
        state.ball.x = 123.0;
        state.ball.y = 456.0;
        state.player.y = 70.0;

        state.resize(800.0, 600.0);
        state.resize(800.0, 600.0);

        assert_eq!(state.ball.x, 123.0);
        assert_eq!(state.ball.y, 456.0);
        assert_eq!(state.player.y, 70.0);
    }

    #[test]
    fn test_resize_reclamps_without_resetting() {
        let mut state = seeded_state();
        state.ball.x = 700.0;
        state.ball.y = 580.0;
        state.player.y = 500.0; // near the bottom of a 600-high field
        state.player.target_y = 500.0;

        state.resize(800.0, 400.0);

        // Ball kept in flight, only pulled inside the new bounds
        assert_eq!(state.ball.x, 700.0);
        assert!(state.ball.y <= 400.0 - BALL_RADIUS);
        // Paddle clamped to the new travel range
        assert!(state.player.y <= state.geom.paddle_travel());
    }

    #[test]
    fn test_player_target_clamped() {
        let mut state = seeded_state();
        state.set_player_target(-100.0);
        assert_eq!(state.player.target_y, 0.0);
        state.set_player_target(10_000.0);
        assert_eq!(state.player.target_y, state.geom.paddle_travel());
    }

    #[test]
    fn test_begin_serve_seeds_ball_and_resets_speed() {
        let mut state = seeded_state();
        state.ball.speed = 50.0; // accumulated during a long rally
        let now = Instant::now();

        state.begin_serve(1.0, 5.0, now);

        assert_eq!(state.ball.speed, 5.0);
        assert_eq!(state.ball.dx, 0.0);
        assert_eq!(state.ball.dy, 0.0);
        assert_eq!(state.ball.y, 300.0);
        assert!(state.ball.x < 100.0); // seeded near the player side
        assert_eq!(state.round.phase, RoundPhase::Counting(3));

        state.begin_serve(-1.0, 5.0, now);
        assert!(state.ball.x > 700.0); // mirrored seed near the opponent
    }
}
