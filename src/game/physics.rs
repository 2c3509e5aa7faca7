// Per-frame simulation kernel: integration, collision resolution, scoring.
//
// The kernel runs with an implicit frame step of 1: velocities are in field
// units per frame and the loop is paced at a fixed cadence, so there is no
// delta-time scaling anywhere in here.

use std::f32::consts::PI;
use std::time::Instant;

use rand::Rng;

use super::particles::ParticleColor;
use super::round::RoundPhase;
use super::state::{Ball, GameState, Tuning, BALL_RADIUS, EXIT_MARGIN, PADDLE_MARGIN};

/// Fraction of the distance to its target the player paddle covers per frame
pub const PLAYER_REACTION: f32 = 0.2;
/// Ball speed multiplier applied on every paddle hit
pub const SPEED_GROWTH: f32 = 1.05;
// Steepest deflection a paddle edge can produce
const MAX_DEFLECTION: f32 = PI / 3.0;
// Serve angles are rolled uniformly from (-SERVE_SPREAD, SERVE_SPREAD)
const SERVE_SPREAD: f32 = PI / 8.0;

/// Everything that happened during one kernel step
#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicsEvents {
    pub wall_bounce: bool,
    pub player_hit: bool,
    pub opponent_hit: bool,
    pub player_scored: bool,
    pub opponent_scored: bool,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.wall_bounce
            || self.player_hit
            || self.opponent_hit
            || self.player_scored
            || self.opponent_scored
    }
}

/// Advance the simulation by one frame
pub fn advance(state: &mut GameState, tuning: &Tuning, now: Instant) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    state.particles.tick();

    if state.round.phase == RoundPhase::MatchOver {
        return events;
    }

    // Paddles drift home while a serve counts down
    if state.round.is_counting() {
        let rest = state.geom.paddle_rest_y();
        state.player.target_y = rest;
        state.opponent.target_y = rest;
    }
    state.player.approach(PLAYER_REACTION);
    state.opponent.approach(tuning.skill.reaction);

    if state.round.tick(now) {
        launch_ball(state);
    }
    if !state.round.is_active() {
        return events;
    }

    let geom = state.geom;

    state.ball.x += state.ball.dx;
    state.ball.y += state.ball.dy;

    // Top and bottom walls: elastic on the vertical axis
    if state.ball.y < BALL_RADIUS || state.ball.y > geom.field_height - BALL_RADIUS {
        state.ball.dy = -state.ball.dy;
        state.ball.y = state
            .ball
            .y
            .clamp(BALL_RADIUS, geom.field_height - BALL_RADIUS);
        events.wall_bounce = true;
        state
            .particles
            .spawn(state.ball.x, state.ball.y, ParticleColor::Wall);
    }

    // Player paddle: only when the ball is inbound on the left band
    if state.ball.dx < 0.0
        && state.ball.x - BALL_RADIUS < geom.player_face_x()
        && state.ball.x > PADDLE_MARGIN
        && state.ball.y + BALL_RADIUS > state.player.y
        && state.ball.y - BALL_RADIUS < state.player.y + geom.paddle_height
    {
        deflect(
            &mut state.ball,
            state.player.y,
            geom.paddle_height,
            1.0,
            tuning.speed_cap,
        );
        events.player_hit = true;
        state
            .particles
            .spawn(state.ball.x, state.ball.y, ParticleColor::Player);
    }

    // Opponent paddle, mirrored
    if state.ball.dx > 0.0
        && state.ball.x + BALL_RADIUS > geom.opponent_face_x()
        && state.ball.x < geom.field_width - PADDLE_MARGIN
        && state.ball.y + BALL_RADIUS > state.opponent.y
        && state.ball.y - BALL_RADIUS < state.opponent.y + geom.paddle_height
    {
        deflect(
            &mut state.ball,
            state.opponent.y,
            geom.paddle_height,
            -1.0,
            tuning.speed_cap,
        );
        events.opponent_hit = true;
        state
            .particles
            .spawn(state.ball.x, state.ball.y, ParticleColor::Opponent);
    }

    // Scoring: the ball's center has to clear the field by the exit margin.
    // The next serve travels toward the side that just conceded.
    if state.ball.x < -EXIT_MARGIN {
        events.opponent_scored = true;
        state.opponent_score += 1;
        if state.opponent_score >= tuning.winning_score {
            state.round.finish_match();
        } else {
            state.begin_serve(-1.0, tuning.serve_speed, now);
        }
    } else if state.ball.x > geom.field_width + EXIT_MARGIN {
        events.player_scored = true;
        state.player_score += 1;
        if state.player_score >= tuning.winning_score {
            state.round.finish_match();
        } else {
            state.begin_serve(1.0, tuning.serve_speed, now);
        }
    }

    events
}

/// Put the parked ball into flight along the serve direction
fn launch_ball(state: &mut GameState) {
    let angle = state.rng.gen_range(-SERVE_SPREAD..SERVE_SPREAD);
    let direction = state.round.serve_direction;
    state.ball.dx = direction * state.ball.speed * angle.cos();
    state.ball.dy = state.ball.speed * angle.sin();
}

/// Redirect the ball off a paddle. The contact offset from the paddle
/// center maps linearly onto the outgoing angle; speed grows by a fixed
/// factor up to the cap.
fn deflect(ball: &mut Ball, paddle_y: f32, paddle_height: f32, direction: f32, speed_cap: f32) {
    let center = paddle_y + paddle_height / 2.0;
    let offset = (ball.y - center) / (paddle_height / 2.0);
    let angle = offset * MAX_DEFLECTION;

    ball.speed = (ball.speed * SPEED_GROWTH).min(speed_cap);
    ball.dx = direction * ball.speed * angle.cos();
    ball.dy = ball.speed * angle.sin();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SkillProfile;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn tuning() -> Tuning {
        Tuning {
            serve_speed: 5.0,
            speed_cap: 12.5,
            winning_score: 5,
            skill: SkillProfile::for_tier(1),
        }
    }

    /// A state that has already served and launched toward `direction`
    fn active_state(direction: f32) -> (GameState, Tuning, Instant) {
        let tuning = tuning();
        let mut state = GameState::with_rng(800.0, 600.0, SmallRng::seed_from_u64(11));
        let t0 = Instant::now();
        state.begin_serve(direction, tuning.serve_speed, t0);
        // Jump past the whole countdown in one frame; the catch-up loop
        // launches the ball on this call.
        let now = t0 + Duration::from_millis(3500);
        advance(&mut state, &tuning, now);
        (state, tuning, now)
    }

    #[test]
    fn test_countdown_freezes_ball() {
        let tuning = tuning();
        let mut state = GameState::with_rng(800.0, 600.0, SmallRng::seed_from_u64(3));
        let t0 = Instant::now();
        state.begin_serve(1.0, tuning.serve_speed, t0);
        let seed_x = state.ball.x;

        let events = advance(&mut state, &tuning, t0 + Duration::from_millis(500));

        assert!(!events.any());
        assert_eq!(state.ball.x, seed_x);
        assert_eq!(state.ball.dx, 0.0);
        assert!(state.round.is_counting());
    }

    #[test]
    fn test_countdown_counts_down_at_one_hertz() {
        let tuning = tuning();
        let mut state = GameState::with_rng(800.0, 600.0, SmallRng::seed_from_u64(8));
        let t0 = Instant::now();
        state.begin_serve(1.0, tuning.serve_speed, t0);

        let expectations = [
            (500, Some(3)),
            (1100, Some(2)),
            (2100, Some(1)),
        ];
        for (ms, counter) in expectations {
            advance(&mut state, &tuning, t0 + Duration::from_millis(ms));
            assert_eq!(state.round.countdown(), counter);
            assert_eq!(state.ball.dx, 0.0);
        }

        advance(&mut state, &tuning, t0 + Duration::from_millis(3100));
        assert!(state.round.is_active());
        assert!(state.ball.dx > 0.0);
    }

    #[test]
    fn test_serve_launches_within_the_angle_spread() {
        // 800x600, base speed 5, serve toward the opponent
        let (state, _, _) = active_state(1.0);

        assert!(state.round.is_active());
        assert!(state.ball.dx > 0.0);
        let magnitude = state.ball.velocity_magnitude();
        assert!((magnitude - 5.0).abs() < 1e-3);
        assert!(state.ball.dy.abs() <= 5.0 * (PI / 8.0).sin() + 1e-3);
    }

    #[test]
    fn test_wall_bounce_is_elastic_and_clamped() {
        let (mut state, tuning, now) = active_state(1.0);
        state.ball.x = 400.0;
        state.ball.y = 11.0;
        state.ball.dx = 3.0;
        state.ball.dy = -4.0;

        let events = advance(&mut state, &tuning, now);

        assert!(events.wall_bounce);
        assert_eq!(state.ball.dy, 4.0); // same magnitude, flipped sign
        assert!(state.ball.y >= BALL_RADIUS);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_paddle_hit_grows_speed_and_flips_direction() {
        let (mut state, tuning, now) = active_state(-1.0);
        let center = state.player.center(&state.geom);
        state.ball.x = 30.0;
        state.ball.y = center;
        state.ball.dx = -5.0;
        state.ball.dy = 0.0;
        state.ball.speed = 5.0;

        let events = advance(&mut state, &tuning, now);

        assert!(events.player_hit);
        assert!((state.ball.speed - 5.25).abs() < 1e-4);
        assert!(state.ball.dx > 0.0); // heading back toward the opponent
    }

    #[test]
    fn test_speed_never_exceeds_the_cap() {
        let (mut state, tuning, now) = active_state(-1.0);
        let center = state.player.center(&state.geom);
        state.ball.x = 30.0;
        state.ball.y = center;
        state.ball.dx = -5.0;
        state.ball.dy = 0.0;
        state.ball.speed = 12.4; // one growth step away from the cap

        advance(&mut state, &tuning, now);

        assert_eq!(state.ball.speed, tuning.speed_cap);
    }

    #[test]
    fn test_deflection_is_monotonic_and_bounded() {
        let speed_cap = 100.0;
        let mut last_dy = f32::NEG_INFINITY;
        for i in 0..=20 {
            let offset = -1.0 + i as f32 * 0.1;
            let mut ball = Ball {
                x: 0.0,
                y: 300.0 + offset * 45.0, // paddle center 300, half-height 45
                dx: -5.0,
                dy: 0.0,
                speed: 10.0,
            };
            deflect(&mut ball, 255.0, 90.0, 1.0, speed_cap);
            assert!(ball.dy > last_dy);
            last_dy = ball.dy;
            // |angle| <= pi/3 means |dy| <= speed * sin(pi/3)
            assert!(ball.dy.abs() <= ball.speed * (PI / 3.0).sin() + 1e-4);
        }
    }

    #[test]
    fn test_opponent_scores_on_left_exit() {
        let (mut state, tuning, now) = active_state(-1.0);
        state.ball.x = -26.0;
        state.ball.y = 300.0;
        state.ball.dx = -5.0;
        state.ball.dy = 0.0;
        state.ball.speed = 9.0;
        // Keep the ball clear of the player paddle band
        state.player.y = 0.0;
        state.player.target_y = 0.0;

        let events = advance(&mut state, &tuning, now);

        assert!(events.opponent_scored);
        assert!(!events.player_scored);
        assert_eq!(state.opponent_score, 1);
        // Fresh serve toward the side that conceded, counter back at 3
        assert_eq!(state.round.countdown(), Some(3));
        assert_eq!(state.round.serve_direction, -1.0);
        assert_eq!(state.ball.speed, tuning.serve_speed);

        // The exit fires exactly once: the next frame is a quiet countdown
        let events = advance(&mut state, &tuning, now + Duration::from_millis(16));
        assert!(!events.any());
    }

    #[test]
    fn test_player_scores_on_right_exit() {
        let (mut state, tuning, now) = active_state(1.0);
        state.ball.x = 826.0;
        state.ball.y = 300.0;
        state.ball.dx = 5.0;
        state.ball.dy = 0.0;
        state.opponent.y = 0.0;
        state.opponent.target_y = 0.0;

        let events = advance(&mut state, &tuning, now);

        assert!(events.player_scored);
        assert_eq!(state.player_score, 1);
        assert_eq!(state.round.serve_direction, 1.0);
        assert_eq!(state.round.countdown(), Some(3));
    }

    #[test]
    fn test_match_over_freezes_the_simulation() {
        let (mut state, mut tuning, now) = active_state(-1.0);
        tuning.winning_score = 1;
        state.ball.x = -26.0;
        state.ball.y = 300.0;
        state.ball.dx = -5.0;
        state.player.y = 0.0;
        state.player.target_y = 0.0;

        advance(&mut state, &tuning, now);
        assert_eq!(state.round.phase, RoundPhase::MatchOver);

        let frozen_x = state.ball.x;
        let events = advance(&mut state, &tuning, now + Duration::from_millis(16));
        assert!(!events.any());
        assert_eq!(state.ball.x, frozen_x);
    }

    #[test]
    fn test_paddles_stay_within_travel_range() {
        let (mut state, tuning, mut now) = active_state(1.0);
        for frame in 0..600 {
            // Slam the target against both extremes
            if frame % 40 < 20 {
                state.set_player_target(-1000.0);
            } else {
                state.set_player_target(10_000.0);
            }
            state.opponent.target_y = if frame % 2 == 0 { 0.0 } else { 10_000.0 };
            state.opponent.target_y = state
                .opponent
                .target_y
                .clamp(0.0, state.geom.paddle_travel());

            now += Duration::from_millis(16);
            advance(&mut state, &tuning, now);

            let travel = state.geom.paddle_travel();
            assert!(state.player.y >= 0.0 && state.player.y <= travel);
            assert!(state.opponent.y >= 0.0 && state.opponent.y <= travel);
        }
    }
}
