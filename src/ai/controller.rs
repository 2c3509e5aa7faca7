// Opponent paddle control: predict the impact point, then miss a little

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::game::{GameState, RoundPhase};

use super::prediction::project_impact;
use super::SkillProfile;

// Per-frame chance of rolling a fresh error while none is pending
const ERROR_CHANCE: f32 = 0.05;
// Confidence level past which the pending error starts to wash out
const CORRECTION_CONFIDENCE: f32 = 0.8;
// Error retained per frame during the correction window
const CORRECTION_DECAY: f32 = 0.8;

/// Drives the opponent paddle's target position. Holds the one piece of
/// state that persists across frames within a rally: the current error
/// offset, the controller's simulated misjudgment of the impact point.
pub struct OpponentController {
    profile: SkillProfile,
    error_offset: f32,
    rng: SmallRng,
}

impl OpponentController {
    pub fn new(profile: SkillProfile) -> Self {
        Self::with_rng(profile, SmallRng::from_entropy())
    }

    pub fn with_rng(profile: SkillProfile, rng: SmallRng) -> Self {
        Self {
            profile,
            error_offset: 0.0,
            rng,
        }
    }

    pub fn profile(&self) -> &SkillProfile {
        &self.profile
    }

    /// Forget the pending misjudgment. Called at every new serve so each
    /// rally starts unbiased.
    pub fn reset(&mut self) {
        self.error_offset = 0.0;
    }

    /// Compute this frame's target for the opponent paddle and store it on
    /// the paddle. Smoothing toward the target is the kernel's job; the
    /// target itself is always clamped to the legal travel range first.
    pub fn drive(&mut self, state: &mut GameState) {
        let geom = state.geom;

        let target_center = match state.round.phase {
            RoundPhase::MatchOver => return,
            RoundPhase::Idle | RoundPhase::Counting(_) => geom.field_height / 2.0,
            RoundPhase::Active => {
                if state.ball.dx > 0.0 {
                    let plane_x = geom.opponent_face_x();
                    match project_impact(&state.ball, plane_x, geom.field_height) {
                        Some(predicted) => {
                            // While no misjudgment is pending, occasionally roll
                            // one, scaled by the skill profile
                            if self.error_offset == 0.0 && self.rng.gen::<f32>() < ERROR_CHANCE {
                                self.error_offset = (self.rng.gen::<f32>() - 0.5)
                                    * geom.field_height
                                    * self.profile.error_factor;
                            }

                            // The closer the ball, the harder the correction:
                            // the error washes out just before contact
                            let distance = plane_x - state.ball.x;
                            let confidence = 1.0 - distance / geom.field_width;
                            if confidence > CORRECTION_CONFIDENCE {
                                self.error_offset *= CORRECTION_DECAY;
                            }

                            predicted + self.error_offset
                        }
                        // Already level with or past the paddle plane
                        None => state.ball.y,
                    }
                } else {
                    // Ball moving away: drift home, next approach starts clean
                    self.error_offset = 0.0;
                    geom.field_height / 2.0
                }
            }
        };

        let target = target_center - geom.paddle_height / 2.0;
        state.opponent.target_y = target.clamp(0.0, geom.paddle_travel());
    }
}
