// Serve countdown and round phase machine

use std::time::{Duration, Instant};

const COUNTDOWN_START: u8 = 3;
const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No match running yet
    Idle,
    /// Serve countdown; the ball is frozen, the value is visible on screen
    Counting(u8),
    /// Ball in play
    Active,
    /// A side reached the winning score; the simulation is frozen
    MatchOver,
}

/// Round state: current phase, serve direction and the countdown deadline.
/// There is only ever one deadline slot; starting a new countdown replaces
/// whatever was pending, so two timers can never run at once.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// +1 = ball travels toward the opponent, -1 = toward the player
    pub serve_direction: f32,
    next_tick: Option<Instant>,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            serve_direction: 1.0,
            next_tick: None,
        }
    }

    pub fn start_countdown(&mut self, direction: f32, now: Instant) {
        self.phase = RoundPhase::Counting(COUNTDOWN_START);
        self.serve_direction = direction;
        self.next_tick = Some(now + TICK_INTERVAL);
    }

    pub fn finish_match(&mut self) {
        self.phase = RoundPhase::MatchOver;
        self.next_tick = None;
    }

    /// Advance the countdown. Returns true on the frame the countdown hits
    /// zero, which is the caller's cue to launch the ball.
    pub fn tick(&mut self, now: Instant) -> bool {
        while let (RoundPhase::Counting(n), Some(deadline)) = (self.phase, self.next_tick) {
            if now < deadline {
                return false;
            }
            let n = n - 1;
            if n == 0 {
                self.phase = RoundPhase::Active;
                self.next_tick = None;
                return true;
            }
            self.phase = RoundPhase::Counting(n);
            self.next_tick = Some(deadline + TICK_INTERVAL);
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn is_counting(&self) -> bool {
        matches!(self.phase, RoundPhase::Counting(_))
    }

    pub fn countdown(&self) -> Option<u8> {
        match self.phase {
            RoundPhase::Counting(n) => Some(n),
            _ => None,
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}
