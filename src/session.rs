// The per-match frame loop: input, round state, opponent, kernel, render.

use std::io;
use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::Terminal;

use crate::ai::{OpponentController, SkillProfile};
use crate::commentary::{CommentarySink, MatchEvent};
use crate::config::Config;
use crate::debug;
use crate::game::{self, GameState, InputAction, RoundPhase, Tuning};
use crate::ui::{self, OverlayMessage, OverlayStyle, Theme};

// Chance that an opponent paddle hit triggers a taunt
const TAUNT_CHANCE: f32 = 0.4;
// Field units the paddle target moves per key press
const KEY_NUDGE: f32 = 40.0;

/// Run one match to completion. Returns when the player leaves for the
/// menu; a finished match waits in the MatchOver overlay for a rematch or
/// an exit.
pub fn run_match<B: ratatui::backend::Backend, S: CommentarySink>(
    terminal: &mut Terminal<B>,
    config: &Config,
    sink: &mut S,
) -> Result<(), io::Error> {
    let tuning = Tuning::from_config(config);
    let theme = Theme::from_display(&config.display);
    let skill_name = SkillProfile::display_name(tuning.skill.tier);
    let frame_duration = Duration::from_millis(1000 / config.display.target_fps.max(1));

    debug::log(
        "MATCH",
        &format!(
            "Starting match: tier={} serve_speed={}",
            tuning.skill.tier, tuning.serve_speed
        ),
    );

    let field_height = config.physics.field_height;
    let size = terminal.size()?;
    let mut state = GameState::new(
        ui::field_width_for(size.width, size.height, field_height, config.physics.field_width),
        field_height,
    );
    let mut controller = OpponentController::new(tuning.skill);

    state.begin_match(tuning.serve_speed, Instant::now());
    sink.notify(MatchEvent::MatchStart, 0, 0);

    loop {
        let now = Instant::now();

        // The terminal may have been resized; the field keeps its height
        // and follows the viewport's aspect ratio. In-flight state is kept.
        let size = terminal.size()?;
        state.resize(
            ui::field_width_for(size.width, size.height, field_height, config.physics.field_width),
            field_height,
        );

        for action in game::poll_input(&config.keybindings)? {
            match action {
                InputAction::Quit => return Ok(()),
                InputAction::Rematch => {
                    if state.round.phase == RoundPhase::MatchOver {
                        state.begin_match(tuning.serve_speed, now);
                        controller.reset();
                        sink.notify(MatchEvent::MatchStart, 0, 0);
                    }
                }
                InputAction::PaddleUp => state.nudge_player_target(-KEY_NUDGE),
                InputAction::PaddleDown => state.nudge_player_target(KEY_NUDGE),
                InputAction::Pointer { row } => {
                    let y = ui::pointer_row_to_field_y(row, size.height, state.geom.field_height);
                    state.set_player_target(y);
                }
            }
        }

        controller.drive(&mut state);
        let events = game::advance(&mut state, &tuning, now);

        if events.opponent_hit && state.rng.gen::<f32>() < TAUNT_CHANCE {
            sink.notify(
                MatchEvent::OpponentHit,
                state.player_score,
                state.opponent_score,
            );
        }
        if events.player_scored {
            controller.reset();
            sink.notify(
                MatchEvent::PlayerScored,
                state.player_score,
                state.opponent_score,
            );
        }
        if events.opponent_scored {
            controller.reset();
            sink.notify(
                MatchEvent::OpponentScored,
                state.player_score,
                state.opponent_score,
            );
        }
        sink.tick();

        let overlay = match_over_overlay(&state, &config.keybindings);
        terminal.draw(|frame| {
            ui::render(
                frame,
                &state,
                &theme,
                sink.line(),
                skill_name,
                overlay.as_ref(),
            )
        })?;

        limit_frame_rate(now, frame_duration);
    }
}

fn match_over_overlay(
    state: &GameState,
    bindings: &crate::config::KeyBindings,
) -> Option<OverlayMessage> {
    if state.round.phase != RoundPhase::MatchOver {
        return None;
    }

    let player_won = state.player_score > state.opponent_score;
    let (headline, style) = if player_won {
        ("YOU WIN!", OverlayStyle::Victory)
    } else {
        ("THE CAT WINS", OverlayStyle::Defeat)
    };

    Some(
        OverlayMessage::new(
            style,
            vec![
                headline.to_string(),
                String::new(),
                format!("Final: {} - {}", state.player_score, state.opponent_score),
                String::new(),
                format!(
                    "{} to Rematch  |  {} for Menu",
                    bindings.rematch, bindings.quit
                ),
            ],
        )
        .with_title("MATCH OVER"),
    )
}

/// Sleep off the remainder of the frame so the kernel's frame-step-of-one
/// integration sees a steady cadence.
fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}
