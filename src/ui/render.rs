use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::config::DisplayConfig;
use crate::game::state::{BALL_RADIUS, PADDLE_MARGIN};
use crate::game::{GameState, ParticleColor, RoundPhase};

use super::braille::{BrailleCanvas, DIGIT_HEIGHT, DIGIT_WIDTH};
use super::overlay::{render_overlay, OverlayMessage};

// Layout: header with labels and scores, bordered playable area, one
// border row, commentary line at the bottom.
// Row 0: side labels and controls hint (text)
// Rows 1..5: score digits (scale-2 glyphs, 14px tall in the 20px header)
// Row 5 onward: playable area, top border drawn on the last header pixel
// Row N-2: bottom border
// Row N-1: commentary line
pub const UI_HEADER_ROWS: u16 = 5;
pub const UI_FOOTER_ROWS: u16 = 2;

const SCORE_SCALE: usize = 2;
const COUNTDOWN_SCALE: usize = 4;

/// Accent colors resolved from the display config once per match
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub player: Color,
    pub opponent: Color,
    pub ball: Color,
}

impl Theme {
    pub fn from_display(display: &DisplayConfig) -> Self {
        let rgb = |c: [u8; 3]| Color::Rgb(c[0], c[1], c[2]);
        Self {
            player: rgb(display.player_color),
            opponent: rgb(display.opponent_color),
            ball: rgb(display.ball_color),
        }
    }
}

/// Pick a field width that matches the terminal's aspect ratio, so the
/// simulation space and the canvas agree on proportions. Falls back to the
/// configured width when the terminal is too small to measure.
pub fn field_width_for(cols: u16, rows: u16, field_height: f32, fallback: f32) -> f32 {
    let chrome = UI_HEADER_ROWS + UI_FOOTER_ROWS;
    if cols < 20 || rows <= chrome + 2 {
        return fallback;
    }
    let pixel_width = cols as f32 * 2.0;
    let pixel_height = (rows - chrome) as f32 * 4.0;
    (field_height * pixel_width / pixel_height).clamp(field_height * 0.5, field_height * 4.0)
}

/// Map a terminal row under the pointer to a field-space y coordinate
pub fn pointer_row_to_field_y(row: u16, term_rows: u16, field_height: f32) -> f32 {
    let playable_rows = term_rows.saturating_sub(UI_HEADER_ROWS + UI_FOOTER_ROWS).max(1);
    let rel = row.saturating_sub(UI_HEADER_ROWS).min(playable_rows - 1);
    (rel as f32 + 0.5) / playable_rows as f32 * field_height
}

pub fn render(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    commentary: &str,
    skill_name: &str,
    overlay: Option<&OverlayMessage>,
) {
    let area = frame.area();

    // True black background, not the terminal default
    let bg = Block::default().style(Style::default().bg(Color::Rgb(2, 6, 23)));
    frame.render_widget(bg, area);

    if area.width < 20 || area.height < UI_HEADER_ROWS + UI_FOOTER_ROWS + 3 {
        let notice = Paragraph::new("Terminal too small")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(notice, area);
        return;
    }

    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);

    let playable_rows = area.height - UI_HEADER_ROWS - UI_FOOTER_ROWS;
    let playable_pixels = playable_rows as usize * 4;
    let offset_y = UI_HEADER_ROWS as usize * 4;

    canvas.draw_horizontal_line(offset_y - 1);
    canvas.draw_horizontal_line(offset_y + playable_pixels);

    let scale_x = canvas.pixel_width() as f32 / state.geom.field_width;
    let scale_y = playable_pixels as f32 / state.geom.field_height;

    draw_scores(&mut canvas, state, theme);
    draw_center_line(&mut canvas, offset_y, playable_pixels);
    draw_paddles(&mut canvas, state, theme, scale_x, scale_y, offset_y);
    draw_ball(&mut canvas, state, theme, scale_x, scale_y, offset_y);
    draw_particles(&mut canvas, state, theme, scale_x, scale_y, offset_y);

    if let Some(n) = state.round.countdown() {
        let x = canvas.pixel_width() / 2 - DIGIT_WIDTH * COUNTDOWN_SCALE / 2;
        let y = offset_y + playable_pixels / 2 - DIGIT_HEIGHT * COUNTDOWN_SCALE / 2;
        canvas.draw_digit(n, x, y, COUNTDOWN_SCALE, None);
    }

    render_canvas(frame, &canvas, area);
    draw_header_text(frame, area, theme, skill_name);
    draw_commentary_line(frame, area, theme, commentary);

    if let Some(message) = overlay {
        render_overlay(frame, message, area);
    }
}

fn draw_scores(canvas: &mut BrailleCanvas, state: &GameState, theme: &Theme) {
    let width = canvas.pixel_width();
    let glyph_half = DIGIT_WIDTH * SCORE_SCALE / 2;
    // Digits are 14px tall and live below the text row: pixels 4..18 of the
    // 20px header. Text rows blank every cell they touch, so the glyphs and
    // the labels must not share a cell row.
    let score_y = 4;

    canvas.draw_digit(
        state.player_score,
        (width / 3).saturating_sub(glyph_half),
        score_y,
        SCORE_SCALE,
        Some(theme.player),
    );
    canvas.draw_digit(
        state.opponent_score,
        (width * 2 / 3).saturating_sub(glyph_half),
        score_y,
        SCORE_SCALE,
        Some(theme.opponent),
    );
}

fn draw_center_line(canvas: &mut BrailleCanvas, offset_y: usize, playable_pixels: usize) {
    let center_x = canvas.pixel_width() / 2;
    // Dotted: two lit pixels out of every six
    for y in (0..playable_pixels).step_by(6) {
        canvas.set_colored_pixel(center_x, offset_y + y, Color::Rgb(51, 65, 85));
        canvas.set_colored_pixel(center_x, offset_y + y + 1, Color::Rgb(51, 65, 85));
    }
}

fn draw_paddles(
    canvas: &mut BrailleCanvas,
    state: &GameState,
    theme: &Theme,
    scale_x: f32,
    scale_y: f32,
    offset_y: usize,
) {
    let width = ((state.geom.paddle_width * scale_x) as usize).max(1);
    let height = ((state.geom.paddle_height * scale_y) as usize).max(1);

    let player_x = (PADDLE_MARGIN * scale_x) as usize;
    let player_y = offset_y + (state.player.y * scale_y) as usize;
    canvas.fill_rect(player_x, player_y, width, height, Some(theme.player));

    let opponent_face = state.geom.field_width - PADDLE_MARGIN - state.geom.paddle_width;
    let opponent_x = (opponent_face * scale_x) as usize;
    let opponent_y = offset_y + (state.opponent.y * scale_y) as usize;
    canvas.fill_rect(opponent_x, opponent_y, width, height, Some(theme.opponent));
}

fn draw_ball(
    canvas: &mut BrailleCanvas,
    state: &GameState,
    theme: &Theme,
    scale_x: f32,
    scale_y: f32,
    offset_y: usize,
) {
    if state.round.phase == RoundPhase::Idle {
        return;
    }

    let width = ((BALL_RADIUS * 2.0 * scale_x) as usize).max(2);
    let height = ((BALL_RADIUS * 2.0 * scale_y) as usize).max(2);
    let x = ((state.ball.x * scale_x) as usize).saturating_sub(width / 2);
    let y = (offset_y + (state.ball.y * scale_y) as usize).saturating_sub(height / 2);
    canvas.fill_rect(x, y, width, height, Some(theme.ball));
}

fn draw_particles(
    canvas: &mut BrailleCanvas,
    state: &GameState,
    theme: &Theme,
    scale_x: f32,
    scale_y: f32,
    offset_y: usize,
) {
    for particle in state.particles.iter() {
        let color = match particle.color {
            ParticleColor::Wall => Color::White,
            ParticleColor::Player => theme.player,
            ParticleColor::Opponent => theme.opponent,
        };
        let x = (particle.x * scale_x) as usize;
        let y = offset_y as isize + (particle.y * scale_y) as isize;
        if y < offset_y as isize {
            continue;
        }
        canvas.set_colored_pixel(x, y as usize, color);
        canvas.set_colored_pixel(x + 1, y as usize, color);
    }
}

/// Push the canvas to the frame, one line per cell row, grouping runs of
/// equally-tinted cells into single spans
fn render_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    for y in 0..area.height as usize {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_color: Option<Color> = None;

        for x in 0..area.width as usize {
            let color = canvas.cell_color(x, y);
            if color != run_color && !run.is_empty() {
                spans.push(styled_run(std::mem::take(&mut run), run_color));
            }
            run_color = color;
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(styled_run(run, run_color));
        }

        let row_area = Rect {
            x: area.x,
            y: area.y + y as u16,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn styled_run(text: String, color: Option<Color>) -> Span<'static> {
    Span::styled(
        text,
        Style::default().fg(color.unwrap_or(Color::White)),
    )
}

fn draw_header_text(frame: &mut Frame, area: Rect, theme: &Theme, skill_name: &str) {
    // Everything shares row 0 so the score glyphs below stay untouched
    let left = " YOU";
    let center = "Mouse or W/S: Move   Q: Menu";
    let right = format!("CAT-CPU {} ", skill_name);

    let width = area.width as usize;
    let pad_left = (width.saturating_sub(center.len()) / 2).saturating_sub(left.len());
    let used = left.len() + pad_left + center.len() + right.len();
    let pad_right = width.saturating_sub(used);

    let labels = Line::from(vec![
        Span::styled(
            left,
            Style::default().fg(theme.player).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad_left)),
        Span::styled(center, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(pad_right)),
        Span::styled(
            right,
            Style::default()
                .fg(theme.opponent)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(labels),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );
}

fn draw_commentary_line(frame: &mut Frame, area: Rect, theme: &Theme, commentary: &str) {
    if commentary.is_empty() {
        return;
    }
    let line = Paragraph::new(format!("▸ {}", commentary))
        .style(Style::default().fg(theme.opponent))
        .alignment(Alignment::Center);
    frame.render_widget(
        line,
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );
}
