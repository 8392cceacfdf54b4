//! Arena rendering.
//!
//! Uses half-block pixel rendering. Each board cell maps to `cell_size`²
//! coloured pixels; pairs of vertical pixels are packed into one terminal row
//! using the `▀` (upper half block) character with fg=top, bg=bottom colors.

use super::game_common::{
    create_game_layout, game_layout_areas, render_info_panel_frame, render_quit_status_bar,
    render_status_bar,
};
use super::{faded, to_color};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use slither::arena::{Board, EffectKind, Position, RoundPhase, RoundSnapshot, Rgb, SnakeView};
use slither::input::key_set_label;
use slither::session::MessageView;

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀ (fg fills top half, bg fills bottom half)
const FULL_BLOCK: char = '\u{2588}'; // █

const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);
const FOOD_COLOR: Rgb = Rgb::WHITE;

pub const INFO_PANEL_WIDTH: u16 = 26;
pub const CONTENT_MIN_HEIGHT: u16 = 6;

/// Everything besides the snapshot that the round view shows.
pub struct ArenaHud<'a> {
    pub countdown_ms: Option<u64>,
    pub message: Option<MessageView<'a>>,
    pub quit_pending: bool,
    pub tick_interval_ms: u64,
    pub background: Rgb,
    pub cell_size: u32,
}

/// Board bounds for a terminal area: one cell per column and two per row
/// (half blocks), divided by the cell size.
pub fn board_for_area(area: Rect, cell_size: u32) -> Board {
    let layout = game_layout_areas(area, CONTENT_MIN_HEIGHT, INFO_PANEL_WIDTH);
    let cols = layout.content.width.saturating_sub(2) as u32;
    let rows = layout.content.height.saturating_sub(2) as u32;
    Board::from_display(cols, rows * 2, cell_size)
}

/// Render the round: play field, status bar and info panel.
pub fn render_arena_scene(frame: &mut Frame, area: Rect, snapshot: &RoundSnapshot, hud: &ArenaHud) {
    let layout = create_game_layout(
        frame,
        area,
        " Slither ",
        Color::LightGreen,
        CONTENT_MIN_HEIGHT,
        INFO_PANEL_WIDTH,
    );

    let field = render_play_field(frame, layout.content, snapshot, hud);

    if let Some(remaining) = hud.countdown_ms {
        if let Some(field) = field {
            render_player_labels(frame, &field, snapshot);
        }
        render_ready_prompt(frame, layout.content, remaining);
    }
    if let Some(message) = &hud.message {
        render_message(frame, layout.content, message, hud.background);
    }

    render_status_bar_content(frame, layout.status_bar, snapshot, hud);
    render_info_panel(frame, layout.info_panel, snapshot, hud);
}

/// Where the play field landed on screen, for overlaying labels.
struct FieldGeometry {
    /// Terminal column of pixel x = 0.
    origin_x: u16,
    /// Terminal row of pixel y = 0 (and 1).
    origin_y: u16,
    cell_size: u32,
    area: Rect,
}

impl FieldGeometry {
    /// Terminal cell showing the top-left pixel of a board cell.
    fn terminal_cell(&self, pos: Position) -> Option<(u16, u16)> {
        let px = pos.x.max(0) as u32 * self.cell_size;
        let py = pos.y.max(0) as u32 * self.cell_size;
        let x = self.origin_x as u32 + px;
        let y = self.origin_y as u32 + py / 2;
        let inside = x < (self.area.x + self.area.width) as u32
            && y < (self.area.y + self.area.height) as u32;
        inside.then_some((x as u16, y as u16))
    }
}

/// Paint the snakes and foods into a pixel grid.
fn build_pixels(snapshot: &RoundSnapshot, cell_size: usize) -> Vec<Vec<Option<Color>>> {
    let board = snapshot.board;
    let grid_w = board.width.max(0) as usize * cell_size;
    let grid_h = board.height.max(0) as usize * cell_size;
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid_w]; grid_h];

    let mut paint = |pos: Position, color: Color| {
        if !board.contains(pos) {
            return;
        }
        let x0 = pos.x as usize * cell_size;
        let y0 = pos.y as usize * cell_size;
        for row in pixels.iter_mut().skip(y0).take(cell_size) {
            for px in row.iter_mut().skip(x0).take(cell_size) {
                *px = Some(color);
            }
        }
    };

    for snake in &snapshot.snakes {
        let last = snake.body.len().saturating_sub(1);
        for (i, &cell) in snake.body.iter().enumerate() {
            let color = if i == 0 || i == last {
                snake.head_tail_color
            } else {
                snake.body_color
            };
            paint(cell, to_color(color));
        }
    }

    for food in snapshot.foods.iter().filter(|f| f.visible) {
        paint(food.position, to_color(FOOD_COLOR));
    }

    pixels
}

fn border_line(left: char, fill: char, right: char, inner_w: usize) -> Span<'static> {
    let mut s = String::with_capacity(inner_w + 2);
    s.push(left);
    s.extend(std::iter::repeat_n(fill, inner_w));
    s.push(right);
    Span::styled(s, Style::default().fg(BORDER_COLOR))
}

/// Render the play field using half-block pixel rendering.
fn render_play_field(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RoundSnapshot,
    hud: &ArenaHud,
) -> Option<FieldGeometry> {
    if area.height < 3 || area.width < 5 {
        return None;
    }

    let cell_size = hud.cell_size.max(1) as usize;
    let pixels = build_pixels(snapshot, cell_size);
    let grid_h = pixels.len();
    let grid_w = pixels.first().map_or(0, |row| row.len());
    let empty_bg = to_color(hud.background);

    let content_rows = grid_h.div_ceil(2);
    let render_w = ((grid_w + 2) as u16).min(area.width);
    let inner_w = render_w.saturating_sub(2) as usize;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    // ── Row 0: Top border with alive count ──────────────────────
    {
        let alive = snapshot.snakes.iter().filter(|s| s.alive).count();
        let label = "Alive: ";
        let value = format!("{}/{}", alive, snapshot.snakes.len());
        let full_len = label.len() + value.len();
        let pad_before = inner_w.saturating_sub(full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + full_len);

        let border = Style::default().fg(BORDER_COLOR);
        let mut spans: Vec<Span> = vec![Span::styled(BORDER_TL.to_string(), border)];
        if pad_before > 0 {
            spans.push(Span::styled(
                std::iter::repeat_n(BORDER_H, pad_before).collect::<String>(),
                border,
            ));
        }
        if inner_w >= full_len {
            spans.push(Span::styled(label, border));
            spans.push(Span::styled(value, Style::default().fg(Color::White)));
        }
        if pad_after > 0 {
            spans.push(Span::styled(
                std::iter::repeat_n(BORDER_H, pad_after).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(BORDER_TR.to_string(), border));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, y_off, render_w, 1),
        );
    }

    // ── Game content rows (half-block pixel rendering) ──────────
    let empty_row: Vec<Option<Color>> = vec![None; grid_w];
    for term_row in 0..content_rows {
        let top_gy = term_row * 2;
        let bot_gy = term_row * 2 + 1;
        let top_row = if top_gy < grid_h { &pixels[top_gy] } else { &empty_row };
        let bot_row = if bot_gy < grid_h { &pixels[bot_gy] } else { &empty_row };

        let mut spans: Vec<Span> = vec![Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(BORDER_COLOR),
        )];

        // Batch consecutive cells with the same style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()).take(inner_w) {
            let fg = top_c.unwrap_or(empty_bg);
            let bg = bot_c.unwrap_or(empty_bg);

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(
            BORDER_V.to_string(),
            Style::default().fg(BORDER_COLOR),
        ));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        frame.render_widget(
            Paragraph::new(Line::from(border_line(BORDER_BL, BORDER_H, BORDER_BR, inner_w))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }

    Some(FieldGeometry {
        origin_x: x_off + 1,
        origin_y: y_off + 1,
        cell_size: cell_size as u32,
        area,
    })
}

/// Player numbers next to each snake's middle, so players can find themselves.
fn render_player_labels(frame: &mut Frame, field: &FieldGeometry, snapshot: &RoundSnapshot) {
    for snake in &snapshot.snakes {
        let Some(&middle) = snake.body.get(snake.body.len() / 2) else {
            continue;
        };
        let horizontal = snake.body.len() > 1 && snake.body[0].y == snake.body[1].y;
        // One terminal row above a horizontal snake, one cell left of a vertical one
        let rows_up = (2 / field.cell_size.max(1) as i32).max(1);
        let label_pos = if horizontal {
            Position::new(middle.x, (middle.y - rows_up).max(0))
        } else {
            Position::new((middle.x - 1).max(0), middle.y)
        };
        let Some((x, y)) = field.terminal_cell(label_pos) else {
            continue;
        };
        let text = format!("{}", snake.index + 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::White)
                    .bg(to_color(snake.base_color))
                    .add_modifier(Modifier::BOLD),
            )),
            Rect::new(x, y, text.len() as u16, 1),
        );
    }
}

/// Render the "Ready?" prompt centered on the play field.
fn render_ready_prompt(frame: &mut Frame, area: Rect, remaining_ms: u64) {
    if area.height < 5 || area.width < 12 {
        return;
    }
    let seconds = remaining_ms.div_ceil(1000);
    let prompt = format!("[ Ready? {} ]", seconds);
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;
    let y = area.y + area.height / 2;

    let line = Paragraph::new(Line::from(Span::styled(
        prompt.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, y, prompt.len() as u16, 1));
}

/// Transient message near the top of the play field.
fn render_message(frame: &mut Frame, area: Rect, message: &MessageView, background: Rgb) {
    if area.height < 4 {
        return;
    }
    let y = area.y + 1 + area.height / 4;
    let text = Paragraph::new(Span::styled(
        message.text.to_string(),
        Style::default()
            .fg(faded(Rgb::WHITE, background, message.opacity))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(text, Rect::new(area.x, y, area.width, 1));
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RoundSnapshot,
    hud: &ArenaHud,
) {
    if render_quit_status_bar(frame, area, hud.quit_pending) {
        return;
    }

    let (status, color) = if hud.countdown_ms.is_some() {
        ("Ready?", Color::LightGreen)
    } else {
        match snapshot.phase {
            RoundPhase::Running => ("Slither!", Color::Green),
            RoundPhase::Ending { .. } | RoundPhase::Ended => ("Round over", Color::Yellow),
        }
    };
    render_status_bar(
        frame,
        area,
        status,
        color,
        &[("[Keys/Swipe]", "Steer"), ("[Esc]", "Leave")],
    );
}

fn effect_label(snake: &SnakeView) -> Option<String> {
    match snake.effect {
        EffectKind::None | EffectKind::Food => None,
        effect if snake.warning => Some(format!("{} (ending)", effect.name())),
        effect => Some(effect.name().to_string()),
    }
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, snapshot: &RoundSnapshot, hud: &ArenaHud) {
    let inner = render_info_panel_frame(frame, area);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Board: ", dim),
            Span::styled(
                format!("{}x{}", snapshot.board.width, snapshot.board.height),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Tick: ", dim),
            Span::styled(
                format!("{}ms", hud.tick_interval_ms),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
    ];

    for snake in &snapshot.snakes {
        let name_style = if snake.alive {
            Style::default()
                .fg(to_color(snake.base_color))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{FULL_BLOCK} "),
                Style::default().fg(to_color(snake.head_tail_color)),
            ),
            Span::styled(format!("P{}", snake.index + 1), name_style),
            Span::styled(
                format!(" {}", key_set_label(snake.index).unwrap_or("swipe")),
                dim,
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  len {}  kills {}", snake.body.len(), snake.kills),
            Style::default().fg(Color::Gray),
        )));
        if let Some(label) = effect_label(snake).filter(|_| snake.alive) {
            lines.push(Line::from(Span::styled(
                format!("  {}", label),
                Style::default().fg(to_color(snake.head_tail_color)),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
