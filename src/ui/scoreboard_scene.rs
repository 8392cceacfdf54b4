//! End-of-round scoreboard, drawn over the final frame of the arena.

use super::game_common::{render_overlay_box, GameResultType};
use super::to_color;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use slither::session::RoundSummary;

pub fn render_scoreboard(frame: &mut Frame, area: Rect, summary: &RoundSummary) {
    let result_type = if summary.is_draw() {
        GameResultType::Draw
    } else {
        GameResultType::Win
    };

    let mut lines = vec![
        Line::from(Span::styled(
            summary.headline(),
            Style::default()
                .fg(result_type.color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for line in &summary.players {
        let status = if line.alive { "alive" } else { "dead" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("Player {}", line.player + 1),
                Style::default().fg(to_color(line.color)),
            ),
            Span::styled(
                format!("  {} kills  length {}  {}", line.kills, line.length, status),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    lines.push(Line::from(""));
    for text in [summary.most_kills_text(), summary.longest_text()]
        .into_iter()
        .flatten()
    {
        lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Cyan))));
    }
    lines.push(Line::from(Span::styled(
        summary.death_order_text(),
        Style::default().fg(Color::White),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Rematch  [m] Menu  [q] Quit",
        Style::default().fg(Color::DarkGray),
    )));

    render_overlay_box(frame, area, result_type, "Scoreboard", lines);
}
