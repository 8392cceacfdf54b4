//! Main menu: choose the number of players and start.

use super::game_common::render_status_bar;
use super::to_color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use slither::core::GameConfig;
use slither::input::key_set_label;

const MENU_WIDTH: u16 = 44;

pub struct MenuScreen {
    pub players: usize,
    pub max_players: usize,
}

impl MenuScreen {
    pub fn new(players: usize, max_players: usize) -> Self {
        Self {
            players: players.clamp(1, max_players.max(1)),
            max_players: max_players.max(1),
        }
    }

    pub fn increase(&mut self) {
        if self.players < self.max_players {
            self.players += 1;
        }
    }

    pub fn decrease(&mut self) {
        if self.players > 1 {
            self.players -= 1;
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, config: &GameConfig) {
        frame.render_widget(Clear, area);

        let height = (self.max_players as u16 + 12).min(area.height);
        let width = MENU_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let menu_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .title(" Slither ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightGreen));
        let inner = block.inner(menu_area);
        frame.render_widget(block, menu_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(inner);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Players: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("< {} >", self.players),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for slot in 0..self.max_players {
            let active = slot < self.players;
            let color = if active {
                to_color(config.player_color(slot))
            } else {
                Color::DarkGray
            };
            lines.push(Line::from(vec![
                Span::styled(format!("Player {} ", slot + 1), Style::default().fg(color)),
                Span::styled(
                    key_set_label(slot).unwrap_or("swipe only"),
                    Style::default().fg(if active { Color::Gray } else { Color::DarkGray }),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);

        render_status_bar(
            frame,
            chunks[1],
            "Last snake standing wins",
            Color::LightGreen,
            &[("[Up/Down]", "Players"), ("[Enter]", "Play"), ("[q]", "Quit")],
        );
    }
}
