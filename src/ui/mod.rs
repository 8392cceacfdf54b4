//! Terminal rendering. Reads session snapshots; never mutates game state.

pub mod arena_scene;
pub mod game_common;
pub mod menu_scene;
pub mod scoreboard_scene;

use ratatui::style::Color;
use slither::arena::Rgb;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Blend `rgb` toward `background`; `opacity` 1.0 is the colour itself.
pub fn faded(rgb: Rgb, background: Rgb, opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| (bg as f32 + (fg as f32 - bg as f32) * t).round() as u8;
    Color::Rgb(
        mix(rgb.r, background.r),
        mix(rgb.g, background.g),
        mix(rgb.b, background.b),
    )
}
