//! Game configuration.
//!
//! Defaults reproduce the stock game. A JSON file at `~/.slither/config.json`
//! may override any subset of fields; anything it leaves out keeps its default.

use crate::arena::effects::EffectCatalog;
use crate::arena::food::FoodEffectPolicy;
use crate::arena::types::{Board, Rgb};
use crate::core::constants::*;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of snakes in a round
    pub players: usize,

    /// Ticks per second
    pub speed: u32,

    /// Upper bound for `speed` (and for the scaled speed)
    pub max_speed: u32,

    /// When set, speed = min board dimension * factor (then clamped)
    pub speed_scale_factor: Option<f64>,

    /// Pixels per board cell at a pixel ratio of 1
    pub default_cell_size: u32,

    /// Display density multiplier applied to `default_cell_size`
    pub pixel_ratio: f64,

    /// Starting length as a fraction of the smaller board dimension
    pub starting_length_scale_factor: f64,

    pub min_starting_length: usize,

    /// Delay between the endgame condition and the scoreboard
    pub end_game_delay_ms: u64,

    /// How long before expiry an effect starts flashing. Must be a multiple
    /// of the flash period.
    pub effect_warning_ms: u64,

    /// Pause before the first tick so players can find their snake
    pub pre_round_delay_ms: u64,

    pub food_effect: FoodEffectPolicy,

    pub effects: EffectCatalog,

    pub player_colors: Vec<Rgb>,
    pub dead_snake_color: Rgb,
    pub warning_color: Rgb,
    pub background_color: Rgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            speed: DEFAULT_SPEED_FPS,
            max_speed: DEFAULT_MAX_SPEED_FPS,
            speed_scale_factor: None,
            default_cell_size: 1,
            pixel_ratio: 1.0,
            starting_length_scale_factor: DEFAULT_STARTING_LENGTH_SCALE_FACTOR,
            min_starting_length: DEFAULT_MIN_STARTING_LENGTH,
            end_game_delay_ms: DEFAULT_END_GAME_DELAY_MS,
            effect_warning_ms: DEFAULT_EFFECT_WARNING_MS,
            pre_round_delay_ms: DEFAULT_PRE_ROUND_DELAY_MS,
            food_effect: FoodEffectPolicy::default(),
            effects: EffectCatalog::default(),
            player_colors: PLAYER_COLORS.to_vec(),
            dead_snake_color: Rgb::GREY,
            warning_color: Rgb::GREY,
            background_color: Rgb::BLACK,
        }
    }
}

impl GameConfig {
    /// Load `~/.slither/config.json`, falling back to defaults when it is absent.
    pub fn load() -> Result<Self, ConfigError> {
        match persistence::read_optional(CONFIG_FILE)? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current config to `~/.slither/config.json`.
    pub fn save(&self) -> Result<(), ConfigError> {
        persistence::save_json(CONFIG_FILE, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_colors.is_empty() {
            return Err(ConfigError::Invalid(
                "player_colors must not be empty".to_string(),
            ));
        }
        if self.players == 0 || self.players > self.player_colors.len() {
            return Err(ConfigError::Invalid(format!(
                "players must be between 1 and {}",
                self.player_colors.len()
            )));
        }
        if self.speed == 0 || self.max_speed == 0 {
            return Err(ConfigError::Invalid(
                "speed and max_speed must be positive".to_string(),
            ));
        }
        if self.effect_warning_ms % EFFECT_FLASH_PERIOD_MS != 0 {
            return Err(ConfigError::Invalid(format!(
                "effect_warning_ms must be a multiple of {EFFECT_FLASH_PERIOD_MS}"
            )));
        }
        let timings = [
            ("end_game_delay_ms", self.end_game_delay_ms),
            ("effect_warning_ms", self.effect_warning_ms),
            ("pre_round_delay_ms", self.pre_round_delay_ms),
        ];
        for (name, value) in timings {
            if value > MAX_TIMING_MS {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most {MAX_TIMING_MS}"
                )));
            }
        }
        let mut entries = self.effects.entries.iter();
        if let Some(entry) = entries.find(|e| e.duration_ms > MAX_TIMING_MS) {
            return Err(ConfigError::Invalid(format!(
                "duration_ms for {} must be at most {MAX_TIMING_MS}",
                entry.kind.name()
            )));
        }
        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            return Err(ConfigError::Invalid(
                "pixel_ratio must be a positive number".to_string(),
            ));
        }
        if self.min_starting_length == 0 {
            return Err(ConfigError::Invalid(
                "min_starting_length must be at least 1".to_string(),
            ));
        }
        if self.starting_length_scale_factor < 0.0 {
            return Err(ConfigError::Invalid(
                "starting_length_scale_factor must not be negative".to_string(),
            ));
        }
        if let Some(factor) = self.speed_scale_factor {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(ConfigError::Invalid(
                    "speed_scale_factor must be a positive number".to_string(),
                ));
            }
        }
        if self.food_effect == FoodEffectPolicy::Weighted && self.effects.total_weight() <= 0.0 {
            return Err(ConfigError::Invalid(
                "weighted food needs at least one effect with a positive weight".to_string(),
            ));
        }
        Ok(())
    }

    /// Pixels per cell after applying the display density.
    pub fn cell_size(&self) -> u32 {
        (self.default_cell_size as f64 * self.pixel_ratio)
            .round()
            .max(1.0) as u32
    }

    /// Length every snake starts a round with on this board.
    pub fn starting_length(&self, board: Board) -> usize {
        let scaled =
            (board.min_dimension().max(0) as f64 * self.starting_length_scale_factor).floor();
        (scaled as usize).max(self.min_starting_length)
    }

    /// Tick rate for this board, clamped to `[1, max_speed]`.
    pub fn effective_speed(&self, board: Board) -> u32 {
        let speed = match self.speed_scale_factor {
            Some(factor) => (board.min_dimension().max(0) as f64 * factor).floor() as u32,
            None => self.speed,
        };
        speed.clamp(1, self.max_speed.max(1))
    }

    pub fn player_color(&self, slot: usize) -> Rgb {
        self.player_colors[slot % self.player_colors.len()]
    }
}
