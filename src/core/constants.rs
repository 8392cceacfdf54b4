use crate::arena::types::Rgb;

// Effect warning flash: the head/tail shows the effect colour for the first
// half of every period once the warning window opens.
pub const EFFECT_FLASH_PERIOD_MS: u64 = 200;
pub const EFFECT_FLASH_ON_MS: u64 = 100;

// Round timing defaults
pub const DEFAULT_SPEED_FPS: u32 = 25;
pub const DEFAULT_MAX_SPEED_FPS: u32 = 25;
pub const DEFAULT_END_GAME_DELAY_MS: u64 = 500;
pub const DEFAULT_EFFECT_WARNING_MS: u64 = 3600;
pub const DEFAULT_PRE_ROUND_DELAY_MS: u64 = 2000;
/// Upper bound for any configured delay or effect duration (one day).
pub const MAX_TIMING_MS: u64 = 86_400_000;

// On-screen messages: fully visible, then a linear fade
pub const MESSAGE_VISIBLE_MS: u64 = 2000;
pub const MESSAGE_FADE_MS: u64 = 1000;
pub const END_OF_ROUND_MESSAGE: &str = "Nice.";

// Starting positions: lanes start one cell off centre and are staggered by
// a random offset in [-STAGGER_RANGE, STAGGER_RANGE).
pub const STAGGER_RANGE: i32 = 15;
pub const LANE_RETRIES: usize = 16;

// Starting length = min board dimension (cells) * factor, never below the minimum
pub const DEFAULT_STARTING_LENGTH_SCALE_FACTOR: f64 = 0.225;
pub const DEFAULT_MIN_STARTING_LENGTH: usize = 3;

pub const DEFAULT_PLAYERS: usize = 4;

/// Player colours in slot order.
pub const PLAYER_COLORS: [Rgb; 8] = [
    Rgb::new(0x00, 0xAA, 0xFF),
    Rgb::new(0xFF, 0x00, 0xAA),
    Rgb::new(0xAA, 0xFF, 0x00),
    Rgb::new(0xFF, 0xAA, 0x00),
    Rgb::new(0xAA, 0x00, 0xFF),
    Rgb::new(0x00, 0xFF, 0xFF), // cyan
    Rgb::new(0xFF, 0x00, 0xFF), // magenta
    Rgb::new(0x40, 0xE0, 0xD0), // turquoise
];

pub const MAX_PLAYERS: usize = PLAYER_COLORS.len();

// Terminal frame loop: input poll interval (~60 FPS)
pub const REALTIME_FRAME_MS: u64 = 16;

// Files under ~/.slither/
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "slither.log";
pub const LOG_ENV_VAR: &str = "SLITHER_LOG";
