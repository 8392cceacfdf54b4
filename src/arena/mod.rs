//! The shared-screen snake arena: entities, round state and the tick engine.

pub mod effects;
pub mod engine;
pub mod food;
pub mod round;
pub mod snake;
pub mod types;

pub use effects::{EffectCatalog, EffectKind, EffectSpec};
pub use engine::{tick, ArenaEvent};
pub use food::{Food, FoodEffectPolicy};
pub use round::{FoodView, RoundPhase, RoundRules, RoundSnapshot, RoundState, SnakeView};
pub use snake::{EffectTimers, Snake};
pub use types::{random_int, Board, Direction, Position, Rgb};
