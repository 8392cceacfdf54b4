//! Per-round state: the snakes and foods in play, who died when, and the
//! Running → Ending → Ended phase machine.
//!
//! A `RoundState` is created fresh for every round and mutated only by
//! [`crate::arena::engine::tick`] and [`RoundState::change_snake_direction`].
//! Renderers read it through [`RoundState::snapshot`].

use super::effects::{EffectCatalog, EffectKind};
use super::food::{Food, FoodEffectPolicy};
use super::snake::Snake;
use super::types::{Board, Direction, Position, Rgb};
use crate::core::config::GameConfig;

/// Config values the engine needs, copied once per round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRules {
    pub catalog: EffectCatalog,
    pub effect_warning_ms: u64,
    pub end_game_delay_ms: u64,
    pub food_effect: FoodEffectPolicy,
    pub warning_color: Rgb,
    pub dead_snake_color: Rgb,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for RoundRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            catalog: config.effects.clone(),
            effect_warning_ms: config.effect_warning_ms,
            end_game_delay_ms: config.end_game_delay_ms,
            food_effect: config.food_effect,
            warning_color: config.warning_color,
            dead_snake_color: config.dead_snake_color,
        }
    }
}

/// Round lifecycle. Transitions are monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    /// At most one snake alive; a few more frames play out before `Ended`.
    Ending { since_ms: u64 },
    Ended,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    pub snakes: Vec<Snake>,
    pub foods: Vec<Food>,
    /// Snake indices in the order they died. Simultaneous deaths may repeat.
    pub death_order: Vec<usize>,
    /// Lone survivor once the round is ending; `None` for a draw.
    pub last_survivor: Option<usize>,
    pub phase: RoundPhase,
    pub rules: RoundRules,
}

impl RoundState {
    pub fn new(snakes: Vec<Snake>, foods: Vec<Food>, rules: RoundRules) -> Self {
        Self {
            snakes,
            foods,
            death_order: Vec::new(),
            last_survivor: None,
            phase: RoundPhase::Running,
            rules,
        }
    }

    pub fn is_ending(&self) -> bool {
        !matches!(self.phase, RoundPhase::Running)
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RoundPhase::Ended
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|s| s.alive).count()
    }

    /// Turn a snake. Ignored for unknown slots, dead snakes, and exact reversals.
    ///
    /// Under `InverseControls` the requested direction is mirrored first.
    /// Returns true if the snake's heading was updated.
    pub fn change_snake_direction(&mut self, slot: usize, direction: Direction) -> bool {
        let Some(snake) = self.snakes.get_mut(slot) else {
            return false;
        };
        if !snake.alive {
            return false;
        }
        let direction = if snake.active_effect == EffectKind::InverseControls {
            direction.opposite()
        } else {
            direction
        };
        if direction == snake.direction.opposite() {
            return false;
        }
        snake.direction = direction;
        true
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self, now_ms: u64, board: Board) -> RoundSnapshot {
        let snakes = self
            .snakes
            .iter()
            .enumerate()
            .map(|(index, snake)| {
                let (body_color, head_tail_color) = if snake.alive {
                    (
                        snake.color,
                        snake.head_tail_color(
                            now_ms,
                            &self.rules.catalog,
                            self.rules.warning_color,
                        ),
                    )
                } else {
                    (self.rules.dead_snake_color, self.rules.dead_snake_color)
                };
                SnakeView {
                    index,
                    alive: snake.alive,
                    base_color: snake.color,
                    body_color,
                    head_tail_color,
                    body: snake.body.iter().copied().collect(),
                    direction: snake.direction,
                    effect: snake.active_effect,
                    warning: snake.is_warning(now_ms),
                    kills: snake.kills.len(),
                }
            })
            .collect();

        let foods = self
            .foods
            .iter()
            .map(|food| FoodView {
                position: food.position,
                effect: food.effect,
                visible: board.contains(food.position),
            })
            .collect();

        RoundSnapshot {
            board,
            phase: self.phase,
            snakes,
            foods,
            death_order: self.death_order.clone(),
            last_survivor: self.last_survivor,
        }
    }
}

/// One snake as a renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeView {
    pub index: usize,
    pub alive: bool,
    pub base_color: Rgb,
    /// Colour for the middle cells (dead colour once dead).
    pub body_color: Rgb,
    pub head_tail_color: Rgb,
    pub body: Vec<Position>,
    pub direction: Direction,
    pub effect: EffectKind,
    pub warning: bool,
    pub kills: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodView {
    pub position: Position,
    pub effect: EffectKind,
    pub visible: bool,
}

/// Immutable per-frame picture of a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub board: Board,
    pub phase: RoundPhase,
    pub snakes: Vec<SnakeView>,
    pub foods: Vec<FoodView>,
    pub death_order: Vec<usize>,
    pub last_survivor: Option<usize>,
}
