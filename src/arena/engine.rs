//! The per-tick simulation step.
//!
//! [`tick`] advances a round by one discrete step. Sub-phases run in a fixed
//! order: phase bookkeeping and effect expiry, movement with wrap-around,
//! food, snake-on-snake collisions, stray food, and the endgame check. It
//! returns the [`ArenaEvent`]s produced so the presentation layer can show
//! messages without the engine knowing about any UI.

use super::food::Food;
use super::round::{RoundPhase, RoundState};
use super::types::{Board, Position};
use super::EffectKind;
use rand::Rng;
use tracing::{debug, info};

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaEvent {
    /// A snake ate food carrying a status effect.
    EffectObtained { player: usize, effect: EffectKind },
    /// A snake's effect ran out.
    EffectExpired { player: usize, effect: EffectKind },
    /// An Instakill holder eliminated a live snake.
    SnakeKilled { killer: usize, victim: usize },
    /// Two heads met; both snakes died.
    HeadOn { first: usize, second: usize },
    /// A snake ran into another snake's body (or a corpse) and died.
    SnakeCrashed { victim: usize, into: usize },
    /// A food item fell outside the board and was replaced.
    FoodRespawned { index: usize },
    /// At most one snake is left; the round winds down.
    RoundEnding { survivor: Option<usize> },
    RoundEnded,
}

impl ArenaEvent {
    /// On-screen text for events worth announcing.
    pub fn message(&self) -> Option<String> {
        match self {
            ArenaEvent::EffectObtained { player, effect } => Some(format!(
                "Player {} obtained {}!",
                player + 1,
                effect.name()
            )),
            ArenaEvent::SnakeKilled { killer, victim } => Some(format!(
                "Player {} killed Player {}!",
                killer + 1,
                victim + 1
            )),
            _ => None,
        }
    }
}

/// Advance the round by one step.
///
/// `board` is re-read every tick so a resize takes effect immediately.
/// `now_ms` is a monotonic timestamp used for effect expiry and the
/// Ending → Ended delay. Once the round has ended nothing is mutated.
pub fn tick<R: Rng + ?Sized>(
    round: &mut RoundState,
    board: Board,
    now_ms: u64,
    rng: &mut R,
) -> Vec<ArenaEvent> {
    let mut events = Vec::new();

    match round.phase {
        RoundPhase::Ended => return events,
        RoundPhase::Ending { since_ms }
            if now_ms >= since_ms.saturating_add(round.rules.end_game_delay_ms) =>
        {
            round.phase = RoundPhase::Ended;
            info!(survivor = ?round.last_survivor, "round ended");
            events.push(ArenaEvent::RoundEnded);
            return events;
        }
        _ => {}
    }

    expire_effects(round, now_ms, &mut events);
    move_snakes(round, board);
    eat_food(round, board, now_ms, rng, &mut events);
    resolve_snake_collisions(round, &mut events);
    respawn_stray_food(round, board, rng, &mut events);
    check_endgame(round, now_ms, &mut events);

    events
}

/// Step `head` one cell in `(dx, dy)` and wrap around the board edges.
///
/// Only the first matching edge is wrapped (x overflow, x underflow, y
/// overflow, y underflow), so a head that is out of bounds on both axes
/// after a resize is corrected one axis per tick.
pub fn wrapped_step(head: Position, delta: (i32, i32), board: Board) -> Position {
    let mut x = head.x + delta.0;
    let mut y = head.y + delta.1;

    if x >= board.width {
        x = 0;
    } else if x < 0 {
        x = (board.width - 1).max(0);
    } else if y >= board.height {
        y = 0;
    } else if y < 0 {
        y = (board.height - 1).max(0);
    }

    Position::new(x, y)
}

fn expire_effects(round: &mut RoundState, now_ms: u64, events: &mut Vec<ArenaEvent>) {
    for (player, snake) in round.snakes.iter_mut().enumerate() {
        let effect = snake.active_effect;
        if snake.expire_effect_if_due(now_ms) {
            debug!(player, effect = effect.name(), "effect expired");
            events.push(ArenaEvent::EffectExpired { player, effect });
        }
    }
}

fn move_snakes(round: &mut RoundState, board: Board) {
    for snake in round.snakes.iter_mut().filter(|s| s.alive) {
        let Some(head) = snake.head() else {
            continue;
        };
        let new_head = wrapped_step(head, snake.direction.delta(), board);
        snake.move_to(new_head);
    }
}

fn eat_food<R: Rng + ?Sized>(
    round: &mut RoundState,
    board: Board,
    now_ms: u64,
    rng: &mut R,
    events: &mut Vec<ArenaEvent>,
) {
    for player in 0..round.snakes.len() {
        if !round.snakes[player].alive {
            continue;
        }
        let Some(head) = round.snakes[player].head() else {
            continue;
        };

        let mut f = 0;
        while f < round.foods.len() {
            if round.foods[f].position == head {
                let food = round.foods.remove(f);
                if !food.is_plain() {
                    round.snakes[player].apply_effect(
                        food.effect,
                        &round.rules.catalog,
                        round.rules.effect_warning_ms,
                        now_ms,
                    );
                    info!(player = player + 1, effect = food.effect.name(), "effect obtained");
                    events.push(ArenaEvent::EffectObtained {
                        player,
                        effect: food.effect,
                    });
                }
                let replacement =
                    Food::spawn(board, round.rules.food_effect, &round.rules.catalog, rng);
                round.foods.push(replacement);
                round.snakes[player].grow();
            }
            // The slot that shifted into `f` is not re-checked this tick.
            f += 1;
        }
    }
}

fn resolve_snake_collisions(round: &mut RoundState, events: &mut Vec<ArenaEvent>) {
    let count = round.snakes.len();

    for i in 0..count {
        if !round.snakes[i].alive {
            continue;
        }
        // Cached: a snake that dies below keeps scanning with its old head.
        let Some(head) = round.snakes[i].head() else {
            continue;
        };

        for j in 0..count {
            if i == j {
                continue;
            }

            // Includes k = 0 so the heads of dead snakes still block.
            let mut k = 0;
            while k < round.snakes[j].body.len() {
                if round.snakes[j].body[k] != head {
                    k += 1;
                    continue;
                }

                if round.snakes[i].active_effect == EffectKind::Instakill {
                    if round.snakes[j].alive {
                        round.snakes[j].alive = false;
                        round.snakes[i].kills.insert(j);
                        round.death_order.push(j);
                        info!(killer = i + 1, victim = j + 1, "snake killed");
                        events.push(ArenaEvent::SnakeKilled {
                            killer: i,
                            victim: j,
                        });
                    }
                    round.snakes[j].body.remove(k);
                    round.snakes[i].grow();
                    k += 1;
                } else if k == 0
                    && round.snakes[j].alive
                    && round.snakes[j].active_effect != EffectKind::Instakill
                {
                    round.snakes[i].alive = false;
                    round.snakes[j].alive = false;
                    round.death_order.push(i);
                    round.death_order.push(j);
                    info!(first = i + 1, second = j + 1, "head-on collision");
                    events.push(ArenaEvent::HeadOn {
                        first: i,
                        second: j,
                    });
                    break;
                } else {
                    round.snakes[i].alive = false;
                    round.snakes[i].body.pop_front();
                    round.snakes[j].kills.insert(i);
                    round.death_order.push(i);
                    info!(victim = i + 1, into = j + 1, "snake crashed");
                    events.push(ArenaEvent::SnakeCrashed { victim: i, into: j });
                    break;
                }
            }
        }
    }
}

fn respawn_stray_food<R: Rng + ?Sized>(
    round: &mut RoundState,
    board: Board,
    rng: &mut R,
    events: &mut Vec<ArenaEvent>,
) {
    for index in 0..round.foods.len() {
        if !board.contains(round.foods[index].position) {
            round.foods[index] =
                Food::spawn(board, round.rules.food_effect, &round.rules.catalog, rng);
            debug!(index, "food outside board respawned");
            events.push(ArenaEvent::FoodRespawned { index });
        }
    }
}

fn check_endgame(round: &mut RoundState, now_ms: u64, events: &mut Vec<ArenaEvent>) {
    if round.is_ending() {
        return;
    }

    let survivor = round.snakes.iter().rposition(|s| s.alive);
    if round.alive_count() <= 1 {
        round.phase = RoundPhase::Ending { since_ms: now_ms };
        round.last_survivor = survivor;
        info!(survivor = ?survivor.map(|s| s + 1), "round ending");
        events.push(ArenaEvent::RoundEnding { survivor });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::round::RoundRules;
    use crate::arena::snake::Snake;
    use crate::arena::types::{Direction, Rgb};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    const BOARD: Board = Board {
        width: 40,
        height: 30,
    };

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Straight snake whose head is at `head`, body trailing behind the heading.
    fn snake(head: (i32, i32), direction: Direction, len: i32) -> Snake {
        let (dx, dy) = direction.delta();
        let body: VecDeque<Position> = (0..len)
            .map(|i| Position::new(head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake::new(Rgb::new(0, 170, 255), direction, body)
    }

    fn round_with(snakes: Vec<Snake>) -> RoundState {
        RoundState::new(snakes, vec![], RoundRules::default())
    }

    fn far_food() -> Food {
        Food {
            position: Position::new(39, 29),
            effect: EffectKind::Food,
        }
    }

    #[test]
    fn test_wrap_right_edge() {
        let p = wrapped_step(Position::new(39, 4), (1, 0), BOARD);
        assert_eq!(p, Position::new(0, 4));
    }

    #[test]
    fn test_wrap_left_edge() {
        let p = wrapped_step(Position::new(0, 4), (-1, 0), BOARD);
        assert_eq!(p, Position::new(39, 4));
    }

    #[test]
    fn test_wrap_top_and_bottom() {
        assert_eq!(
            wrapped_step(Position::new(3, 0), (0, -1), BOARD),
            Position::new(3, 29)
        );
        assert_eq!(
            wrapped_step(Position::new(3, 29), (0, 1), BOARD),
            Position::new(3, 0)
        );
    }

    #[test]
    fn test_wrap_precedence_fixes_x_first() {
        // Both axes out of bounds after a shrink: only x is corrected this step
        let p = wrapped_step(Position::new(50, 40), (0, 1), BOARD);
        assert_eq!(p, Position::new(0, 41));
        let p = wrapped_step(p, (0, 1), BOARD);
        assert_eq!(p, Position::new(0, 0));
    }

    #[test]
    fn test_movement_keeps_heads_in_bounds() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((38, 3), Direction::Right, 4),
            snake((3, 1), Direction::Up, 4),
            snake((10, 28), Direction::Down, 4),
            snake((1, 20), Direction::Left, 4),
        ]);
        round.foods.push(far_food());
        for t in 0..120 {
            tick(&mut round, BOARD, t * 40, &mut rng);
            for s in round.snakes.iter().filter(|s| s.alive) {
                assert!(BOARD.contains(s.head().unwrap()));
            }
        }
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 5),
            snake((5, 20), Direction::Right, 5),
        ]);
        round.foods.push(far_food());
        tick(&mut round, BOARD, 0, &mut rng);
        assert_eq!(round.snakes[0].len(), 5);
        assert_eq!(round.snakes[0].head(), Some(Position::new(6, 5)));
    }

    #[test]
    fn test_plain_food_grows_without_effect() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 5),
            snake((5, 20), Direction::Right, 5),
        ]);
        round.foods.push(Food {
            position: Position::new(6, 5),
            effect: EffectKind::Food,
        });
        let events = tick(&mut round, BOARD, 0, &mut rng);
        assert_eq!(round.snakes[0].len(), 6);
        assert_eq!(round.snakes[0].active_effect, EffectKind::None);
        assert_eq!(round.foods.len(), 1);
        assert!(events
            .iter()
            .all(|e| !matches!(e, ArenaEvent::EffectObtained { .. })));
    }

    #[test]
    fn test_effect_food_applies_effect() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 5),
            snake((5, 20), Direction::Right, 5),
        ]);
        round.foods.push(Food {
            position: Position::new(6, 5),
            effect: EffectKind::Instakill,
        });
        let events = tick(&mut round, BOARD, 1000, &mut rng);
        assert_eq!(round.snakes[0].active_effect, EffectKind::Instakill);
        assert_eq!(round.snakes[0].timers.unwrap().expires_at, 11_000);
        assert!(events.contains(&ArenaEvent::EffectObtained {
            player: 0,
            effect: EffectKind::Instakill
        }));
    }

    #[test]
    fn test_effect_expires_on_tick() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 5),
            snake((5, 20), Direction::Right, 5),
        ]);
        round.foods.push(far_food());
        let catalog = round.rules.catalog.clone();
        round.snakes[0].apply_effect(EffectKind::Instakill, &catalog, 3600, 0);

        tick(&mut round, BOARD, 9_960, &mut rng);
        assert_eq!(round.snakes[0].active_effect, EffectKind::Instakill);

        let events = tick(&mut round, BOARD, 10_000, &mut rng);
        assert_eq!(round.snakes[0].active_effect, EffectKind::None);
        assert!(events.contains(&ArenaEvent::EffectExpired {
            player: 0,
            effect: EffectKind::Instakill
        }));
    }

    #[test]
    fn test_head_on_kills_both() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((4, 5), Direction::Right, 4),
            snake((6, 5), Direction::Left, 4),
            snake((20, 20), Direction::Down, 4),
        ]);
        round.foods.push(far_food());
        let events = tick(&mut round, BOARD, 0, &mut rng);
        assert!(!round.snakes[0].alive);
        assert!(!round.snakes[1].alive);
        assert!(round.snakes[2].alive);
        assert_eq!(round.death_order, vec![0, 1]);
        assert!(events.contains(&ArenaEvent::HeadOn {
            first: 0,
            second: 1
        }));
    }

    #[test]
    fn test_body_collision_kills_mover_and_credits_owner() {
        let mut rng = test_rng();
        // Snake 1 runs vertically through x = 6; snake 0 drives into its side.
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((6, 8), Direction::Down, 6),
            snake((20, 20), Direction::Down, 4),
        ]);
        round.foods.push(far_food());
        let len_before = round.snakes[0].len();
        let events = tick(&mut round, BOARD, 0, &mut rng);

        assert!(!round.snakes[0].alive);
        assert!(round.snakes[1].alive);
        assert_eq!(round.snakes[0].len(), len_before - 1);
        assert!(round.snakes[1].kills.contains(&0));
        assert_eq!(round.death_order, vec![0]);
        assert!(events.contains(&ArenaEvent::SnakeCrashed { victim: 0, into: 1 }));
    }

    #[test]
    fn test_dead_snake_body_still_blocks() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((6, 8), Direction::Down, 6),
            snake((20, 20), Direction::Down, 4),
        ]);
        round.snakes[1].alive = false;
        round.foods.push(far_food());
        tick(&mut round, BOARD, 0, &mut rng);
        assert!(!round.snakes[0].alive);
        // Corpses do not move
        assert_eq!(round.snakes[1].head(), Some(Position::new(6, 8)));
    }

    #[test]
    fn test_instakill_eats_body_cell_and_kills() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((6, 8), Direction::Down, 6),
            snake((20, 20), Direction::Down, 4),
        ]);
        round.foods.push(far_food());
        round.snakes[0].active_effect = EffectKind::Instakill;
        let victim_len = round.snakes[1].len();

        let events = tick(&mut round, BOARD, 0, &mut rng);

        assert!(round.snakes[0].alive);
        assert!(!round.snakes[1].alive);
        assert_eq!(round.snakes[0].len(), 5);
        assert_eq!(round.snakes[1].len(), victim_len - 1);
        assert!(!round.snakes[1].body.contains(&Position::new(6, 5)));
        assert!(round.snakes[0].kills.contains(&1));
        assert_eq!(round.death_order, vec![1]);
        assert!(events.contains(&ArenaEvent::SnakeKilled {
            killer: 0,
            victim: 1
        }));
    }

    #[test]
    fn test_instakill_wins_head_on() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((4, 5), Direction::Right, 4),
            snake((6, 5), Direction::Left, 4),
            snake((20, 20), Direction::Down, 4),
        ]);
        round.foods.push(far_food());
        round.snakes[0].active_effect = EffectKind::Instakill;

        tick(&mut round, BOARD, 0, &mut rng);

        assert!(round.snakes[0].alive);
        assert!(!round.snakes[1].alive);
        assert_eq!(round.snakes[0].len(), 5);
        assert_eq!(round.death_order, vec![1]);
    }

    #[test]
    fn test_instakill_eating_corpse_grows_without_kill() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((6, 8), Direction::Down, 6),
            snake((20, 20), Direction::Down, 4),
        ]);
        round.foods.push(far_food());
        round.snakes[0].active_effect = EffectKind::Instakill;
        round.snakes[1].alive = false;

        tick(&mut round, BOARD, 0, &mut rng);

        assert_eq!(round.snakes[0].len(), 5);
        assert!(round.snakes[0].kills.is_empty());
        assert!(round.death_order.is_empty());
    }

    #[test]
    fn test_endgame_enters_ending_then_ended_after_delay() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((5, 20), Direction::Right, 4),
        ]);
        round.foods.push(far_food());
        round.snakes[1].alive = false;

        let events = tick(&mut round, BOARD, 1000, &mut rng);
        assert_eq!(round.phase, RoundPhase::Ending { since_ms: 1000 });
        assert_eq!(round.last_survivor, Some(0));
        assert!(events.contains(&ArenaEvent::RoundEnding { survivor: Some(0) }));

        // Before the delay, the round keeps simulating
        let head = round.snakes[0].head().unwrap();
        tick(&mut round, BOARD, 1400, &mut rng);
        assert!(!round.is_ended());
        assert_ne!(round.snakes[0].head().unwrap(), head);

        let events = tick(&mut round, BOARD, 1500, &mut rng);
        assert!(round.is_ended());
        assert_eq!(events, vec![ArenaEvent::RoundEnded]);
    }

    #[test]
    fn test_ended_round_is_frozen() {
        let mut rng = test_rng();
        let mut round = round_with(vec![snake((5, 5), Direction::Right, 4)]);
        round.foods.push(far_food());
        round.phase = RoundPhase::Ended;
        let before = round.snakes[0].body.clone();
        let events = tick(&mut round, BOARD, 99_999, &mut rng);
        assert!(events.is_empty());
        assert_eq!(round.snakes[0].body, before);
    }

    #[test]
    fn test_endgame_check_is_idempotent() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((5, 20), Direction::Right, 4),
        ]);
        round.foods.push(far_food());
        round.snakes[1].alive = false;
        round.death_order.push(1);

        tick(&mut round, BOARD, 0, &mut rng);
        let survivor = round.last_survivor;
        let deaths = round.death_order.clone();

        for t in 1..10 {
            let events = tick(&mut round, BOARD, t * 40, &mut rng);
            assert!(events
                .iter()
                .all(|e| !matches!(e, ArenaEvent::RoundEnding { .. })));
            assert_eq!(round.last_survivor, survivor);
            assert_eq!(round.death_order, deaths);
        }
    }

    #[test]
    fn test_stray_food_respawned_inside_board() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((5, 5), Direction::Right, 4),
            snake((5, 20), Direction::Right, 4),
        ]);
        round.foods.push(Food {
            position: Position::new(100, 100),
            effect: EffectKind::Instakill,
        });
        let events = tick(&mut round, BOARD, 0, &mut rng);
        assert_eq!(round.foods.len(), 1);
        assert!(BOARD.contains(round.foods[0].position));
        assert!(events.contains(&ArenaEvent::FoodRespawned { index: 0 }));
    }

    #[test]
    fn test_event_messages() {
        let obtained = ArenaEvent::EffectObtained {
            player: 0,
            effect: EffectKind::Instakill,
        };
        assert_eq!(
            obtained.message().as_deref(),
            Some("Player 1 obtained instakill!")
        );
        let killed = ArenaEvent::SnakeKilled {
            killer: 2,
            victim: 0,
        };
        assert_eq!(
            killed.message().as_deref(),
            Some("Player 3 killed Player 1!")
        );
        assert!(ArenaEvent::RoundEnded.message().is_none());
    }

    fn snake_with_body(direction: Direction, cells: &[(i32, i32)]) -> Snake {
        let body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Snake::new(Rgb::new(255, 0, 255), direction, body)
    }

    #[test]
    fn test_instakill_hits_two_snakes_in_one_tick() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((4, 5), Direction::Right, 3),
            // Both vertical snakes have (5, 5) as their last cell after moving
            snake_with_body(Direction::Down, &[(5, 7), (5, 6), (5, 5), (5, 4)]),
            snake_with_body(Direction::Up, &[(5, 3), (5, 4), (5, 5), (5, 6)]),
        ]);
        let catalog = round.rules.catalog.clone();
        round.snakes[0].apply_effect(EffectKind::Instakill, &catalog, 3600, 0);

        let events = tick(&mut round, BOARD, 40, &mut rng);

        assert!(round.snakes[0].alive);
        assert!(!round.snakes[1].alive);
        assert!(!round.snakes[2].alive);
        assert_eq!(round.snakes[0].len(), 5);
        assert_eq!(round.snakes[1].len(), 3);
        assert_eq!(round.snakes[2].len(), 3);
        assert_eq!(round.snakes[0].kills.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(round.death_order, vec![1, 2]);
        assert_eq!(round.last_survivor, Some(0));
        assert!(events.contains(&ArenaEvent::SnakeKilled {
            killer: 0,
            victim: 1
        }));
        assert!(events.contains(&ArenaEvent::SnakeKilled {
            killer: 0,
            victim: 2
        }));
    }

    #[test]
    fn test_instakill_skips_cell_after_removal() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((4, 5), Direction::Right, 3),
            // Grown snake: (5, 5) is doubled at the tail end
            snake_with_body(Direction::Down, &[(5, 7), (5, 6), (5, 5), (5, 5), (5, 4)]),
            snake((20, 20), Direction::Right, 3),
        ]);
        let catalog = round.rules.catalog.clone();
        round.snakes[0].apply_effect(EffectKind::Instakill, &catalog, 3600, 0);

        tick(&mut round, BOARD, 40, &mut rng);

        // Only the first copy is eaten; the one that shifts into its slot is not re-checked
        assert_eq!(round.snakes[0].len(), 4);
        assert_eq!(round.snakes[1].len(), 4);
        assert_eq!(round.snakes[1].body[3], Position::new(5, 5));
        assert_eq!(round.death_order, vec![1]);
    }

    #[test]
    fn test_crashed_snake_can_die_twice_same_tick() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((4, 5), Direction::Right, 3),
            snake_with_body(Direction::Up, &[(5, 4), (5, 5), (5, 6)]),
            snake_with_body(Direction::Down, &[(5, 7), (5, 6), (5, 5), (5, 4)]),
        ]);
        round.snakes[1].alive = false;

        let events = tick(&mut round, BOARD, 40, &mut rng);

        // The cached head keeps scanning after the first crash
        assert!(!round.snakes[0].alive);
        assert_eq!(round.snakes[0].len(), 1);
        assert_eq!(round.death_order, vec![0, 0]);
        assert!(round.snakes[1].kills.contains(&0));
        assert!(round.snakes[2].kills.contains(&0));
        assert!(events.contains(&ArenaEvent::SnakeCrashed { victim: 0, into: 1 }));
        assert!(events.contains(&ArenaEvent::SnakeCrashed { victim: 0, into: 2 }));
        assert_eq!(round.last_survivor, Some(2));
    }

    #[test]
    fn test_huge_end_delay_does_not_overflow() {
        let mut rng = test_rng();
        let mut round = round_with(vec![
            snake((4, 5), Direction::Right, 4),
            snake((6, 5), Direction::Left, 4),
        ]);
        round.rules.end_game_delay_ms = u64::MAX;

        tick(&mut round, BOARD, 1_000, &mut rng);
        assert_eq!(round.phase, RoundPhase::Ending { since_ms: 1_000 });

        tick(&mut round, BOARD, 2_000, &mut rng);
        assert_eq!(round.phase, RoundPhase::Ending { since_ms: 1_000 });
    }
}
