//! Round setup: starting positions, lengths and the initial food.

use crate::arena::food::Food;
use crate::arena::round::{RoundRules, RoundState};
use crate::arena::snake::Snake;
use crate::arena::types::{random_int, Board, Direction, Position};
use crate::core::config::GameConfig;
use crate::core::constants::{LANE_RETRIES, STAGGER_RANGE};
use rand::Rng;
use std::collections::VecDeque;
use tracing::debug;

/// Lane bookkeeping for one starting direction.
#[derive(Debug, Clone, Default)]
struct LaneCursor {
    offset: i32,
    used: Vec<i32>,
}

/// Hands out starting lanes so that snakes sharing a direction never share a
/// lane. Horizontal movers get rows, vertical movers get columns.
#[derive(Debug, Clone)]
pub struct LanePicker {
    board: Board,
    cursors: [LaneCursor; 4],
}

impl LanePicker {
    pub fn new(board: Board) -> Self {
        // Right/left runners start one row either side of centre, up/down
        // runners one column either side, so the first four never meet.
        let initial = |offset| LaneCursor {
            offset,
            used: Vec::new(),
        };
        Self {
            board,
            cursors: [initial(1), initial(-1), initial(1), initial(-1)],
        }
    }

    fn cursor_index(direction: Direction) -> usize {
        match direction {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Next lane (row or column index, already wrapped onto the board) for a
    /// snake heading `direction`.
    pub fn next_lane<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> i32 {
        let (center, span) = match direction {
            Direction::Right | Direction::Left => (self.board.center().y, self.board.height),
            Direction::Up | Direction::Down => (self.board.center().x, self.board.width),
        };
        let span = span.max(1);
        let cursor = &mut self.cursors[Self::cursor_index(direction)];

        let mut lane = (center + cursor.offset).rem_euclid(span);
        let mut retries = 0;
        while cursor.used.contains(&lane) && retries < LANE_RETRIES {
            cursor.offset += random_int(rng, -STAGGER_RANGE, STAGGER_RANGE);
            lane = (center + cursor.offset).rem_euclid(span);
            retries += 1;
        }
        if cursor.used.contains(&lane) && (cursor.used.len() as i32) < span {
            // Unlucky rolls: walk to the nearest free lane.
            while cursor.used.contains(&lane) {
                lane = (lane + 1).rem_euclid(span);
            }
        }

        cursor.used.push(lane);
        cursor.offset += random_int(rng, -STAGGER_RANGE, STAGGER_RANGE);
        lane
    }
}

/// Body cells for a fresh snake, head first. The tail sits on the edge the
/// snake starts from and the head points into the board.
pub fn starting_body(
    direction: Direction,
    lane: i32,
    length: usize,
    board: Board,
) -> VecDeque<Position> {
    let width = board.width.max(1);
    let height = board.height.max(1);
    let length = length.max(1) as i32;

    (0..length)
        .rev()
        .map(|j| match direction {
            Direction::Right => Position::new(j.rem_euclid(width), lane),
            Direction::Left => Position::new((width - 1 - j).rem_euclid(width), lane),
            Direction::Up => Position::new(lane, (height - 1 - j).rem_euclid(height)),
            Direction::Down => Position::new(lane, j.rem_euclid(height)),
        })
        .collect()
}

/// Create every snake for a round. Directions cycle right, left, up, down.
pub fn place_snakes<R: Rng + ?Sized>(
    config: &GameConfig,
    board: Board,
    rng: &mut R,
) -> Vec<Snake> {
    let length = config.starting_length(board);
    let mut lanes = LanePicker::new(board);

    (0..config.players)
        .map(|slot| {
            let direction = Direction::STARTING_ORDER[slot % Direction::STARTING_ORDER.len()];
            let lane = lanes.next_lane(direction, rng);
            debug!(slot, direction = direction.name(), lane, length, "placing snake");
            Snake::new(
                config.player_color(slot),
                direction,
                starting_body(direction, lane, length, board),
            )
        })
        .collect()
}

/// Fresh round: placed snakes and one food.
pub fn new_round<R: Rng + ?Sized>(config: &GameConfig, board: Board, rng: &mut R) -> RoundState {
    let rules = RoundRules::from(config);
    let snakes = place_snakes(config, board, rng);
    let food = Food::spawn(board, rules.food_effect, &rules.catalog, rng);
    RoundState::new(snakes, vec![food], rules)
}
