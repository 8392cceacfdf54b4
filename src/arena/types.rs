//! Shared arena primitives: directions, grid positions, board bounds, colours.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Starting headings, handed out to players in cyclic order.
    pub const STARTING_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Board bounds in cells. The board is toroidal; it is never stored as a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Derive board bounds from a display area and a cell size (both in pixels).
    pub fn from_display(display_width: u32, display_height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self {
            width: (display_width / cell) as i32,
            height: (display_height / cell) as i32,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Smaller of the two dimensions, used to scale starting length and speed.
    pub fn min_dimension(&self) -> i32 {
        self.width.min(self.height)
    }

    /// Horizontal and vertical centre cells.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

/// An RGB colour. The arena never touches terminal colour types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GREY: Rgb = Rgb::new(128, 128, 128);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const GOLDENROD: Rgb = Rgb::new(218, 165, 32);
}

/// Uniform random integer in `[min, max)`. Returns `min` for an empty range.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_board_from_display_floors() {
        let board = Board::from_display(101, 47, 10);
        assert_eq!(board, Board::new(10, 4));
    }

    #[test]
    fn test_board_from_display_zero_cell_size() {
        // A zero cell size is treated as one pixel per cell
        let board = Board::from_display(80, 40, 0);
        assert_eq!(board, Board::new(80, 40));
    }

    #[test]
    fn test_board_contains() {
        let board = Board::new(10, 5);
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(9, 4)));
        assert!(!board.contains(Position::new(10, 4)));
        assert!(!board.contains(Position::new(3, 5)));
        assert!(!board.contains(Position::new(-1, 2)));
    }

    #[test]
    fn test_random_int_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let v = random_int(&mut rng, -15, 15);
            assert!((-15..15).contains(&v));
        }
    }

    #[test]
    fn test_random_int_empty_range_returns_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(random_int(&mut rng, 4, 4), 4);
        assert_eq!(random_int(&mut rng, 9, 2), 9);
    }
}
