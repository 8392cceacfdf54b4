//! Input mapping: raw keys and swipe gestures to per-player direction intents.
//!
//! Terminal-agnostic. The binary converts crossterm events into [`RawKey`]
//! and screen points, and feeds the resulting [`DirectionIntent`]s to
//! `RoundState::change_snake_direction`.

use crate::arena::types::Direction;

/// A key press, reduced to what the game cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKey {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// "Player `slot` wants to head `direction`."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionIntent {
    pub slot: usize,
    pub direction: Direction,
}

/// One player's four keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySet {
    pub label: &'static str,
    pub up: RawKey,
    pub left: RawKey,
    pub down: RawKey,
    pub right: RawKey,
}

impl KeySet {
    fn direction_for(&self, key: RawKey) -> Option<Direction> {
        if key == self.left {
            Some(Direction::Left)
        } else if key == self.up {
            Some(Direction::Up)
        } else if key == self.right {
            Some(Direction::Right)
        } else if key == self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Key sets in slot order. Players beyond the last set can only swipe.
pub const KEY_SETS: [KeySet; 5] = [
    KeySet {
        label: "Arrows",
        up: RawKey::Up,
        left: RawKey::Left,
        down: RawKey::Down,
        right: RawKey::Right,
    },
    KeySet {
        label: "WASD",
        up: RawKey::Char('w'),
        left: RawKey::Char('a'),
        down: RawKey::Char('s'),
        right: RawKey::Char('d'),
    },
    KeySet {
        label: "IJKL",
        up: RawKey::Char('i'),
        left: RawKey::Char('j'),
        down: RawKey::Char('k'),
        right: RawKey::Char('l'),
    },
    KeySet {
        label: "TFGH",
        up: RawKey::Char('t'),
        left: RawKey::Char('f'),
        down: RawKey::Char('g'),
        right: RawKey::Char('h'),
    },
    KeySet {
        label: "8456",
        up: RawKey::Char('8'),
        left: RawKey::Char('4'),
        down: RawKey::Char('5'),
        right: RawKey::Char('6'),
    },
];

/// Label of the key set a slot uses, if it has one.
pub fn key_set_label(slot: usize) -> Option<&'static str> {
    KEY_SETS.get(slot).map(|set| set.label)
}

/// Map a key to the player and direction it controls. Letters match either case.
pub fn key_intent(key: RawKey) -> Option<DirectionIntent> {
    let key = match key {
        RawKey::Char(c) => RawKey::Char(c.to_ascii_lowercase()),
        other => other,
    };
    KEY_SETS.iter().enumerate().find_map(|(slot, set)| {
        set.direction_for(key)
            .map(|direction| DirectionIntent { slot, direction })
    })
}

/// A point in screen coordinates (columns/rows for the terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Direction of a swipe by its dominant axis. Zero-length and exactly
/// diagonal swipes are ambiguous and map to nothing.
pub fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());
    if ax == ay {
        return None;
    }
    if ax > ay {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Which player a swipe starting at `start` belongs to.
///
/// Up to two players split the screen into bottom (player 1) and top
/// (player 2) halves. Three players split the bottom half left/right and
/// give the whole top to player 3. Four or more use quadrants: bottom-left,
/// bottom-right, top-left, top-right.
pub fn swipe_slot(start: ScreenPoint, screen: ScreenSize, players: usize) -> Option<usize> {
    if players == 0 {
        return None;
    }
    let top = start.y * 2 < screen.height;
    let left = start.x * 2 < screen.width;

    let slot = match players {
        1 | 2 => {
            if top {
                1
            } else {
                0
            }
        }
        3 => match (top, left) {
            (true, _) => 2,
            (false, true) => 0,
            (false, false) => 1,
        },
        _ => match (top, left) {
            (false, true) => 0,
            (false, false) => 1,
            (true, true) => 2,
            (true, false) => 3,
        },
    };
    Some(slot)
}

/// Pending touches, keyed by pointer id.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    ongoing: Vec<(u64, ScreenPoint)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember where pointer `id` went down. A repeated id restarts its swipe.
    pub fn touch_start(&mut self, id: u64, point: ScreenPoint) {
        self.ongoing.retain(|(existing, _)| *existing != id);
        self.ongoing.push((id, point));
    }

    /// Finish pointer `id`'s swipe. Unknown ids are ignored.
    pub fn touch_end(
        &mut self,
        id: u64,
        point: ScreenPoint,
        screen: ScreenSize,
        players: usize,
    ) -> Option<DirectionIntent> {
        let index = self.ongoing.iter().position(|(existing, _)| *existing == id)?;
        let (_, start) = self.ongoing.remove(index);

        let direction = swipe_direction(point.x - start.x, point.y - start.y)?;
        let slot = swipe_slot(start, screen, players)?;
        Some(DirectionIntent { slot, direction })
    }

    pub fn pending(&self) -> usize {
        self.ongoing.len()
    }

    pub fn clear(&mut self) {
        self.ongoing.clear();
    }
}
