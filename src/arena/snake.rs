//! A single snake: body history, heading, active effect and kill log.

use super::effects::{EffectCatalog, EffectKind};
use super::types::{Direction, Position, Rgb};
use crate::core::constants::{EFFECT_FLASH_ON_MS, EFFECT_FLASH_PERIOD_MS};
use std::collections::{BTreeSet, VecDeque};

/// Timestamps for the current effect. Replaced as one unit whenever a new
/// effect is applied, so a stale expiry can never outlive a newer effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTimers {
    /// Head/tail colour starts flashing from here.
    pub warn_at: u64,
    pub expires_at: u64,
}

#[derive(Debug, Clone)]
pub struct Snake {
    /// Base colour, fixed for the round.
    pub color: Rgb,
    pub alive: bool,
    /// Head is at the front (index 0).
    pub body: VecDeque<Position>,
    pub direction: Direction,
    pub active_effect: EffectKind,
    pub timers: Option<EffectTimers>,
    /// Indices of snakes this snake eliminated.
    pub kills: BTreeSet<usize>,
}

impl Snake {
    pub fn new(color: Rgb, direction: Direction, body: VecDeque<Position>) -> Self {
        Self {
            color,
            alive: true,
            body,
            direction,
            active_effect: EffectKind::None,
            timers: None,
            kills: BTreeSet::new(),
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Translate one step without growing: the tail cell is recycled as the new head.
    pub fn move_to(&mut self, new_head: Position) {
        match self.body.pop_back() {
            Some(mut tail) => {
                tail.x = new_head.x;
                tail.y = new_head.y;
                self.body.push_front(tail);
            }
            None => self.body.push_front(new_head),
        }
    }

    /// Grow by one cell by duplicating the head.
    pub fn grow(&mut self) {
        if let Some(head) = self.head() {
            self.body.push_front(head);
        }
    }

    /// Apply an effect, discarding any effect and timers already running.
    pub fn apply_effect(
        &mut self,
        kind: EffectKind,
        catalog: &EffectCatalog,
        warning_ms: u64,
        now_ms: u64,
    ) {
        let duration = catalog.duration_ms(kind);
        self.active_effect = kind;
        self.timers = Some(EffectTimers {
            warn_at: now_ms.saturating_add(duration.saturating_sub(warning_ms)),
            expires_at: now_ms.saturating_add(duration),
        });
    }

    /// Clear the effect once its expiry has passed. Returns true if it expired.
    pub fn expire_effect_if_due(&mut self, now_ms: u64) -> bool {
        match self.timers {
            Some(timers) if now_ms >= timers.expires_at => {
                self.active_effect = EffectKind::None;
                self.timers = None;
                true
            }
            _ => false,
        }
    }

    /// True while the head/tail colour is flashing ahead of expiry.
    pub fn is_warning(&self, now_ms: u64) -> bool {
        matches!(self.timers, Some(t) if now_ms >= t.warn_at && now_ms < t.expires_at)
    }

    /// Colour painted on the head and tail cells.
    pub fn head_tail_color(&self, now_ms: u64, catalog: &EffectCatalog, warning: Rgb) -> Rgb {
        if self.active_effect == EffectKind::None {
            return self.color;
        }
        let effect_color = catalog.color(self.active_effect);
        match self.timers {
            Some(t) if now_ms >= t.warn_at => {
                if (now_ms - t.warn_at) % EFFECT_FLASH_PERIOD_MS < EFFECT_FLASH_ON_MS {
                    effect_color
                } else {
                    warning
                }
            }
            _ => effect_color,
        }
    }
}
