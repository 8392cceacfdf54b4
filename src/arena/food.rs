//! Food items. Every food carries an effect; plain `Food` means growth only.

use super::effects::{EffectCatalog, EffectKind};
use super::types::{random_int, Board, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a freshly spawned food chooses its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodEffectPolicy {
    /// Every food carries the same effect.
    Fixed(EffectKind),
    /// Draw from the effect catalog by weight.
    Weighted,
}

impl Default for FoodEffectPolicy {
    fn default() -> Self {
        Self::Fixed(EffectKind::Instakill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub effect: EffectKind,
}

impl Food {
    /// Spawn at a uniformly random cell inside the board.
    ///
    /// Cells under snakes are not avoided; a food dropped on a body is simply
    /// eaten by whichever head reaches it.
    pub fn spawn<R: Rng + ?Sized>(
        board: Board,
        policy: FoodEffectPolicy,
        catalog: &EffectCatalog,
        rng: &mut R,
    ) -> Self {
        let position = Position::new(
            random_int(rng, 0, board.width),
            random_int(rng, 0, board.height),
        );
        let effect = match policy {
            FoodEffectPolicy::Fixed(kind) => kind,
            FoodEffectPolicy::Weighted => catalog.pick_weighted(rng),
        };
        Self { position, effect }
    }

    pub fn is_plain(&self) -> bool {
        self.effect == EffectKind::Food
    }
}
