//! Status effects a snake can carry, and the catalog food draws them from.

use super::types::Rgb;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Status effect held by a snake. `None` is the rest state and never spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    None,
    /// Plain growth, no lasting effect.
    Food,
    Invincible,
    /// Kills any snake the holder's head touches.
    Instakill,
    /// Direction input for the holder is mirrored.
    InverseControls,
    EatSnake,
}

impl EffectKind {
    /// Lower-case label used in on-screen messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Food => "food",
            Self::Invincible => "invincible",
            Self::Instakill => "instakill",
            Self::InverseControls => "inverse controls",
            Self::EatSnake => "eat snake",
        }
    }
}

/// One selectable catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: EffectKind,
    /// Relative selection weight.
    pub weight: f64,
    pub color: Rgb,
    /// How long the effect lasts. 0 means instantaneous (no timers).
    pub duration_ms: u64,
}

/// Table of effects food can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub entries: Vec<EffectSpec>,
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                EffectSpec {
                    kind: EffectKind::Food,
                    weight: 0.5,
                    color: Rgb::WHITE,
                    duration_ms: 0,
                },
                EffectSpec {
                    kind: EffectKind::Invincible,
                    weight: 0.1,
                    color: Rgb::GOLDENROD,
                    duration_ms: 10_000,
                },
                EffectSpec {
                    kind: EffectKind::Instakill,
                    weight: 0.4,
                    color: Rgb::RED,
                    duration_ms: 10_000,
                },
            ],
        }
    }
}

impl EffectCatalog {
    pub fn spec(&self, kind: EffectKind) -> Option<&EffectSpec> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Display colour of an effect. Effects missing from the table show as yellow.
    pub fn color(&self, kind: EffectKind) -> Rgb {
        self.spec(kind).map(|e| e.color).unwrap_or(Rgb::YELLOW)
    }

    pub fn duration_ms(&self, kind: EffectKind) -> u64 {
        self.spec(kind).map(|e| e.duration_ms).unwrap_or(0)
    }

    /// Pick an effect proportionally to the declared weights.
    ///
    /// Weights are relative and need not sum to 1. Falls back to `Food` when
    /// the table is empty or has no positive weight.
    pub fn pick_weighted<R: Rng + ?Sized>(&self, rng: &mut R) -> EffectKind {
        let weights = self.entries.iter().map(|e| e.weight.max(0.0));
        match WeightedIndex::new(weights) {
            Ok(dist) => self.entries[dist.sample(rng)].kind,
            Err(_) => EffectKind::Food,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight.max(0.0)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_catalog_matches_table() {
        let catalog = EffectCatalog::default();
        assert_eq!(catalog.entries.len(), 3);
        assert_eq!(catalog.duration_ms(EffectKind::Food), 0);
        assert_eq!(catalog.duration_ms(EffectKind::Invincible), 10_000);
        assert_eq!(catalog.duration_ms(EffectKind::Instakill), 10_000);
        assert_eq!(catalog.color(EffectKind::Instakill), Rgb::RED);
        assert_eq!(catalog.color(EffectKind::Invincible), Rgb::GOLDENROD);
        assert!((catalog.total_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_none_is_not_selectable() {
        let catalog = EffectCatalog::default();
        assert!(catalog.spec(EffectKind::None).is_none());
        assert_eq!(catalog.duration_ms(EffectKind::None), 0);
    }

    #[test]
    fn test_pick_weighted_respects_relative_weights() {
        // Weights deliberately not normalised
        let catalog = EffectCatalog {
            entries: vec![
                EffectSpec {
                    kind: EffectKind::Food,
                    weight: 30.0,
                    color: Rgb::WHITE,
                    duration_ms: 0,
                },
                EffectSpec {
                    kind: EffectKind::Instakill,
                    weight: 10.0,
                    color: Rgb::RED,
                    duration_ms: 10_000,
                },
            ],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let draws = 8000;
        let food = (0..draws)
            .filter(|_| catalog.pick_weighted(&mut rng) == EffectKind::Food)
            .count();
        let ratio = food as f64 / draws as f64;
        assert!((0.70..0.80).contains(&ratio), "food ratio was {ratio}");
    }

    #[test]
    fn test_pick_weighted_zero_weight_never_chosen() {
        let mut catalog = EffectCatalog::default();
        for entry in &mut catalog.entries {
            if entry.kind == EffectKind::Invincible {
                entry.weight = 0.0;
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_ne!(catalog.pick_weighted(&mut rng), EffectKind::Invincible);
        }
    }

    #[test]
    fn test_pick_weighted_empty_falls_back_to_food() {
        let catalog = EffectCatalog { entries: vec![] };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(catalog.pick_weighted(&mut rng), EffectKind::Food);
    }

    #[test]
    fn test_effect_names() {
        assert_eq!(EffectKind::Instakill.name(), "instakill");
        assert_eq!(EffectKind::Invincible.name(), "invincible");
        assert_eq!(EffectKind::None.name(), "none");
    }
}
