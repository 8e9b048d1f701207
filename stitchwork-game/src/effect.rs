//! Stat transforms applied to parts.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{PROPORTIONAL_IDENTITY, STATIC_IDENTITY};
use crate::error::ForgeError;

/// The health/defense/attack triple every effect operates on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub health: f64,
    pub defense: f64,
    pub attack: f64,
}

impl Stats {
    #[must_use]
    pub const fn new(health: f64, defense: f64, attack: f64) -> Self {
        Self {
            health,
            defense,
            attack,
        }
    }

    /// The same value for all three stats.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.health.is_finite() && self.defense.is_finite() && self.attack.is_finite()
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "health={}, defense={}, attack={}",
            self.health, self.defense, self.attack
        )
    }
}

/// Configuration keyword selecting how an effect combines with stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    Static,
    Proportional,
}

impl Scaling {
    const ALL: [Self; 2] = [Self::Static, Self::Proportional];

    /// Map a configured keyword to a scaling kind.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidScaling`] naming `keyword` when it is not
    /// `static` or `proportional`.
    pub fn parse(title: &str, keyword: &str) -> Result<Self, ForgeError> {
        Self::ALL
            .into_iter()
            .find(|scaling| scaling.keyword() == keyword)
            .ok_or_else(|| ForgeError::InvalidScaling {
                title: title.to_string(),
                scaling: keyword.to_string(),
            })
    }

    /// Value that leaves a stat untouched under this scaling.
    #[must_use]
    pub const fn identity(self) -> f64 {
        match self {
            Self::Static => STATIC_IDENTITY,
            Self::Proportional => PROPORTIONAL_IDENTITY,
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Proportional => "proportional",
        }
    }
}

/// One effect entry as written in the titles catalog.
///
/// `scaling` stays untyped so a missing or non-string keyword surfaces as
/// [`ForgeError::InvalidScaling`] rather than a template error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    #[serde(default)]
    pub scaling: Option<Value>,
    #[serde(default)]
    pub health: Option<f64>,
    #[serde(default)]
    pub defense: Option<f64>,
    #[serde(default)]
    pub attack: Option<f64>,
}

/// An immutable stat transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scaling", content = "values", rename_all = "snake_case")]
pub enum Effect {
    /// Adds each delta to the matching stat.
    Static(Stats),
    /// Multiplies each stat by the matching factor.
    Proportional(Stats),
}

impl Effect {
    #[must_use]
    pub const fn additive(health: f64, defense: f64, attack: f64) -> Self {
        Self::Static(Stats::new(health, defense, attack))
    }

    #[must_use]
    pub const fn proportional(health: f64, defense: f64, attack: f64) -> Self {
        Self::Proportional(Stats::new(health, defense, attack))
    }

    /// Scale all three stats by the same factor (rarity and minigame modifiers).
    #[must_use]
    pub const fn uniform_proportional(factor: f64) -> Self {
        Self::Proportional(Stats::splat(factor))
    }

    /// Build an effect from a catalog record, filling omitted stats with the
    /// identity for its scaling kind.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidScaling`] when the record's keyword is
    /// missing, not a string, or not recognized.
    pub fn from_record(title: &str, record: &EffectRecord) -> Result<Self, ForgeError> {
        let scaling = match &record.scaling {
            Some(Value::String(keyword)) => Scaling::parse(title, keyword)?,
            other => {
                return Err(ForgeError::InvalidScaling {
                    title: title.to_string(),
                    scaling: other.as_ref().unwrap_or(&Value::Null).to_string(),
                });
            }
        };
        let identity = scaling.identity();
        let values = Stats::new(
            record.health.unwrap_or(identity),
            record.defense.unwrap_or(identity),
            record.attack.unwrap_or(identity),
        );
        Ok(match scaling {
            Scaling::Static => Self::Static(values),
            Scaling::Proportional => Self::Proportional(values),
        })
    }

    #[must_use]
    pub const fn scaling(&self) -> Scaling {
        match self {
            Self::Static(_) => Scaling::Static,
            Self::Proportional(_) => Scaling::Proportional,
        }
    }

    /// Transform `stats`, returning the new triple.
    #[must_use]
    pub fn apply(&self, stats: Stats) -> Stats {
        match self {
            Self::Static(delta) => Stats::new(
                stats.health + delta.health,
                stats.defense + delta.defense,
                stats.attack + delta.attack,
            ),
            Self::Proportional(factor) => Stats::new(
                stats.health * factor.health,
                stats.defense * factor.defense,
                stats.attack * factor.attack,
            ),
        }
    }
}
