//! Centralized tuning constants for Stitchwork part construction.
//!
//! Rarity bounds live in code rather than the catalogs so that balance
//! changes go through review instead of a data edit.

// Document ids -------------------------------------------------------------
pub const PARTS_DOCUMENT: &str = "parts";
pub const TITLES_DOCUMENT: &str = "titles";

// Rarity roll --------------------------------------------------------------
pub const VARIANCE_MIN: f64 = 0.5;
pub const VARIANCE_MAX: f64 = 2.0;

// Stat floors --------------------------------------------------------------
pub(crate) const STAT_FLOOR: f64 = 0.0;

// Effect identities --------------------------------------------------------
pub(crate) const STATIC_IDENTITY: f64 = 0.0;
pub(crate) const PROPORTIONAL_IDENTITY: f64 = 1.0;
