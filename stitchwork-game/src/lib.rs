//! Stitchwork Game Engine
//!
//! Platform-agnostic core logic for Stitchwork: monster parts built from
//! commented-JSON catalogs, modified by rarity rolls and titles.
//! This crate has no UI or platform-specific dependencies.

pub mod config;
pub mod constants;
pub mod effect;
pub mod error;
pub mod factory;
pub mod jsonc;
pub mod numbers;
pub mod part;
pub mod schema;
pub mod title;

// Re-export commonly used types
pub use config::{
    ConfigStore, DirectorySource, EmbeddedSource, MemorySource, PartTemplate, ResourceSource,
    SocketCapacity, TitleTemplate,
};
pub use constants::{PARTS_DOCUMENT, TITLES_DOCUMENT, VARIANCE_MAX, VARIANCE_MIN};
pub use effect::{Effect, EffectRecord, Scaling, Stats};
pub use error::{CapacityError, ForgeError, SocketKind};
pub use factory::{Forge, roll_variance};
pub use jsonc::{parse_jsonc, strip_comments};
pub use part::{Attachment, Part};
pub use schema::{
    SchemaViolation, check_document, check_parts, check_titles, validate_document,
    validate_parts, validate_titles,
};
pub use title::{Title, TitleRegistry};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn bundled_forge_builds_every_catalog_part() {
        let forge = Forge::default();
        let mut rng = ChaCha20Rng::seed_from_u64(0xB0_7E);
        for name in forge.store().entry_names(PARTS_DOCUMENT).unwrap() {
            let part = forge.natural_part(&name, ["giant"], &mut rng).unwrap();
            assert_eq!(part.name, name);
            assert!(part.health >= 0.0);
        }
        assert!(forge.titles().is_resolved("giant"));
    }

    #[test]
    fn forge_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Forge<EmbeddedSource>>();
        assert_sync::<Forge<DirectorySource>>();
    }
}
