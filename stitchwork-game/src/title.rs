//! Named, ordered effect lists and their resolution cache.
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigStore, ResourceSource};
use crate::effect::{Effect, Stats};
use crate::error::ForgeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub name: String,
    pub effects: Vec<Effect>,
}

impl Title {
    /// Build a title from its catalog entry in `store`.
    ///
    /// Every effect record is checked here, so a bad scaling keyword fails
    /// the whole title rather than the first part that uses it.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::UnknownTitle`] or [`ForgeError::InvalidScaling`],
    /// plus any error from loading the titles document.
    pub fn from_store<S: ResourceSource>(
        store: &ConfigStore<S>,
        name: &str,
    ) -> Result<Self, ForgeError> {
        let template = store.title_template(name)?;
        let effects = template
            .effects
            .iter()
            .map(|record| Effect::from_record(name, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            effects,
        })
    }

    /// Run every effect over `stats` in declared order.
    #[must_use]
    pub fn apply_to(&self, stats: Stats) -> Stats {
        self.effects
            .iter()
            .fold(stats, |current, effect| effect.apply(current))
    }
}

/// Resolved titles keyed by name. Entries are never evicted.
#[derive(Debug, Default)]
pub struct TitleRegistry {
    resolved: RwLock<HashMap<String, Arc<Title>>>,
}

impl TitleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached title for `name`, resolving it from `store` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Title::from_store`]; failed lookups are not cached.
    pub fn resolve<S: ResourceSource>(
        &self,
        store: &ConfigStore<S>,
        name: &str,
    ) -> Result<Arc<Title>, ForgeError> {
        if let Some(title) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(title));
        }

        let title = Arc::new(Title::from_store(store, name)?);
        log::debug!(
            "resolved title `{name}` with {} effect(s)",
            title.effects.len()
        );
        let mut resolved = self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            resolved.entry(name.to_string()).or_insert(title),
        ))
    }

    #[must_use]
    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
