//! Part construction.
//!
//! Both construction paths share one pipeline: start from base stats, apply
//! a uniform proportional modifier (the rarity roll or a caller-supplied
//! multiplier), apply each title's effects in argument order, then finalize.
//! Socket and slot capacities always come from the catalog template.

use std::sync::Arc;

use rand::Rng;

use crate::config::{ConfigStore, EmbeddedSource, PartTemplate, ResourceSource};
use crate::constants::{VARIANCE_MAX, VARIANCE_MIN};
use crate::effect::{Effect, Stats};
use crate::error::ForgeError;
use crate::part::Part;
use crate::title::{Title, TitleRegistry};

/// Draw a rarity multiplier uniformly from `[VARIANCE_MIN, VARIANCE_MAX]`.
pub fn roll_variance<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.gen_range(VARIANCE_MIN..=VARIANCE_MAX)
}

/// Composition root owning the configuration store and title cache.
#[derive(Debug)]
pub struct Forge<S> {
    store: ConfigStore<S>,
    titles: TitleRegistry,
}

impl Default for Forge<EmbeddedSource> {
    fn default() -> Self {
        Self::new(EmbeddedSource)
    }
}

impl<S: ResourceSource> Forge<S> {
    pub fn new(source: S) -> Self {
        Self::with_store(ConfigStore::new(source))
    }

    #[must_use]
    pub fn with_store(store: ConfigStore<S>) -> Self {
        Self {
            store,
            titles: TitleRegistry::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn titles(&self) -> &TitleRegistry {
        &self.titles
    }

    /// Resolve a title through the shared cache.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::UnknownTitle`] or [`ForgeError::InvalidScaling`].
    pub fn resolve_title(&self, name: &str) -> Result<Arc<Title>, ForgeError> {
        self.titles.resolve(&self.store, name)
    }

    /// Build a catalog part with a random rarity roll.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::UnknownPart`] for a missing part and propagates
    /// title resolution errors.
    pub fn natural_part<I, T, R>(
        &self,
        name: &str,
        titles: I,
        rng: &mut R,
    ) -> Result<Part, ForgeError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
        R: Rng + ?Sized,
    {
        let variance = roll_variance(rng);
        log::debug!("rolled variance {variance:.3} for part `{name}`");
        self.natural_part_with_variance(name, titles, variance)
    }

    /// Build a catalog part with an already rolled rarity multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidArgument`] when `variance` is outside
    /// `[VARIANCE_MIN, VARIANCE_MAX]`, plus the errors of [`Forge::natural_part`].
    pub fn natural_part_with_variance<I, T>(
        &self,
        name: &str,
        titles: I,
        variance: f64,
    ) -> Result<Part, ForgeError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if !(VARIANCE_MIN..=VARIANCE_MAX).contains(&variance) {
            return Err(ForgeError::InvalidArgument {
                argument: "variance",
                reason: format!("{variance} is outside [{VARIANCE_MIN}, {VARIANCE_MAX}]"),
            });
        }
        let template = self.store.part_template(name)?;
        let base = template.base_stats;
        self.assemble(name, &template, base, variance, titles)
    }

    /// Build a part whose base stats and modifier come from the caller.
    ///
    /// Capacities still come from the catalog entry for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::InvalidArgument`] for a non-finite modifier or
    /// non-finite/negative base stats, plus the errors of [`Forge::natural_part`].
    pub fn player_part<I, T>(
        &self,
        name: &str,
        modifier: f64,
        base: Stats,
        titles: I,
    ) -> Result<Part, ForgeError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if !modifier.is_finite() {
            return Err(ForgeError::InvalidArgument {
                argument: "modifier",
                reason: format!("{modifier} is not a finite number"),
            });
        }
        if !base.is_finite() || base.health < 0.0 || base.defense < 0.0 || base.attack < 0.0 {
            return Err(ForgeError::InvalidArgument {
                argument: "base",
                reason: format!("stats must be finite and non-negative ({base})"),
            });
        }
        let template = self.store.part_template(name)?;
        self.assemble(name, &template, base, modifier, titles)
    }

    fn assemble<I, T>(
        &self,
        name: &str,
        template: &PartTemplate,
        base: Stats,
        modifier: f64,
        titles: I,
    ) -> Result<Part, ForgeError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let resolved = titles
            .into_iter()
            .map(|title| self.resolve_title(title.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut part = Part::from_template(name, template, base);
        part.apply_effect(&Effect::uniform_proportional(modifier));
        for title in &resolved {
            part.apply_title(title);
        }
        part.finalize();
        log::debug!("assembled part `{name}`: {}", part.stats());
        Ok(part)
    }
}
