//! Runtime monster parts.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PartTemplate;
use crate::constants::STAT_FLOOR;
use crate::effect::{Effect, Stats};
use crate::error::{CapacityError, SocketKind};
use crate::numbers::capacity_to_usize;
use crate::title::Title;

/// Opaque item placed in one of a part's slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A fully resolved part.
///
/// Parts are built through [`crate::Forge`]; installed sockets are owned by
/// the parent and live and die with it. Deserialized parts are checked so no
/// socket or slot list exceeds its capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PartRecord")]
pub struct Part {
    /// Catalog entry this part was built from.
    pub name: String,
    /// Titles applied at construction, in application order.
    pub titles: Vec<String>,
    pub health: f64,
    pub health_max: f64,
    pub defense: f64,
    pub attack: f64,
    female_sockets: Vec<Part>,
    female_sockets_max: u32,
    male_sockets: Vec<Part>,
    male_sockets_max: u32,
    slots: Vec<Attachment>,
    slots_max: u32,
}

/// Serialized shape of a [`Part`] before its capacities are checked.
#[derive(Deserialize)]
struct PartRecord {
    name: String,
    #[serde(default)]
    titles: Vec<String>,
    health: f64,
    health_max: f64,
    defense: f64,
    attack: f64,
    #[serde(default)]
    female_sockets: Vec<Part>,
    female_sockets_max: u32,
    #[serde(default)]
    male_sockets: Vec<Part>,
    male_sockets_max: u32,
    #[serde(default)]
    slots: Vec<Attachment>,
    slots_max: u32,
}

fn check_capacity(name: &str, kind: SocketKind, used: usize, max: u32) -> Result<(), String> {
    if used > capacity_to_usize(max) {
        return Err(format!(
            "part `{name}` holds {used} item(s) in {kind}s but allows {max}"
        ));
    }
    Ok(())
}

impl TryFrom<PartRecord> for Part {
    type Error = String;

    fn try_from(record: PartRecord) -> Result<Self, Self::Error> {
        check_capacity(
            &record.name,
            SocketKind::Female,
            record.female_sockets.len(),
            record.female_sockets_max,
        )?;
        check_capacity(
            &record.name,
            SocketKind::Male,
            record.male_sockets.len(),
            record.male_sockets_max,
        )?;
        check_capacity(
            &record.name,
            SocketKind::Slot,
            record.slots.len(),
            record.slots_max,
        )?;
        Ok(Self {
            name: record.name,
            titles: record.titles,
            health: record.health,
            health_max: record.health_max,
            defense: record.defense,
            attack: record.attack,
            female_sockets: record.female_sockets,
            female_sockets_max: record.female_sockets_max,
            male_sockets: record.male_sockets,
            male_sockets_max: record.male_sockets_max,
            slots: record.slots,
            slots_max: record.slots_max,
        })
    }
}

impl Part {
    /// Start a part from `template` with `base` stats and no effects applied.
    pub(crate) fn from_template(name: &str, template: &PartTemplate, base: Stats) -> Self {
        Self {
            name: name.to_string(),
            titles: Vec::new(),
            health: base.health,
            health_max: base.health,
            defense: base.defense,
            attack: base.attack,
            female_sockets: Vec::new(),
            female_sockets_max: template.sockets.female,
            male_sockets: Vec::new(),
            male_sockets_max: template.sockets.male,
            slots: Vec::new(),
            slots_max: template.slots,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> Stats {
        Stats::new(self.health, self.defense, self.attack)
    }

    fn set_stats(&mut self, stats: Stats) {
        self.health = stats.health;
        self.defense = stats.defense;
        self.attack = stats.attack;
    }

    /// Replace health, defense and attack with `effect` applied to them.
    pub fn apply_effect(&mut self, effect: &Effect) {
        self.set_stats(effect.apply(self.stats()));
    }

    /// Run every effect of `title` in order and record its name.
    pub fn apply_title(&mut self, title: &Title) {
        self.set_stats(title.apply_to(self.stats()));
        self.titles.push(title.name.clone());
    }

    /// Clamp stats to their floor and pin `health_max` to the result.
    pub(crate) fn finalize(&mut self) {
        for (label, stat) in [
            ("health", &mut self.health),
            ("defense", &mut self.defense),
            ("attack", &mut self.attack),
        ] {
            if *stat < STAT_FLOOR {
                log::warn!(
                    "part `{}` finished with negative {label} ({stat}); clamping to {STAT_FLOOR}",
                    self.name
                );
                *stat = STAT_FLOOR;
            }
        }
        self.health_max = self.health;
    }

    #[must_use]
    pub fn female_sockets(&self) -> &[Part] {
        &self.female_sockets
    }

    #[must_use]
    pub const fn female_sockets_max(&self) -> u32 {
        self.female_sockets_max
    }

    #[must_use]
    pub fn male_sockets(&self) -> &[Part] {
        &self.male_sockets
    }

    #[must_use]
    pub const fn male_sockets_max(&self) -> u32 {
        self.male_sockets_max
    }

    #[must_use]
    pub fn slots(&self) -> &[Attachment] {
        &self.slots
    }

    #[must_use]
    pub const fn slots_max(&self) -> u32 {
        self.slots_max
    }

    #[must_use]
    pub fn female_sockets_free(&self) -> usize {
        capacity_to_usize(self.female_sockets_max).saturating_sub(self.female_sockets.len())
    }

    #[must_use]
    pub fn male_sockets_free(&self) -> usize {
        capacity_to_usize(self.male_sockets_max).saturating_sub(self.male_sockets.len())
    }

    #[must_use]
    pub fn slots_free(&self) -> usize {
        capacity_to_usize(self.slots_max).saturating_sub(self.slots.len())
    }

    /// Install `part` into a free female socket.
    ///
    /// # Errors
    ///
    /// Returns the part inside a [`CapacityError`] when every female socket is used.
    pub fn install_female(&mut self, part: Part) -> Result<(), CapacityError<Part>> {
        if self.female_sockets_free() == 0 {
            return Err(CapacityError {
                kind: SocketKind::Female,
                max: self.female_sockets_max,
                element: part,
            });
        }
        self.female_sockets.push(part);
        Ok(())
    }

    /// Install `part` into a free male socket.
    ///
    /// # Errors
    ///
    /// Returns the part inside a [`CapacityError`] when every male socket is used.
    pub fn install_male(&mut self, part: Part) -> Result<(), CapacityError<Part>> {
        if self.male_sockets_free() == 0 {
            return Err(CapacityError {
                kind: SocketKind::Male,
                max: self.male_sockets_max,
                element: part,
            });
        }
        self.male_sockets.push(part);
        Ok(())
    }

    /// Place `attachment` into a free slot.
    ///
    /// # Errors
    ///
    /// Returns the attachment inside a [`CapacityError`] when every slot is used.
    pub fn attach(&mut self, attachment: Attachment) -> Result<(), CapacityError<Attachment>> {
        if self.slots_free() == 0 {
            return Err(CapacityError {
                kind: SocketKind::Slot,
                max: self.slots_max,
                element: attachment,
            });
        }
        self.slots.push(attachment);
        Ok(())
    }

    /// Remove and return the most recently installed female socket part.
    pub fn detach_female(&mut self) -> Option<Part> {
        self.female_sockets.pop()
    }

    /// Remove and return the most recently installed male socket part.
    pub fn detach_male(&mut self) -> Option<Part> {
        self.male_sockets.pop()
    }

    /// Remove and return the most recently placed attachment.
    pub fn detach_slot(&mut self) -> Option<Attachment> {
        self.slots.pop()
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Part `{}`", self.name)?;
        if !self.titles.is_empty() {
            writeln!(f, "  titles: {}", self.titles.join(", "))?;
        }
        writeln!(f, "  health: {}/{}", self.health, self.health_max)?;
        writeln!(f, "  defense: {}", self.defense)?;
        writeln!(f, "  attack: {}", self.attack)?;
        writeln!(
            f,
            "  female sockets: {}/{}",
            self.female_sockets.len(),
            self.female_sockets_max
        )?;
        writeln!(
            f,
            "  male sockets: {}/{}",
            self.male_sockets.len(),
            self.male_sockets_max
        )?;
        write!(f, "  slots: {}/{}", self.slots.len(), self.slots_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SocketCapacity;

    fn template(female: u32, male: u32, slots: u32) -> PartTemplate {
        PartTemplate {
            base_stats: Stats::splat(30.0),
            sockets: SocketCapacity { female, male },
            slots,
        }
    }

    fn part(name: &str, female: u32, male: u32, slots: u32) -> Part {
        let template = template(female, male, slots);
        Part::from_template(name, &template, template.base_stats)
    }

    #[test]
    fn apply_effect_replaces_stats() {
        let mut arm = part("arm", 1, 0, 1);
        arm.apply_effect(&Effect::proportional(2.0, 1.0, 0.5));
        arm.apply_effect(&Effect::additive(1.0, 0.0, 0.0));
        assert_eq!(arm.stats(), Stats::new(61.0, 30.0, 15.0));
        assert!((arm.health_max - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn finalize_clamps_negative_stats_and_pins_health_max() {
        let mut claw = part("claw", 0, 1, 0);
        claw.apply_effect(&Effect::additive(5.0, -40.0, 0.0));
        claw.finalize();
        assert_eq!(claw.stats(), Stats::new(35.0, 0.0, 30.0));
        assert!((claw.health_max - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sockets_respect_capacity() {
        let mut torso = part("torso", 1, 0, 1);
        torso.install_female(part("arm", 1, 0, 1)).unwrap();
        assert_eq!(torso.female_sockets().len(), 1);
        assert_eq!(torso.female_sockets_free(), 0);

        let rejected = torso.install_female(part("leg", 1, 1, 1)).unwrap_err();
        assert_eq!(rejected.kind, SocketKind::Female);
        assert_eq!(rejected.into_element().name, "leg");
        assert_eq!(torso.female_sockets().len(), 1);

        let err = torso.install_male(part("tail", 0, 1, 1)).unwrap_err();
        assert_eq!(err.max, 0);
        assert!(torso.male_sockets().is_empty());
    }

    #[test]
    fn slots_accept_attachments_until_full() {
        let mut tail = part("tail", 0, 1, 1);
        tail.attach(Attachment::new("spikes")).unwrap();
        let err = tail.attach(Attachment::new("bell")).unwrap_err();
        assert_eq!(err.kind, SocketKind::Slot);
        assert_eq!(tail.slots().len(), 1);
        assert_eq!(tail.detach_slot(), Some(Attachment::new("spikes")));
        assert_eq!(tail.slots_free(), 1);
    }

    #[test]
    fn detached_parts_return_to_the_caller() {
        let mut leg = part("leg", 1, 1, 1);
        leg.install_male(part("claw", 0, 1, 0)).unwrap();
        let claw = leg.detach_male().expect("claw installed");
        assert_eq!(claw.name, "claw");
        assert!(leg.detach_male().is_none());
        assert!(leg.detach_female().is_none());
    }

    #[test]
    fn apply_title_runs_effects_in_order_and_records_the_name() {
        let mut arm = part("arm", 1, 0, 1);
        let ancient = Title {
            name: "ancient".to_string(),
            effects: vec![
                Effect::additive(10.0, 0.0, 0.0),
                Effect::proportional(1.5, 1.0, 1.0),
            ],
        };
        arm.apply_title(&ancient);
        assert_eq!(arm.stats(), Stats::new(60.0, 30.0, 30.0));
        assert_eq!(arm.titles, vec!["ancient"]);
    }

    #[test]
    fn serialized_parts_deserialize_within_capacity() {
        let mut torso = part("torso", 1, 0, 1);
        torso.install_female(part("arm", 1, 0, 1)).unwrap();
        torso.attach(Attachment::new("stitches")).unwrap();
        let json = serde_json::to_string(&torso).unwrap();
        let restored: Part = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, torso);
    }

    #[test]
    fn over_capacity_document_fails_to_deserialize() {
        let arm = serde_json::to_value(part("arm", 1, 0, 1)).unwrap();
        let mut torso = serde_json::to_value(part("torso", 0, 0, 0)).unwrap();
        torso["female_sockets"] = serde_json::json!([arm.clone(), arm]);
        let err = serde_json::from_value::<Part>(torso).unwrap_err();
        assert!(err.to_string().contains("holds 2 item(s) in female sockets but allows 0"));

        let mut nested = serde_json::to_value(part("torso", 1, 0, 0)).unwrap();
        let mut overfull_arm = serde_json::to_value(part("arm", 0, 0, 0)).unwrap();
        overfull_arm["slots"] = serde_json::json!([{ "name": "spikes" }]);
        nested["female_sockets"] = serde_json::json!([overfull_arm]);
        assert!(serde_json::from_value::<Part>(nested).is_err());
    }

    #[test]
    fn display_summarizes_usage() {
        let mut head = part("head", 0, 1, 2);
        head.titles.push("giant".to_string());
        head.attach(Attachment::new("horn")).unwrap();
        let rendered = head.to_string();
        assert!(rendered.starts_with("Part `head`"));
        assert!(rendered.contains("titles: giant"));
        assert!(rendered.contains("slots: 1/2"));
        assert!(rendered.contains("male sockets: 0/1"));
    }
}
