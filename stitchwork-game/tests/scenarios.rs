use stitchwork_game::{
    Effect, Forge, ForgeError, MemorySource, PARTS_DOCUMENT, Stats, TITLES_DOCUMENT,
    strip_comments, validate_parts,
};

const PARTS: &str = r#"
// catalog used by the acceptance scenarios
{
    "arm": {
        "baseStats": { "health": 30, "defense": 30, "attack": 30 },
        "sockets": { "female": 1, "male": 0 },
        "slots": 1
    }
}
"#;

const TITLES: &str = r#"
{
    /* doubles everything */
    "giant": {
        "effects": [
            { "scaling": "proportional", "health": 2, "defense": 2, "attack": 2 }
        ]
    },
    "unstable": {
        "effects": [ { "scaling": "explosive", "attack": 3 } ]
    }
}
"#;

fn forge() -> Forge<MemorySource> {
    Forge::new(
        MemorySource::new()
            .with_document(PARTS_DOCUMENT, PARTS)
            .with_document(TITLES_DOCUMENT, TITLES),
    )
}

fn assert_stats(stats: Stats, expected: f64) {
    for (label, value) in [
        ("health", stats.health),
        ("defense", stats.defense),
        ("attack", stats.attack),
    ] {
        assert!(
            (value - expected).abs() < 1e-9,
            "{label} was {value}, expected {expected}"
        );
    }
}

#[test]
fn player_part_applies_modifier_then_title() {
    let part = forge()
        .player_part("arm", 1.0, Stats::splat(30.0), ["giant"])
        .unwrap();
    assert_stats(part.stats(), 60.0);
    assert!((part.health_max - 60.0).abs() < 1e-9);
}

#[test]
fn repeated_titles_apply_twice() {
    let part = forge()
        .player_part("arm", 1.0, Stats::splat(30.0), ["giant", "giant"])
        .unwrap();
    assert_stats(part.stats(), 120.0);
    assert_eq!(part.titles, vec!["giant", "giant"]);
}

#[test]
fn natural_part_with_fixed_variance() {
    let part = forge()
        .natural_part_with_variance("arm", Vec::<&str>::new(), 1.5)
        .unwrap();
    assert_stats(part.stats(), 45.0);
}

#[test]
fn invalid_scaling_names_the_keyword() {
    let err = forge().resolve_title("unstable").unwrap_err();
    assert!(matches!(err, ForgeError::InvalidScaling { .. }));
    assert!(err.to_string().contains("explosive"));
}

#[test]
fn validator_rejects_entry_without_slots() {
    let broken = r#"{
        "arm": {
            "baseStats": { "health": 30, "defense": 30, "attack": 30 },
            "sockets": { "female": 1, "male": 0 },
            "slots": 1
        },
        "leg": {
            "baseStats": { "health": 35, "defense": 25, "attack": 20 },
            "sockets": { "female": 1, "male": 1 }
        }
    }"#;
    assert!(validate_parts(PARTS));
    assert!(!validate_parts(broken));
}

#[test]
fn stripping_twice_matches_stripping_once() {
    for text in [PARTS, TITLES, "a /* b */ c // d\n/* e\n f */ g", "//*/ x */"] {
        let once = strip_comments(text);
        assert_eq!(strip_comments(&once), once);
    }
}

#[test]
fn static_and_proportional_do_not_commute() {
    let scale = Effect::proportional(2.0, 1.0, 1.0);
    let add = Effect::additive(1.0, 0.0, 0.0);
    let start = Stats::new(1.0, 0.0, 0.0);
    assert_eq!(add.apply(scale.apply(start)), Stats::new(3.0, 0.0, 0.0));
    assert_ne!(scale.apply(add.apply(start)), add.apply(scale.apply(start)));
}

#[test]
fn fresh_parts_have_empty_sockets_within_capacity() {
    let forge = forge();
    let part = forge
        .player_part("arm", 0.5, Stats::splat(10.0), Vec::<String>::new())
        .unwrap();
    assert!(part.female_sockets().len() <= part.female_sockets_max() as usize);
    assert!(part.male_sockets().len() <= part.male_sockets_max() as usize);
    assert!(part.slots().len() <= part.slots_max() as usize);
    assert!(part.female_sockets().is_empty());
}

#[test]
fn installing_respects_capacity() {
    let forge = forge();
    let mut torso = forge
        .natural_part_with_variance("arm", Vec::<&str>::new(), 1.0)
        .unwrap();
    let first = forge
        .natural_part_with_variance("arm", Vec::<&str>::new(), 1.0)
        .unwrap();
    let second = first.clone();
    torso.install_female(first).unwrap();
    let rejected = torso.install_female(second).unwrap_err();
    assert_eq!(rejected.element.name, "arm");
    assert_eq!(torso.female_sockets().len(), 1);
    assert_eq!(torso.female_sockets_max(), 1);
}

#[test]
fn unknown_names_are_rejected() {
    let forge = forge();
    let mut rng = rand::rngs::mock::StepRng::new(0, 1);
    assert!(matches!(
        forge.natural_part("doesNotExist", Vec::<&str>::new(), &mut rng),
        Err(ForgeError::UnknownPart { .. })
    ));
    assert!(matches!(
        forge.resolve_title("doesNotExist"),
        Err(ForgeError::UnknownTitle { .. })
    ));
}

#[test]
fn missing_catalog_is_resource_not_found() {
    let forge = Forge::new(MemorySource::new());
    let err = forge
        .player_part("arm", 1.0, Stats::splat(1.0), Vec::<&str>::new())
        .unwrap_err();
    assert!(matches!(err, ForgeError::ResourceNotFound { ref document } if document == PARTS_DOCUMENT));
}
