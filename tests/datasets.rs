// Integration tests for dataset invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use stem_games::games::{
    COUNT_EMOJIS, HABITATS, PLANETS, PRIMARIES, SIZE_LABELS, animals_of, mix,
};

#[test]
fn count_emojis_are_unique_and_nonempty() {
    assert!(!COUNT_EMOJIS.is_empty());
    let mut seen = HashSet::new();
    for e in COUNT_EMOJIS {
        assert!(seen.insert(*e), "duplicate emoji '{}' in COUNT_EMOJIS", e);
        assert!(!e.is_empty(), "empty entry in COUNT_EMOJIS");
    }
}

#[test]
fn animal_datasets_are_unique_within_and_across_habitats() {
    let mut seen = HashSet::new();
    for habitat in HABITATS {
        let animals = animals_of(habitat);
        assert_eq!(
            animals.len(),
            5,
            "habitat {:?} should hold five animals",
            habitat
        );
        for (emoji, name) in animals {
            assert!(!emoji.is_empty(), "empty emoji for animal '{}'", name);
            assert!(!name.is_empty(), "unnamed animal in {:?}", habitat);
            // An animal must classify into exactly one habitat.
            assert!(seen.insert(*name), "animal '{}' appears in two habitats", name);
        }
    }
}

#[test]
fn habitat_labels_and_colors_are_distinct() {
    let labels: HashSet<_> = HABITATS.iter().map(|h| h.button_label()).collect();
    let colors: HashSet<_> = HABITATS.iter().map(|h| h.button_color()).collect();
    assert_eq!(labels.len(), HABITATS.len());
    assert_eq!(colors.len(), HABITATS.len());
}

#[test]
fn planets_cover_orders_one_through_eight() {
    let orders: HashSet<_> = PLANETS.iter().map(|p| p.order).collect();
    assert_eq!(orders, (1..=8).collect::<HashSet<_>>());
    let names: HashSet<_> = PLANETS.iter().map(|p| p.name).collect();
    assert_eq!(names.len(), PLANETS.len(), "planet names must be unique");
    for p in &PLANETS {
        assert!(!p.fact.is_empty(), "planet '{}' has no fact", p.name);
        assert!(
            SIZE_LABELS.contains(&p.size),
            "planet '{}' has size '{}' outside SIZE_LABELS",
            p.name,
            p.size
        );
    }
}

#[test]
fn every_distinct_primary_pair_mixes() {
    for a in PRIMARIES {
        for b in PRIMARIES {
            if a == b {
                assert!(mix(a, b).is_none(), "{:?} mixed with itself", a);
            } else {
                let m = mix(a, b).expect("distinct primaries must mix");
                assert_eq!(mix(a, b), mix(b, a), "mixing must be symmetric");
                assert!(m.hex.starts_with('#'));
                assert!(!m.name.is_empty());
            }
        }
    }
    // Three unordered pairs, three distinct results.
    let orange = mix(PRIMARIES[0], PRIMARIES[1]).unwrap();
    let green = mix(PRIMARIES[1], PRIMARIES[2]).unwrap();
    let purple = mix(PRIMARIES[0], PRIMARIES[2]).unwrap();
    assert_ne!(orange.name, green.name);
    assert_ne!(green.name, purple.name);
    assert_ne!(orange.name, purple.name);
}
