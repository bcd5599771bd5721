// tests/level_ranks.rs
use std::sync::Arc;
use std::thread;

use compendium_convert::level::{LevelRanks, Rank};

const NOTATIONS: [&str; 8] = ["1", "12", "5+", "Heroic", "Paragon", "Epic", "-", "Varies"];

#[test]
fn concurrent_lookups_agree_and_cache_once() {
    let ranks = Arc::new(LevelRanks::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ranks = Arc::clone(&ranks);
            thread::spawn(move || NOTATIONS.iter().map(|n| ranks.rank_of(n)).collect::<Vec<_>>())
        })
        .collect();

    let expected: Vec<Rank> = NOTATIONS.iter().map(|n| Rank::parse(n)).collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
    assert_eq!(ranks.len(), NOTATIONS.len());
}

#[test]
fn numeric_view_keeps_historic_values() {
    let values: Vec<f64> = ["-", "7", "Heroic", "Paragon", "Epic", "Mundane"]
        .iter()
        .map(|n| Rank::parse(n).numeric())
        .collect();
    assert_eq!(values, [0.0, 7.0, 10.5, 20.5, 30.5, 40.5]);
}

#[test]
fn display_round_trips_through_parse() {
    for rank in [Rank::NoLevel, Rank::Level(14), Rank::Heroic, Rank::Paragon, Rank::Epic] {
        assert_eq!(Rank::parse(&rank.to_string()), rank);
    }
}
