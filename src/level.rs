// src/level.rs
//
// Level notation → comparable rank.
//
// Notations seen across the compendium: plain integers ("12"), tier-start
// integers ("5+"), named tiers ("Heroic"), the no-level marks ("" and "-"),
// and everything else ("Varies", "(Level)", "Party's Level", "Mundane", ...),
// which shares one rank above every named tier.

use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

/// Variant order is the sort order: no level, then integers, then the
/// three tiers, then variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    NoLevel,
    Level(i64),
    Heroic,
    Paragon,
    Epic,
    Variable,
}

impl Rank {
    /// Total: every string maps to a rank.
    pub fn parse(level: &str) -> Rank {
        if let Ok(n) = level.parse::<i64>() {
            return Rank::Level(n);
        }
        if let Some(n) = level.strip_suffix('+').and_then(|base| base.parse::<i64>().ok()) {
            return Rank::Level(n);
        }
        match level {
            "" | "-" => Rank::NoLevel,
            "Heroic" => Rank::Heroic,
            "Paragon" => Rank::Paragon,
            "Epic" => Rank::Epic,
            _ => Rank::Variable,
        }
    }

    /// Float view for display and export. Not an ordering key: an integer
    /// level above 10 would overtake `Heroic` here.
    pub fn numeric(self) -> f64 {
        match self {
            Rank::NoLevel => 0.0,
            Rank::Level(n) => n as f64,
            Rank::Heroic => 10.5,
            Rank::Paragon => 20.5,
            Rank::Epic => 30.5,
            Rank::Variable => 40.5,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::NoLevel => f.write_str("-"),
            Rank::Level(n) => write!(f, "{n}"),
            Rank::Heroic => f.write_str("Heroic"),
            Rank::Paragon => f.write_str("Paragon"),
            Rank::Epic => f.write_str("Epic"),
            Rank::Variable => f.write_str("Variable"),
        }
    }
}

static SHARED: LazyLock<Arc<LevelRanks>> = LazyLock::new(|| Arc::new(LevelRanks::new()));

/// Memoised resolver keyed by the exact level string. The cache grows with
/// the number of distinct notations, not with the number of records.
#[derive(Debug, Default)]
pub struct LevelRanks {
    cache: DashMap<String, Rank>,
}

impl LevelRanks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide resolver shared by every category of a run.
    pub fn shared() -> Arc<LevelRanks> {
        Arc::clone(&SHARED)
    }

    pub fn rank_of(&self, level: &str) -> Rank {
        if let Some(rank) = self.cache.get(level) {
            return *rank;
        }
        let rank = Rank::parse(level);
        self.cache.insert(s!(level), rank);
        rank
    }

    /// Distinct notations seen so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cascade() {
        assert_eq!(Rank::parse("12"), Rank::Level(12));
        assert_eq!(Rank::parse("5+"), Rank::Level(5));
        assert_eq!(Rank::parse("Paragon"), Rank::Paragon);
        assert_eq!(Rank::parse(""), Rank::NoLevel);
        assert_eq!(Rank::parse("-"), Rank::NoLevel);
        assert_eq!(Rank::parse("Party's Level"), Rank::Variable);
        assert_eq!(Rank::parse("8 Minion"), Rank::Variable);
    }

    #[test]
    fn tiers_rank_above_every_integer() {
        let mut ranks = vec![Rank::Variable, Rank::Epic, Rank::Level(i64::MAX), Rank::Heroic, Rank::NoLevel, Rank::Paragon, Rank::Level(-3)];
        ranks.sort();
        assert_eq!(ranks, [Rank::NoLevel, Rank::Level(-3), Rank::Level(i64::MAX), Rank::Heroic, Rank::Paragon, Rank::Epic, Rank::Variable]);
    }

    #[test]
    fn memo_counts_distinct_notations() {
        let ranks = LevelRanks::new();
        assert!(ranks.is_empty());
        for _ in 0..3 {
            assert_eq!(ranks.rank_of("Epic"), Rank::Epic);
            assert_eq!(ranks.rank_of("7"), Rank::Level(7));
        }
        assert_eq!(ranks.len(), 2);
    }

    #[test]
    fn shared_is_one_instance() {
        assert!(Arc::ptr_eq(&LevelRanks::shared(), &LevelRanks::shared()));
    }
}
