// src/sort.rs
//
// Category order: level rank, then the family's secondary column, then
// name, then id. The order is a set: a record whose full key equals one
// already placed is not inserted again.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::data::{Entry, Schema};
use crate::level::{LevelRanks, Rank};

pub struct Sorter {
    level: Option<usize>,
    secondary: Option<usize>,
    ranks: Arc<LevelRanks>,
}

impl Sorter {
    pub fn new(schema: &Schema, secondary: Option<&str>, ranks: Arc<LevelRanks>) -> Self {
        Self {
            level: schema.index("Level"),
            secondary: secondary.and_then(|name| schema.index(name)),
            ranks,
        }
    }

    /// Categories without a Level column rank everything as no-level.
    pub fn rank(&self, entry: &Entry) -> Rank {
        match self.level {
            Some(i) => self.ranks.rank_of(entry.meta_text(i)),
            None => Rank::NoLevel,
        }
    }

    fn secondary<'e>(&self, entry: &'e Entry) -> &'e str {
        self.secondary.map_or("", |i| entry.meta_text(i))
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        self.rank(a)
            .cmp(&self.rank(b))
            .then_with(|| self.secondary(a).cmp(self.secondary(b)))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Place `entries[index]` into `order`. Returns false when an entry with
    /// the same key is already there.
    pub fn insert(&self, entries: &[Entry], order: &mut Vec<usize>, index: usize) -> bool {
        let entry = &entries[index];
        match order.binary_search_by(|&i| self.compare(&entries[i], entry)) {
            Ok(_) => false,
            Err(pos) => {
                order.insert(pos, index);
                true
            }
        }
    }
}
