// src/tiers.rs
//
// Tiered items ("5+") list one row per enhancement level in a price table.
// Expansion turns the scalar Level and Cost slots into parallel lists: the
// original value first, then one element per row in document order.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::sanitize::digits_only;
use crate::data::{Entry, MetaValue, Schema};

static PRICE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<td class=mic1>Lvl (\d+)(?:<td class=mic2>(?:\+\d)?)?<td class=mic3>([\d,]+) gp").expect("price row pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// Level and Cost now hold lists.
    Expanded { rows: usize },
    /// Not a tiered record (or already expanded).
    Skipped,
    /// Tiered level but no readable price table; scalars kept.
    Malformed,
}

/// `(level, cost digits)` for every price row of a body.
pub fn price_rows(data: &str) -> Vec<(String, String)> {
    PRICE_ROW
        .captures_iter(data)
        .map(|c| (s!(&c[1]), digits_only(&c[2])))
        .collect()
}

pub fn expand(entry: &mut Entry, schema: &Schema, debug: bool) -> Expansion {
    let Some(level_slot) = schema.index("Level") else { return Expansion::Skipped };
    if entry.meta.get(level_slot).is_some_and(MetaValue::is_list) {
        return Expansion::Skipped;
    }

    let level = s!(entry.meta_text(level_slot));
    if !level.ends_with('+') {
        if debug && schema.text(entry, "Category") != "Item Set" && price_rows(entry.data()).len() >= 2 {
            entry.warn("Price table on non-multilevel item");
        }
        return Expansion::Skipped;
    }

    let rows = price_rows(entry.data());
    if rows.is_empty() {
        entry.warn("Price table not found on multilevel item");
        return Expansion::Malformed;
    }

    let mut levels = Vec::with_capacity(rows.len() + 1);
    let mut costs = Vec::with_capacity(rows.len() + 1);
    levels.push(level);
    costs.push(s!(schema.text(entry, "Cost")));
    for (lvl, cost) in &rows {
        levels.push(lvl.clone());
        costs.push(cost.clone());
    }
    schema.set(entry, "Level", levels);
    schema.set(entry, "Cost", costs);
    Expansion::Expanded { rows: rows.len() }
}
