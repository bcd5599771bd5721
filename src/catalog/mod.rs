// src/catalog/mod.rs
//! # Correction catalog
//!
//! Deliberate one-off repairs, applied after classification. Every repair
//! that changes a record appends its reason tags to the record's correction
//! log; a repair that finds nothing to change logs nothing.
//!
//! A family catalog has three parts, applied in this order:
//! - `always`: rules run on every record of the family.
//! - `patches`: edits keyed by short id. A patch may name a `then` patch
//!   that runs right after it.
//! - `default`: rules run only when no patch matched the record.
//!
//! Patches are data (`Edit` lists) and idempotent: swaps skip occurrences
//! already covered by their replacement, first-swaps are skipped once the
//! replacement is present, and meta edits that change nothing are not
//! counted.

use crate::core::sanitize::{swap_all, swap_first};
use crate::data::{Entry, Schema};

pub mod items;
pub mod monsters;
pub mod poisons;
pub mod traps;

/// One edit of a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// Replace every occurrence in the body.
    Swap(&'static str, &'static str),
    /// Replace the first occurrence in the body.
    SwapFirst(&'static str, &'static str),
    /// Replace the first occurrence in the body while the named meta slot is
    /// still set. Pairs with a later `Meta(slot, "")` so a deletion runs once.
    SwapFirstWhileSet { slot: &'static str, from: &'static str, to: &'static str },
    /// Overwrite a meta slot by name.
    Meta(&'static str, &'static str),
}

impl Edit {
    fn apply(&self, entry: &mut Entry, schema: &Schema) -> bool {
        let swapped = match *self {
            Edit::Swap(from, to) => swap_all(entry.data(), from, to),
            Edit::SwapFirst(from, to) => swap_first(entry.data(), from, to),
            Edit::SwapFirstWhileSet { slot, from, to } => {
                if schema.text(entry, slot).is_empty() {
                    return false;
                }
                swap_first(entry.data(), from, to)
            }
            Edit::Meta(slot, value) => return schema.set(entry, slot, value),
        };
        match swapped {
            Some(data) => {
                entry.set_data(data);
                true
            }
            None => false,
        }
    }
}

/// Identifier-keyed patch.
#[derive(Debug)]
pub struct Patch {
    pub ids: &'static [&'static str],
    pub edits: &'static [Edit],
    pub reasons: &'static [&'static str],
    /// Patch applied right after this one.
    pub then: Option<&'static str>,
}

impl Patch {
    /// Apply every edit; log the reasons if any of them changed something.
    pub fn apply(&self, entry: &mut Entry, schema: &Schema) -> bool {
        let mut changed = false;
        for edit in self.edits {
            changed |= edit.apply(entry, schema);
        }
        if changed {
            for reason in self.reasons {
                entry.fix(reason);
            }
        }
        changed
    }
}

/// Rule that is not keyed by id. `apply` reports whether it changed anything.
pub struct Rule {
    pub reason: &'static str,
    pub apply: fn(&mut Entry, &Schema) -> bool,
}

impl Rule {
    fn run(&self, entry: &mut Entry, schema: &Schema) {
        if (self.apply)(entry, schema) {
            entry.fix(self.reason);
        }
    }
}

pub struct Catalog {
    pub always: &'static [Rule],
    pub patches: &'static [Patch],
    pub default: &'static [Rule],
}

impl Catalog {
    pub fn patch(&self, short_id: &str) -> Option<&'static Patch> {
        let patches: &'static [Patch] = self.patches;
        patches.iter().find(|p| p.ids.iter().any(|id| *id == short_id))
    }

    pub fn apply(&self, entry: &mut Entry, schema: &Schema) {
        for rule in self.always {
            rule.run(entry, schema);
        }

        let Some(first) = self.patch(&entry.short_id) else {
            for rule in self.default {
                rule.run(entry, schema);
            }
            return;
        };

        // Chains are short and acyclic; the hop limit only guards bad data.
        let mut next = Some(first);
        let mut hops = 0;
        while let Some(patch) = next {
            if hops > self.patches.len() {
                loge!("patch chain from {} does not terminate", entry.short_id);
                break;
            }
            patch.apply(entry, schema);
            next = patch.then.and_then(|id| self.patch(id));
            hops += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MetaValue;
    use crate::families::item::GENERIC_META;
    use crate::families::trap::TRAP_META;

    fn bump(entry: &mut Entry, _: &Schema) -> bool {
        let Some(data) = swap_all(entry.data(), "colour", "color") else { return false };
        entry.set_data(data);
        true
    }

    fn at_will(entry: &mut Entry, _: &Schema) -> bool {
        let Some(data) = swap_first(entry.data(), "(", "(At-Will ") else { return false };
        entry.set_data(data);
        true
    }

    static CATALOG: Catalog = Catalog {
        always: &[Rule { reason: "spelling", apply: bump }],
        patches: &[
            Patch { ids: &["x1"], edits: &[Edit::Swap("0 gp", "5 gp")], reasons: &["consistency"], then: Some("x2") },
            Patch { ids: &["x2"], edits: &[Edit::Meta("Kind", "Consumable")], reasons: &["recategorise"], then: None },
        ],
        default: &[Rule { reason: "default", apply: at_will }],
    };

    fn entry(id: &str, body: &str) -> (Entry, Schema) {
        let schema = Schema::from_static(&["Kind"]);
        let mut e = Entry::new(format!("x.aspx?id={id}"), "X", vec![s!("Gear")], Some(s!(body)));
        e.normalize_once();
        e.copy_meta_once(|f| f.iter().map(|s| s.as_str().into()).collect());
        (e, schema)
    }

    #[test]
    fn chained_patch_runs_in_order() {
        let (mut e, schema) = entry("1", "<p>colour 0 gp</p>");
        CATALOG.apply(&mut e, &schema);
        assert_eq!(e.data(), "<p>color 5 gp</p>");
        assert_eq!(schema.text(&e, "Kind"), "Consumable");
        assert_eq!(e.corrections(), ["spelling", "consistency", "recategorise"]);
    }

    #[test]
    fn reapplying_changes_nothing() {
        let (mut e, schema) = entry("1", "<p>0 gp</p>");
        CATALOG.apply(&mut e, &schema);
        let (data, log) = (s!(e.data()), e.corrections().to_vec());
        CATALOG.apply(&mut e, &schema);
        assert_eq!(e.data(), data);
        assert_eq!(e.corrections(), log);
    }

    #[test]
    fn default_only_without_patch() {
        let (mut e, schema) = entry("3", "<p>✦ (Standard)</p>");
        CATALOG.apply(&mut e, &schema);
        assert_eq!(e.data(), "<p>✦ (At-Will Standard)</p>");
        assert_eq!(e.corrections(), ["default"]);

        let (mut e, schema) = entry("2", "<p>✦ (Standard)</p>");
        CATALOG.apply(&mut e, &schema);
        assert_eq!(e.data(), "<p>✦ (Standard)</p>");
    }

    fn body_needle(edit: &Edit) -> Option<&'static str> {
        match *edit {
            Edit::Swap(from, _) | Edit::SwapFirst(from, _) | Edit::SwapFirstWhileSet { from, .. } => Some(from),
            Edit::Meta(..) => None,
        }
    }

    #[test]
    fn every_table_patch_applies_once() {
        let item_schema = Schema::from_static(&GENERIC_META);
        let trap_schema = Schema::from_static(&TRAP_META);
        let plain = Schema::default();
        let tables: [(&Catalog, &Schema); 4] = [
            (&items::CATALOG, &item_schema),
            (&monsters::CATALOG, &plain),
            (&poisons::CATALOG, &plain),
            (&traps::CATALOG, &trap_schema),
        ];
        for (catalog, schema) in tables {
            for patch in catalog.patches {
                // Every searched string twice, so a second pass has something left to hit.
                let body: String = patch
                    .edits
                    .iter()
                    .filter_map(body_needle)
                    .flat_map(|n| [n, " | ", n, " | "])
                    .collect();
                for id in patch.ids {
                    let mut e = Entry::new(*id, "Sample", Vec::new(), None);
                    e.short_id = s!(*id);
                    e.set_data(body.clone());
                    e.meta = schema.names().iter().map(|_| MetaValue::from("+0 gp")).collect();

                    catalog.apply(&mut e, schema);
                    let once = (s!(e.data()), e.meta.clone(), e.corrections().to_vec());
                    assert!(!once.2.is_empty(), "{id} changed nothing");
                    catalog.apply(&mut e, schema);
                    assert_eq!((s!(e.data()), e.meta.clone(), e.corrections().to_vec()), once, "{id}");
                }
            }
        }
    }

    #[test]
    fn guarded_deletion_stops_once_slot_is_cleared() {
        static BOON: Catalog = Catalog {
            always: &[],
            patches: &[Patch {
                ids: &["x5"],
                edits: &[Edit::SwapFirstWhileSet { slot: "Kind", from: " +0 gp", to: "" }, Edit::Meta("Kind", "")],
                reasons: &["consistency"],
                then: None,
            }],
            default: &[],
        };
        let (mut e, schema) = entry("5", "<p>Boon +0 gp</p><p>Worth +0 gp more</p>");
        BOON.apply(&mut e, &schema);
        BOON.apply(&mut e, &schema);
        assert_eq!(e.data(), "<p>Boon</p><p>Worth +0 gp more</p>");
        assert_eq!(e.corrections(), ["consistency"]);
    }
}
