// src/families/mod.rs
//! # Category families
//!
//! A family is the per-category behaviour of the converter: which meta
//! columns a category has, how raw fields are shaped into them, how records
//! are classified and corrected, and which column breaks level ties.
//!
//! Families are stateless values. `for_category` maps a category id to its
//! family; everything not listed there is a plain family (copy the fields,
//! sort by level then name).
//!
//! Classification rules live next to each family as static `Cascade` tables
//! (see `engine`), and per-record exceptions live in `catalog`. Adding an
//! exception is a table edit in one of those two places.

use std::borrow::Cow;

use crate::catalog::Catalog;
use crate::data::{Entry, MetaValue, Schema};

pub mod item;
pub mod trap;

pub use item::{ItemFamily, ItemKind};
pub use trap::TrapFamily;

pub trait Family: Sync {
    fn label(&self) -> &'static str;

    /// Meta column names for a category with these raw field names.
    fn meta_names(&self, fields: &[String]) -> Vec<String> {
        fields.to_vec()
    }

    /// Initial meta vector built from a record's raw fields.
    fn reshape(&self, fields: &[String]) -> Vec<MetaValue> {
        fields.iter().map(|f| MetaValue::from(f.as_str())).collect()
    }

    /// Final short id for a record.
    fn short_id(&self, short_id: &str) -> String {
        s!(short_id)
    }

    /// The part of the display body that feeds the search text.
    fn text_source<'a>(&self, data: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(data)
    }

    /// Fill derived meta. Runs before corrections.
    fn classify(&self, _entry: &mut Entry, _schema: &Schema) {}

    fn corrections(&self) -> Option<&'static Catalog> {
        None
    }

    /// Meta column compared after level rank and before name.
    fn secondary_key(&self) -> Option<&'static str> {
        None
    }

    /// Whether this record's tier-starting level ("5+") is expanded from
    /// its price table. Asked after classification and corrections.
    fn expands_tiers(&self, _entry: &Entry, _schema: &Schema) -> bool {
        false
    }
}

/// No classification, no corrections.
pub struct PlainFamily;

impl Family for PlainFamily {
    fn label(&self) -> &'static str {
        "plain"
    }
}

/// Corrections only.
pub struct MonsterFamily;

impl Family for MonsterFamily {
    fn label(&self) -> &'static str {
        "monster"
    }

    fn corrections(&self) -> Option<&'static Catalog> {
        Some(&crate::catalog::monsters::CATALOG)
    }
}

/// Corrections only.
pub struct PoisonFamily;

impl Family for PoisonFamily {
    fn label(&self) -> &'static str {
        "poison"
    }

    fn corrections(&self) -> Option<&'static Catalog> {
        Some(&crate::catalog::poisons::CATALOG)
    }
}

static PLAIN: PlainFamily = PlainFamily;
static MONSTER: MonsterFamily = MonsterFamily;
static POISON: PoisonFamily = PoisonFamily;
static TRAP: TrapFamily = TrapFamily;
static ITEM: ItemFamily = ItemFamily::new(ItemKind::Generic);
static ARMOR: ItemFamily = ItemFamily::new(ItemKind::Armor);
static IMPLEMENT: ItemFamily = ItemFamily::new(ItemKind::Implement);
static WEAPON: ItemFamily = ItemFamily::new(ItemKind::Weapon);

/// Family for a category id.
pub fn for_category(id: &str) -> &'static dyn Family {
    match id {
        "Item" => &ITEM,
        "Armor" => &ARMOR,
        "Implement" => &IMPLEMENT,
        "Weapon" => &WEAPON,
        "Trap" | "Terrain" => &TRAP,
        "Monster" => &MONSTER,
        "Poison" => &POISON,
        _ => &PLAIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_maps_ids_to_families() {
        assert_eq!(for_category("Item").label(), "item");
        assert_eq!(for_category("Weapon").label(), "weapon");
        assert_eq!(for_category("Terrain").label(), "trap");
        assert_eq!(for_category("Monster").label(), "monster");
        assert_eq!(for_category("Ritual").label(), "plain");
    }

    #[test]
    fn plain_family_copies_fields() {
        let fields = vec![s!("Level"), s!("SourceBook")];
        let f = for_category("Feat");
        assert_eq!(f.meta_names(&fields), fields);
        assert_eq!(f.reshape(&fields), [MetaValue::from("Level"), MetaValue::from("SourceBook")]);
        assert!(f.corrections().is_none());
        let e = Entry::new("feat.aspx?id=1", "Alertness", fields.clone(), Some(s!("<p>x</p>")));
        assert!(!f.expands_tiers(&e, &Schema::new(&fields)));
    }
}
