// src/families/item.rs
//
// Items: the generic `Item` category plus the dedicated Armor, Implement and
// Weapon categories.
//
// Generic items get an extra `Type` column between `Category` and `Level`.
// Dedicated kinds already start with `Type` and carry their own short id
// prefix (`item49` → `armor49`).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::Family;
use crate::catalog::{self, Catalog};
use crate::core::html::drop_span;
use crate::data::{Entry, MetaValue, Schema};
use crate::engine::{self, Cascade, Outcome, Override, Probe, Rule, Value};

pub const GENERIC_META: [&str; 6] = ["Category", "Type", "Level", "Cost", "Rarity", "SourceBook"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Generic,
    Armor,
    Implement,
    Weapon,
}

pub struct ItemFamily {
    kind: ItemKind,
}

impl ItemFamily {
    pub const fn new(kind: ItemKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Artifacts already carry their type; only the tier is read.
    fn is_artifact(&self, entry: &Entry, schema: &Schema) -> bool {
        let slot = if self.kind == ItemKind::Generic { "Category" } else { "Type" };
        schema.text(entry, slot).starts_with("Artifact")
    }
}

/* Patterns */

static TIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Heroic|Paragon|Epic)\b").expect("tier pattern"));

static TYPE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<b>(?:Type|Armor|Arms Slot|Category)(?:</b>: |: </b>)([A-Za-z, ]+)").expect("type label pattern")
});

static FIRST_STAT_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p class=mistat><b>([^<]+)</b>").expect("first stat pattern"));

static MIN_ENHANCEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<b>Minimum Enhancement Value</b>: (..)").expect("enhancement pattern"));

static IMPLEMENT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<b>Implement: </b>([A-Za-z, ]+)").expect("implement label pattern"));

static WEAPON_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br>([A-Za-z ]+?) \(").expect("weapon group pattern"));

static WEAPON_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<b>Weapon: </b>([A-Za-z, ]+)").expect("weapon label pattern"));

static WEAPON_DIFFICULTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Simple|Military|Superior)\b").expect("difficulty pattern"));

/* Cascades */

static ARTIFACT: Cascade = Cascade {
    slot: "Level",
    rules: &[Rule::captured(Probe::Label(&TIER))],
    overrides: &[],
    collapse_any: false,
    unmatched: None,
};

static ARMOR: Cascade = Cascade {
    slot: "Type",
    rules: &[Rule::captured(Probe::Label(&TYPE_LABEL))],
    overrides: &[Override {
        ids: &["armor49", "armor50", "armor51", "armor52"],
        sets: &[("Type", "Barding")],
    }],
    collapse_any: true,
    unmatched: Some("Armor type not found"),
};

static ARMOR_MIN_LEVEL: Cascade = Cascade {
    slot: "Level",
    rules: &[Rule::new(Probe::Label(&MIN_ENHANCEMENT), Value::Prefixed("Min "))],
    overrides: &[],
    collapse_any: false,
    unmatched: None,
};

static IMPLEMENT: Cascade = Cascade {
    slot: "Type",
    rules: &[
        // Magic implements
        Rule::captured(Probe::Label(&IMPLEMENT_LABEL)),
        // Superior implements are listed as weapons
        Rule::new(Probe::SlotIs("Type", "Weapon"), Value::NameTail)
            .renames(&[("Symbol", "Holy Symbol")])
            .sets(&[("Level", "Superior")])
            .reason("recategorise"),
        // Basic implements; Ki Focus has no cost
        Rule::new(Probe::SlotIs("Type", "Equipment"), Value::NameWithout(" Implement"))
            .sets(&[("Level", "Mundane")])
            .fills(&[("Cost", "0 gp")]),
    ],
    overrides: &[],
    collapse_any: false,
    unmatched: Some("Implement group not found"),
};

static WEAPON: Cascade = Cascade {
    slot: "Type",
    rules: &[
        // Mundane weapons list every group they belong to
        Rule::captured(Probe::Scan { after: "<b>Group</b>: ", pattern: &WEAPON_GROUP }),
        // Magic weapons
        Rule::captured(Probe::Label(&WEAPON_LABEL)).renames(&[("Dragonshard augment", "Dragonshard")]),
    ],
    overrides: &[
        // Double scimitar, secondary end
        Override { ids: &["weapon3677"], sets: &[("Type", "Heavy blade"), ("Level", "Superior")] },
        Override {
            ids: &["weapon3624", "weapon3626", "weapon3634"],
            sets: &[("Type", "Improvised"), ("Level", "Improvised")],
        },
        // Arrows, magazines and the like
        Override {
            ids: &["weapon176", "weapon180", "weapon181", "weapon219", "weapon220", "weapon221", "weapon222", "weapon259"],
            sets: &[("Type", "Ammunition"), ("Level", "Mundane")],
        },
    ],
    collapse_any: false,
    unmatched: Some("Unknown weapon type"),
};

static WEAPON_LEVEL: Cascade = Cascade {
    slot: "Level",
    rules: &[Rule::captured(Probe::Label(&WEAPON_DIFFICULTY))],
    overrides: &[],
    collapse_any: false,
    unmatched: None,
};

static ALTERNATIVE_REWARD: Cascade = Cascade {
    slot: "Type",
    rules: &[Rule::captured(Probe::Label(&FIRST_STAT_BOLD))],
    overrides: &[],
    collapse_any: false,
    unmatched: None,
};

static EQUIPMENT: Cascade = Cascade {
    slot: "Type",
    rules: &[Rule::captured(Probe::Label(&TYPE_LABEL))],
    overrides: &[],
    collapse_any: false,
    unmatched: None,
};

macro_rules! set_type {
    ($type:literal: $($id:literal),+) => {
        Override { ids: &[$($id),+], sets: &[("Type", $type)] }
    };
}

static ITEM_SET: Cascade = Cascade {
    slot: "Type",
    rules: &[],
    overrides: &[
        set_type!("Arcane": "item425"),
        set_type!("Artificer": "item429"),
        Override { ids: &["item439"], sets: &[("Type", "Assassin"), ("Level", "Heroic")] },
        set_type!("Avenger": "item406"),
        set_type!("Barbarian": "item403"),
        set_type!("Cleric": "item415"),
        set_type!("Charge": "item413"),
        set_type!("Crossbow": "item404"),
        set_type!("Deva": "item414"),
        set_type!("Defense": "item399", "item419", "item421"),
        set_type!("Divine": "item424"),
        set_type!("Dragonborn": "item436"),
        set_type!("Druid": "item409"),
        set_type!("Gadget": "item402"),
        set_type!("Group": "item430", "item433", "item435", "item434", "item438"),
        set_type!("Group, Fey": "item431"),
        set_type!("Group, Reroll": "item432"),
        set_type!("Illusion": "item407"),
        set_type!("Invoker": "item427"),
        set_type!("Offense": "item422"),
        set_type!("Opportunity": "item400"),
        set_type!("Lightning/Radiant": "item417"),
        set_type!("Paladin": "item412"),
        set_type!("Ranger": "item401"),
        set_type!("Shaman": "item410"),
        set_type!("Sorcerer": "item418"),
        set_type!("Stealth": "item408"),
        set_type!("Swordmage": "item416", "item405"),
        set_type!("Tiamat": "item437"),
        set_type!("Time": "item428"),
        set_type!("Warlock": "item420", "item426", "item411"),
        set_type!("Warlord": "item423"),
    ],
    collapse_any: false,
    unmatched: Some("Unknown item set"),
};

static WONDROUS: Cascade = Cascade {
    slot: "Type",
    rules: &[
        Rule::new(Probe::NameHas("Tattoo"), Value::Literal("Tattoo")),
        Rule::new(Probe::BodyHas(&["primordial shard"]), Value::Literal("Primordial Shard")),
        Rule::new(Probe::BodyHas(&["Conjuration", "figurine"]), Value::Literal("Figurine")),
        Rule::new(Probe::BodyHas(&["standard", "plant th"]), Value::Literal("Standard")),
    ],
    overrides: &[],
    collapse_any: false,
    unmatched: None,
};

/* Kind-specific steps around the cascades */

fn armor(entry: &mut Entry, schema: &Schema) {
    if let Outcome::Matched { .. } = engine::run(&ARMOR, entry, schema) {
        engine::run(&ARMOR_MIN_LEVEL, entry, schema);
    }
    let cost = schema.text(entry, "Cost");
    if cost.contains(".00 gp") {
        let cost = cost.replace(".00 ", " ");
        schema.set(entry, "Cost", cost);
        entry.fix("wrong meta");
    }
    if schema.text(entry, "Level").is_empty() {
        schema.set(entry, "Level", "Mundane");
        entry.fix("missing meta");
    }
}

fn weapon(entry: &mut Entry, schema: &Schema) {
    if schema.text(entry, "Type") == "Ammunition" {
        return;
    }
    // Only the group scan (rule 0) carries level information.
    let Outcome::Matched { rule: 0, value } = engine::run(&WEAPON, entry, schema) else { return };
    if value.is_empty() {
        entry.warn("Weapon group not found");
    }
    let priced = !schema.text(entry, "Cost").is_empty();
    if priced || entry.name.ends_with("secondary end") || entry.name == "Shuriken" {
        engine::run(&WEAPON_LEVEL, entry, schema);
    }
    if schema.text(entry, "Level").is_empty() {
        let level = if schema.text(entry, "Type") == "Unarmed" { "Improvised" } else { "(Level)" };
        schema.set(entry, "Level", level);
    }
}

fn wondrous(entry: &mut Entry, schema: &Schema) {
    engine::run(&WONDROUS, entry, schema);
    let data = entry.data();
    let conjured_mount = data.contains("Conjuration") && data.contains("mount") && !entry.name.starts_with("Bag ");
    let current = schema.text(entry, "Type");
    if !conjured_mount || current.ends_with("Mount") {
        return;
    }
    let mount = if current.is_empty() { s!("Mount") } else { join!(current, ": Mount") };
    schema.set(entry, "Type", mount);
}

impl Family for ItemFamily {
    fn label(&self) -> &'static str {
        match self.kind {
            ItemKind::Generic => "item",
            ItemKind::Armor => "armor",
            ItemKind::Implement => "implement",
            ItemKind::Weapon => "weapon",
        }
    }

    fn meta_names(&self, fields: &[String]) -> Vec<String> {
        match self.kind {
            ItemKind::Generic => GENERIC_META.iter().map(|n| s!(*n)).collect(),
            _ => fields.to_vec(),
        }
    }

    /// Generic items: `[Category, "", Level, Cost, Rarity, SourceBook]`.
    fn reshape(&self, fields: &[String]) -> Vec<MetaValue> {
        let mut meta: Vec<MetaValue> = fields.iter().map(|f| MetaValue::from(f.as_str())).collect();
        if self.kind == ItemKind::Generic {
            meta.resize(GENERIC_META.len() - 1, MetaValue::default());
            meta.insert(1, MetaValue::default());
        }
        meta
    }

    fn short_id(&self, short_id: &str) -> String {
        match self.kind {
            ItemKind::Generic => s!(short_id),
            _ => short_id.replace("item", self.label()),
        }
    }

    /// Item sets embed their member items; search only the set itself.
    fn text_source<'a>(&self, data: &'a str) -> Cow<'a, str> {
        if data.starts_with("<h1 class=miset>") {
            if let Some(trimmed) = drop_span(data, "<h1 class=mihead>", "<p class=publishedIn>") {
                return Cow::Owned(trimmed);
            }
        }
        Cow::Borrowed(data)
    }

    fn classify(&self, entry: &mut Entry, schema: &Schema) {
        if self.is_artifact(entry, schema) {
            engine::run(&ARTIFACT, entry, schema);
            return;
        }
        match self.kind {
            ItemKind::Armor => armor(entry, schema),
            ItemKind::Implement => {
                engine::run(&IMPLEMENT, entry, schema);
            }
            ItemKind::Weapon => weapon(entry, schema),
            ItemKind::Generic => match s!(schema.text(entry, "Category")).as_str() {
                "Alternative Reward" => {
                    engine::run(&ALTERNATIVE_REWARD, entry, schema);
                }
                "Armor" => armor(entry, schema),
                "Equipment" => {
                    engine::run(&EQUIPMENT, entry, schema);
                }
                "Item Set" => {
                    engine::run(&ITEM_SET, entry, schema);
                }
                "Wondrous" => wondrous(entry, schema),
                _ => {}
            },
        }
    }

    fn corrections(&self) -> Option<&'static Catalog> {
        Some(&catalog::items::CATALOG)
    }

    fn secondary_key(&self) -> Option<&'static str> {
        match self.kind {
            ItemKind::Generic => Some("Category"),
            _ => None,
        }
    }

    /// Artifacts have no price table.
    fn expands_tiers(&self, entry: &Entry, schema: &Schema) -> bool {
        !self.is_artifact(entry, schema)
    }
}
