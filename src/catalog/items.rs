// src/catalog/items.rs
//
// Item repairs. Shared by the generic and the dedicated item categories;
// patches keyed by an id the category never produces simply never match.

use std::sync::LazyLock;

use regex::Regex;

use super::{Catalog, Edit, Patch, Rule};
use crate::data::{Entry, Schema};

const PUBLISHED: &str = "<p class=publishedIn>";

static REPRODUCED_BELOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"( \([^)]+\), which is reproduced below).").expect("reproduced pattern"));

static BARE_FREQUENCY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"✦\s*\(").expect("frequency pattern"));

fn missing_published(entry: &mut Entry, schema: &Schema) -> bool {
    if entry.data().contains(PUBLISHED) {
        return false;
    }
    let source = schema.text(entry, "SourceBook");
    let data = format!("{}{PUBLISHED}Published in {source}.</p>", entry.data());
    entry.set_data(data);
    true
}

fn reproduced_below(entry: &mut Entry, _: &Schema) -> bool {
    let Some(span) = REPRODUCED_BELOW.captures(entry.data()).and_then(|c| c.get(1)).map(|m| m.range()) else {
        return false;
    };
    let mut data = s!(entry.data());
    data.replace_range(span, "");
    entry.set_data(data);
    true
}

/// About 150 items omit the frequency word after the power glyph.
fn bare_frequency(entry: &mut Entry, _: &Schema) -> bool {
    if !BARE_FREQUENCY.is_match(entry.data()) {
        return false;
    }
    let data = BARE_FREQUENCY.replace_all(entry.data(), "✦ At-Will (").into_owned();
    entry.set_data(data);
    true
}

const VOICE_OF_THE_AKAROT: &str = concat!(
    "<br><br><h1 class=dailypower><span class=level>Item Set Power</span>Voice of the Akarot</h1>",
    "<p class=flavor><i>Channeling the power of your allies' will, you command your enemy to stop attacking, though each ally is momentarily disoriented.</i></p>",
    "<p class=powerstat><b>Daily (Special)</b> ✦ <b>Charm</b><br>",
    "<b>Standard Action</b> <b>Close</b> burst 5</p>",
    "<p class=powerstat><b>Target</b>: Each enemyin burst</p>",
    "<p class=powerstat><b>Attack</b>: +30 vs. Will</p>",
    "<p class=flavor><b>Hit</b>: The target cannot attack (save ends).</p>",
    "<p class=powerstat><b>Effect</b>: Each ally wearing a ring from this set is dazed until the end of your next turn.</p>",
    "<p class=flavor><b>Special</b>: This power can be used only once per day by you and your allies. Once any of you use it, ",
    "the group does not regain the use of the power until the person who used it takes an extended rest.</p>",
    "<br>Update (4/12/2010)<br> In the Keywords entry, add \"(Special)\" after \"Daily.\" In addition, add the Special entry to the power. ",
    "These changes limit the potential for this power to shut down multiple encounters.<br><br>",
);

pub static CATALOG: Catalog = Catalog {
    always: &[
        Rule { reason: "missing published", apply: missing_published },
        Rule { reason: "consistency", apply: reproduced_below },
    ],
    patches: &[
        // Cloth Armor
        Patch { ids: &["item1"], edits: &[Edit::Meta("Cost", "1 gp")], reasons: &["wrong meta"], then: None },
        // Shield of Prator
        Patch {
            ids: &["item105"],
            edits: &[Edit::Swap(" class=magicitem>", " class=mihead>")],
            reasons: &["formatting"],
            then: None,
        },
        // Rings of the Akarot
        Patch {
            ids: &["item434"],
            edits: &[Edit::SwapFirst("<br><br>", VOICE_OF_THE_AKAROT)],
            reasons: &["missing content"],
            then: None,
        },
        // Xenda-Dran's Array
        Patch { ids: &["item439"], edits: &[Edit::Swap("> Tier</", "> Heroic Tier</")], reasons: &["consistency"], then: None },
        // Alchemical Failsafe
        Patch {
            ids: &["item467"],
            edits: &[Edit::Swap("Power ✦ </h2>", "Power ✦ At-Will</h2>")],
            reasons: &["missing power frequency"],
            then: None,
        },
        // Anarch Sphere, Horreb Ritual Cube, Shard of Evil
        Patch {
            ids: &["item508", "item1578", "item2463"],
            edits: &[Edit::Swap("0 gp", "Priceless"), Edit::Meta("Cost", "")],
            reasons: &["consistency"],
            then: None,
        },
        // Anarusi Codex
        Patch {
            ids: &["item509"],
            edits: &[Edit::Swap("0 gp", "5,000 gp"), Edit::Meta("Cost", "5,000 gp")],
            reasons: &["missing content"],
            then: None,
        },
        // Bahamut's Golden Canary: priceless, and a consumable like Instant Portal
        Patch {
            ids: &["item588"],
            edits: &[Edit::Swap("0 gp", "Priceless"), Edit::Meta("Cost", "")],
            reasons: &["consistency"],
            then: Some("item1632"),
        },
        // Instant Portal
        Patch { ids: &["item1632"], edits: &[Edit::Meta("Category", "Consumable")], reasons: &["recategorise"], then: None },
        // Dantrag's Bracers: arm power is daily, feet power is encounter
        Patch {
            ids: &["item1007"],
            edits: &[
                Edit::SwapFirst("Power ✦ </h2>", "Power ✦ Daily</h2>"),
                Edit::SwapFirst("Power ✦ </h2>", "Power ✦ Encounter</h2>"),
            ],
            reasons: &["missing power frequency"],
            then: None,
        },
        // Dancing Weapon, Feral Armor, Shadowfell Blade
        Patch {
            ids: &["item1006", "item1261", "item2451"],
            edits: &[Edit::Swap("basic melee attack", "melee basic attack")],
            reasons: &["fix basic attack"],
            then: None,
        },
        // Kord's Relentlessness
        Patch {
            ids: &["item1701"],
            edits: &[Edit::Swap(
                " or 30:</i> Gain a +2 item bonus to death</p>",
                " or 20</i>: +4 item bonus to the damage roll<br> <i>Level 25 or 30:</i> +6 item bonus to the damage roll</p>",
            )],
            reasons: &["missing content"],
            then: None,
        },
        // Mirror of Deception
        Patch {
            ids: &["item1864"],
            edits: &[
                Edit::Swap(" ✦ (Standard", " ✦ At-Will (Standard"),
                Edit::Swap("alter</p><p class='mistat indent'>sound", "alter sound"),
            ],
            reasons: &["missing power frequency", "formatting"],
            then: None,
        },
        // Mrtok, Ogre Chief
        Patch {
            ids: &["item1895"],
            edits: &[Edit::Swap(" 0 gp", " 1,000 gp"), Edit::Meta("Cost", "1,000 gp")],
            reasons: &["consistency"],
            then: None,
        },
        // Orium Implement
        Patch {
            ids: &["item2002"],
            edits: &[
                Edit::Swap("<b>Implement</b>", "<b>Implement: </b>Orb, Rod, Staff, Wand"),
                Edit::Swap("<p class='mistat indent'><b>Requirement:</b> Orb, Rod, Staff, Wand</p>", ""),
            ],
            reasons: &["missing content"],
            then: None,
        },
        // Shivli, White Wyrmling
        Patch {
            ids: &["item2495"],
            edits: &[
                Edit::Swap(">+2<td class=mic3>0 gp<", ">+2<td class=mic3>3,400 gp<"),
                Edit::Swap(">+3<td class=mic3>0 gp<", ">+3<td class=mic3>17,000 gp<"),
                Edit::Swap(">+4<td class=mic3>0 gp<", ">+4<td class=mic3>85,000 gp<"),
                Edit::Swap(">+5<td class=mic3>0 gp<", ">+5<td class=mic3>425,000 gp<"),
                Edit::Swap(">+6<td class=mic3>0 gp<", ">+6<td class=mic3>2,125,000 gp<"),
                Edit::Meta("Cost", "3,400+ gp"),
            ],
            reasons: &["consistency"],
            then: None,
        },
        // Silver Hands of Power
        Patch {
            ids: &["item2511"],
            edits: &[
                Edit::Swap("<h2 class=mihead>Power", "<h2 class=mihead>Lvl 14<br>Power"),
                Edit::Swap(
                    "<p class='mistat indent1'><i>Level 19:</i> ",
                    "<h2 class=mihead>Lvl 19<br>Power ✦ Daily (Free Action)</h2>",
                ),
                Edit::Swap("Trigger: You", "<p class='mistat indent1'><i>Trigger:</i> You"),
                Edit::Swap(". Effect: ", "</p><p class='mistat indent1'><i>Effect:</i> "),
            ],
            reasons: &["formatting"],
            then: None,
        },
        // Vecna's Boon of Diabolical Choice: missing level, then the boon price fix
        Patch {
            ids: &["item2971"],
            edits: &[Edit::Swap("Level 0 Uncommon", "Level 24 Uncommon"), Edit::Meta("Level", "24")],
            reasons: &["missing content"],
            then: Some("item1806"),
        },
        // Boons priced at "+0 gp"
        Patch {
            ids: &["item1806", "item2469", "item2533", "item2995"],
            edits: &[Edit::SwapFirstWhileSet { slot: "Cost", from: " +0 gp", to: "" }, Edit::Meta("Cost", "")],
            reasons: &["consistency"],
            then: None,
        },
        // Scepter of the Chosen Tyrant
        Patch {
            ids: &["item3328"],
            edits: &[Edit::Swap("basic ranged attack", "ranged basic attack")],
            reasons: &["fix basic attack"],
            then: None,
        },
        // Sun's Sliver
        Patch {
            ids: &["item3331"],
            edits: &[
                Edit::Swap(">Level <", ">Epic Tier<"),
                Edit::Swap("<b>Wondrous Item</b>", "<b>Minor Artifact:</b> Wondrous Item"),
                Edit::Meta("Type", "Artifact"),
                Edit::Meta("Cost", ""),
            ],
            reasons: &["missing content"],
            then: None,
        },
        // The Fifth Sword of Tyr
        Patch {
            ids: &["item3415"],
            edits: &[Edit::Swap("Power (Teleportation) ✦ Daily", "Power (Weapon) ✦ Daily")],
            reasons: &["typo"],
            then: None,
        },
    ],
    default: &[Rule { reason: "missing power frequency", apply: bare_frequency }],
};
