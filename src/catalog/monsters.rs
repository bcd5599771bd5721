// src/catalog/monsters.rs
use super::{Catalog, Edit, Patch, Rule};
use crate::core::sanitize::swap_all;
use crate::data::{Entry, Schema};

fn basic_melee(entry: &mut Entry, _: &Schema) -> bool {
    let Some(data) = swap_all(entry.data(), "basic melee attack", "melee basic attack") else { return false };
    entry.set_data(data);
    true
}

pub static CATALOG: Catalog = Catalog {
    always: &[],
    patches: &[
        // Cambion Stalwart
        Patch { ids: &["monster2248"], edits: &[Edit::Swap("bit points", "hit points")], reasons: &["typo"], then: None },
        // Veln, Demon Furor
        Patch {
            ids: &["monster3222", "monster3931"],
            edits: &[Edit::Swap("basic melee or basic ranged attack", "melee or ranged basic attack")],
            reasons: &["basic attack correction"],
            then: None,
        },
    ],
    default: &[Rule { reason: "basic attack correction", apply: basic_melee }],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(id: &str, body: &str) -> Entry {
        let mut e = Entry::new(format!("monster.aspx?id={id}"), "M", Vec::new(), Some(s!(body)));
        e.normalize_once();
        CATALOG.apply(&mut e, &Schema::default());
        e
    }

    #[test]
    fn basic_attack_wording() {
        let e = apply("1", "<p>Make a basic melee attack.</p>");
        assert_eq!(e.data(), "<p>Make a melee basic attack.</p>");
        assert_eq!(e.corrections(), ["basic attack correction"]);
        let e = apply("3222", "<p>a basic melee or basic ranged attack</p>");
        assert_eq!(e.data(), "<p>a melee or ranged basic attack</p>");
    }

    #[test]
    fn untouched_monster_has_no_log() {
        let e = apply("2", "<p>Claw</p>");
        assert!(e.corrections().is_empty());
    }
}
