// src/catalog/poisons.rs
use super::{Catalog, Edit, Patch, Rule};
use crate::core::sanitize::swap_all;
use crate::data::{Entry, Schema};

fn published_class(entry: &mut Entry, _: &Schema) -> bool {
    let Some(data) = swap_all(entry.data(), "<p>Published in", "<p class=publishedIn>Published in") else {
        return false;
    };
    entry.set_data(data);
    true
}

pub static CATALOG: Catalog = Catalog {
    always: &[Rule { reason: "formatting", apply: published_class }],
    patches: &[
        // Granny's Grief
        Patch {
            ids: &["poison19"],
            edits: &[Edit::Swap(">Published in .<", ">Published in Dungeon Magazine 211.<")],
            reasons: &["missing published"],
            then: None,
        },
    ],
    default: &[],
};
