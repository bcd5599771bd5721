// src/catalog/traps.rs
//
// Runs after classification, so patches set Type and Role directly.
use super::{Catalog, Edit, Patch};

pub static CATALOG: Catalog = Catalog {
    always: &[],
    patches: &[
        // Rubble Topple
        Patch {
            ids: &["trap1019"],
            edits: &[
                Edit::Swap("Singe-Use", "Single-Use"),
                Edit::Meta("Type", "Terrain"),
                Edit::Meta("Role", "Single-Use"),
            ],
            reasons: &["typo", "wrong meta"],
            then: None,
        },
    ],
    default: &[],
};
