// src/families/trap.rs
//
// Traps and terrain share one layout: Type, Role, Level, SourceBook.

use super::Family;
use crate::catalog::{self, Catalog};
use crate::data::{Entry, MetaValue, Schema};

pub const TRAP_META: [&str; 4] = ["Type", "Role", "Level", "SourceBook"];

/// Role words some sources fused onto the type ("Elite Blaster").
const ROLE_PREFIXES: [&str; 4] = ["Minion ", "Elite ", "Solo ", "Single-Use "];

pub struct TrapFamily;

impl Family for TrapFamily {
    fn label(&self) -> &'static str {
        "trap"
    }

    fn meta_names(&self, _fields: &[String]) -> Vec<String> {
        TRAP_META.iter().map(|n| s!(*n)).collect()
    }

    /// Terrain records only have `[Type, SourceBook]`.
    fn reshape(&self, fields: &[String]) -> Vec<MetaValue> {
        match fields {
            [kind, source] => vec!["Terrain".into(), kind.as_str().into(), MetaValue::default(), source.as_str().into()],
            _ => {
                let mut meta: Vec<MetaValue> = fields.iter().map(|f| MetaValue::from(f.as_str())).collect();
                meta.resize(TRAP_META.len(), MetaValue::default());
                meta
            }
        }
    }

    fn classify(&self, entry: &mut Entry, schema: &Schema) {
        let kind = s!(schema.text(entry, "Type"));
        if let Some(role) = ROLE_PREFIXES.iter().find(|p| kind.starts_with(*p)) {
            schema.set(entry, "Role", role.trim_end());
            schema.set(entry, "Type", &kind[role.len()..]);
            entry.fix("wrong meta");
            return;
        }
        // Dungeon 214-215 put the minion role on the level ("8 Minion").
        let level = s!(schema.text(entry, "Level"));
        if let Some(level) = level.strip_suffix(" Minion") {
            schema.set(entry, "Role", "Minion");
            schema.set(entry, "Level", level);
            entry.fix("wrong meta");
        }
    }

    fn corrections(&self) -> Option<&'static Catalog> {
        Some(&catalog::traps::CATALOG)
    }

    fn secondary_key(&self) -> Option<&'static str> {
        Some("Type")
    }
}
