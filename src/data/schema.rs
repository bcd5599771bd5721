// src/data/schema.rs
use super::entry::Entry;
use super::meta::MetaValue;

/// Name → position lookup over a category's meta names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
}

impl Schema {
    pub fn new(names: &[String]) -> Self {
        Self { names: names.to_vec() }
    }

    pub fn from_static(names: &[&str]) -> Self {
        Self { names: names.iter().map(|s| s!(*s)).collect() }
    }

    pub fn names(&self) -> &[String] { &self.names }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Scalar value of the named slot; empty when the slot does not exist.
    pub fn text<'e>(&self, entry: &'e Entry, name: &str) -> &'e str {
        self.index(name).map(|i| entry.meta_text(i)).unwrap_or("")
    }

    /// Set the named slot. Unknown names are ignored and report no change.
    pub fn set(&self, entry: &mut Entry, name: &str, value: impl Into<MetaValue>) -> bool {
        match self.index(name) {
            Some(i) => entry.set_meta(i, value),
            None => {
                logd!("no meta slot {name} for {}", entry.id);
                false
            }
        }
    }
}
