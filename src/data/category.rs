// src/data/category.rs
use super::entry::Entry;
use crate::sort::Sorter;

/// A named group of records sharing one field schema and one sort order.
#[derive(Clone, Debug)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub fields: Vec<String>,
    meta_names: Option<Vec<String>>,
    pub entries: Vec<Entry>,
    /// Indexes into `entries`, in sort order. Grows only.
    order: Vec<usize>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields,
            meta_names: None,
            entries: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    /// Meta names; the raw field names until the converter fixes them.
    pub fn meta_names(&self) -> &[String] {
        self.meta_names.as_deref().unwrap_or(&self.fields)
    }

    /// Fix the meta names. Only the first call has any effect.
    pub(crate) fn init_meta_names(&mut self, names: Vec<String>) {
        if self.meta_names.is_none() {
            self.meta_names = Some(names);
        }
    }

    /// Positions into `entries`, in sort order.
    pub fn order(&self) -> &[usize] { &self.order }

    /// Insert `entries[index]` into the order. False if its key is taken.
    pub(crate) fn place(&mut self, sorter: &Sorter, index: usize) -> bool {
        sorter.insert(&self.entries, &mut self.order, index)
    }

    /// Converted entries in sort order.
    pub fn sorted(&self) -> impl Iterator<Item = &Entry> {
        self.order.iter().filter_map(|&i| self.entries.get(i))
    }

    /// Number of converted entries.
    pub fn count(&self) -> usize { self.order.len() }
}
