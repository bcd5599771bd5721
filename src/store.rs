// src/store.rs
//
// JSON file adapter standing in for the record store.
//
// Input:  { "categories": [ { id, name, fields, entries: [ { id, name, fields, content } ] } ] }
// Output: the same categories with meta names, count, and converted entries
//         in category order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{Category, Entry, MetaValue};
use crate::error::StoreError;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    name: String,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    name: String,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct OutCatalog<'a> {
    categories: Vec<OutCategory<'a>>,
}

#[derive(Serialize)]
struct OutCategory<'a> {
    id: &'a str,
    name: &'a str,
    meta_names: &'a [String],
    count: usize,
    entries: Vec<OutEntry<'a>>,
}

#[derive(Serialize)]
struct OutEntry<'a> {
    id: &'a str,
    name: &'a str,
    display_name: &'a str,
    short_id: &'a str,
    data: &'a str,
    full_text: &'a str,
    meta: &'a [MetaValue],
    corrections: &'a [String],
    warnings: &'a [String],
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        let entries = raw
            .entries
            .into_iter()
            .map(|e| Entry::new(e.id, e.name, e.fields, e.content))
            .collect();
        Category::new(raw.id, raw.name, raw.fields).with_entries(entries)
    }
}

impl<'a> From<&'a Category> for OutCategory<'a> {
    fn from(c: &'a Category) -> Self {
        OutCategory {
            id: &c.id,
            name: &c.name,
            meta_names: c.meta_names(),
            count: c.count(),
            entries: c
                .sorted()
                .map(|e| OutEntry {
                    id: &e.id,
                    name: &e.name,
                    display_name: &e.display_name,
                    short_id: &e.short_id,
                    data: e.data(),
                    full_text: e.full_text(),
                    meta: &e.meta,
                    corrections: e.corrections(),
                    warnings: e.warnings(),
                })
                .collect(),
        }
    }
}

pub fn parse(text: &str) -> Result<Vec<Category>, serde_json::Error> {
    let raw: RawCatalog = serde_json::from_str(text)?;
    Ok(raw.categories.into_iter().map(Category::from).collect())
}

pub fn to_json(categories: &[Category]) -> Result<String, serde_json::Error> {
    let out = OutCatalog { categories: categories.iter().map(OutCategory::from).collect() };
    serde_json::to_string_pretty(&out)
}

pub fn load(path: &Path) -> Result<Vec<Category>, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Read { path: path.to_path_buf(), source })?;
    let categories = parse(&text).map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
    logf!(
        "Loaded {} categories ({} entries) from {}",
        categories.len(),
        categories.iter().map(|c| c.entries.len()).sum::<usize>(),
        path.display()
    );
    Ok(categories)
}

pub fn save(path: &Path, categories: &[Category]) -> Result<(), StoreError> {
    let json = to_json(categories).map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
    let write = |source| StoreError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write)?;
        }
    }
    fs::write(path, json).map_err(write)?;
    logd!("Saved {} categories to {}", categories.len(), path.display());
    Ok(())
}
