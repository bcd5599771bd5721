// src/data/entry.rs
use super::meta::MetaValue;
use crate::core::html;

/// One compendium record.
///
/// Raw fields and body are fixed at construction. The derived body, text
/// and meta are filled in by the converter; corrections and warnings only
/// ever grow.
#[derive(Clone, Debug)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub short_id: String,
    fields: Vec<String>,
    content: Option<String>,
    data: Option<String>,
    full_text: Option<String>,
    pub meta: Vec<MetaValue>,
    corrections: Vec<String>,
    warnings: Vec<String>,
}

impl Entry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<String>,
        content: Option<String>,
    ) -> Self {
        let id = id.into();
        let name = name.into();
        Self {
            display_name: name.replace('’', "'"),
            short_id: id.replace(".aspx?id=", ""),
            id,
            name,
            fields,
            content,
            data: None,
            full_text: None,
            meta: Vec::new(),
            corrections: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[String] { &self.fields }

    /// Raw body, `None` (or blank) when the store never delivered one.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Normalised display body; empty before conversion.
    pub fn data(&self) -> &str { self.data.as_deref().unwrap_or("") }

    pub fn set_data(&mut self, data: String) { self.data = Some(data); }

    /// Search text; empty before conversion.
    pub fn full_text(&self) -> &str { self.full_text.as_deref().unwrap_or("") }

    pub fn corrections(&self) -> &[String] { &self.corrections }

    pub fn warnings(&self) -> &[String] { &self.warnings }

    pub fn is_converted(&self) -> bool { self.data.is_some() }

    /// Normalise the raw body once; later calls keep the cached result.
    pub(crate) fn normalize_once(&mut self) {
        if self.data.is_none() {
            let raw = self.content.as_deref().unwrap_or("");
            self.data = Some(html::normalize(raw));
        }
    }

    /// Extract search text once from `source` (the display body, or a
    /// family-specific trimmed view of it).
    pub(crate) fn extract_once(&mut self, source: &str) {
        if self.full_text.is_none() {
            self.full_text = Some(html::extract_text(source));
        }
    }

    /// Start meta as a copy of the raw fields unless already present.
    pub(crate) fn copy_meta_once(&mut self, reshape: impl FnOnce(&[String]) -> Vec<MetaValue>) {
        if self.meta.is_empty() {
            self.meta = reshape(&self.fields);
        }
    }

    /// Record a deliberate deviation from the source.
    pub fn fix(&mut self, reason: &str) {
        self.corrections.push(s!(reason));
    }

    /// Record a non-fatal problem against this entry.
    pub fn warn(&mut self, msg: &str) {
        logw!("{msg} in {} ({})", self.id, self.name);
        self.warnings.push(s!(msg));
    }

    /// Scalar view of meta slot `i`, empty when out of range.
    pub fn meta_text(&self, i: usize) -> &str {
        self.meta.get(i).map(MetaValue::as_text).unwrap_or("")
    }

    /// Overwrite meta slot `i`. Returns whether the value changed.
    pub fn set_meta(&mut self, i: usize, value: impl Into<MetaValue>) -> bool {
        let value = value.into();
        match self.meta.get_mut(i) {
            Some(slot) if *slot == value => false,
            Some(slot) => { *slot = value; true }
            None => {
                logd!("meta slot {i} out of range for {}", self.id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry::new("item.aspx?id=439", "Xenda-Dran’s Array", vec![s!("Item Set"), s!("")], Some(s!("<p>x</p>")))
    }

    #[test]
    fn derives_display_name_and_short_id() {
        let e = entry();
        assert_eq!(e.display_name, "Xenda-Dran's Array");
        assert_eq!(e.short_id, "item439");
    }

    #[test]
    fn blank_content_counts_as_missing() {
        let e = Entry::new("x.aspx?id=1", "X", Vec::new(), Some(s!("  ")));
        assert!(e.content().is_none());
    }

    #[test]
    fn normalisation_is_cached() {
        let mut e = entry();
        e.normalize_once();
        e.set_data(s!("patched"));
        e.normalize_once();
        assert_eq!(e.data(), "patched");
    }

    #[test]
    fn set_meta_reports_change() {
        let mut e = entry();
        e.copy_meta_once(|f| f.iter().map(|s| MetaValue::from(s.as_str())).collect());
        assert!(e.set_meta(1, "Assassin"));
        assert!(!e.set_meta(1, "Assassin"));
        assert!(!e.set_meta(9, "nowhere"));
        assert_eq!(e.meta_text(1), "Assassin");
    }
}
