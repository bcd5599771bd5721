// src/data/meta.rs
use serde::{Deserialize, Serialize};

/// One positional metadata slot: a scalar, or after tier expansion an
/// ordered list whose first element is the original scalar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Scalar view. Lists answer with their first element.
    pub fn as_text(&self) -> &str {
        match self {
            MetaValue::Text(s) => s,
            MetaValue::List(v) => v.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, MetaValue::List(_))
    }
}

impl Default for MetaValue {
    fn default() -> Self {
        MetaValue::Text(s!())
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s!(s))
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Text(s)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(v: Vec<String>) -> Self {
        MetaValue::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_reads_as_first_element() {
        let v = MetaValue::from(vec![s!("5+"), s!("10")]);
        assert_eq!(v.as_text(), "5+");
        assert!(v.is_list());
        assert_eq!(MetaValue::List(Vec::new()).as_text(), "");
    }

    #[test]
    fn serializes_untagged() {
        let row = vec![MetaValue::from("Armor"), MetaValue::from(vec![s!("5+"), s!("10")])];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"["Armor",["5+","10"]]"#);
    }
}
