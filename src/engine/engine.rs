// src/engine/engine.rs
use crate::config::consts::{ANY_TYPE, ANY_TYPE_THRESHOLD};
use crate::core::sanitize::ucfirst;
use crate::data::{Entry, Schema};
use crate::engine::types::*;

/// Run one cascade against an entry: overrides first, then the first rule
/// whose probe fires, then the unmatched warning.
pub fn run(cascade: &Cascade, entry: &mut Entry, schema: &Schema) -> Outcome {
    let short_id = entry.short_id.as_str();
    if let Some(o) = cascade.overrides.iter().find(|o| o.ids.iter().any(|id| *id == short_id)) {
        logd!("{} {} set by override", entry.short_id, cascade.slot);
        for (slot, value) in o.sets {
            schema.set(entry, slot, *value);
        }
        return Outcome::Overridden;
    }

    for (i, rule) in cascade.rules.iter().enumerate() {
        let Some(hit) = probe(&rule.probe, entry, schema) else { continue };
        let mut value = resolve(&rule.value, hit.text, &entry.name);
        if let Some((_, to)) = rule.renames.iter().find(|(from, _)| *from == value) {
            value = s!(*to);
        }

        if cascade.collapse_any && value.split(", ").count() >= ANY_TYPE_THRESHOLD {
            if let Some(span) = hit.span {
                let mut data = s!(entry.data());
                data.replace_range(span, ANY_TYPE);
                entry.set_data(data);
            }
            value = s!(ANY_TYPE);
            entry.fix("consistency");
        }

        if !value.is_empty() {
            schema.set(entry, cascade.slot, value.as_str());
        }
        for (slot, v) in rule.sets {
            schema.set(entry, slot, *v);
        }
        for (slot, v) in rule.fills {
            if schema.text(entry, slot).is_empty() && schema.set(entry, slot, *v) {
                entry.fix("missing meta");
            }
        }
        if let Some(reason) = rule.reason {
            entry.fix(reason);
        }
        return Outcome::Matched { rule: i, value };
    }

    if let Some(msg) = cascade.unmatched {
        schema.set(entry, cascade.slot, "");
        entry.warn(msg);
    }
    Outcome::Unmatched
}

pub fn probe(probe: &Probe, entry: &Entry, schema: &Schema) -> Option<Hit> {
    let data = entry.data();
    match probe {
        Probe::Label(re) => {
            let caps = re.captures(data)?;
            let m = caps.get(1).or_else(|| caps.get(0))?;
            // Trim inside the span so a body rewrite keeps the surrounding spacing.
            let lead = m.as_str().len() - m.as_str().trim_start().len();
            let text = m.as_str().trim();
            let start = m.start() + lead;
            Some(Hit { text: s!(text), span: Some(start..start + text.len()) })
        }
        Probe::Scan { after, pattern } => {
            let region = &data[data.find(after)? + after.len()..];
            let found: Vec<&str> = pattern
                .captures_iter(region)
                .filter_map(|c| c.get(1).map(|m| m.as_str().trim()))
                .collect();
            Some(Hit { text: found.join(", "), span: None })
        }
        Probe::BodyHas(needles) => needles
            .iter()
            .all(|n| data.contains(n))
            .then(|| Hit { text: String::new(), span: None }),
        Probe::NameHas(needle) => entry
            .name
            .contains(needle)
            .then(|| Hit { text: String::new(), span: None }),
        Probe::SlotIs(slot, value) => (schema.text(entry, slot) == *value)
            .then(|| Hit { text: s!(*value), span: None }),
    }
}

fn resolve(value: &Value, captured: String, name: &str) -> String {
    match value {
        Value::Captured => captured,
        Value::Literal(v) => s!(*v),
        Value::Prefixed(prefix) => join!(*prefix, &captured),
        Value::NameTail => {
            let tail = match name.split_once(' ') {
                Some((head, rest)) if !head.is_empty() && head.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => rest,
                _ => name,
            };
            ucfirst(tail)
        }
        Value::NameWithout(suffix) => s!(name.strip_suffix(suffix).unwrap_or(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;
    use regex::Regex;

    static TYPE_LABEL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<b>Type</b>: ([A-Za-z, ]+)").expect("pattern"));

    static RULES: [Rule; 2] = [
        Rule::captured(Probe::Label(&TYPE_LABEL)).renames(&[("Plate", "Heavy")]),
        Rule::new(Probe::BodyHas(&["barding"]), Value::Literal("Barding")).sets(&[("Level", "Mundane")]),
    ];

    static OVERRIDES: [Override; 1] = [Override { ids: &["armor9"], sets: &[("Type", "Manual")] }];

    static CASCADE: Cascade = Cascade {
        slot: "Type",
        rules: &RULES,
        overrides: &OVERRIDES,
        collapse_any: true,
        unmatched: Some("Armor type not found"),
    };

    fn entry(id: &str, body: &str) -> (Entry, Schema) {
        let schema = Schema::from_static(&["Type", "Level"]);
        let mut e = Entry::new(format!("armor.aspx?id={id}"), "Test Armor", vec![s!(""), s!("")], Some(s!(body)));
        e.normalize_once();
        e.copy_meta_once(|f| f.iter().map(|s| s.as_str().into()).collect());
        (e, schema)
    }

    #[test]
    fn label_captures_and_renames() {
        let (mut e, schema) = entry("1", "<p><b>Type</b>: Plate</p>");
        assert_eq!(run(&CASCADE, &mut e, &schema), Outcome::Matched { rule: 0, value: s!("Heavy") });
        assert_eq!(schema.text(&e, "Type"), "Heavy");
    }

    #[test]
    fn override_beats_pattern() {
        let (mut e, schema) = entry("9", "<p><b>Type</b>: Plate</p>");
        assert_eq!(run(&CASCADE, &mut e, &schema), Outcome::Overridden);
        assert_eq!(schema.text(&e, "Type"), "Manual");
    }

    #[test]
    fn long_lists_collapse_to_any() {
        let (mut e, schema) = entry("2", "<p><b>Type</b>: Chain, cloth, hide, leather, plate or scale</p>");
        run(&CASCADE, &mut e, &schema);
        assert_eq!(schema.text(&e, "Type"), "Any");
        assert_eq!(e.data(), "<p><b>Type</b>: Any</p>");
        assert_eq!(e.corrections(), ["consistency"]);
    }

    #[test]
    fn later_rule_sets_extra_slots() {
        let (mut e, schema) = entry("3", "<p>Fits any barding.</p>");
        run(&CASCADE, &mut e, &schema);
        assert_eq!(schema.text(&e, "Type"), "Barding");
        assert_eq!(schema.text(&e, "Level"), "Mundane");
    }

    #[test]
    fn unmatched_blanks_and_warns() {
        let (mut e, schema) = entry("4", "<p>Nothing here</p>");
        schema.set(&mut e, "Type", "Stale");
        assert_eq!(run(&CASCADE, &mut e, &schema), Outcome::Unmatched);
        assert_eq!(schema.text(&e, "Type"), "");
        assert_eq!(e.warnings(), ["Armor type not found"]);
    }

    #[test]
    fn name_tail_drops_leading_word() {
        assert_eq!(resolve(&Value::NameTail, String::new(), "Superior symbol"), "Symbol");
        assert_eq!(resolve(&Value::NameWithout(" Implement"), String::new(), "Orb Implement"), "Orb");
    }

    #[test]
    fn name_tail_leading_word_is_ascii_only() {
        assert_eq!(resolve(&Value::NameTail, String::new(), "Accurate_2 rod"), "Rod");
        assert_eq!(resolve(&Value::NameTail, String::new(), "Épée wand"), "Épée wand");
    }
}
