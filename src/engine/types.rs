// src/engine/types.rs
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Where a rule looks for its evidence.
pub enum Probe {
    /// First match of a label pattern. Group 1 is the value when the pattern
    /// has one, the whole match otherwise.
    Label(&'static LazyLock<Regex>),
    /// Group 1 of every match in the body after the `after` marker, joined
    /// with ", ". Fires whenever the marker is present, even with no matches.
    Scan { after: &'static str, pattern: &'static LazyLock<Regex> },
    /// Every needle occurs in the body.
    BodyHas(&'static [&'static str]),
    /// The record name contains the needle.
    NameHas(&'static str),
    /// A meta slot currently holds exactly this value.
    SlotIs(&'static str, &'static str),
}

/// What a firing rule writes to the cascade's slot.
pub enum Value {
    /// The probe's captured text.
    Captured,
    Literal(&'static str),
    /// The probe's captured text behind a fixed prefix.
    Prefixed(&'static str),
    /// Record name minus its leading word, first letter uppercased.
    NameTail,
    /// Record name minus a trailing suffix.
    NameWithout(&'static str),
}

/// One step of a cascade. Data only; `engine::run` interprets it.
pub struct Rule {
    pub probe: Probe,
    pub value: Value,
    /// Exact-value renames applied to the result.
    pub renames: &'static [(&'static str, &'static str)],
    /// Other slots overwritten when the rule fires.
    pub sets: &'static [(&'static str, &'static str)],
    /// Other slots filled only when blank, logged as "missing meta".
    pub fills: &'static [(&'static str, &'static str)],
    /// Correction reason logged when the rule fires.
    pub reason: Option<&'static str>,
}

impl Rule {
    pub const fn new(probe: Probe, value: Value) -> Self {
        Self { probe, value, renames: &[], sets: &[], fills: &[], reason: None }
    }

    pub const fn captured(probe: Probe) -> Self {
        Self::new(probe, Value::Captured)
    }

    pub const fn renames(mut self, renames: &'static [(&'static str, &'static str)]) -> Self {
        self.renames = renames;
        self
    }

    pub const fn sets(mut self, sets: &'static [(&'static str, &'static str)]) -> Self {
        self.sets = sets;
        self
    }

    pub const fn fills(mut self, fills: &'static [(&'static str, &'static str)]) -> Self {
        self.fills = fills;
        self
    }

    pub const fn reason(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }
}

/// Manual classification keyed by short id. Wins over every rule.
pub struct Override {
    pub ids: &'static [&'static str],
    pub sets: &'static [(&'static str, &'static str)],
}

/// Ordered rules for one meta slot plus the manual override table.
pub struct Cascade {
    pub slot: &'static str,
    pub rules: &'static [Rule],
    pub overrides: &'static [Override],
    /// Collapse long alternative lists to `Any`, rewriting the body too.
    pub collapse_any: bool,
    /// Warning raised (and slot blanked) when nothing matched. `None` keeps
    /// the cascade silent and the slot untouched.
    pub unmatched: Option<&'static str>,
}

/// Evidence produced by a probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub text: String,
    /// Byte range of `text` in the body, when it came from there.
    pub span: Option<Range<usize>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Overridden,
    /// Index of the rule that fired and the value it produced (possibly empty).
    Matched { rule: usize, value: String },
    Unmatched,
}
