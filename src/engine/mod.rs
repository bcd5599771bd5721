// src/engine/mod.rs
//
// Classification as data: a `Cascade` is an ordered rule list plus a manual
// override table for one meta slot; `run` interprets it against an entry.
pub mod engine;
pub mod types;

pub use engine::run;
pub use types::{Cascade, Hit, Outcome, Override, Probe, Rule, Value};
