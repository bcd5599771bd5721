// src/data/mod.rs
//
// Record shapes shared by every stage.
//
// - Entry: one record; raw fields and body are immutable, meta is the
//          mutable positional vector the classifier and catalog edit.
// - Category: entries plus the fixed meta names and the sort order.
// - Schema: name-based access to meta slots.

pub mod category;
pub mod entry;
pub mod meta;
pub mod schema;

pub use category::Category;
pub use entry::Entry;
pub use meta::MetaValue;
pub use schema::Schema;
