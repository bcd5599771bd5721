// src/runner.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::options::ConvertOptions;
use crate::core::html;
use crate::data::{Category, Entry, Schema};
use crate::error::ConvertError;
use crate::families::{self, Family};
use crate::level::LevelRanks;
use crate::progress::Progress;
use crate::sort::Sorter;
use crate::tiers;

/// What one category conversion did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub category: String,
    pub converted: usize,
    /// Entries in the category order after the run.
    pub ordered: usize,
    /// Correction reason → number of entries carrying it.
    pub corrections: BTreeMap<String, usize>,
    pub warnings: usize,
}

impl Summary {
    fn new(category: &str) -> Self {
        Self { category: s!(category), ..Self::default() }
    }

    fn record(&mut self, entry: &Entry) {
        self.converted += 1;
        self.warnings += entry.warnings().len();
        for reason in entry.corrections() {
            *self.corrections.entry(reason.clone()).or_default() += 1;
        }
    }
}

/// Batch converter. Holds the options and the level-rank cache shared by
/// every category it converts.
pub struct Converter {
    options: ConvertOptions,
    ranks: Arc<LevelRanks>,
}

impl Converter {
    /// Uses the process-wide rank cache.
    pub fn new(options: ConvertOptions) -> Self {
        Self::with_ranks(options, LevelRanks::shared())
    }

    pub fn with_ranks(options: ConvertOptions, ranks: Arc<LevelRanks>) -> Self {
        Self { options, ranks }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn ranks(&self) -> &Arc<LevelRanks> {
        &self.ranks
    }

    /// Convert every entry of one category, in input order, and place each
    /// into the category order as it completes.
    ///
    /// An entry without content aborts the batch with
    /// `ConvertError::MissingContent`; entries converted before it keep
    /// their place in the order.
    pub fn convert(
        &self,
        category: &mut Category,
        mut progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<Summary, ConvertError> {
        let family = families::for_category(&category.id);
        category.init_meta_names(family.meta_names(&category.fields));
        let schema = Schema::new(category.meta_names());
        let sorter = Sorter::new(&schema, family.secondary_key(), Arc::clone(&self.ranks));

        let total = category.entries.len();
        logf!("Converting {} ({} entries, {} family)", category.name, total, family.label());
        if let Some(p) = progress.as_deref_mut() {
            p.begin(total);
        }

        let mut summary = Summary::new(&category.id);
        let cadence = self.options.cadence();
        let mut result = Ok(());
        for i in 0..total {
            let entry = &mut category.entries[i];
            if let Err(e) = convert_entry(family, entry, &schema, &category.name, self.options.debug) {
                loge!("{e}; aborting {}", category.name);
                result = Err(e);
                break;
            }
            summary.record(entry);
            if !category.place(&sorter, i) {
                logd!("{} already placed", category.entries[i].id);
            }

            let done = i + 1;
            if done % cadence == 0 || done == total {
                if let Some(p) = progress.as_deref_mut() {
                    p.advance(done, total);
                }
            }
        }

        summary.ordered = category.count();
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        result?;

        logf!(
            "Converted {} {} ({} corrected, {} warnings)",
            summary.converted,
            category.name,
            summary.corrections.values().sum::<usize>(),
            summary.warnings
        );
        Ok(summary)
    }

    /// Convert categories in order; stops at the first failing category.
    pub fn convert_catalog(
        &self,
        categories: &mut [Category],
        mut progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<Vec<Summary>, ConvertError> {
        let mut out = Vec::with_capacity(categories.len());
        for category in categories.iter_mut() {
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Converting {}", category.name));
            }
            out.push(self.convert(category, progress.as_deref_mut())?);
        }
        Ok(out)
    }
}

/// Run the per-entry pipeline: normalise, extract text, shape meta,
/// classify, correct, expand tiers.
pub fn convert_entry(
    family: &dyn Family,
    entry: &mut Entry,
    schema: &Schema,
    category: &str,
    debug: bool,
) -> Result<(), ConvertError> {
    if entry.content().is_none() {
        return Err(ConvertError::MissingContent {
            id: entry.id.clone(),
            name: entry.name.clone(),
            category: s!(category),
        });
    }

    // Classification reads the raw meta it rewrites; a second pass would
    // classify its own output.
    if entry.is_converted() {
        logd!("{} already converted", entry.id);
        return Ok(());
    }

    entry.short_id = family.short_id(&entry.short_id);
    entry.normalize_once();
    let source = family.text_source(entry.data()).into_owned();
    entry.extract_once(&source);

    if debug {
        if html::has_leftover_markup(entry.data()) {
            logw!("Unremoved image or link in {} ({})", entry.id, entry.name);
        }
        if html::has_leftover_tags(entry.full_text()) {
            logw!("Unremoved html tag in full text of {} ({})", entry.id, entry.name);
        }
    }

    entry.copy_meta_once(|fields| family.reshape(fields));
    family.classify(entry, schema);
    if let Some(catalog) = family.corrections() {
        catalog.apply(entry, schema);
    }
    if family.expands_tiers(entry, schema) {
        tiers::expand(entry, schema, debug);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;

    #[derive(Default)]
    struct Recorder {
        began: Option<usize>,
        ticks: Vec<usize>,
        logs: Vec<String>,
        finished: bool,
    }

    impl Progress for Recorder {
        fn begin(&mut self, total: usize) {
            self.began = Some(total);
        }
        fn log(&mut self, msg: &str) {
            self.logs.push(s!(msg));
        }
        fn advance(&mut self, done: usize, _total: usize) {
            self.ticks.push(done);
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    fn ritual(id: usize, level: &str) -> Entry {
        Entry::new(format!("ritual.aspx?id={id}"), format!("Ritual {id:02}"), vec![s!(level)], Some(s!("<p>Chant</p>")))
    }

    #[test]
    fn progress_ticks_at_cadence_and_on_last() {
        let entries = (1..=5).map(|i| ritual(i, "1")).collect();
        let mut category = Category::new("Ritual", "Rituals", vec![s!("Level")]).with_entries(entries);
        let converter = Converter::with_ranks(
            ConvertOptions { debug: false, progress_every: 2 },
            Arc::new(LevelRanks::new()),
        );
        let mut rec = Recorder::default();
        let summary = converter.convert(&mut category, Some(&mut rec)).unwrap();
        assert_eq!(rec.began, Some(5));
        assert_eq!(rec.ticks, [2, 4, 5]);
        assert!(rec.finished);
        assert_eq!(summary.converted, 5);
        assert_eq!(summary.ordered, 5);
    }

    #[test]
    fn summary_counts_reasons() {
        let body = "<p>Make a basic melee attack.</p>";
        let entries = vec![
            Entry::new("monster.aspx?id=1", "Orc", vec![s!("1")], Some(s!(body))),
            Entry::new("monster.aspx?id=2", "Goblin", vec![s!("1")], Some(s!(body))),
        ];
        let mut category = Category::new("Monster", "Monsters", vec![s!("Level")]).with_entries(entries);
        let summary = Converter::new(ConvertOptions::default()).convert(&mut category, None).unwrap();
        assert_eq!(summary.corrections.get("basic attack correction"), Some(&2));
        let names: Vec<&str> = category.sorted().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Goblin", "Orc"]);
    }

    #[test]
    fn catalog_reports_each_category_to_one_sink() {
        let mut categories = vec![
            Category::new("Ritual", "Rituals", vec![s!("Level")]).with_entries(vec![ritual(1, "1")]),
            Category::new("Feat", "Feats", vec![s!("Level")]).with_entries(vec![ritual(2, "Heroic")]),
        ];
        let converter = Converter::with_ranks(ConvertOptions::default(), Arc::new(LevelRanks::new()));
        let mut rec = Recorder::default();
        let summaries = converter.convert_catalog(&mut categories, Some(&mut rec)).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(rec.logs, ["Converting Rituals", "Converting Feats"]);
        assert_eq!(rec.ticks, [1, 1]);
    }
}
