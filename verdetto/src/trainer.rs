use std::str::FromStr;

use hashbrown::{HashMap, HashSet};

use crate::document::{Document, Polarity};
use crate::feature::NgramExtractor;
use crate::model::{Decision, Model};

/// Maximum contribution of one feature to its class count per document
/// under [`CountingMode::Hybrid`].
pub const HYBRID_COUNT_CAP: f64 = 2.0;

/// Decisions whose log-likelihood falls below this value are not emitted
/// into the model.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.1;

const NGRAM_SIZE: usize = 2;

/// Feature counting policy. One policy governs an entire training run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountingMode {
    /// Every n-gram occurrence in a document counts.
    Frequency,

    /// Each distinct n-gram counts at most once per document, so counts
    /// reflect the number of documents containing the feature.
    Presence,

    /// Occurrences count up to a per-document cap of [`HYBRID_COUNT_CAP`].
    Hybrid,
}

impl FromStr for CountingMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frequency" => Ok(Self::Frequency),
            "presence" => Ok(Self::Presence),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err("Unsupported counting mode."),
        }
    }
}

#[derive(Default)]
struct FeatureCounts {
    n_positive: f64,
    n_negative: f64,
}

/// Feature table preserving first-arrival order, so that the final sorted
/// output never depends on hash-map traversal order.
struct FeatureTable {
    ids: HashMap<String, usize>,
    features: Vec<String>,
    counts: Vec<FeatureCounts>,
}

impl FeatureTable {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            features: vec![],
            counts: vec![],
        }
    }

    fn get_id(&mut self, feature: &str) -> usize {
        if let Some(&id) = self.ids.get(feature) {
            id
        } else {
            let id = self.counts.len();
            self.ids.insert(feature.to_string(), id);
            self.features.push(feature.to_string());
            self.counts.push(FeatureCounts::default());
            id
        }
    }

    fn add(&mut self, id: usize, polarity: Polarity, amount: f64) {
        match polarity {
            Polarity::Positive => self.counts[id].n_positive += amount,
            Polarity::Negative => self.counts[id].n_negative += amount,
        }
    }

    fn len(&self) -> usize {
        self.counts.len()
    }
}

/// Trainer.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::io::{prelude::*, BufReader, BufWriter};
///
/// use verdetto::{CountingMode, Document, Preprocessor, Trainer};
///
/// let preprocessor = Preprocessor::default();
/// let mut trainer = Trainer::new(CountingMode::Frequency);
///
/// let f = BufReader::new(File::open("dataset-train.txt").unwrap());
/// for line in f.lines() {
///     let (doc, polarity) =
///         Document::from_labeled_line(&line.unwrap(), &preprocessor).unwrap();
///     trainer.add_example(&doc, polarity);
/// }
///
/// let model = trainer.train();
/// let mut f = BufWriter::new(File::create("model.txt").unwrap());
/// model.write(&mut f).unwrap();
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "train")))]
pub struct Trainer {
    extractor: NgramExtractor,
    mode: CountingMode,
    score_threshold: f64,
    table: FeatureTable,
}

impl Trainer {
    /// Creates a new trainer.
    ///
    /// # Arguments
    ///
    /// * `mode` - The counting policy for the whole run.
    ///
    /// # Returns
    ///
    /// A new trainer.
    pub fn new(mode: CountingMode) -> Self {
        Self {
            extractor: NgramExtractor::new(NGRAM_SIZE),
            mode,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            table: FeatureTable::new(),
        }
    }

    /// Overrides the emission threshold.
    ///
    /// # Arguments
    ///
    /// * `score_threshold` - Minimum log-likelihood a decision must reach
    ///   to be emitted into the model.
    pub fn score_threshold(mut self, score_threshold: f64) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    /// Folds one labeled document into the feature table.
    ///
    /// # Arguments
    ///
    /// * `doc` - A preprocessed document.
    /// * `polarity` - The known class of the document.
    pub fn add_example(&mut self, doc: &Document, polarity: Polarity) {
        match self.mode {
            CountingMode::Frequency => {
                for feature in self.extractor.extract(doc) {
                    let id = self.table.get_id(&feature);
                    self.table.add(id, polarity, 1.0);
                }
            }
            CountingMode::Presence => {
                // The distinct set is collected first and folded in only
                // after the whole document has been processed. The ordered
                // vector keeps arrival order independent of set traversal.
                let mut seen = HashSet::new();
                let mut distinct = vec![];
                for feature in self.extractor.extract(doc) {
                    if seen.insert(feature.clone()) {
                        distinct.push(feature);
                    }
                }
                for feature in distinct {
                    let id = self.table.get_id(&feature);
                    self.table.add(id, polarity, 1.0);
                }
            }
            CountingMode::Hybrid => {
                // Document-local sub-counts, capped per feature, merged
                // into the global table by summation afterwards.
                let mut ids = HashMap::new();
                let mut local: Vec<(String, f64)> = vec![];
                for feature in self.extractor.extract(doc) {
                    if let Some(&id) = ids.get(&feature) {
                        let (_, count) = &mut local[id];
                        if *count < HYBRID_COUNT_CAP {
                            *count += 1.0;
                        }
                    } else {
                        ids.insert(feature.clone(), local.len());
                        local.push((feature, 1.0));
                    }
                }
                for (feature, amount) in local {
                    let id = self.table.get_id(&feature);
                    self.table.add(id, polarity, amount);
                }
            }
        }
    }

    /// Gets the number of distinct features observed so far.
    ///
    /// # Returns
    ///
    /// The number of features.
    pub fn n_features(&self) -> usize {
        self.table.len()
    }

    /// Scores every feature, sorts by descending log-likelihood, drops
    /// decisions below the emission threshold, and returns the model.
    ///
    /// # Returns
    ///
    /// A trained model.
    pub fn train(self) -> Model {
        let mut decisions = Vec::with_capacity(self.table.len());
        for (feature, counts) in self.table.features.into_iter().zip(self.table.counts) {
            let score = log_likelihood(counts.n_positive, counts.n_negative);
            // The class is taken from the sign before the magnitude
            // overwrites it; these two steps must stay in this order.
            let polarity = if score > 0.0 {
                Polarity::Positive
            } else {
                Polarity::Negative
            };
            let log_likelihood = score.abs();
            decisions.push(Decision {
                feature,
                log_likelihood,
                polarity,
            });
        }
        // sort_by is stable, so ties keep first-arrival order.
        decisions.sort_by(|a, b| b.log_likelihood.total_cmp(&a.log_likelihood));
        decisions.retain(|d| d.log_likelihood >= self.score_threshold);
        Model { decisions }
    }
}

/// Signed, smoothed base-2 log ratio of positive to negative evidence.
/// Add-one smoothing is applied only to a zero side; features with evidence
/// on both sides are left unsmoothed.
fn log_likelihood(n_positive: f64, n_negative: f64) -> f64 {
    if n_positive == 0.0 {
        let total = n_negative + 2.0;
        ((1.0 / total) / ((n_negative + 1.0) / total)).log2()
    } else if n_negative == 0.0 {
        let total = n_positive + 2.0;
        (((n_positive + 1.0) / total) / (1.0 / total)).log2()
    } else {
        let total = n_positive + n_negative;
        ((n_positive / total) / (n_negative / total)).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Preprocessor;

    fn single_doc_model(text: &str, polarity: Polarity, mode: CountingMode) -> Model {
        let p = Preprocessor::default();
        let mut trainer = Trainer::new(mode).score_threshold(0.0);
        trainer.add_example(&Document::from_raw("d1", text, &p), polarity);
        trainer.train()
    }

    fn find_score(model: &Model, feature: &str) -> f64 {
        model
            .decisions()
            .iter()
            .find(|d| d.feature() == feature)
            .unwrap()
            .log_likelihood()
    }

    #[test]
    fn test_feature_table_arrival_order() {
        let mut table = FeatureTable::new();
        assert_eq!(0, table.get_id("b"));
        assert_eq!(1, table.get_id("c"));
        assert_eq!(0, table.get_id("b"));
        assert_eq!(vec!["b".to_string(), "c".to_string()], table.features);
    }

    #[test]
    fn test_frequency_counting() {
        // "fun" occurs 3 times; P = 3, N = 0 gives log2((4/5)/(1/5)) = 2.
        let model = single_doc_model("fun fun fun", Polarity::Positive, CountingMode::Frequency);
        assert_eq!(2.0, find_score(&model, "fun"));
    }

    #[test]
    fn test_presence_counting() {
        // P = 1, N = 0 gives log2((2/3)/(1/3)) = 1.
        let model = single_doc_model("fun fun fun", Polarity::Positive, CountingMode::Presence);
        assert_eq!(1.0, find_score(&model, "fun"));
    }

    #[test]
    fn test_hybrid_counting() {
        // Capped at 2; P = 2, N = 0 gives log2((3/4)/(1/4)) = log2(3).
        let model = single_doc_model("fun fun fun", Polarity::Positive, CountingMode::Hybrid);
        assert_eq!(3f64.log2(), find_score(&model, "fun"));
    }

    #[test]
    fn test_hybrid_merges_across_documents() {
        // The cap is per document; three documents contribute 2 each.
        let p = Preprocessor::default();
        let mut trainer = Trainer::new(CountingMode::Hybrid).score_threshold(0.0);
        for id in 0..3 {
            trainer.add_example(
                &Document::from_raw(format!("d{id}"), "fun fun fun", &p),
                Polarity::Positive,
            );
        }
        let model = trainer.train();
        // P = 6, N = 0 gives log2((7/8)/(1/8)) = log2(7).
        assert_eq!(7f64.log2(), find_score(&model, "fun"));
    }

    #[test]
    fn test_smoothing_positive_only() {
        let p = Preprocessor::default();
        let mut trainer = Trainer::new(CountingMode::Frequency);
        for id in 0..5 {
            trainer.add_example(
                &Document::from_raw(format!("d{id}"), "great", &p),
                Polarity::Positive,
            );
        }
        let model = trainer.train();
        let decision = &model.decisions()[0];
        assert_eq!("great", decision.feature());
        assert_eq!(6f64.log2(), decision.log_likelihood());
        assert_eq!(Polarity::Positive, decision.polarity());
    }

    #[test]
    fn test_balanced_counts_score_zero_negative() {
        let p = Preprocessor::default();
        let mut trainer = Trainer::new(CountingMode::Frequency).score_threshold(0.0);
        trainer.add_example(&Document::from_raw("d1", "so", &p), Polarity::Positive);
        trainer.add_example(&Document::from_raw("d2", "so", &p), Polarity::Negative);
        let model = trainer.train();
        let decision = &model.decisions()[0];
        assert_eq!(0.0, decision.log_likelihood());
        assert_eq!(Polarity::Negative, decision.polarity());
    }

    #[test]
    fn test_threshold_drops_weak_decisions() {
        let p = Preprocessor::default();
        let mut trainer = Trainer::new(CountingMode::Frequency);
        trainer.add_example(&Document::from_raw("d1", "so", &p), Polarity::Positive);
        trainer.add_example(&Document::from_raw("d2", "so", &p), Polarity::Negative);
        trainer.add_example(&Document::from_raw("d3", "great", &p), Polarity::Positive);
        let model = trainer.train();
        assert_eq!(1, model.decisions().len());
        assert_eq!("great", model.decisions()[0].feature());
    }

    #[test]
    fn test_sort_stability_on_ties() {
        // All three features score identically; arrival order must survive.
        let model = single_doc_model("good fine", Polarity::Positive, CountingMode::Frequency);
        let features: Vec<_> = model.decisions().iter().map(|d| d.feature()).collect();
        assert_eq!(vec!["good", "fine", "good fine"], features);
    }

    #[test]
    fn test_sort_descending() {
        let p = Preprocessor::default();
        let mut trainer = Trainer::new(CountingMode::Frequency);
        trainer.add_example(&Document::from_raw("d1", "bad", &p), Polarity::Negative);
        trainer.add_example(&Document::from_raw("d2", "awful awful", &p), Polarity::Negative);
        let model = trainer.train();
        // "awful" (N = 2) outranks the two score-1.0 decisions, which keep
        // their arrival order: "bad" from d1, then the bigram from d2.
        let features: Vec<_> = model.decisions().iter().map(|d| d.feature()).collect();
        assert_eq!(vec!["awful", "bad", "awful awful"], features);
    }

    #[test]
    fn test_counting_mode_from_str() {
        assert_eq!(Ok(CountingMode::Presence), "presence".parse());
        assert!("p".parse::<CountingMode>().is_err());
    }
}
