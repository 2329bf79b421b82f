use daachorse::DoubleArrayAhoCorasick;

use crate::document::{Document, Polarity};
use crate::errors::{Result, VerdettoError};
use crate::model::Model;

/// Class returned when no feature of the decision list occurs in the
/// document.
pub const DEFAULT_POLARITY: Polarity = Polarity::Negative;

/// Classifier.
///
/// Features are matched as whole tokens: each pattern is the feature text
/// surrounded by spaces, and documents are rendered with the same padding,
/// so a feature can never match inside a longer token.
pub struct Classifier {
    pma: Option<DoubleArrayAhoCorasick>,
    polarities: Vec<Polarity>,
}

impl Classifier {
    /// Creates a new classifier.
    ///
    /// # Arguments
    ///
    /// * `model` - A model data.
    ///
    /// # Returns
    ///
    /// A new classifier.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidModel`] will be returned if the decision
    /// list contains duplicate features.
    pub fn new(model: Model) -> Result<Self> {
        let mut patterns = Vec::with_capacity(model.decisions.len());
        let mut polarities = Vec::with_capacity(model.decisions.len());
        for decision in &model.decisions {
            patterns.push(format!(" {} ", decision.feature()));
            polarities.push(decision.polarity());
        }
        let pma = if patterns.is_empty() {
            None
        } else {
            Some(
                DoubleArrayAhoCorasick::new(patterns)
                    .map_err(|_| VerdettoError::invalid_model("invalid decision list"))?,
            )
        };
        Ok(Self { pma, polarities })
    }

    /// Returns the class of the first decision whose feature occurs in the
    /// document, scanning the list in its stored order.
    ///
    /// Pattern values are list ranks, so the minimum value over all
    /// overlapping matches is exactly the first match of a linear scan.
    /// Without any match the class is [`DEFAULT_POLARITY`].
    pub fn classify(&self, doc: &Document) -> Polarity {
        let pma = match self.pma.as_ref() {
            Some(pma) => pma,
            None => return DEFAULT_POLARITY,
        };
        let text = doc.to_padded_string();
        let mut best_rank = None;
        for m in pma.find_overlapping_iter(&text) {
            let rank = m.value();
            if best_rank.map_or(true, |best| rank < best) {
                best_rank = Some(rank);
            }
        }
        best_rank.map_or(DEFAULT_POLARITY, |rank| self.polarities[rank])
    }
}
