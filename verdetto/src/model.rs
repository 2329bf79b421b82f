use std::io::{BufRead, Write};

use crate::document::Polarity;
use crate::errors::{Result, VerdettoError};

/// Width of the feature column in the serialized decision list. Features
/// longer than this simply overflow the column; the reader splits fields
/// from the right, so the layout stays parseable.
pub const FEATURE_COLUMN_WIDTH: usize = 32;

/// A single entry of the decision list.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub(crate) feature: String,
    pub(crate) log_likelihood: f64,
    pub(crate) polarity: Polarity,
}

impl Decision {
    /// Returns the feature string.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Returns the confidence score.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Returns the predicted class.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

/// Model data: the decision list in descending log-likelihood order.
///
/// The order is fixed at training time; a reloaded model is trusted to
/// already be sorted by its producer.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(crate) decisions: Vec<Decision>,
}

impl Model {
    /// Returns the decisions in inference priority order.
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Exports the model data as flat text, one
    /// `<feature> <log-likelihood> <class>` line per decision.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        for decision in &self.decisions {
            writeln!(
                wtr,
                "{:<width$} {:.4} {}",
                decision.feature,
                decision.log_likelihood,
                decision.polarity,
                width = FEATURE_COLUMN_WIDTH,
            )?;
        }
        Ok(())
    }

    /// Creates a model from a reader. The score column is validated but
    /// only the feature and the class are used for inference.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    /// [`VerdettoError::InvalidRecord`] will be returned if a line does not
    /// match the expected field layout.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut decisions = vec![];
        for line in rdr.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            decisions.push(Self::parse_line(&line)?);
        }
        Ok(Self { decisions })
    }

    fn parse_line(line: &str) -> Result<Decision> {
        let (rest, class) = line
            .trim_end()
            .rsplit_once(' ')
            .ok_or_else(|| VerdettoError::invalid_record(line))?;
        let polarity =
            Polarity::from_digit(class).map_err(|_| VerdettoError::invalid_record(line))?;
        let (feature, score) = rest
            .rsplit_once(' ')
            .ok_or_else(|| VerdettoError::invalid_record(line))?;
        let log_likelihood: f64 = score
            .parse()
            .map_err(|_| VerdettoError::invalid_record(line))?;
        let feature = feature.trim_end();
        if feature.is_empty() {
            return Err(VerdettoError::invalid_record(line));
        }
        Ok(Decision {
            feature: feature.to_string(),
            log_likelihood,
            polarity,
        })
    }
}
