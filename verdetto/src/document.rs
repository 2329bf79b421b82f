use std::collections::HashSet;
use std::fmt;

use crate::errors::{Result, VerdettoError};

/// Prefix given to tokens inside a negation scope.
pub const NEGATION_PREFIX: &str = "NOT_";

/// Tokens removed from every sentence before negation scoping and feature
/// extraction. Training and inference must use the same set.
pub const DEFAULT_STOP_TOKENS: &[&str] = &[
    "a", "an", "the", "to", "of", "and", ".", ",", "'", "\"", ";", ":", "-", "(", ")", "&",
];

const NEGATION_CUE: &str = "not";
const NEGATION_CUE_SUFFIX: &str = "n't";
const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Polarity of a document or a decision.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Polarity {
    /// Negative class. (serialized as `0`)
    Negative = 0,

    /// Positive class. (serialized as `1`)
    Positive = 1,
}

impl Polarity {
    /// Parses a serialized class digit.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidArgument`] will be returned if the field is
    /// neither `0` nor `1`.
    pub fn from_digit(digit: &str) -> Result<Self> {
        match digit {
            "0" => Ok(Self::Negative),
            "1" => Ok(Self::Positive),
            _ => Err(VerdettoError::invalid_argument(
                "class",
                format!("must be 0 or 1: {digit}"),
            )),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "0"),
            Self::Positive => write!(f, "1"),
        }
    }
}

/// Preprocessor that turns raw text into filtered, negation-tagged token
/// sequences.
///
/// The stop-token set is held by the preprocessor itself rather than being
/// global state, so tests can inject a different set.
pub struct Preprocessor {
    stop_tokens: HashSet<String>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_TOKENS.iter().copied())
    }
}

impl Preprocessor {
    /// Creates a new preprocessor with the given stop-token set.
    pub fn new<I, S>(stop_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_tokens: stop_tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits raw text into sentences and each sentence into filtered,
    /// negation-tagged tokens.
    pub fn preprocess(&self, text: &str) -> Vec<Vec<String>> {
        split_sentences(text)
            .into_iter()
            .map(|sentence| self.filter_and_tag(sentence))
            .collect()
    }

    /// Tokenizes one sentence, drops stop tokens, and applies negation
    /// scoping.
    ///
    /// The first token equal to `not` or ending in `n't` opens the negation
    /// scope and is consumed; every later token of the sentence is prefixed
    /// with [`NEGATION_PREFIX`]. Later cues neither re-trigger nor close the
    /// scope.
    fn filter_and_tag(&self, sentence: &str) -> Vec<String> {
        let mut tokens = vec![];
        let mut negated = false;
        for token in sentence.split_whitespace() {
            if self.stop_tokens.contains(token) {
                continue;
            }
            if !negated && (token == NEGATION_CUE || token.ends_with(NEGATION_CUE_SUFFIX)) {
                negated = true;
                continue;
            }
            if negated {
                tokens.push(format!("{NEGATION_PREFIX}{token}"));
            } else {
                tokens.push(token.to_string());
            }
        }
        tokens
    }
}

/// Splits text on sentence-final punctuation, keeping the punctuation
/// attached to the sentence it terminates.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = vec![];
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if SENTENCE_TERMINATORS.contains(&c) {
            let end = i + c.len_utf8();
            sentences.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// A document reduced to filtered, negation-tagged token sequences, one per
/// sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    sentences: Vec<Vec<String>>,
}

impl Document {
    /// Creates a new [`Document`] from an identifier and raw text.
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier.
    /// * `text` - Raw document text.
    /// * `preprocessor` - The preprocessor applied to `text`.
    ///
    /// # Returns
    ///
    /// A new [`Document`].
    pub fn from_raw<S>(id: S, text: &str, preprocessor: &Preprocessor) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            sentences: preprocessor.preprocess(text),
        }
    }

    /// Parses a training-corpus line of the form `<id> <class:0|1> <text>`,
    /// where class `1` means positive.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidRecord`] will be returned if the line does
    /// not match the expected field pattern.
    pub fn from_labeled_line(line: &str, preprocessor: &Preprocessor) -> Result<(Self, Polarity)> {
        let (id, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| VerdettoError::invalid_record(line))?;
        let (class, text) = rest
            .split_once(char::is_whitespace)
            .ok_or_else(|| VerdettoError::invalid_record(line))?;
        let polarity =
            Polarity::from_digit(class).map_err(|_| VerdettoError::invalid_record(line))?;
        Ok((Self::from_raw(id, text, preprocessor), polarity))
    }

    /// Parses a test-corpus line of the form `<id> __ <text>`. The second
    /// field is a placeholder and is ignored.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidRecord`] will be returned if the line does
    /// not match the expected field pattern.
    pub fn from_test_line(line: &str, preprocessor: &Preprocessor) -> Result<Self> {
        let (id, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| VerdettoError::invalid_record(line))?;
        let (_, text) = rest
            .split_once(char::is_whitespace)
            .ok_or_else(|| VerdettoError::invalid_record(line))?;
        Ok(Self::from_raw(id, text, preprocessor))
    }

    /// Returns the document identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the preprocessed sentences.
    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    /// Renders the document as a single string with every token surrounded
    /// by spaces, so that a padded feature can only match whole tokens.
    pub fn to_padded_string(&self) -> String {
        let mut text = String::from(" ");
        for sentence in &self.sentences {
            for token in sentence {
                text.push_str(token);
                text.push(' ');
            }
        }
        text
    }
}
