#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Verdetto
//!
//! Verdetto is a decision-list based binary sentiment classifier.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, BufReader};
//!
//! use verdetto::{Classifier, Document, Model, Preprocessor};
//!
//! let mut f = BufReader::new(File::open("model.txt").unwrap());
//! let model = Model::read(&mut f).unwrap();
//! let classifier = Classifier::new(model).unwrap();
//! let preprocessor = Preprocessor::default();
//!
//! let f = BufReader::new(File::open("test.txt").unwrap());
//! for line in f.lines() {
//!     let doc = Document::from_test_line(&line.unwrap(), &preprocessor).unwrap();
//!     println!("{} {}", doc.id(), classifier.classify(&doc));
//! }
//! ```
//!
//! Training requires **crate feature** `train`. For more details, see [`Trainer`].

pub mod errors;

mod classifier;
mod document;
mod metrics;
mod model;

#[cfg(feature = "train")]
mod feature;
#[cfg(feature = "train")]
mod trainer;

pub use classifier::{Classifier, DEFAULT_POLARITY};
pub use document::{Document, Polarity, Preprocessor, DEFAULT_STOP_TOKENS, NEGATION_PREFIX};
pub use metrics::ConfusionMatrix;
pub use model::{Decision, Model, FEATURE_COLUMN_WIDTH};

#[cfg(feature = "train")]
pub use trainer::{CountingMode, Trainer, DEFAULT_SCORE_THRESHOLD, HYBRID_COUNT_CAP};
