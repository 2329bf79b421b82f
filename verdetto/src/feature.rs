use crate::document::Document;

/// N-gram feature extractor.
///
/// Every order from 1 up to `max_ngram_size` is produced, so unigrams and
/// bigrams are always generated together with the default configuration.
pub struct NgramExtractor {
    max_ngram_size: usize,
}

impl NgramExtractor {
    pub const fn new(max_ngram_size: usize) -> Self {
        Self { max_ngram_size }
    }

    /// Yields every n-gram occurrence of the document, per sentence, joined
    /// with a single space. Occurrences are not deduplicated here; that is
    /// the counter's responsibility. Windows never span sentence boundaries.
    pub fn extract(&self, doc: &Document) -> Vec<String> {
        let mut features = vec![];
        for sentence in doc.sentences() {
            for n in 1..=self.max_ngram_size {
                for window in sentence.windows(n) {
                    features.push(window.join(" "));
                }
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Preprocessor;

    #[test]
    fn test_extract_counts_and_order() {
        let p = Preprocessor::new(Vec::<&str>::new());
        let doc = Document::from_raw("d1", "b c d", &p);
        let extractor = NgramExtractor::new(2);

        let expected = vec!["b", "c", "d", "b c", "c d"];
        assert_eq!(expected, extractor.extract(&doc));
    }

    #[test]
    fn test_extract_single_token() {
        let p = Preprocessor::new(Vec::<&str>::new());
        let doc = Document::from_raw("d1", "solo", &p);
        let extractor = NgramExtractor::new(2);

        assert_eq!(vec!["solo"], extractor.extract(&doc));
    }

    #[test]
    fn test_extract_empty() {
        let p = Preprocessor::new(Vec::<&str>::new());
        let doc = Document::from_raw("d1", "", &p);
        let extractor = NgramExtractor::new(2);

        assert_eq!(Vec::<String>::new(), extractor.extract(&doc));
    }

    #[test]
    fn test_extract_no_bigram_across_sentences() {
        let p = Preprocessor::new(Vec::<&str>::new());
        let doc = Document::from_raw("d1", "b c . d e", &p);
        let extractor = NgramExtractor::new(2);

        let expected = vec!["b", "c", ".", "b c", "c .", "d", "e", "d e"];
        assert_eq!(expected, extractor.extract(&doc));
    }

    #[test]
    fn test_extract_repeated_occurrences() {
        let p = Preprocessor::new(Vec::<&str>::new());
        let doc = Document::from_raw("d1", "b b b", &p);
        let extractor = NgramExtractor::new(2);

        let expected = vec!["b", "b", "b", "b b", "b b"];
        assert_eq!(expected, extractor.extract(&doc));
    }
}
