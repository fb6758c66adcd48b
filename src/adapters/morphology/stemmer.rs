//! Snowball stemmer for Russian.

use rust_stemmers::{Algorithm, Stemmer};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct SnowballStemmer {
    inner: Arc<Stemmer>,
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("algorithm", &"russian")
            .finish()
    }
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Stemmer::create(Algorithm::Russian)),
        }
    }

    /// Stem of the lowercased word.
    pub fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }
}
