//! The corpus: an ordered, immutable sequence of terms, plus its loader.
//!
//! Loading is deliberately dumb. Split on whitespace, drop nothing but the
//! whitespace itself, keep the order. Position `i` in the corpus is bit `i`
//! in every index set, so the loader must never reorder or dedupe.
//!
//! A [`Corpus`] is a cheap handle over an `Arc<[String]>`. The indexed engine
//! and the linear-scan oracle can both hold one without copying the terms.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Errors from reading a corpus file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8 (line {line})", path.display())]
    InvalidUtf8 { path: PathBuf, line: usize },
}

/// Ordered, immutable term sequence. Clones share storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    terms: Arc<[String]>,
}

impl Corpus {
    /// Wrap an already tokenized term list.
    pub fn from_terms(terms: Vec<String>) -> Self {
        Self {
            terms: terms.into(),
        }
    }

    /// Tokenize `text` on whitespace.
    pub fn parse(text: &str) -> Self {
        Self::from_terms(tokenize(text).map(str::to_owned).collect())
    }

    /// Read and tokenize a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_reader(BufReader::new(file), path)?;
        debug!(path = %path.display(), terms = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    /// Tokenize everything `reader` yields, line by line.
    ///
    /// `origin` only labels errors.
    pub fn from_reader<R: BufRead>(mut reader: R, origin: &Path) -> Result<Self, LoadError> {
        let mut terms = Vec::new();
        let mut buf = Vec::new();
        let mut line = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LoadError::Io {
                    path: origin.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            line += 1;
            let text = std::str::from_utf8(&buf).map_err(|_| LoadError::InvalidUtf8 {
                path: origin.to_path_buf(),
                line,
            })?;
            terms.extend(tokenize(text).map(str::to_owned));
        }

        Ok(Self::from_terms(terms))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term at `position`.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.terms.get(position).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// Whether two handles share the same storage.
    pub fn shares_storage(&self, other: &Corpus) -> bool {
        Arc::ptr_eq(&self.terms, &other.terms)
    }
}

impl Deref for Corpus {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.terms
    }
}

impl From<Vec<String>> for Corpus {
    fn from(terms: Vec<String>) -> Self {
        Self::from_terms(terms)
    }
}

impl<'a> FromIterator<&'a str> for Corpus {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::from_terms(iter.into_iter().map(str::to_owned).collect())
    }
}

/// Whitespace tokenizer. Never yields an empty token.
///
/// Splits on Unicode whitespace, so a no-break space separates terms too.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}
