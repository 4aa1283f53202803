//! Okapi BM25 over an in-memory corpus.
//!
//! An engine is fitted on the documents of a single search and dropped with
//! it; nothing is cached between calls.

use std::collections::{HashMap, HashSet};

use tablesearch_core::config::Bm25Settings;

use crate::tokenizer::tokenize;

/// Term-frequency saturation (`k1`) and length normalization (`b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self { Self { k1: 1.5, b: 0.75 } }
}

impl From<Bm25Settings> for Bm25Params {
    fn from(s: Bm25Settings) -> Self { Self { k1: s.k1, b: s.b } }
}

/// A document position paired with its relevance to a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDoc {
    pub index: usize,
    pub score: f64,
}

/// `ln((n - df + 0.5) / (df + 0.5) + 1)`, unclamped.
#[allow(clippy::cast_precision_loss)]
pub fn inverse_document_frequency(n: usize, df: usize) -> f64 {
    let (n, df) = (n as f64, df as f64);
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

#[derive(Debug, Clone, Default)]
pub struct Bm25 {
    params: Bm25Params,
    term_freqs: Vec<HashMap<String, usize>>,
    doc_lengths: Vec<usize>,
    avgdl: f64,
    doc_freqs: HashMap<String, usize>,
    idf: HashMap<String, f64>,
}

impl Bm25 {
    pub fn new(params: Bm25Params) -> Self { Self { params, ..Self::default() } }

    /// Builds corpus statistics for `documents`, replacing any earlier fit.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        *self = Self::new(self.params);
        let corpus: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
        let n = corpus.len();
        if n == 0 {
            return;
        }

        self.doc_lengths = corpus.iter().map(Vec::len).collect();
        self.avgdl = self.doc_lengths.iter().sum::<usize>() as f64 / n as f64;

        for doc in &corpus {
            let mut tf: HashMap<String, usize> = HashMap::new();
            for term in doc {
                *tf.entry(term.clone()).or_insert(0) += 1;
            }
            let distinct: HashSet<&String> = doc.iter().collect();
            for term in distinct {
                *self.doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            self.term_freqs.push(tf);
        }

        self.idf = self
            .doc_freqs
            .iter()
            .map(|(term, &df)| (term.clone(), inverse_document_frequency(n, df)))
            .collect();
    }

    /// Scores every document against `query`, best first.
    ///
    /// Equal scores keep document order. Repeated query terms count once per
    /// occurrence; terms unknown to the corpus add nothing.
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, query: &str) -> Vec<ScoredDoc> {
        let query_terms = tokenize(query);
        let Bm25Params { k1, b } = self.params;

        let mut scored: Vec<ScoredDoc> = self
            .term_freqs
            .iter()
            .zip(&self.doc_lengths)
            .enumerate()
            .map(|(index, (tf, &len))| {
                if self.avgdl <= 0.0 {
                    return ScoredDoc { index, score: 0.0 };
                }
                let norm = k1 * (1.0 - b + b * len as f64 / self.avgdl);
                let score = query_terms
                    .iter()
                    // a term absent from the document contributes exactly 0
                    .filter_map(|t| Some((self.idf.get(t)?, *tf.get(t)? as f64)))
                    .filter(|&(_, f)| f + norm > 0.0)
                    .map(|(idf, f)| idf * f * (k1 + 1.0) / (f + norm))
                    // folded from +0.0: an empty f64 sum is -0.0, which total_cmp ranks below 0.0
                    .fold(0.0, |acc, s| acc + s);
                ScoredDoc { index, score }
            })
            .collect();

        // stable: ties stay in document order
        scored.sort_by(|a, c| c.score.total_cmp(&a.score));
        scored
    }

    pub fn len(&self) -> usize { self.doc_lengths.len() }

    pub fn is_empty(&self) -> bool { self.doc_lengths.is_empty() }

    pub fn avgdl(&self) -> f64 { self.avgdl }

    pub fn document_frequency(&self, term: &str) -> usize { self.doc_freqs.get(term).copied().unwrap_or(0) }

    pub fn idf(&self, term: &str) -> Option<f64> { self.idf.get(term).copied() }
}
