//! tablesearch-text
//!
//! Keyword retrieval over the knowledge tables: tokenizer, a per-query BM25
//! ranker, the keyword router that picks a domain, and the search facade.

pub mod bm25;
pub mod router;
pub mod search;
pub mod tokenizer;

pub use bm25::{Bm25, Bm25Params, ScoredDoc};
pub use router::DomainRouter;
pub use search::{Catalog, KnowledgeSearch};
pub use tokenizer::tokenize;
