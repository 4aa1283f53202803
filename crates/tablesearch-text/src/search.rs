use tracing::{debug, warn};

use tablesearch_core::error::{Error, Result};
use tablesearch_core::registry::{Registry, RegistryEntry};
use tablesearch_core::table_store::build_documents;
use tablesearch_core::traits::TableSource;
use tablesearch_core::types::{ErrorResult, Row, SearchResponse, SearchResult};

use crate::bm25::{Bm25, Bm25Params};
use crate::router::DomainRouter;

/// The read-only tables a search consults: both registries and the router.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub domains: Registry,
    pub industries: Registry,
    pub router: DomainRouter,
}

impl Catalog {
    pub fn standard() -> Self {
        Self { domains: Registry::domains(), industries: Registry::industries(), router: DomainRouter::standard() }
    }
}

/// Answers free-text queries against the knowledge tables of a [`Catalog`].
///
/// Each call reads its table, fits a fresh [`Bm25`] on it and returns the
/// best rows. Failures come back as [`SearchResponse::Failed`], never as a
/// panic or an `Err`.
pub struct KnowledgeSearch<'a, S: TableSource> {
    catalog: &'a Catalog,
    store: S,
    params: Bm25Params,
}

impl<'a, S: TableSource> KnowledgeSearch<'a, S> {
    pub fn new(catalog: &'a Catalog, store: S) -> Self { Self { catalog, store, params: Bm25Params::default() } }

    pub fn with_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// Searches one domain's table. Without `domain` the router picks one;
    /// an unrecognized domain is served by the default table.
    pub fn search(&self, query: &str, domain: Option<&str>, max_results: usize) -> SearchResponse {
        let requested = domain.unwrap_or_else(|| self.catalog.router.detect(query));
        let entry = match self.catalog.domains.resolve(requested) {
            Ok(entry) => entry,
            Err(e) => return failure(&e, Some(requested), None),
        };
        match self.rank(entry, query, max_results) {
            Ok(results) => SearchResponse::Found(SearchResult {
                domain: entry.key.clone(),
                industry: None,
                query: query.to_string(),
                file: entry.source.clone(),
                count: results.len(),
                results,
            }),
            Err(e) => failure(&e, Some(entry.key.as_str()), None),
        }
    }

    /// Searches an industry's metric table. Unknown industries fail.
    pub fn search_industry(&self, query: &str, industry: &str, max_results: usize) -> SearchResponse {
        let entry = match self.catalog.industries.resolve(industry) {
            Ok(entry) => entry,
            Err(e) => return failure(&e, None, None),
        };
        match self.rank(entry, query, max_results) {
            Ok(results) => SearchResponse::Found(SearchResult {
                domain: "industry".to_string(),
                industry: Some(entry.key.clone()),
                query: query.to_string(),
                file: entry.source.clone(),
                count: results.len(),
                results,
            }),
            Err(Error::SourceUnavailable { path, .. }) => {
                failure(&Error::IndustryUnavailable { industry: entry.key.clone(), path }, None, Some(entry.key.as_str()))
            }
            Err(e) => failure(&e, None, Some(entry.key.as_str())),
        }
    }

    /// The first `max_results` ranked rows that scored above zero, projected
    /// to the entry's output columns.
    fn rank(&self, entry: &RegistryEntry, query: &str, max_results: usize) -> Result<Vec<Row>> {
        let rows = self.store.load(&entry.source)?;
        let documents = build_documents(&rows, &entry.search_columns);

        let mut bm25 = Bm25::new(self.params);
        bm25.fit(&documents);
        debug!(table = %entry.source, docs = bm25.len(), avgdl = bm25.avgdl(), "fitted bm25");

        Ok(bm25
            .score(query)
            .into_iter()
            .take(max_results)
            .filter(|s| s.score > 0.0)
            .map(|s| rows[s.index].project(&entry.output_columns))
            .collect())
    }
}

fn failure(err: &Error, domain: Option<&str>, industry: Option<&str>) -> SearchResponse {
    warn!(error = %err, domain, industry, "search failed");
    SearchResponse::Failed(ErrorResult {
        error: err.to_string(),
        domain: domain.map(str::to_string),
        industry: industry.map(str::to_string),
    })
}
