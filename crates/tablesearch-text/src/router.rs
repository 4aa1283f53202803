use tracing::debug;

use tablesearch_core::registry::DEFAULT_DOMAIN;

/// Declared order matters: on equal counts the earlier domain wins.
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("workflow", &["workflow", "process", "step", "eda", "dashboard", "cohort", "funnel", "analysis", "pipeline"]),
    ("metric", &["metric", "kpi", "mrr", "arr", "churn", "cac", "ltv", "conversion", "rate", "ratio"]),
    ("chart", &["chart", "graph", "visualization", "plot", "bar", "line", "pie", "heatmap", "scatter"]),
    ("cleaning", &["clean", "missing", "null", "duplicate", "outlier", "impute", "data quality"]),
    ("sql", &["sql", "query", "join", "window", "aggregate", "cte", "subquery", "partition"]),
    ("python", &["python", "pandas", "polars", "dataframe", "pivot", "groupby", "merge"]),
    ("database", &["postgres", "bigquery", "snowflake", "mysql", "database", "connection", "warehouse"]),
    ("report", &["dashboard", "report", "layout", "ux", "design", "color", "visual"]),
    ("validation", &["mistake", "error", "sanity", "check", "validate", "verify", "wrong"]),
];

/// Picks a domain for a query by counting keyword hits.
#[derive(Debug, Clone)]
pub struct DomainRouter {
    table: Vec<(String, Vec<String>)>,
    default_domain: String,
}

impl DomainRouter {
    pub fn new(table: Vec<(String, Vec<String>)>, default_domain: impl Into<String>) -> Self {
        Self { table, default_domain: default_domain.into() }
    }

    pub fn standard() -> Self {
        let table = DOMAIN_KEYWORDS
            .iter()
            .map(|(domain, keywords)| ((*domain).to_string(), keywords.iter().map(|k| (*k).to_string()).collect()))
            .collect();
        Self::new(table, DEFAULT_DOMAIN)
    }

    /// Keyword hits per domain, in declared order. A keyword counts once if it
    /// occurs anywhere in the lower-cased query, even inside a longer word.
    pub fn scores(&self, query: &str) -> Vec<(&str, usize)> {
        let query = query.to_lowercase();
        self.table
            .iter()
            .map(|(domain, keywords)| (domain.as_str(), keywords.iter().filter(|k| query.contains(k.as_str())).count()))
            .collect()
    }

    /// The highest-scoring domain, or the default when nothing matches.
    pub fn detect(&self, query: &str) -> &str {
        let mut best: Option<(&str, usize)> = None;
        for (domain, hits) in self.scores(query) {
            if best.map_or(true, |(_, top)| hits > top) {
                best = Some((domain, hits));
            }
        }
        let domain = match best {
            Some((domain, hits)) if hits > 0 => domain,
            _ => self.default_domain.as_str(),
        };
        debug!(query, domain, "routed query");
        domain
    }

    pub fn default_domain(&self) -> &str { &self.default_domain }
}
