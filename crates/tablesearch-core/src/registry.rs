//! Static descriptions of the searchable knowledge tables.
//!
//! A [`Registry`] maps keys to [`RegistryEntry`] records and decides what an
//! unrecognized key means through its [`ResolutionPolicy`]: the domain
//! registry quietly falls back to its default entry, the industry registry
//! refuses. Both are built once and only read afterwards.

use tracing::warn;

use crate::error::{Error, Result};

/// Where a table lives and which of its columns are searched and returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub key: String,
    pub source: String,
    pub search_columns: Vec<String>,
    pub output_columns: Vec<String>,
}

impl RegistryEntry {
    pub fn new(key: &str, source: &str, search_columns: &[&str], output_columns: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            source: source.to_string(),
            search_columns: search_columns.iter().map(|c| (*c).to_string()).collect(),
            output_columns: output_columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// How [`Registry::resolve`] treats a key it does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Substitute the entry named by `fallback`.
    Lenient { fallback: String },
    /// Fail with [`Error::UnknownKey`] listing the declared keys.
    Strict,
}

#[derive(Debug, Clone)]
pub struct Registry {
    kind: &'static str,
    policy: ResolutionPolicy,
    entries: Vec<RegistryEntry>,
}

pub const DEFAULT_DOMAIN: &str = "workflow";

const INDUSTRY_SEARCH_COLUMNS: &[&str] = &["Metric Name", "Abbreviation", "Category", "Interpretation"];
const INDUSTRY_OUTPUT_COLUMNS: &[&str] = &[
    "Metric Name", "Abbreviation", "Category", "Formula", "Interpretation", "Good Benchmark", "Related Metrics", "Visualization",
];

impl Registry {
    /// Builds a registry, checking that keys are unique and that a lenient
    /// fallback names a declared entry.
    pub fn new(kind: &'static str, policy: ResolutionPolicy, entries: Vec<RegistryEntry>) -> Result<Self> {
        let registry = Self { kind, policy, entries };
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(Error::InvalidConfig(format!("duplicate {} key '{}'", self.kind, entry.key)));
            }
        }
        if let ResolutionPolicy::Lenient { fallback } = &self.policy {
            if self.get(fallback).is_none() {
                return Err(Error::InvalidConfig(format!("fallback {} '{}' is not declared", self.kind, fallback)));
            }
        }
        Ok(())
    }

    /// Built-in tables are fixed at compile time; they go through the same
    /// checks as [`Registry::new`] in debug builds.
    fn builtin(kind: &'static str, policy: ResolutionPolicy, entries: Vec<RegistryEntry>) -> Self {
        let registry = Self { kind, policy, entries };
        debug_assert!(registry.validate().is_ok(), "built-in {} registry is inconsistent", kind);
        registry
    }

    /// The general-purpose knowledge tables, falling back to `workflow`.
    pub fn domains() -> Self {
        let entries = vec![
            RegistryEntry::new(
                "workflow",
                "workflows.csv",
                &["Workflow Name", "Step Name", "Description", "Questions to Ask"],
                &["Workflow Name", "Step Number", "Step Name", "Description", "Questions to Ask", "Tools/Commands", "Outputs", "Common Mistakes"],
            ),
            RegistryEntry::new(
                "metric",
                "metrics.csv",
                &["Metric Name", "Abbreviation", "Industry", "Interpretation"],
                &["Metric Name", "Abbreviation", "Industry", "Formula", "Interpretation", "Good Benchmark", "Related Metrics", "Visualization"],
            ),
            RegistryEntry::new(
                "chart",
                "charts.csv",
                &["Chart Type", "Best For", "Data Type", "Comparison Type"],
                &["Chart Type", "Best For", "Data Type", "Comparison Type", "Python Code", "Color Guidance", "Accessibility", "Dashboard Tip"],
            ),
            RegistryEntry::new(
                "cleaning",
                "cleaning.csv",
                &["Issue Type", "Detection Method", "Solution"],
                &["Issue Type", "Detection Method", "Solution", "Python Code", "SQL Code", "Impact"],
            ),
            RegistryEntry::new(
                "sql",
                "sql-patterns.csv",
                &["Pattern Name", "Use Case", "SQL Code"],
                &["Pattern Name", "Use Case", "SQL Code", "PostgreSQL", "BigQuery", "Performance"],
            ),
            RegistryEntry::new(
                "python",
                "python-patterns.csv",
                &["Pattern Name", "Use Case", "pandas Code"],
                &["Pattern Name", "Use Case", "pandas Code", "polars Code", "Performance"],
            ),
            RegistryEntry::new(
                "database",
                "databases.csv",
                &["Database", "Category", "Guideline", "Do", "Don't"],
                &["Database", "Category", "Guideline", "Do", "Don't", "Code Example"],
            ),
            RegistryEntry::new(
                "report",
                "report-ux.csv",
                &["Category", "Guideline", "Do", "Don't"],
                &["Category", "Guideline", "Do", "Don't", "Example"],
            ),
            RegistryEntry::new(
                "validation",
                "validation.csv",
                &["Mistake Type", "Description", "Symptoms"],
                &["Mistake Type", "Description", "Symptoms", "Prevention Query", "User Question"],
            ),
        ];
        Self::builtin("domain", ResolutionPolicy::Lenient { fallback: DEFAULT_DOMAIN.to_string() }, entries)
    }

    /// Industry metric tables. All share one column schema.
    pub fn industries() -> Self {
        let entries = ["saas", "ecommerce", "finance", "marketing"]
            .into_iter()
            .map(|industry| {
                RegistryEntry::new(
                    industry,
                    &format!("industries/{}.csv", industry),
                    INDUSTRY_SEARCH_COLUMNS,
                    INDUSTRY_OUTPUT_COLUMNS,
                )
            })
            .collect();
        Self::builtin("industry", ResolutionPolicy::Strict, entries)
    }

    pub fn kind(&self) -> &'static str { self.kind }

    pub fn get(&self, key: &str) -> Option<&RegistryEntry> { self.entries.iter().find(|e| e.key == key) }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(|e| e.key.as_str()) }

    pub fn entries(&self) -> &[RegistryEntry] { &self.entries }

    pub fn resolve(&self, key: &str) -> Result<&RegistryEntry> {
        if let Some(entry) = self.get(key) {
            return Ok(entry);
        }
        match &self.policy {
            ResolutionPolicy::Lenient { fallback } => {
                warn!(kind = self.kind, key, fallback = %fallback, "unknown key, using fallback entry");
                self.get(fallback).ok_or_else(|| self.unknown(key))
            }
            ResolutionPolicy::Strict => Err(self.unknown(key)),
        }
    }

    fn unknown(&self, key: &str) -> Error {
        Error::UnknownKey { kind: self.kind, key: key.to_string(), available: self.keys().map(str::to_string).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_keys_in_declared_order() {
        let domains = Registry::domains();
        let keys: Vec<&str> = domains.keys().collect();
        assert_eq!(
            keys,
            vec!["workflow", "metric", "chart", "cleaning", "sql", "python", "database", "report", "validation"]
        );
    }

    #[test]
    fn unknown_domain_falls_back_silently() {
        let domains = Registry::domains();
        let entry = domains.resolve("astrology").expect("lenient");
        assert_eq!(entry.key, "workflow");
        assert_eq!(entry.source, "workflows.csv");
    }

    #[test]
    fn unknown_industry_is_an_error_naming_choices() {
        let industries = Registry::industries();
        let err = industries.resolve("unknown-industry").expect_err("strict");
        let msg = err.to_string();
        assert!(msg.contains("unknown-industry"));
        assert!(msg.contains("saas, ecommerce, finance, marketing"));
    }

    #[test]
    fn industries_share_one_schema() {
        let industries = Registry::industries();
        let saas = industries.resolve("saas").expect("saas");
        assert_eq!(saas.source, "industries/saas.csv");
        for entry in industries.entries() {
            assert_eq!(entry.search_columns, saas.search_columns);
            assert_eq!(entry.output_columns, saas.output_columns);
        }
    }

    #[test]
    fn built_in_registries_pass_validation() {
        for registry in [Registry::domains(), Registry::industries()] {
            assert!(registry.validate().is_ok(), "{} registry", registry.kind());
            assert!(Registry::new(registry.kind(), registry.policy.clone(), registry.entries().to_vec()).is_ok());
        }
    }

    #[test]
    fn new_rejects_undeclared_fallback_and_duplicates() {
        let entries = vec![RegistryEntry::new("a", "a.csv", &["x"], &["x"])];
        let policy = ResolutionPolicy::Lenient { fallback: "b".to_string() };
        assert!(Registry::new("domain", policy, entries.clone()).is_err());

        let dup = vec![entries[0].clone(), entries[0].clone()];
        assert!(Registry::new("domain", ResolutionPolicy::Strict, dup).is_err());

        assert!(Registry::new("domain", ResolutionPolicy::Strict, entries).is_ok());
    }
}
