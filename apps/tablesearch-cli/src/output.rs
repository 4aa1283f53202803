//! Markdown and JSON rendering of search responses.

use tablesearch_core::types::{SearchResponse, SearchResult};

/// Longer cell values are cut here and marked with `...`.
const VALUE_MAX_CHARS: usize = 300;

pub fn format_json(response: &SearchResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_human(response: &SearchResponse) -> String {
    match response {
        SearchResponse::Failed(err) => format!("Error: {}", err.error),
        SearchResponse::Found(result) => format_result(result),
    }
}

fn format_result(result: &SearchResult) -> String {
    let mut out = Vec::new();
    match &result.industry {
        Some(industry) => {
            out.push("## Industry Metrics".to_string());
            out.push(format!("**Industry:** {} | **Query:** {}", industry, result.query));
        }
        None => {
            out.push("## Knowledge Search Results".to_string());
            out.push(format!("**Domain:** {} | **Query:** {}", result.domain, result.query));
        }
    }
    out.push(format!("**Source:** {} | **Found:** {} results\n", result.file, result.count));

    for (i, row) in result.results.iter().enumerate() {
        out.push(format!("### Result {}", i + 1));
        for (column, value) in row.iter() {
            out.push(format!("- **{}:** {}", column, truncate(value, VALUE_MAX_CHARS)));
        }
        out.push(String::new());
    }
    out.join("\n")
}

fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesearch_core::types::{ErrorResult, Row};

    fn sample(industry: Option<&str>) -> SearchResponse {
        let mut row = Row::new();
        row.insert("Metric Name", "Churn Rate");
        row.insert("Formula", "x".repeat(310));
        SearchResponse::Found(SearchResult {
            domain: (if industry.is_some() { "industry" } else { "metric" }).to_string(),
            industry: industry.map(str::to_string),
            query: "churn".to_string(),
            file: "metrics.csv".to_string(),
            count: 1,
            results: vec![row],
        })
    }

    #[test]
    fn human_output_lists_rows_and_truncates_long_values() {
        let text = format_human(&sample(None));
        assert!(text.starts_with("## Knowledge Search Results\n**Domain:** metric | **Query:** churn"));
        assert!(text.contains("**Source:** metrics.csv | **Found:** 1 results"));
        assert!(text.contains("### Result 1\n- **Metric Name:** Churn Rate"));
        assert!(text.contains(&format!("- **Formula:** {}...", "x".repeat(300))));
    }

    #[test]
    fn industry_header_names_the_industry() {
        let text = format_human(&sample(Some("saas")));
        assert!(text.contains("**Industry:** saas | **Query:** churn"));
    }

    #[test]
    fn errors_render_as_a_single_line() {
        let resp = SearchResponse::Failed(ErrorResult {
            error: "Unknown industry: retail. Available: saas".to_string(),
            domain: None,
            industry: None,
        });
        assert_eq!(format_human(&resp), "Error: Unknown industry: retail. Available: saas");
        assert!(format_json(&resp).contains("\"error\""));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo", 3), "hél...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
