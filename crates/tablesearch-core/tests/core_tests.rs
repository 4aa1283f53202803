use std::fs;
use std::io::Write;
use tempfile::TempDir;

use tablesearch_core::registry::Registry;
use tablesearch_core::table_store::{build_documents, CsvTableStore};
use tablesearch_core::traits::TableSource;

#[test]
fn registry_entry_drives_document_building() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let mut f = fs::File::create(dir.join("cleaning.csv")).unwrap();
    writeln!(f, "Issue Type,Detection Method,Solution,Python Code").unwrap();
    writeln!(f, "Missing values,df.isna().sum(),Impute or drop,df.fillna(0)").unwrap();
    writeln!(f, "Duplicates,df.duplicated(),Drop duplicates,df.drop_duplicates()").unwrap();
    drop(f);

    let domains = Registry::domains();
    let entry = domains.resolve("cleaning").expect("cleaning entry");
    let rows = CsvTableStore::new(dir).load(&entry.source).expect("load");
    assert_eq!(rows.len(), 2, "one row per record, header excluded");

    let docs = build_documents(&rows, &entry.search_columns);
    assert_eq!(docs[0], "Missing values df.isna().sum() Impute or drop");
    assert_eq!(docs[1], "Duplicates df.duplicated() Drop duplicates");
}

#[test]
fn industry_tables_live_in_a_subdirectory() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("industries")).unwrap();
    fs::write(dir.join("industries/finance.csv"), "Metric Name,Abbreviation\nGross Margin,GM\n").unwrap();

    let industries = Registry::industries();
    let entry = industries.resolve("finance").expect("finance entry");
    let store = CsvTableStore::new(dir);
    assert_eq!(store.locate(&entry.source), dir.join("industries/finance.csv"));

    let rows = store.load(&entry.source).expect("load");
    assert_eq!(rows[0].value("Abbreviation"), "GM");
    let docs = build_documents(&rows, &entry.search_columns);
    // Category and Interpretation are absent and contribute empty strings
    assert_eq!(docs[0], "Gross Margin GM  ");
}
