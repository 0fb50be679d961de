use bib_list::{export, latex, Bibliography, Options, WarningKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn lab() -> Bibliography {
    Bibliography::parse(include_str!("fixtures/lab.bib")).unwrap()
}

#[test]
fn test_parse_lab_corpus() {
    let bib = lab();
    assert_eq!(bib.len(), 8);

    // The @string block yields a warning instead of an entry
    assert!(bib
        .warnings()
        .iter()
        .any(|w| w.kind == WarningKind::StringEntryNotSupported));
    assert!(bib
        .warnings()
        .iter()
        .all(|w| w.kind != WarningKind::MultipleEntries));

    let entry = bib.find_by_key("stammer2024learning").unwrap();
    assert_eq!(entry.entry_type, "article");
    assert_eq!(entry.get("title"), Some("Learning by Self-Explaining"));
    assert_eq!(entry.get("year"), Some("2024"));
    let authors = entry.authors.as_ref().unwrap();
    assert_eq!(authors.len(), 3);
    assert_eq!(authors[0].first, "Wolfgang");
    assert_eq!(authors[0].last, "Stammer");
}

#[test]
fn test_von_particles_in_corpus() {
    let bib = lab();

    let book = bib.find_by_key("de2008probabilistic").unwrap();
    let authors = book.authors.as_ref().unwrap();
    assert_eq!(authors[0].first, "Luc");
    assert_eq!(authors[0].von, "de");
    assert_eq!(authors[0].last, "Raedt");

    // Comma form with a capitalized particle segment
    let chapter = bib.find_by_key("von2021right").unwrap();
    let authors = chapter.authors.as_ref().unwrap();
    assert_eq!(authors[0].first, "Laura");
    assert_eq!(authors[0].von, "von");
    assert_eq!(authors[0].last, "Rueden");
    assert_eq!(authors[1].first, "Patrick");
    assert_eq!(authors[1].last, "Schramowski");
}

#[test]
fn test_statistics_by_type() {
    let bib = lab();
    let stats = bib.statistics();
    assert_eq!(stats.get("article"), Some(&1));
    assert_eq!(stats.get("inproceedings"), Some(&2));
    assert_eq!(stats.get("phdthesis"), Some(&1));
    assert_eq!(stats.get("techreport"), Some(&1));
    assert_eq!(stats.get("misc"), Some(&1));
    assert_eq!(stats.get("book"), Some(&1));
    assert_eq!(stats.get("incollection"), Some(&1));
    assert_eq!(bib.find_by_type("inproceedings").len(), 2);
}

#[test]
fn test_unwrap_option_flattens_multiline_values() {
    let mut options = Options::default();
    options.unwrap = true;
    let bib =
        Bibliography::parse_with_options(include_str!("fixtures/lab.bib"), options).unwrap();
    let entry = bib.find_by_key("delfosse2024interpretable").unwrap();
    assert_eq!(
        entry.get("title"),
        Some("Interpretable Concept Bottlenecks to Align Reinforcement Learning Agents")
    );
}

#[test]
fn test_bibtex_round_trip_over_corpus() {
    let bib = lab();
    let output = bib.to_bibtex();
    let again = Bibliography::parse(&output).unwrap();

    assert_eq!(again.len(), bib.len());
    for (a, b) in bib.entries().iter().zip(again.entries()) {
        assert_eq!(a.entry_type, b.entry_type);
        assert_eq!(a.cite, b.cite);
        assert_eq!(a.get("title"), b.get("title"));
        assert_eq!(a.get("year"), b.get("year"));
    }
}

#[test]
fn test_rtf_and_html_output() {
    let mut bib = lab();

    let rtf = bib.to_rtf();
    assert!(rtf.starts_with("{\\rtf\n"));
    assert!(rtf.ends_with('}'));
    assert!(rtf.contains(r"{\b Learning by Self-Explaining}"));

    let html = bib.to_html();
    assert!(html.starts_with("<p>\n"));
    assert!(html.ends_with("</p>\n"));
    assert!(html.contains("<strong>Learning by Self-Explaining</strong>"));

    // Every entry in the corpus has display fields
    assert!(bib
        .warnings()
        .iter()
        .all(|w| w.kind != WarningKind::LineNotConverted));
}

#[test]
fn test_html_range_pagination() {
    let mut bib = lab();
    let page = bib.to_html_range(0, 3);
    assert!(page.contains("Learning by Self-Explaining"));
    assert!(!page.contains("Constraint-based learning"));
}

#[test]
fn test_publication_export() {
    let bib = lab();
    let records = export::to_records(&bib);
    assert_eq!(records.len(), 8);

    let stammer = &records[0];
    assert_eq!(stammer.cite, "stammer2024learning");
    assert_eq!(stammer.position, 0);
    assert_eq!(stammer.type_label, "Journal article");
    assert_eq!(stammer.url, "/papers/stammer2024learning.pdf");
    assert_eq!(
        stammer.topics,
        vec!["Explainable AI", "Concept Learning"]
    );
    assert_eq!(
        stammer.topics_normalized,
        vec!["explainable-ai", "concept-learning"]
    );

    let shindo = records.iter().find(|r| r.cite == "shindo2023alpha").unwrap();
    assert_eq!(shindo.type_label, "Conference paper");
    assert_eq!(shindo.url, "https://doi.org/10.1007/s10994-023-06320-1");
    assert!(shindo.topics.is_empty());

    let json = export::to_json(&bib).unwrap();
    assert!(json.contains("\"typeLabel\": \"PhD thesis\""));
}

#[test]
fn test_accent_decoding_for_display() {
    let bib = lab();
    let brack = bib.find_by_key("brack2022stable").unwrap();
    let accented = &brack.authors.as_ref().unwrap()[2];
    assert_eq!(latex::htmlify(&accented.first), "B&auml;rbel");
    assert_eq!(latex::uriencode(&accented.first), "B%C3%A4rbel");
}

#[test]
fn test_unbalanced_corpus_keeps_partial_data() {
    let source = "@article{good, title = {Fine}, year = {2020}}\n\
                  @misc{bad, note = {never {closed";
    let err = Bibliography::parse(source).unwrap_err();
    let partial = err.into_partial().unwrap();
    assert_eq!(partial.len(), 1);
    assert_eq!(partial.entries()[0].cite, "good");
}

#[test]
fn test_duplicate_keys_across_corpus() {
    let source = "@article{dup1, title = {A}}\n\
                  @book{solo, title = {B}}\n\
                  @misc{dup1, title = {C}}";
    let bib = Bibliography::parse(source).unwrap();
    assert_eq!(bib.len(), 3);
    let duplicates: Vec<_> = bib
        .warnings()
        .iter()
        .filter(|w| w.kind == WarningKind::MultipleEntries)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].entry, "dup1");
}

proptest! {
    // Well-formed input with N top-level blocks always parses to N entries
    #[test]
    fn test_wellformed_entry_count(n in 0usize..40) {
        let mut source = String::new();
        for i in 0..n {
            source.push_str(&format!(
                "@article{{key{i},\n  title = {{Title {i}}},\n  year = {{20{:02}}}\n}}\n\n",
                i % 100
            ));
        }
        let bib = Bibliography::parse(&source).unwrap();
        prop_assert_eq!(bib.len(), n);
    }
}
