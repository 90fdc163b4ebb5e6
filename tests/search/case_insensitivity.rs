//! Matching ignores case; results keep the caller's keyword and the
//! sentence's own casing.

use sentex::{search, Index, IndexEntry};

fn index(sentences: &[&str]) -> Index {
    Index::new(sentences.iter().map(|s| IndexEntry::new(1, *s)).collect()).unwrap()
}

#[test]
fn test_any_keyword_casing_finds_same_sentences() {
    let idx = index(&["Energy is conserved.", "Kinetic ENERGY grows.", "Mass is not."]);
    let lower = search(&idx, &["energy"]);
    let upper = search(&idx, &["ENERGY"]);
    let mixed = search(&idx, &["eNeRgY"]);

    let pages = |r: &sentex::SearchResponse| {
        r.results
            .iter()
            .map(|x| IndexEntry::new(x.page_number, x.sentence.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(lower.result_count, 2);
    assert_eq!(pages(&lower), pages(&upper));
    assert_eq!(pages(&lower), pages(&mixed));
}

#[test]
fn test_keyword_echoed_as_given() {
    let idx = index(&["Energy is conserved."]);
    let response = search(&idx, &["ENERGY"]);
    assert_eq!(response.results[0].keyword, "ENERGY");
    assert_eq!(response.results[0].sentence, "<b>Energy</b> is conserved.");
}

#[test]
fn test_substring_match_inside_word() {
    let idx = index(&["Thermodynamics is hard."]);
    let response = search(&idx, &["dynamic"]);
    assert_eq!(response.results[0].sentence, "Thermo<b>dynamic</b>s is hard.");
}

#[test]
fn test_non_ascii_case_folding() {
    let idx = index(&["Die Straße ist ÜBER dem Fluss."]);
    let response = search(&idx, &["über"]);
    assert_eq!(response.result_count, 1);
    assert_eq!(
        response.results[0].sentence,
        "Die Straße ist <b>ÜBER</b> dem Fluss."
    );
}

#[test]
fn test_keyword_with_regex_metacharacters_is_literal() {
    let idx = index(&["Is F=m*a (always)?", "Fma is shorthand."]);
    let response = search(&idx, &["m*a"]);
    assert_eq!(response.result_count, 1);
    assert_eq!(response.results[0].sentence, "Is F=<b>m*a</b> (always)?");
}
