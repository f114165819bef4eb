//! End-to-end scenarios: selectors parsed from declaration files ranked
//! against candidate documents, the way a provider registry consumes them.

use docmatch_document::{CandidateDocument, DocumentUri};
use docmatch_selector::{score, DocumentSelector, Score};
use pretty_assertions::assert_eq;

fn candidate(uri: &str, language: &str) -> CandidateDocument {
    CandidateDocument::synchronized(DocumentUri::parse(uri).unwrap(), language)
}

#[test]
fn providers_rank_by_selector_specificity() {
    let document = candidate("file:///proj/src/lib.rs", "rust");

    let providers = [
        ("rust-formatter", r#"{"language": "rust", "scheme": "file"}"#),
        ("project-linter", r#"{"pattern": {"base": "/proj", "pattern": "src/**"}}"#),
        ("fallback-formatter", r#""*""#),
        ("any-scheme-hover", r#"{"scheme": "*"}"#),
        ("toml-formatter", r#""toml""#),
    ];

    let mut ranked: Vec<(&str, Score)> = providers
        .iter()
        .map(|(name, declaration)| {
            let selector: DocumentSelector = serde_json::from_str(declaration).unwrap();
            (*name, selector.score(&document))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let order: Vec<&str> = ranked.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        order,
        vec![
            "rust-formatter",
            "project-linter",
            "fallback-formatter",
            "any-scheme-hover",
            "toml-formatter",
        ]
    );
    let values: Vec<u8> = ranked.iter().map(|(_, value)| value.value()).collect();
    assert_eq!(values, vec![10, 10, 5, 5, 0]);
}

#[test]
fn absent_selector_never_matches() {
    let document = candidate("untitled:Untitled-1", "plaintext");
    assert_eq!(score(None, &document), Score::NONE);
}

#[test]
fn unsynchronized_documents_only_match_opted_in_filters() {
    let ghost = CandidateDocument::new(
        DocumentUri::parse("file:///proj/notes.md").unwrap(),
        "markdown",
        false,
    );

    let shorthand: DocumentSelector = serde_json::from_str(r#""markdown""#).unwrap();
    assert_eq!(shorthand.score(&ghost), Score::NONE);

    let gated: DocumentSelector = serde_json::from_str(r#"{"language": "markdown"}"#).unwrap();
    assert_eq!(gated.score(&ghost), Score::NONE);

    let open: DocumentSelector =
        serde_json::from_str(r#"{"language": "markdown", "match_unsynchronized": true}"#).unwrap();
    assert_eq!(open.score(&ghost), Score::EXACT);
}

#[test]
fn mixed_list_takes_the_best_clause() {
    let document = candidate("untitled:Untitled-1", "rust");
    let selector: DocumentSelector =
        serde_json::from_str(r#"["toml", {"scheme": "untitled"}, "*"]"#).unwrap();
    assert_eq!(selector.score(&document), Score::EXACT);
}

#[test]
fn windows_style_documents_score_against_forward_slash_patterns() {
    let document = candidate("file:///c:/Users/dev/main.rs", "rust");
    let selector: DocumentSelector =
        serde_json::from_str(r#"{"pattern": "c:/Users/**/*.rs"}"#).unwrap();
    assert_eq!(selector.score(&document), Score::EXACT);
}

#[test]
fn unc_documents_score_against_their_share_prefix() {
    let document = candidate("file://build-server/out/artifacts/report.json", "json");
    let selector: DocumentSelector =
        serde_json::from_str(r#"{"pattern": "//build-server/out/**"}"#).unwrap();
    assert_eq!(selector.score(&document), Score::EXACT);
}

#[test]
fn exclusive_is_advisory_and_does_not_change_scores() {
    let document = candidate("file:///proj/src/lib.rs", "rust");

    let plain: DocumentSelector = serde_json::from_str(r#"{"language": "rust"}"#).unwrap();
    let exclusive: DocumentSelector =
        serde_json::from_str(r#"{"language": "rust", "exclusive": true}"#).unwrap();

    assert_eq!(plain.score(&document), exclusive.score(&document));
}

#[test]
fn selectors_load_from_json_and_toml_files() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("selector.json");
    std::fs::write(&json_path, br#"["rust", {"scheme": "untitled"}]"#).unwrap();
    let from_json = DocumentSelector::from_file(&json_path).unwrap();
    assert_eq!(from_json.clauses().len(), 2);

    let toml_path = dir.path().join("selector.toml");
    std::fs::write(&toml_path, b"language = \"rust\"\nscheme = \"file\"\n").unwrap();
    let from_toml = DocumentSelector::from_file(&toml_path).unwrap();

    let document = candidate("file:///proj/src/lib.rs", "rust");
    assert_eq!(from_toml.score(&document), Score::EXACT);
}

#[test]
fn missing_selector_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = DocumentSelector::from_file(&path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("absent.json"), "{msg}");
}

#[test]
fn malformed_selector_file_reports_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, b"{ language = oops ]").unwrap();
    let err = DocumentSelector::from_file(&path).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("JSON or TOML"), "{msg}");
}
