use super::{build_tree, load_document, split_anchor};
use crate::content::{HeadingRank, NodeKind};
use crate::formats::markdown::MarkdownFormat;
use crate::outline;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const DOC: &str = "\
# Alpha

Some prose.

## Beta {#custom-beta}

More prose.

#### Too Deep

### Gamma
";

#[test]
fn test_builds_rank_tagged_headings_in_order() {
    let tree = build_tree(DOC, &MarkdownFormat);

    let headings = tree.headings();
    assert_eq!(headings.len(), 3);

    let ranks: Vec<HeadingRank> = headings
        .iter()
        .map(|&id| match tree.node(id).kind {
            NodeKind::Heading(rank) => rank,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        ranks,
        vec![HeadingRank::H1, HeadingRank::H2, HeadingRank::H3]
    );

    let texts: Vec<&str> = headings
        .iter()
        .map(|&id| tree.node(id).text.as_str())
        .collect();
    assert_eq!(texts, vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn test_deep_headings_stay_out_of_the_outline() {
    let mut tree = build_tree(DOC, &MarkdownFormat);
    let entries = outline::extract(&mut tree);

    assert!(entries.iter().all(|e| e.text != "Too Deep"));
}

#[test]
fn test_explicit_anchor_survives_into_the_outline() {
    let mut tree = build_tree(DOC, &MarkdownFormat);
    let entries = outline::extract(&mut tree);

    let beta = entries.iter().find(|e| e.text == "Beta").expect("Beta");
    assert_eq!(beta.id, "custom-beta");
}

#[test]
fn test_heading_rows_match_source_lines() {
    let tree = build_tree(DOC, &MarkdownFormat);
    let headings = tree.headings();

    assert_eq!(tree.node(headings[0]).row, 0);
    assert_eq!(tree.node(headings[1]).row, 4);
}

#[test]
fn test_load_document_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{DOC}").unwrap();

    let doc = load_document(file.path(), &MarkdownFormat).unwrap();

    assert_eq!(doc.source, DOC);
    assert_eq!(doc.tree.headings().len(), 3);
}

#[test]
fn test_missing_file_is_an_error_for_the_caller_to_retry() {
    assert!(load_document(Path::new("/definitely/not/here.md"), &MarkdownFormat).is_err());
}

#[test]
fn test_parse_of_empty_source_yields_empty_tree() {
    let tree = build_tree("", &MarkdownFormat);
    assert!(tree.headings().is_empty());
}

#[test]
fn test_split_anchor_variants() {
    assert_eq!(
        split_anchor("Title {#my-id}"),
        ("Title".to_string(), Some("my-id".to_string()))
    );
    assert_eq!(split_anchor("Plain title"), ("Plain title".to_string(), None));
    // Whitespace inside the marker makes it literal text.
    assert_eq!(
        split_anchor("Odd {#two words}"),
        ("Odd {#two words}".to_string(), None)
    );
    assert_eq!(split_anchor("Empty {#}"), ("Empty {#}".to_string(), None));
}
