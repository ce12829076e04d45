//! Integration tests for the parsing module.
//!
//! Fixtures (.md) and snapshots (.snap) are co-located in `fixtures/`. Each
//! snapshot holds the tagged HTML followed by the sentence map.

use std::fmt::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    ParsedDocument, parse_markdown,
    segment::{extract_tags, split_html_to_sentences},
    tag_html,
};

// Fixture-based snapshot tests

#[test]
fn fixture_headings_and_paragraphs() {
    assert_fixture("headings_and_paragraphs");
}

#[test]
fn fixture_inline_markup() {
    assert_fixture("inline_markup");
}

#[test]
fn fixture_lists() {
    assert_fixture("lists");
}

fn render(doc: &ParsedDocument) -> String {
    let mut out = doc.html.trim_end().to_string();
    out.push_str("\n\n# sentences\n");
    for (id, text) in &doc.sentences {
        let _ = writeln!(out, "{id} {text:?}");
    }
    out
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let doc = parse_markdown(&md).unwrap();

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, render(&doc));
    });
}

// Scenarios

#[test]
fn heading_and_paragraph_are_tagged() {
    let doc = parse_markdown("# Title\n\nHello world. Goodbye now.").unwrap();

    assert_eq!(
        doc.html,
        concat!(
            r#"<h1 id="element-002"><span class="sent" id="element-002-sent000">Title</span></h1>"#,
            "\n",
            r#"<p id="element-003"><span class="sent" id="element-003-sent000">Hello world.</span>"#,
            r#"<span class="sent" id="element-003-sent001"> Goodbye now.</span></p>"#,
            "\n"
        )
    );

    let texts: Vec<_> = doc.sentences.values().map(|t| t.trim()).collect();
    assert_eq!(texts, vec!["Title", "Hello world.", "Goodbye now."]);
}

#[test]
fn emphasis_stays_at_its_original_position() {
    let doc = parse_markdown("This is **bold** text. Next sentence.").unwrap();

    assert_eq!(
        doc.html,
        concat!(
            r#"<p id="element-002">"#,
            r#"<span class="sent" id="element-002-sent000">"#,
            r#"This is <strong id="element-003">bold</strong> text.</span>"#,
            r#"<span class="sent" id="element-002-sent001"> Next sentence.</span>"#,
            "</p>\n"
        )
    );
    assert_eq!(doc.sentences["element-002-sent000"], "This is bold text.");
}

#[test]
fn item_with_only_a_nested_list_has_no_empty_paragraph() {
    let doc = tag_html("<ul>\n<li>\n<ol>\n<li>Deep</li>\n</ol>\n</li>\n</ul>").unwrap();

    assert_eq!(
        doc.html,
        concat!(
            "<ul id=\"element-002\">\n<li id=\"element-003\">\n<ol id=\"element-004\">\n",
            r#"<li id="element-005"><p id="element-006">"#,
            r#"<span class="sent" id="element-006-sent000">Deep</span></p></li>"#,
            "\n</ol>\n</li>\n</ul>"
        )
    );
}

#[test]
fn list_items_are_narrated_as_paragraphs() {
    let doc = parse_markdown("- One. Two.\n- Three\n").unwrap();

    assert!(!doc.html.contains("pp"));
    let texts: Vec<_> = doc.sentences.values().map(|t| t.trim()).collect();
    assert_eq!(texts, vec!["One.", "Two.", "Three"]);
}

#[test]
fn code_blocks_are_not_narrated() {
    let doc = parse_markdown("Intro.\n\n```\nlet x = 1. y = 2.\n```\n").unwrap();

    assert_eq!(doc.sentences.len(), 1);
    assert!(doc.html.contains("<pre id=\"element-003\"><code id=\"element-004\">"));
}

#[test]
fn empty_document_has_no_sentences() {
    let doc = parse_markdown("").unwrap();

    assert_eq!(doc.html, "");
    assert!(doc.sentences.is_empty());
}

#[rstest]
#[case::comment("<!-- unterminated comment")]
#[case::processing_instruction("<?php echo 1;")]
#[case::cdata("<![CDATA[ open")]
fn unterminated_raw_html_does_not_lose_earlier_blocks(#[case] raw: &str) {
    // Given raw HTML that never closes, after an ordinary paragraph
    let md = format!("Before.\n\n{raw}\n\nHello world.\n");

    // When the document is parsed
    let doc = parse_markdown(&md).unwrap();

    // Then the paragraph is tagged and the raw HTML is passed through untouched
    assert_eq!(
        doc.sentences.values().collect::<Vec<_>>(),
        vec!["Before."]
    );
    assert!(doc.html.starts_with(r#"<p id="element-002"><span class="sent""#));
    assert!(doc.html.contains(&format!("{raw}\n\nHello world.")));
}

// Properties

#[rstest]
#[case::plain("<p>Hello world. Goodbye now.</p>")]
#[case::emphasis("<p>This is <strong>bold</strong> text. Next sentence.</p>")]
#[case::link_at_boundary(r#"<p>See <a href="/x">here.</a> Then more.</p>"#)]
#[case::ends_in_markup("<p>Ends with <em>emphasis</em></p>")]
#[case::line_break("<p>First line<br />\nsecond line. Third.</p>")]
#[case::entities("<p>Fish &amp; chips. A &lt; B!</p>")]
#[case::nested("<h2>A <em>deeply <code>nested</code></em> title? Yes.</h2>")]
fn fragments_round_trip_the_interior_html(#[case] block: &str) {
    let interior = &block[block.find('>').unwrap() + 1..block.rfind('<').unwrap()];

    let fragments = split_html_to_sentences(block);

    assert_eq!(fragments.html.concat(), interior);
}

#[rstest]
#[case::plain("<p>Hello world. Goodbye now.</p>")]
#[case::emphasis("<p>This is <strong>bold</strong> text. Next sentence.</p>")]
#[case::whitespace("<p>  Spaced.   Out.  </p>")]
#[case::entities("<p>Fish &amp; chips. A &lt; B!</p>")]
fn text_fragments_cover_the_stripped_text(#[case] block: &str) {
    let interior = &block[block.find('>').unwrap() + 1..block.rfind('<').unwrap()];

    let fragments = split_html_to_sentences(block);

    assert_eq!(fragments.text.concat(), extract_tags(interior).0);
}

#[test]
fn sorted_keys_follow_document_order() {
    // Enough blocks to need four-digit element ids.
    let md: String = (0..1000)
        .map(|i| format!("Paragraph {i} opens. It closes.\n\n"))
        .collect();

    let doc = parse_markdown(&md).unwrap();

    let in_document: Vec<&str> = doc
        .html
        .match_indices(r#"class="sent" id=""#)
        .map(|(at, m)| {
            let rest = &doc.html[at + m.len()..];
            &rest[..rest.find('"').unwrap()]
        })
        .collect();
    let sorted: Vec<&str> = doc.sentence_ids().collect();

    assert_eq!(in_document.len(), 2000);
    assert_eq!(sorted, in_document);
    assert_eq!(sorted[0], "element-0002-sent000");
}

#[test]
fn retagging_rendered_markdown_is_deterministic() {
    let md = "# A\n\nOne. Two.\n\n- three\n  - four\n";

    assert_eq!(parse_markdown(md).unwrap(), parse_markdown(md).unwrap());
}

#[test]
fn raw_html_without_ids_uses_unique_fallbacks() {
    // Tagger alone, without the id pass.
    let mut root = crate::parsing::html::parse_fragment("<p>One.</p><p>Two.</p>").unwrap();
    let sentences = crate::parsing::tag_sentences(&mut root);

    assert_eq!(
        sentences.keys().collect::<Vec<_>>(),
        vec!["block-001-sent000", "block-002-sent000"]
    );
}

#[test]
fn every_block_gets_a_structural_id() {
    let doc = tag_html("<div><p>Inside.</p></div>").unwrap();

    assert_eq!(
        doc.html,
        concat!(
            r#"<div id="element-002"><p id="element-003">"#,
            r#"<span class="sent" id="element-003-sent000">Inside.</span></p></div>"#
        )
    );
}
