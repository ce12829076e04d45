use std::sync::OnceLock;

use markdown_readaloud_engine::parsing::tagger::SENTENCE_CLASS;
use regex::{Captures, Regex};

const DEBUG_COLORS: [&str; 2] = ["lightblue", "lightcoral"];

const STYLE: &str = "\
body { max-width: 42em; margin: 2em auto; font-family: sans-serif; line-height: 1.6; }
.sent.highlight { background-color: #ffe066; }
";

fn sentence_open_tag() -> &'static Regex {
    static SENTENCE_OPEN_TAG: OnceLock<Regex> = OnceLock::new();
    SENTENCE_OPEN_TAG.get_or_init(|| {
        Regex::new(&format!(r#"<span class="{SENTENCE_CLASS}" id="[^"]*""#))
            .expect("Invalid sentence span regex")
    })
}

/// Gives sentence spans alternating background colours so their boundaries
/// can be checked by eye.
///
/// Works on the markup text rather than a parsed tree: a sentence may end
/// inside inline markup, leaving its span with unbalanced tags that a
/// re-parse would repair and so alter.
pub fn mark_sentence_boundaries(html: &str) -> String {
    let mut count = 0;
    sentence_open_tag()
        .replace_all(html, |open: &Captures<'_>| {
            let color = DEBUG_COLORS[count % DEBUG_COLORS.len()];
            count += 1;
            format!(r#"{} style="background-color: {color}""#, &open[0])
        })
        .into_owned()
}

/// Wraps a tagged fragment in a complete HTML page.
pub fn standalone_page(title: &str, body: &str) -> String {
    let title = html_escape::encode_text(title);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}
