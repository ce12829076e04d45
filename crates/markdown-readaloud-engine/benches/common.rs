// Shared by the bench targets in this directory; each one only uses part.
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content. It has *two* sentences.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_long_paragraph(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("Sentence number {i} has a **bold** word and a [link](#s{i}). "))
        .collect()
}
