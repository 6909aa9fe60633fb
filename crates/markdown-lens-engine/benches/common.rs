// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section ##\n\nParagraph with **bold**, *italic*, ***both*** and `code`.\n\n> quoted line\n> with ==highlight==\n\n- [a link](other.md#part)\n- ![image](pic.png)\n- [reference][ref]\n\n---\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n[ref]: https://example.com\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_inline_heavy(lines: usize) -> String {
    let mut content = String::new();
    for i in 0..lines {
        content.push_str(&format!(
            "Line {i} has **b{i}** and *i{i}* and ~~s{i}~~ and ==h{i}== and `c{i}`.\n"
        ));
    }
    content
}
