use anyhow::Result;
use clap::ValueEnum;
use markdown_lens_engine::{
    DecorationEngine, LinkResolver, LinkTarget, ResolvedLink, io,
    snapshot::{render, violations},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn print_decorations(text: &str, format: Format, out: &mut impl Write) -> Result<()> {
    let decorations = DecorationEngine::new().extract(text)?;
    match format {
        Format::Text => write!(out, "{}", render(text, &decorations))?,
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&decorations)?)?,
    }
    Ok(())
}

pub fn print_links(text: &str, file: &Path, format: Format, out: &mut impl Write) -> Result<()> {
    // the file's own directory is the root links resolve against
    let root = file.parent().unwrap_or(Path::new(""));
    let document = io::relative_to(root, file)?;
    let links = LinkResolver::new().resolve(text, Some(&document))?;
    match format {
        Format::Text => {
            for link in &links {
                writeln!(out, "{}", describe(text, link))?;
            }
        }
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&links)?)?,
    }
    Ok(())
}

fn describe(text: &str, link: &ResolvedLink) -> String {
    let range = format!("{}..{}", link.range.start, link.range.end);
    let label = link.range.slice(text).unwrap_or_default();
    let target = match &link.target {
        LinkTarget::External { url } => format!("external {url}"),
        LinkTarget::Anchor {
            fragment,
            heading: Some(heading),
        } => format!("anchor #{fragment} -> {}..{}", heading.start, heading.end),
        LinkTarget::Anchor {
            fragment,
            heading: None,
        } => format!("anchor #{fragment} (no such heading)"),
        LinkTarget::Path {
            path,
            fragment: Some(fragment),
        } => format!("path {path}#{fragment}"),
        LinkTarget::Path {
            path,
            fragment: None,
        } => format!("path {path}"),
    };
    format!("{range:<9} {label:?} {target}")
}

/// Outcome of checking a directory of documents.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub files: usize,
    pub decorations: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn print(&self, out: &mut impl Write) -> Result<()> {
        for (path, problem) in &self.failures {
            writeln!(out, "FAIL {}: {problem}", path.display())?;
        }
        writeln!(
            out,
            "{} files, {} decorations, {} failures",
            self.files,
            self.decorations,
            self.failures.len()
        )?;
        Ok(())
    }
}

/// Extracts every markdown file under `dir` and validates the output.
pub fn check(dir: &Path) -> Result<CheckReport> {
    let engine = DecorationEngine::new();
    let mut report = CheckReport::default();

    for file in io::scan_markdown_files(dir)? {
        report.files += 1;
        let relative = io::relative_to(dir, &file)?;
        let text = match io::read_file(&relative, dir) {
            Ok(text) => text,
            Err(e) => {
                report.failures.push((file, e.to_string()));
                continue;
            }
        };
        match engine.extract(&text) {
            Ok(decorations) => {
                report.decorations += decorations.len();
                for violation in violations(&text, &decorations) {
                    report.failures.push((file.clone(), violation.to_string()));
                }
            }
            Err(e) => report.failures.push((file, e.to_string())),
        }
    }
    log::debug!("checked {} files under {}", report.files, dir.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn decorations_as_text() {
        let text = output(|out| print_decorations("**b** ==h==", Format::Text, out));
        assert_snapshot!(text, @r#"
        hide           0..2      "**"
        hide           3..5      "**"
        bold           2..3      "b"
        hide           6..8      "=="
        hide           9..11     "=="
        highlight      8..9      "h"
        "#);
    }

    #[test]
    fn decorations_as_json() {
        let json = output(|out| print_decorations("*i*", Format::Json, out));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "startPos": 0, "endPos": 1, "type": "hide" },
                { "startPos": 2, "endPos": 3, "type": "hide" },
                { "startPos": 1, "endPos": 2, "type": "italic" }
            ])
        );
    }

    #[test]
    fn links_as_text() {
        let text = "# Top\n\n[site](https://a.io) [up](#top) [next](b.md#x)\n";
        let listing = output(|out| {
            print_links(text, Path::new("notes/day/a.md"), Format::Text, out)
        });
        assert_snapshot!(listing, @r#"
        8..12     "site" external https://a.io
        29..31    "up" anchor #top -> 0..5
        40..44    "next" path b.md#x
        "#);
    }

    #[test]
    fn check_reports_counts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.md"), "**bold**").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/b.md"), "# Title\n").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "*no*").unwrap();

        let report = check(dir.path()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.files, 2);
        assert_eq!(report.decorations, 5);

        let summary = output(|out| report.print(out));
        assert_eq!(summary, "2 files, 5 decorations, 0 failures\n");
    }

    #[test]
    fn check_records_unreadable_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.md"), [0xff, 0xfe]).unwrap();

        let report = check(dir.path()).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.failures.len(), 1);
    }
}
