use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document root: {0}")]
    InvalidRoot(String),
    #[error("{path} is not inside {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Read a markdown document relative to `root`
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Splits a file path into its root-relative form, as link resolution
/// expects it.
pub fn relative_to(root: &Path, path: &Path) -> Result<RelativePathBuf, IoError> {
    let outside = || IoError::OutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };
    let stripped = path.strip_prefix(root).map_err(|_| outside())?;
    RelativePathBuf::from_path(stripped).map_err(|_| outside())
}

/// Scan for markdown files under `root`, sorted
pub fn scan_markdown_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_root(root)?;

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_root(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidRoot(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_scan_nested_directories() {
        let root = TempDir::new().unwrap();
        create_test_file(&root, "root.md", "# Root file");
        create_test_file(&root, "sub/nested.md", "# Nested file");

        let files = scan_markdown_files(root.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "root.md"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "nested.md"));
    }

    #[test]
    fn test_ignore_non_markdown_files() {
        let root = TempDir::new().unwrap();
        create_test_file(&root, "document.md", "# Markdown");
        create_test_file(&root, "image.png", "fake image data");
        create_test_file(&root, "notes.markdown.bak", "old");

        let files = scan_markdown_files(root.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "document.md");
    }

    #[test]
    fn test_scan_missing_root() {
        let result = scan_markdown_files(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidRoot(_))));
    }

    #[test]
    fn test_validate_root_rejects_file() {
        let root = TempDir::new().unwrap();
        let file = create_test_file(&root, "a.md", "");
        assert!(validate_root(&file).is_err());
        assert!(validate_root(root.path()).is_ok());
    }

    #[test]
    fn test_read_file_success() {
        let root = TempDir::new().unwrap();
        create_test_file(&root, "notes/test.md", "# Test Content\n\nParagraph");

        let content = read_file(RelativePath::new("notes/test.md"), root.path()).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_file_not_found() {
        let root = TempDir::new().unwrap();
        let result = read_file(RelativePath::new("nonexistent.md"), root.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_relative_to_root() {
        let root = TempDir::new().unwrap();
        let file = create_test_file(&root, "a/b.md", "");
        assert_eq!(
            relative_to(root.path(), &file).unwrap(),
            RelativePathBuf::from("a/b.md")
        );
        assert!(matches!(
            relative_to(&root.path().join("a"), Path::new("/elsewhere/c.md")),
            Err(IoError::OutsideRoot { .. })
        ));
    }
}
