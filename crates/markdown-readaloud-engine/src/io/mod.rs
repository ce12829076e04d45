use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a markdown file: {0}")]
    NotMarkdown(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "txt"];

/// Read a markdown document from disk
pub fn read_markdown_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    if !is_markdown_file(path) {
        return Err(IoError::NotMarkdown(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write rendered output, creating parent directories as needed
pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
