pub mod page;
pub mod sitemap;
pub mod title;

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode structured data: {0}")]
    StructuredData(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct RenderService;

impl RenderService {
    pub fn name(&self) -> &'static str {
        "render"
    }

    pub fn status(&self) -> &'static str {
        "ready"
    }
}

/// Replaces `path` in full, creating parent directories as needed.
pub(crate) fn write_output(path: &Path, contents: &str) -> Result<(), RenderError> {
    let to_error = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(to_error)
}

/// Escapes text for HTML content, attribute values and XML character data.
pub(crate) fn escape_markup(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_markup_borrows_clean_text() {
        assert!(matches!(escape_markup("요약 노트"), Cow::Borrowed(_)));
        assert_eq!(
            escape_markup(r#"<a href="x">Q&A's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Q&amp;A&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn write_output_creates_parent_dirs_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir should exist");
        let path = dir.path().join("public/index.html");

        write_output(&path, "first").expect("first write");
        write_output(&path, "second").expect("second write");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "second");
    }
}
