//! Loader for the user's highlights file: one product name per line.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightsError {
    #[error("highlights file \"{}\" not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read highlights file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the highlights file at `path`.
///
/// Blank lines and lines starting with `#` are skipped; every other line is
/// returned as-is (only the line terminator is removed). An empty result is
/// not an error; the caller decides whether to warn.
///
/// # Errors
///
/// Returns [`HighlightsError::NotFound`] if the file does not exist and
/// [`HighlightsError::Io`] for any other read failure.
pub fn load_highlights(path: &Path) -> Result<Vec<String>, HighlightsError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            HighlightsError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            HighlightsError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    Ok(parse_highlights(&content))
}

fn parse_highlights(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let items = parse_highlights("# Obst\nJoghurt\n\nKaffee\n#Kaese\n");
        assert_eq!(items, vec!["Joghurt", "Kaffee"]);
    }

    #[test]
    fn parse_handles_crlf_line_endings() {
        let items = parse_highlights("Joghurt\r\nKaffee\r\n");
        assert_eq!(items, vec!["Joghurt", "Kaffee"]);
    }

    #[test]
    fn parse_keeps_indented_hash_lines() {
        // Only a leading '#' marks a comment.
        let items = parse_highlights("  #1 Bestseller\n");
        assert_eq!(items, vec!["  #1 Bestseller"]);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "Butter").unwrap();
        let items = load_highlights(file.path()).unwrap();
        assert_eq!(items, vec!["Butter"]);
    }

    #[test]
    fn load_returns_empty_list_for_comment_only_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        let items = load_highlights(file.path()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_highlights(&dir.path().join("missing.txt")).unwrap_err();
        assert!(
            matches!(err, HighlightsError::NotFound { .. }),
            "expected NotFound, got: {err:?}"
        );
    }
}
