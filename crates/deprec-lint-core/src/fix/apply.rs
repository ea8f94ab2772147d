use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::{TextEdit, normalize_file_path};

#[derive(Debug)]
pub enum FixError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MixedFiles {
        expected: String,
        found: String,
    },
    Overlap {
        first: (u32, u32),
        second: (u32, u32),
    },
    InvalidSpan {
        start: u32,
        end: u32,
        len: usize,
    },
}

impl Display for FixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to process fix file '{}': {source}", path.display())
            }
            Self::MixedFiles { expected, found } => {
                write!(f, "fix edits span multiple files ('{expected}' and '{found}')")
            }
            Self::Overlap { first, second } => {
                write!(
                    f,
                    "fix edits {}..{} and {}..{} overlap",
                    first.0, first.1, second.0, second.1
                )
            }
            Self::InvalidSpan { start, end, len } => {
                write!(f, "fix span {start}..{end} is invalid for content of {len} bytes")
            }
        }
    }
}

impl Error for FixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Applies a set of non-overlapping edits to one file's content.
///
/// All edits must target the same file. They are applied back to front so
/// earlier offsets stay valid while later spans are rewritten.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    let file = normalize_file_path(&edits[0].span.file);
    for edit in edits {
        let edit_file = normalize_file_path(&edit.span.file);
        if edit_file != file {
            return Err(FixError::MixedFiles {
                expected: file,
                found: edit_file,
            });
        }
    }

    let mut ordered = edits.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|edit| (edit.span.start, edit.span.end));

    for window in ordered.windows(2) {
        let left = &window[0].span;
        let right = &window[1].span;
        if spans_overlap(left.start, left.end, right.start, right.end) {
            return Err(FixError::Overlap {
                first: (left.start, left.end),
                second: (right.start, right.end),
            });
        }
    }

    let mut content = source.to_string();
    for edit in ordered.iter().rev() {
        let start = edit.span.start as usize;
        let end = edit.span.end as usize;
        if content.get(start..end).is_none() {
            return Err(FixError::InvalidSpan {
                start: edit.span.start,
                end: edit.span.end,
                len: content.len(),
            });
        }
        content.replace_range(start..end, &edit.replacement);
    }

    Ok(content)
}

/// Applies edits to a file on disk. The file is left untouched when the
/// edits are a no-op, so re-running a fix is idempotent.
pub fn apply_edits_to_file(root: &Path, file: &str, edits: &[TextEdit]) -> Result<bool, FixError> {
    let path = resolve_path(root, file);
    let content = fs::read_to_string(&path).map_err(|source| FixError::Io {
        path: path.clone(),
        source,
    })?;
    let rewritten = apply_edits(&content, edits)?;
    if rewritten == content {
        return Ok(false);
    }
    fs::write(&path, rewritten).map_err(|source| FixError::Io { path, source })?;
    Ok(true)
}

fn resolve_path(root: &Path, file: &str) -> PathBuf {
    let file_path = Path::new(file);
    if file_path.is_absolute() {
        return file_path.to_path_buf();
    }
    root.join(file_path)
}

fn spans_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    let a_zero = a_start == a_end;
    let b_zero = b_start == b_end;

    match (a_zero, b_zero) {
        (true, true) => a_start == b_start,
        // Insertion at the boundary of a replacement depends on application
        // order, so it is rejected as a conflict.
        (true, false) => b_start <= a_start && a_start < b_end,
        (false, true) => a_start <= b_start && b_start < a_end,
        (false, false) => a_start < b_end && b_start < a_end,
    }
}
