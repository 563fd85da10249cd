//! Corpus directory loading.
//!
//! Every regular file directly under the directory whose extension is `txt`
//! or `md` becomes one document, named by its file stem minus any `summary_`
//! prefix. Markdown files are reduced to plain text first; text files are
//! indexed verbatim.

use crate::markdown::clean_markdown;
use quarry_core::{Document, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

const EXTENSIONS: &[&str] = &["txt", "md"];

/// Prefix the summarizer puts on generated file names
const SUMMARY_PREFIX: &str = "summary_";

/// Document name for a file stem
fn document_name(stem: &str) -> &str {
    match stem.strip_prefix(SUMMARY_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => stem,
    }
}

/// Read the corpus documents under `dir`, ordered by file name.
///
/// Files that are not valid UTF-8 are skipped with a warning.
///
/// # Errors
///
/// Returns `Error::Io` if the directory cannot be listed or a file
/// cannot be read.
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let wanted = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| EXTENSIONS.contains(&e));
        if wanted {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "Skipping file with non-UTF-8 name");
            continue;
        };
        let bytes = fs::read(&path)?;
        let Ok(content) = String::from_utf8(bytes) else {
            warn!(path = %path.display(), "Skipping non-UTF-8 file");
            continue;
        };
        let content = if path.extension().map_or(false, |e| e == "md") {
            clean_markdown(&content)
        } else {
            content
        };
        documents.push(Document::new(document_name(stem), content));
    }
    Ok(documents)
}
