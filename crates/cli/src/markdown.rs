//! Markdown → plain text cleanup for `.md` corpus files.
//!
//! A lightweight regex pass, not a CommonMark parser:
//! 1. Drop fenced code blocks and inline code spans
//! 2. Keep link text, drop link targets
//! 3. Strip header markers, emphasis markers and list markers
//! 4. Trim every line and drop blank ones

use once_cell::sync::Lazy;
use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("invalid markdown cleanup pattern")
}

static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| pattern(r"```[\s\S]*?```"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| pattern(r"`.*?`"));
static LINK: Lazy<Regex> = Lazy::new(|| pattern(r"\[([^\]]+)\]\([^)]+\)"));
static HEADER: Lazy<Regex> = Lazy::new(|| pattern(r"#+\s*"));
static EMPHASIS: Lazy<Regex> = Lazy::new(|| pattern(r"[*_]{1,2}(.*?)[*_]{1,2}"));
static BULLET: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^\s*[-*+]\s+"));
static NUMBERED: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^\s*\d+\.\s+"));

/// Reduce markdown source to its readable text.
pub fn clean_markdown(source: &str) -> String {
    let text = CODE_BLOCK.replace_all(source, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "${1}");
    let text = HEADER.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "${1}");
    let text = BULLET.replace_all(&text, "");
    let text = NUMBERED.replace_all(&text, "");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document() {
        let source = "# Title\n\nSome **bold** and _it_ text.\n\n- item one\n1. step\n\n\
                      ```rust\nlet x = 1;\n```\nSee [docs](https://x.io/a) and `code`.";
        assert_eq!(
            clean_markdown(source),
            "Title\nSome bold and it text.\nitem one\nstep\nSee docs and ."
        );
    }

    #[test]
    fn test_links_keep_text_only() {
        let cleaned = clean_markdown("Read [the trial](http://example.org/trial-results).");
        assert_eq!(cleaned, "Read the trial.");
        assert!(!cleaned.contains("example"));
    }

    #[test]
    fn test_code_removed() {
        assert_eq!(clean_markdown("```\nfn main() {}\n```"), "");
        assert_eq!(clean_markdown("run `cargo` now"), "run  now");
    }

    #[test]
    fn test_headers_and_lists() {
        assert_eq!(
            clean_markdown("## Methods\n  * alpha\n  + beta\n10. gamma"),
            "Methods\nalpha\nbeta\ngamma"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_markdown("plain words here"), "plain words here");
        assert_eq!(clean_markdown(""), "");
    }
}
