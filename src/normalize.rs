//! Text normalization for model output.
//!
//! The upstream model is asked for plain prose but does not always comply.
//! [`clean`] strips the common markdown leftovers and flattens the text into a
//! single paragraph so it fits in one CSV cell. It is a best-effort sanitizer,
//! not a markdown parser: nested emphasis, links, headers and block quotes
//! pass through untouched.
//!
//! # Pass order
//!
//! 1. `**bold**` -> `bold`
//! 2. `*italic*` -> `italic`
//! 3. `` `code` `` / ` ```fence``` ` -> inner text
//! 4. leading `-` / `*` bullets removed (per line)
//! 5. runs of `\r`, `\n`, `\t` -> one space
//! 6. runs of any whitespace -> one space
//! 7. trim
//!
//! Later passes see the output of earlier ones, so the order must not change.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`{1,3}(.*?)`{1,3}").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-*]\s+").unwrap());
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t]+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip markdown residue from `text` and collapse it into a single line.
///
/// Total: every input, including the empty string, yields a string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean("**Short** summary."), "Short summary.");
/// assert_eq!(clean("- item one\n* item two"), "item one item two");
/// ```
pub fn clean(text: &str) -> String {
    let text = BOLD.replace_all(text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = CODE.replace_all(&text, "${1}");
    let text = BULLET.replace_all(&text, "");

    let text = LINE_BREAKS.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");

    text.trim().to_string()
}
