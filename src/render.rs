//! Terminal rendering of lookup results

use crate::fuzzy_map::{SearchResult, Suggestion};
use lazy_static::lazy_static;
use regex::Regex;

/// ANSI escape codes
pub mod colors {
    pub const BG_WHITE: &str = "\x1b[47m";
    pub const BG_YELLOW: &str = "\x1b[43m";
    pub const PURPLE: &str = "\x1b[35m";
    pub const RED: &str = "\x1b[31m";
    pub const BLACK: &str = "\x1b[30m";
    pub const UNDERLINE: &str = "\x1b[4m";
    pub const END: &str = "\x1b[0m";
}

use colors::*;

/// Matches below this ratio show which key was substituted
pub const DEFAULT_SUBSTITUTION_THRESHOLD: f64 = 0.97;

lazy_static! {
    // `_span_` marks emphasized text inside definitions
    static ref EMPHASIS: Regex = Regex::new(r"_(.+?)_").expect("emphasis pattern is valid");
}

/// How lookup results are printed
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub color: bool,
    pub substitution_threshold: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            substitution_threshold: DEFAULT_SUBSTITUTION_THRESHOLD,
        }
    }
}

impl RenderOptions {
    fn paint(&self, codes: &[&str], text: &str) -> String {
        if self.color {
            format!("{}{}{}", codes.concat(), text, END)
        } else {
            text.to_string()
        }
    }

    /// Print a short command in red, used in usage hints
    pub fn command(&self, text: &str) -> String {
        self.paint(&[RED], text)
    }
}

/// Underline `_span_` markup, or strip the markers when color is off
pub fn emphasize(definition: &str, color: bool) -> String {
    let replacement = if color {
        format!("{}$1{}", UNDERLINE, END)
    } else {
        "$1".to_string()
    };
    EMPHASIS
        .replace_all(definition, replacement.as_str())
        .into_owned()
}

/// Render one lookup
///
/// A match prints the query, the substituted key when the match was not
/// (nearly) exact, and the definition. A miss prints the closest key and up
/// to `closest.len()` alternatives.
pub fn render_lookup(
    query: &str,
    result: &SearchResult<'_>,
    closest: &[Suggestion],
    opts: &RenderOptions,
) -> String {
    let mut message = opts.paint(&[BG_WHITE, BLACK], query);

    match (result.matched, result.key, result.value) {
        (true, Some(key), Some(definition)) => {
            if result.ratio < opts.substitution_threshold {
                message.push_str(" -> ");
                message.push_str(&opts.paint(&[BG_YELLOW, BLACK], key));
            }
            message.push_str(": ");
            message.push_str(&emphasize(definition, opts.color));
        }
        _ => {
            message.push_str(": no definition found");
            if let Some(key) = result.key {
                message.push_str(&format!(
                    " (closest match: '{}' with ratio {:.3})",
                    key, result.ratio
                ));
            }
            for suggestion in closest {
                message.push_str(&format!(
                    "\n  did you mean {}? ({:.3})",
                    opts.paint(&[PURPLE], &suggestion.key),
                    suggestion.ratio
                ));
            }
        }
    }

    message
}
