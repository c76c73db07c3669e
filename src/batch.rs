//! Batch input
//!
//! Turns command-line arguments into the list of terms to define: either the
//! arguments themselves, or the pieces of a `.txt` file split on a delimiter.

use crate::error::DefineResult;
use std::path::PathBuf;
use tracing::info;

/// Term looked up when no input is given
pub const DEMO_TERM: &str = "aggregate demand";

/// Delimiter used when a file is given without one
pub const DEFAULT_DELIMITER: &str = "\n";

/// Where the terms come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// No input, define the demo term
    Demo,
    /// Terms given inline
    Terms(Vec<String>),
    /// A text file of terms separated by `delimiter`
    File { path: PathBuf, delimiter: String },
}

impl Batch {
    /// Classify command-line inputs
    ///
    /// A first argument containing `.txt` names a file, and an optional
    /// second argument gives its delimiter. Escapes such as `\n` and `\t`
    /// in the delimiter are expanded. Anything else is a list of terms.
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [] => Batch::Demo,
            [first, rest @ ..] if first.contains(".txt") => Batch::File {
                path: PathBuf::from(first),
                delimiter: rest
                    .first()
                    .map(|d| unescape(d))
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            },
            terms => Batch::Terms(terms.to_vec()),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Batch::Demo)
    }

    /// Terms to look up, in order
    ///
    /// Empty pieces are dropped. A trailing `\r` is removed from each piece
    /// so files with CRLF line endings split cleanly.
    pub fn queries(&self) -> DefineResult<Vec<String>> {
        let queries = match self {
            Batch::Demo => vec![DEMO_TERM.to_string()],
            Batch::Terms(terms) => terms.iter().filter(|t| !t.is_empty()).cloned().collect(),
            Batch::File { path, delimiter } => {
                let content = std::fs::read_to_string(path)?;
                let queries = split_terms(&content, delimiter);
                info!("📄 Read {} terms from {}", queries.len(), path.display());
                queries
            }
        };
        Ok(queries)
    }
}

/// Split `content` on `delimiter`, dropping empty pieces
pub fn split_terms(content: &str, delimiter: &str) -> Vec<String> {
    content
        .split(delimiter)
        .map(|piece| piece.strip_suffix('\r').unwrap_or(piece))
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expand `\n`, `\t`, `\r` and `\\` typed literally on the command line
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_is_demo() {
        let batch = Batch::from_args(&[]);
        assert!(batch.is_demo());
        assert_eq!(batch.queries().unwrap(), vec![DEMO_TERM.to_string()]);
    }

    #[test]
    fn test_inline_terms() {
        let batch = Batch::from_args(&args(&["gdp", "", "inflation"]));
        assert_eq!(batch, Batch::Terms(args(&["gdp", "", "inflation"])));
        assert_eq!(batch.queries().unwrap(), args(&["gdp", "inflation"]));
    }

    #[test]
    fn test_txt_file_detection() {
        assert_eq!(
            Batch::from_args(&args(&["chapter1.txt"])),
            Batch::File {
                path: PathBuf::from("chapter1.txt"),
                delimiter: "\n".to_string(),
            }
        );
        assert_eq!(
            Batch::from_args(&args(&["chapter1.txt", "\\t"])),
            Batch::File {
                path: PathBuf::from("chapter1.txt"),
                delimiter: "\t".to_string(),
            }
        );
        assert_eq!(
            Batch::from_args(&args(&["chapter1.txt", ","])),
            Batch::File {
                path: PathBuf::from("chapter1.txt"),
                delimiter: ",".to_string(),
            }
        );
    }

    #[test]
    fn test_split_terms() {
        assert_eq!(
            split_terms("gdp\r\ninflation\r\n\r\n", "\n"),
            args(&["gdp", "inflation"])
        );
        assert_eq!(split_terms("a;b;;c", ";"), args(&["a", "b", "c"]));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("\\n"), "\n");
        assert_eq!(unescape("a\\\\b"), "a\\b");
        assert_eq!(unescape("\\x"), "\\x");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
