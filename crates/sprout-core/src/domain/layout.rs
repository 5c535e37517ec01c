//! Removing components from a layout source file.
//!
//! This is a line-oriented text transformation, not a parser: an import is
//! recognised only when the whole statement sits on one line.

use regex::Regex;

use crate::domain::error::DomainError;

/// Strips imports and self-closing usages of a set of components.
///
/// For each line of the input:
/// - an `import ... from '...'` line whose import clause names one of the
///   symbols is dropped;
/// - every `<Symbol ... />` marker is removed, and the line is dropped if
///   nothing but whitespace remains;
/// - any other line is kept byte-for-byte, including its line terminator.
#[derive(Debug, Clone)]
pub struct LayoutPatch {
    import_line: Regex,
    symbol: Regex,
    marker: Regex,
}

impl LayoutPatch {
    pub fn new<S: AsRef<str>>(symbols: &[S]) -> Result<Self, DomainError> {
        let alternation = if symbols.is_empty() {
            // Matches nothing.
            r"[^\s\S]".to_string()
        } else {
            symbols
                .iter()
                .map(|s| regex::escape(s.as_ref()))
                .collect::<Vec<_>>()
                .join("|")
        };

        Ok(Self {
            import_line: compile(
                r#"^\s*import\s+(?:type\s+)?(?P<clause>[^;'"]*?)\s+from\s+['"][^'"]*['"]\s*;?\s*$"#,
            )?,
            symbol: compile(&format!(r"\b(?:{alternation})\b"))?,
            marker: compile(&format!(r"<\s*(?:{alternation})\b[^<>]*/>"))?,
        })
    }

    /// Apply the patch to `source`.
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());

        for line in source.split_inclusive('\n') {
            let (body, terminator) = split_terminator(line);

            if self.imports_symbol(body) {
                continue;
            }

            if self.marker.is_match(body) {
                let stripped = self.marker.replace_all(body, "");
                if stripped.trim().is_empty() {
                    continue;
                }
                out.push_str(&stripped);
                out.push_str(terminator);
                continue;
            }

            out.push_str(line);
        }

        out
    }

    fn imports_symbol(&self, line: &str) -> bool {
        self.import_line
            .captures(line)
            .and_then(|caps| caps.name("clause"))
            .is_some_and(|clause| self.symbol.is_match(clause.as_str()))
    }
}

fn compile(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
        reason: e.to_string(),
    })
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
