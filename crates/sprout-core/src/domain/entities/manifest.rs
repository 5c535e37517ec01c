//! The project manifest (`package.json`).
//!
//! The manifest is kept as an ordered JSON object so that fields this crate
//! does not know about survive a rewrite untouched and in their original
//! position.

use std::fmt;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Version written into every freshly initialised manifest.
pub const INITIAL_VERSION: &str = "0.0.0";

/// Keys dropped from the template's manifest.
pub const REMOVED_KEYS: [&str; 2] = ["keywords", "author"];

/// Ordered `package.json` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest text. The top-level value must be an object.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let value: Value = serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DomainError::ManifestNotObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Stamp the manifest with the new project's identity.
    ///
    /// `name`, `version` and `description` keep their position when present
    /// and are appended otherwise. `keywords` and `author` are removed without
    /// disturbing the order of the remaining keys. `scripts` is never touched.
    pub fn apply_project_identity(&mut self, project_name: &str) {
        self.fields
            .insert("name".into(), Value::String(project_name.into()));
        self.fields
            .insert("version".into(), Value::String(INITIAL_VERSION.into()));
        self.fields
            .insert("description".into(), Value::String(String::new()));
        for key in REMOVED_KEYS {
            self.fields.shift_remove(key);
        }
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut text =
            serde_json::to_string_pretty(&self.fields).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;
        text.push('\n');
        Ok(text)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Entries of the `scripts` mapping in manifest order.
    ///
    /// A missing or non-object `scripts` yields nothing. Non-string commands
    /// are rendered as compact JSON.
    pub fn scripts(&self) -> Vec<Script> {
        let Some(Value::Object(scripts)) = self.fields.get("scripts") else {
            return Vec::new();
        };

        scripts
            .iter()
            .map(|(name, command)| Script {
                name: name.clone(),
                command: match command {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One entry of the manifest's `scripts` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub command: String,
}

/// What the final report shows about available scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSummary {
    /// `(invocation, command)` pairs, e.g. `("npm run dev", "next dev")`.
    Available(Vec<(String, String)>),
    /// The manifest has no scripts.
    Empty,
    /// The manifest could not be re-read.
    Unavailable,
}

impl ScriptSummary {
    pub const EMPTY_MESSAGE: &'static str = "No scripts available.";
    pub const UNAVAILABLE_MESSAGE: &'static str = "Unable to fetch scripts.";

    /// Build a summary from scripts, using `invoke` to turn a script name
    /// into the command a user would type.
    pub fn from_scripts(scripts: Vec<Script>, invoke: impl Fn(&str) -> String) -> Self {
        if scripts.is_empty() {
            return Self::Empty;
        }
        Self::Available(
            scripts
                .into_iter()
                .map(|s| (invoke(&s.name), s.command))
                .collect(),
        )
    }

    /// Human-readable lines: `<invocation> -> <command>` or a fallback message.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Available(entries) => entries
                .iter()
                .map(|(invocation, command)| format!("{invocation} -> {command}"))
                .collect(),
            Self::Empty => vec![Self::EMPTY_MESSAGE.into()],
            Self::Unavailable => vec![Self::UNAVAILABLE_MESSAGE.into()],
        }
    }
}

impl fmt::Display for ScriptSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
