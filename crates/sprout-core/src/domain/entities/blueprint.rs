//! Everything the pipeline does to a freshly cloned template, as data.

use std::path::PathBuf;

/// Built-in starter template.
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/sprout-templates/next-starter.git";

const GLOBALS_CSS: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

const PAGE_TSX: &str = r#"export default function Home() {
  return (
    <main className="flex min-h-screen flex-col items-center justify-center p-24">
      <h1 className="text-4xl font-bold">{{PROJECT_NAME}}</h1>
      <p className="mt-4 text-lg">Edit src/app/page.tsx to get started.</p>
    </main>
  );
}
"#;

/// A file whose whole content is replaced.
///
/// `content` may contain `{{VARIABLE}}` placeholders; see
/// [`crate::domain::RenderContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub path: PathBuf,
    pub content: String,
}

impl Replacement {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// The fixed shape of a new project: where the template comes from and what
/// gets pruned, rewritten, and patched. All paths are relative to the project
/// root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub template_url: String,
    pub pruned_dirs: Vec<PathBuf>,
    pub manifest_file: PathBuf,
    pub stylesheet: Replacement,
    pub removed_files: Vec<PathBuf>,
    pub layout_file: PathBuf,
    /// Component names whose imports and `<Name />` markers are stripped
    /// from the layout file.
    pub layout_symbols: Vec<String>,
    pub page: Replacement,
}

impl Default for Blueprint {
    fn default() -> Self {
        Self {
            template_url: DEFAULT_TEMPLATE_URL.into(),
            pruned_dirs: vec![
                PathBuf::from(".github"),
                PathBuf::from("docs"),
                PathBuf::from("src/components/examples"),
            ],
            manifest_file: PathBuf::from("package.json"),
            stylesheet: Replacement::new("src/app/globals.css", GLOBALS_CSS),
            removed_files: vec![
                PathBuf::from("src/components/Header.tsx"),
                PathBuf::from("src/components/Footer.tsx"),
            ],
            layout_file: PathBuf::from("src/app/layout.tsx"),
            layout_symbols: vec!["Header".into(), "Footer".into()],
            page: Replacement::new("src/app/page.tsx", PAGE_TSX),
        }
    }
}

impl Blueprint {
    /// Same blueprint, different template repository.
    pub fn with_template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_are_relative() {
        let bp = Blueprint::default();
        let all = bp
            .pruned_dirs
            .iter()
            .chain(&bp.removed_files)
            .chain([&bp.manifest_file, &bp.layout_file, &bp.stylesheet.path, &bp.page.path]);
        for path in all {
            assert!(path.is_relative(), "{} is absolute", path.display());
        }
    }

    #[test]
    fn removed_components_match_layout_symbols() {
        let bp = Blueprint::default();
        for symbol in &bp.layout_symbols {
            assert!(
                bp.removed_files
                    .iter()
                    .any(|f| f.file_stem().and_then(|s| s.to_str()) == Some(symbol.as_str())),
                "no removed component for {symbol}"
            );
        }
    }

    #[test]
    fn template_url_override() {
        let bp = Blueprint::default().with_template_url("file:///tmp/starter");
        assert_eq!(bp.template_url, "file:///tmp/starter");
        assert_eq!(bp.manifest_file, PathBuf::from("package.json"));
    }

    #[test]
    fn page_greets_the_project() {
        assert!(Blueprint::default().page.content.contains("{{PROJECT_NAME}}"));
    }
}
