use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// The directory a project is initialised into.
///
/// Invariants, enforced at construction:
/// - `root` is absolute and lexically normalised (no `.` or `..` components)
/// - `name` is the final component of `root`, valid UTF-8 and non-empty
///
/// Symlinks are not resolved: the directory may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    root: PathBuf,
    name: String,
}

impl ProjectTarget {
    /// Resolve a user-supplied path against `cwd`.
    ///
    /// Absolute inputs ignore `cwd`. The basename of the result becomes the
    /// project name.
    pub fn resolve(input: impl AsRef<Path>, cwd: &Path) -> Result<Self, DomainError> {
        let input = input.as_ref();
        if input.as_os_str().is_empty() {
            return Err(invalid(input, "path cannot be empty"));
        }

        let joined = if input.is_absolute() {
            input.to_path_buf()
        } else {
            cwd.join(input)
        };

        if !joined.is_absolute() {
            return Err(invalid(input, "could not resolve to an absolute path"));
        }

        let root = normalize(&joined);
        let name = root
            .file_name()
            .ok_or_else(|| invalid(input, "path has no final component"))?
            .to_str()
            .ok_or_else(|| invalid(input, "directory name is not valid UTF-8"))?
            .to_string();

        Ok(Self { root, name })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project name (basename of [`Self::root`]).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Join a template-relative path onto the project root.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

impl fmt::Display for ProjectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}

fn invalid(input: &Path, reason: &str) -> DomainError {
    DomainError::InvalidTarget {
        path: input.display().to_string(),
        reason: reason.into(),
    }
}

/// Purely lexical normalisation. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
        }
    }
    out
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        PathBuf::from("/home/dev/work")
    }

    #[test]
    fn plain_name_resolves_under_cwd() {
        let target = ProjectTarget::resolve("my-app", &cwd()).unwrap();
        assert_eq!(target.root(), Path::new("/home/dev/work/my-app"));
        assert_eq!(target.name(), "my-app");
    }

    #[test]
    fn relative_components_are_normalized() {
        let target = ProjectTarget::resolve("./apps/../sites/./blog", &cwd()).unwrap();
        assert_eq!(target.root(), Path::new("/home/dev/work/sites/blog"));
        assert_eq!(target.name(), "blog");
    }

    #[test]
    fn parent_relative_path() {
        let target = ProjectTarget::resolve("../my-app", &cwd()).unwrap();
        assert_eq!(target.root(), Path::new("/home/dev/my-app"));
    }

    #[test]
    fn absolute_input_ignores_cwd() {
        let target = ProjectTarget::resolve("/srv/demo", &cwd()).unwrap();
        assert_eq!(target.root(), Path::new("/srv/demo"));
        assert_eq!(target.name(), "demo");
    }

    #[test]
    fn trailing_slash_keeps_basename() {
        let target = ProjectTarget::resolve("my-app/", &cwd()).unwrap();
        assert_eq!(target.name(), "my-app");
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(
            ProjectTarget::resolve("", &cwd()),
            Err(DomainError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn filesystem_root_has_no_name() {
        assert!(ProjectTarget::resolve("/", &cwd()).is_err());
        assert!(ProjectTarget::resolve("../../../..", &cwd()).is_err());
    }

    #[test]
    fn join_stays_under_root() {
        let target = ProjectTarget::resolve("my-app", &cwd()).unwrap();
        assert_eq!(
            target.join("package.json"),
            PathBuf::from("/home/dev/work/my-app/package.json")
        );
    }
}
