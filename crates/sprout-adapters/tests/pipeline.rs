//! End-to-end runs of the init pipeline over real adapters, with scripted
//! external commands.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sprout_adapters::{
    CommandOutput, CommandRunner, GitCli, LocalFilesystem, MemoryFilesystem, NodePackageManager,
    PackageManagerKind, RecordingRunner,
};
use sprout_core::prelude::*;

const MANIFEST: &str = r#"{
  "name": "next-starter",
  "version": "3.1.0",
  "private": true,
  "description": "Starter kit",
  "keywords": ["next", "starter"],
  "author": "Starter Team",
  "scripts": {
    "dev": "next dev",
    "build": "next build",
    "start": "next start"
  },
  "dependencies": {
    "next": "14.2.0"
  }
}
"#;

const LAYOUT: &str = "import type { Metadata } from \"next\";\n\
import Header from \"@/components/Header\";\n\
import Footer from \"@/components/Footer\";\n\
import \"./globals.css\";\n\
\n\
export default function RootLayout({ children }) {\n\
  return (\n\
    <html lang=\"en\">\n\
      <body>\n\
        <Header />\n\
        {children}\n\
        <Footer />\n\
      </body>\n\
    </html>\n\
  );\n\
}\n";

/// Template files as `git clone` would leave them, relative to the root.
fn template_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("package.json", MANIFEST),
        (".git/HEAD", "ref: refs/heads/main\n"),
        (".git/config", "[remote \"origin\"]\n"),
        (".github/workflows/ci.yml", "on: push\n"),
        ("docs/intro.md", "# Intro\n"),
        ("src/components/examples/Demo.tsx", "export {}\n"),
        ("src/components/Header.tsx", "export default function Header() {}\n"),
        ("src/components/Footer.tsx", "export default function Footer() {}\n"),
        ("src/app/globals.css", "body { margin: 0; }\n"),
        ("src/app/layout.tsx", LAYOUT),
        ("src/app/page.tsx", "export default function Home() { return null; }\n"),
        ("README.md", "# next-starter\n"),
    ]
}

/// Runner whose `git clone` seeds `fs`, `git init` recreates `.git`, and
/// `install` drops a `node_modules` marker.
fn scripted_runner(fs: MemoryFilesystem) -> RecordingRunner {
    RecordingRunner::with_handler(move |spec| {
        match spec.args.first().and_then(|a| a.to_str()) {
            Some("clone") => {
                let dest = spec
                    .args
                    .last()
                    .map(PathBuf::from)
                    .ok_or_else(|| io::Error::other("no destination"))?;
                for (rel, content) in template_files() {
                    fs.add_file(dest.join(rel), content);
                }
            }
            Some("init") => {
                let root = spec.cwd.clone().ok_or_else(|| io::Error::other("no cwd"))?;
                fs.add_file(root.join(".git/HEAD"), "ref: refs/heads/master\n");
            }
            Some("install") => {
                let root = spec.cwd.clone().ok_or_else(|| io::Error::other("no cwd"))?;
                fs.add_file(root.join("node_modules/.package-lock.json"), "{}");
            }
            _ => {}
        }
        Ok(CommandOutput::ok())
    })
}

fn pipeline(
    fs: &MemoryFilesystem,
    runner: &RecordingRunner,
    kind: PackageManagerKind,
) -> InitPipeline {
    InitPipeline::new(
        Blueprint::default(),
        Box::new(fs.clone()),
        Box::new(GitCli::with_runner("git", runner.clone())),
        Box::new(NodePackageManager::with_runner(kind, runner.clone())),
    )
}

fn target(name: &str) -> ProjectTarget {
    ProjectTarget::resolve(name, Path::new("/work")).unwrap()
}

#[test]
fn creates_a_customized_project() {
    let fs = MemoryFilesystem::new();
    let runner = scripted_runner(fs.clone());

    let report = pipeline(&fs, &runner, PackageManagerKind::Npm)
        .run(target("my-app"), &SilentReporter)
        .unwrap();

    assert_eq!(report.project_name, "my-app");
    assert_eq!(report.root, PathBuf::from("/work/my-app"));
    assert!(report.warnings.is_empty());

    let manifest: Value =
        serde_json::from_str(&fs.read_file("/work/my-app/package.json").unwrap()).unwrap();
    assert_eq!(manifest["name"], "my-app");
    assert_eq!(manifest["version"], "0.0.0");
    assert_eq!(manifest["description"], "");
    assert!(manifest.get("keywords").is_none());
    assert!(manifest.get("author").is_none());
    assert_eq!(manifest["private"], true);
    assert_eq!(manifest["dependencies"]["next"], "14.2.0");

    for gone in [".github", "docs", "src/components/examples"] {
        assert!(!fs.exists(&Path::new("/work/my-app").join(gone)), "{gone} survived");
    }
    assert!(fs.read_file("/work/my-app/src/components/Header.tsx").is_none());
    assert!(fs.read_file("/work/my-app/src/components/Footer.tsx").is_none());
    assert_eq!(
        fs.read_file("/work/my-app/README.md").as_deref(),
        Some("# next-starter\n")
    );

    let css = fs.read_file("/work/my-app/src/app/globals.css").unwrap();
    assert_eq!(css, "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n");

    let layout = fs.read_file("/work/my-app/src/app/layout.tsx").unwrap();
    assert!(!layout.contains("Header"));
    assert!(!layout.contains("Footer"));
    assert!(layout.contains("import \"./globals.css\";"));
    assert!(layout.contains("{children}"));

    let page = fs.read_file("/work/my-app/src/app/page.tsx").unwrap();
    assert!(page.contains("my-app"));

    assert_eq!(
        fs.read_file("/work/my-app/.git/HEAD").as_deref(),
        Some("ref: refs/heads/master\n")
    );
    assert!(fs.read_file("/work/my-app/.git/config").is_none());
    assert!(fs.exists(Path::new("/work/my-app/node_modules/.package-lock.json")));

    assert_eq!(
        report.scripts.lines(),
        [
            "npm run dev -> next dev",
            "npm run build -> next build",
            "npm run start -> next start",
        ]
    );
}

#[test]
fn commands_run_in_order_with_explicit_directories() {
    let fs = MemoryFilesystem::new();
    let runner = scripted_runner(fs.clone());

    pipeline(&fs, &runner, PackageManagerKind::Pnpm)
        .run(target("my-app"), &SilentReporter)
        .unwrap();

    let calls = runner.calls();
    let rendered: Vec<String> = calls.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            format!("git clone -- {} /work/my-app", Blueprint::default().template_url),
            "git init".to_string(),
            "pnpm install".to_string(),
        ]
    );
    assert_eq!(calls[0].cwd, None);
    assert_eq!(calls[1].cwd.as_deref(), Some(Path::new("/work/my-app")));
    assert_eq!(calls[2].cwd.as_deref(), Some(Path::new("/work/my-app")));
}

#[test]
fn summary_uses_the_selected_package_manager() {
    let fs = MemoryFilesystem::new();
    let runner = scripted_runner(fs.clone());

    let report = pipeline(&fs, &runner, PackageManagerKind::Yarn)
        .run(target("shop"), &SilentReporter)
        .unwrap();

    assert_eq!(report.scripts.lines()[0], "yarn dev -> next dev");
}

#[test]
fn non_empty_target_is_left_untouched() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/work/my-app/notes.txt", "keep me");
    let runner = scripted_runner(fs.clone());

    let err = pipeline(&fs, &runner, PackageManagerKind::Npm)
        .run(target("my-app"), &SilentReporter)
        .unwrap_err();

    assert_eq!(err.to_string(), "Directory /work/my-app is not empty");
    assert!(runner.calls().is_empty());
    assert_eq!(fs.list_files(), [PathBuf::from("/work/my-app/notes.txt")]);
}

#[test]
fn failed_clone_stops_before_anything_else() {
    let fs = MemoryFilesystem::new();
    let runner = RecordingRunner::with_handler(|_| {
        Ok(CommandOutput::failed(128, "fatal: unable to access remote\n"))
    });

    let err = pipeline(&fs, &runner, PackageManagerKind::Npm)
        .run(target("my-app"), &SilentReporter)
        .unwrap_err();

    assert!(err.to_string().starts_with("git clone failed"));
    assert_eq!(runner.calls().len(), 1);
    assert!(fs.list_files().is_empty());
}

#[test]
fn undeletable_directory_only_warns() {
    let fs = MemoryFilesystem::new();
    fs.deny("/work/my-app/docs");
    let runner = scripted_runner(fs.clone());

    let report = pipeline(&fs, &runner, PackageManagerKind::Npm)
        .run(target("my-app"), &SilentReporter)
        .unwrap();

    assert_eq!(report.warnings, ["Could not remove: docs"]);
    assert!(fs.exists(Path::new("/work/my-app/docs")));
    assert!(!fs.exists(Path::new("/work/my-app/.github")));
    assert!(fs.exists(Path::new("/work/my-app/node_modules/.package-lock.json")));
}

#[test]
fn failed_install_keeps_the_created_project() {
    let fs = MemoryFilesystem::new();
    let seeded = scripted_runner(fs.clone());
    let runner = RecordingRunner::with_handler(move |spec| {
        if spec.args.first().and_then(|a| a.to_str()) == Some("install") {
            return Ok(CommandOutput::failed(1, "npm ERR! network\n"));
        }
        seeded.run_checked(spec).map_err(io::Error::other)
    });

    let err = pipeline(&fs, &runner, PackageManagerKind::Npm)
        .run(target("my-app"), &SilentReporter)
        .unwrap_err();

    assert_eq!(err.to_string(), "npm install failed: npm ERR! network");
    let manifest = fs.read_file("/work/my-app/package.json").unwrap();
    assert!(manifest.contains("\"name\": \"my-app\""));
}

#[cfg(unix)]
#[test]
fn runs_against_the_local_filesystem() {
    let tmp = tempfile::TempDir::new().unwrap();
    let runner = RecordingRunner::with_handler(|spec| {
        match spec.args.first().and_then(|a| a.to_str()) {
            Some("clone") => {
                let dest = spec
                    .args
                    .last()
                    .map(PathBuf::from)
                    .ok_or_else(|| io::Error::other("no destination"))?;
                for (rel, content) in template_files() {
                    let path = dest.join(rel);
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, content)?;
                }
            }
            Some("init") => {
                let root = spec.cwd.clone().ok_or_else(|| io::Error::other("no cwd"))?;
                std::fs::create_dir_all(root.join(".git"))?;
            }
            _ => {}
        }
        Ok(CommandOutput::ok())
    });

    let pipeline = InitPipeline::new(
        Blueprint::default(),
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::with_runner("git", runner.clone())),
        Box::new(NodePackageManager::with_runner(PackageManagerKind::Bun, runner)),
    );
    let target = ProjectTarget::resolve("site", tmp.path()).unwrap();

    let report = pipeline.run(target, &SilentReporter).unwrap();

    let root = tmp.path().join("site");
    assert_eq!(report.root, root);
    assert!(!root.join("docs").exists());
    assert!(!root.join(".git/config").exists());
    assert!(root.join(".git").is_dir());
    let text = std::fs::read_to_string(root.join("package.json")).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.find("\"name\"").unwrap() < text.find("\"private\"").unwrap());
    assert_eq!(report.scripts.lines()[0], "bun run dev -> next dev");
}
