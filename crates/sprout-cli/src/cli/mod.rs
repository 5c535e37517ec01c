//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub use global::GlobalArgs;

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Bootstrap a ready-to-run web app from a starter template",
    long_about = "Sprout clones the starter template into a new directory, \
                  strips the template-only parts, renames the project, \
                  starts a fresh git history and installs dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 sprout my-app\n\
        \x20 sprout ../sites/landing-page\n\
        \x20 SPROUT_TOOLS__PACKAGE_MANAGER=pnpm sprout my-app",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Where to create the project.  The last path component becomes the
    /// package name.  The directory must be missing or empty.
    #[arg(value_name = "PROJECT_DIRECTORY", help = "Directory to create the project in")]
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_directory() {
        let cli = Cli::parse_from(["sprout", "my-app"]);
        assert_eq!(cli.directory, PathBuf::from("my-app"));
        assert_eq!(cli.global.verbose, 0);
    }

    #[test]
    fn counts_verbosity() {
        let cli = Cli::parse_from(["sprout", "-vv", "my-app"]);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn output_format_defaults_to_auto() {
        use crate::cli::global::OutputFormat;

        let cli = Cli::parse_from(["sprout", "my-app"]);
        assert_eq!(cli.global.output_format, OutputFormat::Auto);

        let cli = Cli::parse_from(["sprout", "--output-format", "plain", "my-app"]);
        assert_eq!(cli.global.output_format, OutputFormat::Plain);
    }

    #[test]
    fn missing_directory_is_a_usage_error() {
        let err = Cli::try_parse_from(["sprout"]).unwrap_err();
        // `NO_COLOR` in the environment counts as a supplied argument.
        assert!(matches!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::MissingRequiredArgument
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(Cli::try_parse_from(["sprout", "a", "b"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["sprout", "--quiet", "--verbose", "my-app"]);
        assert!(result.is_err());
    }
}
