//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use prebuilt::core::platform::{Configuration, Platform};

/// Prebuilt - resolve prebuilt third-party libraries for a build
#[derive(Parser)]
#[command(name = "prebuilt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve include paths, libraries and definitions
    Resolve(ResolveArgs),

    /// Generate BuildMetadata.xml from a build configuration
    Metadata(MetadataArgs),

    /// List the libraries declared in BuildMetadata.xml
    List(ListArgs),

    /// Show the configuration-name and library pattern tables
    Mappings,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for `prebuilt resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    /// Compiler and linker flags
    Flags,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Library specs (`name-version`); defaults to `resolve.libraries`
    pub libraries: Vec<String>,

    /// Target platform (e.g. Win64, Linux, Mac)
    #[arg(long, short = 'p')]
    pub platform: Platform,

    /// Build configuration (e.g. Development, Shipping)
    #[arg(long, short = 'c')]
    pub configuration: Configuration,

    /// Library root directory
    #[arg(long, env = "PREBUILT_ROOT")]
    pub root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct MetadataArgs {
    /// Build configuration file (TOML)
    pub build_config: PathBuf,

    /// Library root; sources are checked under `<root>/External`
    #[arg(long, env = "PREBUILT_ROOT")]
    pub root: Option<PathBuf>,

    /// Output file (defaults to `<root>/BuildMetadata.xml`)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Library root directory
    #[arg(long, env = "PREBUILT_ROOT")]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
