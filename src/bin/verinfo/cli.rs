//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use verinfo::util::shell::ColorChoice;

/// verinfo - generate version metadata source files for .NET builds
#[derive(Parser)]
#[command(name = "verinfo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a version metadata source file
    Generate(GenerateArgs),

    /// List supported languages and their aliases
    Languages(LanguagesArgs),

    /// Show the public key and token of a strong-name key file
    KeyInfo(KeyInfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    #[default]
    Human,
    Json,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Request file (TOML); flags override its values
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Target language (c#, vb, f# or an alias)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Namespace for the ThisAssembly class
    #[arg(long)]
    pub namespace: Option<String>,

    /// Root namespace of the project
    #[arg(long)]
    pub root_namespace: Option<String>,

    #[arg(long)]
    pub assembly_version: Option<String>,

    #[arg(long)]
    pub file_version: Option<String>,

    #[arg(long)]
    pub informational_version: Option<String>,

    #[arg(long)]
    pub assembly_name: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub product: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub copyright: Option<String>,

    /// Build configuration (e.g. Debug, Release)
    #[arg(long)]
    pub configuration: Option<String>,

    #[arg(long)]
    pub commit_id: Option<String>,

    /// Commit date in ticks
    #[arg(long, value_name = "TICKS")]
    pub commit_date: Option<String>,

    /// Commit author date in ticks
    #[arg(long, value_name = "TICKS")]
    pub commit_author_date: Option<String>,

    /// Mark the build as a public release
    #[arg(long)]
    pub public_release: bool,

    /// Prerelease suffix (e.g. -beta)
    #[arg(long)]
    pub prerelease: Option<String>,

    /// Strong-name key file
    #[arg(long, value_name = "FILE")]
    pub key_file: Option<PathBuf>,

    /// Key container name
    #[arg(long)]
    pub key_container: Option<String>,

    /// Additional field, NAME=[KIND:]VALUE with KIND one of string, bool, ticks
    #[arg(long = "field", value_name = "SPEC")]
    pub fields: Vec<String>,

    /// Emit title, product, company and copyright attributes
    #[arg(long)]
    pub emit_non_version_attributes: bool,

    /// Skip the ThisAssembly class
    #[arg(long)]
    pub no_class: bool,

    /// Output format for status messages
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Args)]
pub struct LanguagesArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Args)]
pub struct KeyInfoArgs {
    /// Strong-name key file (.snk)
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
