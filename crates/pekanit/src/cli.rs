//! Clap derive structures for the `pekanit` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.
//! Compiled by build.rs too, so it must depend on clap alone.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pekanit -- queue numbers and questionnaires for Pekan IT
#[derive(Debug, Parser)]
#[command(
    name = "pekanit",
    version,
    about = "Pekan IT event client: log in, fill the questionnaire, get a queue number",
    long_about = "Command-line client for the Pekan IT school event.\n\n\
        Students log in with their NIS, have their guardian fill in the\n\
        questionnaire, and receive a queue number. Guests can send a\n\
        questionnaire without logging in. Teachers can list per-class\n\
        queues, browse responses, and download spreadsheet exports.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PEKANIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "PEKANIT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides profile)
    #[arg(long, env = "PEKANIT_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PEKANIT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PEKANIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default from config, else 30)
    #[arg(long, env = "PEKANIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Respondent audience for reports and exports.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AudienceArg {
    /// Student questionnaires (filled by guardians)
    #[value(alias = "student")]
    Siswa,
    /// Guest questionnaires
    #[value(alias = "guest")]
    Tamu,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with a student NIS
    Login(LoginArgs),

    /// Forget the stored session and queue number
    Logout,

    /// Show the stored session and where it leads
    #[command(alias = "whoami")]
    Status,

    /// Queue numbers
    #[command(alias = "queue", alias = "q")]
    Antrian(AntrianArgs),

    /// Fill in the student questionnaire, then get a queue number
    #[command(alias = "questionnaire")]
    Kuesioner(KuesionerArgs),

    /// Send a guest questionnaire (no login needed)
    #[command(alias = "guest")]
    Tamu(TamuArgs),

    /// Browse questionnaire responses and download exports
    #[command(alias = "reports")]
    Report(ReportArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Student identification number (prompted when omitted on a terminal)
    pub nis: Option<String>,
}

// ── Antrian ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AntrianArgs {
    #[command(subcommand)]
    pub command: AntrianCommand,
}

#[derive(Debug, Subcommand)]
pub enum AntrianCommand {
    /// Show your queue number, requesting one if none is cached
    #[command(alias = "show")]
    Get,

    /// List queue numbers for one class
    Kelas {
        /// Class name, e.g. XI-RPL-1 (picked from a list when omitted)
        kelas: Option<String>,
    },

    /// List the known class names
    Classes,
}

// ── Questionnaires ───────────────────────────────────────────────────

/// The four rated items. Each takes Baik, Cukup, Kurang or Buruk.
#[derive(Debug, Args)]
pub struct RatingArgs {
    /// Product presentation rating
    #[arg(long, value_name = "RATING")]
    pub tampilan_produk: Option<String>,

    /// Stand presentation rating
    #[arg(long, value_name = "RATING")]
    pub tampilan_stand: Option<String>,

    /// Rating of the students' product explanation
    #[arg(long, value_name = "RATING")]
    pub penjelasan_produk: Option<String>,

    /// Entertainment rating
    #[arg(long, value_name = "RATING")]
    pub hiburan: Option<String>,
}

#[derive(Debug, Args)]
pub struct KuesionerArgs {
    /// Guardian's name
    #[arg(long, alias = "nama-wali-siswa")]
    pub wali: Option<String>,

    #[command(flatten)]
    pub ratings: RatingArgs,

    /// Criticism and suggestions
    #[arg(long, alias = "kritik-saran")]
    pub saran: Option<String>,
}

#[derive(Debug, Args)]
pub struct TamuArgs {
    /// Guest's name
    #[arg(long)]
    pub nama: Option<String>,

    /// Guest's institution
    #[arg(long)]
    pub instansi: Option<String>,

    #[command(flatten)]
    pub ratings: RatingArgs,

    /// Criticism and suggestions
    #[arg(long, alias = "kritik-saran")]
    pub saran: Option<String>,
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// List questionnaire responses, one page at a time
    #[command(alias = "ls")]
    List {
        /// Which responses to list
        audience: AudienceArg,

        /// Page to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page (default from config, else 10)
        #[arg(long)]
        page_size: Option<usize>,

        /// Show every row on one page
        #[arg(long, conflicts_with_all = ["page", "page_size"])]
        all: bool,
    },

    /// Download the spreadsheet export
    Export {
        /// Which responses to export
        audience: AudienceArg,

        /// Output file (defaults to the server's export name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
