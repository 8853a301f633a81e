//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use mentor_domain::Challenge;
use std::path::PathBuf;

/// Mentor CLI - AI code review, interview questions, hints and chat.
#[derive(Debug, Parser)]
#[command(name = "mentor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.mentor/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// LLM provider (gemini, openai, claude)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Model name override
    #[arg(short, long, global = true, env = "AI_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Human-readable text
    Text,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Review a piece of code
    Review(ReviewArgs),

    /// Generate interviewer follow-up questions
    Questions(QuestionsArgs),

    /// Ask for a hint
    Hint(HintArgs),

    /// Chat with the mentor
    Chat(ChatArgs),

    /// Run a saved raw reply through the extractor
    Extract(ExtractArgs),

    /// Print the review prompt without calling the provider
    Prompt(ReviewArgs),
}

/// Where candidate code comes from.
#[derive(Debug, Args)]
pub struct CodeSource {
    /// Code file (reads stdin when omitted)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
}

/// The challenge being worked on.
#[derive(Debug, Args)]
pub struct ChallengeArgs {
    /// Challenge title
    #[arg(short = 't', long = "title", default_value = "Coding challenge")]
    pub title: String,

    /// Challenge identifier
    #[arg(long = "challenge-id", default_value = "challenge")]
    pub id: String,
}

impl ChallengeArgs {
    /// Build the domain challenge
    pub fn to_challenge(&self) -> Challenge {
        Challenge::new(self.id.clone(), self.title.clone())
    }
}

/// Arguments for the review and prompt commands.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub code: CodeSource,

    #[command(flatten)]
    pub challenge: ChallengeArgs,

    /// Extra context for the reviewer
    #[arg(long, default_value = "")]
    pub context: String,

    /// Print the unparsed provider reply instead of the review
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the questions command.
#[derive(Debug, Parser)]
pub struct QuestionsArgs {
    #[command(flatten)]
    pub code: CodeSource,

    #[command(flatten)]
    pub challenge: ChallengeArgs,

    /// How far the candidate has got
    #[arg(long, default_value = "")]
    pub progress: String,
}

/// Arguments for the hint command.
#[derive(Debug, Parser)]
pub struct HintArgs {
    #[command(flatten)]
    pub code: CodeSource,

    #[command(flatten)]
    pub challenge: ChallengeArgs,

    /// Hint level, 1 (nudge) to 4 (walkthrough)
    #[arg(short, long, default_value_t = 1)]
    pub level: u8,

    /// Context that replaces the challenge title
    #[arg(long, default_value = "")]
    pub context: String,
}

/// Arguments for the chat command.
#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// The student's message
    pub message: String,

    /// Challenge title, if any
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// File with the editor contents
    #[arg(short = 'i', long = "input")]
    pub code: Option<PathBuf>,

    /// JSON file holding earlier messages
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// What the reply should contain
    #[arg(value_enum)]
    pub kind: ExtractKind,

    /// Reply file (reads stdin when omitted)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
}

/// Extraction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractKind {
    /// A code review object
    Object,
    /// A list of strings
    Array,
    /// Plain text
    Text,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Text => crate::config::OutputFormat::Text,
        }
    }
}
