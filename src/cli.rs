use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agileops",
    version,
    about = "Sprint metrics and velocity reports from Jira"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file to use instead of ./agileops.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full sprint report: metrics, goals, project and velocity
    Report(ReportCommand),
    /// Answer a chat message such as "sprint metrics 123"
    Chat(ChatCommand),
    /// Three sprint average velocity of a board
    Velocity(VelocityCommand),
    /// Sprints of a board, newest first
    Sprints(SprintsCommand),
    /// Boards of a project
    Boards(BoardsCommand),
    /// Saved filters whose JQL matches a pattern
    Filters(FiltersCommand),
    /// Link to an issue search for the given keys
    Link(LinkCommand),
    /// Check the connection and credentials
    Ping,
}

#[derive(Args)]
pub struct ReportCommand {
    pub sprint_id: u64,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ChatCommand {
    pub message: String,
}

#[derive(Args)]
pub struct VelocityCommand {
    pub board_id: u64,
    /// Compute the average as of this sprint instead of the latest one
    #[arg(long)]
    pub sprint: Option<u64>,
}

#[derive(Args)]
pub struct SprintsCommand {
    pub board_id: u64,
}

#[derive(Args)]
pub struct BoardsCommand {
    pub project_key: String,
}

#[derive(Args)]
pub struct FiltersCommand {
    /// Regular expression matched against each filter's JQL
    pub pattern: String,
}

#[derive(Args)]
pub struct LinkCommand {
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Chat,
    Form,
}
