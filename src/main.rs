mod analyze;
mod cli;
mod config;
mod error;
mod gateway;
mod jira;
mod report;
mod types;

use crate::error::AgileOpsError;
use crate::gateway::HttpGateway;
use crate::jira::JiraClient;
use crate::types::config::AgileOpsConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn connect(config: &AgileOpsConfig) -> Result<(JiraClient<HttpGateway>, String), AgileOpsError> {
    let connection = config.connection()?;
    let base_url = connection.base_url();
    let gateway = HttpGateway::new(&connection)?;
    Ok((JiraClient::new(gateway, &base_url), base_url))
}

fn run() -> Result<i32, AgileOpsError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Report(cmd) => {
            let (client, base_url) = connect(&config)?;
            let sprint_report =
                analyze::generate_sprint_report(&client, &cmd.sprint_id.to_string())?;

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Chat => report::OutputFormat::Chat,
                cli::ReportFormat::Form => report::OutputFormat::Form,
            };
            let targets = report::RenderTargets {
                jira_base_url: &base_url,
                form_url: config.form_url(),
            };
            let rendered = report::render(&sprint_report, output_format, &targets)?;
            println!("{rendered}");

            if sprint_report.has_commitment() {
                Ok(exit_code::SUCCESS)
            } else {
                eprintln!("warning: sprint {} had no commitments", cmd.sprint_id);
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Chat(cmd) => {
            let (client, _) = connect(&config)?;
            let reply = report::chat::sprint_metrics_command(&client, &cmd.message)?;
            println!("{}", reply.text);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Velocity(cmd) => {
            let (client, _) = connect(&config)?;
            let velocity_report = client.get_velocity_report(cmd.board_id)?;
            let sprint_id = cmd.sprint.map(|id| id.to_string());
            let average = analyze::average_velocity(&velocity_report, sprint_id.as_deref());
            println!("average velocity: {average}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Sprints(cmd) => {
            let (client, _) = connect(&config)?;
            let sprints = client.get_sprints_in_board(cmd.board_id);
            print!("{}", report::listing::sprints(&sprints));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Boards(cmd) => {
            let (client, _) = connect(&config)?;
            let boards = client.get_boards_in_project(&cmd.project_key)?;
            print!("{}", report::listing::boards(&boards));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Filters(cmd) => {
            let (client, _) = connect(&config)?;
            let filters = client.search_filters_for_jql(&cmd.pattern)?;
            if filters.is_empty() {
                println!("filters: no matches");
            } else {
                print!("{}", report::listing::filters(&filters));
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Link(cmd) => {
            let base_url = config.base_url()?;
            println!("{}", jira::links::issue_link(&base_url, &cmd.keys));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Ping => {
            let (client, base_url) = connect(&config)?;
            let user = client.test_connection()?;
            let name = user
                .get("displayName")
                .and_then(|name| name.as_str())
                .unwrap_or("unknown user");
            println!("connected to {base_url} as {name}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
