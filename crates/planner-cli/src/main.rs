use clap::Parser;
use owo_colors::{OwoColorize, Style};
use planner_cli::cli::{self, Commands};
use planner_cli::commands;
use planner_cli::config::Config;
use planner_cli::timezone::Clock;
use planner_core::db;
use planner_core::error::CoreError;
use planner_core::repository::SqliteRepository;
use planner_core::service::TaskService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if let Err(e) = run(cli.command).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = Config::new()?;
    let clock = Clock::from_config(config.timezone.as_deref())?;

    if let Commands::Next(command) = command {
        return commands::next::next_date(command, &clock);
    }

    let pool = db::establish_connection(&config.dbfile).await?;
    let service = TaskService::new(SqliteRepository::new(pool));

    match command {
        Commands::Add(command) => commands::add::add_task(&service, command, &clock).await,
        Commands::Edit(command) => commands::edit::edit_task(&service, command, &clock).await,
        Commands::Done(command) => commands::done::done_task(&service, command, &clock).await,
        Commands::Delete(command) => commands::delete::delete_task(&service, command).await,
        Commands::Show(command) => commands::show::show_task(&service, command, &clock).await,
        Commands::List(command) => commands::list::list_tasks(&service, command, &config, &clock).await,
        Commands::Serve(command) => commands::serve::serve(service, command, &config, clock).await,
        Commands::Next(command) => commands::next::next_date(command, &clock),
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Task not found: {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Recurrence(e) => {
                eprintln!("{} {}", "Error:".style(error_style), e.yellow());
            }
            CoreError::Database(e) => {
                eprintln!("{} Database error: {}", "Error:".style(error_style), e);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
