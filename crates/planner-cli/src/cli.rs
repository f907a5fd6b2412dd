use clap::{Args, Parser, Subcommand};

/// A personal task scheduler with repeat rules
#[derive(Parser, Debug)]
#[command(name = "planner", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done; repeating tasks move to their next date
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Show a single task
    Show(ShowCommand),
    /// List tasks by date
    List(ListCommand),
    /// Compute the next date of a repeat rule
    Next(NextCommand),
    /// Run the HTTP API and serve the web front end
    Serve(ServeCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The date of the task (YYYYMMDD or e.g. "tomorrow"); defaults to today
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[clap(short, long)]
    pub comment: Option<String>,
    /// Repeat rule: "d <n>", "y", "w <days>" or "m <days> [months]"
    #[clap(short, long)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID (or ID prefix) of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long, help = "Replace the repeat rule")]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Stop the task from repeating")]
    pub no_repeat: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID (or ID prefix) of the task
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or ID prefix) of the task to delete
    pub id: String,
    /// Delete without asking for confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID (or ID prefix) of the task
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Text to look for in titles and comments, or a date as DD.MM.YYYY
    pub search: Option<String>,
    /// Maximum number of tasks to show
    #[clap(short, long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct NextCommand {
    /// Anchor date (YYYYMMDD)
    #[clap(short, long)]
    pub date: String,
    /// Repeat rule
    #[clap(short, long)]
    pub repeat: String,
    /// Reference date (YYYYMMDD or e.g. "next monday"); defaults to today
    #[clap(short, long)]
    pub now: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeCommand {
    /// Port to listen on; overrides TODO_PORT and the config file
    #[clap(short, long)]
    pub port: Option<u16>,
}
