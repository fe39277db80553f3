mod commands;
mod logging;
mod render;
mod session;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::copy::CopyArgs;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "evcopy")]
#[command(about = "Copy template events on your events site to new dates")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save your WordPress username and application password
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the saved credentials
    Logout,
    /// Show who is logged in and whether the site accepts the credentials
    Status,
    /// List template events
    List,
    /// Show one template event
    Show { id: u64 },
    /// Create a copy of a template event with a new date and time
    Copy(CopyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut session = Session::load()?;

    match cli.command {
        Commands::Login { username } => commands::login::run(&mut session, username).await,
        Commands::Logout => commands::logout::run(&mut session),
        Commands::Status => commands::status::run(&mut session).await,
        Commands::List => commands::list::run(&mut session).await,
        Commands::Show { id } => commands::show::run(&mut session, id).await,
        Commands::Copy(args) => commands::copy::run(&mut session, args).await,
    }
}
