//! qapflow CLI - Move Quality Assurance Plans through the multi-level review workflow

use clap::Parser;
use qapflow::cli::{Cli, Commands};
use qapflow::domain::Decision;
use qapflow::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> qapflow::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => qapflow::cli::commands::init::run(cwd, force).await,
        Some(Commands::UserAdd { username, role, plants }) => {
            qapflow::cli::commands::user_add::run(cwd, &username, &role, &plants).await
        }
        Some(Commands::New { title, customer, plant, specs, as_user }) => {
            qapflow::cli::commands::new::run(
                cwd,
                &title,
                &customer,
                &plant,
                specs.as_deref(),
                &as_user,
            )
            .await
        }
        Some(Commands::Submit { id, as_user }) => {
            qapflow::cli::commands::submit::run(cwd, &id, &as_user).await
        }
        Some(Commands::Review { id, acknowledge, comments, as_user }) => {
            qapflow::cli::commands::review::run(cwd, &id, acknowledge, &comments, &as_user).await
        }
        Some(Commands::Advance { id, to, as_user }) => {
            qapflow::cli::commands::advance::run(cwd, &id, &to, &as_user).await
        }
        Some(Commands::Approve { id, comments, as_user }) => {
            qapflow::cli::commands::decide::run(cwd, &id, Decision::Approve, comments, &as_user)
                .await
        }
        Some(Commands::Reject { id, comments, as_user }) => {
            qapflow::cli::commands::decide::run(cwd, &id, Decision::Reject, comments, &as_user)
                .await
        }
        Some(Commands::Reopen { id, as_user }) => {
            qapflow::cli::commands::reopen::run(cwd, &id, &as_user).await
        }
        Some(Commands::List { as_user, status, plant, json }) => {
            qapflow::cli::commands::list::run(
                cwd,
                as_user.as_deref(),
                status.as_deref(),
                plant.as_deref(),
                json,
            )
            .await
        }
        Some(Commands::Show { id, as_user, json }) => {
            qapflow::cli::commands::show::run(cwd, &id, as_user.as_deref(), json).await
        }
        Some(Commands::Metrics { plant, level, json }) => {
            qapflow::cli::commands::metrics::run(cwd, plant.as_deref(), level, json).await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
