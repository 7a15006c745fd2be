use clap::Parser;
use duit::args::{AddSubcommand, Args, Command, DeleteSubcommand, ListSubcommand, UpdateSubcommand};
use duit::clock::SystemClock;
use duit::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().duit_home().path();
    let show_balance = args.common().show_balance();
    let clock = SystemClock;

    // This allows for running the program without a live backend. When
    // DUIT_IN_TEST_MODE is set and non-zero in length, then the mode will be
    // Mode::Test, otherwise it will be Mode::Live.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.api_url()).await?.print(),

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            match add_args.entity() {
                AddSubcommand::Transaction(args) => {
                    commands::add_transaction(config, mode, args.clone(), &clock)
                        .await?
                        .print()
                }
                AddSubcommand::Category(args) => {
                    commands::add_category(config, mode, args.clone())
                        .await?
                        .print()
                }
            }
        }

        Command::Update(update_args) => {
            let config = Config::load(home).await?;
            match update_args.entity() {
                UpdateSubcommand::Transaction(args) => {
                    commands::update_transaction(config, mode, args.clone())
                        .await?
                        .print()
                }
            }
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            match delete_args.entity() {
                DeleteSubcommand::Transaction(args) => {
                    commands::delete_transaction(config, mode, args.clone())
                        .await?
                        .print()
                }
            }
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            match list_args.entity() {
                ListSubcommand::Transactions(args) => {
                    commands::list_transactions(config, mode, args.clone(), show_balance)
                        .await?
                        .print()
                }
                ListSubcommand::Categories(args) => {
                    commands::list_categories(config, mode, args.clone())
                        .await?
                        .print()
                }
            }
        }

        Command::Recap(recap_args) => {
            let config = Config::load(home).await?;
            commands::recap(config, mode, recap_args.clone(), &clock, show_balance)
                .await?
                .print()
        }

        Command::Stats(stats_args) => {
            let config = Config::load(home).await?;
            commands::stats(config, mode, stats_args.clone(), &clock, show_balance)
                .await?
                .print()
        }

        Command::Daily(daily_args) => {
            let config = Config::load(home).await?;
            commands::daily(config, mode, daily_args.clone(), &clock, show_balance)
                .await?
                .print()
        }

        Command::Report(report_args) => {
            let config = Config::load(home).await?;
            commands::report(config, mode, report_args.clone(), &clock, show_balance)
                .await?
                .print()
        }

        Command::Trends(trends_args) => {
            let config = Config::load(home).await?;
            commands::trends(config, mode, trends_args.clone(), show_balance)
                .await?
                .print()
        }

        Command::Dashboard(dashboard_args) => {
            let config = Config::load(home).await?;
            commands::dashboard(config, mode, dashboard_args.clone(), &clock, show_balance)
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
