use clap::Parser;

use helmsman::cli::{self, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Status(args) => cli::status::execute(&args).await,
        Commands::Watch(args) => cli::status::watch(&args).await,
        Commands::Start(args) => cli::commands::start(&args).await,
        Commands::Stop(args) => cli::commands::stop(&args).await,
        Commands::ForceEntry(args) => cli::commands::force_entry(&args).await,
        Commands::ForceExit(args) => cli::commands::force_exit(&args).await,
        Commands::Profit(args) => cli::reads::profit(&args).await,
        Commands::Trades(args) => cli::reads::trades(&args).await,
        Commands::Logs(args) => cli::reads::logs(&args).await,
        Commands::Whitelist(args) => cli::reads::whitelist(&args).await,
        Commands::Check(CheckCommand::Config(args)) => cli::check::config(&args),
        Commands::Check(CheckCommand::Connection(args)) => cli::check::connection(&args).await,
    };

    if let Err(err) = result {
        cli::output::error(&err.to_string());
        std::process::exit(1);
    }
}
