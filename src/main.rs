use clap::Parser;
use pocketvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => pocketvault::cli::commands::init::execute(&cli),
        Commands::Status => pocketvault::cli::commands::status::execute(&cli),
        Commands::Todo { ref action } => pocketvault::cli::commands::todo::execute(&cli, action),
        Commands::Password { ref action } => {
            pocketvault::cli::commands::password::execute(&cli, action)
        }
        Commands::Snippet { ref action } => {
            pocketvault::cli::commands::snippet::execute(&cli, action)
        }
        Commands::Completions { ref shell } => {
            pocketvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        pocketvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
