use clap::Parser;
use proton_migrate::cli::{AuthAction, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate {
            ref output,
            no_preset,
        } => proton_migrate::cli::commands::migrate::execute(&cli, output.as_deref(), no_preset),
        Commands::List => proton_migrate::cli::commands::list::execute(&cli),
        Commands::Probe {
            ref entry,
            ref output,
            show_password,
        } => proton_migrate::cli::commands::probe::execute(
            &cli,
            entry,
            output.as_deref(),
            show_password,
        ),
        Commands::Preset => proton_migrate::cli::commands::preset::execute(&cli),
        Commands::Auth { ref action } => match action {
            AuthAction::Keyring { delete } => {
                proton_migrate::cli::commands::auth::execute_keyring(&cli, *delete)
            }
        },
        Commands::Completions { shell } => {
            proton_migrate::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        proton_migrate::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
