use azq::cli::commands::keyvault::VaultScope;
use azq::cli::{Cli, Commands, CopyMode, SubscriptionAction};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    azq::logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Keyvault {
            ref term,
            ref vault,
            pick_vault,
            copy,
            no_copy,
        } => azq::cli::commands::keyvault::execute(
            &cli,
            term.as_deref(),
            VaultScope::from_flags(vault.as_deref(), pick_vault),
            CopyMode::from_flags(copy, no_copy),
        ),
        Commands::Subscription { ref action } => match action {
            SubscriptionAction::List => azq::cli::commands::subscription::execute_list(&cli),
            SubscriptionAction::Set { ref term } => {
                azq::cli::commands::subscription::execute_set(&cli, term.as_deref())
            }
        },
        Commands::Completions { shell } => azq::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        azq::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
