use clap::Parser;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so stdout stays clean for piped passwords.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passvault=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli).await,
        Commands::Add {
            ref website,
            ref username,
            ref password,
            generate,
            ref generator,
        } => {
            passvault::cli::commands::add::execute(
                &cli,
                website,
                username,
                password.as_deref(),
                generate,
                generator,
            )
            .await
        }
        Commands::List => passvault::cli::commands::list::execute(&cli).await,
        Commands::Reveal { id, copy } => {
            passvault::cli::commands::reveal::execute(&cli, id, copy).await
        }
        Commands::Remove { id, force } => {
            passvault::cli::commands::remove::execute(&cli, id, force).await
        }
        Commands::Generate { ref generator, copy } => {
            passvault::cli::commands::generate::execute(&cli, generator, copy)
        }
        Commands::Audit { last, ref since } => {
            passvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => {
            passvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
