use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_contact::ContactForm;

/// portfolio - contact form delivery service
#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Delivers portfolio contact submissions through email providers", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send one contact submission from the terminal
    Send {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        message: String,
    },
    /// List enabled email providers in dispatch order
    Providers,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = portfolio::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    portfolio::observability::init_observability(
        "portfolio",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => {
            portfolio::cli::serve(config, host, port).await?;
        }
        Commands::Send {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm {
                name: Some(name),
                email: Some(email),
                subject,
                message: Some(message),
            };

            if !portfolio::cli::send(config, form).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Providers => portfolio::cli::providers(config)?,
    }

    Ok(ExitCode::SUCCESS)
}
