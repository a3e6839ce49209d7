//! # wio
//!
//! Run WioPayments gateway operations from the shell.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export WIO_API_KEY=wio_...
//!
//! wio create-payment 50.00 USD ORDER_1 "Test Payment"
//! wio payment-status pay_123
//! wio links status=active
//! ```

use tracing::{error, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wio_cli::{Command, USAGE};
use wio_client::{WioConfig, WioPayments};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help" | "help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = WioConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");
    let client = WioPayments::new(config)?;

    match command.run(&client).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}
