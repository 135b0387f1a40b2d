//! BitPay Demo CLI
//!
//! Command-line interface for exercising the BitPay client against the test
//! or production API.

use std::path::PathBuf;

use anyhow::Result;
use bitpay_lib::Environment;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "bitpay-demo")]
#[command(about = "BitPay Demo CLI - Exercise the BitPay REST API client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (JSON or YAML). Falls back to BITPAY_* env vars
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment used when no configuration is found (test, prod)
    #[arg(long, global = true, default_value = "test")]
    env: Environment,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a private key file
    Keygen {
        /// Output file for the key
        #[arg(short, long, default_value = "bitpay.key")]
        output: PathBuf,

        /// Seal the key file with this secret
        #[arg(long)]
        secret: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the public key of a key file
    Identity {
        /// Key file to read
        path: PathBuf,

        /// Secret the key file is sealed with
        #[arg(long)]
        secret: Option<String>,
    },

    /// Show exchange rates
    Rates {
        /// Base currency
        #[arg(short, long, default_value = "BTC")]
        base: String,

        /// Only show the rate for this currency
        #[arg(long)]
        currency: Option<String>,
    },

    /// Show the supported currencies
    Currencies {
        /// Only show this currency
        code: Option<String>,
    },

    /// List wallets buyers can pay with
    Wallets,

    /// Manage invoices
    Invoice {
        #[command(subcommand)]
        action: InvoiceAction,
    },

    /// Show ledger balances, or the entries of one ledger
    Ledger {
        /// Ledger currency; omit to list balances
        currency: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "currency")]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "currency")]
        to: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum InvoiceAction {
    /// Create an invoice
    Create {
        /// Price of the invoice
        #[arg(short, long)]
        price: Decimal,

        /// Currency of the price
        #[arg(short, long, default_value = "USD")]
        currency: String,

        /// Merchant order reference
        #[arg(long)]
        order_id: Option<String>,

        /// Buyer email; the buyer is notified
        #[arg(long)]
        buyer_email: Option<String>,

        /// URL for payment status webhooks
        #[arg(long)]
        notification_url: Option<String>,

        /// Item description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show an invoice
    Get {
        /// Invoice id
        id: String,
    },

    /// List invoices created in a date range
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        /// Only invoices with this status
        #[arg(long)]
        status: Option<String>,

        /// Maximum number of invoices
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Cancel an invoice
    Cancel {
        /// Invoice id
        id: String,

        /// Cancel even if the invoice is already paid
        #[arg(long)]
        force: bool,
    },

    /// Ask for the invoice webhook to be resent
    Notify {
        /// Invoice id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("bitpay_demo_cli=debug,bitpay_lib=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("bitpay_demo_cli=info,bitpay_lib=warn")
            .init();
    }

    if let Err(e) = run(cli).await {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Keygen {
            output,
            secret,
            force,
        } => {
            commands::keygen::run(&output, secret.as_deref(), force)?;
        }
        Commands::Identity { path, secret } => {
            commands::keygen::show(&path, secret.as_deref())?;
        }
        Commands::Rates { base, currency } => {
            let client = commands::connect(config, cli.env, cli.verbose).await?;
            commands::rates::run(&client, &base, currency).await?;
        }
        Commands::Currencies { code } => {
            let client = commands::connect(config, cli.env, cli.verbose).await?;
            commands::currencies::run(&client, code)?;
        }
        Commands::Wallets => {
            let client = commands::connect(config, cli.env, cli.verbose).await?;
            commands::wallets::run(&client).await?;
        }
        Commands::Invoice { action } => {
            let client = commands::connect(config, cli.env, cli.verbose).await?;
            match action {
                InvoiceAction::Create {
                    price,
                    currency,
                    order_id,
                    buyer_email,
                    notification_url,
                    description,
                } => {
                    let request = commands::invoice::NewInvoice {
                        price,
                        currency,
                        order_id,
                        buyer_email,
                        notification_url,
                        description,
                    };
                    commands::invoice::create(&client, request, cli.verbose).await?;
                }
                InvoiceAction::Get { id } => {
                    commands::invoice::get(&client, &id, cli.verbose).await?;
                }
                InvoiceAction::List {
                    from,
                    to,
                    status,
                    limit,
                } => {
                    commands::invoice::list(&client, from, to, status, limit).await?;
                }
                InvoiceAction::Cancel { id, force } => {
                    commands::invoice::cancel(&client, &id, force).await?;
                }
                InvoiceAction::Notify { id } => {
                    commands::invoice::notify(&client, &id).await?;
                }
            }
        }
        Commands::Ledger { currency, from, to } => {
            let client = commands::connect(config, cli.env, cli.verbose).await?;
            match currency {
                Some(currency) => {
                    let today = chrono::Utc::now().date_naive();
                    let from = from.unwrap_or(today - chrono::Duration::days(30));
                    let to = to.unwrap_or(today);
                    commands::ledgers::entries(&client, &currency, from, to).await?;
                }
                None => commands::ledgers::balances(&client).await?,
            }
        }
    }

    Ok(())
}
