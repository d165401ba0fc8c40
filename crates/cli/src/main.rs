//! Shopverse CLI - Command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Log in (prompts for the password when --password is omitted)
//! shopverse login -e sana@example.com
//!
//! # Browse and buy
//! shopverse products list --search lamp
//! shopverse cart add 65f1c0ffee0000000000abcd -q 2
//! shopverse checkout --address "12 Mall Road" --city Lahore --phone 0300-1234567
//!
//! # Manage the catalogue (admin only)
//! shopverse admin create --name "Brass Lamp" --price 4500 --stock 12
//! shopverse admin inventory
//! ```
//!
//! # Environment Variables
//!
//! See `shopverse_storefront::config` for the full list.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopverse_core::PaymentMethod;
use shopverse_storefront::config::ConfigError;
use shopverse_storefront::{AppError, Storefront, StorefrontConfig};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "shopverse")]
#[command(author, version, about = "Shopverse storefront on the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session on this machine
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse the catalogue
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Order everything in the cart and pay for it
    Checkout {
        /// Delivery address
        #[arg(long)]
        address: String,

        /// Delivery city
        #[arg(long)]
        city: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Payment method (`cash` or `card`)
        #[arg(short, long, default_value_t = PaymentMethod::Cash)]
        method: PaymentMethod,
    },
    /// List your orders
    Orders,
    /// Catalogue management (admin only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Args)]
struct RegisterArgs {
    /// First name
    #[arg(long)]
    first_name: String,

    /// Last name
    #[arg(long)]
    last_name: String,

    /// Email address
    #[arg(short, long)]
    email: String,

    /// Password (prompted for when omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// Password confirmation (prompted for when omitted)
    #[arg(long)]
    confirm_password: Option<String>,

    /// Accept a weak password without asking
    #[arg(short, long)]
    yes: bool,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only products whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: String,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a product
    Create(ProductArgs),
    /// Update a product; omitted fields keep their current value
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
    /// Show stock levels across the catalogue
    Inventory,
}

/// Product fields shared by `admin create` and `admin update`.
#[derive(Args, Default)]
struct ProductArgs {
    /// Product name
    #[arg(short, long)]
    name: Option<String>,

    /// Product description
    #[arg(short, long)]
    description: Option<String>,

    /// Unit price
    #[arg(short, long)]
    price: Option<String>,

    /// Units in stock
    #[arg(short, long)]
    stock: Option<String>,

    /// Image URL
    #[arg(long, conflicts_with = "image")]
    image_url: Option<String>,

    /// Local image file, uploaded inline as a data URL
    #[arg(long)]
    image: Option<PathBuf>,
}

/// Errors that end a command.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Registration cancelled")]
    Cancelled,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&CliError::from(e)),
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopverse_storefront=info,shopverse_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::App(err) = &e {
                err.report();
            }
            fail(&e)
        }
    }
}

/// Print the user-facing message and signal failure.
fn fail(err: &CliError) -> ExitCode {
    let _ = writeln!(std::io::stderr(), "{err}");
    ExitCode::FAILURE
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let shop = Storefront::from_config(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&shop, &mut out, email, password).await?;
        }
        Commands::Register(args) => commands::account::register(&shop, &mut out, args).await?,
        Commands::Logout => commands::account::logout(&shop, &mut out)?,
        Commands::Whoami => commands::account::whoami(&shop, &mut out)?,
        Commands::Products { action } => match action {
            ProductsAction::List { search } => {
                commands::catalog::list(&shop, &mut out, search.as_deref()).await?;
            }
            ProductsAction::Show { id } => commands::catalog::show(&shop, &mut out, &id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop, &mut out).await?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&shop, &mut out, &product_id, quantity).await?,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&shop, &mut out, &product_id).await?;
            }
        },
        Commands::Checkout {
            address,
            city,
            phone,
            method,
        } => commands::cart::checkout(&shop, &mut out, address, city, phone, method).await?,
        Commands::Orders => commands::cart::orders(&shop, &mut out).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create(fields) => commands::admin::create(&shop, &mut out, fields).await?,
            AdminAction::Update { id, fields } => {
                commands::admin::update(&shop, &mut out, &id, fields).await?;
            }
            AdminAction::Delete { id } => commands::admin::delete(&shop, &mut out, &id).await?,
            AdminAction::Inventory => commands::admin::inventory(&shop, &mut out).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_checkout_method_defaults_to_cash() {
        let cli = Cli::try_parse_from([
            "shopverse", "checkout", "--address", "12 Mall Road", "--city", "Lahore", "--phone",
            "03001234567",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Checkout {
                method: PaymentMethod::Cash,
                ..
            }
        ));

        let cli = Cli::try_parse_from([
            "shopverse", "checkout", "--address", "a", "--city", "b", "--phone", "c", "-m", "card",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Checkout {
                method: PaymentMethod::Card,
                ..
            }
        ));
    }

    #[test]
    fn test_image_and_image_url_conflict() {
        let result = Cli::try_parse_from([
            "shopverse", "admin", "create", "--image-url", "https://x/y.png", "--image", "y.png",
        ]);
        assert!(result.is_err());
    }
}
