use chrono::Utc;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use paynl_checkout::application::builder::{StoreContext, TransactionRequestBuilder};
use paynl_checkout::application::checkout::CheckoutService;
use paynl_checkout::application::lifecycle::TransactionLifecycleClient;
use paynl_checkout::config::Settings;
use paynl_checkout::domain::order::PaymentRecord;
use paynl_checkout::domain::payment_method::method_for_code;
use paynl_checkout::domain::ports::GatewayClientBox;
use paynl_checkout::infrastructure::in_memory::{InMemoryGateway, InMemoryStatusCatalog};
use paynl_checkout::infrastructure::ip::ForwardedIpResolver;
use paynl_checkout::interfaces::json::order_reader::OrderReader;
use paynl_checkout::interfaces::json::writer::JsonWriter;
use paynl_checkout::telemetry;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML). `PAYNL__`-prefixed environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the transaction request built for an order snapshot
    Request {
        /// Order snapshot (JSON)
        order: PathBuf,
        #[arg(long)]
        method: String,
    },
    /// Start a transaction for an order snapshot and print the outcome
    Start {
        /// Order snapshot (JSON)
        order: PathBuf,
        #[arg(long)]
        method: String,
    },
    /// Capture an amount on a parent transaction
    Capture {
        #[arg(long)]
        method: String,
        #[arg(long)]
        transaction_id: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Refund an amount on a parent transaction
    Refund {
        #[arg(long)]
        method: String,
        #[arg(long)]
        transaction_id: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Void a parent transaction
    Void {
        #[arg(long)]
        method: String,
        #[arg(long)]
        transaction_id: String,
    },
    /// Print the state and status a new order enters for a method
    State {
        #[arg(long)]
        method: String,
    },
}

fn remote_gateway(settings: &Settings) -> Result<GatewayClientBox> {
    #[cfg(feature = "http-gateway")]
    {
        if settings.gateway.is_complete() {
            let gateway =
                paynl_checkout::infrastructure::http::HttpGateway::new(&settings.gateway)
                    .into_diagnostic()?;
            return Ok(Box::new(gateway));
        }
        eprintln!(
            "WARNING: Gateway credentials are incomplete. Falling back to the in-memory gateway."
        );
    }
    #[cfg(not(feature = "http-gateway"))]
    {
        let _ = settings;
        eprintln!(
            "WARNING: Remote gateway requested, but 'http-gateway' feature is not enabled. \
             Falling back to the in-memory gateway."
        );
    }
    Ok(Box::new(InMemoryGateway::new()))
}

fn checkout(settings: &Settings, code: &str, gateway: GatewayClientBox) -> Result<CheckoutService> {
    let method = method_for_code(code).ok_or_else(|| miette!("Unknown payment method: {code}"))?;
    Ok(CheckoutService::new(
        method,
        settings.method(code),
        StoreContext::from_settings(settings),
        TransactionRequestBuilder::new(Box::new(ForwardedIpResolver::from_env())),
        TransactionLifecycleClient::new(gateway),
        Box::new(InMemoryStatusCatalog::new()),
    ))
}

fn parent(transaction_id: String) -> PaymentRecord {
    PaymentRecord {
        parent_transaction_id: Some(transaction_id),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log_level, cli.log_json);

    let settings = Settings::load(cli.config.as_deref()).into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = JsonWriter::new(stdout.lock());

    match cli.command {
        Command::Request { order, method } => {
            let order = OrderReader::new(File::open(order).into_diagnostic()?)
                .read()
                .into_diagnostic()?;
            let service = checkout(&settings, &method, Box::new(InMemoryGateway::new()))?;
            let request = service.build_request(&order, Utc::now()).into_diagnostic()?;
            writer.write(&request).into_diagnostic()?;
        }
        Command::Start { order, method } => {
            let order = OrderReader::new(File::open(order).into_diagnostic()?)
                .read()
                .into_diagnostic()?;
            let service = checkout(&settings, &method, remote_gateway(&settings)?)?;
            let outcome = service
                .start_transaction(&order, Utc::now())
                .await
                .into_diagnostic()?;
            writer.write(&outcome).into_diagnostic()?;
        }
        Command::Capture {
            method,
            transaction_id,
            amount,
        } => {
            let service = checkout(&settings, &method, remote_gateway(&settings)?)?;
            let ack = service
                .capture(&parent(transaction_id), amount)
                .await
                .into_diagnostic()?;
            writer.write(&ack).into_diagnostic()?;
        }
        Command::Refund {
            method,
            transaction_id,
            amount,
        } => {
            let service = checkout(&settings, &method, remote_gateway(&settings)?)?;
            let ack = service
                .refund(&parent(transaction_id), amount)
                .await
                .into_diagnostic()?;
            writer.write(&ack).into_diagnostic()?;
        }
        Command::Void {
            method,
            transaction_id,
        } => {
            let service = checkout(&settings, &method, remote_gateway(&settings)?)?;
            let ack = service
                .void(&parent(transaction_id))
                .await
                .into_diagnostic()?;
            writer.write(&ack).into_diagnostic()?;
        }
        Command::State { method } => {
            let service = checkout(&settings, &method, Box::new(InMemoryGateway::new()))?;
            writer.write(&service.initialize()).into_diagnostic()?;
        }
    }

    Ok(())
}
