//! Terminal client for the SmartGov mock API.
//!
//! Every invocation behaves like a page load: the stored session is read at
//! startup, one command runs, and the view it ends on is printed.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use smartgov::session::{FileStorage, HttpGovApi, Screen, SessionController, SessionStore, View};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "smartgov-cli")]
#[command(about = "SmartGov Zambia citizen client", long_about = None)]
struct Cli {
    /// Base URL of the SmartGov API
    #[arg(long, env = "SMARTGOV_API_URL", default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Directory holding the stored session
    #[arg(long, env = "SMARTGOV_STORAGE_DIR", value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the current screen
    Status,
    /// Sign in with a phone number
    Login { phone: String },
    /// Sign out and forget the stored session
    Logout,
    /// Pay a tax to ZRA
    Pay {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "PAYE")]
        tax_type: String,
    },
    /// Register a business with PACRA
    Register {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "Sole Proprietorship")]
        kind: String,
    },
    /// Apply for a national ID
    ApplyId,
    /// List my documents.
    ///
    /// Receipts are kept for the current run only, so on its own this shows
    /// just the NRC card; the reference of each action is printed when it
    /// completes.
    Docs,
    /// Report corruption
    Report {
        #[arg(long)]
        details: Option<String>,
    },
}

/// Numbers stay numbers on the wire; anything else is sent as a string.
fn amount_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Number(_)) => value,
        _ => Value::String(raw.to_string()),
    }
}

fn render(view: &View) {
    let print_notice = |notice: &Option<String>| {
        if let Some(notice) = notice {
            println!("  > {}", notice);
        }
    };

    match view {
        View::Login { notice } => {
            println!("SmartGov Zambia - Login");
            println!("  Sign in with: smartgov-cli login <phone>");
            print_notice(notice);
        }
        View::Home { name, nrc, menu, notice } => {
            println!("Welcome, {} (NRC {})", name, nrc);
            for screen in menu {
                println!("  [{}] {}", screen, screen.title());
            }
            print_notice(notice);
        }
        View::PayTax { notice } => {
            println!("{}", Screen::Pay.title());
            print_notice(notice);
        }
        View::RegisterBusiness { notice } => {
            println!("{}", Screen::Register.title());
            print_notice(notice);
        }
        View::IdApplication { nrc, notice } => {
            println!("{} for NRC {}", Screen::IdApply.title(), nrc);
            print_notice(notice);
        }
        View::Documents { documents } => {
            println!("{}", Screen::Docs.title());
            for doc in documents {
                println!("  {:<36} {}", doc.title, doc.reference);
            }
        }
        View::Report { notice } => {
            println!("{}", Screen::Report.title());
            print_notice(notice);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let storage_dir = cli.storage_dir.unwrap_or_else(FileStorage::default_dir);
    let store = SessionStore::new(FileStorage::new(storage_dir)?);
    let mut ctl = SessionController::start(HttpGovApi::new(cli.api_url), store);

    let outcome = match cli.command {
        Command::Status => Ok(()),
        Command::Login { phone } => ctl.login(&phone).await.map(|_| ()),
        Command::Logout => ctl.logout(),
        Command::Pay { amount, tax_type } => {
            ctl.navigate(Screen::Pay);
            ctl.pay_tax(amount_value(&amount), Value::String(tax_type))
                .await
                .map(|_| ())
        }
        Command::Register { name, kind } => {
            ctl.navigate(Screen::Register);
            ctl.register_business(json!({ "name": name, "type": kind }))
                .await
                .map(|_| ())
        }
        Command::ApplyId => {
            ctl.navigate(Screen::IdApply);
            ctl.apply_for_id().await.map(|_| ())
        }
        Command::Docs => {
            ctl.navigate(Screen::Docs);
            Ok(())
        }
        Command::Report { details } => {
            ctl.navigate(Screen::Report);
            ctl.submit_report(details.as_deref()).await.map(|_| ())
        }
    };

    render(&ctl.view());
    outcome.map_err(Into::into)
}
