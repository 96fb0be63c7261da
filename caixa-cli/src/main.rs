use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod finance_cmd;
mod simulate;
mod state;
mod webhook_cmd;

#[derive(Parser, Debug)]
#[command(
    name = "caixa",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CAIXA_BUILD_SHA"), ")"),
    about = "Personal finance tracker: classify, import and summarize transactions"
)]
struct Cli {
    /// Config file (default: ~/.caixa/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a chat-style message ("gastei 50 no mercado")
    Classify {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,

        /// Signed amount hint (CSV-style); negative means money out
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Create a manual transaction record
    Add {
        /// Amount, e.g. 50 or 1.234,56
        #[arg(long)]
        amount: String,

        /// income | expense | investment (receita/despesa/investimento also accepted)
        #[arg(long = "type")]
        kind: String,

        /// Category; inferred from the description when omitted
        #[arg(long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD or DD/MM/YYYY); defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Description
        #[arg(required = true)]
        description: Vec<String>,
    },

    /// Import a CSV statement (3-column spreadsheet or 7-column bank export)
    Import {
        #[arg(long)]
        csv: PathBuf,

        /// Write the records as JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// List every skipped row with its reason
        #[arg(long)]
        show_skipped: bool,
    },

    /// Import a CSV and print dashboard totals
    Summary {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// WhatsApp webhook helpers
    Webhook {
        #[command(subcommand)]
        command: WebhookCommand,
    },

    /// Interactive WhatsApp simulator (reads messages from stdin)
    Simulate,

    /// Manage ~/.caixa/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum WebhookCommand {
    /// Answer a subscription handshake (prints the challenge on success)
    Verify {
        #[arg(long)]
        mode: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        challenge: String,
    },

    /// Process an inbound payload file and print records and replies
    Handle {
        #[arg(long)]
        payload: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let default = ["caixa", "caixa_core", "caixa_finance", "caixa_ingest", "caixa_whatsapp"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Classify { text, amount, json } => {
            let classifier = cfg.build_classifier()?;
            finance_cmd::classify(&classifier, &text.join(" "), amount.as_deref(), json)?;
        }

        Command::Add { amount, kind, category, date, description } => {
            let classifier = cfg.build_classifier()?;
            finance_cmd::add(
                &classifier,
                &amount,
                &kind,
                category.as_deref(),
                date.as_deref(),
                &description.join(" "),
            )?;
        }

        Command::Import { csv, out, show_skipped } => {
            let classifier = cfg.build_classifier()?;
            finance_cmd::import(&classifier, &csv, out.as_deref(), show_skipped)?;
        }

        Command::Summary { csv, json } => {
            let classifier = cfg.build_classifier()?;
            finance_cmd::summary(&classifier, &csv, json)?;
        }

        Command::Webhook { command } => match command {
            WebhookCommand::Verify { mode, token, challenge } => {
                webhook_cmd::verify(&cfg, mode, token, challenge)?;
            }
            WebhookCommand::Handle { payload } => {
                let classifier = cfg.build_classifier()?;
                webhook_cmd::handle(&classifier, &payload)?;
            }
        },

        Command::Simulate => {
            let classifier = cfg.build_classifier()?;
            simulate::run(&classifier)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let mut shown = cfg.clone();
                if shown.whatsapp.verify_token.is_some() {
                    shown.whatsapp.verify_token = Some("********".to_string());
                }
                print!("{}", toml::to_string_pretty(&shown)?);
            }
        },
    }

    Ok(())
}
