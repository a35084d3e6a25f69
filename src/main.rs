use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use okta_discover::config::{Config, API_TOKEN_ENV, ORG_URL_ENV};
use okta_discover::okta::http::format_okta_error;
use okta_discover::okta::{OktaClient, OktaService};
use okta_discover::resource::{self, ResourceDescriptor, PROVIDER};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{Instrument, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Discover Okta org configuration as importable resource descriptors
#[derive(Parser, Debug)]
#[command(name = "okta-discover", version, about, long_about = None)]
struct Args {
    /// Okta org URL, e.g. https://acme.okta.com
    #[arg(long)]
    org_url: Option<String>,

    /// API token
    #[arg(long, env = "OKTA_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Comma-separated services to discover (default: all)
    #[arg(short, long, value_delimiter = ',')]
    services: Vec<String>,

    /// Append a random suffix to every resource name
    #[arg(long)]
    random_suffix: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// List available services and exit
    #[arg(long)]
    list_services: bool,

    /// Remember org URL and services for later runs
    #[arg(long)]
    save_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("okta-discover started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("okta-discover").join("okta-discover.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".okta-discover").join("okta-discover.log");
    }
    PathBuf::from("okta-discover.log")
}

/// Document written to stdout
#[derive(Serialize)]
struct Output<'a> {
    provider: &'static str,
    generated_at: String,
    resources: &'a [ResourceDescriptor],
}

fn render(resources: &[ResourceDescriptor], format: OutputFormat) -> Result<String> {
    let output = Output {
        provider: PROVIDER,
        generated_at: Utc::now().to_rfc3339(),
        resources,
    };

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&output).context("Failed to render JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(&output).context("Failed to render YAML"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level);

    if args.list_services {
        for def in resource::get_services() {
            println!("{:<16} {}", def.name, def.display_name);
        }
        return Ok(());
    }

    let mut config = Config::load();
    let org_url = config
        .effective_org_url(args.org_url.as_deref())
        .with_context(|| format!("No Okta org configured. Set {} or use --org-url", ORG_URL_ENV))?;
    let api_token = args
        .api_token
        .clone()
        .filter(|t| !t.is_empty())
        .with_context(|| format!("No API token. Set {} or use --api-token", API_TOKEN_ENV))?;
    let services = config.effective_services(&args.services);

    if args.save_config {
        config.remember(&org_url, &args.services);
        config.save().context("Failed to save config")?;
    }

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("discovery", %run_id, org = %org_url);
    span.in_scope(|| tracing::info!("Discovering services: {}", services.join(", ")));

    let client = OktaClient::new(&org_url, &api_token)?;
    let service = OktaService::from_client(client).with_random_suffix(args.random_suffix);

    let names: Vec<&str> = services.iter().map(String::as_str).collect();
    let resources = match resource::run_generators(&names, &service)
        .instrument(span)
        .await
    {
        Ok(resources) => resources,
        Err(err) => {
            tracing::error!("Discovery failed: {:#}", err);
            eprintln!("Error: {}", format_okta_error(&err));
            drop(log_guard);
            std::process::exit(1);
        }
    };

    tracing::info!("Discovered {} resources", resources.len());
    println!("{}", render(&resources, args.format)?);

    Ok(())
}
