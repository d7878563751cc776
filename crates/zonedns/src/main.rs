// # zonedns - DNS record CLI
//
// A THIN front end over zonedns-core: it reads provider configuration from
// the environment, registers the built-in providers, runs one record
// operation and prints the resulting records as JSON on stdout.
//
// All record logic lives in the provider crates.
//
// ## Configuration
//
// ### Provider
// - `ZONEDNS_PROVIDER_TYPE`: Provider type (cpanel)
// - `ZONEDNS_HOST`: Base URL of the control panel (e.g. https://cpanel.example.com:2083)
// - `ZONEDNS_USERNAME`: Account name
// - `ZONEDNS_API_TOKEN`: API token
// - `ZONEDNS_TIMEOUT_SECS`: Per-request timeout (optional)
// - `ZONEDNS_REQUIRE_SERIAL`: Refuse writes when the zone has no SOA serial (true/false)
// - `ZONEDNS_SET_STRATEGY`: combined (default) or two-phase
// - `ZONEDNS_MODE`: live (default) or dry-run
//
// ### Logging
// - `ZONEDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: warn)
//
// ## Example
//
// ```bash
// export ZONEDNS_HOST=https://cpanel.example.com:2083
// export ZONEDNS_USERNAME=alice
// export ZONEDNS_API_TOKEN=your_token
//
// zonedns list example.com.
// zonedns append example.com. --type TXT --name _acme-challenge --value token --ttl 120
// ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use zonedns_core::{
    DnsProvider, ProviderConfig, ProviderRegistry, Record, RecordAppender, RecordDeleter,
    RecordGetter, RecordSetter, SetStrategy,
};

/// Exit codes for different termination scenarios
///
/// - 0: Operation succeeded
/// - 1: Configuration or startup error
/// - 2: Runtime error (the operation failed)
#[derive(Debug, Clone, Copy)]
enum ZonednsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<ZonednsExitCode> for ExitCode {
    fn from(code: ZonednsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "zonedns", version, about = "Manage DNS records through a hosting control panel")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every record of a zone
    List {
        /// Zone name, e.g. "example.com."
        zone: String,
    },
    /// Add a record
    Append {
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Remove records matching type, name and value
    Delete {
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Replace records matching type, name and value
    Set {
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
}

#[derive(Debug, Args)]
struct RecordArgs {
    /// Record type (A, AAAA, CNAME, TXT, ...)
    #[arg(long = "type")]
    record_type: String,

    /// Name relative to the zone ("" or "@" for the apex)
    #[arg(long, default_value = "")]
    name: String,

    /// Record data in presentation format
    #[arg(long)]
    value: String,

    #[arg(long, default_value_t = 300)]
    ttl: u32,
}

impl From<RecordArgs> for Record {
    fn from(args: RecordArgs) -> Self {
        let name = if args.name == "@" { String::new() } else { args.name };
        Record::new(args.record_type, name, args.value, args.ttl)
    }
}

/// Application configuration
struct Config {
    provider_type: String,
    host: String,
    username: String,
    api_token: String,
    timeout_secs: Option<u64>,
    require_serial: bool,
    set_strategy: SetStrategy,
    dry_run: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let timeout_secs = match env::var("ZONEDNS_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.parse()
                    .with_context(|| format!("ZONEDNS_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            Err(_) => None,
        };

        let require_serial = match env::var("ZONEDNS_REQUIRE_SERIAL") {
            Ok(raw) => parse_bool(&raw)
                .with_context(|| format!("ZONEDNS_REQUIRE_SERIAL is not a boolean: {}", raw))?,
            Err(_) => false,
        };

        let set_strategy = match env::var("ZONEDNS_SET_STRATEGY") {
            Ok(raw) => raw.parse()?,
            Err(_) => SetStrategy::default(),
        };

        let dry_run = match env::var("ZONEDNS_MODE") {
            Ok(raw) => parse_dry_run(&raw)?,
            Err(_) => false,
        };

        Ok(Self {
            provider_type: env::var("ZONEDNS_PROVIDER_TYPE")
                .unwrap_or_else(|_| "cpanel".to_string()),
            host: env::var("ZONEDNS_HOST").context("ZONEDNS_HOST is required")?,
            username: env::var("ZONEDNS_USERNAME").context("ZONEDNS_USERNAME is required")?,
            api_token: env::var("ZONEDNS_API_TOKEN").context("ZONEDNS_API_TOKEN is required")?,
            timeout_secs,
            require_serial,
            set_strategy,
            dry_run,
            log_level: env::var("ZONEDNS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.provider_type.as_str() {
            "cpanel" => {}
            _ => anyhow::bail!(
                "ZONEDNS_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: cpanel",
                self.provider_type
            ),
        }

        // Check for obvious placeholder tokens (common mistake)
        let token_lower = self.api_token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower == "token"
        {
            anyhow::bail!(
                "ZONEDNS_API_TOKEN appears to be a placeholder. \
                Use an actual API token from your control panel."
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ZONEDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.provider_config().validate()?;
        Ok(())
    }

    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::Cpanel {
            host: self.host.clone(),
            username: self.username.clone(),
            api_token: self.api_token.clone(),
            timeout_secs: self.timeout_secs,
            require_serial: self.require_serial,
            set_strategy: self.set_strategy,
            dry_run: self.dry_run,
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("expected true or false"),
    }
}

/// `dry-run` or `live` (empty means live); any other value is rejected
fn parse_dry_run(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "dry-run" => Ok(true),
        "live" | "" => Ok(false),
        _ => anyhow::bail!(
            "ZONEDNS_MODE '{}' is not valid. Valid modes: live, dry-run",
            raw
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ZonednsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return ZonednsExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ZonednsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ZonednsExitCode::RuntimeError.into();
        }
    };

    let provider = {
        let registry = ProviderRegistry::new();
        register_builtin_providers(&registry);
        match registry.create_provider(&config.provider_config()) {
            Ok(provider) => provider,
            Err(e) => {
                eprintln!("Provider setup error: {}", e);
                return ZonednsExitCode::ConfigError.into();
            }
        }
    };

    match rt.block_on(run(provider.as_ref(), cli.command)) {
        Ok(records) => match serde_json::to_string_pretty(&records) {
            Ok(json) => {
                println!("{}", json);
                ZonednsExitCode::Success.into()
            }
            Err(e) => {
                error!("Failed to encode output: {}", e);
                ZonednsExitCode::RuntimeError.into()
            }
        },
        Err(e) => {
            error!("Operation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ZonednsExitCode::RuntimeError.into()
        }
    }
}

fn register_builtin_providers(registry: &ProviderRegistry) {
    #[cfg(feature = "cpanel")]
    zonedns_provider_cpanel::register(registry);

    info!("Registered providers: {}", registry.list_providers().join(", "));
}

/// Run one record operation
async fn run(provider: &dyn DnsProvider, command: Command) -> Result<Vec<Record>> {
    let records = match command {
        Command::List { zone } => {
            info!("Listing records of {} via {}", zone, provider.provider_name());
            provider.get_records(&zone).await?
        }
        Command::Append { zone, record } => {
            info!("Appending record to {}", zone);
            provider.append_records(&zone, &[record.into()]).await?
        }
        Command::Delete { zone, record } => {
            info!("Deleting record from {}", zone);
            provider.delete_records(&zone, &[record.into()]).await?
        }
        Command::Set { zone, record } => {
            info!("Setting record in {}", zone);
            provider.set_records(&zone, &[record.into()]).await?
        }
    };
    Ok(records)
}
