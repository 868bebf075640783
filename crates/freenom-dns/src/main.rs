// # freenom-dns - Command Line Host
//
// A thin host over freenom-dns-core: parse the command line, configure the
// provider, run one entry point, print the result as JSON.
//
// ## Credentials
//
// `--username` / `--password` win; when omitted, `FREENOM_USERNAME` and
// `FREENOM_PASSWORD` are used. An empty value is a configuration error.
//
// ## Example
//
// ```bash
// export FREENOM_USERNAME=alice
// export FREENOM_PASSWORD=secret
//
// freenom-dns create --domain example.tk --type A --name www --value 10.0.0.1
// freenom-dns update www/example.tk --value 10.0.0.2
// freenom-dns reverse --domain example.tk --value 10.0.0.2
// freenom-dns delete www/example.tk
// ```

mod cli;

use anyhow::Context;
use clap::Parser;
use freenom_dns_core::config::{AttrValue, ProviderConfig, RegistrarConfig};
use freenom_dns_core::{ConfigureOutcome, Error, FreenomProvider};
use serde_json::json;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command, RegistrarKind};

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Configuration error
/// - 2: Runtime error
/// - 3: Record not found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FreenomExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
    NotFound = 3,
}

impl From<FreenomExitCode> for ExitCode {
    fn from(code: FreenomExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            );
            return FreenomExitCode::ConfigError.into();
        }
    };

    // Logs go to stderr so stdout stays pure JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return FreenomExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return FreenomExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(cli, |key| std::env::var(key).ok())).into()
}

/// Configure the provider and run the command.
///
/// `env` looks up `FREENOM_USERNAME` / `FREENOM_PASSWORD` for credentials
/// not given on the command line.
async fn run<F>(cli: Cli, env: F) -> FreenomExitCode
where
    F: Fn(&str) -> Option<String>,
{
    let mut provider = FreenomProvider::new(env!("CARGO_PKG_VERSION"));
    let config = provider_config(&cli);
    debug!(
        version = provider.version(),
        registrar = config.registrar.type_name(),
        "Configuring provider"
    );

    if let Some(code) = configure_exit_code(provider.configure(&config, env).await) {
        return code;
    }

    match execute(&provider, cli.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{}", text);
                FreenomExitCode::Success
            }
            Err(e) => {
                error!("Failed to render output: {}", e);
                FreenomExitCode::RuntimeError
            }
        },
        Err(e) => {
            error!("{:#}", e);
            error_exit_code(&e)
        }
    }
}

/// Exit code when configuration did not produce a session
fn configure_exit_code(
    result: freenom_dns_core::Result<ConfigureOutcome>,
) -> Option<FreenomExitCode> {
    match result {
        Ok(ConfigureOutcome::Configured) => None,
        Ok(ConfigureOutcome::Deferred { attribute }) => {
            error!("Cannot configure provider: {} is not known", attribute);
            Some(FreenomExitCode::ConfigError)
        }
        Err(e) => {
            error!("Configuration error: {}", e);
            Some(FreenomExitCode::ConfigError)
        }
    }
}

/// Exit code for a failed command; context added on the way up is ignored
fn error_exit_code(e: &anyhow::Error) -> FreenomExitCode {
    match e.downcast_ref::<Error>() {
        Some(core) if core.is_not_found() => FreenomExitCode::NotFound,
        _ => FreenomExitCode::RuntimeError,
    }
}

fn provider_config(cli: &Cli) -> ProviderConfig {
    let registrar = match cli.registrar {
        RegistrarKind::Memory => RegistrarConfig::Memory,
        RegistrarKind::File => RegistrarConfig::File {
            path: cli.registrar_path.clone(),
        },
    };

    ProviderConfig {
        username: AttrValue::from(cli.username.clone()),
        password: AttrValue::from(cli.password.clone()),
        registrar,
    }
}

/// Run a single command and return what to print
async fn execute(provider: &FreenomProvider, command: Command) -> anyhow::Result<serde_json::Value> {
    let output = match command {
        Command::Create(args) => {
            let record = provider.create(&args.to_record()).await?;
            serde_json::to_value(record)?
        }
        Command::Read(args) => {
            let record = provider
                .read(&args.id)
                .await?
                .ok_or_else(|| not_found(&args.id))?;
            serde_json::to_value(record)?
        }
        Command::Update(args) => {
            let current = provider
                .read(&args.id)
                .await?
                .ok_or_else(|| not_found(&args.id))?
                .into_record();
            let plan = args.apply(&current);
            debug!(id = %args.id, "Modifying record in place");
            let record = provider.update(&current, &plan).await?;
            serde_json::to_value(record)?
        }
        Command::Delete(args) => {
            let outcome = provider.delete(&args.id).await?;
            json!({ "id": args.id, "outcome": outcome })
        }
        Command::Import(args) => {
            let record = provider.import_state(&args.id).await?;
            serde_json::to_value(record)?
        }
        Command::Get(args) => {
            let record = provider.dns_record(&args.domain, &args.name).await?;
            serde_json::to_value(record)?
        }
        Command::List(args) => serde_json::to_value(provider.dns_records(&args.domain).await?)?,
        Command::Reverse(args) => serde_json::to_value(
            provider
                .reverse_dns_records(&args.domain, &args.value)
                .await?,
        )?,
        Command::Plan(args) => {
            let desired = args.to_record();
            provider.validate(&desired)?;
            let prior = provider
                .read(&desired.id())
                .await
                .with_context(|| format!("Failed to read current state of {}", desired.id()))?;
            let change = provider.plan(prior.as_ref().map(|r| r.record()), &desired);
            json!({ "id": desired.id(), "change": change })
        }
    };

    Ok(output)
}

fn not_found(id: &str) -> anyhow::Error {
    match freenom_dns_core::parse_id(id) {
        Ok(key) => Error::record_not_found(key.domain, key.name).into(),
        Err(e) => e.into(),
    }
}
