//! Control process for an HAProxy-style reverse proxy engine.
//!
//! The controller never proxies traffic itself. It owns the sequence around
//! the engine: validate a requested routing change, render and check the
//! candidate configuration, ask the engine to reload without dropping
//! in-flight connections, and confirm the reload by watching the engine's
//! pid file change.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use proxy_controller::config::loader::load_config;
use proxy_controller::config::watcher::ConfigWatcher;
use proxy_controller::engine::confirm::FsReader;
use proxy_controller::engine::render::TemplateRenderer;
use proxy_controller::engine::runner::CommandRunner;
use proxy_controller::observability::logging::init_logging;
use proxy_controller::routing::{destination_matcher, Matcher, RouteRequest};
use proxy_controller::{ControllerConfig, Orchestrator, ServiceDestination, ServiceSpec};

#[derive(Parser)]
#[command(name = "proxy-controller")]
#[command(about = "Control process for an HAProxy-style reverse proxy engine", long_about = None)]
struct Cli {
    /// Controller configuration file.
    #[arg(short, long, default_value = "controller.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the rendered engine configuration without touching the live instance
    Check,

    /// Validate, render, check, reload, and confirm a service definition
    Reconfigure {
        /// Read the full definition from a JSON file instead of flags
        #[arg(long)]
        spec_file: Option<PathBuf>,

        #[arg(long)]
        service_name: Option<String>,

        /// Request mode of the first destination (http, tcp, ...)
        #[arg(long, default_value = "")]
        req_mode: String,

        #[arg(long)]
        service_path: Option<String>,

        #[arg(long)]
        service_domain: Option<String>,

        #[arg(long)]
        src_port: Option<u16>,

        #[arg(long)]
        port: Option<String>,
    },

    /// Reload the engine against its current configuration and confirm
    Reload,

    /// Report which destination of a service definition matches a request
    Resolve {
        /// Service definition as JSON
        #[arg(long)]
        spec_file: PathBuf,

        #[arg(long, default_value = "")]
        host: String,

        #[arg(long, default_value = "/")]
        path: String,
    },

    /// Re-check and reload whenever the rendered configuration changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability.log_level);

    tracing::info!(
        engine = %config.engine.binary,
        config_path = %config.engine.config_path,
        pid_path = %config.engine.pid_path,
        "Configuration loaded"
    );

    let orchestrator = build_orchestrator(&config);

    match cli.command {
        Commands::Check => {
            let run = orchestrator.check_current().await?;
            match run.warning {
                Some(_) => tracing::info!("Configuration is valid (with warnings)"),
                None => tracing::info!("Configuration is valid"),
            }
        }

        Commands::Reconfigure {
            spec_file,
            service_name,
            req_mode,
            service_path,
            service_domain,
            src_port,
            port,
        } => {
            let spec = match spec_file {
                Some(path) => read_spec(&path)?,
                None => ServiceSpec {
                    service_name: service_name.unwrap_or_default(),
                    service_dest: vec![ServiceDestination {
                        req_mode,
                        service_path,
                        service_domain,
                        src_port,
                        port,
                    }],
                },
            };

            let report = orchestrator.reconfigure(&spec).await?;
            match report.check_warning {
                Some(_) => tracing::info!(service = %spec.service_name, "Reconfigured (check produced warnings)"),
                None => tracing::info!(service = %spec.service_name, "Reconfigured"),
            }
        }

        Commands::Reload => {
            orchestrator.reload_current().await?;
            tracing::info!("Reload confirmed");
        }

        Commands::Resolve {
            spec_file,
            host,
            path,
        } => {
            let spec = read_spec(&spec_file)?;
            let request = RouteRequest {
                host: &host,
                path: &path,
            };

            let matched = spec
                .service_dest
                .iter()
                .find(|dest| destination_matcher(dest).matches(&request));
            match matched {
                Some(dest) => println!("{}", serde_json::to_string_pretty(dest)?),
                None => {
                    eprintln!("no destination of '{}' matches", spec.service_name);
                    std::process::exit(1);
                }
            }
        }

        Commands::Watch => {
            let (watcher, mut changes) = ConfigWatcher::new(Path::new(&config.engine.config_path));
            // Dropping the handle stops the notify backend.
            let _watcher = watcher.run()?;

            tracing::info!("Watching engine configuration for changes");
            while changes.recv().await.is_some() {
                if let Err(e) = orchestrator.check_current().await {
                    tracing::error!(error = %e, "Changed configuration failed check, not reloading");
                    continue;
                }
                match orchestrator.reload_current().await {
                    Ok(()) => tracing::info!("Reloaded after configuration change"),
                    Err(e) => tracing::error!(error = %e, "Reload after configuration change failed"),
                }
            }
        }
    }

    Ok(())
}

fn build_orchestrator(
    config: &ControllerConfig,
) -> Orchestrator<CommandRunner, FsReader, TemplateRenderer> {
    let runner = CommandRunner::new(&config.engine.binary);
    let renderer = TemplateRenderer::new(&config.engine.template_path, &config.engine.config_path);
    Orchestrator::new(runner, FsReader, renderer, config)
}

fn read_spec(path: &Path) -> Result<ServiceSpec, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
