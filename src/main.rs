//! smooth-scroll - inertial scrolling daemon
//!
//! Entry point for the daemon binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use smooth_scroll::config::Config;
use smooth_scroll::{daemon, device, utils};

/// Command-line arguments for smooth-scroll
#[derive(Parser, Debug)]
#[command(name = "smooth-scroll")]
#[command(version, about = "Inertial scrolling for evdev mice", long_about = None)]
pub struct Args {
    /// Input device to grab (auto-detected when omitted)
    #[arg(env = "SMOOTH_SCROLL_DEVICE")]
    pub device: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "/etc/smooth-scroll/config.toml")]
    pub config: PathBuf,

    /// List scroll-capable mice and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging has to come up before we can report how config loading
    // went, but the config carries the fallback log level.
    let loaded = Config::load(&args.config);
    let level_hint = match &loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => "info".to_string(),
    };
    init_logging(&args, &level_hint)?;

    if args.list_devices {
        let mice = device::list_scroll_mice();
        if mice.is_empty() {
            println!("no scroll-capable mice found");
        }
        for (path, name) in mice {
            println!("{}\t{}", path.display(), name);
        }
        return Ok(());
    }

    info!("smooth-scroll v{}", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => {
            info!("Configuration loaded from {}", args.config.display());
            config
        }
        Err(error) => {
            warn!("Failed to load config: {error:#}, using defaults");
            Config::default_config()
        }
    };
    let config = config.with_overrides(args.device.clone());

    if let Err(error) = daemon::run(config).await {
        eprintln!("{}", utils::format_user_error(&error));
        return Err(error);
    }

    info!("smooth-scroll shut down");
    Ok(())
}

fn init_logging(args: &Args, default_level: &str) -> Result<()> {
    let level = match args.verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("smooth_scroll={level},warn"))
        });

    let stdout_layer = match args.log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().boxed(),
        "compact" => tracing_subscriber::fmt::layer().compact().boxed(),
        _ => tracing_subscriber::fmt::layer().pretty().boxed(),
    };

    let mut layers = vec![stdout_layer];
    if let Some(log_file_path) = &args.log_file {
        let file = std::fs::File::create(log_file_path)?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();
    Ok(())
}
