use std::sync::OnceLock;

use clap::{Parser, Subcommand};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry::Registry};

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Sets up a panic hook so the panic ends up in the log file.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("A panic occurred: {}", panic_info);
    }));
}

/// vSphere management client (synchronous)
#[derive(Debug, Parser)]
#[command(name = "ironvim", version, about, long_about = None)]
pub struct Args {
    /// Server address, e.g. `vc.example.com` or `https://esx-01/sdk`
    #[arg(short = 'U', long)]
    pub url: Option<String>,

    #[arg(short, long, help = "User name; without it the calls run unauthenticated")]
    pub username: Option<String>,

    #[arg(short = 'P', long, help = "Password for --username")]
    pub password: Option<String>,

    /// Skip TLS certificate and host name verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Deadline for the whole command
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Attempts per call on temporary network errors
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase logging verbosity")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show product information of the endpoint
    About,

    /// Show the server clock
    Time,

    /// List the operations this client can invoke
    Methods {
        /// Only list operations whose wire name contains this text
        filter: Option<String>,
    },

    /// Read properties of a managed object
    Get {
        /// Managed object type, e.g. `VirtualMachine`
        kind: String,
        /// Managed object id, e.g. `vm-42`
        value: String,
        /// Property paths; all properties when omitted
        props: Vec<String>,
    },

    /// Power on a virtual machine and wait for the task
    PowerOn {
        /// `vm-42` or `VirtualMachine:vm-42`
        vm: String,
    },

    /// Power off a virtual machine and wait for the task
    PowerOff {
        /// `vm-42` or `VirtualMachine:vm-42`
        vm: String,
    },
}

impl Command {
    pub fn needs_server(&self) -> bool {
        !matches!(self, Self::Methods { .. })
    }
}

/// Initialize logging with file output and structured fields
pub fn init_logging(verbose_level: u8) -> anyhow::Result<()> {
    setup_panic_hook();

    // Bridge logs from the `log` crate (ureq, native-tls) to `tracing`
    LogTracer::init().ok();

    let file = std::fs::File::create("ironvim.log")?;
    let (nb_writer, guard) = tracing_appender::non_blocking(file);

    if LOG_GUARD.set(guard).is_err() {
        tracing::warn!("LOG_GUARD was already set. This may indicate a problem in initialization.");
    }

    let filter_str = match verbose_level {
        0 => "info,ureq=error",
        1 => "debug,ureq=warn",
        2 => "trace,ureq=info",
        _ => "trace",
    };

    let env_filter = EnvFilter::new(filter_str);

    let subscriber = Registry::default().with(env_filter).with(
        fmt::layer()
            .with_writer(nb_writer)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("Logging system initialized.");

    Ok(())
}
