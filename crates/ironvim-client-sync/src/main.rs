mod config;
mod http_client;

use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use ironvim_client_core::config::sdk_url;
use ironvim_client_core::retry::{ExponentialBackoff, Retry, with_backoff};
use ironvim_client_core::{ClientConfig, SoapClient, VimClient};
use ironvim_soap::{Context, RoundTripper};
use ironvim_vim25::methods;
use ironvim_vim25::types::{AnyType, ManagedObjectReference, PowerOffVmTask, PowerOnVmTask};
use tracing::{error, info, instrument};

use config::{Args, Command, init_logging};
use http_client::UreqHttpClient;

const RETRY_BACKOFF: ExponentialBackoff = ExponentialBackoff::from_millis(2)
    .factor(250)
    .max_delay(Duration::from_secs(5));

#[instrument(name = "main", level = "info")]
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // If logging fails there is nowhere to report to but stderr.
    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run_app(&args) {
        error!("Application failed to run: {:?}", e);
        return Err(e);
    }

    Ok(())
}

fn run_app(args: &Args) -> anyhow::Result<()> {
    if !args.command.needs_server() {
        if let Command::Methods { filter } = &args.command {
            list_methods(filter.as_deref());
        }
        return Ok(());
    }

    let url = args
        .url
        .as_deref()
        .context("--url is required for this command")?;

    let config = ClientConfig::builder()
        .url(sdk_url(url)?)
        .operation_ids(true)
        .build();
    info!(url = %config.url, insecure = args.insecure, "connecting to server");

    let http = UreqHttpClient::new(args.insecure)?;
    let rt = Retry::new(
        SoapClient::new(http, config),
        with_backoff(args.retries.max(1), RETRY_BACKOFF),
    );

    let ctx = Context::background().with_timeout(Duration::from_secs(args.timeout_secs));
    let client = VimClient::connect(&ctx, rt).context("failed to connect")?;

    let logged_in = match &args.username {
        Some(username) => {
            let password = args.password.as_deref().unwrap_or_default();
            client
                .session_manager()?
                .login(&ctx, username, password)
                .context("login failed")?;
            true
        }
        None => false,
    };

    let result = run_command(&ctx, &client, &args.command);

    if logged_in {
        if let Err(e) = client.session_manager().and_then(|sessions| sessions.logout(&ctx)) {
            tracing::warn!(error = %e, "logout failed");
        }
    }

    result
}

fn run_command<R: RoundTripper>(
    ctx: &Context,
    client: &VimClient<R>,
    command: &Command,
) -> anyhow::Result<()> {
    match command {
        Command::About => {
            let about = &client.service_content().about;
            println!("{}", about.full_name);
            println!("  api type:    {}", about.api_type);
            println!("  api version: {}", about.api_version);
            println!("  product:     {}", about.product_line_id);
            if let Some(uuid) = &about.instance_uuid {
                println!("  uuid:        {uuid}");
            }
        }
        Command::Time => {
            println!("{}", client.current_time(ctx)?);
        }
        Command::Methods { filter } => list_methods(filter.as_deref()),
        Command::Get { kind, value, props } => {
            let obj = ManagedObjectReference::new(kind.as_str(), value.as_str());
            let props: Vec<&str> = props.iter().map(String::as_str).collect();
            let content = client.property_collector().retrieve_one(ctx, &obj, &props)?;

            for property in &content.prop_set {
                println!("{}: {}", property.name, describe(&property.val));
            }
            for missing in &content.missing_set {
                println!("{}: <{}>", missing.path, missing.fault.kind());
            }
        }
        Command::PowerOn { vm } => {
            let task = methods::power_on_vm_task(ctx, client, PowerOnVmTask::new(vm_reference(vm)?))?
                .returnval;
            let info = client.task_waiter().wait(ctx, &task)?;
            println!("{task}: {}", info.state);
        }
        Command::PowerOff { vm } => {
            let task = methods::power_off_vm_task(ctx, client, PowerOffVmTask::new(vm_reference(vm)?))?
                .returnval;
            let info = client.task_waiter().wait(ctx, &task)?;
            println!("{task}: {}", info.state);
        }
    }

    Ok(())
}

fn list_methods(filter: Option<&str>) {
    methods::CATALOG
        .iter()
        .filter(|method| filter.is_none_or(|filter| method.name.contains(filter)))
        .for_each(|method| println!("{:<32} {}", method.name, method.request_type));
}

/// Accepts `vm-42` as well as `VirtualMachine:vm-42`.
fn vm_reference(input: &str) -> anyhow::Result<ManagedObjectReference> {
    if input.contains(':') {
        return input
            .parse()
            .with_context(|| format!("invalid managed object reference {input:?}"));
    }
    Ok(ManagedObjectReference::new("VirtualMachine", input))
}

fn describe(value: &AnyType) -> String {
    match value {
        AnyType::String(text) => text.clone(),
        AnyType::Boolean(flag) => flag.to_string(),
        AnyType::Int(number) => number.to_string(),
        AnyType::Long(number) => number.to_string(),
        AnyType::Double(number) => number.to_string(),
        AnyType::DateTime(time) => time.to_string(),
        AnyType::Mor(mor) => mor.to_string(),
        AnyType::ArrayOfString(items) => format!("[{}]", items.join(", ")),
        AnyType::ArrayOfMor(items) => format!(
            "[{}]",
            items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        ),
        other => match other.as_str() {
            Some(text) => text.to_string(),
            None => format!("({})", other.type_name()),
        },
    }
}
