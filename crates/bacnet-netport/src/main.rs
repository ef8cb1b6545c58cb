//! netportd entry point.
//!
//! Builds the network ports described by a configuration file and reads
//! back every listed property of every port, logging the decoded values.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use bacnet_codec::{decode_application_data, ApplicationValue};
use bacnet_netport::{NetPortConfig, NetworkPorts, MAX_APDU_LENGTH};
use bacnet_object_common::{ObjectHandler, ReadPropertyRequest};
use clap::Parser;
use tracing::{debug, error, info};

/// BACnet network-port bring-up tool
#[derive(Parser, Debug)]
#[command(name = "netportd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network-port configuration file (TOML)
    #[arg(short = 'c', long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Only dump this instance
    #[arg(short = 'i', long)]
    instance: Option<u32>,
}

fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}

/// Decodes every value in an encoded property.
fn decode_all(mut data: &[u8]) -> anyhow::Result<Vec<ApplicationValue>> {
    let mut values = Vec::new();
    while !data.is_empty() {
        let (value, used) = decode_application_data(data)?;
        values.push(value);
        data = &data[used..];
    }
    Ok(values)
}

fn format_values(values: &[ApplicationValue]) -> String {
    match values {
        [] => "{}".to_string(),
        [single] => single.to_string(),
        many => {
            let items: Vec<String> = many.iter().map(|v| v.to_string()).collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

fn dump_port(ports: &NetworkPorts, instance: u32) -> anyhow::Result<()> {
    let mut apdu = vec![0u8; usize::from(MAX_APDU_LENGTH)];

    for (class, property) in ports.property_lists().iter() {
        let request = ReadPropertyRequest::new(ports.object_type(), instance, property);
        let len = ports
            .read_property(&request, &mut apdu)
            .with_context(|| format!("reading {} of network-port:{}", property, instance))?;
        let values = decode_all(&apdu[..len])
            .with_context(|| format!("decoding {} of network-port:{}", property, instance))?;

        debug!(%class, %property, "read");
        info!(
            "{} {} = {} ({} bytes)",
            instance,
            property,
            format_values(&values),
            len
        );
    }
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = NetPortConfig::load(&args.config)?;
    config.validate()?;
    let ports = NetworkPorts::from_config(&config)?;

    info!(
        "Configured {} network port(s), profile {}",
        ports.count(),
        ports.profile()
    );

    let instances = match args.instance {
        Some(instance) if ports.valid_instance(instance) => vec![instance],
        Some(instance) => bail!("network-port:{} is not configured", instance),
        None => ports.store().instances(),
    };

    for instance in instances {
        dump_port(&ports, instance)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("Starting netportd with config {}", args.config.display());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("netportd failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
