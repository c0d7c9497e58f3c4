//! RustPush CLI - publish events and sign channel subscriptions.
//!
//! Credentials and client configuration are read from the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUSTPUSH_APP_ID` | *(required)* | Application identifier |
//! | `RUSTPUSH_KEY` | *(required)* | Public authentication key |
//! | `RUSTPUSH_SECRET` | *(required)* | Application secret |
//! | `RUSTPUSH_HOST` | `api.pusherapp.com` | Service host |
//! | `RUSTPUSH_PORT` | `80` | Service port |
//! | `RUSTPUSH_SECURED` | `true` | Use https |
//! | `RUSTPUSH_TIMEOUT` | `30` | Request timeout in seconds |
//! | `RUSTPUSH_DEBUG` | `false` | Print full responses for triggers |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rustpush_client::{PushClient, TracingLogSink, TriggerOutcome, TriggerParams};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Publish events and sign channel subscriptions.
#[derive(Parser, Debug)]
#[command(name = "rustpush", version)]
struct Args {
    /// Log level filter, used when `RUST_LOG` is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trigger an event on one or more channels.
    Trigger {
        /// Channel to publish on (repeatable, at most 100).
        #[arg(short, long = "channel", required = true)]
        channels: Vec<String>,
        /// Event name.
        event: String,
        /// Event payload as JSON.
        data: String,
        /// Socket id to exclude from delivery.
        #[arg(long)]
        socket_id: Option<String>,
        /// Print the full response.
        #[arg(long)]
        debug: bool,
        /// Send `data` as an already serialized string.
        #[arg(long)]
        raw: bool,
    },
    /// Show the attributes of one channel.
    Channel {
        /// Channel name.
        name: String,
        /// Comma-separated attributes to request, e.g. `user_count`.
        #[arg(long)]
        info: Option<String>,
    },
    /// List channels.
    Channels {
        /// Only list channels whose name starts with this prefix.
        #[arg(long)]
        prefix: Option<String>,
        /// Comma-separated attributes to request, e.g. `user_count`.
        #[arg(long)]
        info: Option<String>,
    },
    /// Signed GET of any application resource.
    Get {
        /// Resource path below `/apps/{app_id}`, e.g. `/channels`.
        resource: String,
        /// Query parameter as `key=value` (repeatable).
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    /// Sign a private channel subscription.
    Auth {
        /// Channel name.
        channel: String,
        /// Socket id of the subscribing connection.
        socket_id: String,
        /// Custom data to include in the signature.
        #[arg(long)]
        data: Option<String>,
    },
    /// Sign a presence channel subscription.
    PresenceAuth {
        /// Channel name.
        channel: String,
        /// Socket id of the subscribing connection.
        socket_id: String,
        /// User identifier.
        user_id: String,
        /// User info as JSON.
        #[arg(long)]
        user_info: Option<String>,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn parse_json(label: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{label} is not valid JSON"))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let client = PushClient::from_env()
        .context("failed to create client")?
        .with_log_sink(Arc::new(TracingLogSink));
    debug!(host = %client.config().host, "client configured");

    match args.command {
        Command::Trigger {
            channels,
            event,
            data,
            socket_id,
            debug,
            raw,
        } => {
            let data = if raw {
                Value::String(data)
            } else {
                parse_json("event data", &data)?
            };
            let params = TriggerParams {
                channels,
                event,
                data,
                socket_id,
                debug,
                already_encoded: raw,
            };
            match client.trigger_with(&params)? {
                TriggerOutcome::Flag(true) => println!("event accepted"),
                TriggerOutcome::Flag(false) => bail!("event rejected by the service"),
                TriggerOutcome::Debug(envelope) => print_json(&envelope)?,
            }
        }
        Command::Channel { name, info } => {
            let params: Vec<(&str, &str)> =
                info.as_deref().map(|i| ("info", i)).into_iter().collect();
            let Some(channel) = client.get_channel_info(&name, &params)? else {
                bail!("channel query refused by the service");
            };
            print_json(&channel)?;
        }
        Command::Channels { prefix, info } => {
            let mut params = Vec::new();
            if let Some(prefix) = prefix.as_deref() {
                params.push(("filter_by_prefix", prefix));
            }
            if let Some(info) = info.as_deref() {
                params.push(("info", info));
            }
            let Some(channels) = client.get_channels(&params)? else {
                bail!("channel listing refused by the service");
            };
            print_json(&channels)?;
        }
        Command::Get { resource, params } => {
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let Some(envelope) = client.get(&resource, &params)? else {
                bail!("GET {resource} refused by the service");
            };
            print_json(&envelope)?;
        }
        Command::Auth {
            channel,
            socket_id,
            data,
        } => {
            let token = client.socket_auth(&channel, &socket_id, data.as_deref());
            println!("{}", token.to_json()?);
        }
        Command::PresenceAuth {
            channel,
            socket_id,
            user_id,
            user_info,
        } => {
            let user_info = user_info
                .as_deref()
                .map(|raw| parse_json("user info", raw))
                .transpose()?;
            let token = client.presence_auth(&channel, &socket_id, &user_id, user_info.as_ref())?;
            println!("{}", token.to_json()?);
        }
    }

    Ok(())
}
