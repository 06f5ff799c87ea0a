//! # MQ JMS CLI
//!
//! Command-line interface for sending messages through the mq-jms producer.
//!
//! This module provides CLI commands for:
//! - Sending text or bytes messages with chosen delivery options
//! - Showing the resolved configuration
//!
//! Messages are sent to an in-memory queue manager built from the
//! configuration, which makes the tool useful for checking how delivery
//! options and configuration end up on the message descriptor.

use clap::{Args, Parser, Subcommand};
use mq_jms_core::{
    ConfigurationError, DeliveryMode, InMemoryQueueManager, JmsContext, JmsException,
    JmsMessage, Message, MqJmsConfig, SessionMode, Statistics,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// CLI Structure
// ============================================================================

/// MQ JMS CLI - send messages with JMS delivery semantics
#[derive(Parser, Debug)]
#[command(name = "mq-jms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Send messages through a JMS-style producer")]
pub struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, env = "MQJMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one or more messages to a queue
    Send(SendArgs),

    /// Show the resolved configuration
    Config {
        /// Output format for configuration
        #[arg(short, long, default_value = "yaml")]
        format: ConfigFormat,
    },
}

/// Arguments of the send command
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Destination queue name
    #[arg(short, long)]
    pub queue: String,

    #[command(flatten)]
    pub body: BodyArgs,

    /// Send persistent messages
    #[arg(long)]
    pub persistent: bool,

    /// Time-to-live in milliseconds (0 = unlimited)
    #[arg(long, allow_negative_numbers = true)]
    pub ttl: Option<i64>,

    /// Send under syncpoint and commit after the last message
    #[arg(long)]
    pub transacted: bool,

    /// Number of copies to send
    #[arg(short = 'n', long, default_value = "1")]
    pub count: u32,

    /// Reply-to queue set on every message
    #[arg(long)]
    pub reply_to: Option<String>,

    /// Correlation identifier set on every message
    #[arg(long)]
    pub correlation_id: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

/// Message body source, exactly one is required
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct BodyArgs {
    /// Send a text message with this body
    #[arg(long)]
    pub text: Option<String>,

    /// Send a bytes message with this hex-encoded body
    #[arg(long)]
    pub hex: Option<String>,

    /// Send a bytes message with the contents of this file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Output format options
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable text
    Text,
}

/// Configuration format options
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

// ============================================================================
// Errors
// ============================================================================

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Send failed: {0}")]
    Send(#[from] JmsException),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {message}")]
    CommandFailed { message: String },
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 1,
            Self::Send(_) => 2,
            Self::InvalidArgument { .. } => 3,
            Self::Io(_) => 4,
            Self::CommandFailed { .. } => 5,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Outcome of a send command
#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    pub queue_manager: String,
    pub queue: String,
    pub session_mode: SessionMode,
    pub messages: Vec<SentMessage>,
    pub depth: usize,
    pub statistics: Statistics,
}

/// Headers of one sent message
#[derive(Debug, Clone, Serialize)]
pub struct SentMessage {
    pub message_id: Option<String>,
    pub timestamp: i64,
    pub delivery_mode: DeliveryMode,
    pub expiration: i64,
    pub format: String,
    pub length: usize,
}

impl SentMessage {
    fn from_message(message: &Message) -> Self {
        Self {
            message_id: message.jms_message_id(),
            timestamp: message.jms_timestamp(),
            delivery_mode: message.jms_delivery_mode(),
            expiration: message.jms_expiration(),
            format: message.format().to_string(),
            length: message.payload().len(),
        }
    }
}

impl SendReport {
    fn render(&self, format: &OutputFormat) -> Result<String, CliError> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| CliError::CommandFailed {
                    message: e.to_string(),
                })
            }
            OutputFormat::Text => {
                let mut lines = vec![format!(
                    "Sent {} message(s) to {} on {} (depth {})",
                    self.messages.len(),
                    self.queue,
                    self.queue_manager,
                    self.depth
                )];
                for sent in &self.messages {
                    lines.push(format!(
                        "  {} {:?} {} bytes",
                        sent.message_id.as_deref().unwrap_or("<none>"),
                        sent.delivery_mode,
                        sent.length
                    ));
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

// ============================================================================
// Command Execution
// ============================================================================

/// Parse arguments, run the command and print its output
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let output = run(cli).await?;
    println!("{}", output);
    Ok(())
}

/// Run a parsed command and return its output
pub async fn run(cli: Cli) -> Result<String, CliError> {
    let config = MqJmsConfig::load(cli.config.as_deref())?;
    debug!(config = ?config, "Loaded configuration");

    match cli.command {
        Commands::Send(args) => {
            let format = args.format.clone();
            let report = execute_send_command(args, config).await?;
            report.render(&format)
        }
        Commands::Config { format } => execute_config_command(&config, format),
    }
}

/// Initialize logging to stderr, leaving stdout for command output
fn initialize_logging(cli: &Cli) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mq_jms={level},mq_jms_core={level},mq_jms_cli={level}",
            level = cli.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let result = if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| CliError::CommandFailed {
        message: format!("failed to initialize logging: {}", e),
    })
}

/// Payload resolved from the body arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl BodyArgs {
    /// Resolve the chosen body source
    pub fn resolve(&self) -> Result<Payload, CliError> {
        if let Some(text) = &self.text {
            return Ok(Payload::Text(text.clone()));
        }

        if let Some(encoded) = &self.hex {
            return hex::decode(encoded)
                .map(Payload::Bytes)
                .map_err(|e| CliError::InvalidArgument {
                    arg: "hex".to_string(),
                    message: e.to_string(),
                });
        }

        if let Some(path) = &self.file {
            return Ok(Payload::Bytes(std::fs::read(path)?));
        }

        Err(CliError::InvalidArgument {
            arg: "body".to_string(),
            message: "one of --text, --hex or --file is required".to_string(),
        })
    }
}

fn build_message(context: &JmsContext, payload: &Payload) -> Message {
    match payload {
        Payload::Text(text) => Message::from(context.create_text_message_with(text.as_str())),
        Payload::Bytes(bytes) => {
            let mut message = context.create_bytes_message();
            message.write_bytes(bytes);
            Message::from(message)
        }
    }
}

/// Execute send command
pub async fn execute_send_command(
    args: SendArgs,
    config: MqJmsConfig,
) -> Result<SendReport, CliError> {
    let queue_manager = Arc::new(InMemoryQueueManager::new(config.queue_manager.clone()));
    send_messages(args, config, queue_manager).await
}

/// Send the messages described by `args` through `queue_manager`
///
/// In a transacted session the messages are committed together after the
/// last send; a failed send rolls back the ones sent before it.
pub async fn send_messages(
    args: SendArgs,
    mut config: MqJmsConfig,
    queue_manager: Arc<InMemoryQueueManager>,
) -> Result<SendReport, CliError> {
    if args.transacted {
        config.session_mode = SessionMode::Transacted;
    }

    let invalid = |arg: &str, e: &dyn std::fmt::Display| CliError::InvalidArgument {
        arg: arg.to_string(),
        message: e.to_string(),
    };

    let max_depth = config.queue_manager.max_queue_depth;
    if usize::try_from(args.count).map_or(true, |count| count > max_depth) {
        return Err(invalid(
            "count",
            &format!("{} exceeds the maximum queue depth of {}", args.count, max_depth),
        ));
    }

    let context = JmsContext::new(queue_manager.clone(), config.session_mode);

    let queue = context
        .create_queue(&args.queue)
        .map_err(|e| invalid("queue", &e))?;
    let reply_to = args
        .reply_to
        .as_deref()
        .map(|name| context.create_queue(name))
        .transpose()
        .map_err(|e| invalid("reply-to", &e))?;
    let payload = args.body.resolve()?;

    let mut producer = context.create_producer();
    producer.configure(&config.producer);
    if args.persistent {
        producer.set_delivery_mode(DeliveryMode::Persistent);
    }
    if let Some(ttl) = args.ttl {
        producer.set_time_to_live(ttl);
    }

    info!(
        queue = %queue,
        count = args.count,
        delivery_mode = ?producer.delivery_mode(),
        time_to_live = producer.time_to_live(),
        session_mode = ?context.session_mode(),
        "Sending messages"
    );

    let transacted = context.session_mode().is_transacted();
    let mut messages = Vec::new();
    for _ in 0..args.count {
        let mut message = build_message(&context, &payload);
        if let Some(reply_to) = &reply_to {
            message.set_jms_reply_to(reply_to);
        }
        if let Some(correlation_id) = &args.correlation_id {
            message.set_jms_correlation_id(correlation_id.clone());
        }

        if let Err(e) = producer.send(&queue, &mut message).await {
            if transacted {
                match context.rollback().await {
                    Ok(()) => info!(
                        discarded = messages.len(),
                        "Rolled back unit of work after failed send"
                    ),
                    Err(rollback) => warn!(error = %rollback, "Failed to roll back unit of work"),
                }
            }
            return Err(e.into());
        }
        messages.push(SentMessage::from_message(&message));
    }

    if transacted {
        context.commit().await?;
    }

    let depth = queue_manager
        .depth(queue.as_str())
        .map_err(JmsException::from)?;
    let statistics = queue_manager.statistics().map_err(JmsException::from)?;

    Ok(SendReport {
        queue_manager: queue_manager.name().to_string(),
        queue: queue.as_str().to_string(),
        session_mode: context.session_mode(),
        messages,
        depth,
        statistics,
    })
}

/// Execute config command
pub fn execute_config_command(
    config: &MqJmsConfig,
    format: ConfigFormat,
) -> Result<String, CliError> {
    let rendered = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
    };

    rendered.map_err(|message| CliError::CommandFailed { message })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
