use crate::config::DEFAULT_DELIVERY_STREAM_NAME;
use crate::core::encoding::JsonLineStyle;
use crate::core::{ConfigProvider, DeliveryReceipt, DeliverySink};
use crate::utils::error::Result;
use crate::utils::validation::{validate_delivery_stream_name, validate_path, Validate};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "orders-audit")]
#[command(about = "Replay a DynamoDB stream event through the orders audit forwarder")]
pub struct CliConfig {
    #[arg(long, short, default_value = "-", help = "Stream event JSON file ('-' reads stdin)")]
    pub input: PathBuf,

    #[arg(long, short, help = "Append the payload to this file instead of printing it")]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_DELIVERY_STREAM_NAME)]
    pub delivery_stream_name: String,

    #[arg(long, value_enum, default_value_t = JsonLineStyle::Spaced)]
    pub line_style: JsonLineStyle,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

impl ConfigProvider for CliConfig {
    fn delivery_stream_name(&self) -> &str {
        &self.delivery_stream_name
    }

    fn line_style(&self) -> JsonLineStyle {
        self.line_style
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_delivery_stream_name("delivery_stream_name", &self.delivery_stream_name)?;
        validate_path("input", &self.input)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}

/// Local stand-in for the delivery stream: appends each record to a file,
/// or writes it to stdout when no file is configured.
#[derive(Debug, Clone)]
pub struct LocalSink {
    output: Option<PathBuf>,
}

impl LocalSink {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}

impl DeliverySink for LocalSink {
    async fn put_record(&self, stream_name: &str, data: &[u8]) -> Result<DeliveryReceipt> {
        let Some(path) = &self.output else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            return Ok(DeliveryReceipt {
                record_id: format!("{}:stdout", stream_name),
            });
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let offset = file.metadata()?.len();
        file.write_all(data)?;

        Ok(DeliveryReceipt {
            record_id: format!("{}:{}", path.display(), offset),
        })
    }
}
