use anyhow::Context;
use clap::Parser;
use orders_audit_forwarder::utils::error::ErrorSeverity;
use orders_audit_forwarder::utils::{logger, validation::Validate};
use orders_audit_forwarder::{AuditForwarder, CliConfig, ForwardEngine, LocalSink, StreamEvent};
use std::io::Read;

fn read_event(config: &CliConfig) -> anyhow::Result<StreamEvent> {
    let raw = if config.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stream event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&config.input)
            .with_context(|| format!("failed to read {}", config.input.display()))?
    };

    serde_json::from_str(&raw).context("input is not a DynamoDB stream event")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting orders-audit replay");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let event = read_event(&config)?;

    let sink = LocalSink::new(config.output.clone());
    let engine = ForwardEngine::new(AuditForwarder::new(sink, config));

    match engine.run(&event.records).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Forwarded {} records ({} bytes), record id: {}",
                summary.records,
                summary.bytes,
                summary.record_id
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Forwarding failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2, // retryable delivery failure
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
