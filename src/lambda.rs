use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use orders_audit_forwarder::core::StreamEvent;
use orders_audit_forwarder::handler::function_handler;
use orders_audit_forwarder::utils::{logger, validation::Validate};
use orders_audit_forwarder::{AuditForwarder, FirehoseSink, ForwardEngine, LambdaConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;
    tracing::info!(
        stream = %config.delivery_stream_name,
        line_style = %config.line_style,
        "Starting orders audit forwarder"
    );

    // One client per execution environment, reused by every invocation.
    let sink = FirehoseSink::from_config(&config).await;
    let engine = ForwardEngine::new(AuditForwarder::new(sink, config));
    let engine = &engine;

    run(service_fn(move |event: LambdaEvent<StreamEvent>| async move {
        function_handler(engine, event).await
    }))
    .await
}
