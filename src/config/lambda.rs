use crate::config::DEFAULT_DELIVERY_STREAM_NAME;
use crate::core::encoding::JsonLineStyle;
use crate::core::{ConfigProvider, DeliveryReceipt, DeliverySink};
use crate::utils::error::{ForwarderError, Result};
use crate::utils::validation::{validate_aws_region, validate_delivery_stream_name, Validate};
use aws_config::BehaviorVersion;
use aws_sdk_firehose::config::Region;
use aws_sdk_firehose::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_firehose::operation::put_record::PutRecordError;
use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use aws_sdk_firehose::Client as FirehoseClient;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub delivery_stream_name: String,
    pub line_style: JsonLineStyle,
    /// Falls back to the SDK's default region chain when unset.
    pub region: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let line_style = match lookup("LINE_STYLE") {
            Some(raw) => raw.parse()?,
            None => JsonLineStyle::default(),
        };

        Ok(Self {
            delivery_stream_name: lookup("DELIVERY_STREAM_NAME")
                .unwrap_or_else(|| DEFAULT_DELIVERY_STREAM_NAME.to_string()),
            line_style,
            region: lookup("FIREHOSE_REGION"),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn delivery_stream_name(&self) -> &str {
        &self.delivery_stream_name
    }

    fn line_style(&self) -> JsonLineStyle {
        self.line_style
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_delivery_stream_name("delivery_stream_name", &self.delivery_stream_name)?;

        if let Some(region) = &self.region {
            validate_aws_region("region", region)?;
        }

        tracing::info!("Lambda configuration validation passed");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FirehoseSink {
    client: FirehoseClient,
}

impl FirehoseSink {
    pub fn new(client: FirehoseClient) -> Self {
        Self { client }
    }

    /// Builds the client from the default AWS provider chain. Call once per execution
    /// environment and share the sink between invocations.
    pub async fn from_config(config: &LambdaConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        Self::new(FirehoseClient::new(&sdk_config))
    }
}

impl DeliverySink for FirehoseSink {
    async fn put_record(&self, stream_name: &str, data: &[u8]) -> Result<DeliveryReceipt> {
        let record = Record::builder()
            .data(Blob::new(data))
            .build()
            .map_err(|e| ForwarderError::DeliveryError {
                stream: stream_name.to_string(),
                code: None,
                message: e.to_string(),
                retryable: false,
            })?;

        let output = self
            .client
            .put_record()
            .delivery_stream_name(stream_name)
            .record(record)
            .send()
            .await
            .map_err(|err| delivery_error(stream_name, err))?;

        Ok(DeliveryReceipt {
            record_id: output.record_id().to_string(),
        })
    }
}

fn delivery_error(stream_name: &str, err: SdkError<PutRecordError>) -> ForwarderError {
    let retryable = match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => true,
        _ => err
            .as_service_error()
            .is_some_and(PutRecordError::is_service_unavailable_exception),
    };

    tracing::error!(
        stream = stream_name,
        code = err.code().unwrap_or("unknown"),
        retryable,
        "PutRecord failed"
    );

    ForwarderError::DeliveryError {
        stream: stream_name.to_string(),
        code: err.code().map(str::to_string),
        message: DisplayErrorContext(&err).to_string(),
        retryable,
    }
}
