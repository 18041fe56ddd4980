use crate::utils::error::{ForwarderError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DELIVERY_STREAM_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.-]{1,64}$").expect("static pattern"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Firehose stream names: 1-64 characters of letters, digits, `_`, `.` and `-`.
pub fn validate_delivery_stream_name(field_name: &str, name: &str) -> Result<()> {
    if DELIVERY_STREAM_NAME.is_match(name) {
        return Ok(());
    }

    let reason = if name.is_empty() {
        "Delivery stream name cannot be empty".to_string()
    } else if name.len() > 64 {
        "Delivery stream name must be at most 64 characters".to_string()
    } else {
        "Delivery stream name can only contain letters, numbers, underscores, hyphens, and dots"
            .to_string()
    };

    Err(ForwarderError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: name.to_string(),
        reason,
    })
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ForwarderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();
    if raw.is_empty() {
        return Err(ForwarderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.contains('\0') {
        return Err(ForwarderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ForwarderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
