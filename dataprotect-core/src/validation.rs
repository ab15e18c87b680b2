//! Attribute checks run before any API call.

use crate::error::{CoreError, CoreResult};

/// AWS account ids are exactly this many decimal digits.
const AWS_ACCOUNT_ID_LEN: usize = 12;

pub fn require_non_empty(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be empty"));
    }
    Ok(())
}

pub fn validate_account_id(value: &str) -> CoreResult<()> {
    if value.len() != AWS_ACCOUNT_ID_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::validation(
            "account_id",
            format!("must be {AWS_ACCOUNT_ID_LEN} digits, got '{value}'"),
        ));
    }
    Ok(())
}

pub fn validate_arn(field: &str, value: &str) -> CoreResult<()> {
    // arn:partition:service:region:account:resource
    if !value.starts_with("arn:") || value.splitn(6, ':').count() < 6 {
        return Err(CoreError::validation(
            field,
            format!("must be an ARN (arn:partition:service:region:account:resource), got '{value}'"),
        ));
    }
    Ok(())
}

pub fn validate_retention_days(days: u32) -> CoreResult<()> {
    if days == 0 {
        return Err(CoreError::validation(
            "retention_days",
            "must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_recipients(recipients: &[String]) -> CoreResult<()> {
    if recipients.is_empty() {
        return Err(CoreError::validation(
            "recipients",
            "at least one recipient is required",
        ));
    }
    if let Some(blank) = recipients.iter().position(|r| r.trim().is_empty()) {
        return Err(CoreError::validation(
            "recipients",
            format!("entry {blank} is empty"),
        ));
    }
    Ok(())
}
