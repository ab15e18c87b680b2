//! Report configurations, wallets and callbacks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    BackupStatus,
    Compliance,
    Inventory,
}

/// A scheduled report delivered by e-mail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfiguration {
    pub id: String,
    pub name: String,
    pub report_type: ReportType,
    pub schedule: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfigurationRequest {
    pub name: String,
    pub report_type: ReportType,
    pub schedule: String,
    pub recipients: Vec<String>,
    pub enabled: bool,
}

/// Encryption scope for backup data. Without a KMS key the platform manages keys itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    Sns,
    S3,
}

/// Event sink the platform notifies (SNS topic or S3 prefix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    pub id: String,
    pub name: String,
    pub kind: CallbackKind,
    pub target_arn: String,
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub name: String,
    pub kind: CallbackKind,
    pub target_arn: String,
    pub events: Vec<String>,
}
