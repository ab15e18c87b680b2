//! AWS connections and the inventory discovered through them.

use serde::{Deserialize, Serialize};

/// Health of an AWS connection as last checked by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Connected,
    Error,
    #[serde(other)]
    Unknown,
}

/// Cross-account role the platform assumes to reach a customer AWS account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsConnection {
    pub id: String,
    pub name: String,
    /// 12-digit AWS account id.
    pub account_id: String,
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConnectionStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsConnectionRequest {
    pub name: String,
    pub account_id: String,
    pub role_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
    pub connection_id: String,
    pub region: String,
    pub arn: String,
    /// Whether any policy currently covers the bucket.
    #[serde(default)]
    pub protected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamoDbTable {
    pub name: String,
    pub connection_id: String,
    pub region: String,
    pub arn: String,
    #[serde(default)]
    pub protected: bool,
}
