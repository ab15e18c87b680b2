//! Organizational units, policies and policy assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node in the customer's organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalUnit {
    pub id: String,
    pub name: String,
    /// Parent unit; `None` for children of the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationalUnitRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Partial update; `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganizationalUnitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl UpdateOrganizationalUnitRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none() && self.external_id.is_none()
    }
}

/// A backup policy: schedule plus retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cron expression evaluated by the backend.
    pub schedule: String,
    pub retention_days: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Body for both policy creation and replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schedule: String,
    pub retention_days: u32,
    pub enabled: bool,
}

/// Kind of entity a policy can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    OrganizationalUnit,
    AwsConnection,
    S3Bucket,
    DynamodbTable,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrganizationalUnit => "organizational_unit",
            Self::AwsConnection => "aws_connection",
            Self::S3Bucket => "s3_bucket",
            Self::DynamodbTable => "dynamodb_table",
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organizational_unit" => Ok(Self::OrganizationalUnit),
            "aws_connection" => Ok(Self::AwsConnection),
            "s3_bucket" => Ok(Self::S3Bucket),
            "dynamodb_table" => Ok(Self::DynamodbTable),
            other => Err(format!("unknown entity type: {other}")),
        }
    }
}

/// Attachment of a policy to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAssignment {
    pub policy_id: String,
    pub entity_id: String,
    pub entity_type: EntityType,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub assigned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignPolicyRequest {
    pub entity_id: String,
    pub entity_type: EntityType,
}
