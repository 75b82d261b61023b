//! `Workflow` — entity owned by the external storage collaborator.
//! This type describes the columns the core reads/writes; it is not a
//! database model.

use crate::money::Usdc6;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

crate::define_id! {
    pub struct WorkflowId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    Pending,
    Deployed,
    Failed,
}

/// A restricted JSON-Schema dialect: `type` + optional `properties` of
/// `{type, description?}` + optional `required` (§3 invariant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictedSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaField>,
    #[serde(default)]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub code: String,
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub input_schema: Option<RestrictedSchema>,
    #[serde(default)]
    pub output_schema: Option<RestrictedSchema>,
    pub owner_address: String,
    pub price: Usdc6,
    pub deploy_status: DeployStatus,
    pub published: bool,
    pub updated_at: String,
}
