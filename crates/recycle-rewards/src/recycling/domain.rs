use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque user identifier supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog key for a recyclable material.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub String);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Reference data describing how a material is rewarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub points_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity_per_day: Option<f64>,
}

impl Material {
    pub fn points_for(&self, quantity: f64) -> f64 {
        self.points_per_unit * quantity
    }
}

/// An accepted submission. Points are frozen at creation time so later
/// catalog changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecyclingRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub material_id: MaterialId,
    pub material_name: String,
    pub quantity: f64,
    pub points_earned: f64,
    pub created_at: DateTime<Utc>,
}

/// Proposed submission as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub user_id: UserId,
    pub material_id: MaterialId,
    pub quantity: f64,
}

impl SubmissionRequest {
    pub fn new(user_id: impl Into<String>, material_id: impl Into<String>, quantity: f64) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            material_id: MaterialId(material_id.into()),
            quantity,
        }
    }

    /// Rejects blank user ids and non-positive or non-finite quantities.
    pub fn validate(&self) -> Result<(), InvalidSubmission> {
        if self.user_id.0.trim().is_empty() {
            return Err(InvalidSubmission::MissingUser);
        }
        if !(self.quantity.is_finite() && self.quantity > 0.0) {
            return Err(InvalidSubmission::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}

/// Malformed input that never reaches the business rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSubmission {
    #[error("user id must not be empty")]
    MissingUser,
    #[error("quantity must be a positive number (found {0})")]
    NonPositiveQuantity(f64),
}
