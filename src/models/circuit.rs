//! Circuit model: a named polygon with a daily energy window.

use serde::{Deserialize, Serialize};

use crate::energy::normalize_hms;
use crate::errors::AppError;

/// A polygon vertex, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

/// A stored circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub id: String,
    pub name: String,
    pub city: String,
    /// `HH:MM:SS`
    pub start_time: String,
    /// `HH:MM:SS`
    pub end_time: String,
    #[serde(default)]
    pub polygon: Vec<LatLng>,
}

/// A validated circuit ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCircuit {
    pub name: String,
    pub city: String,
    pub start_time: String,
    pub end_time: String,
    pub polygon: Vec<LatLng>,
}

/// Request body for creating a new circuit.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCircuitRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<LatLng>>,
}

impl CreateCircuitRequest {
    /// Check required fields and normalize the window bounds.
    pub fn validate(&self) -> Result<NewCircuit, AppError> {
        let name = required_text(self.name.as_deref(), "Name")?;
        let city = required_text(self.city.as_deref(), "City")?;
        let start_time = required_time(self.start_time.as_deref(), "startTime")?;
        let end_time = required_time(self.end_time.as_deref(), "endTime")?;

        Ok(NewCircuit {
            name,
            city,
            start_time,
            end_time,
            polygon: self.polygon.clone().unwrap_or_default(),
        })
    }
}

/// Request body for updating an existing circuit.
///
/// Provided fields replace the stored ones; absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCircuitRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<LatLng>>,
}

impl UpdateCircuitRequest {
    /// Validate the provided fields and return a normalized copy.
    pub fn validate(&self) -> Result<Self, AppError> {
        let name = match self.name.as_deref() {
            Some(raw) => Some(required_text(Some(raw), "Name")?),
            None => None,
        };
        let city = match self.city.as_deref() {
            Some(raw) => Some(required_text(Some(raw), "City")?),
            None => None,
        };
        let start_time = match self.start_time.as_deref() {
            Some(raw) => Some(required_time(Some(raw), "startTime")?),
            None => None,
        };
        let end_time = match self.end_time.as_deref() {
            Some(raw) => Some(required_time(Some(raw), "endTime")?),
            None => None,
        };

        Ok(Self {
            name,
            city,
            start_time,
            end_time,
            polygon: self.polygon.clone(),
        })
    }

    /// Merge these changes over an existing circuit.
    pub fn apply_to(&self, existing: &Circuit) -> Circuit {
        Circuit {
            id: existing.id.clone(),
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            city: self.city.clone().unwrap_or_else(|| existing.city.clone()),
            start_time: self
                .start_time
                .clone()
                .unwrap_or_else(|| existing.start_time.clone()),
            end_time: self
                .end_time
                .clone()
                .unwrap_or_else(|| existing.end_time.clone()),
            polygon: self
                .polygon
                .clone()
                .unwrap_or_else(|| existing.polygon.clone()),
        }
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn required_time(value: Option<&str>, field: &str) -> Result<String, AppError> {
    let raw = value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    normalize_hms(raw).ok_or_else(|| {
        AppError::Validation(format!("{} must be a time formatted HH:MM:SS", field))
    })
}
