//! Dialog draft for a circuit being created or edited.

use chrono::NaiveTime;

use crate::energy::{format_hms, HMS_FORMAT};
use crate::models::{Circuit, CreateCircuitRequest, LatLng, UpdateCircuitRequest};

/// Fields bound to the editor dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// Set when editing a stored circuit.
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub polygon: Vec<LatLng>,
}

impl Draft {
    pub fn from_polygon(polygon: Vec<LatLng>) -> Self {
        Self {
            polygon,
            ..Self::default()
        }
    }

    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            id: Some(circuit.id.clone()),
            name: circuit.name.clone(),
            city: circuit.city.clone(),
            start_time: NaiveTime::parse_from_str(&circuit.start_time, HMS_FORMAT).ok(),
            end_time: NaiveTime::parse_from_str(&circuit.end_time, HMS_FORMAT).ok(),
            polygon: circuit.polygon.clone(),
        }
    }

    /// Body for `POST`. Unset times are left out so the server reports them.
    pub fn to_create_request(&self) -> CreateCircuitRequest {
        CreateCircuitRequest {
            name: Some(self.name.clone()),
            city: Some(self.city.clone()),
            start_time: self.start_time.map(format_hms),
            end_time: self.end_time.map(format_hms),
            polygon: Some(self.polygon.clone()),
        }
    }

    /// Body for `PUT`: every mutable field is replaced.
    pub fn to_update_request(&self) -> UpdateCircuitRequest {
        UpdateCircuitRequest {
            name: Some(self.name.clone()),
            city: Some(self.city.clone()),
            start_time: self.start_time.map(format_hms),
            end_time: self.end_time.map(format_hms),
            polygon: Some(self.polygon.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_format_times() {
        let draft = Draft {
            id: None,
            name: "East".to_string(),
            city: "Guantanamo".to_string(),
            start_time: NaiveTime::from_hms_opt(6, 5, 0),
            end_time: None,
            polygon: vec![LatLng(1.0, 2.0)],
        };

        let create = draft.to_create_request();
        assert_eq!(create.start_time.as_deref(), Some("06:05:00"));
        assert!(create.end_time.is_none());

        let body = serde_json::to_value(&create).unwrap();
        assert!(body.get("endTime").is_none());
        assert_eq!(body["startTime"], "06:05:00");
    }

    #[test]
    fn test_from_circuit_tolerates_bad_times() {
        let circuit = Circuit {
            id: "x".to_string(),
            name: "n".to_string(),
            city: "c".to_string(),
            start_time: "garbage".to_string(),
            end_time: "23:59:59".to_string(),
            polygon: Vec::new(),
        };
        let draft = Draft::from_circuit(&circuit);
        assert!(draft.start_time.is_none());
        assert_eq!(draft.end_time, NaiveTime::from_hms_opt(23, 59, 59));
    }
}
