//! Render models handed to the map, list and dialog widgets.

use chrono::NaiveTime;
use serde::Serialize;

use super::Editor;
use crate::energy::HMS_FORMAT;
use crate::models::{Circuit, LatLng};

/// 12-hour window bound format, e.g. `08:00 AM`.
const WINDOW_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayColor {
    /// Energized
    Green,
    Red,
}

/// Popup shown when a polygon is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub name: String,
    pub city: String,
    /// `hh:mm AM - hh:mm PM`
    pub window: String,
}

/// A polygon drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonOverlay {
    pub id: String,
    pub positions: Vec<LatLng>,
    pub color: OverlayColor,
    pub popup: Popup,
}

/// A row of the side list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub checked: bool,
    pub primary: String,
    pub secondary: String,
}

impl Editor {
    /// Overlays for visible circuits, coloured by the current reading.
    pub fn overlays(&self) -> Vec<PolygonOverlay> {
        self.circuits()
            .iter()
            .filter(|e| e.visible)
            .map(|e| {
                let circuit = &e.circuit;
                let color = if self.is_energized(circuit) {
                    OverlayColor::Green
                } else {
                    OverlayColor::Red
                };
                PolygonOverlay {
                    id: circuit.id.clone(),
                    positions: circuit.polygon.clone(),
                    color,
                    popup: Popup {
                        name: circuit.name.clone(),
                        city: circuit.city.clone(),
                        window: format!(
                            "{} - {}",
                            window_bound(&circuit.start_time),
                            window_bound(&circuit.end_time)
                        ),
                    },
                }
            })
            .collect()
    }

    /// One row per circuit, hidden ones included.
    pub fn list_rows(&self) -> Vec<ListRow> {
        self.circuits()
            .iter()
            .map(|e| ListRow {
                id: e.circuit.id.clone(),
                checked: e.visible,
                primary: e.circuit.name.clone(),
                secondary: list_secondary(&e.circuit),
            })
            .collect()
    }

    pub fn dialog_title(&self) -> &'static str {
        if self.draft().id.is_some() {
            "Edit Circuit"
        } else {
            "New Circuit"
        }
    }
}

fn list_secondary(circuit: &Circuit) -> String {
    format!(
        "{} - {} to {}",
        circuit.city,
        window_bound(&circuit.start_time),
        window_bound(&circuit.end_time)
    )
}

/// Render a stored bound in 12-hour form; unparsable values pass through.
fn window_bound(raw: &str) -> String {
    NaiveTime::parse_from_str(raw, HMS_FORMAT)
        .map(|t| t.format(WINDOW_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}
