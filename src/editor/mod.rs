//! Headless circuit editor.
//!
//! Holds the view state of the map editor: the fetched circuits with their
//! local visibility flag, the dialog draft, the editor mode, the current clock
//! reading and the transient notification. Persisted records only change at
//! fetch and save boundaries; everything else is local.
//!
//! ```text
//! Idle -> Drawing -> Editing -> Idle
//!   \__________________^
//!        (edit existing)
//! ```

mod draft;
mod view;

pub use draft::*;
pub use view::*;

use std::time::{Duration, Instant};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::client::CircuitClient;
use crate::clock::Clock;
use crate::config::Config;
use crate::energy::{format_hms, WindowPolicy};
use crate::errors::AppError;
use crate::models::{Circuit, LatLng};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// Editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// No dialog open.
    Idle,
    /// The user is drawing a shape on the map.
    Drawing,
    /// The dialog is open on the draft.
    Editing,
}

/// Shapes the drawing toolkit can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Polygon,
    Rectangle,
    Circle,
    CircleMarker,
    Marker,
    Polyline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A transient message shown after an API round trip.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Notification {
    fn new(message: &str, severity: Severity) -> Self {
        Self {
            message: message.to_string(),
            severity,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired_at(&self, at: Instant) -> bool {
        at.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// A fetched circuit plus its local visibility flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitEntry {
    pub circuit: Circuit,
    pub visible: bool,
}

/// Editor state.
#[derive(Debug)]
pub struct Editor {
    circuits: Vec<CircuitEntry>,
    mode: EditorMode,
    draft: Draft,
    now: NaiveTime,
    policy: WindowPolicy,
    notification: Option<Notification>,
}

impl Editor {
    pub fn new(policy: WindowPolicy, now: NaiveTime) -> Self {
        Self {
            circuits: Vec::new(),
            mode: EditorMode::Idle,
            draft: Draft::default(),
            now,
            policy,
            notification: None,
        }
    }

    /// Create an editor and run the one-time initial fetch.
    pub async fn mount(client: &CircuitClient, policy: WindowPolicy, now: NaiveTime) -> Self {
        let mut editor = Self::new(policy, now);
        editor.fetch(client).await;
        editor
    }

    /// Mount with the window policy selected by configuration.
    pub async fn mount_with_config(
        client: &CircuitClient,
        config: &Config,
        now: NaiveTime,
    ) -> Self {
        Self::mount(client, config.window_policy, now).await
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn circuits(&self) -> &[CircuitEntry] {
        &self.circuits
    }

    pub fn now(&self) -> NaiveTime {
        self.now
    }

    /// The notification, unless it has timed out.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired())
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notification = Some(Notification::new(message, severity));
    }

    /// Record a clock reading. Energized colours follow from it.
    pub fn tick(&mut self, now: NaiveTime) {
        self.now = now;
    }

    /// Take the latest reading from a running clock.
    pub fn tick_from(&mut self, clock: &Clock) {
        self.tick(clock.now());
    }

    /// Whether a circuit is energized at the current reading.
    pub fn is_energized(&self, circuit: &Circuit) -> bool {
        let now = format_hms(self.now);
        self.policy
            .evaluate(&now, &circuit.start_time, &circuit.end_time)
    }

    // ==================== DRAWING & DIALOG ====================

    pub fn begin_drawing(&mut self) {
        if self.mode == EditorMode::Idle {
            self.mode = EditorMode::Drawing;
        }
    }

    /// Handle a finished shape. Only polygons open the dialog, on a fresh draft.
    pub fn polygon_drawn(&mut self, shape: Shape, vertices: Vec<LatLng>) -> bool {
        if shape != Shape::Polygon || self.mode == EditorMode::Editing {
            return false;
        }
        self.draft = Draft::from_polygon(vertices);
        self.mode = EditorMode::Editing;
        true
    }

    /// Open the dialog on an existing circuit.
    pub fn edit(&mut self, id: &str) -> bool {
        let Some(entry) = self.circuits.iter().find(|e| e.circuit.id == id) else {
            return false;
        };
        self.draft = Draft::from_circuit(&entry.circuit);
        self.mode = EditorMode::Editing;
        true
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.draft.city = city.into();
    }

    pub fn set_start_time(&mut self, time: Option<NaiveTime>) {
        self.draft.start_time = time;
    }

    pub fn set_end_time(&mut self, time: Option<NaiveTime>) {
        self.draft.end_time = time;
    }

    /// Close the dialog (or stop drawing) and discard the draft.
    pub fn cancel(&mut self) {
        self.mode = EditorMode::Idle;
        self.draft = Draft::default();
    }

    /// Toggle a circuit's visibility on the map. Never touches the network.
    pub fn toggle_visibility(&mut self, id: &str) {
        if let Some(entry) = self.circuits.iter_mut().find(|e| e.circuit.id == id) {
            entry.visible = !entry.visible;
        }
    }

    // ==================== ROUND TRIPS ====================

    /// Replace the list with the server's. On failure the previous list stays.
    pub async fn fetch(&mut self, client: &CircuitClient) {
        match client.list().await {
            Ok(circuits) => {
                self.circuits = circuits
                    .into_iter()
                    .map(|circuit| CircuitEntry {
                        circuit,
                        visible: true,
                    })
                    .collect();
            }
            Err(e) => {
                tracing::warn!("Failed to load circuits: {}", e);
                self.notify("Error loading circuits", Severity::Error);
            }
        }
    }

    /// Create or update the draft, then close the dialog and re-fetch.
    pub async fn save(&mut self, client: &CircuitClient) -> Result<Circuit, AppError> {
        if self.mode != EditorMode::Editing {
            return Err(AppError::Validation(
                "No circuit is being edited".to_string(),
            ));
        }

        let result = match self.draft.id.clone() {
            Some(id) => client
                .update(&id, &self.draft.to_update_request())
                .await
                .map(|c| (c, "Circuit updated")),
            None => client
                .create(&self.draft.to_create_request())
                .await
                .map(|c| (c, "Circuit created")),
        };

        match result {
            Ok((circuit, message)) => {
                self.notify(message, Severity::Success);
                self.mode = EditorMode::Idle;
                self.draft = Draft::default();
                self.fetch(client).await;
                Ok(circuit)
            }
            Err(e) => {
                tracing::warn!("Failed to save circuit: {}", e);
                self.notify("Error saving circuit", Severity::Error);
                Err(e)
            }
        }
    }

    /// Delete a circuit and drop it (and its overlay) from local state.
    pub async fn delete(&mut self, client: &CircuitClient, id: &str) -> Result<(), AppError> {
        match client.delete(id).await {
            Ok(()) => {
                self.circuits.retain(|e| e.circuit.id != id);
                self.notify("Circuit deleted", Severity::Success);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(circuit_id = %id, "Failed to delete circuit: {}", e);
                self.notify("Error deleting circuit", Severity::Error);
                Err(e)
            }
        }
    }
}
