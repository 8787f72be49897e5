//! Database repository for circuit CRUD operations.
//!
//! Uses prepared statements; each operation touches a single row.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Circuit, LatLng, NewCircuit, UpdateCircuitRequest};

const CIRCUIT_COLUMNS: &str = "id, name, city, start_time, end_time, polygon";

/// Database repository for all circuit operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all circuits in insertion order.
    pub async fn list_circuits(&self) -> Result<Vec<Circuit>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM circuits ORDER BY rowid",
            CIRCUIT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| circuit_from_row(&row)).collect())
    }

    /// Get a circuit by ID.
    pub async fn get_circuit(&self, id: &str) -> Result<Option<Circuit>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM circuits WHERE id = ?",
            CIRCUIT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(circuit_from_row))
    }

    /// Create a new circuit with a server-assigned ID.
    pub async fn create_circuit(&self, new: &NewCircuit) -> Result<Circuit, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let polygon_json = serde_json::to_string(&new.polygon)?;

        sqlx::query(
            "INSERT INTO circuits (id, name, city, start_time, end_time, polygon) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.city)
        .bind(&new.start_time)
        .bind(&new.end_time)
        .bind(&polygon_json)
        .execute(&self.pool)
        .await?;

        tracing::debug!(circuit_id = %id, "Circuit created");

        Ok(Circuit {
            id,
            name: new.name.clone(),
            city: new.city.clone(),
            start_time: new.start_time.clone(),
            end_time: new.end_time.clone(),
            polygon: new.polygon.clone(),
        })
    }

    /// Merge the provided fields over a stored circuit and write it back.
    ///
    /// Last write wins; there is no version check.
    pub async fn update_circuit(
        &self,
        id: &str,
        changes: &UpdateCircuitRequest,
    ) -> Result<Circuit, AppError> {
        let existing = self
            .get_circuit(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let updated = changes.apply_to(&existing);
        let polygon_json = serde_json::to_string(&updated.polygon)?;

        let result = sqlx::query(
            "UPDATE circuits SET name = ?, city = ?, start_time = ?, end_time = ?, polygon = ? WHERE id = ?",
        )
        .bind(&updated.name)
        .bind(&updated.city)
        .bind(&updated.start_time)
        .bind(&updated.end_time)
        .bind(&polygon_json)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(circuit_id = %id, "Circuit updated");
        Ok(updated)
    }

    /// Delete a circuit.
    pub async fn delete_circuit(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM circuits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(circuit_id = %id, "Circuit deleted");
        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Circuit {} not found", id))
}

fn circuit_from_row(row: &sqlx::sqlite::SqliteRow) -> Circuit {
    let polygon_str: String = row.get("polygon");
    Circuit {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        start_time: row.get("start_time"),
        end_time: row.get("end_time"),
        polygon: parse_polygon(&polygon_str),
    }
}

fn parse_polygon(s: &str) -> Vec<LatLng> {
    serde_json::from_str(s).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("repo.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn new_circuit(name: &str) -> NewCircuit {
        NewCircuit {
            name: name.to_string(),
            city: "Santiago".to_string(),
            start_time: "08:00:00".to_string(),
            end_time: "18:00:00".to_string(),
            polygon: vec![LatLng(10.0, 20.0), LatLng(10.0, 21.0), LatLng(11.0, 20.0)],
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let (repo, _dir) = repo().await;
        for name in ["Zulu", "Alpha", "Mike"] {
            repo.create_circuit(&new_circuit(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_circuits()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Mike"]);
    }

    #[tokio::test]
    async fn test_polygon_round_trips_in_order() {
        let (repo, _dir) = repo().await;
        let created = repo.create_circuit(&new_circuit("A")).await.unwrap();
        assert!(!created.id.is_empty());

        let stored = repo.get_circuit(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.polygon, new_circuit("A").polygon);
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_ids() {
        let (repo, _dir) = repo().await;
        let changes = UpdateCircuitRequest {
            name: Some("Nope".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            repo.update_circuit("missing", &changes).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete_circuit("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let (repo, _dir) = repo().await;
        let created = repo.create_circuit(&new_circuit("A")).await.unwrap();

        repo.delete_circuit(&created.id).await.unwrap();
        assert!(matches!(
            repo.delete_circuit(&created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(repo.list_circuits().await.unwrap().is_empty());
    }
}
