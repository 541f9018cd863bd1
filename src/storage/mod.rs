use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::error::StoreError;

/// A stored analysis row, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub dataset_id: i64,
    pub insights: String,
    pub plot_files: Vec<String>,
    pub analysis_time: String,
}

/// SQLite-backed store for dataset uploads and their analysis results.
/// The analysis core treats this as fire-and-forget: it saves and never
/// reads back; `last_analysis` exists for callers that link results.
pub struct AnalysisStore {
    conn: Connection,
}

impl AnalysisStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS datasets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT,
                upload_time TEXT
            );
            CREATE TABLE IF NOT EXISTS analyses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dataset_id INTEGER,
                insights TEXT,
                plot_files TEXT,
                analysis_time TEXT,
                FOREIGN KEY(dataset_id) REFERENCES datasets(id)
            );",
        )?;
        Ok(AnalysisStore { conn })
    }

    /// Record an uploaded dataset; returns its opaque identifier.
    pub fn save_dataset(&self, filename: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO datasets (filename, upload_time) VALUES (?1, ?2)",
            params![filename, Utc::now().to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(dataset_id = id, filename, "saved dataset");
        Ok(id)
    }

    /// Persist an analysis result. The plot list is stored as a JSON array.
    pub fn save_analysis(
        &self,
        dataset_id: i64,
        insights: &str,
        plot_files: &[String],
    ) -> Result<i64, StoreError> {
        let plots = serde_json::to_string(plot_files)?;
        self.conn.execute(
            "INSERT INTO analyses (dataset_id, insights, plot_files, analysis_time)
             VALUES (?1, ?2, ?3, ?4)",
            params![dataset_id, insights, plots, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent analysis for a dataset, if any.
    pub fn last_analysis(&self, dataset_id: i64) -> Result<Option<AnalysisRecord>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT dataset_id, insights, plot_files, analysis_time
                 FROM analyses WHERE dataset_id = ?1
                 ORDER BY id DESC LIMIT 1",
                params![dataset_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((dataset_id, insights, plots, analysis_time)) => Ok(Some(AnalysisRecord {
                dataset_id,
                insights,
                plot_files: serde_json::from_str(&plots)?,
                analysis_time,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_an_analysis() {
        let store = AnalysisStore::in_memory().unwrap();
        let dataset_id = store.save_dataset("metrics.csv").unwrap();

        let plots = vec!["ts_a_1.png".to_string(), "ts_b_2.png".to_string()];
        store
            .save_analysis(dataset_id, "Time column: date", &plots)
            .unwrap();

        let record = store.last_analysis(dataset_id).unwrap().unwrap();
        assert_eq!(record.dataset_id, dataset_id);
        assert_eq!(record.insights, "Time column: date");
        assert_eq!(record.plot_files, plots);
    }

    #[test]
    fn missing_analysis_is_none() {
        let store = AnalysisStore::in_memory().unwrap();
        let dataset_id = store.save_dataset("empty.csv").unwrap();
        assert!(store.last_analysis(dataset_id).unwrap().is_none());
    }

    #[test]
    fn last_analysis_returns_the_newest_row() {
        let store = AnalysisStore::in_memory().unwrap();
        let dataset_id = store.save_dataset("metrics.csv").unwrap();
        store.save_analysis(dataset_id, "first", &[]).unwrap();
        store.save_analysis(dataset_id, "second", &[]).unwrap();
        let record = store.last_analysis(dataset_id).unwrap().unwrap();
        assert_eq!(record.insights, "second");
    }
}
