//! SQLite contract repository implementation.
//!
//! Implements `ContractRepository` from `kontrakt-core` using sqlx with the
//! split read/write pools: raw queries, a private Row struct for
//! SQLite-to-domain mapping, rfc3339 datetimes stored as TEXT.

use chrono::{DateTime, Utc};
use sqlx::Row;

use kontrakt_core::repository::ContractRepository;
use kontrakt_types::contract::{ContractRecord, NewContract};
use kontrakt_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ContractRepository`.
pub struct SqliteContractRepository {
    pool: DatabasePool,
}

impl SqliteContractRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ContractRecord.
struct ContractRow {
    id: i64,
    buyer_name: String,
    inn: String,
    phone: String,
    total_sum: f64,
    file_ref: String,
    created_at: String,
}

impl ContractRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            buyer_name: row.try_get("buyer_name")?,
            inn: row.try_get("inn")?,
            phone: row.try_get("phone")?,
            total_sum: row.try_get("total_sum")?,
            file_ref: row.try_get("file_ref")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_record(self) -> Result<ContractRecord, RepositoryError> {
        let created_at = parse_datetime(&self.created_at)?;
        Ok(ContractRecord {
            id: self.id,
            buyer_name: self.buyer_name,
            inn: self.inn,
            phone: self.phone,
            total_sum: self.total_sum,
            file_ref: self.file_ref,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime '{s}': {e}")))
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

impl ContractRepository for SqliteContractRepository {
    async fn save(&self, contract: &NewContract) -> Result<ContractRecord, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO contracts (buyer_name, inn, phone, total_sum, file_ref, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&contract.buyer_name)
        .bind(&contract.inn)
        .bind(&contract.phone)
        .bind(contract.total_sum)
        .bind(&contract.file_ref)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(ContractRecord {
            id: result.last_insert_rowid(),
            buyer_name: contract.buyer_name.clone(),
            inn: contract.inn.clone(),
            phone: contract.phone.clone(),
            total_sum: contract.total_sum,
            file_ref: contract.file_ref.clone(),
            created_at,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<ContractRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, buyer_name, inn, phone, total_sum, file_ref, created_at
             FROM contracts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        row.map(|row| ContractRow::from_row(&row).map_err(query_error)?.into_record())
            .transpose()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ContractRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, buyer_name, inn, phone, total_sum, file_ref, created_at
             FROM contracts ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| ContractRow::from_row(row).map_err(query_error)?.into_record())
            .collect()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM contracts")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;
        let n: i64 = row.try_get("n").map_err(query_error)?;
        Ok(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> (tempfile::TempDir, SqliteContractRepository) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteContractRepository::new(pool))
    }

    fn contract(buyer_name: &str, total_sum: f64) -> NewContract {
        NewContract {
            buyer_name: buyer_name.to_string(),
            inn: "301234567".to_string(),
            phone: "+998901234567".to_string(),
            total_sum,
            file_ref: "documents/contract-test.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let (_dir, repo) = test_repo().await;

        let saved = repo.save(&contract("ООО Биной", 392_000.0)).await.unwrap();
        assert!(saved.id > 0);

        let fetched = repo.get(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.buyer_name, "ООО Биной");
        assert_eq!(fetched.inn, "301234567");
        assert!((fetched.total_sum - 392_000.0).abs() < 1e-9);
        assert_eq!(fetched.file_ref, "documents/contract-test.pdf");

        assert!(repo.get(saved.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_limited() {
        let (_dir, repo) = test_repo().await;

        for i in 1..=3 {
            repo.save(&contract(&format!("Фирма {i}"), i as f64 * 1000.0))
                .await
                .unwrap();
        }

        let recent = repo.list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].buyer_name, "Фирма 3");
        assert_eq!(recent[1].buyer_name, "Фирма 2");

        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
