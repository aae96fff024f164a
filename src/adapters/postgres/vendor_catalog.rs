//! PostgreSQL implementation of VendorCatalog.
//!
//! Reads the `companies` table.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, VendorId};
use crate::domain::search::CandidateVendor;
use crate::ports::VendorCatalog;

/// PostgreSQL implementation of VendorCatalog.
#[derive(Clone)]
pub struct PostgresVendorCatalog {
    pool: PgPool,
}

impl PostgresVendorCatalog {
    /// Creates a new PostgresVendorCatalog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorCatalog for PostgresVendorCatalog {
    async fn list_vendors(&self) -> Result<Vec<CandidateVendor>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, slug, description, category, subcategory
            FROM companies
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list vendors: {}", e)))?;

        rows.into_iter().map(row_to_vendor).collect()
    }
}

fn row_to_vendor(row: PgRow) -> Result<CandidateVendor, DomainError> {
    let column = |name: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to read vendor row: {}", e))
            .with_detail("column", name)
    };

    let id: Uuid = row.try_get("id").map_err(|e| column("id", e))?;

    Ok(CandidateVendor {
        id: VendorId::from_uuid(id),
        name: row.try_get("name").map_err(|e| column("name", e))?,
        slug: row.try_get("slug").map_err(|e| column("slug", e))?,
        description: row
            .try_get("description")
            .map_err(|e| column("description", e))?,
        category: row.try_get("category").map_err(|e| column("category", e))?,
        subcategory: row
            .try_get("subcategory")
            .map_err(|e| column("subcategory", e))?,
    })
}
