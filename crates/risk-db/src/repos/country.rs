//! Country repository.

use risk_core::entities::Country;

use crate::error::DatabaseError;
use crate::service::RiskService;

fn row_to_country(row: &libsql::Row) -> Result<Country, DatabaseError> {
    Ok(Country {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
    })
}

impl RiskService {
    /// List all countries.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn list_countries(&self) -> Result<Vec<Country>, DatabaseError> {
        tracing::debug!("listing countries");
        self.db()
            .fetch_all(
                "SELECT id, code, name FROM countries ORDER BY id",
                (),
                row_to_country,
            )
            .await
    }
}
