//! PostgreSQL patient store
//!
//! Every call opens its own connection and releases it before returning,
//! on success and on every error path.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::config::Host;
use tokio_postgres::types::FromSql;
use tokio_postgres::{Client, IsolationLevel, NoTls, Row};

use super::config::DatabaseConfig;
use super::errors::{StoreError, StoreResult};
use super::{ConditionCounts, PatientStore};
use crate::analytics::ConditionGroup;
use crate::model::{column_names, select_list, PatientRecord};
use crate::observability::Logger;

/// Store backed by the `patients` table of a PostgreSQL database
pub struct PgPatientStore {
    config: tokio_postgres::Config,
    target: String,
}

/// A connection that lives for one request
///
/// Dropping it stops the driver task, which closes the socket.
struct ScopedConnection {
    client: Client,
    driver: JoinHandle<()>,
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

impl PgPatientStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            target: config.display_target(),
            config: config.to_pg_config(),
        }
    }

    /// Build a store from an already assembled driver configuration,
    /// e.g. one parsed from a connection URL
    pub fn from_pg_config(config: tokio_postgres::Config) -> Self {
        Self {
            target: describe(&config),
            config,
        }
    }

    /// `user@host:port/name` of the configured database
    pub fn target(&self) -> &str {
        &self.target
    }

    async fn connect(&self) -> StoreResult<ScopedConnection> {
        let (client, connection) = self
            .config
            .connect(NoTls)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                Logger::warn("DB_CONNECTION_ERROR", &[("reason", e.to_string().as_str())]);
            }
        });

        Ok(ScopedConnection { client, driver })
    }
}

const TOTAL_SQL: &str = "SELECT COUNT(*) AS total FROM patients";

/// NULL conditions form their own group, sorted after named ones on equal counts
const GROUP_COUNTS_SQL: &str = "SELECT medical_condition::text AS medical_condition, COUNT(*) AS count \
     FROM patients \
     GROUP BY medical_condition \
     ORDER BY COUNT(*) DESC, medical_condition ASC NULLS LAST";

/// Unfiltered listing; `$1` is the row cap
fn list_sql() -> String {
    format!("SELECT {} FROM patients ORDER BY id LIMIT $1", select_list())
}

/// Listing restricted to one condition; `$1` is the condition, `$2` the row cap
fn list_by_condition_sql() -> String {
    format!(
        "SELECT {} FROM patients WHERE medical_condition = $1 ORDER BY id LIMIT $2",
        select_list()
    )
}

fn query_error(e: tokio_postgres::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, column: &'static str) -> StoreResult<T> {
    row.try_get(column).map_err(|e| StoreError::Mapping {
        column,
        reason: e.to_string(),
    })
}

fn record_from_row(row: &Row) -> StoreResult<PatientRecord> {
    let [
        id,
        name,
        age,
        gender,
        blood_type,
        medical_condition,
        date_of_admission,
        doctor,
        hospital,
        insurance_provider,
        billing_amount,
        room_number,
        admission_type,
        discharge_date,
        medication,
        test_results,
    ] = column_names();

    Ok(PatientRecord {
        id: get(row, id)?,
        name: get(row, name)?,
        age: get(row, age)?,
        gender: get(row, gender)?,
        blood_type: get(row, blood_type)?,
        medical_condition: get(row, medical_condition)?,
        date_of_admission: get(row, date_of_admission)?,
        doctor: get(row, doctor)?,
        hospital: get(row, hospital)?,
        insurance_provider: get(row, insurance_provider)?,
        billing_amount: get(row, billing_amount)?,
        room_number: get(row, room_number)?,
        admission_type: get(row, admission_type)?,
        discharge_date: get(row, discharge_date)?,
        medication: get(row, medication)?,
        test_results: get(row, test_results)?,
    })
}

fn count(row: &Row, column: &'static str) -> StoreResult<u64> {
    let n: i64 = get(row, column)?;
    Ok(n.max(0) as u64)
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn list_patients(
        &self,
        condition: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<PatientRecord>> {
        let conn = self.connect().await?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = match condition {
            Some(condition) => {
                let sql = list_by_condition_sql();
                conn.client.query(sql.as_str(), &[&condition, &limit]).await
            }
            None => {
                let sql = list_sql();
                conn.client.query(sql.as_str(), &[&limit]).await
            }
        }
        .map_err(query_error)?;

        rows.iter().map(record_from_row).collect()
    }

    async fn condition_counts(&self) -> StoreResult<ConditionCounts> {
        let mut conn = self.connect().await?;

        let tx = conn
            .client
            .build_transaction()
            .isolation_level(IsolationLevel::RepeatableRead)
            .read_only(true)
            .start()
            .await
            .map_err(query_error)?;

        let total_row = tx.query_one(TOTAL_SQL, &[]).await.map_err(query_error)?;
        let total = count(&total_row, "total")?;

        let rows = tx.query(GROUP_COUNTS_SQL, &[]).await.map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        let groups = rows
            .iter()
            .map(|row| Ok((get(row, "medical_condition")?, count(row, "count")?)))
            .collect::<StoreResult<Vec<ConditionGroup>>>()?;

        Ok(ConditionCounts { total, groups })
    }
}

fn describe(config: &tokio_postgres::Config) -> String {
    let host = match config.get_hosts().first() {
        Some(Host::Tcp(name)) => name.clone(),
        #[cfg(unix)]
        Some(Host::Unix(path)) => path.display().to_string(),
        None => String::new(),
    };
    let port = config.get_ports().first().copied().unwrap_or(5432);

    format!(
        "{}@{}:{}/{}",
        config.get_user().unwrap_or_default(),
        host,
        port,
        config.get_dbname().unwrap_or_default()
    )
}
