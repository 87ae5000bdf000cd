use crate::models::ApiLog;
use futures_util::stream::Stream;
use rect_finder::{Finding, Matrix};
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

const PAGE_SIZE: i64 = 100;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub type LogStream = Pin<Box<dyn Stream<Item = Result<ApiLog, StorageError>> + Send>>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct RequestData<'a> {
    matrix: &'a Matrix,
}

pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Serializes one search call and appends it to the audit log.
    pub async fn record(
        &self,
        matrix: &Matrix,
        finding: &Finding,
        execution_time_ms: f64,
    ) -> Result<i64, StorageError> {
        let request_data = serde_json::to_string(&RequestData { matrix })?;
        let response_data = serde_json::to_string(finding)?;
        self.append(&ApiLog::new(request_data, response_data, execution_time_ms))
            .await
    }

    pub async fn append(&self, log: &ApiLog) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO api_logs (request_data, response_data, execution_time_ms, timestamp)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&log.request_data)
        .bind(&log.response_data)
        .bind(log.execution_time_ms)
        .bind(log.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.get("id"))
    }

    pub async fn fetch_after(&self, after_id: i64, limit: i64) -> Result<Vec<ApiLog>, StorageError> {
        fetch_page(&self.pool, after_id, limit).await
    }

    /// Streams entries with `id > after_id` in id order.
    ///
    /// Without `follow` the stream ends once every stored entry has been
    /// yielded. With `follow` it keeps polling for new entries. A database
    /// error is yielded once and ends the stream.
    pub fn stream_from(&self, after_id: i64, follow: bool) -> LogStream {
        let pool = self.pool.clone();
        Box::pin(async_stream::stream! {
            let mut after_id = after_id;

            loop {
                let page = match fetch_page(&pool, after_id, PAGE_SIZE).await {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };

                if page.is_empty() {
                    if !follow {
                        break;
                    }
                    tokio::time::sleep(POLL_INTERVAL).await;
                    continue;
                }

                for log in page {
                    after_id = log.id;
                    yield Ok(log);
                }
            }
        })
    }
}

async fn fetch_page(
    pool: &SqlitePool,
    after_id: i64,
    limit: i64,
) -> Result<Vec<ApiLog>, StorageError> {
    let rows = sqlx::query_as::<_, (i64, String, String, f64, i64)>(
        "SELECT id, request_data, response_data, execution_time_ms, timestamp
         FROM api_logs WHERE id > ? ORDER BY id LIMIT ?",
    )
    .bind(after_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, request_data, response_data, execution_time_ms, timestamp)| ApiLog {
                id,
                request_data,
                response_data,
                execution_time_ms,
                timestamp,
            },
        )
        .collect())
}
