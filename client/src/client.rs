//! Typed wrapper around the generated gRPC client.

use futures_util::TryStreamExt;
use rand::Rng;
use rect_finder::{Finding, Matrix};
use rect_types::rect::rectangle_finder_client::RectangleFinderClient;
use rect_types::rect::{ListLogsRequest, LogRecord, MatrixRequest, PingRequest, Row};
use tonic::Streaming;
use tonic::transport::{Channel, Endpoint};

use crate::error::Error;

/// Connection to a rectangle finder server.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Clone)]
pub struct RectClient {
    client: RectangleFinderClient<Channel>,
}

impl RectClient {
    /// Connects to a server.
    ///
    /// # Arguments
    ///
    /// * `addr` - Server address (e.g., `"localhost:50051"`)
    pub async fn connect(addr: impl Into<ServerAddr>) -> Result<Self, Error> {
        let server_addr = addr.into();
        let endpoint = Endpoint::from_shared(format!("http://{}", server_addr.0))?;
        let channel = endpoint.connect().await?;
        Ok(Self {
            client: RectangleFinderClient::new(channel),
        })
    }

    pub async fn ping(&mut self) -> Result<String, Error> {
        let response = self.client.ping(PingRequest {}).await?;
        Ok(response.into_inner().message)
    }

    /// Asks the server for the largest uniform rectangle in `matrix`.
    pub async fn largest_rectangle(&mut self, matrix: &Matrix) -> Result<Finding, Error> {
        let request = MatrixRequest {
            rows: matrix
                .rows()
                .iter()
                .map(|cells| Row {
                    cells: cells.clone(),
                })
                .collect(),
        };

        let response = self.client.largest_rectangle(request).await?.into_inner();
        Ok(Finding {
            values: response.values.into_iter().collect(),
            area: response.area as usize,
        })
    }

    /// Fetches every stored audit entry with an id greater than `after_id`.
    pub async fn logs(&mut self, after_id: i64) -> Result<Vec<LogRecord>, Error> {
        let stream = self.log_stream(after_id, false).await?;
        Ok(stream.try_collect().await?)
    }

    /// Subscribes to audit entries, including ones written after the call.
    pub async fn follow_logs(&mut self, after_id: i64) -> Result<Streaming<LogRecord>, Error> {
        self.log_stream(after_id, true).await
    }

    async fn log_stream(
        &mut self,
        after_id: i64,
        follow: bool,
    ) -> Result<Streaming<LogRecord>, Error> {
        let request = ListLogsRequest { after_id, follow };
        Ok(self.client.list_logs(request).await?.into_inner())
    }
}

/// Parses and validates a matrix written as JSON, e.g. `[[1, 2], [3, 4]]`.
pub fn parse_matrix(json: &str) -> Result<Matrix, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Builds a `rows` x `cols` matrix with cells drawn uniformly from
/// `0..alphabet`. The alphabet must hold at least one value.
pub fn random_matrix(
    rng: &mut impl Rng,
    rows: usize,
    cols: usize,
    alphabet: i64,
) -> Result<Matrix, Error> {
    if alphabet < 1 {
        return Err(Error::InvalidAlphabet(alphabet));
    }
    let cells = (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(0..alphabet)).collect())
        .collect();
    Ok(Matrix::new(cells)?)
}

/// Server address wrapper for type-safe connection.
#[derive(Clone)]
pub struct ServerAddr(pub String);

impl From<String> for ServerAddr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ServerAddr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
