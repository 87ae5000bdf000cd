use crate::storage::Storage;
use futures_util::stream::{Stream, StreamExt};
use rect_finder::Matrix;
use rect_types::rect::{
    rectangle_finder_server::{RectangleFinder, RectangleFinderServer},
    ListLogsRequest, LogRecord, MatrixRequest, PingRequest, PingResponse, RectangleResponse,
};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

pub const PING_MESSAGE: &str = "API is running";

#[derive(Clone)]
pub struct RectangleServiceImpl {
    storage: Arc<Storage>,
    max_cells: usize,
}

impl RectangleServiceImpl {
    pub fn new(storage: Arc<Storage>, max_cells: usize) -> Self {
        Self { storage, max_cells }
    }

    fn validate(&self, request: MatrixRequest) -> Result<Matrix, Status> {
        let rows = request.rows.into_iter().map(|row| row.cells).collect();
        let matrix = Matrix::new(rows).map_err(|e| Status::invalid_argument(e.to_string()))?;

        if matrix.cell_count() > self.max_cells {
            return Err(Status::invalid_argument(format!(
                "matrix has {} cells; at most {} are accepted",
                matrix.cell_count(),
                self.max_cells
            )));
        }

        Ok(matrix)
    }
}

type ListLogsStream = Pin<Box<dyn Stream<Item = Result<LogRecord, Status>> + Send>>;

#[tonic::async_trait]
impl RectangleFinder for RectangleServiceImpl {
    type ListLogsStream = ListLogsStream;

    async fn ping(&self, _request: Request<PingRequest>) -> Result<Response<PingResponse>, Status> {
        Ok(Response::new(PingResponse {
            message: PING_MESSAGE.to_string(),
        }))
    }

    async fn largest_rectangle(
        &self,
        request: Request<MatrixRequest>,
    ) -> Result<Response<RectangleResponse>, Status> {
        let matrix = self.validate(request.into_inner()).map_err(|status| {
            debug!(reason = status.message(), "rejected matrix");
            status
        })?;
        let (height, width) = (matrix.height(), matrix.width());

        let (matrix, finding, elapsed) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let finding = matrix.find();
            (matrix, finding, start.elapsed())
        })
        .await
        .map_err(|e| Status::internal(format!("search task failed: {}", e)))?;

        let execution_time_ms = elapsed.as_secs_f64() * 1000.0;
        info!(
            height,
            width,
            area = finding.area,
            values = finding.values.len(),
            execution_time_ms,
            "largest rectangle computed"
        );

        if let Err(e) = self.storage.record(&matrix, &finding, execution_time_ms).await {
            warn!(error = %e, "failed to record request log");
        }

        Ok(Response::new(RectangleResponse {
            values: finding.values.into_iter().collect(),
            area: finding.area as u64,
        }))
    }

    async fn list_logs(
        &self,
        request: Request<ListLogsRequest>,
    ) -> Result<Response<Self::ListLogsStream>, Status> {
        let req = request.into_inner();
        debug!(after_id = req.after_id, follow = req.follow, "listing request logs");
        let stream = self.storage.stream_from(req.after_id, req.follow);

        let output = async_stream::stream! {
            let mut db_stream = stream;
            while let Some(result) = db_stream.next().await {
                match result {
                    Ok(log) => {
                        yield Ok(LogRecord {
                            id: log.id,
                            request_data: log.request_data,
                            response_data: log.response_data,
                            execution_time_ms: log.execution_time_ms,
                            timestamp: log.timestamp,
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "request log stream failed");
                        yield Err(Status::internal(e.to_string()));
                        break;
                    }
                }
            }
        };

        Ok(Response::new(Box::pin(output)))
    }
}

pub fn create_server(storage: Arc<Storage>, max_cells: usize) -> RectangleFinderServer<RectangleServiceImpl> {
    RectangleFinderServer::new(RectangleServiceImpl::new(storage, max_cells))
}
