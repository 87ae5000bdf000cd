use futures_util::StreamExt;
use rect_server::db::DbPool;
use rect_types::rect::rectangle_finder_client::RectangleFinderClient;
use rect_types::rect::{ListLogsRequest, MatrixRequest, PingRequest, Row};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tonic::transport::Channel;
use tonic::Code;

async fn start_test_server(
    pool: DbPool,
    max_cells: usize,
) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let storage = Arc::new(rect_server::storage::Storage::new(pool));
    let server = rect_server::grpc::create_server(storage, max_cells);

    let handle = tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(server)
            .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    sleep(Duration::from_millis(100)).await;
    (addr, handle)
}

async fn memory_pool() -> DbPool {
    rect_server::db::init_pool("sqlite::memory:", 1).await.unwrap()
}

async fn connect_with_pool(pool: DbPool, max_cells: usize) -> RectangleFinderClient<Channel> {
    let (addr, _handle) = start_test_server(pool, max_cells).await;
    RectangleFinderClient::connect(format!("http://{}", addr))
        .await
        .unwrap()
}

async fn connect(max_cells: usize) -> RectangleFinderClient<Channel> {
    connect_with_pool(memory_pool().await, max_cells).await
}

/// A pool whose connections are gone, so every storage call fails.
async fn closed_pool() -> DbPool {
    let pool = memory_pool().await;
    pool.close().await;
    pool
}

fn matrix(rows: &[&[i64]]) -> MatrixRequest {
    MatrixRequest {
        rows: rows
            .iter()
            .map(|cells| Row {
                cells: cells.to_vec(),
            })
            .collect(),
    }
}

async fn all_logs(client: &mut RectangleFinderClient<Channel>) -> Vec<rect_types::rect::LogRecord> {
    let stream = client
        .list_logs(ListLogsRequest {
            after_id: 0,
            follow: false,
        })
        .await
        .unwrap()
        .into_inner();

    stream.map(|record| record.unwrap()).collect().await
}

#[tokio::test]
async fn test_ping() {
    let mut client = connect(100).await;

    let response = client.ping(PingRequest {}).await.unwrap().into_inner();

    assert_eq!(response.message, rect_server::grpc::PING_MESSAGE);
}

#[tokio::test]
async fn test_largest_rectangle() {
    let mut client = connect(100).await;

    let response = client
        .largest_rectangle(matrix(&[&[1, 1, 2], &[1, 1, 2], &[3, 3, 3]]))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.values, vec![1]);
    assert_eq!(response.area, 4);
}

#[tokio::test]
async fn test_ties_are_returned_together() {
    let mut client = connect(100).await;

    let mut response = client
        .largest_rectangle(matrix(&[&[1, 2], &[1, 2]]))
        .await
        .unwrap()
        .into_inner();
    response.values.sort_unstable();

    assert_eq!(response.values, vec![1, 2]);
    assert_eq!(response.area, 2);
}

#[tokio::test]
async fn test_invalid_matrices_are_rejected() {
    let mut client = connect(100).await;

    let cases = [
        MatrixRequest { rows: Vec::new() },
        matrix(&[&[], &[]]),
        matrix(&[&[1, 2], &[3]]),
    ];
    for request in cases {
        let status = client.largest_rectangle(request).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    let status = client
        .largest_rectangle(matrix(&[&[1, 2], &[3]]))
        .await
        .unwrap_err();
    assert!(status.message().contains("rectangular"));

    assert!(all_logs(&mut client).await.is_empty());
}

#[tokio::test]
async fn test_oversized_matrix_is_rejected() {
    let mut client = connect(4).await;

    let status = client
        .largest_rectangle(matrix(&[&[1, 2, 3], &[4, 5, 6]]))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_calls_are_logged() {
    let mut client = connect(100).await;

    client
        .largest_rectangle(matrix(&[&[5]]))
        .await
        .unwrap();
    client
        .largest_rectangle(matrix(&[&[7, 7], &[7, 7]]))
        .await
        .unwrap();

    let logs = all_logs(&mut client).await;
    assert_eq!(logs.len(), 2);
    assert!(logs[0].id < logs[1].id);
    assert_eq!(logs[0].request_data, r#"{"matrix":[[5]]}"#);
    assert_eq!(logs[0].response_data, r#"{"number":[5],"area":1}"#);
    assert_eq!(logs[1].response_data, r#"{"number":[7],"area":4}"#);
    assert!(logs.iter().all(|log| log.execution_time_ms >= 0.0));

    let later = client
        .list_logs(ListLogsRequest {
            after_id: logs[0].id,
            follow: false,
        })
        .await
        .unwrap()
        .into_inner()
        .map(|record| record.unwrap().id)
        .collect::<Vec<_>>()
        .await;
    assert_eq!(later, vec![logs[1].id]);
}

#[tokio::test]
async fn test_log_write_failure_does_not_fail_the_request() {
    let mut client = connect_with_pool(closed_pool().await, 100).await;

    let response = client
        .largest_rectangle(matrix(&[&[1, 1]]))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.values, vec![1]);
    assert_eq!(response.area, 2);
}

#[tokio::test]
async fn test_log_stream_reports_storage_errors() {
    let mut client = connect_with_pool(closed_pool().await, 100).await;

    let request = ListLogsRequest {
        after_id: 0,
        follow: false,
    };
    // The error may arrive as the stream's only item or, if no data was
    // flushed first, as a trailers-only response to the call itself.
    let status = match client.list_logs(request).await {
        Err(status) => status,
        Ok(response) => {
            let items: Vec<_> = response.into_inner().collect().await;
            assert_eq!(items.len(), 1);
            items.into_iter().next().unwrap().unwrap_err()
        }
    };
    assert_eq!(status.code(), Code::Internal);
}
