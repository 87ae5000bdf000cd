//! Client for the rectangle finder gRPC service.
//!
//! `rect-client` wraps the generated `RectangleFinder` client with typed
//! requests and responses: matrices go in as [`Matrix`](rect_finder::Matrix),
//! results come back as [`Finding`](rect_finder::Finding), and the audit log
//! comes back as plain records.
//!
//! # Example
//!
//! ```no_run
//! use rect_client::RectClient;
//! use rect_finder::Matrix;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = RectClient::connect("localhost:50051").await?;
//!
//!     let matrix = Matrix::new(vec![vec![1, 2], vec![1, 2]])?;
//!     let finding = client.largest_rectangle(&matrix).await?;
//!     assert_eq!(finding.area, 2);
//!
//!     for log in client.logs(0).await? {
//!         println!("{} -> {}", log.request_data, log.response_data);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{RectClient, ServerAddr, parse_matrix, random_matrix};
pub use error::Error;
pub use rect_types::rect::LogRecord;
