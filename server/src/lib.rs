pub mod config;
pub mod db;
pub mod grpc;
pub mod models;
pub mod shutdown;
pub mod storage;
