use std::sync::Arc;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rect_server::{config::Config, db, grpc, shutdown, storage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    let storage = Arc::new(storage::Storage::new(pool));
    let server = grpc::create_server(storage, config.max_cells);

    info!(
        addr = %config.listen_addr,
        database = %config.database_url,
        max_cells = config.max_cells,
        "starting rectangle finder"
    );
    Server::builder()
        .add_service(server)
        .serve_with_shutdown(config.listen_addr, shutdown::wait_for(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}

