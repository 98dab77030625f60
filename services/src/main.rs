use anyhow::Context;
use filemanager_services::{
    api::FileManagerApi,
    commands::OpenDalCommands,
    config::{Config, StorageKind},
    routes,
    storage::{GcsConfig, GcsStorage, MemoryStorage, R2Storage, StorageBackend},
    telemetry,
};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const BUILD_DATE: &str = env!("BUILD_DATE");
const BUILD_COMMIT: &str = env!("BUILD_COMMIT");
const BUILD_BRANCH: &str = env!("BUILD_BRANCH");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config: Config = Config::init()?;

    telemetry::init_tracing(&config)?;

    print_build_info();

    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        storage_backend = %config.storage_backend(),
        "Configuration loaded"
    );

    match config.storage_backend() {
        StorageKind::Gcs => {
            let storage = GcsStorage::new(GcsConfig {
                credential: config.gcs_credentials().map(str::to_owned),
                endpoint: None,
            });
            serve(storage, config).await
        }
        StorageKind::R2 => {
            let r2 = config
                .r2()
                .cloned()
                .context("r2 storage backend selected without credentials")?;
            let storage = R2Storage::new(r2);
            serve(storage, config).await
        }
        StorageKind::Memory => {
            let storage = MemoryStorage::with_buckets(config.memory_buckets())?;
            info!(buckets = storage.len(), "Using in-memory storage");
            serve(storage, config).await
        }
    }
}

async fn serve<S: StorageBackend>(storage: S, config: Config) -> anyhow::Result<()> {
    let mut commands = OpenDalCommands::new().with_presign_expiry(config.presign_expiry());
    if let Some(base) = config.public_url_base() {
        commands = commands.with_public_url_base(base);
    }

    let api = FileManagerApi::new(storage, commands);

    // Create socket address
    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    // Build the application router
    let route = routes(api, config);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

/// Print build information
fn print_build_info() {
    info!("===========================================");
    info!("  File Manager Services");
    info!("===========================================");
    info!("Build Date:   {}", BUILD_DATE);
    info!("Build Commit: {}", BUILD_COMMIT);
    info!("Build Branch: {}", BUILD_BRANCH);
    info!("===========================================");
}
