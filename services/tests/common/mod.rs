//! Shared test utilities for integration tests.
//!
//! Builds the full service router over in-memory buckets and issues bearer
//! tokens signed with the test configuration's secret.

use filemanager_core::UserClaims;
use filemanager_services::{
    api::FileManagerApi,
    auth::issue_token,
    commands::OpenDalCommands,
    config::Config,
    routes,
    storage::{MemoryStorage, StorageBackend},
};

/// Bucket present in every test app.
pub const TEST_BUCKET: &str = "files";

/// Base url used for download links, since memory storage cannot presign.
pub const TEST_PUBLIC_URL_BASE: &str = "https://files.example.test";

pub struct TestApp {
    pub router: axum::Router,
    pub storage: MemoryStorage,
}

/// Create the test app router with default test configuration.
pub fn create_test_app() -> TestApp {
    let storage = MemoryStorage::with_buckets([TEST_BUCKET]).unwrap();
    let commands = OpenDalCommands::new().with_public_url_base(TEST_PUBLIC_URL_BASE);
    let api = FileManagerApi::new(storage.clone(), commands);

    TestApp {
        router: routes(api, Config::new_for_test()),
        storage,
    }
}

/// Generate a valid test JWT token for the "testuser" user.
pub fn generate_test_token() -> String {
    issue_token(
        "testuser",
        UserClaims::new().with("role", "editor"),
        Config::new_for_test().jwt_secret(),
        chrono::Duration::hours(1),
    )
    .unwrap()
}

/// Writes an object straight into the test bucket.
#[allow(dead_code)]
pub async fn put_object(storage: &MemoryStorage, path: &str, content: &str) {
    storage
        .bucket(TEST_BUCKET)
        .unwrap()
        .operator()
        .write(path, content.to_owned())
        .await
        .unwrap();
}

/// Reads an object straight from the test bucket.
#[allow(dead_code)]
pub async fn read_object(storage: &MemoryStorage, path: &str) -> Option<String> {
    let bucket = storage.bucket(TEST_BUCKET).unwrap();
    let data = bucket.operator().read(path).await.ok()?;
    Some(String::from_utf8(data.to_vec()).unwrap())
}
