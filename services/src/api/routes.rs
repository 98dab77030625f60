//! HTTP handlers for the file manager facade.
//!
//! Every route is a thin adapter: extract the caller's claims and the body,
//! call the matching facade handler, and answer with its JSON result.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    routing::post,
};
use filemanager_core::{
    ReqBodyCopy, ReqBodyCreateFolder, ReqBodyEdit, ReqBodyGetContent, ReqBodyGetMeta, ReqBodyList,
    ReqBodyMove, ReqBodyRemove, ReqBodyRename, ReqBodySetPermissions, ResBodyCopy,
    ResBodyCreateFolder, ResBodyEdit, ResBodyGetContent, ResBodyGetMeta, ResBodyList, ResBodyMove,
    ResBodyRemove, ResBodyRename, ResBodySetPermissions, ResBodyUploadFile,
};
use serde::Deserialize;

use super::error::ApiError;
use super::facade::FileManagerApi;
use crate::auth::RequireClaims;
use crate::commands::Commands;
use crate::storage::StorageBackend;

/// Routes mounted under `/api/files`.
pub fn routes<S, C>() -> Router<FileManagerApi<S, C>>
where
    S: StorageBackend,
    C: Commands,
{
    Router::new()
        .route("/list", post(list::<S, C>))
        .route("/rename", post(rename::<S, C>))
        .route("/move", post(move_files::<S, C>))
        .route("/copy", post(copy::<S, C>))
        .route("/remove", post(remove::<S, C>))
        .route("/edit", post(edit::<S, C>))
        .route("/get-content", post(get_content::<S, C>))
        .route("/get-meta", post(get_meta::<S, C>))
        .route("/create-folder", post(create_folder::<S, C>))
        .route("/set-permissions", post(set_permissions::<S, C>))
        .route("/upload", post(upload::<S, C>))
}

async fn list<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyList>,
) -> Result<Json<ResBodyList>, ApiError> {
    api.handle_list(&body, auth.claims()).await.map(Json)
}

async fn rename<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyRename>,
) -> Result<Json<ResBodyRename>, ApiError> {
    api.handle_rename(&body, auth.claims()).await.map(Json)
}

async fn move_files<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyMove>,
) -> Result<Json<ResBodyMove>, ApiError> {
    api.handle_move(&body, auth.claims()).await.map(Json)
}

async fn copy<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyCopy>,
) -> Result<Json<ResBodyCopy>, ApiError> {
    api.handle_copy(&body, auth.claims()).await.map(Json)
}

async fn remove<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyRemove>,
) -> Result<Json<ResBodyRemove>, ApiError> {
    api.handle_remove(&body, auth.claims()).await.map(Json)
}

async fn edit<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyEdit>,
) -> Result<Json<ResBodyEdit>, ApiError> {
    api.handle_edit(&body, auth.claims()).await.map(Json)
}

async fn get_content<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyGetContent>,
) -> Result<Json<ResBodyGetContent>, ApiError> {
    api.handle_get_content(&body, auth.claims()).await.map(Json)
}

async fn get_meta<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyGetMeta>,
) -> Result<Json<ResBodyGetMeta>, ApiError> {
    api.handle_get_meta(&body, auth.claims()).await.map(Json)
}

async fn create_folder<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodyCreateFolder>,
) -> Result<Json<ResBodyCreateFolder>, ApiError> {
    api.handle_create_folder(&body, auth.claims()).await.map(Json)
}

async fn set_permissions<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Json(body): Json<ReqBodySetPermissions>,
) -> Result<Json<ResBodySetPermissions>, ApiError> {
    api.handle_set_permissions(&body, auth.claims())
        .await
        .map(Json)
}

/// Query string of an upload request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadQuery {
    pub bucketname: String,
    pub directory_path: String,
    pub filename: String,
}

async fn upload<S: StorageBackend, C: Commands>(
    State(api): State<FileManagerApi<S, C>>,
    auth: RequireClaims,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ResBodyUploadFile>, ApiError> {
    let mimetype = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    api.handle_upload_file(
        &query.bucketname,
        &query.directory_path,
        &query.filename,
        mimetype,
        body.to_vec(),
        auth.claims(),
    )
    .await
    .map(Json)
}
