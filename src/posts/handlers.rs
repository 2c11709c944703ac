use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{jwt::CurrentUser, repo_types::User},
    error::{ApiError, ApiResult},
    posts::{
        dto::{Pagination, PostResponse},
        repo_types::{MediaType, Post},
        service::{self, UploadedFile},
    },
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post).delete(delete_post))
        .route("/users/:username/posts", get(get_user_posts))
        .merge(upload_routes())
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/posts/upload-image", post(upload_image))
        .route("/posts/upload-video", post(upload_video))
        // video ceiling plus multipart framing overhead
        .layer(DefaultBodyLimit::max(110 * 1024 * 1024))
}

#[instrument(skip(state, user, mp), fields(user_id = user.0.id))]
pub async fn upload_image(
    State(state): State<AppState>,
    user: CurrentUser,
    mp: Multipart,
) -> ApiResult<(StatusCode, Json<PostResponse>)> {
    upload(&state, &user.0, MediaType::Image, mp).await
}

#[instrument(skip(state, user, mp), fields(user_id = user.0.id))]
pub async fn upload_video(
    State(state): State<AppState>,
    user: CurrentUser,
    mp: Multipart,
) -> ApiResult<(StatusCode, Json<PostResponse>)> {
    upload(&state, &user.0, MediaType::Video, mp).await
}

async fn upload(
    state: &AppState,
    user: &User,
    media: MediaType,
    mut mp: Multipart,
) -> ApiResult<(StatusCode, Json<PostResponse>)> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Ok(Some(field)) = mp.next_field().await {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::BadRequest("invalid title field".into()))?,
                );
            }
            Some("description") => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::BadRequest("invalid description field".into()))?,
                );
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let body = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::BadRequest("failed to read file field".into()))?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    body,
                });
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("title is required".into()))?;
    let file = file.ok_or_else(|| ApiError::BadRequest("file is required".into()))?;

    let response = service::create_post(state, user, media, &title, description.as_deref(), file)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let rows = Post::list(&state.db, p.limit, p.skip).await?;
    let items = rows
        .into_iter()
        .map(|row| {
            let url = state.storage.public_url(&row.s3_key);
            PostResponse::from_row(row, url)
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PostResponse>> {
    let row = Post::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;
    let url = state.storage.public_url(&row.s3_key);
    Ok(Json(PostResponse::from_row(row, url)))
}

#[instrument(skip(state))]
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let rows = Post::list_by_owner(&state.db, user.id).await?;
    let items = rows
        .into_iter()
        .map(|row| {
            let url = state.storage.public_url(&row.s3_key);
            PostResponse::from_row(row, url)
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, user), fields(user_id = user.0.id))]
pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    service::delete_post(&state, &user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
