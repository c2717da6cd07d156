use crate::{
    dto::{ApiResponse, GroupGetQuery},
    error::AppResult,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use group_service_domain::{CreatedGroup, GroupDetail, GroupList};

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

pub async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<CreatedGroup>>> {
    let created = state
        .groups()?
        .create_group(authorization(&headers), &body)
        .await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn get_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Option<Query<GroupGetQuery>>,
) -> AppResult<Json<ApiResponse<GroupDetail>>> {
    // An unreadable query string counts as a missing `shortName`.
    let short_name = query.and_then(|Query(query)| query.short_name);
    let group = state
        .groups()?
        .get_group(authorization(&headers), short_name.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(group)))
}

pub async fn update_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .groups()?
        .update_group(authorization(&headers), &body)
        .await?;
    Ok(Json(ApiResponse::empty()))
}

pub async fn list_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<GroupList>>> {
    let groups = state
        .groups()?
        .list_groups(authorization(&headers))
        .await?;
    Ok(Json(ApiResponse::success(groups)))
}
