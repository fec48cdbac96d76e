//! Handlers shared by every catalog item kind.
//!
//! Each handler is generic over the repository; the router instantiates
//! them once per kind.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use shelfhub_database::repositories::CatalogRepository;
use shelfhub_service::CatalogService;

use crate::dto::request::CatalogSearchQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::{AppState, CatalogState};

fn service<R>(state: &AppState) -> &CatalogService<R>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    <AppState as CatalogState<R>>::catalog(state)
}

/// POST /api/{kind}
pub async fn create<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<R::Draft>,
) -> Result<(StatusCode, Json<R::Item>), ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    let item = service::<R>(&state).create(&auth, draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/{kind}/{id}
pub async fn get<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<R::Item>, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    Ok(Json(service::<R>(&state).get(&auth, id).await?))
}

/// PUT /api/{kind}/{id}
pub async fn replace<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<R::Draft>,
) -> Result<Json<R::Item>, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    Ok(Json(service::<R>(&state).replace(&auth, id, draft).await?))
}

/// DELETE /api/{kind}/{id}
pub async fn delete<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    service::<R>(&state).delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/shelves/{id}/{kind}
pub async fn list_by_shelf<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(shelf_id): Path<Uuid>,
) -> Result<Json<Vec<R::Item>>, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    Ok(Json(service::<R>(&state).list_by_shelf(&auth, shelf_id).await?))
}

/// GET /api/locations/{id}/{kind}
pub async fn list_by_location<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<Uuid>,
) -> Result<Json<Vec<R::Item>>, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    Ok(Json(
        service::<R>(&state).list_by_location(&auth, location_id).await?,
    ))
}

/// GET /api/search/{kind}?location_id=&query=
pub async fn search<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CatalogSearchQuery>,
) -> Result<Json<Vec<R::Item>>, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    Ok(Json(
        service::<R>(&state)
            .search(&auth, query.location_id, &query.query)
            .await?,
    ))
}

/// GET /api/search/{kind}_barcodes/{barcode}
pub async fn find_by_barcode<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(barcode): Path<String>,
) -> Result<Json<Vec<R::Item>>, ApiError>
where
    R: CatalogRepository,
    AppState: CatalogState<R>,
{
    Ok(Json(service::<R>(&state).find_by_barcode(&auth, &barcode).await?))
}
