//! Generic service for catalog items (books, movies, music, shows).

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shelfhub_auth::LocationAccess;
use shelfhub_core::error::AppError;
use shelfhub_database::repositories::CatalogRepository;
use shelfhub_database::store::ShelfStore;
use shelfhub_entity::catalog::CatalogDraft;

use super::{out_of_reach, validate};
use crate::context::RequestContext;

/// Item operations for one catalog kind, gated on membership of the
/// location that holds the item's shelf.
#[derive(Debug)]
pub struct CatalogService<R: CatalogRepository> {
    items: Arc<R>,
    shelves: Arc<dyn ShelfStore>,
    access: Arc<LocationAccess>,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a new catalog service over `items`.
    pub fn new(items: Arc<R>, shelves: Arc<dyn ShelfStore>, access: Arc<LocationAccess>) -> Self {
        Self {
            items,
            shelves,
            access,
        }
    }

    /// Places a new item on a shelf.
    pub async fn create(&self, ctx: &RequestContext, draft: R::Draft) -> Result<R::Item, AppError> {
        validate(&draft)?;
        self.authorize_shelf(ctx, draft.shelf_id()).await?;

        let item = self.items.insert(&draft).await?;
        info!(kind = R::KIND, shelf_id = %draft.shelf_id(), "Catalog item created");
        Ok(item)
    }

    /// Fetches one item.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<R::Item, AppError> {
        self.authorize_item(ctx, id).await?;
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.missing(id))
    }

    /// Replaces an item. Moving it to another shelf requires membership of
    /// both the current and the target location.
    pub async fn replace(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        draft: R::Draft,
    ) -> Result<R::Item, AppError> {
        validate(&draft)?;
        let current = self.authorize_item(ctx, id).await?;
        let target = self.authorize_shelf(ctx, draft.shelf_id()).await?;
        if current != target {
            info!(kind = R::KIND, item_id = %id, from = %current, to = %target, "Item moved between locations");
        }

        self.items
            .replace(id, &draft)
            .await?
            .ok_or_else(|| self.missing(id))
    }

    /// Deletes an item.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.authorize_item(ctx, id).await?;
        if !self.items.delete(id).await? {
            return Err(self.missing(id));
        }
        info!(kind = R::KIND, item_id = %id, deleted_by = %ctx.user_id, "Catalog item deleted");
        Ok(())
    }

    /// Items on one shelf.
    pub async fn list_by_shelf(
        &self,
        ctx: &RequestContext,
        shelf_id: Uuid,
    ) -> Result<Vec<R::Item>, AppError> {
        self.authorize_shelf(ctx, shelf_id).await?;
        self.items.list_by_shelf(shelf_id).await
    }

    /// Items anywhere in one location.
    pub async fn list_by_location(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<Vec<R::Item>, AppError> {
        self.access
            .authorize_member(location_id, ctx.user_id)
            .await?;
        self.items.list_by_location(location_id).await
    }

    /// Full-text search inside one location.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        query: &str,
    ) -> Result<Vec<R::Item>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query is required"));
        }
        self.access
            .authorize_member(location_id, ctx.user_id)
            .await?;
        self.items.search(location_id, query).await
    }

    /// Items with `barcode` across every location the caller belongs to.
    pub async fn find_by_barcode(
        &self,
        ctx: &RequestContext,
        barcode: &str,
    ) -> Result<Vec<R::Item>, AppError> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(AppError::validation("Barcode is required"));
        }
        self.items
            .find_by_barcode_for_member(barcode, ctx.user_id)
            .await
    }

    /// Checks membership for the item's location and returns that location.
    async fn authorize_item(&self, ctx: &RequestContext, id: Uuid) -> Result<Uuid, AppError> {
        let location_id = self
            .items
            .location_of(id)
            .await?
            .ok_or_else(|| out_of_reach(R::KIND))?;
        self.access
            .authorize_member(location_id, ctx.user_id)
            .await?;
        Ok(location_id)
    }

    /// Checks membership for the shelf's location and returns that location.
    async fn authorize_shelf(&self, ctx: &RequestContext, shelf_id: Uuid) -> Result<Uuid, AppError> {
        let location_id = self
            .shelves
            .find_shelf_location(shelf_id)
            .await?
            .ok_or_else(|| out_of_reach("shelf"))?;
        self.access
            .authorize_member(location_id, ctx.user_id)
            .await?;
        Ok(location_id)
    }

    fn missing(&self, id: Uuid) -> AppError {
        AppError::not_found(format!("{} {id} not found", capitalize(R::KIND)))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
