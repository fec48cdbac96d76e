//! Shelf service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shelfhub_auth::LocationAccess;
use shelfhub_core::error::AppError;
use shelfhub_database::store::{CaseStore, ShelfStore};
use shelfhub_entity::catalog::{NewShelf, Shelf};

use super::{out_of_reach, validate};
use crate::context::RequestContext;

/// Manages shelves. A shelf's location is the location of its case.
#[derive(Debug, Clone)]
pub struct ShelfService {
    shelves: Arc<dyn ShelfStore>,
    cases: Arc<dyn CaseStore>,
    access: Arc<LocationAccess>,
}

impl ShelfService {
    pub fn new(
        shelves: Arc<dyn ShelfStore>,
        cases: Arc<dyn CaseStore>,
        access: Arc<LocationAccess>,
    ) -> Self {
        Self {
            shelves,
            cases,
            access,
        }
    }

    pub async fn create(&self, ctx: &RequestContext, data: NewShelf) -> Result<Shelf, AppError> {
        validate(&data)?;
        self.authorize_case(ctx, data.case_id).await?;

        let shelf = self.shelves.create_shelf(&data).await?;
        info!(shelf_id = %shelf.id, case_id = %shelf.case_id, "Shelf created");
        Ok(shelf)
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Shelf, AppError> {
        let shelf = self
            .shelves
            .find_shelf(id)
            .await?
            .ok_or_else(|| out_of_reach("shelf"))?;
        self.authorize_case(ctx, shelf.case_id).await?;
        Ok(shelf)
    }

    pub async fn list_by_case(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
    ) -> Result<Vec<Shelf>, AppError> {
        self.authorize_case(ctx, case_id).await?;
        self.shelves.list_shelves_by_case(case_id).await
    }

    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> Result<Shelf, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Shelf name is required"));
        }
        self.get(ctx, id).await?;
        self.shelves
            .rename_shelf(id, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shelf {id} not found")))
    }

    /// Deletes a shelf and every item on it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.get(ctx, id).await?;
        if !self.shelves.delete_shelf(id).await? {
            return Err(AppError::not_found(format!("Shelf {id} not found")));
        }
        info!(shelf_id = %id, deleted_by = %ctx.user_id, "Shelf deleted");
        Ok(())
    }

    async fn authorize_case(&self, ctx: &RequestContext, case_id: Uuid) -> Result<(), AppError> {
        let case = self
            .cases
            .find_case(case_id)
            .await?
            .ok_or_else(|| out_of_reach("case"))?;
        self.access
            .authorize_member(case.location_id, ctx.user_id)
            .await
    }
}
