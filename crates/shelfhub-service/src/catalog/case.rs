//! Case service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shelfhub_auth::LocationAccess;
use shelfhub_core::error::AppError;
use shelfhub_database::store::CaseStore;
use shelfhub_entity::catalog::{Case, NewCase};

use super::{out_of_reach, validate};
use crate::context::RequestContext;

/// Manages the cases inside a location.
#[derive(Debug, Clone)]
pub struct CaseService {
    cases: Arc<dyn CaseStore>,
    access: Arc<LocationAccess>,
}

impl CaseService {
    /// Creates a new case service.
    pub fn new(cases: Arc<dyn CaseStore>, access: Arc<LocationAccess>) -> Self {
        Self { cases, access }
    }

    /// Adds a case to a location the caller belongs to.
    pub async fn create(&self, ctx: &RequestContext, data: NewCase) -> Result<Case, AppError> {
        validate(&data)?;
        self.access
            .authorize_member(data.location_id, ctx.user_id)
            .await?;

        let case = self.cases.create_case(&data).await?;
        info!(case_id = %case.id, location_id = %case.location_id, "Case created");
        Ok(case)
    }

    /// Fetches a case.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Case, AppError> {
        let case = self
            .cases
            .find_case(id)
            .await?
            .ok_or_else(|| out_of_reach("case"))?;
        self.access
            .authorize_member(case.location_id, ctx.user_id)
            .await?;
        Ok(case)
    }

    /// Lists the cases of a location.
    pub async fn list_by_location(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<Vec<Case>, AppError> {
        self.access
            .authorize_member(location_id, ctx.user_id)
            .await?;
        self.cases.list_cases_by_location(location_id).await
    }

    /// Renames a case.
    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> Result<Case, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Case name is required"));
        }
        self.get(ctx, id).await?;
        self.cases
            .rename_case(id, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Deletes a case along with its shelves and their items.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.get(ctx, id).await?;
        if !self.cases.delete_case(id).await? {
            return Err(AppError::not_found(format!("Case {id} not found")));
        }
        info!(case_id = %id, deleted_by = %ctx.user_id, "Case deleted");
        Ok(())
    }
}
