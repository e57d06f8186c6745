use crate::domain::category::Category;
use crate::forms::categories::CreateCategoryPayload;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches every category, name order.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_categories().map_err(ServiceError::from)
}

/// Creates a new category from the sanitized payload.
pub fn create_category<R>(repo: &R, payload: CreateCategoryPayload) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = payload
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Deletes a category; missing ids surface as `NotFound`.
pub fn remove_category<R>(repo: &R, category_id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id).map_err(ServiceError::from)
}
