use crate::domain::tag::Tag;
use crate::forms::tags::CreateTagPayload;
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches every tag, name order.
pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    repo.list_tags().map_err(ServiceError::from)
}

/// Creates a new tag from the sanitized payload.
pub fn create_tag<R>(repo: &R, payload: CreateTagPayload) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let new_tag = payload
        .into_new_tag()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_tag(&new_tag).map_err(ServiceError::from)
}

/// Deletes a tag; missing ids surface as `NotFound`.
pub fn remove_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    repo.delete_tag(tag_id).map_err(ServiceError::from)
}
