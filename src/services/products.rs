use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::product_tag::TagSync;
use crate::domain::tag::Tag;
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// View model returned for a product, with the category and tags nested and
/// the price echoed both in cents and in currency units.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price_cents: i32,
    pub price: f64,
    pub stock: i32,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let Product {
            id,
            name,
            price_cents,
            stock,
            category,
            tags,
            created_at,
            updated_at,
            ..
        } = product;

        Self {
            id,
            name,
            price_cents,
            price: price_cents as f64 / 100.0,
            stock,
            category,
            tags,
            created_at,
            updated_at,
        }
    }
}

/// Body of a successful create or update. The two mutations answer with the
/// product itself when no tag list was supplied, and with the outcome of the
/// tag reconciliation when one was; callers must tolerate both shapes.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProductMutationResponse {
    Product(ProductView),
    Tags(TagSync),
}

/// Fetches every product with its category and tags eagerly loaded.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products().map_err(ServiceError::from)?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// Fetches a single product by id; `None` when no row matches.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Option<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?;
    Ok(product.map(ProductView::from))
}

/// Creates a product and, when a non-empty tag-id list was supplied,
/// reconciles its associations against that list.
pub fn create_product<R>(
    repo: &R,
    payload: CreateProductPayload,
) -> ServiceResult<ProductMutationResponse>
where
    R: ProductWriter + ?Sized,
{
    let (new_product, tag_ids) = payload
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_product(&new_product).map_err(ServiceError::from)?;

    if tag_ids.is_empty() {
        return Ok(ProductMutationResponse::Product(created.into()));
    }

    let sync = repo
        .sync_product_tags(created.id, &tag_ids)
        .map_err(ServiceError::from)?;

    Ok(ProductMutationResponse::Tags(sync))
}

/// Applies a partial update to a product and, when a non-empty tag-id list
/// was supplied, reconciles its associations. Tag ids present both before and
/// after are left untouched.
pub fn update_product<R>(
    repo: &R,
    product_id: i32,
    payload: UpdateProductPayload,
) -> ServiceResult<ProductMutationResponse>
where
    R: ProductWriter + ?Sized,
{
    let (updates, tag_ids) = payload
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_product(product_id, &updates)
        .map_err(ServiceError::from)?;

    match tag_ids {
        Some(ids) if !ids.is_empty() => {
            let sync = repo
                .sync_product_tags(product_id, &ids)
                .map_err(ServiceError::from)?;
            Ok(ProductMutationResponse::Tags(sync))
        }
        _ => Ok(ProductMutationResponse::Product(updated.into())),
    }
}

/// Removes a product; the returned count is zero when no row matched.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<usize>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)
}
