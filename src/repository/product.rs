use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::Category as DomainCategory;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::product_tag::{
    NewProductTag as DomainNewProductTag, ProductTag as DomainProductTag, TagSync, reconcile,
};
use crate::domain::tag::Tag as DomainTag;
use crate::models::category::Category as DbCategory;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::product_tag::{NewProductTag as DbNewProductTag, ProductTag as DbProductTag};
use crate::models::tag::Tag as DbTag;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, product_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(product_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let Some(db_product) = product else {
            return Ok(None);
        };

        let mut domain: DomainProduct = db_product.into();
        let mut tag_map = load_tags_for_products(&mut conn, &[domain.id])?;
        domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
        if let Some(category_id) = domain.category_id {
            let mut categories = load_categories(&mut conn, &[category_id])?;
            domain.category = categories.remove(&category_id);
        }

        Ok(Some(domain))
    }

    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let db_products = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let category_ids: Vec<i32> = db_products
            .iter()
            .filter_map(|product| product.category_id)
            .collect();

        let mut tag_map = load_tags_for_products(&mut conn, &product_ids)?;
        let mut category_map = load_categories(&mut conn, &category_ids)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            let mut domain: DomainProduct = db_product.into();
            domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
            domain.category = domain
                .category_id
                .and_then(|category_id| category_map.remove(&category_id));
            domain_products.push(domain);
        }

        Ok(domain_products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        let mut domain: DomainProduct = created.into();
        if let Some(category_id) = domain.category_id {
            let mut categories = load_categories(&mut conn, &[category_id])?;
            domain.category = categories.remove(&category_id);
        }

        Ok(domain)
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table.filter(products::id.eq(product_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        let mut domain: DomainProduct = updated.into();
        let mut tag_map = load_tags_for_products(&mut conn, &[domain.id])?;
        domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
        if let Some(category_id) = domain.category_id {
            let mut categories = load_categories(&mut conn, &[category_id])?;
            domain.category = categories.remove(&category_id);
        }

        Ok(domain)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let target = products::table.filter(products::id.eq(product_id));
        let deleted = diesel::delete(target).execute(&mut conn)?;

        Ok(deleted)
    }

    fn sync_product_tags(&self, product_id: i32, tag_ids: &[i32]) -> RepositoryResult<TagSync> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        conn.transaction::<TagSync, RepositoryError, _>(|conn| {
            ensure_product_exists(conn, product_id)?;

            let existing: Vec<DomainProductTag> = product_tags::table
                .filter(product_tags::product_id.eq(product_id))
                .load::<DbProductTag>(conn)?
                .into_iter()
                .map(DomainProductTag::from)
                .collect();

            let plan = reconcile(&existing, tag_ids);

            if !plan.detach.is_empty() {
                diesel::delete(product_tags::table.filter(product_tags::id.eq_any(&plan.detach)))
                    .execute(conn)?;
            }

            let mut attached = Vec::new();
            if !plan.attach.is_empty() {
                let links: Vec<DomainNewProductTag> = plan
                    .attach
                    .iter()
                    .map(|&tag_id| DomainNewProductTag::new(product_id, tag_id))
                    .collect();
                let rows: Vec<DbNewProductTag> = links.iter().map(DbNewProductTag::from).collect();

                diesel::insert_into(product_tags::table)
                    .values(&rows)
                    .execute(conn)?;

                attached = product_tags::table
                    .filter(product_tags::product_id.eq(product_id))
                    .filter(product_tags::tag_id.eq_any(&plan.attach))
                    .order(product_tags::id.asc())
                    .load::<DbProductTag>(conn)?
                    .into_iter()
                    .map(DomainProductTag::from)
                    .collect();
            }

            Ok(TagSync {
                product_id,
                attached,
                detached: plan.detach.len(),
            })
        })
    }
}

fn ensure_product_exists(conn: &mut SqliteConnection, product_id: i32) -> RepositoryResult<()> {
    use crate::schema::products;

    let found = select(exists(
        products::table.filter(products::id.eq(product_id)),
    ))
    .get_result(conn)?;

    if found {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

fn load_tags_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{product_tags, tags};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(product_ids))
        .order((product_tags::product_id.asc(), product_tags::id.asc()))
        .select((product_tags::product_id, DbTag::as_select()))
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (product_id, tag) in rows {
        map.entry(product_id).or_default().push(tag.into());
    }

    Ok(map)
}

fn load_categories(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, DomainCategory>> {
    use crate::schema::categories;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = categories::table
        .filter(categories::id.eq_any(category_ids))
        .load::<DbCategory>(conn)?;

    Ok(rows
        .into_iter()
        .map(|category| (category.id, category.into()))
        .collect())
}
