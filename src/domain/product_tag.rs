use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation linking a product to a tag record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductTag {
    /// Unique identifier of the product-tag association.
    pub id: i32,
    /// Identifier of the product the tag is attached to.
    pub product_id: i32,
    /// Identifier of the referenced tag record.
    pub tag_id: i32,
    /// Timestamp for when the association was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the association.
    pub updated_at: NaiveDateTime,
}

/// Payload required to associate an existing tag with a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NewProductTag {
    /// Identifier of the product receiving the tag.
    pub product_id: i32,
    /// Identifier of the tag being attached to the product.
    pub tag_id: i32,
}

impl NewProductTag {
    /// Construct a new association payload between a product and a tag.
    pub fn new(product_id: i32, tag_id: i32) -> Self {
        Self { product_id, tag_id }
    }
}

/// Plan computed by [`reconcile`]: tag ids to attach and association row ids
/// to detach so that the stored set matches the requested set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Tag ids that need a new association row, in request order.
    pub attach: Vec<i32>,
    /// Ids of association rows whose tag is no longer requested.
    pub detach: Vec<i32>,
}

impl TagDiff {
    /// Whether the plan changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Outcome of applying a [`TagDiff`] against the store.
#[derive(Debug, Clone, Serialize)]
pub struct TagSync {
    /// Identifier of the product whose associations were reconciled.
    pub product_id: i32,
    /// Association rows created by the sync.
    pub attached: Vec<ProductTag>,
    /// Number of association rows removed by the sync.
    pub detached: usize,
}

/// Compute the strict symmetric-difference plan between the `existing`
/// association rows of a product and the `requested` tag-id set.
///
/// Tag ids present on both sides are left untouched: they appear in neither
/// `attach` nor `detach`, so applying the same request twice yields an empty
/// plan the second time. Duplicate requested ids collapse to one attachment.
pub fn reconcile(existing: &[ProductTag], requested: &[i32]) -> TagDiff {
    let existing_ids: HashSet<i32> = existing.iter().map(|link| link.tag_id).collect();
    let requested_ids: HashSet<i32> = requested.iter().copied().collect();

    let mut seen = HashSet::new();
    let attach = requested
        .iter()
        .copied()
        .filter(|tag_id| !existing_ids.contains(tag_id) && seen.insert(*tag_id))
        .collect();

    let detach = existing
        .iter()
        .filter(|link| !requested_ids.contains(&link.tag_id))
        .map(|link| link.id)
        .collect();

    TagDiff { attach, detach }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn link(id: i32, product_id: i32, tag_id: i32) -> ProductTag {
        ProductTag {
            id,
            product_id,
            tag_id,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    #[test]
    fn reconcile_attaches_everything_when_no_rows_exist() {
        let plan = reconcile(&[], &[1, 2, 3]);

        assert_eq!(plan.attach, vec![1, 2, 3]);
        assert!(plan.detach.is_empty());
    }

    #[test]
    fn reconcile_leaves_shared_ids_untouched() {
        let existing = vec![link(10, 5, 1), link(11, 5, 2), link(12, 5, 3)];

        let plan = reconcile(&existing, &[2, 3, 4]);

        // tag 1 goes (row 10), tag 4 comes, tags 2 and 3 appear on neither side
        assert_eq!(plan.attach, vec![4]);
        assert_eq!(plan.detach, vec![10]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let existing = vec![link(20, 7, 2), link(21, 7, 3), link(22, 7, 4)];

        let plan = reconcile(&existing, &[2, 3, 4]);

        assert!(plan.is_empty());
    }

    #[test]
    fn reconcile_detaches_everything_for_disjoint_request() {
        let existing = vec![link(1, 9, 5), link(2, 9, 6)];

        let plan = reconcile(&existing, &[7]);

        assert_eq!(plan.attach, vec![7]);
        assert_eq!(plan.detach, vec![1, 2]);
    }

    #[test]
    fn reconcile_collapses_duplicate_requested_ids() {
        let plan = reconcile(&[], &[3, 3, 4, 3]);

        assert_eq!(plan.attach, vec![3, 4]);
    }
}
