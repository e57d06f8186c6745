use catalog_api::domain::category::NewCategory;
use catalog_api::domain::tag::NewTag;
use catalog_api::repository::errors::RepositoryError;
use catalog_api::repository::{
    CategoryReader, CategoryWriter, DieselRepository, TagReader, TagWriter,
};

mod common;

#[test]
fn test_tag_repository_crud() {
    let test_db = common::TestDb::new("test_tag_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let seasonal = repo.create_tag(&NewTag::new("Seasonal")).unwrap();
    let clearance = repo.create_tag(&NewTag::new("Clearance")).unwrap();

    let tags = repo.list_tags().unwrap();
    assert_eq!(tags.len(), 2);
    // name order
    assert_eq!(tags[0].id, clearance.id);
    assert_eq!(tags[1].id, seasonal.id);

    repo.delete_tag(seasonal.id).unwrap();
    let err = repo
        .delete_tag(seasonal.id)
        .expect_err("expected repeated delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    assert_eq!(repo.list_tags().unwrap().len(), 1);
}

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new("test_category_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let outdoor = repo.create_category(&NewCategory::new("Outdoor")).unwrap();
    repo.create_category(&NewCategory::new("Footwear")).unwrap();

    let categories = repo.list_categories().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Footwear");

    repo.delete_category(outdoor.id).unwrap();
    let err = repo
        .delete_category(outdoor.id)
        .expect_err("expected repeated delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}
