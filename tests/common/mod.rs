//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use catalog_api::db::{DbPool, establish_connection_pool};
use catalog_api::domain::category::NewCategory;
use catalog_api::domain::tag::NewTag;
use catalog_api::repository::{CategoryWriter, DieselRepository, TagWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

/// Seed `count` tags and return their generated ids.
#[allow(dead_code)]
pub fn seed_tags(repo: &DieselRepository, count: usize) -> Vec<i32> {
    (0..count)
        .map(|idx| {
            repo.create_tag(&NewTag::new(format!("tag-{idx}")))
                .expect("create tag")
                .id
        })
        .collect()
}

/// Seed one category and return its generated id.
#[allow(dead_code)]
pub fn seed_category(repo: &DieselRepository, name: &str) -> i32 {
    repo.create_category(&NewCategory::new(name))
        .expect("create category")
        .id
}
