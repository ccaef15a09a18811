//! Fixtures shared by the repository tests.

use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

use crate::config::DbConfig;
use crate::pool::Database;
use rental_core::{Car, Money, NewCar, NewUser, User};

/// Fresh migrated in-memory database.
pub(crate) async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Migrated database in a throwaway file, so several pool connections see
/// the same data. Remove it with [`remove_db_files`].
pub(crate) async fn file_db(max_connections: u32) -> (Database, PathBuf) {
    let path = temp_db_path();
    let config = DbConfig::new(&path)
        .max_connections(max_connections)
        .min_connections(1)
        .busy_timeout(Duration::from_secs(5))
        .transaction_timeout(Duration::from_secs(10));

    let db = Database::new(config).await.expect("file database");
    (db, path)
}

pub(crate) fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("rental-test-{}.db", Uuid::new_v4()))
}

pub(crate) async fn remove_db_files(db: Database, path: PathBuf) {
    db.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(file));
    }
}

pub(crate) fn new_car(brand: &str, model: &str, cents: i64) -> NewCar {
    NewCar {
        brand: brand.to_string(),
        model_name: model.to_string(),
        price_per_day: Money::from_cents(cents),
    }
}

pub(crate) fn new_user(full_name: &str, email: &str) -> NewUser {
    NewUser {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
        license_no: "DL-123456".to_string(),
    }
}

/// Inserts one car and one user, the minimum a booking needs.
pub(crate) async fn seed_car_and_user(db: &Database, cents: i64) -> (Car, User) {
    let car = db
        .cars()
        .insert(&new_car("Toyota", "Corolla", cents))
        .await
        .expect("insert car");
    let user = db
        .users()
        .create(&new_user("Ada Lovelace", "ada@example.com"))
        .await
        .expect("create user");
    (car, user)
}
