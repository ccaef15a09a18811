//! # Seed Data Generator
//!
//! Populates the database with a demo fleet and a demo renter for development.
//!
//! ## Usage
//! ```bash
//! # Use RENTAL_DATABASE_PATH (default ./rental.db)
//! cargo run -p rental-db --bin seed
//!
//! # Specify database path
//! cargo run -p rental-db --bin seed -- --db ./data/rental.db
//! ```
//!
//! ## Generated Data
//! - One car per (brand, model) below, each Available
//! - Daily rates between $29.00 and $149.00
//! - A demo user: `demo@rental.local` / `demo-password`

use std::env;

use rental_core::{Money, NewCar, NewUser};
use rental_db::{init_tracing, Database, DbConfig, DbError};
use tracing::{info, warn};

/// (brand, model, daily rate in cents)
const FLEET: &[(&str, &str, i64)] = &[
    ("Toyota", "Corolla", 4500),
    ("Toyota", "Yaris", 2900),
    ("Toyota", "RAV4", 6900),
    ("Honda", "Civic", 4700),
    ("Honda", "CR-V", 7200),
    ("Ford", "Focus", 3900),
    ("Ford", "Mustang", 11900),
    ("Volkswagen", "Golf", 4900),
    ("Volkswagen", "Passat", 5900),
    ("BMW", "3 Series", 9900),
    ("BMW", "X5", 14900),
    ("Tesla", "Model 3", 10900),
];

const DEMO_EMAIL: &str = "demo@rental.local";
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = DbConfig::from_env()?;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Car Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $RENTAL_DATABASE_PATH or ./rental.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %config.database_path.display(), "Seeding database");
    let db = Database::new(config).await?;

    let existing = db.cars().count().await?;
    if existing > 0 {
        info!(cars = existing, "Database already has cars, skipping seed");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut inserted = 0;

    for (brand, model_name, cents) in FLEET {
        let car = NewCar {
            brand: brand.to_string(),
            model_name: model_name.to_string(),
            price_per_day: Money::from_cents(*cents),
        };

        match db.cars().insert(&car).await {
            Ok(_) => inserted += 1,
            Err(e) => warn!(brand, model = model_name, error = %e, "Failed to insert car"),
        }
    }

    let demo = NewUser {
        full_name: "Demo Renter".to_string(),
        email: DEMO_EMAIL.to_string(),
        password: DEMO_PASSWORD.to_string(),
        license_no: "DEMO-0001".to_string(),
    };

    match db.users().create(&demo).await {
        Ok(user) => info!(user_id = %user.id, email = DEMO_EMAIL, "Created demo user"),
        Err(DbError::UniqueViolation { .. }) => info!(email = DEMO_EMAIL, "Demo user already exists"),
        Err(e) => return Err(e.into()),
    }

    let available = db.cars().list_available().await?;
    info!(
        inserted,
        available = available.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}
