//! SYCEBNL chart seeder for ComptaEBNL.
//!
//! Bulk-loads the embedded SYCEBNL reference plan into the database. Safe
//! to re-run: this is the corrective re-import path, replacing the whole
//! plan in one transaction.
//!
//! Usage: cargo run --bin seeder

use compta_core::chart::{AccountClass, ChartOfAccounts, plan};
use compta_db::ChartRepository;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = compta_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let accounts = plan::reference_accounts();
    let chart = ChartOfAccounts::from_accounts(accounts.clone());
    let issues = chart.validate_consistency();
    assert!(
        issues.is_empty(),
        "embedded plan failed consistency check: {issues:?}"
    );

    println!("Importing SYCEBNL plan ({} accounts)...", accounts.len());
    let repo = ChartRepository::new(db);
    let imported = repo
        .replace_plan(&accounts)
        .await
        .expect("Failed to import the SYCEBNL plan");

    println!("Imported {imported} accounts:");
    for class in AccountClass::ALL {
        println!(
            "  classe {} - {}: {} comptes",
            class.digit(),
            class.label(),
            chart.accounts_in_class(class).len()
        );
    }

    println!("Seeding complete!");
}
