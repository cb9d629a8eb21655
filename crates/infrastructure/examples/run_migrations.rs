use sea_orm_migration::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenv::dotenv().ok();

    let database_url = env::var("DATABASE_URL")?;

    println!("Connecting to database...");
    let connection = infrastructure::database::connect(&database_url, 1).await?;

    let reset = env::args().any(|arg| arg == "--reset");
    if reset {
        println!("Dropping inventory tables...");
        migration::Migrator::reset(&connection).await?;
    }

    println!("Running migrations...");
    migration::Migrator::up(&connection, None).await?;

    println!("✅ Migrations applied successfully.");

    Ok(())
}
