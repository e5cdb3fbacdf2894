//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Ministry Hub Seed Script ===");

    let outcome = seed_all(&pool).await;
    pool.close().await;
    outcome?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn seed_all(pool: &PgPool) -> anyhow::Result<()> {
    seed_ministries(pool).await?;
    seed_zones_and_sale_groups(pool).await?;
    seed_members(pool).await?;
    Ok(())
}

async fn seed_ministries(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ministries")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Ministries already exist ({count})");
        return Ok(());
    }

    let ministries = [
        ("Choir", "Music and worship", true),
        ("Ushering", "Welcome and seating", true),
        ("Youth", "Teens and young adults", true),
        ("Media", "Sound, video and streaming", true),
        ("Drama", "Seasonal productions", false),
    ];

    for (name, description, is_active) in ministries {
        sqlx::query("INSERT INTO ministries (name, description, is_active) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(description)
            .bind(is_active)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} ministries", ministries.len());
    Ok(())
}

async fn seed_zones_and_sale_groups(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM zones")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Zones already exist ({count})");
        return Ok(());
    }

    let zones = [
        ("North", vec![("Market Square", "Esther Bello"), ("Riverside", "Paul Ade")]),
        ("Central", vec![("Downtown", "Grace Okon")]),
        ("South", vec![]),
    ];

    let mut group_total = 0;
    for (zone_name, groups) in zones.iter() {
        let zone_id: Uuid = sqlx::query_scalar("INSERT INTO zones (name) VALUES ($1) RETURNING id")
            .bind(*zone_name)
            .fetch_one(pool)
            .await?;

        for &(group_name, leader) in groups {
            sqlx::query("INSERT INTO sale_groups (name, leader_name, zone_id) VALUES ($1, $2, $3)")
                .bind(group_name)
                .bind(leader)
                .bind(zone_id)
                .execute(pool)
                .await?;
            group_total += 1;
        }
    }

    println!(
        "[done] Created {} zones and {group_total} sale groups",
        zones.len()
    );
    Ok(())
}

async fn seed_members(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Members already exist ({count})");
        return Ok(());
    }

    let now = Utc::now();
    // (name, status, days since registration)
    let members = [
        ("Ada Obi", "ACTIVE", 3),
        ("Tunde Bakare", "ACTIVE", 12),
        ("Mary Eze", "ACTIVE", 45),
        ("John Musa", "ACTIVE", 200),
        ("Ruth Ibe", "PENDING", 1),
        ("Samuel Udo", "INACTIVE", 90),
    ];

    for (name, status, days_ago) in members {
        sqlx::query(
            "INSERT INTO members (full_name, status, created_at) VALUES ($1, $2::member_status, $3)",
        )
        .bind(name)
        .bind(status)
        .bind(now - Duration::days(days_ago))
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} members", members.len());
    Ok(())
}
