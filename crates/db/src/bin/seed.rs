//! One-off catalog seeder.
//!
//! Usage: `seed [DATABASE_URL]`. The connection string comes from the
//! first argument, falling back to the `DATABASE_URL` environment variable.
//! Runs migrations, then inserts a sample catalog of animes, categories,
//! and items.

use anyhow::{Context, Result};

use animart_db::models::anime::CreateAnime;
use animart_db::models::category::CreateCategory;
use animart_db::models::item::CreateItem;
use animart_db::repositories::{AnimeRepo, CategoryRepo, ItemRepo};
use animart_db::DbPool;

const ONE_PIECE_SUMMARY: &str = "One Piece is a Japanese manga series that follows the adventures of Monkey D. Luffy and his crew, the Straw Hat Pirates, where he explores the Grand Line in search of the mythical treasure known as the 'One Piece' in order to become the next King of the Pirates.";
const JUJUTSU_KAISEN_SUMMARY: &str = "Jujutsu Kaisen follows high school student Yuji Itadori as he joins a secret organization of Jujutsu Sorcerers to eliminate a powerful Curse named Ryomen Sukuna, of whom Yuji becomes the host";
const SPY_FAMILY_SUMMARY: &str = "Spy x Family follows a spy who has to build a cover family to execute a mission, not realizing that the girl he adopts as his daughter is a telepath, and the woman he agrees to be in a marriage with is a skilled assassin.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .context("pass the database URL as the first argument or set DATABASE_URL")?;

    let pool = animart_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    animart_db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let animes = seed_animes(&pool).await?;
    let categories = seed_categories(&pool).await?;
    seed_items(&pool, &animes, &categories).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_animes(pool: &DbPool) -> Result<Vec<i64>> {
    let entries = [
        ("One Piece", ONE_PIECE_SUMMARY),
        ("Jujutsu Kaisen", JUJUTSU_KAISEN_SUMMARY),
        ("Spy x Family", SPY_FAMILY_SUMMARY),
    ];

    let mut ids = Vec::with_capacity(entries.len());
    for (name, summary) in entries {
        let anime = AnimeRepo::create(
            pool,
            &CreateAnime {
                name: name.to_string(),
                summary: summary.to_string(),
            },
        )
        .await?;
        tracing::info!(name, "Added anime");
        ids.push(anime.id);
    }
    Ok(ids)
}

async fn seed_categories(pool: &DbPool) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for name in ["Cases", "Figurines", "Clothes"] {
        let category = CategoryRepo::create(
            pool,
            &CreateCategory {
                name: name.to_string(),
            },
        )
        .await?;
        tracing::info!(name, "Added category");
        ids.push(category.id);
    }
    Ok(ids)
}

async fn seed_items(pool: &DbPool, animes: &[i64], categories: &[i64]) -> Result<()> {
    // (name, description, price, inventory, anime index, category index)
    let entries: [(&str, &str, f64, i64, usize, usize); 12] = [
        (
            "16cm Roronoa Zoro Action Figure",
            "Zoro is the first mate and swordsman of the Straw Hat Pirates and one of the main protagonists of the One Piece series.  Materials: Prime quality PVC",
            69.00, 12, 0, 1,
        ),
        (
            "One Piece Hoodie Luffy Cute Pullover Oversized Hoodie",
            "Comfy oversized sweater that comes in a variety of colors",
            49.95, 10, 0, 2,
        ),
        (
            "One Piece Socks",
            "One Piece Socks: Black Socks One Piece Logo",
            18.00, 19, 0, 2,
        ),
        (
            "One Piece Luffy Gear 5th Figure",
            "First Edition One Piece Luffy Gear 5th Figure, 20 cm high quality with box",
            99.00, 5, 0, 1,
        ),
        (
            "Chopper AirPod Pro Case",
            "Smiling Chopper official merch",
            35.99, 5, 0, 0,
        ),
        (
            "Luffy AirPod Pro Case",
            "Smiling Luffy official merch",
            35.99, 13, 0, 0,
        ),
        (
            "Gojo Satoru Action Figure",
            "ACG Character: Gojo Satoru about 17- 20cm",
            57.65, 6, 1, 1,
        ),
        (
            "Jujutsu Kaisen Hoodie",
            "Jujutsu Kaisen Hoodie - Gojo Satoru",
            49.90, 19, 1, 2,
        ),
        (
            "Gojo Satoru T-shirt",
            "A fashionable and colorful item of clothing honoring Gojo Satoru",
            49.00, 14, 1, 2,
        ),
        (
            "Anya Meme Colorful Long Sleeve Pullover Hoodie",
            "Heavyweight 8.25 oz. (~280 gsm) cotton-rich fleece",
            40.99, 9, 2, 2,
        ),
        (
            "Demon Anya Forger Peanut Breathing T-Shirt",
            "The usual, conventional t-shirt for everyday wear. Traditional boxy fit.",
            25.00, 19, 2, 2,
        ),
        (
            "Anya Forger Heh Heh Spy Family Cute Soft Case",
            "Sturdy versatile case that grips across the edges of your cellphone. Shock absorbent TPU case with anti-fingerprint end",
            16.00, 23, 2, 2,
        ),
    ];

    for (name, description, price, inventory, anime_idx, category_idx) in entries {
        ItemRepo::create(
            pool,
            &CreateItem {
                name: name.to_string(),
                description: description.to_string(),
                price,
                inventory,
                anime_id: animes[anime_idx],
                category_ids: vec![categories[category_idx]],
            },
        )
        .await?;
        tracing::info!(name, "Added item");
    }
    Ok(())
}
