//! Database layer: entity structs and parameterized lookup queries over
//! the fixed continent/country/city/category/recommendation schema.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Continent {
    pub continent_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Country {
    pub country_id: i32,
    pub continent_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct City {
    pub city_id: i32,
    pub country_id: i32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
}

/// A city row annotated with its great-circle distance from the point the
/// user shared, as computed by [`find_nearest_cities`].
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct NearbyCity {
    pub city_id: i32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: f64,
}

/// A stored recommendation row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Recommendation {
    pub recommendation_id: i32,
    pub city_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub rating: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A recommendation joined with the names of its city and category, as
/// shown to the user.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RecommendationView {
    pub name: String,
    pub description: String,
    pub address: String,
    pub rating: f64,
    pub image_url: Option<String>,
    pub city_name: String,
    pub category_name: String,
}

/// Input for [`create_recommendation`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendation {
    pub city_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub rating: f64,
    pub image_url: Option<String>,
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS continents (
            continent_id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create continents table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS countries (
            country_id SERIAL PRIMARY KEY,
            continent_id INTEGER NOT NULL REFERENCES continents(continent_id),
            name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create countries table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS cities (
            city_id SERIAL PRIMARY KEY,
            country_id INTEGER NOT NULL REFERENCES countries(country_id),
            name TEXT NOT NULL,
            lat DOUBLE PRECISION NOT NULL,
            lng DOUBLE PRECISION NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create cities table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS categories (
            category_id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create categories table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS recommendations (
            recommendation_id SERIAL PRIMARY KEY,
            city_id INTEGER NOT NULL REFERENCES cities(city_id),
            category_id INTEGER NOT NULL REFERENCES categories(category_id),
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            address TEXT NOT NULL,
            rating DOUBLE PRECISION NOT NULL,
            image_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create recommendations table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// List all continents for the top level of the manual drill-down menu.
pub async fn list_continents(pool: &PgPool) -> Result<Vec<Continent>> {
    sqlx::query_as::<_, Continent>("SELECT continent_id, name FROM continents ORDER BY name")
        .fetch_all(pool)
        .await
        .context("Failed to list continents")
}

/// List the countries of a continent.
pub async fn list_countries(pool: &PgPool, continent_id: i32) -> Result<Vec<Country>> {
    sqlx::query_as::<_, Country>(
        "SELECT country_id, continent_id, name FROM countries
         WHERE continent_id = $1 ORDER BY name",
    )
    .bind(continent_id)
    .fetch_all(pool)
    .await
    .context("Failed to list countries")
}

/// List the cities of a country.
pub async fn list_cities(pool: &PgPool, country_id: i32) -> Result<Vec<City>> {
    sqlx::query_as::<_, City>(
        "SELECT city_id, country_id, name, lat, lng FROM cities
         WHERE country_id = $1 ORDER BY name",
    )
    .bind(country_id)
    .fetch_all(pool)
    .await
    .context("Failed to list cities")
}

/// List all recommendation categories.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT category_id, name FROM categories ORDER BY name")
        .fetch_all(pool)
        .await
        .context("Failed to list categories")
}

/// Find the cities closest to a point, ordered by haversine great-circle
/// distance computed in SQL (6371 km Earth radius). The acos argument is
/// clamped to [-1, 1]: Postgres raises on out-of-domain input, which a
/// rounding error would otherwise trigger for coordinates exactly on a city.
pub async fn find_nearest_cities(
    pool: &PgPool,
    lat: f64,
    lng: f64,
    limit: i64,
) -> Result<Vec<NearbyCity>> {
    debug!(lat, lng, limit, "Searching for nearest cities");

    sqlx::query_as::<_, NearbyCity>(
        "SELECT city_id, name, lat, lng,
                (6371.0 * acos(LEAST(1.0, GREATEST(-1.0,
                    cos(radians($1)) * cos(radians(lat))
                        * cos(radians(lng) - radians($2))
                    + sin(radians($1)) * sin(radians(lat)))))) AS distance_km
         FROM cities
         ORDER BY distance_km
         LIMIT $3",
    )
    .bind(lat)
    .bind(lng)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("Failed to find nearest cities")
}

/// Fetch the stored recommendations for a city/category pair, joined with
/// the city and category names, best rated first.
pub async fn find_recommendations(
    pool: &PgPool,
    city_id: i32,
    category_id: i32,
) -> Result<Vec<RecommendationView>> {
    debug!(city_id, category_id, "Fetching recommendations");

    sqlx::query_as::<_, RecommendationView>(
        "SELECT r.name, r.description, r.address, r.rating, r.image_url,
                ci.name AS city_name, ca.name AS category_name
         FROM recommendations r
         JOIN cities ci ON ci.city_id = r.city_id
         JOIN categories ca ON ca.category_id = r.category_id
         WHERE r.city_id = $1 AND r.category_id = $2
         ORDER BY r.rating DESC",
    )
    .bind(city_id)
    .bind(category_id)
    .fetch_all(pool)
    .await
    .context("Failed to fetch recommendations")
}

/// Insert a new recommendation and return its id.
pub async fn create_recommendation(pool: &PgPool, new: &NewRecommendation) -> Result<i32> {
    info!(
        city_id = new.city_id,
        category_id = new.category_id,
        name = %new.name,
        "Creating recommendation"
    );

    let (recommendation_id,): (i32,) = sqlx::query_as(
        "INSERT INTO recommendations
             (city_id, category_id, name, description, address, rating, image_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING recommendation_id",
    )
    .bind(new.city_id)
    .bind(new.category_id)
    .bind(&new.name)
    .bind(&new.description)
    .bind(&new.address)
    .bind(new.rating)
    .bind(&new.image_url)
    .fetch_one(pool)
    .await
    .context("Failed to insert recommendation")?;

    info!(recommendation_id, "Recommendation created");
    Ok(recommendation_id)
}

/// Read a recommendation row by id.
pub async fn read_recommendation(
    pool: &PgPool,
    recommendation_id: i32,
) -> Result<Option<Recommendation>> {
    sqlx::query_as::<_, Recommendation>(
        "SELECT recommendation_id, city_id, category_id, name, description,
                address, rating, image_url, created_at
         FROM recommendations
         WHERE recommendation_id = $1",
    )
    .bind(recommendation_id)
    .fetch_optional(pool)
    .await
    .context("Failed to read recommendation")
}
