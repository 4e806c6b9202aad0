use sqlx::Row;

use safari_core::domain::package::{Package, PackageId};

use super::{decode_error, parse_decimal, PackageRepository, RepositoryError};
use crate::DbPool;

const PACKAGE_COLUMNS: &str = "id, slug, name, location, category, description, duration,
     price_resident, price_non_resident, rating, highlights_json, active";

pub struct SqlPackageRepository {
    pool: DbPool,
}

impl SqlPackageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_package(row: &sqlx::sqlite::SqliteRow) -> Result<Package, RepositoryError> {
    let id: String = row.try_get("id").map_err(decode_error)?;
    let slug: String = row.try_get("slug").map_err(decode_error)?;
    let name: String = row.try_get("name").map_err(decode_error)?;
    let location: String = row.try_get("location").map_err(decode_error)?;
    let category: Option<String> = row.try_get("category").map_err(decode_error)?;
    let description: Option<String> = row.try_get("description").map_err(decode_error)?;
    let duration: Option<String> = row.try_get("duration").map_err(decode_error)?;
    let price_resident: String = row.try_get("price_resident").map_err(decode_error)?;
    let price_non_resident: String = row.try_get("price_non_resident").map_err(decode_error)?;
    let rating: Option<String> = row.try_get("rating").map_err(decode_error)?;
    let highlights_json: String = row.try_get("highlights_json").map_err(decode_error)?;
    let active: i64 = row.try_get("active").map_err(decode_error)?;

    let highlights: Vec<String> = serde_json::from_str(&highlights_json)
        .map_err(|error| RepositoryError::Decode(format!("highlights_json for `{slug}`: {error}")))?;

    Ok(Package {
        id: PackageId(id),
        price_resident: parse_decimal("price_resident", &price_resident)?,
        price_non_resident: parse_decimal("price_non_resident", &price_non_resident)?,
        rating: rating.as_deref().map(|raw| parse_decimal("rating", raw)).transpose()?,
        slug,
        name,
        location,
        category,
        description,
        duration,
        highlights,
        active: active != 0,
    })
}

#[async_trait::async_trait]
impl PackageRepository for SqlPackageRepository {
    async fn list_active(&self) -> Result<Vec<Package>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE active = 1 ORDER BY sort_order ASC, slug ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_package).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Package>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE slug = ?"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_package).transpose()
    }

    /// New packages go to the end of the catalog; updates keep their position.
    async fn save(&self, package: Package) -> Result<(), RepositoryError> {
        let highlights_json = serde_json::to_string(&package.highlights).map_err(decode_error)?;

        sqlx::query(
            "INSERT INTO packages (id, slug, name, location, category, description, duration,
                                   price_resident, price_non_resident, rating, highlights_json,
                                   active, sort_order)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                     (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM packages))
             ON CONFLICT(id) DO UPDATE SET
                 slug = excluded.slug,
                 name = excluded.name,
                 location = excluded.location,
                 category = excluded.category,
                 description = excluded.description,
                 duration = excluded.duration,
                 price_resident = excluded.price_resident,
                 price_non_resident = excluded.price_non_resident,
                 rating = excluded.rating,
                 highlights_json = excluded.highlights_json,
                 active = excluded.active",
        )
        .bind(&package.id.0)
        .bind(&package.slug)
        .bind(&package.name)
        .bind(&package.location)
        .bind(&package.category)
        .bind(&package.description)
        .bind(&package.duration)
        .bind(package.price_resident.to_string())
        .bind(package.price_non_resident.to_string())
        .bind(package.rating.map(|rating| rating.to_string()))
        .bind(highlights_json)
        .bind(i64::from(package.active))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
