use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Canonical catalog entries the seed must produce.
const SEED_PACKAGES: &[PackageSeedContract] = &[
    PackageSeedContract {
        id: "pkg-mara-classic",
        slug: "maasai-mara-classic",
        location: "Maasai Mara",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-amboseli-elephants",
        slug: "amboseli-elephant-trails",
        location: "Amboseli",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-diani-escape",
        slug: "diani-beach-escape",
        location: "Diani Beach",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-mount-kenya-trek",
        slug: "mount-kenya-summit-trek",
        location: "Mount Kenya",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-nakuru-naivasha",
        slug: "lake-nakuru-naivasha",
        location: "Lake Nakuru",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-samburu-culture",
        slug: "samburu-cultural-safari",
        location: "Samburu",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-lamu-heritage",
        slug: "lamu-heritage-retreat",
        location: "Lamu",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-mara-balloon",
        slug: "maasai-mara-luxury-balloon",
        location: "Maasai Mara",
        active: true,
    },
    PackageSeedContract {
        id: "pkg-tsavo-explorer",
        slug: "tsavo-east-explorer",
        location: "Tsavo East",
        active: false,
    },
];

#[derive(Debug, Clone, Copy)]
struct PackageSeedContract {
    id: &'static str,
    slug: &'static str,
    location: &'static str,
    active: bool,
}

/// Deterministic Kenyan package catalog for local development and demos.
pub struct CatalogSeed;

impl CatalogSeed {
    pub const SQL: &str = include_str!("../../../config/fixtures/catalog_seed.sql");

    /// Idempotent: rows that already exist are left untouched.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let before: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM packages").fetch_one(pool).await?;

        let mut tx = pool.begin().await?;
        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let after: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM packages").fetch_one(pool).await?;

        let packages = SEED_PACKAGES
            .iter()
            .map(|seed| PackageSeedInfo { id: seed.id, slug: seed.slug, location: seed.location })
            .collect();

        Ok(SeedResult { packages, inserted: u64::try_from(after - before).unwrap_or(0) })
    }

    /// Checks that every seeded package is present with its expected slug and
    /// active flag.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::with_capacity(SEED_PACKAGES.len());

        for seed in SEED_PACKAGES {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM packages WHERE id = ?1 AND slug = ?2 AND active = ?3)",
            )
            .bind(seed.id)
            .bind(seed.slug)
            .bind(i64::from(seed.active))
            .fetch_one(pool)
            .await?;
            checks.push((seed.slug, present == 1));
        }

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }

    pub fn slugs() -> impl Iterator<Item = &'static str> {
        SEED_PACKAGES.iter().map(|seed| seed.slug)
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub packages: Vec<PackageSeedInfo>,
    /// Rows newly written by this load; zero on a repeat run.
    pub inserted: u64,
}

#[derive(Debug)]
pub struct PackageSeedInfo {
    pub id: &'static str,
    pub slug: &'static str,
    pub location: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
