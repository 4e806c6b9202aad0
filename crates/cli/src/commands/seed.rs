use safari_db::CatalogSeed;
use serde_json::json;

use crate::commands::{open_database, prepare, CommandResult, Failure, EXIT_EXECUTION, EXIT_INVALID};

pub fn run() -> CommandResult {
    let (config, runtime) = match prepare("seed") {
        Ok(prepared) => prepared,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;

        let seed_result = CatalogSeed::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), EXIT_EXECUTION))?;
        let verification = CatalogSeed::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), EXIT_INVALID))?;
        pool.close().await;

        if !verification.all_present {
            let message = verification_message(&verification.checks);
            return Err(("seed_verification", message, EXIT_INVALID));
        }
        Ok::<_, Failure>(seed_result)
    });

    match result {
        Ok(seed_result) => {
            let slugs = seed_result.packages.iter().map(|package| package.slug).collect::<Vec<_>>();
            CommandResult::success_with_data(
                "seed",
                format!("catalog seed loaded: {} packages", slugs.len()),
                json!({ "inserted": seed_result.inserted, "packages": slugs }),
            )
        }
        Err(failure) => CommandResult::from_failure("seed", failure),
    }
}

fn verification_message(checks: &[(&str, bool)]) -> String {
    let failed_checks =
        checks.iter().filter_map(|(check, passed)| (!passed).then_some(*check)).collect::<Vec<_>>();

    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for packages: {}", failed_checks.join(", "))
    }
}
