use safari_core::domain::review::ReviewId;
use safari_db::repositories::{ReviewRepository, SqlReviewRepository};
use serde_json::json;

use crate::commands::{not_found, open_database, prepare, store_failure, CommandResult, Failure};

/// Moderation step that makes a submitted review publicly visible.
pub fn run(review_id: &str) -> CommandResult {
    let (config, runtime) = match prepare("approve-review") {
        Ok(prepared) => prepared,
        Err(result) => return result,
    };

    let id = ReviewId(review_id.trim().to_string());
    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let approved =
            SqlReviewRepository::new(pool.clone()).approve(&id).await.map_err(store_failure)?;
        pool.close().await;

        if !approved {
            return Err(not_found(format!("review `{}` does not exist", id.0)));
        }
        Ok::<_, Failure>(())
    });

    match result {
        Ok(()) => CommandResult::success_with_data(
            "approve-review",
            format!("review `{}` approved", id.0),
            json!({ "review_id": id.0 }),
        ),
        Err(failure) => CommandResult::from_failure("approve-review", failure),
    }
}
