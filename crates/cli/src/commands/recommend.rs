use anyhow::{bail, Context};
use clap::Args;
use safari_core::domain::quiz::QuizAnswer;
use safari_core::recommend::{QuizRecommender, RecommendationEngine};
use safari_db::repositories::{PackageRepository, SqlPackageRepository};
use serde_json::json;

use crate::commands::{open_database, prepare, store_failure, CommandResult, Failure};

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    /// `QUESTION=OPTION[,OPTION...]`, e.g. `1=relaxation` or `3=big-five,migration`
    #[arg(long = "answer", value_parser = parse_answer)]
    pub answers: Vec<QuizAnswer>,
}

pub fn parse_answer(raw: &str) -> anyhow::Result<QuizAnswer> {
    let Some((question, options)) = raw.split_once('=') else {
        bail!("answer `{raw}` must look like QUESTION=OPTION[,OPTION...]");
    };
    let question_id = question
        .trim()
        .parse::<u32>()
        .with_context(|| format!("question id `{}` is not a number", question.trim()))?;
    let selected_option_ids = options
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    Ok(QuizAnswer { question_id, selected_option_ids })
}

pub fn run(args: RecommendArgs) -> CommandResult {
    let (config, runtime) = match prepare("recommend") {
        Ok(prepared) => prepared,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let catalog =
            SqlPackageRepository::new(pool.clone()).list_active().await.map_err(store_failure)?;
        pool.close().await;
        Ok::<_, Failure>(catalog)
    });

    let catalog = match result {
        Ok(catalog) => catalog,
        Err(failure) => return CommandResult::from_failure("recommend", failure),
    };

    let recommendation = QuizRecommender::default()
        .with_max_results(config.recommendations.max_results)
        .recommend(&args.answers, &catalog);
    let matches = recommendation
        .matches
        .iter()
        .map(|scored| {
            json!({
                "slug": scored.package.slug,
                "name": scored.package.name,
                "score": scored.score,
            })
        })
        .collect::<Vec<_>>();

    CommandResult::success_with_data(
        "recommend",
        format!("{} {}", recommendation.personality.emoji, recommendation.personality.title),
        json!({ "personality": recommendation.personality, "matches": matches }),
    )
}

#[cfg(test)]
mod tests {
    use super::parse_answer;

    #[test]
    fn answers_parse_multi_select_options() {
        let answer = parse_answer("3=big-five, migration").expect("valid answer");
        assert_eq!(answer.question_id, 3);
        assert_eq!(answer.selected_option_ids, vec!["big-five", "migration"]);
    }

    #[test]
    fn malformed_answers_are_rejected() {
        assert!(parse_answer("relaxation").is_err());
        assert!(parse_answer("one=relaxation").is_err());
    }
}
