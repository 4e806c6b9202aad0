//! Keyword-tag scoring of packages against quiz answers

use serde::{Deserialize, Serialize};

use crate::domain::package::Package;
use crate::domain::quiz::{QuizAnswer, QuizQuestion};

/// A package with the number of quiz tags its text matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPackage {
    pub package: Package,
    pub score: u32,
}

/// Flattens the tags of every selected option into one lower-cased list.
///
/// Duplicates are kept, so a tag chosen in two answers counts twice. Unknown
/// question or option ids contribute nothing.
pub fn collect_tags(quiz: &[QuizQuestion], answers: &[QuizAnswer]) -> Vec<String> {
    let mut tags = Vec::new();
    for answer in answers {
        let Some(question) = quiz.iter().find(|question| question.id == answer.question_id) else {
            continue;
        };

        for option_id in &answer.selected_option_ids {
            if let Some(option) = question.option(option_id) {
                tags.extend(option.tags.iter().map(|tag| tag.to_lowercase()));
            }
        }
    }
    tags
}

/// Number of tag occurrences found in the package's search text.
pub fn score_package(tags: &[String], package: &Package) -> u32 {
    let text = package.search_text();
    let matches = tags.iter().filter(|tag| text.contains(&tag.to_lowercase())).count();
    u32::try_from(matches).unwrap_or(u32::MAX)
}

/// Ranks the catalog by score, highest first, and keeps the first `limit`.
///
/// The sort is stable: equal scores keep catalog order, and a catalog with no
/// matches still yields its first `limit` packages.
pub fn score_packages(tags: &[String], packages: &[Package], limit: usize) -> Vec<ScoredPackage> {
    let mut scored = packages
        .iter()
        .map(|package| ScoredPackage { package: package.clone(), score: score_package(tags, package) })
        .collect::<Vec<_>>();

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{collect_tags, score_package, score_packages};
    use crate::domain::package::{Package, PackageId};
    use crate::domain::quiz::{QuizAnswer, QuizOption, QuizQuestion};

    fn package(slug: &str, name: &str, location: &str, description: &str) -> Package {
        Package {
            id: PackageId(format!("pkg-{slug}")),
            slug: slug.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            category: None,
            description: Some(description.to_string()),
            duration: None,
            price_resident: Decimal::from(20_000),
            price_non_resident: Decimal::from(250),
            rating: None,
            highlights: Vec::new(),
            active: true,
        }
    }

    fn catalog() -> Vec<Package> {
        vec![
            package("diani", "Diani Beach Escape", "Diani", "White sand and coral reefs"),
            package("amboseli", "Amboseli Elephants", "Amboseli", "Herds beneath Kilimanjaro"),
            package("mara", "Maasai Mara Safari", "Maasai Mara", "Watch the great migration"),
            package("naivasha", "Lake Naivasha Retreat", "Naivasha", "Boat rides and hippos"),
            package("kenya", "Mount Kenya Trek", "Mount Kenya", "Summit Point Lenana"),
        ]
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_lowercase()).collect()
    }

    fn slugs(scored: &[super::ScoredPackage]) -> Vec<&str> {
        scored.iter().map(|entry| entry.package.slug.as_str()).collect()
    }

    #[test]
    fn single_strong_match_ranks_first_and_zero_scores_keep_catalog_order() {
        let ranked = score_packages(&tags(&["migration", "Maasai Mara"]), &catalog(), 3);

        assert_eq!(slugs(&ranked), vec!["mara", "diani", "amboseli"]);
        assert_eq!(ranked[0].score, 2);
        assert_eq!(ranked[1].score, 0);
        assert_eq!(ranked[2].score, 0);
    }

    #[test]
    fn no_matches_still_returns_first_three() {
        let ranked = score_packages(&tags(&["snowboarding"]), &catalog(), 3);

        assert_eq!(slugs(&ranked), vec!["diani", "amboseli", "mara"]);
        assert!(ranked.iter().all(|entry| entry.score == 0));
    }

    #[test]
    fn result_length_is_min_of_limit_and_catalog() {
        let two = &catalog()[..2];
        assert_eq!(score_packages(&tags(&["beach"]), two, 3).len(), 2);
        assert!(score_packages(&tags(&["beach"]), &[], 3).is_empty());
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let ranked = score_packages(&tags(&["lake", "beach"]), &catalog(), 3);

        assert_eq!(slugs(&ranked), vec!["diani", "naivasha", "amboseli"]);
    }

    #[test]
    fn repeated_tags_count_each_occurrence() {
        let mara = &catalog()[2];
        assert_eq!(score_package(&tags(&["mara", "mara", "beach"]), mara), 2);
    }

    #[test]
    fn tags_are_flattened_from_known_options_only() {
        let quiz = vec![QuizQuestion {
            id: 1,
            prompt: "What do you want to see?".to_string(),
            multi_select: true,
            options: vec![
                QuizOption {
                    id: "migration".to_string(),
                    label: "The Great Migration".to_string(),
                    tags: vec!["Migration".to_string(), "Maasai Mara".to_string()],
                },
                QuizOption {
                    id: "reef".to_string(),
                    label: "Coral reefs".to_string(),
                    tags: vec!["snorkel".to_string()],
                },
            ],
        }];
        let answers = vec![
            QuizAnswer {
                question_id: 1,
                selected_option_ids: vec!["migration".to_string(), "unknown".to_string()],
            },
            QuizAnswer { question_id: 9, selected_option_ids: vec!["reef".to_string()] },
        ];

        assert_eq!(collect_tags(&quiz, &answers), vec!["migration", "maasai mara"]);
    }
}
