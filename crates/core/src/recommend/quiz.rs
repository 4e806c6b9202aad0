use crate::domain::quiz::{QuizOption, QuizQuestion};

fn option(id: &str, label: &str, tags: &[&str]) -> QuizOption {
    QuizOption {
        id: id.to_string(),
        label: label.to_string(),
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
    }
}

fn question(id: u32, prompt: &str, multi_select: bool, options: Vec<QuizOption>) -> QuizQuestion {
    QuizQuestion { id, prompt: prompt.to_string(), multi_select, options }
}

/// The "find your safari" quiz. Questions 1 and 2 also key the personality
/// table.
pub fn safari_quiz() -> Vec<QuizQuestion> {
    vec![
        question(
            1,
            "What kind of traveler are you?",
            false,
            vec![
                option("adventure", "Thrill seeker", &["adventure", "hiking", "safari"]),
                option("relaxation", "Sun and slow mornings", &["beach", "relax", "spa"]),
                option("culture", "Culture lover", &["culture", "maasai", "village"]),
                option("photography", "Wildlife photographer", &["wildlife", "photography", "safari"]),
            ],
        ),
        question(
            2,
            "Who are you traveling with?",
            false,
            vec![
                option("solo", "Just me", &["adventure"]),
                option("couple", "My partner", &["romantic", "honeymoon", "luxury"]),
                option("family", "Family with kids", &["family"]),
                option("friends", "A group of friends", &["group", "adventure"]),
            ],
        ),
        question(
            3,
            "What do you most want to see?",
            true,
            vec![
                option("big-five", "The Big Five", &["big five", "wildlife", "game drive"]),
                option("migration", "The Great Migration", &["migration", "maasai mara"]),
                option("birdlife", "Flamingos and birdlife", &["bird", "flamingo", "lake"]),
                option("marine-life", "Reefs and dolphins", &["snorkel", "marine", "dolphin", "beach"]),
                option("summits", "Peaks and glaciers", &["hiking", "mount kenya", "trek"]),
                option("local-culture", "Local traditions", &["culture", "maasai", "swahili"]),
            ],
        ),
        question(
            4,
            "Which landscapes call to you?",
            true,
            vec![
                option("savannah", "Open savannah", &["savannah", "safari", "mara", "amboseli"]),
                option("coast", "Indian Ocean coast", &["beach", "diani", "coast", "watamu"]),
                option("mountains", "Mountains and forest", &["mountain", "mount kenya", "hiking"]),
                option("lakes", "Rift Valley lakes", &["lake", "naivasha", "nakuru"]),
            ],
        ),
        question(
            5,
            "How would you describe your budget?",
            false,
            vec![
                option("value", "Great value", &["budget"]),
                option("comfort", "Comfortable lodges", &["mid-range", "lodge"]),
                option("luxury", "Once-in-a-lifetime luxury", &["luxury", "camp"]),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::safari_quiz;

    #[test]
    fn question_and_option_ids_are_unique() {
        let quiz = safari_quiz();
        let question_ids = quiz.iter().map(|question| question.id).collect::<HashSet<_>>();
        assert_eq!(question_ids.len(), quiz.len());

        for question in &quiz {
            let option_ids =
                question.options.iter().map(|option| option.id.as_str()).collect::<HashSet<_>>();
            assert_eq!(option_ids.len(), question.options.len(), "question {}", question.id);
            assert!(question.options.iter().all(|option| !option.tags.is_empty()));
        }
    }
}
