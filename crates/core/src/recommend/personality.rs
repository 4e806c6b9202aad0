use serde::Serialize;

use crate::domain::quiz::QuizAnswer;

/// Flavor text for the result page. Never used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Personality {
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_PERSONALITY: Personality = Personality {
    title: "The Safari Explorer",
    emoji: "🐘",
    description: "You want a little of everything Kenya offers: big game, open skies and \
                  stories to bring home.",
};

/// Looks up `"{first}-{second}"`, built from the first selection of the first
/// two answers, falling back to [`DEFAULT_PERSONALITY`].
pub fn derive_personality(answers: &[QuizAnswer]) -> Personality {
    let first = answers.first().and_then(QuizAnswer::first_selection).unwrap_or_default();
    let second = answers.get(1).and_then(QuizAnswer::first_selection).unwrap_or_default();

    lookup(&format!("{first}-{second}")).unwrap_or(DEFAULT_PERSONALITY)
}

fn lookup(key: &str) -> Option<Personality> {
    let personality = match key {
        "adventure-solo" => Personality {
            title: "The Lone Trailblazer",
            emoji: "🧭",
            description: "Self-reliant and restless, you are happiest on a trail nobody \
                          else booked.",
        },
        "adventure-couple" => Personality {
            title: "The Daring Duo",
            emoji: "🏔️",
            description: "Summits, walking safaris and sunrise starts, shared with your \
                          favourite person.",
        },
        "adventure-friends" => Personality {
            title: "The Pack Leader",
            emoji: "🦁",
            description: "You rally the group for game drives by day and campfire tales by \
                          night.",
        },
        "relaxation-couple" => Personality {
            title: "The Beach Romantic",
            emoji: "🌅",
            description: "Sunset dhow cruises and barefoot dinners on the Indian Ocean coast.",
        },
        "relaxation-family" => Personality {
            title: "The Coastal Nester",
            emoji: "🏖️",
            description: "Warm water, safe beaches and easy days for every generation.",
        },
        "culture-solo" => Personality {
            title: "The Curious Wanderer",
            emoji: "🪘",
            description: "Markets, manyattas and Swahili old towns draw you more than any \
                          checklist.",
        },
        "culture-family" => Personality {
            title: "The Story Collector",
            emoji: "📖",
            description: "You travel so the kids come home with stories, songs and new \
                          friends.",
        },
        "photography-solo" => Personality {
            title: "The Wildlife Lens",
            emoji: "📸",
            description: "Patient and early to rise, you wait for the perfect frame.",
        },
        "photography-couple" => Personality {
            title: "The Golden Hour Pair",
            emoji: "🌄",
            description: "Two cameras, one jeep and the best light on the savannah.",
        },
        _ => return None,
    };
    Some(personality)
}

#[cfg(test)]
mod tests {
    use super::{derive_personality, DEFAULT_PERSONALITY};
    use crate::domain::quiz::QuizAnswer;

    fn answer(question_id: u32, selections: &[&str]) -> QuizAnswer {
        QuizAnswer {
            question_id,
            selected_option_ids: selections.iter().map(|value| (*value).to_string()).collect(),
        }
    }

    #[test]
    fn known_combination_resolves_to_its_entry() {
        let personality =
            derive_personality(&[answer(1, &["relaxation"]), answer(2, &["couple", "family"])]);
        assert_eq!(personality.title, "The Beach Romantic");
    }

    #[test]
    fn unknown_or_missing_answers_fall_back_to_default() {
        assert_eq!(
            derive_personality(&[answer(1, &["relaxation"]), answer(2, &["solo"])]),
            DEFAULT_PERSONALITY
        );
        assert_eq!(derive_personality(&[answer(1, &["adventure"])]), DEFAULT_PERSONALITY);
        assert_eq!(derive_personality(&[]), DEFAULT_PERSONALITY);
        assert_eq!(derive_personality(&[answer(1, &[]), answer(2, &[])]), DEFAULT_PERSONALITY);
    }
}
