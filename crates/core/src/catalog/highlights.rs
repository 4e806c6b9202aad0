use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    Wildlife,
    Balloon,
    Beach,
    Mountain,
    Culture,
    Dining,
    Lodging,
    Transfer,
    General,
}

impl HighlightKind {
    /// Checked in order; the first variant with a matching keyword wins.
    const RULES: [(Self, &'static [&'static str]); 8] = [
        (Self::Balloon, &["balloon"]),
        (Self::Wildlife, &["game drive", "wildlife", "big five", "migration", "elephant", "lion"]),
        (Self::Beach, &["beach", "snorkel", "dhow", "reef", "ocean"]),
        (Self::Mountain, &["mount", "summit", "hike", "hiking", "trek"]),
        (Self::Culture, &["maasai", "village", "culture", "cultural", "swahili"]),
        (Self::Dining, &["meal", "dinner", "breakfast", "lunch"]),
        (Self::Lodging, &["lodge", "camp", "tent", "hotel", "accommodation"]),
        (Self::Transfer, &["transfer", "flight", "airport", "transport"]),
    ];

    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        Self::RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
            .map(|(kind, _)| *kind)
            .unwrap_or(Self::General)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Wildlife => "paw",
            Self::Balloon => "wind",
            Self::Beach => "waves",
            Self::Mountain => "mountain",
            Self::Culture => "users",
            Self::Dining => "utensils",
            Self::Lodging => "tent",
            Self::Transfer => "plane",
            Self::General => "check",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub kind: HighlightKind,
    pub icon: String,
}

pub fn classify_highlights(highlights: &[String]) -> Vec<Highlight> {
    highlights
        .iter()
        .map(|text| {
            let kind = HighlightKind::classify(text);
            Highlight { text: text.clone(), kind, icon: kind.icon().to_string() }
        })
        .collect()
}
