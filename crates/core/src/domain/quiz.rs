use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub label: String,
    /// Keywords used only for scoring packages.
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: String,
    pub multi_select: bool,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: u32,
    pub selected_option_ids: Vec<String>,
}

impl QuizAnswer {
    pub fn first_selection(&self) -> Option<&str> {
        self.selected_option_ids.first().map(String::as_str)
    }
}
