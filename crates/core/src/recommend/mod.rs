//! Quiz-driven package recommendations
//!
//! Quiz answers are flattened into keyword tags, each package is scored by how
//! many tags appear in its text, and the best few are returned together with a
//! personality label derived from the first two answers.

mod personality;
mod quiz;
mod scoring;

pub use personality::{derive_personality, Personality, DEFAULT_PERSONALITY};
pub use quiz::safari_quiz;
pub use scoring::{collect_tags, score_package, score_packages, ScoredPackage};

use serde::Serialize;

use crate::domain::package::Package;
use crate::domain::quiz::{QuizAnswer, QuizQuestion};

/// Number of matches shown on the results page.
pub const DEFAULT_MAX_RESULTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub personality: Personality,
    pub matches: Vec<ScoredPackage>,
}

pub trait RecommendationEngine: Send + Sync {
    fn recommend(&self, answers: &[QuizAnswer], packages: &[Package]) -> Recommendation;
}

#[derive(Debug, Clone)]
pub struct QuizRecommender {
    quiz: Vec<QuizQuestion>,
    max_results: usize,
}

impl Default for QuizRecommender {
    fn default() -> Self {
        Self::new(safari_quiz(), DEFAULT_MAX_RESULTS)
    }
}

impl QuizRecommender {
    pub fn new(quiz: Vec<QuizQuestion>, max_results: usize) -> Self {
        Self { quiz, max_results }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }
}

impl RecommendationEngine for QuizRecommender {
    fn recommend(&self, answers: &[QuizAnswer], packages: &[Package]) -> Recommendation {
        let tags = collect_tags(&self.quiz, answers);
        Recommendation {
            personality: derive_personality(answers),
            matches: score_packages(&tags, packages, self.max_results),
        }
    }
}
