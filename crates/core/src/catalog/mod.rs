pub mod filter;
pub mod highlights;

pub use filter::{filter_packages, BudgetFilter, FilterState, ResidentFilter, TripType};
pub use highlights::{classify_highlights, Highlight, HighlightKind};
