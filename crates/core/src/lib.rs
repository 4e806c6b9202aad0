pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod quote;
pub mod recommend;

pub use catalog::{filter_packages, BudgetFilter, FilterState, ResidentFilter, TripType};
pub use domain::add_on::{standard_add_ons, AddOn, AddOnId};
pub use domain::booking::{Booking, BookingId, BookingStatus, ContactDetails, NewBooking};
pub use domain::inquiry::{
    ContactInquiry, InquiryId, NewContactInquiry, NewsletterSubscription, SubscribeOutcome,
};
pub use domain::package::{Package, PackageId, Residency};
pub use domain::quiz::{QuizAnswer, QuizOption, QuizQuestion};
pub use domain::review::{NewReview, Review, ReviewId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use quote::{DeterministicQuoteEngine, QuoteBreakdown, QuoteEngine, QuotePolicy, QuoteRequest};
pub use recommend::{QuizRecommender, Recommendation, RecommendationEngine};
