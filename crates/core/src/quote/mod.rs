//! Quote pricing for safari packages.
//!
//! The base rate follows residency, children get a fixed discount off that
//! rate, and add-ons are charged per traveler. Amounts stay unrounded until
//! they reach [`display::format_amount`].

pub mod add_ons;
pub mod display;
pub mod pricing;

pub use add_ons::available_add_ons;
pub use display::{format_amount, round_for_display};
pub use pricing::{
    compute_quote, AddOnCharge, DeterministicQuoteEngine, QuoteBreakdown, QuoteEngine,
    QuotePolicy, QuoteRequest, DEFAULT_CHILD_DISCOUNT_RATE,
};
