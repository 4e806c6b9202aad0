use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::add_on::{AddOn, AddOnId};
use crate::domain::package::{Package, Residency};

/// 30% off the base rate for each child.
pub const DEFAULT_CHILD_DISCOUNT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePolicy {
    /// Fraction in `0..=1` taken off the base rate per child.
    pub child_discount_rate: Decimal,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self { child_discount_rate: DEFAULT_CHILD_DISCOUNT_RATE }
    }
}

impl QuotePolicy {
    pub fn from_percent(child_discount_pct: u8) -> Self {
        Self { child_discount_rate: Decimal::new(i64::from(child_discount_pct), 2) }
    }
}

#[derive(Clone, Debug)]
pub struct QuoteRequest<'a> {
    pub package: &'a Package,
    pub residency: Residency,
    pub adults: u32,
    pub children: u32,
    pub selected_add_on_ids: BTreeSet<AddOnId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnCharge {
    pub add_on_id: AddOnId,
    pub name: String,
    pub unit_price: Decimal,
    pub travelers: u32,
    pub total: Decimal,
}

/// Itemized price for a party. Every amount is unrounded; rounding belongs to
/// whoever displays it.
///
/// `per_person` is `grand_total / max(1, travelers)` as a `Decimal`, so a
/// non-terminating quotient is rounded to 28 significant digits and
/// `per_person * travelers` may differ from `grand_total` in the last digit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub residency: Residency,
    pub adults: u32,
    pub children: u32,
    pub base_price: Decimal,
    pub child_unit_price: Decimal,
    pub adult_total: Decimal,
    pub child_total: Decimal,
    pub add_on_charges: Vec<AddOnCharge>,
    pub add_ons_total: Decimal,
    pub grand_total: Decimal,
    pub per_person: Decimal,
}

impl QuoteBreakdown {
    pub fn travelers(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

pub trait QuoteEngine: Send + Sync {
    fn quote(&self, request: &QuoteRequest<'_>, all_add_ons: &[AddOn]) -> QuoteBreakdown;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicQuoteEngine {
    policy: QuotePolicy,
}

impl DeterministicQuoteEngine {
    pub fn new(policy: QuotePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> QuotePolicy {
        self.policy
    }
}

impl QuoteEngine for DeterministicQuoteEngine {
    fn quote(&self, request: &QuoteRequest<'_>, all_add_ons: &[AddOn]) -> QuoteBreakdown {
        compute_quote(request, all_add_ons, &self.policy)
    }
}

/// Total over its input domain: unknown add-on ids are skipped and an empty
/// party divides by one.
pub fn compute_quote(
    request: &QuoteRequest<'_>,
    all_add_ons: &[AddOn],
    policy: &QuotePolicy,
) -> QuoteBreakdown {
    let adults = Decimal::from(request.adults);
    let children = Decimal::from(request.children);
    let travelers = request.adults.saturating_add(request.children);
    let party = Decimal::from(travelers);

    let base_price = request.package.unit_price(request.residency);
    let adult_total = adults * base_price;
    let child_unit_price = base_price * (Decimal::ONE - policy.child_discount_rate);
    let child_total = children * child_unit_price;

    let add_on_charges = all_add_ons
        .iter()
        .filter(|add_on| request.selected_add_on_ids.contains(&add_on.id))
        .map(|add_on| {
            let unit_price = add_on.price_for(request.residency);
            AddOnCharge {
                add_on_id: add_on.id.clone(),
                name: add_on.name.clone(),
                unit_price,
                travelers,
                total: unit_price * party,
            }
        })
        .collect::<Vec<_>>();
    let add_ons_total = add_on_charges.iter().map(|charge| charge.total).sum::<Decimal>();

    let grand_total = adult_total + child_total + add_ons_total;
    let per_person = grand_total / Decimal::from(travelers.max(1));

    QuoteBreakdown {
        residency: request.residency,
        adults: request.adults,
        children: request.children,
        base_price,
        child_unit_price,
        adult_total,
        child_total,
        add_on_charges,
        add_ons_total,
        grand_total,
        per_person,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;

    use super::{
        compute_quote, DeterministicQuoteEngine, QuoteEngine, QuotePolicy, QuoteRequest,
        DEFAULT_CHILD_DISCOUNT_RATE,
    };
    use crate::domain::add_on::{AddOn, AddOnId};
    use crate::domain::package::{Package, PackageId, Residency};

    fn mara() -> Package {
        Package {
            id: PackageId("pkg-mara".to_string()),
            slug: "maasai-mara-safari".to_string(),
            name: "Maasai Mara Safari".to_string(),
            location: "Maasai Mara".to_string(),
            category: Some("Safari".to_string()),
            description: None,
            duration: Some("3 days".to_string()),
            price_resident: Decimal::from(30_000),
            price_non_resident: Decimal::from(400),
            rating: None,
            highlights: Vec::new(),
            active: true,
        }
    }

    fn balloon() -> AddOn {
        AddOn {
            id: AddOnId("balloon".to_string()),
            name: "Hot Air Balloon".to_string(),
            description: String::new(),
            price_resident: Decimal::from(5_000),
            price_non_resident: Decimal::from(450),
            locations: vec!["Maasai Mara".to_string()],
        }
    }

    fn ids(values: &[&str]) -> BTreeSet<AddOnId> {
        values.iter().map(|value| AddOnId((*value).to_string())).collect()
    }

    fn request<'a>(
        package: &'a Package,
        residency: Residency,
        adults: u32,
        children: u32,
        add_ons: &[&str],
    ) -> QuoteRequest<'a> {
        QuoteRequest { package, residency, adults, children, selected_add_on_ids: ids(add_ons) }
    }

    #[test]
    fn default_child_discount_is_thirty_percent() {
        assert_eq!(DEFAULT_CHILD_DISCOUNT_RATE, Decimal::new(30, 2));
        assert_eq!(QuotePolicy::from_percent(30), QuotePolicy::default());
    }

    #[test]
    fn non_resident_family_without_add_ons() {
        let package = mara();
        let breakdown = compute_quote(
            &request(&package, Residency::NonResident, 2, 1, &[]),
            &[balloon()],
            &QuotePolicy::default(),
        );

        assert_eq!(breakdown.base_price, Decimal::from(400));
        assert_eq!(breakdown.adult_total, Decimal::from(800));
        assert_eq!(breakdown.child_total, Decimal::from(280));
        assert_eq!(breakdown.add_ons_total, Decimal::ZERO);
        assert_eq!(breakdown.grand_total, Decimal::from(1_080));
        assert_eq!(breakdown.per_person, Decimal::from(360));
    }

    #[test]
    fn resident_solo_traveler_with_one_add_on() {
        let package = mara();
        let breakdown = compute_quote(
            &request(&package, Residency::Resident, 1, 0, &["balloon"]),
            &[balloon()],
            &QuotePolicy::default(),
        );

        assert_eq!(breakdown.adult_total, Decimal::from(30_000));
        assert_eq!(breakdown.add_ons_total, Decimal::from(5_000));
        assert_eq!(breakdown.grand_total, Decimal::from(35_000));
        assert_eq!(breakdown.per_person, Decimal::from(35_000));
        assert_eq!(breakdown.add_on_charges.len(), 1);
        assert_eq!(breakdown.add_on_charges[0].travelers, 1);
    }

    #[test]
    fn unknown_add_on_ids_are_ignored() {
        let package = mara();
        let breakdown = compute_quote(
            &request(&package, Residency::NonResident, 1, 0, &["does-not-exist"]),
            &[balloon()],
            &QuotePolicy::default(),
        );

        assert!(breakdown.add_on_charges.is_empty());
        assert_eq!(breakdown.grand_total, Decimal::from(400));
    }

    #[test]
    fn empty_party_divides_by_one() {
        let package = mara();
        let breakdown = compute_quote(
            &request(&package, Residency::NonResident, 0, 0, &["balloon"]),
            &[balloon()],
            &QuotePolicy::default(),
        );

        assert_eq!(breakdown.grand_total, Decimal::ZERO);
        assert_eq!(breakdown.per_person, breakdown.grand_total);
    }

    #[test]
    fn grand_total_is_exact_sum_and_per_person_recombines() {
        let package = mara();
        let all_add_ons = [balloon()];
        for adults in 1..=10 {
            for children in 0..=6 {
                for residency in [Residency::Resident, Residency::NonResident] {
                    let breakdown = compute_quote(
                        &request(&package, residency, adults, children, &["balloon"]),
                        &all_add_ons,
                        &QuotePolicy::default(),
                    );
                    assert_eq!(
                        breakdown.grand_total,
                        breakdown.adult_total + breakdown.child_total + breakdown.add_ons_total
                    );

                    let recombined = breakdown.per_person * Decimal::from(adults + children);
                    let drift = (recombined - breakdown.grand_total).abs();
                    assert!(drift < Decimal::new(1, 20), "per-person drift {drift} too large");
                }
            }
        }
    }

    #[test]
    fn per_person_recombines_exactly_when_the_total_divides_evenly() {
        let package = mara();
        let breakdown = compute_quote(
            &request(&package, Residency::Resident, 2, 0, &[]),
            &[balloon()],
            &QuotePolicy::default(),
        );

        assert_eq!(breakdown.per_person * Decimal::from(2), breakdown.grand_total);
    }

    #[test]
    fn add_on_total_scales_linearly_with_party_size() {
        let package = mara();
        let all_add_ons = [balloon()];
        let single = compute_quote(
            &request(&package, Residency::NonResident, 2, 1, &["balloon"]),
            &all_add_ons,
            &QuotePolicy::default(),
        );
        let doubled = compute_quote(
            &request(&package, Residency::NonResident, 4, 2, &["balloon"]),
            &all_add_ons,
            &QuotePolicy::default(),
        );

        assert_eq!(doubled.add_ons_total, single.add_ons_total * Decimal::TWO);
    }

    #[test]
    fn engine_has_no_upper_bound_on_party_size() {
        let package = mara();
        let engine = DeterministicQuoteEngine::default();
        let breakdown = engine.quote(&request(&package, Residency::NonResident, 25, 12, &[]), &[]);

        assert_eq!(breakdown.travelers(), 37);
        assert_eq!(breakdown.adult_total, Decimal::from(10_000));
        assert_eq!(breakdown.child_total, Decimal::from(3_360));
    }

    #[test]
    fn custom_policy_changes_child_rate() {
        let package = mara();
        let engine = DeterministicQuoteEngine::new(QuotePolicy::from_percent(50));
        let breakdown = engine.quote(&request(&package, Residency::NonResident, 1, 2, &[]), &[]);

        assert_eq!(breakdown.child_unit_price, Decimal::from(200));
        assert_eq!(breakdown.grand_total, Decimal::from(800));
    }
}
