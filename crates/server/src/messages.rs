//! Plain-text message attached to bookings created from a quote request.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use safari_core::domain::package::Package;
use safari_core::quote::{format_amount, AddOnCharge, QuoteBreakdown};
use serde::Serialize;
use tera::{Context, Tera};

const QUOTE_REQUEST_TEMPLATE: &str = "quote_request.txt";

/// Register the filters used by message templates.
///
/// - `money`: whole-unit amount with thousands separators, e.g.
///   `grand_total | money(currency="USD")` renders `USD 1,080`
pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("money", tera_money_filter);
}

fn tera_money_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = match value {
        tera::Value::String(raw) => Decimal::from_str(raw)
            .map_err(|error| tera::Error::msg(format!("money filter: `{raw}`: {error}")))?,
        tera::Value::Number(number) => number
            .as_f64()
            .and_then(|float| Decimal::try_from(float).ok())
            .ok_or_else(|| tera::Error::msg("money filter expects a finite number"))?,
        tera::Value::Null => Decimal::ZERO,
        _ => return Err(tera::Error::msg("money filter expects a decimal string or number")),
    };
    let currency = args.get("currency").and_then(tera::Value::as_str).unwrap_or("");

    Ok(tera::Value::String(format_amount(amount, currency).trim_start().to_string()))
}

#[derive(Debug, Serialize)]
pub struct QuoteMessageView<'a> {
    pub package_name: &'a str,
    pub location: &'a str,
    pub residency_label: &'static str,
    pub travel_date: String,
    pub currency: &'a str,
    pub adults: u32,
    pub children: u32,
    pub base_price: Decimal,
    pub child_unit_price: Decimal,
    pub adult_total: Decimal,
    pub child_total: Decimal,
    pub add_on_charges: &'a [AddOnCharge],
    pub grand_total: Decimal,
    pub per_person: Decimal,
    pub notes: Option<&'a str>,
}

impl<'a> QuoteMessageView<'a> {
    pub fn new(
        package: &'a Package,
        breakdown: &'a QuoteBreakdown,
        currency: &'a str,
        travel_date: NaiveDate,
        notes: Option<&'a str>,
    ) -> Self {
        Self {
            package_name: &package.name,
            location: &package.location,
            residency_label: breakdown.residency.label(),
            travel_date: travel_date.format("%Y-%m-%d").to_string(),
            currency,
            adults: breakdown.adults,
            children: breakdown.children,
            base_price: breakdown.base_price,
            child_unit_price: breakdown.child_unit_price,
            adult_total: breakdown.adult_total,
            child_total: breakdown.child_total,
            add_on_charges: &breakdown.add_on_charges,
            grand_total: breakdown.grand_total,
            per_person: breakdown.per_person,
            notes: notes.map(str::trim).filter(|notes| !notes.is_empty()),
        }
    }
}

pub struct QuoteMessageRenderer {
    tera: Tera,
}

impl QuoteMessageRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        register_template_filters(&mut tera);
        tera.add_raw_template(
            QUOTE_REQUEST_TEMPLATE,
            include_str!("../../../templates/quote_request.txt"),
        )?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &QuoteMessageView<'_>) -> Result<String, tera::Error> {
        let context = Context::from_serialize(view)?;
        self.tera.render(QUOTE_REQUEST_TEMPLATE, &context)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use safari_core::domain::add_on::{standard_add_ons, AddOnId};
    use safari_core::domain::package::{Package, PackageId, Residency};
    use safari_core::quote::{compute_quote, QuotePolicy, QuoteRequest};

    use super::{QuoteMessageRenderer, QuoteMessageView};

    fn mara() -> Package {
        Package {
            id: PackageId("pkg-mara".to_string()),
            slug: "maasai-mara-classic".to_string(),
            name: "Maasai Mara Classic Safari".to_string(),
            location: "Maasai Mara".to_string(),
            category: Some("Wildlife Safari".to_string()),
            description: None,
            duration: None,
            price_resident: Decimal::from(45_000),
            price_non_resident: Decimal::from(450),
            rating: None,
            highlights: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn message_itemizes_children_and_add_ons() {
        let package = mara();
        let add_ons = standard_add_ons();
        let request = QuoteRequest {
            package: &package,
            residency: Residency::NonResident,
            adults: 2,
            children: 1,
            selected_add_on_ids: BTreeSet::from([AddOnId("hot-air-balloon".to_string())]),
        };
        let breakdown = compute_quote(&request, &add_ons, &QuotePolicy::default());
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");

        let message = QuoteMessageRenderer::new()
            .expect("template compiles")
            .render(&QuoteMessageView::new(&package, &breakdown, "USD", date, Some("  Vegetarian ")))
            .expect("render");

        assert!(message.contains("Traveler type: Non-Resident"));
        assert!(message.contains("Adults: 2 x USD 450 = USD 900"));
        assert!(message.contains("Children: 1 x USD 315 = USD 315"));
        assert!(message.contains("Hot Air Balloon Safari, 3 x USD 450 = USD 1,350"));
        assert!(message.contains("Estimated total: USD 2,565 (USD 855 per person)"));
        assert!(message.contains("Notes: Vegetarian"));
    }

    #[test]
    fn adults_only_message_omits_child_line_and_notes() {
        let package = mara();
        let request = QuoteRequest {
            package: &package,
            residency: Residency::Resident,
            adults: 2,
            children: 0,
            selected_add_on_ids: BTreeSet::new(),
        };
        let breakdown = compute_quote(&request, &[], &QuotePolicy::default());
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date");

        let message = QuoteMessageRenderer::new()
            .expect("template compiles")
            .render(&QuoteMessageView::new(&package, &breakdown, "KES", date, None))
            .expect("render");

        assert!(message.contains("Estimated total: KES 90,000"));
        assert!(!message.contains("Children:"));
        assert!(!message.contains("Notes:"));
    }
}
