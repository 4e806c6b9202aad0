use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::package::{Package, Residency};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidentFilter {
    #[default]
    All,
    Resident,
    NonResident,
}

impl ResidentFilter {
    /// Rate the budget band is tested against. `All` uses the non-resident rate.
    pub fn pricing_tier(self) -> Residency {
        match self {
            Self::Resident => Residency::Resident,
            Self::All | Self::NonResident => Residency::NonResident,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetFilter {
    #[default]
    Any,
    Budget,
    MidRange,
    Luxury,
}

impl BudgetFilter {
    fn bounds(residency: Residency) -> (Decimal, Decimal) {
        match residency {
            Residency::Resident => (Decimal::from(50_000), Decimal::from(150_000)),
            Residency::NonResident => (Decimal::from(500), Decimal::from(1_500)),
        }
    }

    pub fn admits(self, price: Decimal, residency: Residency) -> bool {
        let (mid_floor, luxury_floor) = Self::bounds(residency);
        match self {
            Self::Any => true,
            Self::Budget => price < mid_floor,
            Self::MidRange => price >= mid_floor && price < luxury_floor,
            Self::Luxury => price >= luxury_floor,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    Any,
    Safari,
    Beach,
    Adventure,
    Cultural,
}

impl TripType {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Any => &[],
            Self::Safari => &["safari", "wildlife", "game"],
            Self::Beach => &["beach", "coast", "island"],
            Self::Adventure => &["adventure", "hiking", "trek", "climb"],
            Self::Cultural => &["culture", "cultural", "heritage"],
        }
    }

    pub fn admits(self, package: &Package) -> bool {
        if self == Self::Any {
            return true;
        }

        let text = format!("{} {}", package.category.as_deref().unwrap_or(""), package.name)
            .to_lowercase();
        self.keywords().iter().any(|keyword| text.contains(keyword))
    }
}

/// Catalog filter selections, passed explicitly instead of living in shared
/// UI state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub resident_type: ResidentFilter,
    #[serde(default)]
    pub budget_type: BudgetFilter,
    #[serde(default)]
    pub trip_type: TripType,
}

impl FilterState {
    pub fn admits(&self, package: &Package) -> bool {
        let residency = self.resident_type.pricing_tier();
        self.budget_type.admits(package.unit_price(residency), residency)
            && self.trip_type.admits(package)
    }
}

/// Keeps catalog order. `search` matches name, location or description,
/// case-insensitively; blank searches match everything.
pub fn filter_packages<'a>(
    packages: &'a [Package],
    filter: &FilterState,
    search: Option<&str>,
) -> Vec<&'a Package> {
    let needle = search.map(str::trim).filter(|value| !value.is_empty()).map(str::to_lowercase);

    packages
        .iter()
        .filter(|package| filter.admits(package))
        .filter(|package| match &needle {
            None => true,
            Some(needle) => [
                package.name.as_str(),
                package.location.as_str(),
                package.description.as_deref().unwrap_or(""),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle.as_str())),
        })
        .collect()
}
