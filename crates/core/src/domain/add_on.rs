use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::package::Residency;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AddOnId(pub String);

/// Optional experience charged per traveler and offered only at matching
/// package locations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: AddOnId,
    pub name: String,
    pub description: String,
    pub price_resident: Decimal,
    pub price_non_resident: Decimal,
    pub locations: Vec<String>,
}

impl AddOn {
    pub fn price_for(&self, residency: Residency) -> Decimal {
        match residency {
            Residency::Resident => self.price_resident,
            Residency::NonResident => self.price_non_resident,
        }
    }

    /// Case-insensitive substring match in either direction, so compound
    /// locations like "Diani Beach, Kenya" still match a "Diani" entry.
    pub fn is_offered_at(&self, package_location: &str) -> bool {
        let location = package_location.trim().to_lowercase();
        if location.is_empty() {
            return false;
        }

        self.locations.iter().any(|entry| {
            let entry = entry.trim().to_lowercase();
            !entry.is_empty() && (location.contains(&entry) || entry.contains(&location))
        })
    }
}

fn add_on(
    id: &str,
    name: &str,
    description: &str,
    price_resident: i64,
    price_non_resident: i64,
    locations: &[&str],
) -> AddOn {
    AddOn {
        id: AddOnId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        price_resident: Decimal::from(price_resident),
        price_non_resident: Decimal::from(price_non_resident),
        locations: locations.iter().map(|location| (*location).to_string()).collect(),
    }
}

/// Static add-on reference table. Not sourced from the data store.
pub fn standard_add_ons() -> Vec<AddOn> {
    vec![
        add_on(
            "hot-air-balloon",
            "Hot Air Balloon Safari",
            "Sunrise balloon flight over the plains with a champagne bush breakfast",
            45_000,
            450,
            &["Maasai Mara", "Mara"],
        ),
        add_on(
            "maasai-village",
            "Maasai Village Visit",
            "Guided cultural visit to a traditional Maasai manyatta",
            3_000,
            30,
            &["Maasai Mara", "Amboseli"],
        ),
        add_on(
            "bush-dinner",
            "Bush Dinner",
            "Lantern-lit dinner under the stars with a private chef",
            8_000,
            80,
            &["Maasai Mara", "Amboseli", "Samburu", "Tsavo"],
        ),
        add_on(
            "photography-guide",
            "Photography Guide",
            "Full-day private guide specialised in wildlife photography",
            10_000,
            100,
            &["Maasai Mara", "Amboseli", "Samburu", "Tsavo", "Nakuru"],
        ),
        add_on(
            "dhow-cruise",
            "Sunset Dhow Cruise",
            "Traditional dhow sailing with seafood platter",
            5_000,
            50,
            &["Diani", "Watamu", "Lamu", "Mombasa", "Malindi"],
        ),
        add_on(
            "snorkeling",
            "Snorkeling Excursion",
            "Marine park snorkeling trip with equipment and guide",
            4_000,
            40,
            &["Diani", "Watamu", "Malindi"],
        ),
        add_on(
            "guided-nature-walk",
            "Guided Nature Walk",
            "Walking safari with an armed ranger",
            2_500,
            25,
            &["Naivasha", "Nakuru", "Mount Kenya", "Hell's Gate"],
        ),
    ]
}
