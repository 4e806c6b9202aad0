use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId(pub String);

/// Pricing tier for Kenyan residency status. Drives both the base package
/// rate and add-on rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Residency {
    Resident,
    NonResident,
}

impl Residency {
    pub fn from_is_resident(is_resident: bool) -> Self {
        if is_resident {
            Self::Resident
        } else {
            Self::NonResident
        }
    }

    pub fn is_resident(self) -> bool {
        matches!(self, Self::Resident)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Resident => "Resident",
            Self::NonResident => "Non-Resident",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub slug: String,
    pub name: String,
    pub location: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price_resident: Decimal,
    pub price_non_resident: Decimal,
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub active: bool,
}

impl Package {
    pub fn unit_price(&self, residency: Residency) -> Decimal {
        match residency {
            Residency::Resident => self.price_resident,
            Residency::NonResident => self.price_non_resident,
        }
    }

    /// Lower-cased `name location description category`, with missing fields
    /// treated as empty.
    pub fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.location.as_str(),
            self.description.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
        ]
        .join(" ")
        .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Package, PackageId, Residency};

    fn package() -> Package {
        Package {
            id: PackageId("pkg-1".to_string()),
            slug: "maasai-mara-safari".to_string(),
            name: "Maasai Mara Safari".to_string(),
            location: "Maasai Mara".to_string(),
            category: None,
            description: Some("Witness the Great Migration".to_string()),
            duration: Some("3 days".to_string()),
            price_resident: Decimal::from(30_000),
            price_non_resident: Decimal::from(400),
            rating: None,
            highlights: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn unit_price_follows_residency() {
        let package = package();
        assert_eq!(package.unit_price(Residency::Resident), Decimal::from(30_000));
        assert_eq!(package.unit_price(Residency::NonResident), Decimal::from(400));
        assert_eq!(Residency::from_is_resident(true), Residency::Resident);
    }

    #[test]
    fn search_text_treats_missing_fields_as_empty() {
        let text = package().search_text();
        assert_eq!(text, "maasai mara safari maasai mara witness the great migration ");
    }
}
