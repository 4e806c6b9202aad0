use crate::domain::add_on::AddOn;
use crate::domain::package::Package;

/// Add-ons offered at the package's location, in table order.
pub fn available_add_ons<'a>(package: &Package, all_add_ons: &'a [AddOn]) -> Vec<&'a AddOn> {
    all_add_ons.iter().filter(|add_on| add_on.is_offered_at(&package.location)).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::available_add_ons;
    use crate::domain::add_on::{standard_add_ons, AddOn};
    use crate::domain::package::{Package, PackageId};

    fn package_at(location: &str) -> Package {
        Package {
            id: PackageId(format!("pkg-{location}")),
            slug: location.to_lowercase().replace(' ', "-"),
            name: format!("{location} Getaway"),
            location: location.to_string(),
            category: None,
            description: None,
            duration: None,
            price_resident: Decimal::from(10_000),
            price_non_resident: Decimal::from(150),
            rating: None,
            highlights: Vec::new(),
            active: true,
        }
    }

    fn ids(add_ons: &[&AddOn]) -> Vec<String> {
        add_ons.iter().map(|add_on| add_on.id.0.clone()).collect()
    }

    #[test]
    fn coastal_package_gets_coastal_add_ons_in_table_order() {
        let table = standard_add_ons();
        let offered = available_add_ons(&package_at("Diani Beach, Kenya"), &table);

        assert_eq!(ids(&offered), vec!["dhow-cruise", "snorkeling"]);
    }

    #[test]
    fn mara_package_excludes_beach_add_ons() {
        let table = standard_add_ons();
        let offered = available_add_ons(&package_at("maasai mara national reserve"), &table);

        assert_eq!(
            ids(&offered),
            vec!["hot-air-balloon", "maasai-village", "bush-dinner", "photography-guide"]
        );
    }

    #[test]
    fn every_offered_add_on_shares_a_location_substring() {
        let table = standard_add_ons();
        for location in ["Amboseli", "Lamu Island", "Mount Kenya", "Nairobi", "Tsavo East"] {
            let package = package_at(location);
            let lowered = location.to_lowercase();
            for add_on in available_add_ons(&package, &table) {
                assert!(
                    add_on.locations.iter().any(|entry| {
                        let entry = entry.to_lowercase();
                        lowered.contains(&entry) || entry.contains(&lowered)
                    }),
                    "{} offered at {location} without a location match",
                    add_on.id.0
                );
            }
        }
        assert!(available_add_ons(&package_at("Nairobi"), &table).is_empty());
    }
}
