use std::collections::BTreeSet;

use clap::Args;
use safari_core::domain::add_on::{standard_add_ons, AddOnId};
use safari_core::domain::package::Residency;
use safari_core::quote::{
    available_add_ons, format_amount, DeterministicQuoteEngine, QuoteEngine, QuoteRequest,
};
use safari_db::repositories::{PackageRepository, SqlPackageRepository};
use serde_json::json;

use crate::commands::{
    invalid_input, not_found, open_database, prepare, store_failure, CommandResult,
};

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Package slug, e.g. `maasai-mara-classic`
    #[arg(long = "package")]
    pub package_slug: String,
    #[arg(long, value_parser = parse_residency, default_value = "non_resident")]
    pub residency: Residency,
    #[arg(long, default_value_t = 1)]
    pub adults: u32,
    #[arg(long, default_value_t = 0)]
    pub children: u32,
    /// Add-on id; repeat for several
    #[arg(long = "add-on")]
    pub add_on_ids: Vec<String>,
}

pub fn parse_residency(raw: &str) -> Result<Residency, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "resident" => Ok(Residency::Resident),
        "non_resident" => Ok(Residency::NonResident),
        other => Err(format!("unknown residency `{other}` (expected resident|non_resident)")),
    }
}

pub fn run(args: QuoteArgs) -> CommandResult {
    if args.adults == 0 {
        let failure = invalid_input("at least one adult is required");
        return CommandResult::from_failure("quote", failure);
    }

    let (config, runtime) = match prepare("quote") {
        Ok(prepared) => prepared,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let package = SqlPackageRepository::new(pool.clone())
            .find_by_slug(&args.package_slug)
            .await
            .map_err(store_failure)?;
        pool.close().await;

        package.filter(|package| package.active).ok_or_else(|| {
            not_found(format!("package `{}` is not in the active catalog", args.package_slug))
        })
    });

    let package = match result {
        Ok(package) => package,
        Err(failure) => return CommandResult::from_failure("quote", failure),
    };

    let catalog = standard_add_ons();
    let add_ons = available_add_ons(&package, &catalog).into_iter().cloned().collect::<Vec<_>>();
    let request = QuoteRequest {
        package: &package,
        residency: args.residency,
        adults: args.adults,
        children: args.children,
        selected_add_on_ids: args
            .add_on_ids
            .iter()
            .map(|id| AddOnId(id.clone()))
            .collect::<BTreeSet<_>>(),
    };
    let breakdown =
        DeterministicQuoteEngine::new(config.pricing.quote_policy()).quote(&request, &add_ons);
    let currency = config.pricing.currency_for(breakdown.residency);
    let grand_total = format_amount(breakdown.grand_total, currency);

    CommandResult::success_with_data(
        "quote",
        format!("{} for {} travelers: {grand_total}", package.name, breakdown.travelers()),
        json!({
            "package_slug": package.slug,
            "currency": currency,
            "grand_total": grand_total,
            "per_person": format_amount(breakdown.per_person, currency),
            "breakdown": breakdown,
        }),
    )
}

#[cfg(test)]
mod tests {
    use safari_core::domain::package::Residency;

    use super::parse_residency;

    #[test]
    fn residency_accepts_both_spellings() {
        assert_eq!(parse_residency("Resident"), Ok(Residency::Resident));
        assert_eq!(parse_residency("non-resident"), Ok(Residency::NonResident));
        assert!(parse_residency("tourist").is_err());
    }
}
