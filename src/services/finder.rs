use serde::Serialize;

use crate::domain::rate::{PackageRate, RateColumn, RateQuery, Region, select_package_rates};
use crate::forms::rates::FinderQuery;
use crate::repository::RateReader;
use crate::services::{ServiceError, ServiceResult};

/// Selectable value of a finder drop-down.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FinderOption {
    pub value: String,
    pub label: String,
}

/// Durations offered for the south table, whose trip codes encode the days.
const SOUTH_DURATIONS: &[&str] = &["1D", "2D1N", "3D2N", "4D3N", "5D4N", "6D5N"];

/// Data required to render the public finder.
#[derive(Debug, Serialize)]
pub struct FinderPageData {
    pub query: FinderQuery,
    pub regions: Vec<FinderOption>,
    /// Pax sizes priced by the selected region.
    pub pax_sizes: Vec<FinderOption>,
    pub durations: Vec<&'static str>,
    /// Whether a complete selection was submitted.
    pub searched: bool,
    /// Column the results are priced in.
    pub priced_as: Option<String>,
    pub rates: Vec<PackageRate>,
    pub error: Option<String>,
}

/// Looks up the packages priced for a resolved selection.
///
/// Repository failures are logged and reported as an empty result.
pub fn find_package_rates<R>(repo: &R, query: &RateQuery) -> Vec<PackageRate>
where
    R: RateReader + ?Sized,
{
    match repo.list_rates(query.region, query.trip_code_prefix.as_deref()) {
        Ok(rows) => select_package_rates(rows, query.column),
        Err(err) => {
            log::error!(
                "Failed to load {} rates for {}: {err}",
                query.region,
                query.column.column_name()
            );
            Vec::new()
        }
    }
}

fn region_options() -> Vec<FinderOption> {
    Region::ALL
        .iter()
        .map(|region| FinderOption {
            value: region.to_string(),
            label: region.title().to_string(),
        })
        .collect()
}

fn pax_size_options(region: Option<Region>) -> Vec<FinderOption> {
    let region = region.unwrap_or(Region::South);
    RateColumn::columns_for(region)
        .iter()
        .map(|column| FinderOption {
            value: column.selector(),
            label: column.label(),
        })
        .collect()
}

/// Builds the finder page. No authentication is required.
pub fn load_finder_page<R>(repo: &R, query: FinderQuery) -> FinderPageData
where
    R: RateReader + ?Sized,
{
    let region = query
        .region
        .as_deref()
        .and_then(|value| value.trim().to_ascii_lowercase().parse::<Region>().ok());

    let durations = if matches!(region, None | Some(Region::South)) {
        SOUTH_DURATIONS.to_vec()
    } else {
        Vec::new()
    };

    let mut data = FinderPageData {
        query: query.clone(),
        regions: region_options(),
        pax_sizes: pax_size_options(region),
        durations,
        searched: false,
        priced_as: None,
        rates: Vec::new(),
        error: None,
    };

    match query.resolve() {
        Ok(Some(resolved)) => {
            data.searched = true;
            data.priced_as = Some(resolved.column.label());
            data.rates = find_package_rates(repo, &resolved);
        }
        Ok(None) => {}
        Err(err) => data.error = Some(err.to_string()),
    }

    data
}

/// JSON lookup. An incomplete or unknown selection is a form error.
pub fn search_package_rates<R>(repo: &R, query: &FinderQuery) -> ServiceResult<Vec<PackageRate>>
where
    R: RateReader + ?Sized,
{
    let resolved = query
        .resolve()
        .map_err(|err| ServiceError::Form(err.to_string()))?
        .ok_or_else(|| ServiceError::Form("region and pax_size are required".to_string()))?;

    Ok(find_package_rates(repo, &resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushkind_common::repository::errors::RepositoryError;

    use crate::domain::rate::{PaxGroup, RateRow};
    use crate::repository::mock::MockRateRepository;

    fn query(region: &str, pax_size: &str, duration: Option<&str>) -> FinderQuery {
        FinderQuery {
            region: Some(region.to_string()),
            pax_size: Some(pax_size.to_string()),
            duration: duration.map(str::to_string),
        }
    }

    #[test]
    fn south_duration_restricts_trip_codes() {
        let mut repo = MockRateRepository::new();
        let column = RateColumn::Group(PaxGroup::Pax20Plus2);

        repo.expect_list_rates()
            .times(1)
            .withf(|region, prefix| *region == Region::South && *prefix == Some("FWS2"))
            .returning(move |_, _| {
                Ok(vec![
                    RateRow::new("1", "FWS201").with_rate(column, 12_500_00),
                    RateRow::new("2", "FWS202"),
                ])
            });

        let data = load_finder_page(&repo, query("south", "20+2", Some("2D3N")));

        assert!(data.searched);
        assert!(data.error.is_none());
        assert_eq!(data.rates.len(), 1);
        assert_eq!(data.rates[0].trip_code, "FWS201");
        assert_eq!(data.priced_as.as_deref(), Some("20+2 pax"));
    }

    #[test]
    fn repository_errors_yield_empty_results() {
        let mut repo = MockRateRepository::new();

        repo.expect_list_rates()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let rates = search_package_rates(&repo, &query("north", "15+1", None))
            .expect("lookup errors are swallowed");

        assert!(rates.is_empty());
    }

    #[test]
    fn unknown_pax_size_is_reported_without_lookup() {
        let mut repo = MockRateRepository::new();
        repo.expect_list_rates().times(0);

        let data = load_finder_page(&repo, query("north", "50+5", None));

        assert!(!data.searched);
        assert!(data.error.is_some());

        let result = search_package_rates(&repo, &query("north", "50+5", None));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn empty_selection_renders_options_only() {
        let repo = MockRateRepository::new();

        let data = load_finder_page(&repo, FinderQuery::default());

        assert!(!data.searched);
        assert_eq!(data.regions.len(), Region::ALL.len());
        assert_eq!(data.pax_sizes.len(), PaxGroup::ALL.len());
    }

    #[test]
    fn kashmir_offers_package_selectors() {
        let repo = MockRateRepository::new();
        let selection = FinderQuery {
            region: Some("kashmir".to_string()),
            ..FinderQuery::default()
        };

        let data = load_finder_page(&repo, selection);

        assert!(data.durations.is_empty());
        assert!(data.pax_sizes.iter().any(|option| option.value == "seasonal_4_luxury"));
    }

    #[test]
    fn incomplete_api_query_is_a_form_error() {
        let repo = MockRateRepository::new();

        let result = search_package_rates(&repo, &FinderQuery::default());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
