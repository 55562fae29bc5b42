use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::rate::{RateColumn, Region};
use crate::forms::rates::UploadRatesForm;
use crate::repository::{RateReader, RateWriter};
use crate::services::{ServiceError, ServiceResult};

/// One row of a rate table as shown to staff.
#[derive(Debug, Serialize)]
pub struct RateTableRow {
    pub sl_code: String,
    pub trip_code: String,
    pub details: Option<String>,
    /// Prices in column order; `None` for empty cells.
    pub cells: Vec<Option<i64>>,
}

/// Data required to render a regional rate table.
pub struct RatesPageData {
    pub region: Region,
    pub columns: Vec<String>,
    pub rows: Vec<RateTableRow>,
}

/// Loads the full rate table of a region. Defaults to the south table.
pub fn load_rates_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    region: Option<&str>,
) -> ServiceResult<RatesPageData>
where
    R: RateReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let region = match region.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<Region>()
            .map_err(|err| ServiceError::Form(err.to_string()))?,
        None => Region::South,
    };

    let columns = RateColumn::columns_for(region);
    let rows = repo
        .list_rates(region, None)
        .map_err(ServiceError::from)?
        .into_iter()
        .map(|row| RateTableRow {
            cells: columns
                .iter()
                .map(|column| row.rates.get(column).copied())
                .collect(),
            sl_code: row.sl_code,
            trip_code: row.trip_code,
            details: row.details,
        })
        .collect();

    Ok(RatesPageData {
        region,
        columns: columns.iter().map(RateColumn::column_name).collect(),
        rows,
    })
}

/// Replaces a regional rate table with the rows of an uploaded CSV file.
pub fn upload_rates<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadRatesForm,
) -> ServiceResult<(Region, usize)>
where
    R: RateWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (region, rows) = form
        .parse()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let stored = repo
        .replace_rates(region, &rows)
        .map_err(ServiceError::from)?;

    log::info!("Replaced {region} rate table with {stored} rows");

    Ok((region, stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use actix_multipart::form::{tempfile::TempFile, text::Text};

    use crate::domain::rate::{PaxGroup, RateRow};
    use crate::repository::mock::MockRateRepository;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 9,
            name: "Tester".to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exp: 0,
        }
    }

    fn upload(region: &str, contents: &str) -> UploadRatesForm {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");

        UploadRatesForm {
            region: Text(region.to_string()),
            csv: TempFile {
                file,
                content_type: None,
                file_name: Some("rates.csv".to_string()),
                size: contents.len(),
            },
        }
    }

    #[test]
    fn upload_rates_requires_role() {
        let repo = MockRateRepository::new();
        let user = user_with_roles(&[]);
        let mut form = upload("north", "trip_code,pax15plus1\nNI01,9000\n");

        let result = upload_rates(&repo, &user, &mut form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn upload_rates_replaces_region_table() {
        let mut repo = MockRateRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_replace_rates()
            .times(1)
            .withf(|region, rows| {
                *region == Region::North
                    && rows.len() == 2
                    && rows[0].rate(RateColumn::Group(PaxGroup::Pax15Plus1)) == Some(9_000_00)
            })
            .returning(|_, rows| Ok(rows.len()));

        let mut form = upload("north", "trip_code,pax15plus1\nNI01,9000\nNI02,9500\n");
        let (region, stored) = upload_rates(&repo, &user, &mut form).expect("expected success");

        assert_eq!(region, Region::North);
        assert_eq!(stored, 2);
    }

    #[test]
    fn upload_rates_rejects_unknown_region() {
        let mut repo = MockRateRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        repo.expect_replace_rates().times(0);

        let mut form = upload("goa", "trip_code,pax15plus1\nG01,9000\n");
        let result = upload_rates(&repo, &user, &mut form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn rates_page_lays_out_cells_in_column_order() {
        let mut repo = MockRateRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_rates()
            .times(1)
            .withf(|region, prefix| *region == Region::International && prefix.is_none())
            .returning(|_, _| {
                Ok(vec![
                    RateRow::new("1", "INT-BKK")
                        .with_rate(RateColumn::Group(PaxGroup::Pax20Plus2), 42_000_00),
                ])
            });

        let data = load_rates_page(&repo, &user, Some("international")).expect("expected success");

        assert_eq!(data.columns.len(), PaxGroup::ALL.len());
        assert_eq!(data.rows[0].cells[0], None);
        assert_eq!(data.rows[0].cells[1], Some(42_000_00));
    }
}
