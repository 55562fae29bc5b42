use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use csv::{StringRecord, Trim};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::rate::{RateColumn, RateLookupError, RateQuery, RateRow, Region};
use crate::forms::{FieldError, optional_notes, optional_text, parse_rupees};

/// Selection submitted by the public finder.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FinderQuery {
    pub region: Option<String>,
    pub pax_size: Option<String>,
    /// Duration label such as `2D3N`, used by the south table only.
    pub duration: Option<String>,
}

impl FinderQuery {
    /// Resolve the selection. `None` until both region and pax size are chosen.
    pub fn resolve(&self) -> Result<Option<RateQuery>, RateLookupError> {
        let filled = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let (Some(region), Some(pax_size)) = (filled(&self.region), filled(&self.pax_size)) else {
            return Ok(None);
        };
        let duration = filled(&self.duration);

        RateQuery::resolve(&region, &pax_size, duration.as_deref()).map(Some)
    }
}

/// Result type returned by the rate upload helpers.
pub type RateFormResult<T> = Result<T, RateFormError>;

/// Errors that can occur while parsing an uploaded rate table.
#[derive(Debug, Error)]
pub enum RateFormError {
    #[error(transparent)]
    Lookup(#[from] RateLookupError),
    #[error("error reading csv file")]
    FileRead(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("upload is missing the required `{0}` header")]
    MissingHeader(&'static str),
    #[error("unknown column `{column}` for the {region} table")]
    UnknownColumn { region: Region, column: String },
    #[error("row {row} is missing a trip code")]
    MissingTripCode { row: usize },
    #[error("row {row}, column {column}: {source}")]
    Amount {
        row: usize,
        column: String,
        source: FieldError,
    },
    #[error("upload contains no rates")]
    EmptyUpload,
}

#[derive(MultipartForm)]
/// Multipart form replacing one regional rate table from a CSV file.
pub struct UploadRatesForm {
    pub region: Text<String>,
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadRatesForm {
    /// Parse the uploaded file into the rows of the chosen region.
    pub fn parse(&mut self) -> RateFormResult<(Region, Vec<RateRow>)> {
        let region = parse_region(&self.region)?;
        self.csv.file.rewind()?;
        let rows = parse_rate_rows(self.csv.file.by_ref(), region)?;
        Ok((region, rows))
    }
}

fn parse_region(value: &str) -> Result<Region, RateLookupError> {
    value
        .trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| RateLookupError::UnknownRegion(value.trim().to_string()))
}

enum RateField {
    SlCode,
    TripCode,
    Details,
    Itinerary,
    Rate(RateColumn),
}

fn locate_fields(headers: &StringRecord, region: Region) -> RateFormResult<Vec<RateField>> {
    let mut fields = Vec::with_capacity(headers.len());

    for header in headers.iter() {
        let name = header.trim().to_ascii_lowercase();
        let field = match name.as_str() {
            "sl_code" => RateField::SlCode,
            "trip_code" => RateField::TripCode,
            "details" => RateField::Details,
            "itinerary" => RateField::Itinerary,
            other => match RateColumn::from_column_name(region, other) {
                Some(column) => RateField::Rate(column),
                None => {
                    return Err(RateFormError::UnknownColumn {
                        region,
                        column: header.to_string(),
                    });
                }
            },
        };
        fields.push(field);
    }

    if !fields.iter().any(|field| matches!(field, RateField::TripCode)) {
        return Err(RateFormError::MissingHeader("trip_code"));
    }

    Ok(fields)
}

/// Parse a rate table export. Amounts are rupees; blank cells leave the price empty.
pub fn parse_rate_rows<R: Read>(reader: R, region: Region) -> RateFormResult<Vec<RateRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let fields = locate_fields(&headers, region)?;

    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row_number = index + 2; // account for header row

        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        let mut row = RateRow::new(String::new(), String::new());

        for (field, value) in fields.iter().zip(record.iter()) {
            match field {
                RateField::SlCode => row.sl_code = value.trim().to_string(),
                RateField::TripCode => row.trip_code = value.trim().to_string(),
                RateField::Details => row.details = optional_text(Some(value)),
                RateField::Itinerary => row.itinerary = optional_notes(Some(value)),
                RateField::Rate(column) => {
                    if value.trim().is_empty() {
                        continue;
                    }
                    let amount = parse_rupees(value).map_err(|source| RateFormError::Amount {
                        row: row_number,
                        column: column.column_name(),
                        source,
                    })?;
                    row.rates.insert(*column, amount);
                }
            }
        }

        if row.trip_code.is_empty() {
            return Err(RateFormError::MissingTripCode { row: row_number });
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(RateFormError::EmptyUpload);
    }

    Ok(rows)
}
