//! Rows of the regional rate tables.
//!
//! The south, north, north-east and international tables share one layout,
//! so a single positional [`GroupRate`] row is loaded from any of them.

use diesel::prelude::*;

use crate::domain::rate::{HotelCategory, KashmirColumn, KashmirPax, PaxGroup, RateColumn, RateRow};

#[derive(Debug, Clone, Queryable)]
pub struct GroupRate {
    pub id: i32,
    pub sl_code: String,
    pub trip_code: String,
    pub details: Option<String>,
    pub itinerary: Option<String>,
    pub pax15plus1: Option<i64>,
    pub pax20plus2: Option<i64>,
    pub pax25plus2: Option<i64>,
    pub pax30plus2: Option<i64>,
    pub pax35plus2: Option<i64>,
    pub pax40plus3: Option<i64>,
    pub pax45plus3: Option<i64>,
}

/// Column values of a group rate row about to be inserted.
#[derive(Debug, Clone, Copy)]
pub struct NewGroupRate<'a> {
    pub sl_code: &'a str,
    pub trip_code: &'a str,
    pub details: Option<&'a str>,
    pub itinerary: Option<&'a str>,
    pub pax15plus1: Option<i64>,
    pub pax20plus2: Option<i64>,
    pub pax25plus2: Option<i64>,
    pub pax30plus2: Option<i64>,
    pub pax35plus2: Option<i64>,
    pub pax40plus3: Option<i64>,
    pub pax45plus3: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::kashmir_rates)]
pub struct KashmirRate {
    pub id: i32,
    pub sl_code: String,
    pub trip_code: String,
    pub details: Option<String>,
    pub itinerary: Option<String>,
    pub pax02_standard: Option<i64>,
    pub pax02_deluxe: Option<i64>,
    pub pax02_luxury: Option<i64>,
    pub pax04_standard: Option<i64>,
    pub pax04_deluxe: Option<i64>,
    pub pax04_luxury: Option<i64>,
    pub pax06_standard: Option<i64>,
    pub pax06_deluxe: Option<i64>,
    pub pax06_luxury: Option<i64>,
    pub seasonal_pax02_standard: Option<i64>,
    pub seasonal_pax02_deluxe: Option<i64>,
    pub seasonal_pax02_luxury: Option<i64>,
    pub seasonal_pax04_standard: Option<i64>,
    pub seasonal_pax04_deluxe: Option<i64>,
    pub seasonal_pax04_luxury: Option<i64>,
    pub seasonal_pax06_standard: Option<i64>,
    pub seasonal_pax06_deluxe: Option<i64>,
    pub seasonal_pax06_luxury: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::kashmir_rates)]
pub struct NewKashmirRate<'a> {
    pub sl_code: &'a str,
    pub trip_code: &'a str,
    pub details: Option<&'a str>,
    pub itinerary: Option<&'a str>,
    pub pax02_standard: Option<i64>,
    pub pax02_deluxe: Option<i64>,
    pub pax02_luxury: Option<i64>,
    pub pax04_standard: Option<i64>,
    pub pax04_deluxe: Option<i64>,
    pub pax04_luxury: Option<i64>,
    pub pax06_standard: Option<i64>,
    pub pax06_deluxe: Option<i64>,
    pub pax06_luxury: Option<i64>,
    pub seasonal_pax02_standard: Option<i64>,
    pub seasonal_pax02_deluxe: Option<i64>,
    pub seasonal_pax02_luxury: Option<i64>,
    pub seasonal_pax04_standard: Option<i64>,
    pub seasonal_pax04_deluxe: Option<i64>,
    pub seasonal_pax04_luxury: Option<i64>,
    pub seasonal_pax06_standard: Option<i64>,
    pub seasonal_pax06_deluxe: Option<i64>,
    pub seasonal_pax06_luxury: Option<i64>,
}

fn kashmir(seasonal: bool, pax: KashmirPax, category: HotelCategory) -> RateColumn {
    RateColumn::Kashmir(KashmirColumn {
        seasonal,
        pax,
        category,
    })
}

fn collect_rates(
    values: impl IntoIterator<Item = (RateColumn, Option<i64>)>,
) -> Vec<(RateColumn, i64)> {
    values
        .into_iter()
        .filter_map(|(column, value)| value.map(|value| (column, value)))
        .collect()
}

impl From<GroupRate> for RateRow {
    fn from(value: GroupRate) -> Self {
        let rates = collect_rates([
            (RateColumn::Group(PaxGroup::Pax15Plus1), value.pax15plus1),
            (RateColumn::Group(PaxGroup::Pax20Plus2), value.pax20plus2),
            (RateColumn::Group(PaxGroup::Pax25Plus2), value.pax25plus2),
            (RateColumn::Group(PaxGroup::Pax30Plus2), value.pax30plus2),
            (RateColumn::Group(PaxGroup::Pax35Plus2), value.pax35plus2),
            (RateColumn::Group(PaxGroup::Pax40Plus3), value.pax40plus3),
            (RateColumn::Group(PaxGroup::Pax45Plus3), value.pax45plus3),
        ]);

        RateRow {
            sl_code: value.sl_code,
            trip_code: value.trip_code,
            details: value.details,
            itinerary: value.itinerary,
            rates: rates.into_iter().collect(),
        }
    }
}

impl From<KashmirRate> for RateRow {
    fn from(value: KashmirRate) -> Self {
        use HotelCategory::{Deluxe, Luxury, Standard};
        use KashmirPax::{Four, Six, Two};

        let rates = collect_rates([
            (kashmir(false, Two, Standard), value.pax02_standard),
            (kashmir(false, Two, Deluxe), value.pax02_deluxe),
            (kashmir(false, Two, Luxury), value.pax02_luxury),
            (kashmir(false, Four, Standard), value.pax04_standard),
            (kashmir(false, Four, Deluxe), value.pax04_deluxe),
            (kashmir(false, Four, Luxury), value.pax04_luxury),
            (kashmir(false, Six, Standard), value.pax06_standard),
            (kashmir(false, Six, Deluxe), value.pax06_deluxe),
            (kashmir(false, Six, Luxury), value.pax06_luxury),
            (kashmir(true, Two, Standard), value.seasonal_pax02_standard),
            (kashmir(true, Two, Deluxe), value.seasonal_pax02_deluxe),
            (kashmir(true, Two, Luxury), value.seasonal_pax02_luxury),
            (kashmir(true, Four, Standard), value.seasonal_pax04_standard),
            (kashmir(true, Four, Deluxe), value.seasonal_pax04_deluxe),
            (kashmir(true, Four, Luxury), value.seasonal_pax04_luxury),
            (kashmir(true, Six, Standard), value.seasonal_pax06_standard),
            (kashmir(true, Six, Deluxe), value.seasonal_pax06_deluxe),
            (kashmir(true, Six, Luxury), value.seasonal_pax06_luxury),
        ]);

        RateRow {
            sl_code: value.sl_code,
            trip_code: value.trip_code,
            details: value.details,
            itinerary: value.itinerary,
            rates: rates.into_iter().collect(),
        }
    }
}

impl<'a> From<&'a RateRow> for NewGroupRate<'a> {
    fn from(value: &'a RateRow) -> Self {
        let rate = |group| value.rates.get(&RateColumn::Group(group)).copied();
        Self {
            sl_code: value.sl_code.as_str(),
            trip_code: value.trip_code.as_str(),
            details: value.details.as_deref(),
            itinerary: value.itinerary.as_deref(),
            pax15plus1: rate(PaxGroup::Pax15Plus1),
            pax20plus2: rate(PaxGroup::Pax20Plus2),
            pax25plus2: rate(PaxGroup::Pax25Plus2),
            pax30plus2: rate(PaxGroup::Pax30Plus2),
            pax35plus2: rate(PaxGroup::Pax35Plus2),
            pax40plus3: rate(PaxGroup::Pax40Plus3),
            pax45plus3: rate(PaxGroup::Pax45Plus3),
        }
    }
}

impl<'a> From<&'a RateRow> for NewKashmirRate<'a> {
    fn from(value: &'a RateRow) -> Self {
        use HotelCategory::{Deluxe, Luxury, Standard};
        use KashmirPax::{Four, Six, Two};

        let rate = |seasonal, pax, category| {
            value.rates.get(&kashmir(seasonal, pax, category)).copied()
        };
        Self {
            sl_code: value.sl_code.as_str(),
            trip_code: value.trip_code.as_str(),
            details: value.details.as_deref(),
            itinerary: value.itinerary.as_deref(),
            pax02_standard: rate(false, Two, Standard),
            pax02_deluxe: rate(false, Two, Deluxe),
            pax02_luxury: rate(false, Two, Luxury),
            pax04_standard: rate(false, Four, Standard),
            pax04_deluxe: rate(false, Four, Deluxe),
            pax04_luxury: rate(false, Four, Luxury),
            pax06_standard: rate(false, Six, Standard),
            pax06_deluxe: rate(false, Six, Deluxe),
            pax06_luxury: rate(false, Six, Luxury),
            seasonal_pax02_standard: rate(true, Two, Standard),
            seasonal_pax02_deluxe: rate(true, Two, Deluxe),
            seasonal_pax02_luxury: rate(true, Two, Luxury),
            seasonal_pax04_standard: rate(true, Four, Standard),
            seasonal_pax04_deluxe: rate(true, Four, Deluxe),
            seasonal_pax04_luxury: rate(true, Four, Luxury),
            seasonal_pax06_standard: rate(true, Six, Standard),
            seasonal_pax06_deluxe: rate(true, Six, Deluxe),
            seasonal_pax06_luxury: rate(true, Six, Luxury),
        }
    }
}
