//! Package rate lookup for the public finder.
//!
//! Every regional rate table stores one price column per pax group (or, for
//! Kashmir, per pax count and hotel category). The selector submitted by the
//! finder is resolved through the enumerations below; there is no string
//! concatenation of column names outside of [`RateColumn::column_name`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Regional rate table.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    South,
    North,
    Kashmir,
    Northeast,
    International,
}

text_enum!(Region, "region", {
    South => "south",
    North => "north",
    Kashmir => "kashmir",
    Northeast => "northeast",
    International => "international",
});

impl Region {
    /// Name shown in the finder.
    pub fn title(&self) -> &'static str {
        match self {
            Region::South => "South India",
            Region::North => "North India",
            Region::Kashmir => "Kashmir",
            Region::Northeast => "North-East",
            Region::International => "International",
        }
    }
}

/// Group size priced by the south, north, north-east and international tables.
///
/// `N+M` reads as N paying travellers plus M complimentary escorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaxGroup {
    Pax15Plus1,
    Pax20Plus2,
    Pax25Plus2,
    Pax30Plus2,
    Pax35Plus2,
    Pax40Plus3,
    Pax45Plus3,
}

/// Labels accepted from the finder, in display order.
///
/// `35+3` is a legacy label still used by printed brochures; those groups are
/// priced in the `35+2` column.
const PAX_GROUP_LABELS: &[(&str, PaxGroup)] = &[
    ("15+1", PaxGroup::Pax15Plus1),
    ("20+2", PaxGroup::Pax20Plus2),
    ("25+2", PaxGroup::Pax25Plus2),
    ("30+2", PaxGroup::Pax30Plus2),
    ("35+2", PaxGroup::Pax35Plus2),
    ("35+3", PaxGroup::Pax35Plus2),
    ("40+3", PaxGroup::Pax40Plus3),
    ("45+3", PaxGroup::Pax45Plus3),
];

impl PaxGroup {
    pub const ALL: &'static [PaxGroup] = &[
        PaxGroup::Pax15Plus1,
        PaxGroup::Pax20Plus2,
        PaxGroup::Pax25Plus2,
        PaxGroup::Pax30Plus2,
        PaxGroup::Pax35Plus2,
        PaxGroup::Pax40Plus3,
        PaxGroup::Pax45Plus3,
    ];

    /// Canonical label of the group.
    pub fn label(&self) -> &'static str {
        match self {
            PaxGroup::Pax15Plus1 => "15+1",
            PaxGroup::Pax20Plus2 => "20+2",
            PaxGroup::Pax25Plus2 => "25+2",
            PaxGroup::Pax30Plus2 => "30+2",
            PaxGroup::Pax35Plus2 => "35+2",
            PaxGroup::Pax40Plus3 => "40+3",
            PaxGroup::Pax45Plus3 => "45+3",
        }
    }

    /// Rate table column holding the group's price.
    pub fn column_name(&self) -> &'static str {
        match self {
            PaxGroup::Pax15Plus1 => "pax15plus1",
            PaxGroup::Pax20Plus2 => "pax20plus2",
            PaxGroup::Pax25Plus2 => "pax25plus2",
            PaxGroup::Pax30Plus2 => "pax30plus2",
            PaxGroup::Pax35Plus2 => "pax35plus2",
            PaxGroup::Pax40Plus3 => "pax40plus3",
            PaxGroup::Pax45Plus3 => "pax45plus3",
        }
    }

    /// Resolve a finder label, including legacy aliases.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        PAX_GROUP_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, group)| *group)
    }
}

/// Number of travellers priced by the Kashmir table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KashmirPax {
    Two,
    Four,
    Six,
}

impl KashmirPax {
    pub const ALL: &'static [KashmirPax] = &[KashmirPax::Two, KashmirPax::Four, KashmirPax::Six];

    pub fn count(&self) -> u8 {
        match self {
            KashmirPax::Two => 2,
            KashmirPax::Four => 4,
            KashmirPax::Six => 6,
        }
    }

    fn from_count(count: u8) -> Option<Self> {
        match count {
            2 => Some(KashmirPax::Two),
            4 => Some(KashmirPax::Four),
            6 => Some(KashmirPax::Six),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HotelCategory {
    Standard,
    Deluxe,
    Luxury,
}

text_enum!(HotelCategory, "hotel category", {
    Standard => "standard",
    Deluxe => "deluxe",
    Luxury => "luxury",
});

/// Price column of the Kashmir table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KashmirColumn {
    /// Peak-season tariff instead of the regular one.
    pub seasonal: bool,
    pub pax: KashmirPax,
    pub category: HotelCategory,
}

const SEASONAL_PREFIX: &str = "seasonal_";

impl KashmirColumn {
    /// Every Kashmir column in table order.
    pub fn all() -> Vec<KashmirColumn> {
        let mut columns = Vec::with_capacity(18);
        for seasonal in [false, true] {
            for pax in KashmirPax::ALL {
                for category in HotelCategory::ALL {
                    columns.push(KashmirColumn {
                        seasonal,
                        pax: *pax,
                        category: *category,
                    });
                }
            }
        }
        columns
    }

    /// Parse `<paxCount>_<hotelCategory>`, optionally prefixed by `seasonal_`.
    ///
    /// The pax count may be zero padded (`02_deluxe`).
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim().to_ascii_lowercase();
        let (seasonal, rest) = match selector.strip_prefix(SEASONAL_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, selector.as_str()),
        };
        let (count, category) = rest.split_once('_')?;
        let pax = KashmirPax::from_count(count.parse().ok()?)?;
        let category: HotelCategory = category.parse().ok()?;

        Some(Self {
            seasonal,
            pax,
            category,
        })
    }

    /// Canonical selector accepted by [`KashmirColumn::parse`].
    pub fn selector(&self) -> String {
        let prefix = if self.seasonal { SEASONAL_PREFIX } else { "" };
        format!("{prefix}{}_{}", self.pax.count(), self.category)
    }

    pub fn column_name(&self) -> String {
        let prefix = if self.seasonal { SEASONAL_PREFIX } else { "" };
        format!("{prefix}pax{:02}_{}", self.pax.count(), self.category)
    }

    pub fn label(&self) -> String {
        let season = if self.seasonal { "Seasonal, " } else { "" };
        let category = match self.category {
            HotelCategory::Standard => "Standard",
            HotelCategory::Deluxe => "Deluxe",
            HotelCategory::Luxury => "Luxury",
        };
        format!("{season}{} pax, {category}", self.pax.count())
    }
}

/// Price column of any regional rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateColumn {
    Group(PaxGroup),
    Kashmir(KashmirColumn),
}

impl RateColumn {
    /// Columns stored by the table of `region`, in table order.
    pub fn columns_for(region: Region) -> Vec<RateColumn> {
        match region {
            Region::Kashmir => KashmirColumn::all()
                .into_iter()
                .map(RateColumn::Kashmir)
                .collect(),
            _ => PaxGroup::ALL.iter().copied().map(RateColumn::Group).collect(),
        }
    }

    /// Look up a column of `region` by its table column name.
    pub fn from_column_name(region: Region, name: &str) -> Option<RateColumn> {
        let name = name.trim();
        Self::columns_for(region)
            .into_iter()
            .find(|column| column.column_name() == name)
    }

    pub fn column_name(&self) -> String {
        match self {
            RateColumn::Group(group) => group.column_name().to_string(),
            RateColumn::Kashmir(column) => column.column_name(),
        }
    }

    /// Canonical pax-size selector for the finder.
    pub fn selector(&self) -> String {
        match self {
            RateColumn::Group(group) => group.label().to_string(),
            RateColumn::Kashmir(column) => column.selector(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RateColumn::Group(group) => format!("{} pax", group.label()),
            RateColumn::Kashmir(column) => column.label(),
        }
    }
}

/// Errors raised while resolving a finder selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateLookupError {
    #[error("unknown region `{0}`")]
    UnknownRegion(String),
    #[error("unknown pax group `{0}`")]
    UnknownPaxGroup(String),
    #[error("unknown Kashmir package `{0}`")]
    UnknownKashmirSelector(String),
}

/// Resolve the column priced for `pax_size` in `region`'s table.
pub fn resolve_column(region: Region, pax_size: &str) -> Result<RateColumn, RateLookupError> {
    match region {
        Region::Kashmir => KashmirColumn::parse(pax_size)
            .map(RateColumn::Kashmir)
            .ok_or_else(|| RateLookupError::UnknownKashmirSelector(pax_size.trim().to_string())),
        _ => PaxGroup::from_label(pax_size)
            .map(RateColumn::Group)
            .ok_or_else(|| RateLookupError::UnknownPaxGroup(pax_size.trim().to_string())),
    }
}

/// Trip-code prefix implied by a duration such as `2D3N`.
///
/// Only the south table encodes the duration in its trip codes (`FWS<days>...`).
pub fn trip_code_prefix(region: Region, duration: Option<&str>) -> Option<String> {
    if region != Region::South {
        return None;
    }
    let days = duration?.trim().chars().next()?;
    days.is_ascii_digit().then(|| format!("FWS{days}"))
}

/// Fully resolved finder selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuery {
    pub region: Region,
    pub column: RateColumn,
    /// Restricts rows to trip codes with this prefix.
    pub trip_code_prefix: Option<String>,
}

impl RateQuery {
    /// Resolve the raw finder selection.
    pub fn resolve(
        region: &str,
        pax_size: &str,
        duration: Option<&str>,
    ) -> Result<Self, RateLookupError> {
        let region: Region = region
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| RateLookupError::UnknownRegion(region.trim().to_string()))?;
        let column = resolve_column(region, pax_size)?;

        Ok(Self {
            region,
            column,
            trip_code_prefix: trip_code_prefix(region, duration),
        })
    }
}

/// One row of a regional rate table.
///
/// `rates` only holds the columns that carry a value.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub sl_code: String,
    pub trip_code: String,
    pub details: Option<String>,
    pub itinerary: Option<String>,
    pub rates: HashMap<RateColumn, i64>,
}

impl RateRow {
    pub fn new(sl_code: impl Into<String>, trip_code: impl Into<String>) -> Self {
        Self {
            sl_code: sl_code.into(),
            trip_code: trip_code.into(),
            details: None,
            itinerary: None,
            rates: HashMap::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_rate(mut self, column: RateColumn, rate_paise: i64) -> Self {
        self.rates.insert(column, rate_paise);
        self
    }

    /// Price in `column` when it is a positive amount.
    pub fn rate(&self, column: RateColumn) -> Option<i64> {
        self.rates.get(&column).copied().filter(|rate| *rate > 0)
    }
}

/// Finder result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PackageRate {
    pub sl_code: String,
    pub trip_code: String,
    pub details: Option<String>,
    pub rate_paise: i64,
    pub itinerary: Option<String>,
}

/// Project the rows priced in `column`, skipping empty and zero prices.
pub fn select_package_rates(rows: Vec<RateRow>, column: RateColumn) -> Vec<PackageRate> {
    rows.into_iter()
        .filter_map(|row| {
            let rate_paise = row.rate(column)?;
            Some(PackageRate {
                sl_code: row.sl_code,
                trip_code: row.trip_code,
                details: row.details,
                rate_paise,
                itinerary: row.itinerary,
            })
        })
        .collect()
}
