use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::vendor::{HotelPriceList, VendorCategory, VendorDetails};
use crate::forms::{
    FieldError, checkbox, optional_notes, optional_text, parse_optional_i32,
    parse_optional_rupees, parse_optional_variant, required_text,
};

/// Result type returned by the vendor form helpers.
pub type VendorFormResult<T> = Result<T, VendorFormError>;

/// Errors that can occur while processing vendor forms.
#[derive(Debug, Error)]
pub enum VendorFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("star rating must be between 1 and 7")]
    InvalidStarRating,
    #[error("only hotels can have price lists")]
    PriceListsRequireHotel,
    #[error("price list {row}: {source}")]
    PriceList { row: usize, source: FieldError },
}

/// One tariff row of the vendor form, submitted as `price_lists[i][field]`.
#[derive(Debug, Default, Deserialize)]
pub struct PriceListForm {
    #[serde(default)]
    pub room_category: String,
    pub sharing: Option<String>,
    pub tier: Option<String>,
    pub season: Option<String>,
    pub ep_rate: Option<String>,
    pub cp_rate: Option<String>,
    pub map_rate: Option<String>,
    pub ap_rate: Option<String>,
    pub child_with_bed: Option<String>,
    pub child_without_bed: Option<String>,
    pub extra_bed: Option<String>,
}

impl PriceListForm {
    fn is_blank(&self) -> bool {
        let empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        };
        self.room_category.trim().is_empty()
            && empty(&self.ep_rate)
            && empty(&self.cp_rate)
            && empty(&self.map_rate)
            && empty(&self.ap_rate)
    }

    fn into_price_list(self, row: usize) -> VendorFormResult<HotelPriceList> {
        let row_error = |source| VendorFormError::PriceList { row, source };
        let rate = |value: Option<&str>| parse_optional_rupees(value).map_err(row_error);

        Ok(HotelPriceList {
            room_category: required_text(&self.room_category, "room category")
                .map_err(row_error)?,
            sharing: parse_optional_variant(self.sharing.as_deref())
                .map_err(row_error)?
                .unwrap_or_default(),
            tier: parse_optional_variant(self.tier.as_deref())
                .map_err(row_error)?
                .unwrap_or_default(),
            season: optional_text(self.season.as_deref()),
            ep_rate_paise: rate(self.ep_rate.as_deref())?,
            cp_rate_paise: rate(self.cp_rate.as_deref())?,
            map_rate_paise: rate(self.map_rate.as_deref())?,
            ap_rate_paise: rate(self.ap_rate.as_deref())?,
            child_with_bed_paise: rate(self.child_with_bed.as_deref())?,
            child_without_bed_paise: rate(self.child_without_bed.as_deref())?,
            extra_bed_paise: rate(self.extra_bed.as_deref())?,
        })
    }
}

/// Payload of the add and edit vendor forms, parsed with `serde_qs` because
/// of the nested price lists.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VendorForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub category: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(default, deserialize_with = "pushkind_common::routes::empty_string_as_none")]
    pub email: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub star_rating: Option<String>,
    pub notes: Option<String>,
    /// Checkbox; unticked boxes are not submitted.
    pub is_active: Option<String>,
    #[serde(default)]
    pub price_lists: Vec<PriceListForm>,
}

impl VendorForm {
    /// Validates the payload into the fields shared by inserts and updates.
    pub fn into_vendor_details(self) -> VendorFormResult<VendorDetails> {
        self.validate()?;

        let category: VendorCategory = self.category.parse().map_err(FieldError::from)?;

        let star_rating = parse_optional_i32(self.star_rating.as_deref(), "star rating")?;
        if matches!(star_rating, Some(value) if !(1..=7).contains(&value)) {
            return Err(VendorFormError::InvalidStarRating);
        }

        let mut price_lists = Vec::new();
        for (index, row) in self.price_lists.into_iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            price_lists.push(row.into_price_list(index + 1)?);
        }

        if category != VendorCategory::Hotel && !price_lists.is_empty() {
            return Err(VendorFormError::PriceListsRequireHotel);
        }

        Ok(VendorDetails {
            name: required_text(&self.name, "name")?,
            category,
            contact_person: optional_text(self.contact_person.as_deref()),
            phone: optional_text(self.phone.as_deref()),
            email: optional_text(self.email.as_deref()),
            location: optional_text(self.location.as_deref()),
            address: optional_notes(self.address.as_deref()),
            star_rating,
            notes: optional_notes(self.notes.as_deref()),
            is_active: checkbox(self.is_active.as_deref()),
            price_lists,
        })
    }
}
