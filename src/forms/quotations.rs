use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::{DEFAULT_QUOTATION_GST_PERCENT, PriceBreakdown, PricingError};
use crate::domain::quotation::{NewQuotation, QuotationStatus, UpdateQuotation};
use crate::forms::{
    FieldError, optional_notes, optional_text, parse_optional_date, parse_optional_i32,
    parse_optional_rupees, parse_optional_variant, parse_rupees, required_text,
};

/// Result type returned by the quotation form helpers.
pub type QuotationFormResult<T> = Result<T, QuotationFormError>;

/// Errors that can occur while processing quotation forms.
#[derive(Debug, Error)]
pub enum QuotationFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("pax must be at least 1")]
    InvalidPax,
    #[error("GST must be between 0 and 100 percent")]
    InvalidGst,
    #[error("discount cannot exceed the subtotal")]
    DiscountTooLarge,
    #[error("the quotation amount is too large")]
    AmountTooLarge,
}

impl From<PricingError> for QuotationFormError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::DiscountExceedsSubtotal => Self::DiscountTooLarge,
            PricingError::AmountTooLarge => Self::AmountTooLarge,
        }
    }
}

/// Payload of the "new quotation" form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddQuotationForm {
    /// Lead the quotation was prepared for, if any.
    pub lead_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 128))]
    pub destination: String,
    pub duration: Option<String>,
    pub pax: String,
    /// Per-head rate in rupees.
    pub rate_per_head: String,
    pub extras: Option<String>,
    pub discount: Option<String>,
    /// Blank means the default rate.
    pub gst_percentage: Option<String>,
    pub valid_until: Option<String>,
    pub notes: Option<String>,
}

impl AddQuotationForm {
    /// Validates the payload and prices the quotation.
    pub fn into_new_quotation(self, hub_id: i32) -> QuotationFormResult<NewQuotation> {
        self.validate()?;

        let pax = parse_optional_i32(Some(&self.pax), "pax")?
            .ok_or(FieldError::Required { field: "pax" })?;
        if pax < 1 {
            return Err(QuotationFormError::InvalidPax);
        }

        let gst_percentage = match self
            .gst_percentage
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            Some(value) => value
                .parse::<f64>()
                .map_err(|_| QuotationFormError::InvalidGst)?,
            None => DEFAULT_QUOTATION_GST_PERCENT,
        };
        if !(0.0..=100.0).contains(&gst_percentage) {
            return Err(QuotationFormError::InvalidGst);
        }

        let rate_per_head_paise = parse_rupees(&self.rate_per_head)?;
        let extras_paise = parse_optional_rupees(self.extras.as_deref())?.unwrap_or(0);
        let discount_paise = parse_optional_rupees(self.discount.as_deref())?.unwrap_or(0);

        let price = PriceBreakdown::compute(
            rate_per_head_paise,
            pax,
            extras_paise,
            discount_paise,
            gst_percentage,
        )?;

        Ok(NewQuotation {
            hub_id,
            lead_id: parse_optional_i32(self.lead_id.as_deref(), "lead")?,
            customer_name: required_text(&self.customer_name, "customer name")?,
            destination: required_text(&self.destination, "destination")?,
            duration: optional_text(self.duration.as_deref()),
            pax,
            rate_per_head_paise,
            extras_paise,
            price,
            valid_until: parse_optional_date(self.valid_until.as_deref())?,
            status: QuotationStatus::Draft,
            notes: optional_notes(self.notes.as_deref()),
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}

/// Payload of the quotation edit form. Prices are fixed once issued.
///
/// The status is required so a blank submission never resets it.
#[derive(Debug, Default, Deserialize)]
pub struct EditQuotationForm {
    pub status: Option<String>,
    pub valid_until: Option<String>,
    pub notes: Option<String>,
}

impl EditQuotationForm {
    pub fn into_update_quotation(self) -> QuotationFormResult<UpdateQuotation> {
        Ok(UpdateQuotation {
            status: parse_optional_variant(self.status.as_deref())?
                .ok_or(FieldError::Required { field: "status" })?,
            valid_until: parse_optional_date(self.valid_until.as_deref())?,
            notes: optional_notes(self.notes.as_deref()),
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}
