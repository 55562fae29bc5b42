use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::payment::{NewPayment, PaymentDetails, UpdatePayment};
use crate::forms::{
    FieldError, optional_notes, optional_text, parse_date, parse_optional_i32,
    parse_optional_variant, parse_rupees,
};

/// Result type returned by the payment form helpers.
pub type PaymentFormResult<T> = Result<T, PaymentFormError>;

/// Errors that can occur while processing payment forms.
#[derive(Debug, Error)]
pub enum PaymentFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

/// Payload of the add and edit payment forms.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PaymentForm {
    pub trip_id: Option<String>,
    pub payment_type: Option<String>,
    pub mode: Option<String>,
    /// Amount in rupees.
    #[validate(length(min = 1))]
    pub amount: String,
    #[validate(length(max = 128))]
    pub reference: Option<String>,
    pub paid_on: String,
    pub notes: Option<String>,
}

impl PaymentForm {
    pub fn into_payment_details(self) -> PaymentFormResult<PaymentDetails> {
        self.validate()?;

        let amount_paise = parse_rupees(&self.amount)?;
        if amount_paise == 0 {
            return Err(PaymentFormError::ZeroAmount);
        }

        Ok(PaymentDetails {
            trip_id: parse_optional_i32(self.trip_id.as_deref(), "trip")?,
            payment_type: parse_optional_variant(self.payment_type.as_deref())?
                .unwrap_or_default(),
            mode: parse_optional_variant(self.mode.as_deref())?.unwrap_or_default(),
            amount_paise,
            reference: optional_text(self.reference.as_deref()),
            paid_on: parse_date(&self.paid_on)?,
            notes: optional_notes(self.notes.as_deref()),
        })
    }

    pub fn into_new_payment(self, hub_id: i32) -> PaymentFormResult<NewPayment> {
        Ok(NewPayment::new(hub_id, self.into_payment_details()?))
    }

    pub fn into_update_payment(self) -> PaymentFormResult<UpdatePayment> {
        Ok(UpdatePayment {
            details: self.into_payment_details()?,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentMode, PaymentType};

    fn form() -> PaymentForm {
        PaymentForm {
            trip_id: Some("5".into()),
            payment_type: Some("advance".into()),
            mode: Some("bank_transfer".into()),
            amount: "25,000".into(),
            reference: Some(" UTR 8812 ".into()),
            paid_on: "2025-05-02".into(),
            notes: None,
        }
    }

    #[test]
    fn payment_fields_are_parsed() {
        let payment = form().into_new_payment(2).expect("valid payment");

        assert_eq!(payment.hub_id, 2);
        assert_eq!(payment.details.trip_id, Some(5));
        assert_eq!(payment.details.payment_type, PaymentType::Advance);
        assert_eq!(payment.details.mode, PaymentMode::BankTransfer);
        assert_eq!(payment.details.amount_paise, 25_000_00);
        assert_eq!(payment.details.reference.as_deref(), Some("UTR 8812"));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut form = form();
        form.amount = "0".into();

        assert!(matches!(
            form.into_update_payment(),
            Err(PaymentFormError::ZeroAmount)
        ));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let mut form = form();
        form.mode = Some("barter".into());

        assert!(form.into_new_payment(1).is_err());
    }
}
