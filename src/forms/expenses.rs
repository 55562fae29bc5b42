use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::expense::{ExpenseDetails, NewExpense, UpdateExpense};
use crate::forms::{
    FieldError, optional_notes, parse_date, parse_optional_i32, parse_optional_variant,
    parse_rupees, required_text,
};

/// Result type returned by the expense form helpers.
pub type ExpenseFormResult<T> = Result<T, ExpenseFormError>;

/// Errors that can occur while processing expense forms.
#[derive(Debug, Error)]
pub enum ExpenseFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

/// Payload of the add and edit expense forms.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExpenseForm {
    pub trip_id: Option<String>,
    pub vendor_id: Option<String>,
    pub category: Option<String>,
    pub mode: Option<String>,
    /// Amount in rupees.
    #[validate(length(min = 1))]
    pub amount: String,
    #[validate(length(min = 1, max = 256))]
    pub description: String,
    pub spent_on: String,
    pub notes: Option<String>,
}

impl ExpenseForm {
    pub fn into_expense_details(self) -> ExpenseFormResult<ExpenseDetails> {
        self.validate()?;

        let amount_paise = parse_rupees(&self.amount)?;
        if amount_paise == 0 {
            return Err(ExpenseFormError::ZeroAmount);
        }

        Ok(ExpenseDetails {
            trip_id: parse_optional_i32(self.trip_id.as_deref(), "trip")?,
            vendor_id: parse_optional_i32(self.vendor_id.as_deref(), "vendor")?,
            category: parse_optional_variant(self.category.as_deref())?.unwrap_or_default(),
            mode: parse_optional_variant(self.mode.as_deref())?.unwrap_or_default(),
            amount_paise,
            description: required_text(&self.description, "description")?,
            spent_on: parse_date(&self.spent_on)?,
            notes: optional_notes(self.notes.as_deref()),
        })
    }

    pub fn into_new_expense(self, hub_id: i32) -> ExpenseFormResult<NewExpense> {
        Ok(NewExpense::new(hub_id, self.into_expense_details()?))
    }

    pub fn into_update_expense(self) -> ExpenseFormResult<UpdateExpense> {
        Ok(UpdateExpense {
            details: self.into_expense_details()?,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}
