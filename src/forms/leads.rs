use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::follow_up::NewFollowUp;
use crate::domain::lead::{LeadPriority, LeadStatus, NewLead, UpdateLead};
use crate::forms::{
    FieldError, optional_notes, optional_text, parse_datetime, parse_optional_date,
    parse_optional_i32, parse_optional_rupees, parse_optional_variant, required_text,
};

const NAME_MAX_LEN: u64 = 128;
const PHONE_MAX_LEN: u64 = 32;

/// Result type returned by the lead form helpers.
pub type LeadFormResult<T> = Result<T, LeadFormError>;

/// Errors that can occur while processing lead forms.
#[derive(Debug, Error)]
pub enum LeadFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("pax must be at least 1")]
    InvalidPax,
}

impl From<crate::domain::UnknownVariant> for LeadFormError {
    fn from(value: crate::domain::UnknownVariant) -> Self {
        LeadFormError::Field(value.into())
    }
}

/// Payload of the add and edit lead forms.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LeadForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub customer_name: String,
    #[validate(length(min = 1, max = PHONE_MAX_LEN))]
    pub phone: String,
    #[validate(email)]
    #[serde(default, deserialize_with = "pushkind_common::routes::empty_string_as_none")]
    pub email: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<String>,
    /// Free-form duration label such as `4N5D`.
    pub duration: Option<String>,
    pub pax: Option<String>,
    /// Budget in rupees.
    pub budget: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

struct LeadFields {
    customer_name: String,
    phone: String,
    email: Option<String>,
    destination: Option<String>,
    travel_date: Option<chrono::NaiveDate>,
    duration: Option<String>,
    pax: Option<i32>,
    budget_paise: Option<i64>,
    source: Option<String>,
    status: LeadStatus,
    priority: LeadPriority,
    assigned_to: Option<String>,
    notes: Option<String>,
}

impl LeadForm {
    fn into_fields(self) -> LeadFormResult<LeadFields> {
        self.validate()?;

        let pax = parse_optional_i32(self.pax.as_deref(), "pax")?;
        if matches!(pax, Some(value) if value < 1) {
            return Err(LeadFormError::InvalidPax);
        }

        Ok(LeadFields {
            customer_name: required_text(&self.customer_name, "customer name")?,
            phone: required_text(&self.phone, "phone")?,
            email: optional_text(self.email.as_deref()),
            destination: optional_text(self.destination.as_deref()),
            travel_date: parse_optional_date(self.travel_date.as_deref())?,
            duration: optional_text(self.duration.as_deref()),
            pax,
            budget_paise: parse_optional_rupees(self.budget.as_deref())?,
            source: optional_text(self.source.as_deref()),
            status: parse_optional_variant(self.status.as_deref())?.unwrap_or_default(),
            priority: parse_optional_variant(self.priority.as_deref())?.unwrap_or_default(),
            assigned_to: optional_text(self.assigned_to.as_deref()),
            notes: optional_notes(self.notes.as_deref()),
        })
    }

    /// Validates and sanitizes the payload into a domain `NewLead`.
    pub fn into_new_lead(self, hub_id: i32) -> LeadFormResult<NewLead> {
        let fields = self.into_fields()?;
        let mut lead = NewLead::new(hub_id, fields.customer_name, fields.phone)
            .with_status(fields.status)
            .with_priority(fields.priority);

        lead.email = fields.email;
        lead.destination = fields.destination;
        lead.travel_date = fields.travel_date;
        lead.duration = fields.duration;
        lead.pax = fields.pax;
        lead.budget_paise = fields.budget_paise;
        lead.source = fields.source;
        lead.assigned_to = fields.assigned_to;
        lead.notes = fields.notes;

        Ok(lead)
    }

    /// Validates and sanitizes the payload into a full lead replacement.
    pub fn into_update_lead(self) -> LeadFormResult<UpdateLead> {
        let fields = self.into_fields()?;
        Ok(UpdateLead {
            customer_name: fields.customer_name,
            phone: fields.phone,
            email: fields.email,
            destination: fields.destination,
            travel_date: fields.travel_date,
            duration: fields.duration,
            pax: fields.pax,
            budget_paise: fields.budget_paise,
            source: fields.source,
            status: fields.status,
            priority: fields.priority,
            assigned_to: fields.assigned_to,
            notes: fields.notes,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}

/// Quick status change from the lead list.
#[derive(Debug, Deserialize)]
pub struct LeadStatusForm {
    pub status: String,
}

impl LeadStatusForm {
    pub fn into_status(self) -> LeadFormResult<LeadStatus> {
        Ok(self.status.parse()?)
    }
}

/// Payload of the "schedule follow-up" form on the lead page.
#[derive(Debug, Deserialize, Validate)]
pub struct AddFollowUpForm {
    /// `datetime-local` value.
    #[validate(length(min = 1))]
    pub due_at: String,
    pub note: Option<String>,
}

impl AddFollowUpForm {
    pub fn into_new_follow_up(self, lead_id: i32) -> LeadFormResult<NewFollowUp> {
        self.validate()?;
        let due_at = parse_datetime(&self.due_at)?;
        Ok(NewFollowUp::new(
            lead_id,
            due_at,
            optional_notes(self.note.as_deref()),
        ))
    }
}
