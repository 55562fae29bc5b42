use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::payment::{Payment as DomainPayment, PaymentDetails};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: i32,
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub payment_type: String,
    pub mode: String,
    pub amount_paise: i64,
    pub reference: Option<String>,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub payment_type: &'a str,
    pub mode: &'a str,
    pub amount_paise: i64,
    pub reference: Option<&'a str>,
    pub paid_on: NaiveDate,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePayment<'a> {
    pub trip_id: Option<i32>,
    pub payment_type: &'a str,
    pub mode: &'a str,
    pub amount_paise: i64,
    pub reference: Option<&'a str>,
    pub paid_on: NaiveDate,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Payment> for DomainPayment {
    fn from(value: Payment) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            trip_id: value.trip_id,
            payment_type: value.payment_type.parse().unwrap_or_default(),
            mode: value.mode.parse().unwrap_or_default(),
            amount_paise: value.amount_paise,
            reference: value.reference,
            paid_on: value.paid_on,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a crate::domain::payment::NewPayment> for NewPayment<'a> {
    fn from(value: &'a crate::domain::payment::NewPayment) -> Self {
        let details: &PaymentDetails = &value.details;
        Self {
            hub_id: value.hub_id,
            trip_id: details.trip_id,
            payment_type: details.payment_type.as_str(),
            mode: details.mode.as_str(),
            amount_paise: details.amount_paise,
            reference: details.reference.as_deref(),
            paid_on: details.paid_on,
            notes: details.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a crate::domain::payment::UpdatePayment> for UpdatePayment<'a> {
    fn from(value: &'a crate::domain::payment::UpdatePayment) -> Self {
        let details: &PaymentDetails = &value.details;
        Self {
            trip_id: details.trip_id,
            payment_type: details.payment_type.as_str(),
            mode: details.mode.as_str(),
            amount_paise: details.amount_paise,
            reference: details.reference.as_deref(),
            paid_on: details.paid_on,
            notes: details.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
