use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::quotation::{
    NewQuotation as DomainNewQuotation, Quotation as DomainQuotation,
    UpdateQuotation as DomainUpdateQuotation,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quotations)]
pub struct Quotation {
    pub id: i32,
    pub hub_id: i32,
    pub lead_id: Option<i32>,
    pub customer_name: String,
    pub destination: String,
    pub duration: Option<String>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub extras_paise: i64,
    pub discount_paise: i64,
    pub subtotal_paise: i64,
    pub total_amount_paise: i64,
    pub gst_percentage: f64,
    pub gst_amount_paise: i64,
    pub grand_total_paise: i64,
    pub valid_until: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quotations)]
pub struct NewQuotation<'a> {
    pub hub_id: i32,
    pub lead_id: Option<i32>,
    pub customer_name: &'a str,
    pub destination: &'a str,
    pub duration: Option<&'a str>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub extras_paise: i64,
    pub discount_paise: i64,
    pub subtotal_paise: i64,
    pub total_amount_paise: i64,
    pub gst_percentage: f64,
    pub gst_amount_paise: i64,
    pub grand_total_paise: i64,
    pub valid_until: Option<NaiveDate>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::quotations)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateQuotation<'a> {
    pub status: &'a str,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Quotation> for DomainQuotation {
    fn from(value: Quotation) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            lead_id: value.lead_id,
            customer_name: value.customer_name,
            destination: value.destination,
            duration: value.duration,
            pax: value.pax,
            rate_per_head_paise: value.rate_per_head_paise,
            extras_paise: value.extras_paise,
            discount_paise: value.discount_paise,
            subtotal_paise: value.subtotal_paise,
            total_amount_paise: value.total_amount_paise,
            gst_percentage: value.gst_percentage,
            gst_amount_paise: value.gst_amount_paise,
            grand_total_paise: value.grand_total_paise,
            valid_until: value.valid_until,
            status: value.status.parse().unwrap_or_default(),
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewQuotation> for NewQuotation<'a> {
    fn from(value: &'a DomainNewQuotation) -> Self {
        Self {
            hub_id: value.hub_id,
            lead_id: value.lead_id,
            customer_name: value.customer_name.as_str(),
            destination: value.destination.as_str(),
            duration: value.duration.as_deref(),
            pax: value.pax,
            rate_per_head_paise: value.rate_per_head_paise,
            extras_paise: value.extras_paise,
            discount_paise: value.price.discount_paise,
            subtotal_paise: value.price.subtotal_paise,
            total_amount_paise: value.price.total_amount_paise,
            gst_percentage: value.price.gst_percentage,
            gst_amount_paise: value.price.gst_amount_paise,
            grand_total_paise: value.price.grand_total_paise,
            valid_until: value.valid_until,
            status: value.status.as_str(),
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateQuotation> for UpdateQuotation<'a> {
    fn from(value: &'a DomainUpdateQuotation) -> Self {
        Self {
            status: value.status.as_str(),
            valid_until: value.valid_until,
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
