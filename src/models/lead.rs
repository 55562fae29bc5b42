use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, NewLead as DomainNewLead, UpdateLead as DomainUpdateLead,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
pub struct Lead {
    pub id: i32,
    pub hub_id: i32,
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub duration: Option<String>,
    pub pax: Option<i32>,
    pub budget_paise: Option<i64>,
    pub source: Option<String>,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
pub struct NewLead<'a> {
    pub hub_id: i32,
    pub customer_name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub destination: Option<&'a str>,
    pub travel_date: Option<NaiveDate>,
    pub duration: Option<&'a str>,
    pub pax: Option<i32>,
    pub budget_paise: Option<i64>,
    pub source: Option<&'a str>,
    pub status: &'a str,
    pub priority: &'a str,
    pub assigned_to: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateLead<'a> {
    pub customer_name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub destination: Option<&'a str>,
    pub travel_date: Option<NaiveDate>,
    pub duration: Option<&'a str>,
    pub pax: Option<i32>,
    pub budget_paise: Option<i64>,
    pub source: Option<&'a str>,
    pub status: &'a str,
    pub priority: &'a str,
    pub assigned_to: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Lead> for DomainLead {
    fn from(value: Lead) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            customer_name: value.customer_name,
            phone: value.phone,
            email: value.email,
            destination: value.destination,
            travel_date: value.travel_date,
            duration: value.duration,
            pax: value.pax,
            budget_paise: value.budget_paise,
            source: value.source,
            status: value.status.parse().unwrap_or_default(),
            priority: value.priority.parse().unwrap_or_default(),
            assigned_to: value.assigned_to,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(value: &'a DomainNewLead) -> Self {
        Self {
            hub_id: value.hub_id,
            customer_name: value.customer_name.as_str(),
            phone: value.phone.as_str(),
            email: value.email.as_deref(),
            destination: value.destination.as_deref(),
            travel_date: value.travel_date,
            duration: value.duration.as_deref(),
            pax: value.pax,
            budget_paise: value.budget_paise,
            source: value.source.as_deref(),
            status: value.status.as_str(),
            priority: value.priority.as_str(),
            assigned_to: value.assigned_to.as_deref(),
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateLead> for UpdateLead<'a> {
    fn from(value: &'a DomainUpdateLead) -> Self {
        Self {
            customer_name: value.customer_name.as_str(),
            phone: value.phone.as_str(),
            email: value.email.as_deref(),
            destination: value.destination.as_deref(),
            travel_date: value.travel_date,
            duration: value.duration.as_deref(),
            pax: value.pax,
            budget_paise: value.budget_paise,
            source: value.source.as_deref(),
            status: value.status.as_str(),
            priority: value.priority.as_str(),
            assigned_to: value.assigned_to.as_deref(),
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
