use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::expense::{Expense as DomainExpense, ExpenseDetails};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::expenses)]
pub struct Expense {
    pub id: i32,
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub category: String,
    pub mode: String,
    pub amount_paise: i64,
    pub description: String,
    pub spent_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::expenses)]
pub struct NewExpense<'a> {
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub category: &'a str,
    pub mode: &'a str,
    pub amount_paise: i64,
    pub description: &'a str,
    pub spent_on: NaiveDate,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateExpense<'a> {
    pub trip_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub category: &'a str,
    pub mode: &'a str,
    pub amount_paise: i64,
    pub description: &'a str,
    pub spent_on: NaiveDate,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Expense> for DomainExpense {
    fn from(value: Expense) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            trip_id: value.trip_id,
            vendor_id: value.vendor_id,
            category: value.category.parse().unwrap_or_default(),
            mode: value.mode.parse().unwrap_or_default(),
            amount_paise: value.amount_paise,
            description: value.description,
            spent_on: value.spent_on,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a crate::domain::expense::NewExpense> for NewExpense<'a> {
    fn from(value: &'a crate::domain::expense::NewExpense) -> Self {
        let details: &ExpenseDetails = &value.details;
        Self {
            hub_id: value.hub_id,
            trip_id: details.trip_id,
            vendor_id: details.vendor_id,
            category: details.category.as_str(),
            mode: details.mode.as_str(),
            amount_paise: details.amount_paise,
            description: details.description.as_str(),
            spent_on: details.spent_on,
            notes: details.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a crate::domain::expense::UpdateExpense> for UpdateExpense<'a> {
    fn from(value: &'a crate::domain::expense::UpdateExpense) -> Self {
        let details: &ExpenseDetails = &value.details;
        Self {
            trip_id: details.trip_id,
            vendor_id: details.vendor_id,
            category: details.category.as_str(),
            mode: details.mode.as_str(),
            amount_paise: details.amount_paise,
            description: details.description.as_str(),
            spent_on: details.spent_on,
            notes: details.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
