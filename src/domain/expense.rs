use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentMode;

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Hotel,
    Transport,
    Food,
    Guide,
    Activity,
    Office,
    #[default]
    Other,
}

text_enum!(ExpenseCategory, "expense category", {
    Hotel => "hotel",
    Transport => "transport",
    Food => "food",
    Guide => "guide",
    Activity => "activity",
    Office => "office",
    Other => "other",
});

/// Money paid out by the agency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: i32,
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub category: ExpenseCategory,
    pub mode: PaymentMode,
    pub amount_paise: i64,
    pub description: String,
    pub spent_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Expense fields shared by inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDetails {
    pub trip_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub category: ExpenseCategory,
    pub mode: PaymentMode,
    pub amount_paise: i64,
    pub description: String,
    pub spent_on: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub hub_id: i32,
    pub details: ExpenseDetails,
    pub updated_at: NaiveDateTime,
}

impl NewExpense {
    pub fn new(hub_id: i32, details: ExpenseDetails) -> Self {
        Self {
            hub_id,
            details,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpense {
    pub details: ExpenseDetails,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list expenses for a hub.
#[derive(Debug, Clone)]
pub struct ExpenseListQuery {
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub category: Option<ExpenseCategory>,
    /// Only expenses booked on or after this date.
    pub spent_from: Option<NaiveDate>,
    /// Only expenses booked strictly before this date.
    pub spent_before: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl ExpenseListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            trip_id: None,
            category: None,
            spent_from: None,
            spent_before: None,
            pagination: None,
        }
    }

    pub fn trip_id(mut self, trip_id: i32) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn spent_from(mut self, date: NaiveDate) -> Self {
        self.spent_from = Some(date);
        self
    }

    pub fn spent_before(mut self, date: NaiveDate) -> Self {
        self.spent_before = Some(date);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
