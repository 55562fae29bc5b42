use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    #[default]
    Advance,
    Partial,
    Full,
    /// Money returned to the customer; counts against the amount received.
    Refund,
}

text_enum!(PaymentType, "payment type", {
    Advance => "advance",
    Partial => "partial",
    Full => "full",
    Refund => "refund",
});

/// How money changed hands. Shared by payments and expenses.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    #[default]
    Upi,
    BankTransfer,
    Card,
    Cheque,
}

text_enum!(PaymentMode, "payment mode", {
    Cash => "cash",
    Upi => "upi",
    BankTransfer => "bank_transfer",
    Card => "card",
    Cheque => "cheque",
});

/// Money received from (or refunded to) a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    pub payment_type: PaymentType,
    pub mode: PaymentMode,
    pub amount_paise: i64,
    /// Transaction or cheque reference.
    pub reference: Option<String>,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payment fields shared by inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDetails {
    pub trip_id: Option<i32>,
    pub payment_type: PaymentType,
    pub mode: PaymentMode,
    pub amount_paise: i64,
    pub reference: Option<String>,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub hub_id: i32,
    pub details: PaymentDetails,
    pub updated_at: NaiveDateTime,
}

impl NewPayment {
    pub fn new(hub_id: i32, details: PaymentDetails) -> Self {
        Self {
            hub_id,
            details,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePayment {
    pub details: PaymentDetails,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list payments for a hub.
#[derive(Debug, Clone)]
pub struct PaymentListQuery {
    pub hub_id: i32,
    pub trip_id: Option<i32>,
    /// Only payments made on or after this date.
    pub paid_from: Option<NaiveDate>,
    /// Only payments made strictly before this date.
    pub paid_before: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl PaymentListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            trip_id: None,
            paid_from: None,
            paid_before: None,
            pagination: None,
        }
    }

    pub fn trip_id(mut self, trip_id: i32) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn paid_from(mut self, date: NaiveDate) -> Self {
        self.paid_from = Some(date);
        self
    }

    pub fn paid_before(mut self, date: NaiveDate) -> Self {
        self.paid_before = Some(date);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
