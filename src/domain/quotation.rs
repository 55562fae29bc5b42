use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::money::PriceBreakdown;

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

text_enum!(QuotationStatus, "quotation status", {
    Draft => "draft",
    Sent => "sent",
    Accepted => "accepted",
    Rejected => "rejected",
    Expired => "expired",
});

/// Priced trip proposal sent to a customer.
///
/// Amounts are frozen when the quotation is created and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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
    pub status: QuotationStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a priced quotation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuotation {
    pub hub_id: i32,
    pub lead_id: Option<i32>,
    pub customer_name: String,
    pub destination: String,
    pub duration: Option<String>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub extras_paise: i64,
    pub price: PriceBreakdown,
    pub valid_until: Option<NaiveDate>,
    pub status: QuotationStatus,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Fields of a quotation that may change after it was priced.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuotation {
    pub status: QuotationStatus,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list quotations for a hub.
#[derive(Debug, Clone)]
pub struct QuotationListQuery {
    pub hub_id: i32,
    pub status: Option<QuotationStatus>,
    pub lead_id: Option<i32>,
    /// Optional search over customer name and destination.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl QuotationListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            status: None,
            lead_id: None,
            search: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: QuotationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict the results to quotations issued for `lead_id`.
    pub fn lead_id(mut self, lead_id: i32) -> Self {
        self.lead_id = Some(lead_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
