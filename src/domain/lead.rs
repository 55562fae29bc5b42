use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Position of a lead in the sales pipeline.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Freshly captured inquiry.
    #[default]
    New,
    /// The customer has been reached at least once.
    Contacted,
    /// A quotation has been sent.
    Quoted,
    /// Waiting on a scheduled follow-up.
    FollowUp,
    /// The customer agreed to travel.
    Confirmed,
    /// A trip has been created from the lead.
    Converted,
    /// The customer went elsewhere.
    Lost,
    /// The inquiry was withdrawn.
    Cancelled,
}

text_enum!(LeadStatus, "lead status", {
    New => "new",
    Contacted => "contacted",
    Quoted => "quoted",
    FollowUp => "follow_up",
    Confirmed => "confirmed",
    Converted => "converted",
    Lost => "lost",
    Cancelled => "cancelled",
});

impl LeadStatus {
    /// Whether creating a quotation should move the lead to [`LeadStatus::Quoted`].
    pub fn advances_on_quotation(&self) -> bool {
        matches!(self, Self::New | Self::Contacted | Self::FollowUp)
    }
}

/// How urgently a lead should be worked.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadPriority {
    Low,
    #[default]
    Medium,
    High,
}

text_enum!(LeadPriority, "lead priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Prospective customer inquiry tracked through the sales pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: i32,
    pub hub_id: i32,
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Destination or package the customer asked about.
    pub destination: Option<String>,
    pub travel_date: Option<NaiveDate>,
    /// Free-form duration label such as `4D3N`.
    pub duration: Option<String>,
    pub pax: Option<i32>,
    pub budget_paise: Option<i64>,
    /// Where the inquiry came from (website, referral, walk-in...).
    pub source: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    /// Staff member responsible for the lead.
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new lead for a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
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
    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewLead {
    /// Build a lead payload with the contact details and current timestamp.
    pub fn new(hub_id: i32, customer_name: impl Into<String>, phone: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            hub_id,
            customer_name: customer_name.into(),
            phone: phone.into(),
            email: None,
            destination: None,
            travel_date: None,
            duration: None,
            pax: None,
            budget_paise: None,
            source: None,
            status: LeadStatus::default(),
            priority: LeadPriority::default(),
            assigned_to: None,
            notes: None,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: LeadPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_pax(mut self, pax: i32) -> Self {
        self.pax = Some(pax);
        self
    }
}

/// Full replacement of the editable lead fields.
///
/// `None` clears the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLead {
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub duration: Option<String>,
    pub pax: Option<i32>,
    pub budget_paise: Option<i64>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list leads for a hub.
#[derive(Debug, Clone)]
pub struct LeadListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional exact status filter. Filtering by `converted` shows converted leads.
    pub status: Option<LeadStatus>,
    /// Optional exact priority filter.
    pub priority: Option<LeadPriority>,
    /// Optional search over name, phone, email and destination.
    pub search: Option<String>,
    /// Whether converted leads appear when no status filter is set.
    pub include_converted: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    /// Construct a query that targets the active leads belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            status: None,
            priority: None,
            search: None,
            include_converted: false,
            pagination: None,
        }
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: LeadPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Filter the results by a search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Include leads that were already converted into trips.
    pub fn include_converted(mut self) -> Self {
        self.include_converted = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Status values that must be excluded from the listing.
    pub fn excluded_statuses(&self) -> Vec<LeadStatus> {
        if self.status.is_some() || self.include_converted {
            Vec::new()
        } else {
            vec![LeadStatus::Converted]
        }
    }
}
