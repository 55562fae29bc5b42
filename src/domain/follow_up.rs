use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStatus {
    #[default]
    Pending,
    Completed,
}

text_enum!(FollowUpStatus, "follow-up status", {
    Pending => "pending",
    Completed => "completed",
});

/// Scheduled contact with the customer behind a lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowUp {
    pub id: i32,
    pub lead_id: i32,
    /// When the customer should be contacted.
    pub due_at: NaiveDateTime,
    pub note: Option<String>,
    pub status: FollowUpStatus,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FollowUp {
    /// Whether the follow-up is still pending after `now`.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.status == FollowUpStatus::Pending && self.due_at < now
    }
}

/// Payload required to schedule a follow-up.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFollowUp {
    pub lead_id: i32,
    pub due_at: NaiveDateTime,
    pub note: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewFollowUp {
    pub fn new(lead_id: i32, due_at: NaiveDateTime, note: Option<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            lead_id,
            due_at,
            note,
            updated_at: now,
        }
    }
}

/// Pending follow-up joined with the lead it belongs to, shown on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DueFollowUp {
    pub follow_up: FollowUp,
    pub customer_name: String,
    pub phone: String,
}
