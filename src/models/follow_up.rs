use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::follow_up::{FollowUp as DomainFollowUp, NewFollowUp as DomainNewFollowUp};
use crate::models::lead::Lead;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::follow_ups)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
pub struct FollowUp {
    pub id: i32,
    pub lead_id: i32,
    pub due_at: NaiveDateTime,
    pub note: Option<String>,
    pub status: String,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::follow_ups)]
pub struct NewFollowUp<'a> {
    pub lead_id: i32,
    pub due_at: NaiveDateTime,
    pub note: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<FollowUp> for DomainFollowUp {
    fn from(value: FollowUp) -> Self {
        Self {
            id: value.id,
            lead_id: value.lead_id,
            due_at: value.due_at,
            note: value.note,
            status: value.status.parse().unwrap_or_default(),
            completed_at: value.completed_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewFollowUp> for NewFollowUp<'a> {
    fn from(value: &'a DomainNewFollowUp) -> Self {
        Self {
            lead_id: value.lead_id,
            due_at: value.due_at,
            note: value.note.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
