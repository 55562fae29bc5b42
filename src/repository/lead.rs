use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::lead::{
        Lead as DomainLead, LeadListQuery, LeadStatus, NewLead as DomainNewLead,
        UpdateLead as DomainUpdateLead,
    },
    models::lead::{Lead as DbLead, NewLead as DbNewLead, UpdateLead as DbUpdateLead},
    repository::{DieselRepository, LeadReader, LeadWriter, page_bounds},
};

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainLead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .filter(leads::id.eq(id))
            .filter(leads::hub_id.eq(hub_id))
            .first::<DbLead>(&mut conn)
            .optional()?;

        Ok(lead.map(Into::into))
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<DomainLead>)> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let excluded: Vec<&str> = query
            .excluded_statuses()
            .iter()
            .map(LeadStatus::as_str)
            .collect();
        let status_filter = query.status.map(|status| status.as_str());
        let priority_filter = query.priority.map(|priority| priority.as_str());
        let search_pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = leads::table
            .filter(leads::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !excluded.is_empty() {
            count_query = count_query.filter(leads::status.ne_all(excluded.clone()));
        }

        if let Some(status) = status_filter {
            count_query = count_query.filter(leads::status.eq(status));
        }

        if let Some(priority) = priority_filter {
            count_query = count_query.filter(leads::priority.eq(priority));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                leads::customer_name
                    .like(pattern.clone())
                    .or(leads::phone.like(pattern.clone()))
                    .or(leads::email.like(pattern.clone()))
                    .or(leads::destination.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = leads::table
            .filter(leads::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !excluded.is_empty() {
            items = items.filter(leads::status.ne_all(excluded));
        }

        if let Some(status) = status_filter {
            items = items.filter(leads::status.eq(status));
        }

        if let Some(priority) = priority_filter {
            items = items.filter(leads::priority.eq(priority));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                leads::customer_name
                    .like(pattern.clone())
                    .or(leads::phone.like(pattern.clone()))
                    .or(leads::email.like(pattern.clone()))
                    .or(leads::destination.like(pattern.clone())),
            );
        }

        items = items.order((leads::created_at.desc(), leads::id.desc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_leads = items.load::<DbLead>(&mut conn)?;

        Ok((total, db_leads.into_iter().map(Into::into).collect()))
    }

    fn count_leads_by_status(&self, hub_id: i32) -> RepositoryResult<Vec<(LeadStatus, usize)>> {
        use crate::schema::leads;
        use diesel::dsl::count_star;

        let mut conn = self.conn()?;
        let rows = leads::table
            .filter(leads::hub_id.eq(hub_id))
            .group_by(leads::status)
            .select((leads::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .filter_map(|(status, count)| {
                let status = status.parse::<LeadStatus>().ok()?;
                Some((status, count as usize))
            })
            .collect())
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &DomainNewLead) -> RepositoryResult<DomainLead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let db_new = DbNewLead::from(new_lead);

        let created = diesel::insert_into(leads::table)
            .values(&db_new)
            .get_result::<DbLead>(&mut conn)?;

        Ok(created.into())
    }

    fn update_lead(
        &self,
        lead_id: i32,
        hub_id: i32,
        updates: &DomainUpdateLead,
    ) -> RepositoryResult<DomainLead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateLead::from(updates);

        let target = leads::table
            .filter(leads::id.eq(lead_id))
            .filter(leads::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbLead>(&mut conn)?;

        Ok(updated.into())
    }

    fn update_lead_status(
        &self,
        lead_id: i32,
        hub_id: i32,
        status: LeadStatus,
    ) -> RepositoryResult<DomainLead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let now = chrono::Local::now().naive_utc();

        let target = leads::table
            .filter(leads::id.eq(lead_id))
            .filter(leads::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set((leads::status.eq(status.as_str()), leads::updated_at.eq(now)))
            .get_result::<DbLead>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_lead(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{follow_ups, leads, quotations, trips};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let exists = leads::table
                .filter(leads::id.eq(lead_id))
                .filter(leads::hub_id.eq(hub_id))
                .select(leads::id)
                .first::<i32>(conn)
                .optional()?;

            if exists.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(follow_ups::table.filter(follow_ups::lead_id.eq(lead_id)))
                .execute(conn)?;

            diesel::update(quotations::table.filter(quotations::lead_id.eq(lead_id)))
                .set(quotations::lead_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::update(trips::table.filter(trips::lead_id.eq(lead_id)))
                .set(trips::lead_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::delete(leads::table.filter(leads::id.eq(lead_id))).execute(conn)?;

            Ok(())
        })
    }
}
