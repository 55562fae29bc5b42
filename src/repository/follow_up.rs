use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::follow_up::{
        DueFollowUp, FollowUp as DomainFollowUp, FollowUpStatus, NewFollowUp as DomainNewFollowUp,
    },
    models::follow_up::{FollowUp as DbFollowUp, NewFollowUp as DbNewFollowUp},
    repository::{DieselRepository, FollowUpReader, FollowUpWriter},
};

impl FollowUpReader for DieselRepository {
    fn list_follow_ups(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<Vec<DomainFollowUp>> {
        use crate::schema::{follow_ups, leads};

        let mut conn = self.conn()?;
        let rows = follow_ups::table
            .inner_join(leads::table)
            .filter(follow_ups::lead_id.eq(lead_id))
            .filter(leads::hub_id.eq(hub_id))
            .order((follow_ups::due_at.asc(), follow_ups::id.asc()))
            .select(DbFollowUp::as_select())
            .load::<DbFollowUp>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_due_follow_ups(
        &self,
        hub_id: i32,
        due_by: NaiveDateTime,
    ) -> RepositoryResult<Vec<DueFollowUp>> {
        use crate::schema::{follow_ups, leads};

        let mut conn = self.conn()?;
        let rows = follow_ups::table
            .inner_join(leads::table)
            .filter(leads::hub_id.eq(hub_id))
            .filter(follow_ups::status.eq(FollowUpStatus::Pending.as_str()))
            .filter(follow_ups::due_at.le(due_by))
            .order((follow_ups::due_at.asc(), follow_ups::id.asc()))
            .select((DbFollowUp::as_select(), leads::customer_name, leads::phone))
            .load::<(DbFollowUp, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(follow_up, customer_name, phone)| DueFollowUp {
                follow_up: follow_up.into(),
                customer_name,
                phone,
            })
            .collect())
    }
}

impl FollowUpWriter for DieselRepository {
    fn create_follow_up(
        &self,
        new_follow_up: &DomainNewFollowUp,
    ) -> RepositoryResult<DomainFollowUp> {
        use crate::schema::follow_ups;

        let mut conn = self.conn()?;
        let db_new = DbNewFollowUp::from(new_follow_up);

        let created = diesel::insert_into(follow_ups::table)
            .values(&db_new)
            .get_result::<DbFollowUp>(&mut conn)?;

        Ok(created.into())
    }

    fn complete_follow_up(
        &self,
        follow_up_id: i32,
        hub_id: i32,
        completed_at: NaiveDateTime,
    ) -> RepositoryResult<DomainFollowUp> {
        use crate::schema::{follow_ups, leads};

        let mut conn = self.conn()?;

        let hub_leads = leads::table
            .filter(leads::hub_id.eq(hub_id))
            .select(leads::id);

        let target = follow_ups::table
            .filter(follow_ups::id.eq(follow_up_id))
            .filter(follow_ups::lead_id.eq_any(hub_leads));

        let updated = diesel::update(target)
            .set((
                follow_ups::status.eq(FollowUpStatus::Completed.as_str()),
                follow_ups::completed_at.eq(Some(completed_at)),
                follow_ups::updated_at.eq(completed_at),
            ))
            .get_result::<DbFollowUp>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_follow_up(&self, follow_up_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{follow_ups, leads};

        let mut conn = self.conn()?;

        let hub_leads = leads::table
            .filter(leads::hub_id.eq(hub_id))
            .select(leads::id);

        let target = follow_ups::table
            .filter(follow_ups::id.eq(follow_up_id))
            .filter(follow_ups::lead_id.eq_any(hub_leads));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
