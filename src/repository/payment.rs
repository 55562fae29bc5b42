use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::payment::{
        NewPayment as DomainNewPayment, Payment as DomainPayment, PaymentListQuery,
        UpdatePayment as DomainUpdatePayment,
    },
    models::payment::{
        NewPayment as DbNewPayment, Payment as DbPayment, UpdatePayment as DbUpdatePayment,
    },
    repository::{DieselRepository, PaymentReader, PaymentWriter, page_bounds},
};

impl PaymentReader for DieselRepository {
    fn get_payment_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainPayment>> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let payment = payments::table
            .filter(payments::id.eq(id))
            .filter(payments::hub_id.eq(hub_id))
            .first::<DbPayment>(&mut conn)
            .optional()?;

        Ok(payment.map(Into::into))
    }

    fn list_payments(
        &self,
        query: PaymentListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainPayment>)> {
        use crate::schema::payments;

        let mut conn = self.conn()?;

        let mut count_query = payments::table
            .filter(payments::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(trip_id) = query.trip_id {
            count_query = count_query.filter(payments::trip_id.eq(Some(trip_id)));
        }

        if let Some(date) = query.paid_from {
            count_query = count_query.filter(payments::paid_on.ge(date));
        }

        if let Some(date) = query.paid_before {
            count_query = count_query.filter(payments::paid_on.lt(date));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = payments::table
            .filter(payments::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(trip_id) = query.trip_id {
            items = items.filter(payments::trip_id.eq(Some(trip_id)));
        }

        if let Some(date) = query.paid_from {
            items = items.filter(payments::paid_on.ge(date));
        }

        if let Some(date) = query.paid_before {
            items = items.filter(payments::paid_on.lt(date));
        }

        items = items.order((payments::paid_on.desc(), payments::id.desc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_payments = items.load::<DbPayment>(&mut conn)?;

        Ok((total, db_payments.into_iter().map(Into::into).collect()))
    }
}

impl PaymentWriter for DieselRepository {
    fn create_payment(&self, new_payment: &DomainNewPayment) -> RepositoryResult<DomainPayment> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let db_new = DbNewPayment::from(new_payment);

        let created = diesel::insert_into(payments::table)
            .values(&db_new)
            .get_result::<DbPayment>(&mut conn)?;

        Ok(created.into())
    }

    fn update_payment(
        &self,
        payment_id: i32,
        hub_id: i32,
        updates: &DomainUpdatePayment,
    ) -> RepositoryResult<DomainPayment> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let db_updates = DbUpdatePayment::from(updates);

        let target = payments::table
            .filter(payments::id.eq(payment_id))
            .filter(payments::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbPayment>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_payment(&self, payment_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::payments;

        let mut conn = self.conn()?;

        let target = payments::table
            .filter(payments::id.eq(payment_id))
            .filter(payments::hub_id.eq(hub_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
