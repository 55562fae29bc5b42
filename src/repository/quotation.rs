use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::lead::LeadStatus,
    domain::quotation::{
        NewQuotation as DomainNewQuotation, Quotation as DomainQuotation, QuotationListQuery,
        UpdateQuotation as DomainUpdateQuotation,
    },
    models::quotation::{
        NewQuotation as DbNewQuotation, Quotation as DbQuotation,
        UpdateQuotation as DbUpdateQuotation,
    },
    repository::{DieselRepository, QuotationReader, QuotationWriter, page_bounds},
};

impl QuotationReader for DieselRepository {
    fn get_quotation_by_id(
        &self,
        id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainQuotation>> {
        use crate::schema::quotations;

        let mut conn = self.conn()?;
        let quotation = quotations::table
            .filter(quotations::id.eq(id))
            .filter(quotations::hub_id.eq(hub_id))
            .first::<DbQuotation>(&mut conn)
            .optional()?;

        Ok(quotation.map(Into::into))
    }

    fn list_quotations(
        &self,
        query: QuotationListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainQuotation>)> {
        use crate::schema::quotations;

        let mut conn = self.conn()?;

        let QuotationListQuery {
            hub_id,
            status,
            lead_id,
            search,
            pagination,
        } = query;

        let status_filter = status.map(|status| status.as_str());
        let search_pattern = search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = quotations::table
            .filter(quotations::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = status_filter {
            count_query = count_query.filter(quotations::status.eq(status));
        }

        if let Some(lead) = lead_id {
            count_query = count_query.filter(quotations::lead_id.eq(Some(lead)));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                quotations::customer_name
                    .like(pattern.clone())
                    .or(quotations::destination.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = quotations::table
            .filter(quotations::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = status_filter {
            items = items.filter(quotations::status.eq(status));
        }

        if let Some(lead) = lead_id {
            items = items.filter(quotations::lead_id.eq(Some(lead)));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                quotations::customer_name
                    .like(pattern.clone())
                    .or(quotations::destination.like(pattern.clone())),
            );
        }

        items = items.order((quotations::created_at.desc(), quotations::id.desc()));

        if let Some(pagination) = pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_quotations = items.load::<DbQuotation>(&mut conn)?;

        Ok((total, db_quotations.into_iter().map(Into::into).collect()))
    }
}

impl QuotationWriter for DieselRepository {
    fn create_quotation(
        &self,
        new_quotation: &DomainNewQuotation,
    ) -> RepositoryResult<DomainQuotation> {
        use crate::schema::{leads, quotations};

        let mut conn = self.conn()?;

        conn.transaction::<DomainQuotation, RepositoryError, _>(|conn| {
            let db_new = DbNewQuotation::from(new_quotation);

            let created = diesel::insert_into(quotations::table)
                .values(&db_new)
                .get_result::<DbQuotation>(conn)?;

            if let Some(lead_id) = new_quotation.lead_id {
                let advancing: Vec<&str> = LeadStatus::ALL
                    .iter()
                    .filter(|status| status.advances_on_quotation())
                    .map(LeadStatus::as_str)
                    .collect();

                let target = leads::table
                    .filter(leads::id.eq(lead_id))
                    .filter(leads::hub_id.eq(new_quotation.hub_id))
                    .filter(leads::status.eq_any(advancing));

                diesel::update(target)
                    .set((
                        leads::status.eq(LeadStatus::Quoted.as_str()),
                        leads::updated_at.eq(new_quotation.updated_at),
                    ))
                    .execute(conn)?;
            }

            Ok(created.into())
        })
    }

    fn update_quotation(
        &self,
        quotation_id: i32,
        hub_id: i32,
        updates: &DomainUpdateQuotation,
    ) -> RepositoryResult<DomainQuotation> {
        use crate::schema::quotations;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateQuotation::from(updates);

        let target = quotations::table
            .filter(quotations::id.eq(quotation_id))
            .filter(quotations::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbQuotation>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_quotation(&self, quotation_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::quotations;

        let mut conn = self.conn()?;

        let target = quotations::table
            .filter(quotations::id.eq(quotation_id))
            .filter(quotations::hub_id.eq(hub_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
