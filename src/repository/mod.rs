use chrono::NaiveDateTime;
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::expense::{Expense, ExpenseListQuery, NewExpense, UpdateExpense};
use crate::domain::follow_up::{DueFollowUp, FollowUp, NewFollowUp};
use crate::domain::lead::{Lead, LeadListQuery, LeadStatus, NewLead, UpdateLead};
use crate::domain::payment::{NewPayment, Payment, PaymentListQuery, UpdatePayment};
use crate::domain::quotation::{NewQuotation, Quotation, QuotationListQuery, UpdateQuotation};
use crate::domain::rate::{RateRow, Region};
use crate::domain::trip::{NewTrip, Trip, TripListQuery, UpdateTrip};
use crate::domain::vendor::{NewVendor, UpdateVendor, Vendor, VendorListQuery};

pub mod expense;
pub mod follow_up;
pub mod lead;
pub mod payment;
pub mod quotation;
pub mod rate;
pub mod trip;
pub mod vendor;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Offset and limit for a 1-based page.
pub(crate) fn page_bounds(page: usize, per_page: usize) -> (i64, i64) {
    let offset = (page.max(1) - 1).saturating_mul(per_page);
    let clamp = |value: usize| i64::try_from(value).unwrap_or(i64::MAX);
    (clamp(offset), clamp(per_page))
}

/// Read-only operations over lead records.
pub trait LeadReader {
    fn get_lead_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    /// Number of leads per stored status. Statuses without leads are omitted.
    fn count_leads_by_status(&self, hub_id: i32) -> RepositoryResult<Vec<(LeadStatus, usize)>>;
}

/// Write operations over lead records.
pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn update_lead(&self, lead_id: i32, hub_id: i32, updates: &UpdateLead)
    -> RepositoryResult<Lead>;
    fn update_lead_status(
        &self,
        lead_id: i32,
        hub_id: i32,
        status: LeadStatus,
    ) -> RepositoryResult<Lead>;
    /// Removes the lead and its follow-ups. Quotations and trips are detached.
    fn delete_lead(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over follow-ups.
pub trait FollowUpReader {
    fn list_follow_ups(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<Vec<FollowUp>>;
    /// Pending follow-ups due at or before `due_by`, oldest first.
    fn list_due_follow_ups(
        &self,
        hub_id: i32,
        due_by: NaiveDateTime,
    ) -> RepositoryResult<Vec<DueFollowUp>>;
}

/// Write operations over follow-ups.
pub trait FollowUpWriter {
    fn create_follow_up(&self, new_follow_up: &NewFollowUp) -> RepositoryResult<FollowUp>;
    fn complete_follow_up(
        &self,
        follow_up_id: i32,
        hub_id: i32,
        completed_at: NaiveDateTime,
    ) -> RepositoryResult<FollowUp>;
    fn delete_follow_up(&self, follow_up_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over quotations.
pub trait QuotationReader {
    fn get_quotation_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Quotation>>;
    fn list_quotations(
        &self,
        query: QuotationListQuery,
    ) -> RepositoryResult<(usize, Vec<Quotation>)>;
}

/// Write operations over quotations.
pub trait QuotationWriter {
    /// Stores the quotation and moves a linked lead to `quoted` when it is
    /// still early in the pipeline.
    fn create_quotation(&self, new_quotation: &NewQuotation) -> RepositoryResult<Quotation>;
    fn update_quotation(
        &self,
        quotation_id: i32,
        hub_id: i32,
        updates: &UpdateQuotation,
    ) -> RepositoryResult<Quotation>;
    fn delete_quotation(&self, quotation_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over trips and their room bookings.
pub trait TripReader {
    fn get_trip_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Trip>>;
    fn get_trip_by_lead_id(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<Option<Trip>>;
    fn list_trips(&self, query: TripListQuery) -> RepositoryResult<(usize, Vec<Trip>)>;
}

/// Write operations over trips and their room bookings.
pub trait TripWriter {
    /// Stores the trip with its room bookings and marks a linked lead as
    /// converted, all in one transaction.
    fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip>;
    /// Replaces the trip fields and its room bookings.
    fn update_trip(&self, trip_id: i32, hub_id: i32, updates: &UpdateTrip)
    -> RepositoryResult<Trip>;
    fn delete_trip(&self, trip_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over vendors and their price lists.
pub trait VendorReader {
    fn get_vendor_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Vendor>>;
    fn list_vendors(&self, query: VendorListQuery) -> RepositoryResult<(usize, Vec<Vendor>)>;
}

/// Write operations over vendors and their price lists.
pub trait VendorWriter {
    fn create_vendor(&self, new_vendor: &NewVendor) -> RepositoryResult<Vendor>;
    fn update_vendor(
        &self,
        vendor_id: i32,
        hub_id: i32,
        updates: &UpdateVendor,
    ) -> RepositoryResult<Vendor>;
    fn delete_vendor(&self, vendor_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over payments.
pub trait PaymentReader {
    fn get_payment_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Payment>>;
    fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)>;
}

/// Write operations over payments.
pub trait PaymentWriter {
    fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
    fn update_payment(
        &self,
        payment_id: i32,
        hub_id: i32,
        updates: &UpdatePayment,
    ) -> RepositoryResult<Payment>;
    fn delete_payment(&self, payment_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over expenses.
pub trait ExpenseReader {
    fn get_expense_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Expense>>;
    fn list_expenses(&self, query: ExpenseListQuery) -> RepositoryResult<(usize, Vec<Expense>)>;
}

/// Write operations over expenses.
pub trait ExpenseWriter {
    fn create_expense(&self, new_expense: &NewExpense) -> RepositoryResult<Expense>;
    fn update_expense(
        &self,
        expense_id: i32,
        hub_id: i32,
        updates: &UpdateExpense,
    ) -> RepositoryResult<Expense>;
    fn delete_expense(&self, expense_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read access to the regional rate tables.
pub trait RateReader {
    /// Rows of `region`'s table, optionally restricted to trip codes
    /// starting with `trip_code_prefix`, ordered by trip code.
    fn list_rates(
        &self,
        region: Region,
        trip_code_prefix: Option<&str>,
    ) -> RepositoryResult<Vec<RateRow>>;
}

/// Maintenance of the regional rate tables.
pub trait RateWriter {
    /// Replaces every row of `region`'s table. Returns the number of rows stored.
    fn replace_rates(&self, region: Region, rows: &[RateRow]) -> RepositoryResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_start_at_page_one() {
        assert_eq!(page_bounds(0, 20), (0, 20));
        assert_eq!(page_bounds(1, 20), (0, 20));
        assert_eq!(page_bounds(3, 20), (40, 20));
    }

    #[test]
    fn page_bounds_saturate_on_huge_pages() {
        let (offset, limit) = page_bounds(usize::MAX, 20);

        assert_eq!(offset, i64::MAX);
        assert_eq!(limit, 20);
    }
}
