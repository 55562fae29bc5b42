use chrono::NaiveDateTime;
use mockall::mock;

use super::{
    ExpenseReader, ExpenseWriter, FollowUpReader, FollowUpWriter, LeadReader, LeadWriter,
    PaymentReader, PaymentWriter, QuotationReader, QuotationWriter, RateReader, RateWriter,
    TripReader, TripWriter, VendorReader, VendorWriter,
};
use crate::domain::{
    expense::{Expense, ExpenseListQuery, NewExpense, UpdateExpense},
    follow_up::{DueFollowUp, FollowUp, NewFollowUp},
    lead::{Lead, LeadListQuery, LeadStatus, NewLead, UpdateLead},
    payment::{NewPayment, Payment, PaymentListQuery, UpdatePayment},
    quotation::{NewQuotation, Quotation, QuotationListQuery, UpdateQuotation},
    rate::{RateRow, Region},
    trip::{NewTrip, Trip, TripListQuery, UpdateTrip},
    vendor::{NewVendor, UpdateVendor, Vendor, VendorListQuery},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub LeadRepository {}

    impl LeadReader for LeadRepository {
        fn get_lead_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
        fn count_leads_by_status(&self, hub_id: i32) -> RepositoryResult<Vec<(LeadStatus, usize)>>;
    }

    impl LeadWriter for LeadRepository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn update_lead(&self, lead_id: i32, hub_id: i32, updates: &UpdateLead) -> RepositoryResult<Lead>;
        fn update_lead_status(&self, lead_id: i32, hub_id: i32, status: LeadStatus) -> RepositoryResult<Lead>;
        fn delete_lead(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl FollowUpReader for LeadRepository {
        fn list_follow_ups(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<Vec<FollowUp>>;
        fn list_due_follow_ups(&self, hub_id: i32, due_by: NaiveDateTime) -> RepositoryResult<Vec<DueFollowUp>>;
    }

    impl FollowUpWriter for LeadRepository {
        fn create_follow_up(&self, new_follow_up: &NewFollowUp) -> RepositoryResult<FollowUp>;
        fn complete_follow_up(&self, follow_up_id: i32, hub_id: i32, completed_at: NaiveDateTime) -> RepositoryResult<FollowUp>;
        fn delete_follow_up(&self, follow_up_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl QuotationReader for LeadRepository {
        fn get_quotation_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Quotation>>;
        fn list_quotations(&self, query: QuotationListQuery) -> RepositoryResult<(usize, Vec<Quotation>)>;
    }

    impl QuotationWriter for LeadRepository {
        fn create_quotation(&self, new_quotation: &NewQuotation) -> RepositoryResult<Quotation>;
        fn update_quotation(&self, quotation_id: i32, hub_id: i32, updates: &UpdateQuotation) -> RepositoryResult<Quotation>;
        fn delete_quotation(&self, quotation_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl TripReader for LeadRepository {
        fn get_trip_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Trip>>;
        fn get_trip_by_lead_id(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<Option<Trip>>;
        fn list_trips(&self, query: TripListQuery) -> RepositoryResult<(usize, Vec<Trip>)>;
    }

    impl TripWriter for LeadRepository {
        fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip>;
        fn update_trip(&self, trip_id: i32, hub_id: i32, updates: &UpdateTrip) -> RepositoryResult<Trip>;
        fn delete_trip(&self, trip_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl PaymentReader for LeadRepository {
        fn get_payment_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Payment>>;
        fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)>;
    }

    impl ExpenseReader for LeadRepository {
        fn get_expense_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Expense>>;
        fn list_expenses(&self, query: ExpenseListQuery) -> RepositoryResult<(usize, Vec<Expense>)>;
    }
}

mock! {
    pub VendorRepository {}

    impl VendorReader for VendorRepository {
        fn get_vendor_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Vendor>>;
        fn list_vendors(&self, query: VendorListQuery) -> RepositoryResult<(usize, Vec<Vendor>)>;
    }

    impl VendorWriter for VendorRepository {
        fn create_vendor(&self, new_vendor: &NewVendor) -> RepositoryResult<Vendor>;
        fn update_vendor(&self, vendor_id: i32, hub_id: i32, updates: &UpdateVendor) -> RepositoryResult<Vendor>;
        fn delete_vendor(&self, vendor_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub LedgerRepository {}

    impl TripReader for LedgerRepository {
        fn get_trip_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Trip>>;
        fn get_trip_by_lead_id(&self, lead_id: i32, hub_id: i32) -> RepositoryResult<Option<Trip>>;
        fn list_trips(&self, query: TripListQuery) -> RepositoryResult<(usize, Vec<Trip>)>;
    }

    impl VendorReader for LedgerRepository {
        fn get_vendor_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Vendor>>;
        fn list_vendors(&self, query: VendorListQuery) -> RepositoryResult<(usize, Vec<Vendor>)>;
    }

    impl PaymentReader for LedgerRepository {
        fn get_payment_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Payment>>;
        fn list_payments(&self, query: PaymentListQuery) -> RepositoryResult<(usize, Vec<Payment>)>;
    }

    impl PaymentWriter for LedgerRepository {
        fn create_payment(&self, new_payment: &NewPayment) -> RepositoryResult<Payment>;
        fn update_payment(&self, payment_id: i32, hub_id: i32, updates: &UpdatePayment) -> RepositoryResult<Payment>;
        fn delete_payment(&self, payment_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl ExpenseReader for LedgerRepository {
        fn get_expense_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Expense>>;
        fn list_expenses(&self, query: ExpenseListQuery) -> RepositoryResult<(usize, Vec<Expense>)>;
    }

    impl ExpenseWriter for LedgerRepository {
        fn create_expense(&self, new_expense: &NewExpense) -> RepositoryResult<Expense>;
        fn update_expense(&self, expense_id: i32, hub_id: i32, updates: &UpdateExpense) -> RepositoryResult<Expense>;
        fn delete_expense(&self, expense_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub RateRepository {}

    impl RateReader for RateRepository {
        fn list_rates<'a>(&self, region: Region, trip_code_prefix: Option<&'a str>) -> RepositoryResult<Vec<RateRow>>;
    }

    impl RateWriter for RateRepository {
        fn replace_rates(&self, region: Region, rows: &[RateRow]) -> RepositoryResult<usize>;
    }
}
