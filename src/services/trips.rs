use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::expense::{Expense, ExpenseListQuery};
use crate::domain::lead::Lead;
use crate::domain::payment::{Payment, PaymentListQuery};
use crate::domain::trip::{Trip, TripFinancials, TripListQuery, TripStatus};
use crate::forms::parse_optional_variant;
use crate::forms::trips::TripForm;
use crate::repository::{ExpenseReader, LeadReader, PaymentReader, TripReader, TripWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the trips list.
#[derive(Debug, Default, Deserialize)]
pub struct TripsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the trips list.
pub struct TripsPageData {
    pub trips: Paginated<Trip>,
    pub search: Option<String>,
    pub status: Option<TripStatus>,
}

pub fn load_trips_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: TripsQuery,
) -> ServiceResult<TripsPageData>
where
    R: TripReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let status: Option<TripStatus> = parse_optional_variant(query.status.as_deref())
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let search = query
        .search
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let page = query.page.unwrap_or(1);
    let mut list_query = TripListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(value) = search.as_ref() {
        list_query = list_query.search(value);
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, trips) = repo.list_trips(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let trips = Paginated::new(trips, page, total_pages);

    Ok(TripsPageData {
        trips,
        search,
        status,
    })
}

/// Data required to render a single trip.
pub struct TripPageData {
    pub trip: Trip,
    pub payments: Vec<Payment>,
    pub expenses: Vec<Expense>,
    pub financials: TripFinancials,
}

/// Loads a trip with its ledger and derived financials.
pub fn load_trip_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
) -> ServiceResult<TripPageData>
where
    R: TripReader + PaymentReader + ExpenseReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let trip = repo
        .get_trip_by_id(trip_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let (_, payments) = repo
        .list_payments(PaymentListQuery::new(user.hub_id).trip_id(trip.id))
        .map_err(ServiceError::from)?;
    let (_, expenses) = repo
        .list_expenses(ExpenseListQuery::new(user.hub_id).trip_id(trip.id))
        .map_err(ServiceError::from)?;

    let financials = TripFinancials::compute(&trip, &payments, &expenses);

    Ok(TripPageData {
        trip,
        payments,
        expenses,
        financials,
    })
}

/// Loads a trip for the edit form.
pub fn load_trip<R>(repo: &R, user: &AuthenticatedUser, trip_id: i32) -> ServiceResult<Trip>
where
    R: TripReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_trip_by_id(trip_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Lead used to prefill the "new trip" form.
///
/// Fails with [`ServiceError::Conflict`] when the lead was already converted.
pub fn load_trip_prefill<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: Option<i32>,
) -> ServiceResult<Option<Lead>>
where
    R: LeadReader + TripReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let Some(lead_id) = lead_id else {
        return Ok(None);
    };

    let lead = repo
        .get_lead_by_id(lead_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    ensure_lead_has_no_trip(repo, user.hub_id, lead.id)?;

    Ok(Some(lead))
}

fn ensure_lead_has_no_trip<R>(repo: &R, hub_id: i32, lead_id: i32) -> ServiceResult<()>
where
    R: TripReader + ?Sized,
{
    let existing = repo
        .get_trip_by_lead_id(lead_id, hub_id)
        .map_err(ServiceError::from)?;

    if existing.is_some() {
        log::warn!("lead {lead_id} already has a trip");
        return Err(ServiceError::Conflict);
    }

    Ok(())
}

/// Books a trip. When created from a lead the lead is marked converted in
/// the same transaction; a lead can only be converted once.
pub fn create_trip<R>(repo: &R, user: &AuthenticatedUser, form: TripForm) -> ServiceResult<Trip>
where
    R: LeadReader + TripReader + TripWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_trip = form
        .into_new_trip(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(lead_id) = new_trip.lead_id {
        repo.get_lead_by_id(lead_id, user.hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form("lead not found".to_string()))?;

        ensure_lead_has_no_trip(repo, user.hub_id, lead_id)?;
    }

    repo.create_trip(&new_trip).map_err(ServiceError::from)
}

/// Reprices a trip and replaces its room bookings.
pub fn update_trip<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
    form: TripForm,
) -> ServiceResult<Trip>
where
    R: TripWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_trip()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_trip(trip_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

pub fn remove_trip<R>(repo: &R, user: &AuthenticatedUser, trip_id: i32) -> ServiceResult<()>
where
    R: TripWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_trip(trip_id, user.hub_id)
        .map_err(ServiceError::from)
}
