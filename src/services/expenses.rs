use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::expense::{Expense, ExpenseCategory, ExpenseListQuery};
use crate::domain::trip::{Trip, TripListQuery};
use crate::domain::vendor::{Vendor, VendorListQuery};
use crate::forms::expenses::ExpenseForm;
use crate::forms::parse_optional_variant;
use crate::repository::{ExpenseReader, ExpenseWriter, TripReader, VendorReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the expenses list.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    pub trip_id: Option<i32>,
    pub category: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the expenses list and its entry form.
pub struct ExpensesPageData {
    pub expenses: Paginated<Expense>,
    pub trip: Option<Trip>,
    pub category: Option<ExpenseCategory>,
    pub trips: Vec<Trip>,
    /// Active vendors offered by the entry form.
    pub vendors: Vec<Vendor>,
}

pub fn load_expenses_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ExpensesQuery,
) -> ServiceResult<ExpensesPageData>
where
    R: ExpenseReader + TripReader + VendorReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category: Option<ExpenseCategory> = parse_optional_variant(query.category.as_deref())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let page = query.page.unwrap_or(1);
    let mut list_query =
        ExpenseListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let trip = match query.trip_id {
        Some(trip_id) => {
            let trip = repo
                .get_trip_by_id(trip_id, user.hub_id)
                .map_err(ServiceError::from)?
                .ok_or(ServiceError::NotFound)?;
            list_query = list_query.trip_id(trip.id);
            Some(trip)
        }
        None => None,
    };
    if let Some(category) = category {
        list_query = list_query.category(category);
    }

    let (total, expenses) = repo
        .list_expenses(list_query)
        .map_err(ServiceError::from)?;

    let (trips, vendors) = load_form_options(repo, user.hub_id)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let expenses = Paginated::new(expenses, page, total_pages);

    Ok(ExpensesPageData {
        expenses,
        trip,
        category,
        trips,
        vendors,
    })
}

/// Data required to render the expense edit form.
pub struct ExpensePageData {
    pub expense: Expense,
    pub trips: Vec<Trip>,
    pub vendors: Vec<Vendor>,
}

pub fn load_expense_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    expense_id: i32,
) -> ServiceResult<ExpensePageData>
where
    R: ExpenseReader + TripReader + VendorReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let expense = repo
        .get_expense_by_id(expense_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let (trips, vendors) = load_form_options(repo, user.hub_id)?;

    Ok(ExpensePageData {
        expense,
        trips,
        vendors,
    })
}

fn load_form_options<R>(repo: &R, hub_id: i32) -> ServiceResult<(Vec<Trip>, Vec<Vendor>)>
where
    R: TripReader + VendorReader + ?Sized,
{
    let (_, trips) = repo
        .list_trips(TripListQuery::new(hub_id))
        .map_err(ServiceError::from)?;
    let (_, vendors) = repo
        .list_vendors(VendorListQuery::new(hub_id))
        .map_err(ServiceError::from)?;

    Ok((trips, vendors))
}

/// Rejects trips and vendors that do not belong to the hub.
fn ensure_links_in_hub<R>(
    repo: &R,
    hub_id: i32,
    trip_id: Option<i32>,
    vendor_id: Option<i32>,
) -> ServiceResult<()>
where
    R: TripReader + VendorReader + ?Sized,
{
    if let Some(trip_id) = trip_id {
        repo.get_trip_by_id(trip_id, hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form("trip not found".to_string()))?;
    }
    if let Some(vendor_id) = vendor_id {
        repo.get_vendor_by_id(vendor_id, hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form("vendor not found".to_string()))?;
    }

    Ok(())
}

pub fn create_expense<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ExpenseForm,
) -> ServiceResult<Expense>
where
    R: TripReader + VendorReader + ExpenseWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_expense = form
        .into_new_expense(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_links_in_hub(
        repo,
        user.hub_id,
        new_expense.details.trip_id,
        new_expense.details.vendor_id,
    )?;

    repo.create_expense(&new_expense)
        .map_err(ServiceError::from)
}

pub fn update_expense<R>(
    repo: &R,
    user: &AuthenticatedUser,
    expense_id: i32,
    form: ExpenseForm,
) -> ServiceResult<Expense>
where
    R: TripReader + VendorReader + ExpenseWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_expense()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_links_in_hub(
        repo,
        user.hub_id,
        updates.details.trip_id,
        updates.details.vendor_id,
    )?;

    repo.update_expense(expense_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

pub fn remove_expense<R>(repo: &R, user: &AuthenticatedUser, expense_id: i32) -> ServiceResult<()>
where
    R: ExpenseWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_expense(expense_id, user.hub_id)
        .map_err(ServiceError::from)
}
