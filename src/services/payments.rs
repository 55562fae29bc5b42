use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::payment::{Payment, PaymentListQuery};
use crate::domain::trip::{Trip, TripListQuery};
use crate::forms::payments::PaymentForm;
use crate::repository::{PaymentReader, PaymentWriter, TripReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the payments list.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentsQuery {
    pub trip_id: Option<i32>,
    pub page: Option<usize>,
}

/// Data required to render the payments list and its entry form.
pub struct PaymentsPageData {
    pub payments: Paginated<Payment>,
    /// Trip the list is filtered by.
    pub trip: Option<Trip>,
    /// Trips offered by the entry form.
    pub trips: Vec<Trip>,
}

pub fn load_payments_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PaymentsQuery,
) -> ServiceResult<PaymentsPageData>
where
    R: PaymentReader + TripReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1);
    let mut list_query =
        PaymentListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

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

    let (total, payments) = repo
        .list_payments(list_query)
        .map_err(ServiceError::from)?;

    let (_, trips) = repo
        .list_trips(TripListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let payments = Paginated::new(payments, page, total_pages);

    Ok(PaymentsPageData {
        payments,
        trip,
        trips,
    })
}

/// Data required to render the payment edit form.
pub struct PaymentPageData {
    pub payment: Payment,
    pub trips: Vec<Trip>,
}

pub fn load_payment_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payment_id: i32,
) -> ServiceResult<PaymentPageData>
where
    R: PaymentReader + TripReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let payment = repo
        .get_payment_by_id(payment_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let (_, trips) = repo
        .list_trips(TripListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    Ok(PaymentPageData { payment, trips })
}

fn ensure_trip_in_hub<R>(repo: &R, hub_id: i32, trip_id: Option<i32>) -> ServiceResult<()>
where
    R: TripReader + ?Sized,
{
    let Some(trip_id) = trip_id else {
        return Ok(());
    };

    repo.get_trip_by_id(trip_id, hub_id)
        .map_err(ServiceError::from)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::Form("trip not found".to_string()))
}

/// Records money received from (or refunded to) a customer.
pub fn create_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PaymentForm,
) -> ServiceResult<Payment>
where
    R: TripReader + PaymentWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_payment = form
        .into_new_payment(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_trip_in_hub(repo, user.hub_id, new_payment.details.trip_id)?;

    repo.create_payment(&new_payment)
        .map_err(ServiceError::from)
}

pub fn update_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payment_id: i32,
    form: PaymentForm,
) -> ServiceResult<Payment>
where
    R: TripReader + PaymentWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_payment()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_trip_in_hub(repo, user.hub_id, updates.details.trip_id)?;

    repo.update_payment(payment_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

pub fn remove_payment<R>(repo: &R, user: &AuthenticatedUser, payment_id: i32) -> ServiceResult<()>
where
    R: PaymentWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_payment(payment_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::payment::{PaymentMode, PaymentType};
    use crate::repository::mock::MockLedgerRepository;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 2).unwrap_or_default()
    }

    fn fixed_datetime() -> NaiveDateTime {
        fixed_date().and_hms_opt(0, 0, 0).unwrap_or_default()
    }

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 9,
            name: "Tester".to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exp: 0,
        }
    }

    fn sample_payment(id: i32, hub_id: i32, trip_id: Option<i32>) -> Payment {
        Payment {
            id,
            hub_id,
            trip_id,
            payment_type: PaymentType::Advance,
            mode: PaymentMode::Upi,
            amount_paise: 10_000_00,
            reference: Some("UPI-1".to_string()),
            paid_on: fixed_date(),
            notes: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn payment_form(trip_id: Option<&str>) -> PaymentForm {
        PaymentForm {
            trip_id: trip_id.map(str::to_string),
            payment_type: Some("advance".to_string()),
            mode: Some("upi".to_string()),
            amount: "10,000".to_string(),
            reference: Some("UPI-1".to_string()),
            paid_on: "2025-05-02".to_string(),
            notes: None,
        }
    }

    #[test]
    fn load_payments_page_requires_role() {
        let repo = MockLedgerRepository::new();
        let user = user_with_roles(&[]);

        let result = load_payments_page(&repo, &user, PaymentsQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_payments_page_reports_unknown_trip_filter() {
        let mut repo = MockLedgerRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_trip_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_list_payments().times(0);

        let query = PaymentsQuery {
            trip_id: Some(3),
            page: None,
        };
        let result = load_payments_page(&repo, &user, query);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_payments_page_lists_all_payments() {
        let mut repo = MockLedgerRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_payments()
            .times(1)
            .withf(|query| query.hub_id == 9 && query.trip_id.is_none())
            .returning(|_| Ok((1, vec![sample_payment(1, 9, None)])));
        repo.expect_list_trips()
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let data = load_payments_page(&repo, &user, PaymentsQuery::default())
            .expect("expected success");

        assert!(data.trip.is_none());
        assert!(data.trips.is_empty());
    }

    #[test]
    fn create_payment_rejects_foreign_trip() {
        let mut repo = MockLedgerRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_trip_by_id()
            .times(1)
            .withf(|id, hub_id| *id == 3 && *hub_id == 9)
            .returning(|_, _| Ok(None));
        repo.expect_create_payment().times(0);

        let result = create_payment(&repo, &user, payment_form(Some("3")));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_payment_without_trip_persists() {
        let mut repo = MockLedgerRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_trip_by_id().times(0);
        repo.expect_create_payment()
            .times(1)
            .withf(|new_payment| {
                new_payment.hub_id == 9 && new_payment.details.amount_paise == 10_000_00
            })
            .returning(|new_payment| Ok(sample_payment(8, new_payment.hub_id, None)));

        let payment = create_payment(&repo, &user, payment_form(None)).expect("expected success");

        assert_eq!(payment.id, 8);
    }

    #[test]
    fn update_payment_validates_amount() {
        let repo = MockLedgerRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let mut form = payment_form(None);
        form.amount = "0".to_string();

        let result = update_payment(&repo, &user, 8, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn remove_payment_is_hub_scoped() {
        let mut repo = MockLedgerRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_delete_payment()
            .times(1)
            .withf(|id, hub_id| *id == 8 && *hub_id == 9)
            .returning(|_, _| Ok(()));

        assert!(remove_payment(&repo, &user, 8).is_ok());
    }
}
