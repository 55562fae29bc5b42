use chrono::{Datelike, Months, NaiveDate};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::dashboard::DashboardSummary;
use crate::domain::expense::ExpenseListQuery;
use crate::domain::payment::{PaymentListQuery, PaymentType};
use crate::domain::trip::{TripListQuery, TripStatus};
use crate::repository::{ExpenseReader, FollowUpReader, LeadReader, PaymentReader, TripReader};
use crate::services::{ServiceError, ServiceResult};

/// First day of the month containing `day` and first day of the next month.
fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let next = start.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
    (start, next)
}

/// Builds the figures shown on the back-office landing page for `today`.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<DashboardSummary>
where
    R: LeadReader + FollowUpReader + TripReader + PaymentReader + ExpenseReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let raw_counts = repo
        .count_leads_by_status(user.hub_id)
        .map_err(ServiceError::from)?;
    let (lead_counts, open_leads) = DashboardSummary::lead_counts_from(&raw_counts);

    let end_of_day = today
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| ServiceError::Form("invalid date".to_string()))?;
    let due_follow_ups = repo
        .list_due_follow_ups(user.hub_id, end_of_day)
        .map_err(ServiceError::from)?;

    let (upcoming_trips, _) = repo
        .list_trips(
            TripListQuery::new(user.hub_id)
                .status(TripStatus::Upcoming)
                .starting_from(today),
        )
        .map_err(ServiceError::from)?;

    let (month_start, next_month_start) = month_bounds(today);

    let (_, payments) = repo
        .list_payments(
            PaymentListQuery::new(user.hub_id)
                .paid_from(month_start)
                .paid_before(next_month_start),
        )
        .map_err(ServiceError::from)?;
    let month_received_paise = payments
        .iter()
        .map(|payment| match payment.payment_type {
            PaymentType::Refund => -payment.amount_paise,
            _ => payment.amount_paise,
        })
        .sum();

    let (_, expenses) = repo
        .list_expenses(
            ExpenseListQuery::new(user.hub_id)
                .spent_from(month_start)
                .spent_before(next_month_start),
        )
        .map_err(ServiceError::from)?;
    let month_expenses_paise = expenses.iter().map(|expense| expense.amount_paise).sum();

    Ok(DashboardSummary {
        lead_counts,
        open_leads,
        due_follow_ups,
        upcoming_trips,
        month_received_paise,
        month_expenses_paise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::domain::expense::{Expense, ExpenseCategory};
    use crate::domain::lead::LeadStatus;
    use crate::domain::payment::{Payment, PaymentMode};
    use crate::repository::mock::MockLeadRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap_or_default()
    }

    fn fixed_datetime() -> NaiveDateTime {
        today().and_hms_opt(0, 0, 0).unwrap_or_default()
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

    fn payment(payment_type: PaymentType, amount_paise: i64) -> Payment {
        Payment {
            id: 1,
            hub_id: 9,
            trip_id: None,
            payment_type,
            mode: PaymentMode::Cash,
            amount_paise,
            reference: None,
            paid_on: today(),
            notes: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn expense(amount_paise: i64) -> Expense {
        Expense {
            id: 1,
            hub_id: 9,
            trip_id: None,
            vendor_id: None,
            category: ExpenseCategory::Office,
            mode: PaymentMode::Cash,
            amount_paise,
            description: "Printer ink".to_string(),
            spent_on: today(),
            notes: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn month_bounds_roll_over_the_year() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default();

        let (start, next) = month_bounds(day);

        assert_eq!(Some(start), NaiveDate::from_ymd_opt(2025, 12, 1));
        assert_eq!(Some(next), NaiveDate::from_ymd_opt(2026, 1, 1));
    }

    #[test]
    fn load_dashboard_requires_role() {
        let repo = MockLeadRepository::new();
        let user = user_with_roles(&[]);

        let result = load_dashboard(&repo, &user, today());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_dashboard_summarises_current_month() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_count_leads_by_status()
            .times(1)
            .returning(|_| Ok(vec![(LeadStatus::New, 3), (LeadStatus::Lost, 2)]));
        repo.expect_list_due_follow_ups()
            .times(1)
            .withf(|hub_id, due_by| {
                *hub_id == 9
                    && due_by.date() == today()
                    && due_by.format("%H:%M").to_string() == "23:59"
            })
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_list_trips()
            .times(1)
            .withf(|query| {
                query.status == Some(TripStatus::Upcoming)
                    && query.starting_from == Some(today())
                    && query.pagination.is_none()
            })
            .returning(|_| Ok((4, Vec::new())));
        repo.expect_list_payments()
            .times(1)
            .withf(|query| {
                query.paid_from == NaiveDate::from_ymd_opt(2025, 5, 1)
                    && query.paid_before == NaiveDate::from_ymd_opt(2025, 6, 1)
            })
            .returning(|_| {
                Ok((
                    2,
                    vec![
                        payment(PaymentType::Full, 50_000_00),
                        payment(PaymentType::Refund, 5_000_00),
                    ],
                ))
            });
        repo.expect_list_expenses()
            .times(1)
            .withf(|query| {
                query.spent_from == NaiveDate::from_ymd_opt(2025, 5, 1)
                    && query.spent_before == NaiveDate::from_ymd_opt(2025, 6, 1)
            })
            .returning(|_| Ok((1, vec![expense(1_200_00)])));

        let summary = load_dashboard(&repo, &user, today()).expect("expected success");

        assert_eq!(summary.open_leads, 3);
        assert_eq!(summary.upcoming_trips, 4);
        assert_eq!(summary.month_received_paise, 45_000_00);
        assert_eq!(summary.month_expenses_paise, 1_200_00);
    }
}
