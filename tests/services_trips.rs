use chrono::NaiveDate;
use pushkind_travel::domain::expense::{ExpenseCategory, ExpenseDetails, NewExpense};
use pushkind_travel::domain::lead::{LeadStatus, NewLead};
use pushkind_travel::domain::payment::{NewPayment, PaymentDetails, PaymentMode, PaymentType};
use pushkind_travel::domain::trip::TripListQuery;
use pushkind_travel::forms::trips::{RoomBookingForm, TripForm};
use pushkind_travel::repository::{
    DieselRepository, ExpenseWriter, LeadReader, LeadWriter, PaymentWriter, TripReader,
};
use pushkind_travel::services::{ServiceError, trips};

mod common;

fn conversion_form(lead_id: i32) -> TripForm {
    TripForm {
        lead_id: Some(lead_id.to_string()),
        customer_name: "Asha".to_string(),
        phone: Some("9800000001".to_string()),
        destination: "Munnar".to_string(),
        start_date: "2026-12-20".to_string(),
        end_date: Some("2026-12-23".to_string()),
        pax: "4".to_string(),
        rate_per_head: "9000".to_string(),
        rooms: vec![RoomBookingForm {
            place: "Munnar".to_string(),
            property_name: "Tea Valley Resort".to_string(),
            check_in: "2026-12-20".to_string(),
            check_out: "2026-12-23".to_string(),
            rooms: Some("2".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn converting_a_lead_books_a_trip_once() {
    let test_db = common::TestDb::new("service_converting_a_lead_books_once.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = common::staff(1);

    let lead = repo
        .create_lead(&NewLead::new(1, "Asha", "9800000001").with_destination("Munnar"))
        .expect("create lead");

    let trip = trips::create_trip(&repo, &user, conversion_form(lead.id)).expect("convert lead");

    assert_eq!(trip.lead_id, Some(lead.id));
    assert_eq!(trip.total_amount_paise, 36_000_00);
    assert_eq!(trip.gst_amount_paise, 1_800_00);
    assert_eq!(trip.grand_total_paise, 37_800_00);
    assert_eq!(trip.room_bookings.len(), 1);
    assert_eq!(trip.room_bookings[0].rooms, 2);

    let converted = repo
        .get_lead_by_id(lead.id, 1)
        .expect("load lead")
        .expect("lead exists");
    assert_eq!(converted.status, LeadStatus::Converted);

    let second = trips::create_trip(&repo, &user, conversion_form(lead.id));
    assert!(matches!(second, Err(ServiceError::Conflict)));

    let (total, _) = repo
        .list_trips(TripListQuery::new(1))
        .expect("list trips");
    assert_eq!(total, 1);

    let prefill = trips::load_trip_prefill(&repo, &user, Some(lead.id));
    assert!(matches!(prefill, Err(ServiceError::Conflict)));
}

#[test]
fn converting_a_foreign_lead_is_rejected() {
    let test_db = common::TestDb::new("service_converting_foreign_lead.db");
    let repo = DieselRepository::new(test_db.pool());

    let lead = repo
        .create_lead(&NewLead::new(2, "Other hub", "1"))
        .expect("create lead");

    let result = trips::create_trip(&repo, &common::staff(1), conversion_form(lead.id));

    assert!(matches!(result, Err(ServiceError::Form(_))));
    let (total, _) = repo
        .list_trips(TripListQuery::new(1))
        .expect("list trips");
    assert_eq!(total, 0);
}

#[test]
fn trip_page_reports_balance_and_profit() {
    let test_db = common::TestDb::new("service_trip_page_financials.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = common::staff(1);

    let lead = repo
        .create_lead(&NewLead::new(1, "Asha", "9800000001"))
        .expect("create lead");
    let trip = trips::create_trip(&repo, &user, conversion_form(lead.id)).expect("create trip");
    let day = NaiveDate::from_ymd_opt(2026, 11, 1).expect("valid date");

    for (payment_type, amount_paise) in [
        (PaymentType::Advance, 20_000_00),
        (PaymentType::Refund, 2_000_00),
    ] {
        repo.create_payment(&NewPayment::new(
            1,
            PaymentDetails {
                trip_id: Some(trip.id),
                payment_type,
                mode: PaymentMode::Upi,
                amount_paise,
                reference: None,
                paid_on: day,
                notes: None,
            },
        ))
        .expect("create payment");
    }

    repo.create_expense(&NewExpense::new(
        1,
        ExpenseDetails {
            trip_id: Some(trip.id),
            vendor_id: None,
            category: ExpenseCategory::Hotel,
            mode: PaymentMode::BankTransfer,
            amount_paise: 27_000_00,
            description: "Resort advance".to_string(),
            spent_on: day,
            notes: None,
        },
    ))
    .expect("create expense");

    let page = trips::load_trip_page(&repo, &user, trip.id).expect("load trip page");

    assert_eq!(page.payments.len(), 2);
    assert_eq!(page.expenses.len(), 1);
    assert_eq!(page.financials.received_paise, 18_000_00);
    assert_eq!(page.financials.balance_due_paise, 19_800_00);
    assert_eq!(page.financials.profit_paise, 9_000_00);
    assert!((page.financials.margin_percent - 25.0).abs() < f64::EPSILON);

    let foreign = trips::load_trip_page(&repo, &common::staff(2), trip.id);
    assert!(matches!(foreign, Err(ServiceError::NotFound)));
}
