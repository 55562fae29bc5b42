use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::repository::errors::RepositoryError;
use pushkind_travel::domain::expense::{
    ExpenseCategory, ExpenseDetails, ExpenseListQuery, NewExpense,
};
use pushkind_travel::domain::follow_up::NewFollowUp;
use pushkind_travel::domain::lead::{LeadListQuery, LeadPriority, LeadStatus, NewLead, UpdateLead};
use pushkind_travel::domain::money::{PriceBreakdown, TRIP_GST_PERCENT};
use pushkind_travel::domain::payment::{
    NewPayment, PaymentDetails, PaymentListQuery, PaymentMode, PaymentType,
};
use pushkind_travel::domain::quotation::{NewQuotation, QuotationStatus};
use pushkind_travel::domain::rate::{PaxGroup, RateColumn, RateRow, Region};
use pushkind_travel::domain::trip::{NewTrip, RoomBooking, TripListQuery, TripStatus, UpdateTrip};
use pushkind_travel::domain::vendor::{
    HotelPriceList, MealPlan, NewVendor, PriceTier, SharingType, VendorCategory, VendorDetails,
    VendorListQuery,
};
use pushkind_travel::repository::{
    DieselRepository, ExpenseReader, ExpenseWriter, FollowUpReader, FollowUpWriter, LeadReader,
    LeadWriter, PaymentReader, PaymentWriter, QuotationWriter, RateReader, RateWriter, TripReader,
    TripWriter, VendorReader, VendorWriter,
};

mod common;

#[test]
fn test_lead_repository_crud() {
    let test_db = common::TestDb::new("test_lead_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let asha = repo
        .create_lead(&NewLead::new(1, "Asha", "9800000001").with_destination("Munnar"))
        .unwrap();
    repo.create_lead(&NewLead::new(1, "Ravi", "9800000002").with_priority(LeadPriority::High))
        .unwrap();

    let (total, items) = repo.list_leads(LeadListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (total, items) = repo
        .list_leads(LeadListQuery::new(1).search("munn"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].customer_name, "Asha");

    let updates = UpdateLead {
        customer_name: "Asha K".to_string(),
        phone: asha.phone.clone(),
        email: Some("asha@example.com".to_string()),
        destination: asha.destination.clone(),
        travel_date: NaiveDate::from_ymd_opt(2026, 12, 20),
        duration: Some("4D3N".to_string()),
        pax: Some(4),
        budget_paise: Some(80_000_00),
        source: Some("Website".to_string()),
        status: LeadStatus::Contacted,
        priority: LeadPriority::Medium,
        assigned_to: None,
        notes: None,
        updated_at: asha.updated_at,
    };

    let updated = repo.update_lead(asha.id, 1, &updates).unwrap();
    assert_eq!(updated.customer_name, "Asha K");
    assert_eq!(updated.status, LeadStatus::Contacted);
    assert_eq!(updated.budget_paise, Some(80_000_00));

    let err = repo
        .update_lead(asha.id, 2, &updates)
        .expect_err("expected hub-scoped update to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .delete_lead(asha.id, 2)
        .expect_err("expected hub-scoped delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_lead(asha.id, 1).unwrap();
    assert!(repo.get_lead_by_id(asha.id, 1).unwrap().is_none());

    let (total_after, items_after) = repo.list_leads(LeadListQuery::new(1)).unwrap();
    assert_eq!(total_after, 1);
    assert_eq!(items_after[0].customer_name, "Ravi");
}

#[test]
fn test_converted_leads_are_hidden_by_default() {
    let test_db = common::TestDb::new("test_converted_leads_hidden.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_lead(&NewLead::new(1, "Open", "1")).unwrap();
    repo.create_lead(&NewLead::new(1, "Done", "2").with_status(LeadStatus::Converted))
        .unwrap();

    let (total, _) = repo.list_leads(LeadListQuery::new(1)).unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_leads(LeadListQuery::new(1).include_converted())
        .unwrap();
    assert_eq!(total, 2);

    let (total, items) = repo
        .list_leads(LeadListQuery::new(1).status(LeadStatus::Converted))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].customer_name, "Done");

    let counts = repo.count_leads_by_status(1).unwrap();
    assert!(counts.contains(&(LeadStatus::New, 1)));
    assert!(counts.contains(&(LeadStatus::Converted, 1)));
}

#[test]
fn test_follow_ups_are_removed_with_their_lead() {
    let test_db = common::TestDb::new("test_follow_ups_removed_with_lead.db");
    let repo = DieselRepository::new(test_db.pool());

    let lead = repo.create_lead(&NewLead::new(1, "Meena", "9")).unwrap();
    let due = NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap();
    let later = NaiveDate::from_ymd_opt(2026, 10, 25)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap();

    let first = repo
        .create_follow_up(&NewFollowUp::new(lead.id, due, Some("Call back".into())))
        .unwrap();
    repo.create_follow_up(&NewFollowUp::new(lead.id, later, None))
        .unwrap();

    let end_of_day = due.date().and_hms_opt(23, 59, 59).unwrap();
    let due_list = repo.list_due_follow_ups(1, end_of_day).unwrap();
    assert_eq!(due_list.len(), 1);
    assert_eq!(due_list[0].customer_name, "Meena");

    repo.complete_follow_up(first.id, 1, end_of_day).unwrap();
    assert!(repo.list_due_follow_ups(1, end_of_day).unwrap().is_empty());

    let err = repo
        .complete_follow_up(first.id, 2, end_of_day)
        .expect_err("expected hub-scoped completion to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_lead(lead.id, 1).unwrap();
    assert!(repo.list_follow_ups(lead.id, 1).unwrap().is_empty());
}

#[test]
fn test_vendor_price_lists_are_replaced_on_update() {
    let test_db = common::TestDb::new("test_vendor_price_lists.db");
    let repo = DieselRepository::new(test_db.pool());

    let deluxe = HotelPriceList {
        room_category: "Deluxe".to_string(),
        sharing: SharingType::Double,
        tier: PriceTier::Regular,
        season: Some("Peak".to_string()),
        ep_rate_paise: Some(3_500_00),
        cp_rate_paise: Some(4_000_00),
        map_rate_paise: None,
        ap_rate_paise: None,
        child_with_bed_paise: None,
        child_without_bed_paise: None,
        extra_bed_paise: Some(1_000_00),
    };

    let details = VendorDetails::new("Tea Valley Resort", VendorCategory::Hotel)
        .with_location("Munnar")
        .with_price_lists(vec![deluxe.clone()]);
    let vendor = repo.create_vendor(&NewVendor::new(1, details)).unwrap();
    assert_eq!(vendor.price_lists, vec![deluxe.clone()]);

    let suite = HotelPriceList {
        room_category: "Suite".to_string(),
        tier: PriceTier::B2b,
        ..deluxe
    };
    let details = VendorDetails::new("Tea Valley Resort", VendorCategory::Hotel)
        .with_price_lists(vec![suite.clone()]);
    let updated = repo
        .update_vendor(
            vendor.id,
            1,
            &pushkind_travel::domain::vendor::UpdateVendor {
                details,
                updated_at: vendor.updated_at,
            },
        )
        .unwrap();
    assert_eq!(updated.price_lists, vec![suite]);
    assert_eq!(updated.location, None);

    let (total, _) = repo
        .list_vendors(VendorListQuery::new(1).category(VendorCategory::Hotel))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_vendor(vendor.id, 1).unwrap();
    assert!(repo.get_vendor_by_id(vendor.id, 1).unwrap().is_none());
}

#[test]
fn test_rate_tables_are_replaced_per_region() {
    let test_db = common::TestDb::new("test_rate_tables_replaced.db");
    let repo = DieselRepository::new(test_db.pool());
    let column = RateColumn::Group(PaxGroup::Pax20Plus2);

    let rows = vec![
        RateRow::new("1", "FWS201").with_rate(column, 12_500_00),
        RateRow::new("2", "FWS301").with_rate(column, 15_000_00),
    ];
    assert_eq!(repo.replace_rates(Region::South, &rows).unwrap(), 2);

    let replacement = vec![RateRow::new("1", "FWS202").with_rate(column, 13_000_00)];
    assert_eq!(repo.replace_rates(Region::South, &replacement).unwrap(), 1);

    let stored = repo.list_rates(Region::South, None).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].trip_code, "FWS202");
    assert_eq!(stored[0].rate(column), Some(13_000_00));

    assert!(repo.list_rates(Region::North, None).unwrap().is_empty());
    assert!(repo.list_rates(Region::South, Some("FWS3")).unwrap().is_empty());
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_utc()
}

fn room(property_name: &str, check_in: NaiveDate, check_out: NaiveDate) -> RoomBooking {
    RoomBooking {
        place: "Munnar".to_string(),
        property_name: property_name.to_string(),
        check_in,
        check_out,
        rooms: 1,
        room_type: Some("Deluxe".to_string()),
        meal_plan: Some(MealPlan::Cp),
        confirmed: false,
    }
}

fn new_trip(hub_id: i32, lead_id: Option<i32>) -> NewTrip {
    NewTrip {
        hub_id,
        lead_id,
        customer_name: "Asha".to_string(),
        phone: None,
        email: None,
        destination: "Munnar".to_string(),
        start_date: date(2026, 12, 20),
        end_date: Some(date(2026, 12, 23)),
        pax: 2,
        rate_per_head_paise: 10_000_00,
        price: PriceBreakdown::compute(10_000_00, 2, 0, 0, TRIP_GST_PERCENT).unwrap(),
        status: TripStatus::Upcoming,
        notes: None,
        room_bookings: vec![room("Tea Valley Resort", date(2026, 12, 20), date(2026, 12, 23))],
        updated_at: now(),
    }
}

fn new_quotation(hub_id: i32, lead_id: i32) -> NewQuotation {
    NewQuotation {
        hub_id,
        lead_id: Some(lead_id),
        customer_name: "Asha".to_string(),
        destination: "Munnar".to_string(),
        duration: Some("3D2N".to_string()),
        pax: 2,
        rate_per_head_paise: 10_000_00,
        extras_paise: 0,
        price: PriceBreakdown::compute(10_000_00, 2, 0, 0, 5.0).unwrap(),
        valid_until: None,
        status: QuotationStatus::Draft,
        notes: None,
        updated_at: now(),
    }
}

fn payment_details(trip_id: Option<i32>, amount_paise: i64, paid_on: NaiveDate) -> PaymentDetails {
    PaymentDetails {
        trip_id,
        payment_type: PaymentType::Advance,
        mode: PaymentMode::Upi,
        amount_paise,
        reference: None,
        paid_on,
        notes: None,
    }
}

fn expense_details(
    trip_id: Option<i32>,
    vendor_id: Option<i32>,
    amount_paise: i64,
    spent_on: NaiveDate,
) -> ExpenseDetails {
    ExpenseDetails {
        trip_id,
        vendor_id,
        category: ExpenseCategory::Hotel,
        mode: PaymentMode::BankTransfer,
        amount_paise,
        description: "Hotel advance".to_string(),
        spent_on,
        notes: None,
    }
}

#[test]
fn test_quotation_moves_early_leads_to_quoted() {
    let test_db = common::TestDb::new("test_quotation_moves_leads.db");
    let repo = DieselRepository::new(test_db.pool());

    for (status, expected) in [
        (LeadStatus::New, LeadStatus::Quoted),
        (LeadStatus::Contacted, LeadStatus::Quoted),
        (LeadStatus::FollowUp, LeadStatus::Quoted),
        (LeadStatus::Confirmed, LeadStatus::Confirmed),
    ] {
        let lead = repo
            .create_lead(&NewLead::new(1, "Asha", "9800000001").with_status(status))
            .unwrap();

        let quotation = repo.create_quotation(&new_quotation(1, lead.id)).unwrap();
        assert_eq!(quotation.lead_id, Some(lead.id));
        assert_eq!(quotation.grand_total_paise, 21_000_00);

        let stored = repo.get_lead_by_id(lead.id, 1).unwrap().unwrap();
        assert_eq!(stored.status, expected, "lead created as {status:?}");
    }
}

#[test]
fn test_trip_update_reprices_and_replaces_rooms() {
    let test_db = common::TestDb::new("test_trip_update_replaces_rooms.db");
    let repo = DieselRepository::new(test_db.pool());

    let trip = repo.create_trip(&new_trip(1, None)).unwrap();
    assert_eq!(trip.grand_total_paise, 21_000_00);
    assert_eq!(trip.room_bookings.len(), 1);

    let updates = UpdateTrip {
        customer_name: trip.customer_name.clone(),
        phone: None,
        email: None,
        destination: "Alleppey".to_string(),
        start_date: trip.start_date,
        end_date: trip.end_date,
        pax: 4,
        rate_per_head_paise: 9_000_00,
        price: PriceBreakdown::compute(9_000_00, 4, 0, 1_000_00, TRIP_GST_PERCENT).unwrap(),
        status: TripStatus::Ongoing,
        notes: None,
        room_bookings: vec![
            room("Houseboat", date(2026, 12, 20), date(2026, 12, 21)),
            room("Lake Palace", date(2026, 12, 21), date(2026, 12, 23)),
        ],
        updated_at: now(),
    };

    let updated = repo.update_trip(trip.id, 1, &updates).unwrap();
    assert_eq!(updated.total_amount_paise, 35_000_00);
    assert_eq!(updated.gst_amount_paise, 1_750_00);
    assert_eq!(updated.grand_total_paise, 36_750_00);
    assert_eq!(updated.status, TripStatus::Ongoing);

    let stored = repo.get_trip_by_id(trip.id, 1).unwrap().unwrap();
    let properties: Vec<&str> = stored
        .room_bookings
        .iter()
        .map(|booking| booking.property_name.as_str())
        .collect();
    assert_eq!(properties, vec!["Houseboat", "Lake Palace"]);

    let err = repo
        .update_trip(trip.id, 2, &updates)
        .expect_err("expected hub-scoped update to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_trip_delete_detaches_payments_and_expenses() {
    let test_db = common::TestDb::new("test_trip_delete_detaches.db");
    let repo = DieselRepository::new(test_db.pool());
    let day = date(2026, 11, 1);

    let trip = repo.create_trip(&new_trip(1, None)).unwrap();
    let payment = repo
        .create_payment(&NewPayment::new(1, payment_details(Some(trip.id), 5_000_00, day)))
        .unwrap();
    let expense = repo
        .create_expense(&NewExpense::new(1, expense_details(Some(trip.id), None, 2_000_00, day)))
        .unwrap();

    let err = repo
        .delete_trip(trip.id, 2)
        .expect_err("expected hub-scoped delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_trip(trip.id, 1).unwrap();
    assert!(repo.get_trip_by_id(trip.id, 1).unwrap().is_none());

    let payment = repo.get_payment_by_id(payment.id, 1).unwrap().unwrap();
    assert_eq!(payment.trip_id, None);
    assert_eq!(payment.amount_paise, 5_000_00);

    let expense = repo.get_expense_by_id(expense.id, 1).unwrap().unwrap();
    assert_eq!(expense.trip_id, None);
}

#[test]
fn test_vendor_delete_detaches_expenses() {
    let test_db = common::TestDb::new("test_vendor_delete_detaches.db");
    let repo = DieselRepository::new(test_db.pool());

    let vendor = repo
        .create_vendor(&NewVendor::new(
            1,
            VendorDetails::new("Kerala Cabs", VendorCategory::Transport),
        ))
        .unwrap();
    let expense = repo
        .create_expense(&NewExpense::new(
            1,
            expense_details(None, Some(vendor.id), 4_500_00, date(2026, 11, 2)),
        ))
        .unwrap();

    repo.delete_vendor(vendor.id, 1).unwrap();
    assert!(repo.get_vendor_by_id(vendor.id, 1).unwrap().is_none());

    let expense = repo.get_expense_by_id(expense.id, 1).unwrap().unwrap();
    assert_eq!(expense.vendor_id, None);
    assert_eq!(expense.amount_paise, 4_500_00);
}

#[test]
fn test_trip_for_foreign_lead_leaves_nothing_behind() {
    let test_db = common::TestDb::new("test_trip_foreign_lead_rollback.db");
    let repo = DieselRepository::new(test_db.pool());

    let foreign = repo.create_lead(&NewLead::new(2, "Other hub", "1")).unwrap();

    let err = repo
        .create_trip(&new_trip(1, Some(foreign.id)))
        .expect_err("expected conversion of a foreign lead to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let (total, _) = repo.list_trips(TripListQuery::new(1)).unwrap();
    assert_eq!(total, 0);
    assert!(repo.get_trip_by_lead_id(foreign.id, 1).unwrap().is_none());

    let lead = repo.get_lead_by_id(foreign.id, 2).unwrap().unwrap();
    assert_eq!(lead.status, LeadStatus::New);
}

#[test]
fn test_ledger_lists_respect_date_bounds() {
    let test_db = common::TestDb::new("test_ledger_date_bounds.db");
    let repo = DieselRepository::new(test_db.pool());

    for (amount_paise, day) in [
        (1_000_00, date(2026, 9, 30)),
        (2_000_00, date(2026, 10, 1)),
        (3_000_00, date(2026, 10, 31)),
        (4_000_00, date(2026, 11, 1)),
    ] {
        repo.create_payment(&NewPayment::new(1, payment_details(None, amount_paise, day)))
            .unwrap();
        repo.create_expense(&NewExpense::new(1, expense_details(None, None, amount_paise, day)))
            .unwrap();
    }

    let (total, payments) = repo
        .list_payments(
            PaymentListQuery::new(1)
                .paid_from(date(2026, 10, 1))
                .paid_before(date(2026, 11, 1)),
        )
        .unwrap();
    assert_eq!(total, 2);
    let received: i64 = payments.iter().map(|payment| payment.amount_paise).sum();
    assert_eq!(received, 5_000_00);

    let (total, expenses) = repo
        .list_expenses(
            ExpenseListQuery::new(1)
                .spent_from(date(2026, 10, 1))
                .spent_before(date(2026, 11, 1)),
        )
        .unwrap();
    assert_eq!(total, 2);
    let spent: i64 = expenses.iter().map(|expense| expense.amount_paise).sum();
    assert_eq!(spent, 5_000_00);
}
