use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::expense::Expense;
use crate::domain::money::PriceBreakdown;
use crate::domain::payment::{Payment, PaymentType};
use crate::domain::vendor::MealPlan;

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

text_enum!(TripStatus, "trip status", {
    Upcoming => "upcoming",
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

/// Room reservation made for a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomBooking {
    /// City or stop the rooms are booked in.
    pub place: String,
    pub property_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub room_type: Option<String>,
    pub meal_plan: Option<MealPlan>,
    /// Whether the property confirmed the reservation.
    pub confirmed: bool,
}

impl RoomBooking {
    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: i32,
    pub hub_id: i32,
    /// Lead the trip was converted from.
    pub lead_id: Option<i32>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub discount_paise: i64,
    pub total_amount_paise: i64,
    pub gst_amount_paise: i64,
    pub grand_total_paise: i64,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub room_bookings: Vec<RoomBooking>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a trip together with its room bookings.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub hub_id: i32,
    pub lead_id: Option<i32>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub price: PriceBreakdown,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub room_bookings: Vec<RoomBooking>,
    pub updated_at: NaiveDateTime,
}

/// Full replacement of a trip's editable fields. Room bookings are replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTrip {
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub price: PriceBreakdown,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub room_bookings: Vec<RoomBooking>,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list trips for a hub.
#[derive(Debug, Clone)]
pub struct TripListQuery {
    pub hub_id: i32,
    pub status: Option<TripStatus>,
    /// Optional search over customer name and destination.
    pub search: Option<String>,
    /// Only trips starting on or after this date.
    pub starting_from: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl TripListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            status: None,
            search: None,
            starting_from: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: TripStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn starting_from(mut self, date: NaiveDate) -> Self {
        self.starting_from = Some(date);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Money received and spent against a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripFinancials {
    pub grand_total_paise: i64,
    /// Payments minus refunds.
    pub received_paise: i64,
    pub balance_due_paise: i64,
    pub expenses_paise: i64,
    /// Revenue before GST minus expenses.
    pub profit_paise: i64,
    /// Profit as a percentage of the pre-GST total; zero for free trips.
    pub margin_percent: f64,
}

impl TripFinancials {
    pub fn compute(trip: &Trip, payments: &[Payment], expenses: &[Expense]) -> Self {
        let received_paise = payments
            .iter()
            .map(|payment| match payment.payment_type {
                PaymentType::Refund => -payment.amount_paise,
                _ => payment.amount_paise,
            })
            .sum::<i64>();
        let expenses_paise = expenses.iter().map(|expense| expense.amount_paise).sum::<i64>();
        let profit_paise = trip.total_amount_paise - expenses_paise;
        let margin_percent = if trip.total_amount_paise == 0 {
            0.0
        } else {
            profit_paise as f64 / trip.total_amount_paise as f64 * 100.0
        };

        Self {
            grand_total_paise: trip.grand_total_paise,
            received_paise,
            balance_due_paise: trip.grand_total_paise - received_paise,
            expenses_paise,
            profit_paise,
            margin_percent,
        }
    }
}
