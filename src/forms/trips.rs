use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::{PriceBreakdown, PricingError, TRIP_GST_PERCENT};
use crate::domain::trip::{NewTrip, RoomBooking, TripStatus, UpdateTrip};
use crate::forms::{
    FieldError, checkbox, optional_notes, optional_text, parse_date, parse_optional_date,
    parse_optional_i32, parse_optional_rupees, parse_optional_variant, parse_rupees,
    required_text,
};

/// Result type returned by the trip form helpers.
pub type TripFormResult<T> = Result<T, TripFormError>;

/// Errors that can occur while processing trip forms.
#[derive(Debug, Error)]
pub enum TripFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("pax must be at least 1")]
    InvalidPax,
    #[error("discount cannot exceed the package total")]
    DiscountTooLarge,
    #[error("the package amount is too large")]
    AmountTooLarge,
    #[error("the trip cannot end before it starts")]
    EndsBeforeStart,
    #[error("room booking {row}: check-out is before check-in")]
    CheckOutBeforeCheckIn { row: usize },
    #[error("room booking {row}: at least one room is required")]
    InvalidRooms { row: usize },
    #[error("room booking {row}: {source}")]
    Room { row: usize, source: FieldError },
}

impl From<PricingError> for TripFormError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::DiscountExceedsSubtotal => Self::DiscountTooLarge,
            PricingError::AmountTooLarge => Self::AmountTooLarge,
        }
    }
}

/// One room booking row of the trip form, submitted as `rooms[i][field]`.
#[derive(Debug, Default, Deserialize)]
pub struct RoomBookingForm {
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    pub rooms: Option<String>,
    pub room_type: Option<String>,
    pub meal_plan: Option<String>,
    pub confirmed: Option<String>,
}

impl RoomBookingForm {
    /// Rows left completely blank by the page's "add row" template.
    fn is_blank(&self) -> bool {
        self.place.trim().is_empty()
            && self.property_name.trim().is_empty()
            && self.check_in.trim().is_empty()
            && self.check_out.trim().is_empty()
    }

    fn into_room_booking(self, row: usize) -> TripFormResult<RoomBooking> {
        let room_error = |source| TripFormError::Room { row, source };

        let check_in = parse_date(&self.check_in).map_err(room_error)?;
        let check_out = parse_date(&self.check_out).map_err(room_error)?;
        if check_out < check_in {
            return Err(TripFormError::CheckOutBeforeCheckIn { row });
        }

        let rooms = parse_optional_i32(self.rooms.as_deref(), "rooms")
            .map_err(room_error)?
            .unwrap_or(1);
        if rooms < 1 {
            return Err(TripFormError::InvalidRooms { row });
        }

        Ok(RoomBooking {
            place: required_text(&self.place, "place").map_err(room_error)?,
            property_name: required_text(&self.property_name, "property").map_err(room_error)?,
            check_in,
            check_out,
            rooms,
            room_type: optional_text(self.room_type.as_deref()),
            meal_plan: parse_optional_variant(self.meal_plan.as_deref()).map_err(room_error)?,
            confirmed: checkbox(self.confirmed.as_deref()),
        })
    }
}

/// Payload of the add and edit trip forms, parsed with `serde_qs` because of
/// the nested room bookings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TripForm {
    /// Lead the trip is created from, if any. Ignored on edit.
    pub lead_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub customer_name: String,
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(default, deserialize_with = "pushkind_common::routes::empty_string_as_none")]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub destination: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub pax: String,
    /// Per-head rate in rupees.
    pub rate_per_head: String,
    pub discount: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub rooms: Vec<RoomBookingForm>,
}

struct TripFields {
    customer_name: String,
    phone: Option<String>,
    email: Option<String>,
    destination: String,
    start_date: chrono::NaiveDate,
    end_date: Option<chrono::NaiveDate>,
    pax: i32,
    rate_per_head_paise: i64,
    price: PriceBreakdown,
    status: TripStatus,
    notes: Option<String>,
    room_bookings: Vec<RoomBooking>,
}

impl TripForm {
    /// Lead referenced by the form.
    pub fn lead_id(&self) -> TripFormResult<Option<i32>> {
        Ok(parse_optional_i32(self.lead_id.as_deref(), "lead")?)
    }

    fn into_fields(self) -> TripFormResult<TripFields> {
        self.validate()?;

        let pax = parse_optional_i32(Some(&self.pax), "pax")?
            .ok_or(FieldError::Required { field: "pax" })?;
        if pax < 1 {
            return Err(TripFormError::InvalidPax);
        }

        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_optional_date(self.end_date.as_deref())?;
        if matches!(end_date, Some(end) if end < start_date) {
            return Err(TripFormError::EndsBeforeStart);
        }

        let rate_per_head_paise = parse_rupees(&self.rate_per_head)?;
        let discount_paise = parse_optional_rupees(self.discount.as_deref())?.unwrap_or(0);
        let price = PriceBreakdown::compute(
            rate_per_head_paise,
            pax,
            0,
            discount_paise,
            TRIP_GST_PERCENT,
        )?;

        let mut room_bookings = Vec::with_capacity(self.rooms.len());
        for (index, room) in self.rooms.into_iter().enumerate() {
            if room.is_blank() {
                continue;
            }
            room_bookings.push(room.into_room_booking(index + 1)?);
        }

        Ok(TripFields {
            customer_name: required_text(&self.customer_name, "customer name")?,
            phone: optional_text(self.phone.as_deref()),
            email: optional_text(self.email.as_deref()),
            destination: required_text(&self.destination, "destination")?,
            start_date,
            end_date,
            pax,
            rate_per_head_paise,
            price,
            status: parse_optional_variant(self.status.as_deref())?.unwrap_or_default(),
            notes: optional_notes(self.notes.as_deref()),
            room_bookings,
        })
    }

    /// Validates the payload and prices the trip.
    pub fn into_new_trip(self, hub_id: i32) -> TripFormResult<NewTrip> {
        let lead_id = self.lead_id()?;
        let fields = self.into_fields()?;

        Ok(NewTrip {
            hub_id,
            lead_id,
            customer_name: fields.customer_name,
            phone: fields.phone,
            email: fields.email,
            destination: fields.destination,
            start_date: fields.start_date,
            end_date: fields.end_date,
            pax: fields.pax,
            rate_per_head_paise: fields.rate_per_head_paise,
            price: fields.price,
            status: fields.status,
            notes: fields.notes,
            room_bookings: fields.room_bookings,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }

    /// Validates the payload and reprices the trip.
    pub fn into_update_trip(self) -> TripFormResult<UpdateTrip> {
        let fields = self.into_fields()?;

        Ok(UpdateTrip {
            customer_name: fields.customer_name,
            phone: fields.phone,
            email: fields.email,
            destination: fields.destination,
            start_date: fields.start_date,
            end_date: fields.end_date,
            pax: fields.pax,
            rate_per_head_paise: fields.rate_per_head_paise,
            price: fields.price,
            status: fields.status,
            notes: fields.notes,
            room_bookings: fields.room_bookings,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vendor::MealPlan;

    fn form() -> TripForm {
        TripForm {
            customer_name: "Meera Iyer".into(),
            destination: "Munnar".into(),
            start_date: "2025-06-10".into(),
            end_date: Some("2025-06-13".into()),
            pax: "2".into(),
            rate_per_head: "18,500".into(),
            discount: Some("1000".into()),
            ..TripForm::default()
        }
    }

    fn room() -> RoomBookingForm {
        RoomBookingForm {
            place: "Munnar".into(),
            property_name: "Tea County".into(),
            check_in: "2025-06-10".into(),
            check_out: "2025-06-12".into(),
            rooms: Some("1".into()),
            meal_plan: Some("map".into()),
            confirmed: Some("on".into()),
            ..RoomBookingForm::default()
        }
    }

    #[test]
    fn trip_totals_include_five_percent_gst() {
        let trip = form().into_new_trip(1).expect("valid trip");

        assert_eq!(trip.price.total_amount_paise, 36_000_00);
        assert_eq!(trip.price.gst_amount_paise, 1_800_00);
        assert_eq!(
            trip.price.grand_total_paise,
            trip.price.total_amount_paise + trip.price.gst_amount_paise
        );
        assert_eq!(trip.status, TripStatus::Upcoming);
    }

    #[test]
    fn room_rows_are_parsed_and_blank_rows_skipped() {
        let mut form = form();
        form.lead_id = Some("12".into());
        form.rooms = vec![room(), RoomBookingForm::default()];

        let trip = form.into_new_trip(1).expect("valid trip");

        assert_eq!(trip.lead_id, Some(12));
        assert_eq!(trip.room_bookings.len(), 1);
        let booking = &trip.room_bookings[0];
        assert_eq!(booking.meal_plan, Some(MealPlan::Map));
        assert!(booking.confirmed);
        assert_eq!(booking.nights(), 2);
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let mut form = form();
        let mut bad = room();
        bad.check_out = "2025-06-09".into();
        form.rooms = vec![bad];

        assert!(matches!(
            form.into_update_trip(),
            Err(TripFormError::CheckOutBeforeCheckIn { row: 1 })
        ));
    }

    #[test]
    fn oversized_package_is_not_reported_as_a_discount_problem() {
        let mut form = form();
        form.rate_per_head = "90000000000000000".into();

        assert!(matches!(
            form.into_new_trip(1),
            Err(TripFormError::AmountTooLarge)
        ));
    }

    #[test]
    fn trip_cannot_end_before_it_starts() {
        let mut form = form();
        form.end_date = Some("2025-06-01".into());

        assert!(matches!(
            form.into_new_trip(1),
            Err(TripFormError::EndsBeforeStart)
        ));
    }

    #[test]
    fn nested_rows_deserialize_from_bracket_keys() {
        let body = "customer_name=Meera&destination=Munnar&start_date=2025-06-10&pax=2\
            &rate_per_head=18500&rooms[0][place]=Munnar&rooms[0][property_name]=Tea+County\
            &rooms[0][check_in]=2025-06-10&rooms[0][check_out]=2025-06-12";
        let config = serde_qs::Config::new(5, false);
        let form: TripForm = config.deserialize_str(body).expect("nested form");

        assert_eq!(form.rooms.len(), 1);
        assert_eq!(form.rooms[0].property_name, "Tea County");
    }
}
