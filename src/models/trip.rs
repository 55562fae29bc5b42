use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::trip::{
    NewTrip as DomainNewTrip, RoomBooking as DomainRoomBooking, Trip as DomainTrip,
    UpdateTrip as DomainUpdateTrip,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::trips)]
pub struct Trip {
    pub id: i32,
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
    pub discount_paise: i64,
    pub total_amount_paise: i64,
    pub gst_amount_paise: i64,
    pub grand_total_paise: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::room_bookings)]
#[diesel(belongs_to(Trip, foreign_key = trip_id))]
pub struct RoomBooking {
    pub id: i32,
    pub trip_id: i32,
    pub place: String,
    pub property_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub room_type: Option<String>,
    pub meal_plan: Option<String>,
    pub confirmed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trips)]
pub struct NewTrip<'a> {
    pub hub_id: i32,
    pub lead_id: Option<i32>,
    pub customer_name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub destination: &'a str,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub discount_paise: i64,
    pub total_amount_paise: i64,
    pub gst_amount_paise: i64,
    pub grand_total_paise: i64,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::room_bookings)]
pub struct NewRoomBooking<'a> {
    pub trip_id: i32,
    pub place: &'a str,
    pub property_name: &'a str,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub room_type: Option<&'a str>,
    pub meal_plan: Option<&'static str>,
    pub confirmed: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::trips)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTrip<'a> {
    pub customer_name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub destination: &'a str,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub pax: i32,
    pub rate_per_head_paise: i64,
    pub discount_paise: i64,
    pub total_amount_paise: i64,
    pub gst_amount_paise: i64,
    pub grand_total_paise: i64,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl Trip {
    pub fn into_domain(self, room_bookings: Vec<RoomBooking>) -> DomainTrip {
        DomainTrip {
            id: self.id,
            hub_id: self.hub_id,
            lead_id: self.lead_id,
            customer_name: self.customer_name,
            phone: self.phone,
            email: self.email,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            pax: self.pax,
            rate_per_head_paise: self.rate_per_head_paise,
            discount_paise: self.discount_paise,
            total_amount_paise: self.total_amount_paise,
            gst_amount_paise: self.gst_amount_paise,
            grand_total_paise: self.grand_total_paise,
            status: self.status.parse().unwrap_or_default(),
            notes: self.notes,
            room_bookings: room_bookings
                .into_iter()
                .map(RoomBooking::into_domain)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl RoomBooking {
    pub fn into_domain(self) -> DomainRoomBooking {
        DomainRoomBooking {
            place: self.place,
            property_name: self.property_name,
            check_in: self.check_in,
            check_out: self.check_out,
            rooms: self.rooms,
            room_type: self.room_type,
            meal_plan: self.meal_plan.and_then(|plan| plan.parse().ok()),
            confirmed: self.confirmed,
        }
    }
}

impl From<(Trip, Vec<RoomBooking>)> for DomainTrip {
    fn from(value: (Trip, Vec<RoomBooking>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewTrip> for NewTrip<'a> {
    fn from(value: &'a DomainNewTrip) -> Self {
        Self {
            hub_id: value.hub_id,
            lead_id: value.lead_id,
            customer_name: value.customer_name.as_str(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
            destination: value.destination.as_str(),
            start_date: value.start_date,
            end_date: value.end_date,
            pax: value.pax,
            rate_per_head_paise: value.rate_per_head_paise,
            discount_paise: value.price.discount_paise,
            total_amount_paise: value.price.total_amount_paise,
            gst_amount_paise: value.price.gst_amount_paise,
            grand_total_paise: value.price.grand_total_paise,
            status: value.status.as_str(),
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewRoomBooking<'a> {
    pub fn from_domain(trip_id: i32, value: &'a DomainRoomBooking) -> Self {
        Self {
            trip_id,
            place: value.place.as_str(),
            property_name: value.property_name.as_str(),
            check_in: value.check_in,
            check_out: value.check_out,
            rooms: value.rooms,
            room_type: value.room_type.as_deref(),
            meal_plan: value.meal_plan.map(|plan| plan.as_str()),
            confirmed: value.confirmed,
        }
    }
}

impl<'a> From<&'a DomainUpdateTrip> for UpdateTrip<'a> {
    fn from(value: &'a DomainUpdateTrip) -> Self {
        Self {
            customer_name: value.customer_name.as_str(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
            destination: value.destination.as_str(),
            start_date: value.start_date,
            end_date: value.end_date,
            pax: value.pax,
            rate_per_head_paise: value.rate_per_head_paise,
            discount_paise: value.price.discount_paise,
            total_amount_paise: value.price.total_amount_paise,
            gst_amount_paise: value.price.gst_amount_paise,
            grand_total_paise: value.price.grand_total_paise,
            status: value.status.as_str(),
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
