use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::lead::LeadStatus,
    domain::trip::{
        NewTrip as DomainNewTrip, RoomBooking as DomainRoomBooking, Trip as DomainTrip,
        TripListQuery, UpdateTrip as DomainUpdateTrip,
    },
    models::trip::{
        NewRoomBooking as DbNewRoomBooking, NewTrip as DbNewTrip, RoomBooking as DbRoomBooking,
        Trip as DbTrip, UpdateTrip as DbUpdateTrip,
    },
    repository::{DieselRepository, TripReader, TripWriter, page_bounds},
};

impl TripReader for DieselRepository {
    fn get_trip_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainTrip>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let trip = trips::table
            .filter(trips::id.eq(id))
            .filter(trips::hub_id.eq(hub_id))
            .first::<DbTrip>(&mut conn)
            .optional()?;

        let Some(trip) = trip else {
            return Ok(None);
        };

        let bookings = load_room_bookings(&mut conn, trip.id)?;
        Ok(Some(trip.into_domain(bookings)))
    }

    fn get_trip_by_lead_id(
        &self,
        lead_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainTrip>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let trip = trips::table
            .filter(trips::lead_id.eq(Some(lead_id)))
            .filter(trips::hub_id.eq(hub_id))
            .first::<DbTrip>(&mut conn)
            .optional()?;

        let Some(trip) = trip else {
            return Ok(None);
        };

        let bookings = load_room_bookings(&mut conn, trip.id)?;
        Ok(Some(trip.into_domain(bookings)))
    }

    fn list_trips(&self, query: TripListQuery) -> RepositoryResult<(usize, Vec<DomainTrip>)> {
        use crate::schema::{room_bookings, trips};

        let mut conn = self.conn()?;

        let TripListQuery {
            hub_id,
            status,
            search,
            starting_from,
            pagination,
        } = query;

        let status_filter = status.map(|status| status.as_str());
        let search_pattern = search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = trips::table
            .filter(trips::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = status_filter {
            count_query = count_query.filter(trips::status.eq(status));
        }

        if let Some(date) = starting_from {
            count_query = count_query.filter(trips::start_date.ge(date));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                trips::customer_name
                    .like(pattern.clone())
                    .or(trips::destination.like(pattern.clone()))
                    .or(trips::phone.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = trips::table
            .filter(trips::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = status_filter {
            items = items.filter(trips::status.eq(status));
        }

        if let Some(date) = starting_from {
            items = items.filter(trips::start_date.ge(date));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                trips::customer_name
                    .like(pattern.clone())
                    .or(trips::destination.like(pattern.clone()))
                    .or(trips::phone.like(pattern.clone())),
            );
        }

        items = items.order((trips::start_date.desc(), trips::id.desc()));

        if let Some(pagination) = pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_trips = items.load::<DbTrip>(&mut conn)?;
        if db_trips.is_empty() {
            return Ok((total, Vec::new()));
        }

        let trip_ids: Vec<i32> = db_trips.iter().map(|trip| trip.id).collect();

        let mut bookings_by_trip: HashMap<i32, Vec<DbRoomBooking>> = HashMap::new();
        let rows = room_bookings::table
            .filter(room_bookings::trip_id.eq_any(&trip_ids))
            .order((room_bookings::check_in.asc(), room_bookings::id.asc()))
            .load::<DbRoomBooking>(&mut conn)?;

        for booking in rows {
            bookings_by_trip
                .entry(booking.trip_id)
                .or_default()
                .push(booking);
        }

        let trips = db_trips
            .into_iter()
            .map(|trip| {
                let bookings = bookings_by_trip.remove(&trip.id).unwrap_or_default();
                trip.into_domain(bookings)
            })
            .collect();

        Ok((total, trips))
    }
}

impl TripWriter for DieselRepository {
    fn create_trip(&self, new_trip: &DomainNewTrip) -> RepositoryResult<DomainTrip> {
        use crate::schema::{leads, trips};

        let mut conn = self.conn()?;

        conn.transaction::<DomainTrip, RepositoryError, _>(|conn| {
            let db_new = DbNewTrip::from(new_trip);

            let created = diesel::insert_into(trips::table)
                .values(&db_new)
                .get_result::<DbTrip>(conn)?;

            let trip_id = created.id;
            insert_room_bookings(conn, trip_id, &new_trip.room_bookings)?;

            if let Some(lead_id) = new_trip.lead_id {
                let target = leads::table
                    .filter(leads::id.eq(lead_id))
                    .filter(leads::hub_id.eq(new_trip.hub_id));

                let converted = diesel::update(target)
                    .set((
                        leads::status.eq(LeadStatus::Converted.as_str()),
                        leads::updated_at.eq(new_trip.updated_at),
                    ))
                    .execute(conn)?;

                if converted == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }

            let bookings = load_room_bookings(conn, trip_id)?;
            Ok(created.into_domain(bookings))
        })
    }

    fn update_trip(
        &self,
        trip_id: i32,
        hub_id: i32,
        updates: &DomainUpdateTrip,
    ) -> RepositoryResult<DomainTrip> {
        use crate::schema::{room_bookings, trips};

        let mut conn = self.conn()?;

        conn.transaction::<DomainTrip, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateTrip::from(updates);

            let target = trips::table
                .filter(trips::id.eq(trip_id))
                .filter(trips::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbTrip>(conn)?;

            diesel::delete(room_bookings::table.filter(room_bookings::trip_id.eq(trip_id)))
                .execute(conn)?;
            insert_room_bookings(conn, trip_id, &updates.room_bookings)?;

            let bookings = load_room_bookings(conn, trip_id)?;
            Ok(updated.into_domain(bookings))
        })
    }

    fn delete_trip(&self, trip_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{expenses, payments, room_bookings, trips};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let exists = trips::table
                .filter(trips::id.eq(trip_id))
                .filter(trips::hub_id.eq(hub_id))
                .select(trips::id)
                .first::<i32>(conn)
                .optional()?;

            if exists.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(room_bookings::table.filter(room_bookings::trip_id.eq(trip_id)))
                .execute(conn)?;

            diesel::update(payments::table.filter(payments::trip_id.eq(trip_id)))
                .set(payments::trip_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::update(expenses::table.filter(expenses::trip_id.eq(trip_id)))
                .set(expenses::trip_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::delete(trips::table.filter(trips::id.eq(trip_id))).execute(conn)?;

            Ok(())
        })
    }
}

fn insert_room_bookings(
    conn: &mut SqliteConnection,
    trip_id: i32,
    bookings: &[DomainRoomBooking],
) -> RepositoryResult<()> {
    use crate::schema::room_bookings;

    if bookings.is_empty() {
        return Ok(());
    }

    let payload: Vec<DbNewRoomBooking> = bookings
        .iter()
        .map(|booking| DbNewRoomBooking::from_domain(trip_id, booking))
        .collect();

    diesel::insert_into(room_bookings::table)
        .values(&payload)
        .execute(conn)?;

    Ok(())
}

fn load_room_bookings(
    conn: &mut SqliteConnection,
    trip_id: i32,
) -> RepositoryResult<Vec<DbRoomBooking>> {
    use crate::schema::room_bookings;

    let rows = room_bookings::table
        .filter(room_bookings::trip_id.eq(trip_id))
        .order((room_bookings::check_in.asc(), room_bookings::id.asc()))
        .load::<DbRoomBooking>(conn)?;

    Ok(rows)
}
