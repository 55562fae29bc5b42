use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::vendor::{
        HotelPriceList as DomainHotelPriceList, NewVendor as DomainNewVendor,
        UpdateVendor as DomainUpdateVendor, Vendor as DomainVendor, VendorListQuery,
    },
    models::vendor::{
        HotelPriceList as DbHotelPriceList, NewHotelPriceList as DbNewHotelPriceList,
        NewVendor as DbNewVendor, UpdateVendor as DbUpdateVendor, Vendor as DbVendor,
    },
    repository::{DieselRepository, VendorReader, VendorWriter, page_bounds},
};

impl VendorReader for DieselRepository {
    fn get_vendor_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainVendor>> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;
        let vendor = vendors::table
            .filter(vendors::id.eq(id))
            .filter(vendors::hub_id.eq(hub_id))
            .first::<DbVendor>(&mut conn)
            .optional()?;

        let Some(vendor) = vendor else {
            return Ok(None);
        };

        let mut price_lists = load_price_lists(&mut conn, &[vendor.id])?;
        let rows = price_lists.remove(&vendor.id).unwrap_or_default();
        Ok(Some(vendor.into_domain(rows)))
    }

    fn list_vendors(&self, query: VendorListQuery) -> RepositoryResult<(usize, Vec<DomainVendor>)> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;

        let category_filter = query.category.map(|category| category.as_str());
        let search_pattern = query.search.as_ref().map(|term| format!("%{}%", term));

        let mut count_query = vendors::table
            .filter(vendors::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            count_query = count_query.filter(vendors::is_active.eq(true));
        }

        if let Some(category) = category_filter {
            count_query = count_query.filter(vendors::category.eq(category));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                vendors::name
                    .like(pattern.clone())
                    .or(vendors::location.like(pattern.clone()))
                    .or(vendors::contact_person.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = vendors::table
            .filter(vendors::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(vendors::is_active.eq(true));
        }

        if let Some(category) = category_filter {
            items = items.filter(vendors::category.eq(category));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                vendors::name
                    .like(pattern.clone())
                    .or(vendors::location.like(pattern.clone()))
                    .or(vendors::contact_person.like(pattern.clone())),
            );
        }

        items = items.order((vendors::is_active.desc(), vendors::name.asc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination.page, pagination.per_page);
            items = items.offset(offset).limit(limit);
        }

        let db_vendors = items.load::<DbVendor>(&mut conn)?;
        if db_vendors.is_empty() {
            return Ok((total, Vec::new()));
        }

        let vendor_ids: Vec<i32> = db_vendors.iter().map(|vendor| vendor.id).collect();
        let mut price_lists = load_price_lists(&mut conn, &vendor_ids)?;

        let vendors = db_vendors
            .into_iter()
            .map(|vendor| {
                let rows = price_lists.remove(&vendor.id).unwrap_or_default();
                vendor.into_domain(rows)
            })
            .collect();

        Ok((total, vendors))
    }
}

impl VendorWriter for DieselRepository {
    fn create_vendor(&self, new_vendor: &DomainNewVendor) -> RepositoryResult<DomainVendor> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;

        conn.transaction::<DomainVendor, RepositoryError, _>(|conn| {
            let db_new = DbNewVendor::from_details(
                new_vendor.hub_id,
                &new_vendor.details,
                new_vendor.updated_at,
            );

            let created = diesel::insert_into(vendors::table)
                .values(&db_new)
                .get_result::<DbVendor>(conn)?;

            let vendor_id = created.id;
            insert_price_lists(conn, vendor_id, &new_vendor.details.price_lists)?;

            let mut price_lists = load_price_lists(conn, &[vendor_id])?;
            let rows = price_lists.remove(&vendor_id).unwrap_or_default();
            Ok(created.into_domain(rows))
        })
    }

    fn update_vendor(
        &self,
        vendor_id: i32,
        hub_id: i32,
        updates: &DomainUpdateVendor,
    ) -> RepositoryResult<DomainVendor> {
        use crate::schema::{hotel_price_lists, vendors};

        let mut conn = self.conn()?;

        conn.transaction::<DomainVendor, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateVendor::from_details(&updates.details, updates.updated_at);

            let target = vendors::table
                .filter(vendors::id.eq(vendor_id))
                .filter(vendors::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbVendor>(conn)?;

            diesel::delete(
                hotel_price_lists::table.filter(hotel_price_lists::vendor_id.eq(vendor_id)),
            )
            .execute(conn)?;
            insert_price_lists(conn, vendor_id, &updates.details.price_lists)?;

            let mut price_lists = load_price_lists(conn, &[vendor_id])?;
            let rows = price_lists.remove(&vendor_id).unwrap_or_default();
            Ok(updated.into_domain(rows))
        })
    }

    fn delete_vendor(&self, vendor_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{expenses, hotel_price_lists, vendors};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let exists = vendors::table
                .filter(vendors::id.eq(vendor_id))
                .filter(vendors::hub_id.eq(hub_id))
                .select(vendors::id)
                .first::<i32>(conn)
                .optional()?;

            if exists.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(
                hotel_price_lists::table.filter(hotel_price_lists::vendor_id.eq(vendor_id)),
            )
            .execute(conn)?;

            diesel::update(expenses::table.filter(expenses::vendor_id.eq(vendor_id)))
                .set(expenses::vendor_id.eq(None::<i32>))
                .execute(conn)?;

            diesel::delete(vendors::table.filter(vendors::id.eq(vendor_id))).execute(conn)?;

            Ok(())
        })
    }
}

fn insert_price_lists(
    conn: &mut SqliteConnection,
    vendor_id: i32,
    price_lists: &[DomainHotelPriceList],
) -> RepositoryResult<()> {
    use crate::schema::hotel_price_lists;

    if price_lists.is_empty() {
        return Ok(());
    }

    let payload: Vec<DbNewHotelPriceList> = price_lists
        .iter()
        .map(|row| DbNewHotelPriceList::from_domain(vendor_id, row))
        .collect();

    diesel::insert_into(hotel_price_lists::table)
        .values(&payload)
        .execute(conn)?;

    Ok(())
}

fn load_price_lists(
    conn: &mut SqliteConnection,
    vendor_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbHotelPriceList>>> {
    use crate::schema::hotel_price_lists;

    if vendor_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = hotel_price_lists::table
        .filter(hotel_price_lists::vendor_id.eq_any(vendor_ids))
        .order(hotel_price_lists::id.asc())
        .load::<DbHotelPriceList>(conn)?;

    let mut map: HashMap<i32, Vec<DbHotelPriceList>> = HashMap::new();
    for row in rows {
        map.entry(row.vendor_id).or_default().push(row);
    }

    Ok(map)
}
