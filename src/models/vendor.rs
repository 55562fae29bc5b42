use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::vendor::{
    HotelPriceList as DomainHotelPriceList, Vendor as DomainVendor, VendorDetails,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vendors)]
pub struct Vendor {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub category: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub star_rating: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::hotel_price_lists)]
#[diesel(belongs_to(Vendor, foreign_key = vendor_id))]
pub struct HotelPriceList {
    pub id: i32,
    pub vendor_id: i32,
    pub room_category: String,
    pub sharing: String,
    pub tier: String,
    pub season: Option<String>,
    pub ep_rate_paise: Option<i64>,
    pub cp_rate_paise: Option<i64>,
    pub map_rate_paise: Option<i64>,
    pub ap_rate_paise: Option<i64>,
    pub child_with_bed_paise: Option<i64>,
    pub child_without_bed_paise: Option<i64>,
    pub extra_bed_paise: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vendors)]
pub struct NewVendor<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub category: &'a str,
    pub contact_person: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub location: Option<&'a str>,
    pub address: Option<&'a str>,
    pub star_rating: Option<i32>,
    pub notes: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vendors)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateVendor<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub contact_person: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub location: Option<&'a str>,
    pub address: Option<&'a str>,
    pub star_rating: Option<i32>,
    pub notes: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::hotel_price_lists)]
pub struct NewHotelPriceList<'a> {
    pub vendor_id: i32,
    pub room_category: &'a str,
    pub sharing: &'a str,
    pub tier: &'a str,
    pub season: Option<&'a str>,
    pub ep_rate_paise: Option<i64>,
    pub cp_rate_paise: Option<i64>,
    pub map_rate_paise: Option<i64>,
    pub ap_rate_paise: Option<i64>,
    pub child_with_bed_paise: Option<i64>,
    pub child_without_bed_paise: Option<i64>,
    pub extra_bed_paise: Option<i64>,
}

impl Vendor {
    pub fn into_domain(self, price_lists: Vec<HotelPriceList>) -> DomainVendor {
        DomainVendor {
            id: self.id,
            hub_id: self.hub_id,
            name: self.name,
            category: self.category.parse().unwrap_or_default(),
            contact_person: self.contact_person,
            phone: self.phone,
            email: self.email,
            location: self.location,
            address: self.address,
            star_rating: self.star_rating,
            notes: self.notes,
            is_active: self.is_active,
            price_lists: price_lists.into_iter().map(Into::into).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<HotelPriceList> for DomainHotelPriceList {
    fn from(value: HotelPriceList) -> Self {
        Self {
            room_category: value.room_category,
            sharing: value.sharing.parse().unwrap_or_default(),
            tier: value.tier.parse().unwrap_or_default(),
            season: value.season,
            ep_rate_paise: value.ep_rate_paise,
            cp_rate_paise: value.cp_rate_paise,
            map_rate_paise: value.map_rate_paise,
            ap_rate_paise: value.ap_rate_paise,
            child_with_bed_paise: value.child_with_bed_paise,
            child_without_bed_paise: value.child_without_bed_paise,
            extra_bed_paise: value.extra_bed_paise,
        }
    }
}

impl<'a> NewVendor<'a> {
    pub fn from_details(
        hub_id: i32,
        details: &'a VendorDetails,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            hub_id,
            name: details.name.as_str(),
            category: details.category.as_str(),
            contact_person: details.contact_person.as_deref(),
            phone: details.phone.as_deref(),
            email: details.email.as_deref(),
            location: details.location.as_deref(),
            address: details.address.as_deref(),
            star_rating: details.star_rating,
            notes: details.notes.as_deref(),
            is_active: details.is_active,
            updated_at,
        }
    }
}

impl<'a> UpdateVendor<'a> {
    pub fn from_details(details: &'a VendorDetails, updated_at: NaiveDateTime) -> Self {
        Self {
            name: details.name.as_str(),
            category: details.category.as_str(),
            contact_person: details.contact_person.as_deref(),
            phone: details.phone.as_deref(),
            email: details.email.as_deref(),
            location: details.location.as_deref(),
            address: details.address.as_deref(),
            star_rating: details.star_rating,
            notes: details.notes.as_deref(),
            is_active: details.is_active,
            updated_at,
        }
    }
}

impl<'a> NewHotelPriceList<'a> {
    pub fn from_domain(vendor_id: i32, value: &'a DomainHotelPriceList) -> Self {
        Self {
            vendor_id,
            room_category: value.room_category.as_str(),
            sharing: value.sharing.as_str(),
            tier: value.tier.as_str(),
            season: value.season.as_deref(),
            ep_rate_paise: value.ep_rate_paise,
            cp_rate_paise: value.cp_rate_paise,
            map_rate_paise: value.map_rate_paise,
            ap_rate_paise: value.ap_rate_paise,
            child_with_bed_paise: value.child_with_bed_paise,
            child_without_bed_paise: value.child_without_bed_paise,
            extra_bed_paise: value.extra_bed_paise,
        }
    }
}
