use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Kind of service a vendor provides.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VendorCategory {
    #[default]
    Hotel,
    Transport,
    Guide,
    Activity,
    Restaurant,
    Other,
}

text_enum!(VendorCategory, "vendor category", {
    Hotel => "hotel",
    Transport => "transport",
    Guide => "guide",
    Activity => "activity",
    Restaurant => "restaurant",
    Other => "other",
});

/// Meal plan codes used by Indian hotels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealPlan {
    /// European plan: room only.
    Ep,
    /// Continental plan: with breakfast.
    Cp,
    /// Modified American plan: breakfast and dinner.
    Map,
    /// American plan: all meals.
    Ap,
}

text_enum!(MealPlan, "meal plan", {
    Ep => "ep",
    Cp => "cp",
    Map => "map",
    Ap => "ap",
});

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SharingType {
    Single,
    #[default]
    Double,
    Triple,
    Quad,
}

text_enum!(SharingType, "sharing type", {
    Single => "single",
    Double => "double",
    Triple => "triple",
    Quad => "quad",
});

/// Pricing tier of a price list.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Retail pricing.
    #[default]
    Regular,
    /// Agent-to-agent pricing.
    B2b,
}

text_enum!(PriceTier, "price tier", {
    Regular => "regular",
    B2b => "b2b",
});

/// One row of a hotel's tariff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelPriceList {
    pub room_category: String,
    pub sharing: SharingType,
    pub tier: PriceTier,
    /// Optional season label such as `peak` or `Dec-Jan`.
    pub season: Option<String>,
    pub ep_rate_paise: Option<i64>,
    pub cp_rate_paise: Option<i64>,
    pub map_rate_paise: Option<i64>,
    pub ap_rate_paise: Option<i64>,
    pub child_with_bed_paise: Option<i64>,
    pub child_without_bed_paise: Option<i64>,
    pub extra_bed_paise: Option<i64>,
}

impl HotelPriceList {
    /// Per-night rate for the given meal plan, if the hotel quoted one.
    pub fn rate_for(&self, plan: MealPlan) -> Option<i64> {
        match plan {
            MealPlan::Ep => self.ep_rate_paise,
            MealPlan::Cp => self.cp_rate_paise,
            MealPlan::Map => self.map_rate_paise,
            MealPlan::Ap => self.ap_rate_paise,
        }
    }
}

/// Third-party service provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub category: VendorCategory,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// City or region the vendor operates in.
    pub location: Option<String>,
    pub address: Option<String>,
    /// Star rating, hotels only.
    pub star_rating: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
    /// Tariff rows, hotels only.
    pub price_lists: Vec<HotelPriceList>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Vendor fields shared by inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorDetails {
    pub name: String,
    pub category: VendorCategory,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub star_rating: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub price_lists: Vec<HotelPriceList>,
}

impl VendorDetails {
    pub fn new(name: impl Into<String>, category: VendorCategory) -> Self {
        Self {
            name: name.into(),
            category,
            contact_person: None,
            phone: None,
            email: None,
            location: None,
            address: None,
            star_rating: None,
            notes: None,
            is_active: true,
            price_lists: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_price_lists(mut self, price_lists: Vec<HotelPriceList>) -> Self {
        self.price_lists = price_lists;
        self
    }
}

/// Payload required to insert a vendor together with its price lists.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVendor {
    pub hub_id: i32,
    pub details: VendorDetails,
    pub updated_at: NaiveDateTime,
}

impl NewVendor {
    pub fn new(hub_id: i32, details: VendorDetails) -> Self {
        Self {
            hub_id,
            details,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Full replacement of a vendor. Price lists are replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateVendor {
    pub details: VendorDetails,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list vendors for a hub.
#[derive(Debug, Clone)]
pub struct VendorListQuery {
    pub hub_id: i32,
    pub category: Option<VendorCategory>,
    /// Optional search over name, location and contact person.
    pub search: Option<String>,
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl VendorListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            category: None,
            search: None,
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn category(mut self, category: VendorCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
