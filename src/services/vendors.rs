use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::vendor::{NewVendor, UpdateVendor, Vendor, VendorCategory, VendorListQuery};
use crate::forms::parse_optional_variant;
use crate::forms::vendors::VendorForm;
use crate::repository::{VendorReader, VendorWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the vendors list.
#[derive(Debug, Default, Deserialize)]
pub struct VendorsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Any value also lists deactivated vendors.
    pub show_inactive: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the vendors list.
pub struct VendorsPageData {
    pub vendors: Paginated<Vendor>,
    pub search: Option<String>,
    pub category: Option<VendorCategory>,
    pub show_inactive: bool,
}

pub fn load_vendors_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: VendorsQuery,
) -> ServiceResult<VendorsPageData>
where
    R: VendorReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category: Option<VendorCategory> = parse_optional_variant(query.category.as_deref())
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let show_inactive = query.show_inactive.is_some();
    let search = query
        .search
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let page = query.page.unwrap_or(1);
    let mut list_query =
        VendorListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(value) = search.as_ref() {
        list_query = list_query.search(value);
    }
    if let Some(category) = category {
        list_query = list_query.category(category);
    }
    if show_inactive {
        list_query = list_query.include_inactive();
    }

    let (total, vendors) = repo.list_vendors(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let vendors = Paginated::new(vendors, page, total_pages);

    Ok(VendorsPageData {
        vendors,
        search,
        category,
        show_inactive,
    })
}

/// Loads a vendor with its price lists.
pub fn load_vendor<R>(repo: &R, user: &AuthenticatedUser, vendor_id: i32) -> ServiceResult<Vendor>
where
    R: VendorReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_vendor_by_id(vendor_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_vendor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: VendorForm,
) -> ServiceResult<Vendor>
where
    R: VendorWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let details = form
        .into_vendor_details()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_vendor(&NewVendor::new(user.hub_id, details))
        .map_err(ServiceError::from)
}

/// Replaces a vendor and its price lists.
pub fn update_vendor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    vendor_id: i32,
    form: VendorForm,
) -> ServiceResult<Vendor>
where
    R: VendorWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let details = form
        .into_vendor_details()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updates = UpdateVendor {
        details,
        updated_at: chrono::Local::now().naive_utc(),
    };

    repo.update_vendor(vendor_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

pub fn remove_vendor<R>(repo: &R, user: &AuthenticatedUser, vendor_id: i32) -> ServiceResult<()>
where
    R: VendorWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_vendor(vendor_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::RepositoryError;

    use crate::forms::vendors::PriceListForm;
    use crate::repository::mock::MockVendorRepository;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
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

    fn sample_vendor(id: i32, hub_id: i32, name: &str) -> Vendor {
        Vendor {
            id,
            hub_id,
            name: name.to_string(),
            category: VendorCategory::Hotel,
            contact_person: None,
            phone: None,
            email: None,
            location: Some("Gulmarg".to_string()),
            address: None,
            star_rating: Some(4),
            notes: None,
            is_active: true,
            price_lists: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn hotel_form() -> VendorForm {
        VendorForm {
            name: "Snow Valley Resort".to_string(),
            category: "hotel".to_string(),
            is_active: Some("on".to_string()),
            price_lists: vec![PriceListForm {
                room_category: "Deluxe".to_string(),
                cp_rate: Some("4500".to_string()),
                ..PriceListForm::default()
            }],
            ..VendorForm::default()
        }
    }

    #[test]
    fn load_vendors_page_requires_role() {
        let repo = MockVendorRepository::new();
        let user = user_with_roles(&[]);

        let result = load_vendors_page(&repo, &user, VendorsQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_vendors_page_filters_category_and_inactive() {
        let mut repo = MockVendorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let query = VendorsQuery {
            category: Some("hotel".to_string()),
            show_inactive: Some("1".to_string()),
            ..VendorsQuery::default()
        };

        repo.expect_list_vendors()
            .times(1)
            .withf(|query| {
                query.hub_id == 9
                    && query.category == Some(VendorCategory::Hotel)
                    && query.include_inactive
            })
            .returning(|_| Ok((1, vec![sample_vendor(1, 9, "Snow Valley Resort")])));

        let data = load_vendors_page(&repo, &user, query).expect("expected success");

        assert!(data.show_inactive);
        assert_eq!(data.category, Some(VendorCategory::Hotel));
    }

    #[test]
    fn create_vendor_passes_price_lists() {
        let mut repo = MockVendorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_create_vendor()
            .times(1)
            .withf(|new_vendor| {
                assert_eq!(new_vendor.hub_id, 9);
                assert_eq!(new_vendor.details.price_lists.len(), 1);
                assert_eq!(new_vendor.details.price_lists[0].cp_rate_paise, Some(4_500_00));
                true
            })
            .returning(|new_vendor| {
                Ok(sample_vendor(4, new_vendor.hub_id, &new_vendor.details.name))
            });

        let vendor = create_vendor(&repo, &user, hotel_form()).expect("expected success");

        assert_eq!(vendor.id, 4);
    }

    #[test]
    fn update_vendor_rejects_price_lists_on_transport() {
        let repo = MockVendorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let mut form = hotel_form();
        form.category = "transport".to_string();

        let result = update_vendor(&repo, &user, 4, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn remove_vendor_bubbles_not_found() {
        let mut repo = MockVendorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_delete_vendor()
            .times(1)
            .withf(|id, hub_id| *id == 4 && *hub_id == 9)
            .return_once(|_, _| Err(RepositoryError::NotFound));

        let result = remove_vendor(&repo, &user, 4);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
