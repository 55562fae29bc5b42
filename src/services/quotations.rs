use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::lead::Lead;
use crate::domain::quotation::{Quotation, QuotationListQuery, QuotationStatus};
use crate::forms::parse_optional_variant;
use crate::forms::quotations::{AddQuotationForm, EditQuotationForm};
use crate::repository::{LeadReader, QuotationReader, QuotationWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the quotations list.
#[derive(Debug, Default, Deserialize)]
pub struct QuotationsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the quotations list.
pub struct QuotationsPageData {
    pub quotations: Paginated<Quotation>,
    pub search: Option<String>,
    pub status: Option<QuotationStatus>,
}

pub fn load_quotations_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: QuotationsQuery,
) -> ServiceResult<QuotationsPageData>
where
    R: QuotationReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let status: Option<QuotationStatus> = parse_optional_variant(query.status.as_deref())
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let search = query
        .search
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let page = query.page.unwrap_or(1);
    let mut list_query =
        QuotationListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(value) = search.as_ref() {
        list_query = list_query.search(value);
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, quotations) = repo
        .list_quotations(list_query)
        .map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let quotations = Paginated::new(quotations, page, total_pages);

    Ok(QuotationsPageData {
        quotations,
        search,
        status,
    })
}

/// Loads a quotation of the user's hub.
pub fn load_quotation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    quotation_id: i32,
) -> ServiceResult<Quotation>
where
    R: QuotationReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_quotation_by_id(quotation_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Lead used to prefill the "new quotation" form, if one was requested.
pub fn load_quotation_prefill<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: Option<i32>,
) -> ServiceResult<Option<Lead>>
where
    R: LeadReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let Some(lead_id) = lead_id else {
        return Ok(None);
    };

    repo.get_lead_by_id(lead_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
        .map(Some)
}

/// Prices and stores a quotation. A linked lead must belong to the user's hub.
pub fn create_quotation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddQuotationForm,
) -> ServiceResult<Quotation>
where
    R: LeadReader + QuotationWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_quotation = form
        .into_new_quotation(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(lead_id) = new_quotation.lead_id {
        repo.get_lead_by_id(lead_id, user.hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form("lead not found".to_string()))?;
    }

    repo.create_quotation(&new_quotation)
        .map_err(ServiceError::from)
}

/// Changes the status, validity and notes of a quotation.
pub fn update_quotation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    quotation_id: i32,
    form: EditQuotationForm,
) -> ServiceResult<Quotation>
where
    R: QuotationWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_quotation()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_quotation(quotation_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

pub fn remove_quotation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    quotation_id: i32,
) -> ServiceResult<()>
where
    R: QuotationWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_quotation(quotation_id, user.hub_id)
        .map_err(ServiceError::from)
}
