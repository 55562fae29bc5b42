use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::follow_up::FollowUp;
use crate::domain::lead::{Lead, LeadListQuery, LeadPriority, LeadStatus};
use crate::domain::quotation::{Quotation, QuotationListQuery};
use crate::domain::trip::Trip;
use crate::forms::leads::{AddFollowUpForm, LeadForm, LeadStatusForm};
use crate::forms::parse_optional_variant;
use crate::repository::{
    FollowUpReader, FollowUpWriter, LeadReader, LeadWriter, QuotationReader, TripReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the leads list.
#[derive(Debug, Default, Deserialize)]
pub struct LeadsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Any value shows leads that were already converted into trips.
    pub show_converted: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the leads list.
pub struct LeadsPageData {
    pub leads: Paginated<Lead>,
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub priority: Option<LeadPriority>,
    pub show_converted: bool,
}

/// Loads one page of leads matching the filters.
pub fn load_leads_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: LeadsQuery,
) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let status: Option<LeadStatus> = parse_optional_variant(query.status.as_deref())
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let priority: Option<LeadPriority> = parse_optional_variant(query.priority.as_deref())
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let show_converted = query.show_converted.is_some();
    let search = query
        .search
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let page = query.page.unwrap_or(1);
    let mut list_query = LeadListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(value) = search.as_ref() {
        list_query = list_query.search(value);
    }
    if let Some(status) = status {
        list_query = list_query.status(status);
    }
    if let Some(priority) = priority {
        list_query = list_query.priority(priority);
    }
    if show_converted {
        list_query = list_query.include_converted();
    }

    let (total, leads) = repo.list_leads(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let leads = Paginated::new(leads, page, total_pages);

    Ok(LeadsPageData {
        leads,
        search,
        status,
        priority,
        show_converted,
    })
}

/// Data required to render a single lead.
pub struct LeadPageData {
    pub lead: Lead,
    pub follow_ups: Vec<FollowUp>,
    pub quotations: Vec<Quotation>,
    /// Trip created from the lead, once converted.
    pub trip: Option<Trip>,
}

/// Loads a lead with its follow-ups, quotations and trip.
pub fn load_lead_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
) -> ServiceResult<LeadPageData>
where
    R: LeadReader + FollowUpReader + QuotationReader + TripReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let lead = repo
        .get_lead_by_id(lead_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let follow_ups = repo
        .list_follow_ups(lead.id, user.hub_id)
        .map_err(ServiceError::from)?;

    let (_, quotations) = repo
        .list_quotations(QuotationListQuery::new(user.hub_id).lead_id(lead.id))
        .map_err(ServiceError::from)?;

    let trip = repo
        .get_trip_by_lead_id(lead.id, user.hub_id)
        .map_err(ServiceError::from)?;

    Ok(LeadPageData {
        lead,
        follow_ups,
        quotations,
        trip,
    })
}

/// Captures a new inquiry for the user's hub.
pub fn create_lead<R>(repo: &R, user: &AuthenticatedUser, form: LeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_lead = form
        .into_new_lead(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_lead(&new_lead).map_err(ServiceError::from)
}

/// Replaces the editable fields of a lead.
pub fn update_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: LeadForm,
) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_lead()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_lead(lead_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

/// Moves a lead to another pipeline state.
pub fn change_lead_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: LeadStatusForm,
) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let status = form
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_lead_status(lead_id, user.hub_id, status)
        .map_err(ServiceError::from)
}

/// Deletes a lead together with its follow-ups.
pub fn remove_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: i32) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_lead(lead_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Schedules a follow-up for a lead of the user's hub.
pub fn add_follow_up<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    form: AddFollowUpForm,
) -> ServiceResult<FollowUp>
where
    R: LeadReader + FollowUpWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_follow_up = form
        .into_new_follow_up(lead_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    // follow-ups carry no hub of their own
    repo.get_lead_by_id(lead_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.create_follow_up(&new_follow_up)
        .map_err(ServiceError::from)
}

/// Marks a follow-up as done now.
pub fn complete_follow_up<R>(
    repo: &R,
    user: &AuthenticatedUser,
    follow_up_id: i32,
) -> ServiceResult<FollowUp>
where
    R: FollowUpWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let completed_at = chrono::Local::now().naive_utc();

    repo.complete_follow_up(follow_up_id, user.hub_id, completed_at)
        .map_err(ServiceError::from)
}

pub fn remove_follow_up<R>(
    repo: &R,
    user: &AuthenticatedUser,
    follow_up_id: i32,
) -> ServiceResult<()>
where
    R: FollowUpWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_follow_up(follow_up_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::RepositoryError;

    use crate::domain::follow_up::FollowUpStatus;
    use crate::repository::mock::MockLeadRepository;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2025, 3, 1) {
            Some(date) => date.and_hms_opt(9, 30, 0).unwrap_or_default(),
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

    fn sample_lead(id: i32, hub_id: i32, name: &str) -> Lead {
        Lead {
            id,
            hub_id,
            customer_name: name.to_string(),
            phone: "+91 98470 12345".to_string(),
            email: None,
            destination: Some("Munnar".to_string()),
            travel_date: None,
            duration: None,
            pax: Some(2),
            budget_paise: None,
            source: None,
            status: LeadStatus::New,
            priority: LeadPriority::Medium,
            assigned_to: None,
            notes: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_follow_up(id: i32, lead_id: i32) -> FollowUp {
        FollowUp {
            id,
            lead_id,
            due_at: fixed_datetime(),
            note: None,
            status: FollowUpStatus::Pending,
            completed_at: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn lead_form(name: &str) -> LeadForm {
        LeadForm {
            customer_name: name.to_string(),
            phone: "98470 12345".to_string(),
            ..LeadForm::default()
        }
    }

    #[test]
    fn load_leads_page_requires_role() {
        let repo = MockLeadRepository::new();
        let user = user_with_roles(&[]);

        let result = load_leads_page(&repo, &user, LeadsQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_leads_page_applies_filters() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let query = LeadsQuery {
            search: Some("  munnar ".to_string()),
            status: Some("quoted".to_string()),
            priority: Some("high".to_string()),
            show_converted: None,
            page: Some(2),
        };

        repo.expect_list_leads()
            .times(1)
            .withf(|query| {
                assert_eq!(query.hub_id, 9);
                assert_eq!(query.search.as_deref(), Some("munnar"));
                assert_eq!(query.status, Some(LeadStatus::Quoted));
                assert_eq!(query.priority, Some(LeadPriority::High));
                assert!(!query.include_converted);
                match &query.pagination {
                    Some(pagination) => assert_eq!(pagination.page, 2),
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((1, vec![sample_lead(1, 9, "Asha")])));

        let data = load_leads_page(&repo, &user, query).expect("expected success");

        assert_eq!(data.search.as_deref(), Some("munnar"));
        assert_eq!(data.status, Some(LeadStatus::Quoted));
        assert!(!data.show_converted);
    }

    #[test]
    fn load_leads_page_rejects_unknown_status() {
        let repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let query = LeadsQuery {
            status: Some("archived".to_string()),
            ..LeadsQuery::default()
        };

        let result = load_leads_page(&repo, &user, query);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn load_leads_page_can_include_converted() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);
        let query = LeadsQuery {
            show_converted: Some("on".to_string()),
            ..LeadsQuery::default()
        };

        repo.expect_list_leads()
            .times(1)
            .withf(|query| query.include_converted)
            .returning(|_| Ok((0, Vec::new())));

        let data = load_leads_page(&repo, &user, query).expect("expected success");
        assert!(data.show_converted);
    }

    #[test]
    fn load_lead_page_returns_not_found() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_lead_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = load_lead_page(&repo, &user, 4);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_lead_page_collects_related_records() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_lead_by_id()
            .times(1)
            .withf(|id, hub_id| *id == 4 && *hub_id == 9)
            .returning(|id, hub_id| Ok(Some(sample_lead(id, hub_id, "Asha"))));
        repo.expect_list_follow_ups()
            .times(1)
            .returning(|lead_id, _| Ok(vec![sample_follow_up(1, lead_id)]));
        repo.expect_list_quotations()
            .times(1)
            .withf(|query| query.lead_id == Some(4) && query.hub_id == 9)
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_get_trip_by_lead_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let data = load_lead_page(&repo, &user, 4).expect("expected success");

        assert_eq!(data.lead.id, 4);
        assert_eq!(data.follow_ups.len(), 1);
        assert!(data.quotations.is_empty());
        assert!(data.trip.is_none());
    }

    #[test]
    fn create_lead_requires_role() {
        let repo = MockLeadRepository::new();
        let user = user_with_roles(&["accounts"]);

        let result = create_lead(&repo, &user, lead_form("Asha"));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_lead_validates_form() {
        let repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let result = create_lead(&repo, &user, lead_form("   "));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_lead_persists_for_users_hub() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_create_lead()
            .times(1)
            .withf(|new_lead| {
                assert_eq!(new_lead.hub_id, 9);
                assert_eq!(new_lead.customer_name, "Asha Menon");
                assert_eq!(new_lead.status, LeadStatus::New);
                true
            })
            .returning(|new_lead| Ok(sample_lead(11, new_lead.hub_id, &new_lead.customer_name)));

        let lead = create_lead(&repo, &user, lead_form(" Asha  Menon ")).expect("expected success");

        assert_eq!(lead.id, 11);
    }

    #[test]
    fn change_lead_status_updates_pipeline() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_update_lead_status()
            .times(1)
            .withf(|lead_id, hub_id, status| {
                *lead_id == 3 && *hub_id == 9 && *status == LeadStatus::Lost
            })
            .returning(|lead_id, hub_id, status| {
                let mut lead = sample_lead(lead_id, hub_id, "Asha");
                lead.status = status;
                Ok(lead)
            });

        let form = LeadStatusForm {
            status: "lost".to_string(),
        };
        let lead = change_lead_status(&repo, &user, 3, form).expect("expected success");

        assert_eq!(lead.status, LeadStatus::Lost);
    }

    #[test]
    fn remove_lead_maps_missing_lead_to_not_found() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_delete_lead()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = remove_lead(&repo, &user, 3);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn add_follow_up_checks_lead_hub() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_lead_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_follow_up().times(0);

        let form = AddFollowUpForm {
            due_at: "2025-03-02T10:00".to_string(),
            note: None,
        };
        let result = add_follow_up(&repo, &user, 5, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn add_follow_up_persists_entry() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_lead_by_id()
            .times(1)
            .returning(|id, hub_id| Ok(Some(sample_lead(id, hub_id, "Asha"))));
        repo.expect_create_follow_up()
            .times(1)
            .withf(|new_follow_up| {
                new_follow_up.lead_id == 5
                    && new_follow_up.note.as_deref() == Some("ask about dates")
            })
            .returning(|new_follow_up| Ok(sample_follow_up(21, new_follow_up.lead_id)));

        let form = AddFollowUpForm {
            due_at: "2025-03-02T10:00".to_string(),
            note: Some(" ask about dates ".to_string()),
        };
        let follow_up = add_follow_up(&repo, &user, 5, form).expect("expected success");

        assert_eq!(follow_up.id, 21);
    }

    #[test]
    fn complete_follow_up_is_hub_scoped() {
        let mut repo = MockLeadRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_complete_follow_up()
            .times(1)
            .withf(|id, hub_id, _| *id == 21 && *hub_id == 9)
            .returning(|id, _, completed_at| {
                let mut follow_up = sample_follow_up(id, 5);
                follow_up.status = FollowUpStatus::Completed;
                follow_up.completed_at = Some(completed_at);
                Ok(follow_up)
            });

        let follow_up = complete_follow_up(&repo, &user, 21).expect("expected success");

        assert_eq!(follow_up.status, FollowUpStatus::Completed);
        assert!(follow_up.completed_at.is_some());
    }
}
