use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::lead::{LeadPriority, LeadStatus};
use crate::forms::leads::{AddFollowUpForm, LeadForm, LeadStatusForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::leads::{
    self, LeadsQuery, add_follow_up, change_lead_status, complete_follow_up, create_lead,
    remove_follow_up, remove_lead, update_lead,
};

#[get("/leads")]
pub async fn show_leads(
    params: web::Query<LeadsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads::load_leads_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "leads",
                &server_config.auth_service_url,
            );
            context.insert("leads", &data.leads);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("priority", &data.priority);
            context.insert("show_converted", &data.show_converted);
            context.insert("statuses", LeadStatus::ALL);
            context.insert("priorities", LeadPriority::ALL);
            render_template(&tera, "leads/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/leads/{lead_id}")]
pub async fn show_lead(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let lead_id = path.into_inner();

    match leads::load_lead_page(repo.get_ref(), &user, lead_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "leads",
                &server_config.auth_service_url,
            );
            context.insert("lead", &data.lead);
            context.insert("follow_ups", &data.follow_ups);
            context.insert("quotations", &data.quotations);
            context.insert("trip", &data.trip);
            context.insert("statuses", LeadStatus::ALL);
            context.insert("priorities", LeadPriority::ALL);
            render_template(&tera, "leads/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to load lead {lead_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/leads/add")]
pub async fn add_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<LeadForm>,
) -> impl Responder {
    match create_lead(repo.get_ref(), &user, form.into_inner()) {
        Ok(lead) => {
            FlashMessage::success(format!("Lead for {} added.", lead.customer_name)).send();
            redirect(&format!("/leads/{}", lead.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to create lead: {err}");
            FlashMessage::error("Could not add the lead.").send();
            redirect("/leads")
        }
    }
}

#[post("/leads/{lead_id}/edit")]
pub async fn edit_lead(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<LeadForm>,
) -> impl Responder {
    let lead_id = path.into_inner();
    let lead_url = format!("/leads/{lead_id}");

    match update_lead(repo.get_ref(), &user, lead_id, form.into_inner()) {
        Ok(_) => {
            FlashMessage::success("Lead updated.").send();
            redirect(&lead_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&lead_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to update lead {lead_id}: {err}");
            FlashMessage::error("Could not update the lead.").send();
            redirect(&lead_url)
        }
    }
}

#[post("/leads/{lead_id}/status")]
pub async fn set_lead_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<LeadStatusForm>,
) -> impl Responder {
    let lead_id = path.into_inner();

    match change_lead_status(repo.get_ref(), &user, lead_id, form.into_inner()) {
        Ok(lead) => {
            FlashMessage::success(format!("Lead moved to {}.", lead.status)).send();
            redirect(&format!("/leads/{lead_id}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/leads/{lead_id}"))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to change status of lead {lead_id}: {err}");
            FlashMessage::error("Could not change the status.").send();
            redirect("/leads")
        }
    }
}

#[post("/leads/{lead_id}/delete")]
pub async fn delete_lead(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let lead_id = path.into_inner();

    match remove_lead(repo.get_ref(), &user, lead_id) {
        Ok(()) => {
            FlashMessage::success("Lead deleted.").send();
            redirect("/leads")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found or already deleted.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to delete lead {lead_id}: {err}");
            FlashMessage::error("Could not delete the lead.").send();
            redirect("/leads")
        }
    }
}

#[post("/leads/{lead_id}/follow-ups/add")]
pub async fn add_lead_follow_up(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddFollowUpForm>,
) -> impl Responder {
    let lead_id = path.into_inner();
    let lead_url = format!("/leads/{lead_id}");

    match add_follow_up(repo.get_ref(), &user, lead_id, form.into_inner()) {
        Ok(_) => {
            FlashMessage::success("Follow-up scheduled.").send();
            redirect(&lead_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&lead_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to schedule follow-up for lead {lead_id}: {err}");
            FlashMessage::error("Could not schedule the follow-up.").send();
            redirect(&lead_url)
        }
    }
}

#[post("/leads/{lead_id}/follow-ups/{follow_up_id}/complete")]
pub async fn complete_lead_follow_up(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (lead_id, follow_up_id) = path.into_inner();
    let lead_url = format!("/leads/{lead_id}");

    match complete_follow_up(repo.get_ref(), &user, follow_up_id) {
        Ok(_) => {
            FlashMessage::success("Follow-up completed.").send();
            redirect(&lead_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Follow-up not found.").send();
            redirect(&lead_url)
        }
        Err(err) => {
            log::error!("Failed to complete follow-up {follow_up_id}: {err}");
            FlashMessage::error("Could not complete the follow-up.").send();
            redirect(&lead_url)
        }
    }
}

#[post("/leads/{lead_id}/follow-ups/{follow_up_id}/delete")]
pub async fn delete_lead_follow_up(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (lead_id, follow_up_id) = path.into_inner();
    let lead_url = format!("/leads/{lead_id}");

    match remove_follow_up(repo.get_ref(), &user, follow_up_id) {
        Ok(()) => {
            FlashMessage::success("Follow-up deleted.").send();
            redirect(&lead_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Follow-up not found or already deleted.").send();
            redirect(&lead_url)
        }
        Err(err) => {
            log::error!("Failed to delete follow-up {follow_up_id}: {err}");
            FlashMessage::error("Could not delete the follow-up.").send();
            redirect(&lead_url)
        }
    }
}
