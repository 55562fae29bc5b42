use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde::Deserialize;
use tera::Tera;

use crate::domain::money::DEFAULT_QUOTATION_GST_PERCENT;
use crate::domain::quotation::QuotationStatus;
use crate::forms::quotations::{AddQuotationForm, EditQuotationForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::quotations::{
    self, QuotationsQuery, create_quotation, remove_quotation, update_quotation,
};

/// Optional lead to prefill the new quotation from.
#[derive(Debug, Default, Deserialize)]
pub struct PrefillQuery {
    pub lead_id: Option<i32>,
}

#[get("/quotations")]
pub async fn show_quotations(
    params: web::Query<QuotationsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match quotations::load_quotations_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "quotations",
                &server_config.auth_service_url,
            );
            context.insert("quotations", &data.quotations);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("statuses", QuotationStatus::ALL);
            render_template(&tera, "quotations/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/quotations")
        }
        Err(err) => {
            log::error!("Failed to list quotations: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/quotations/new")]
pub async fn new_quotation(
    params: web::Query<PrefillQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match quotations::load_quotation_prefill(repo.get_ref(), &user, params.lead_id) {
        Ok(lead) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "quotations",
                &server_config.auth_service_url,
            );
            context.insert("lead", &lead);
            context.insert("default_gst", &DEFAULT_QUOTATION_GST_PERCENT);
            render_template(&tera, "quotations/new.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/quotations/new")
        }
        Err(err) => {
            log::error!("Failed to prepare quotation form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/quotations/add")]
pub async fn add_quotation(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddQuotationForm>,
) -> impl Responder {
    match create_quotation(repo.get_ref(), &user, form.into_inner()) {
        Ok(quotation) => {
            FlashMessage::success(format!("Quotation #{} created.", quotation.id)).send();
            redirect(&format!("/quotations/{}", quotation.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/quotations/new")
        }
        Err(err) => {
            log::error!("Failed to create quotation: {err}");
            FlashMessage::error("Could not create the quotation.").send();
            redirect("/quotations")
        }
    }
}

#[get("/quotations/{quotation_id}")]
pub async fn show_quotation(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let quotation_id = path.into_inner();

    match quotations::load_quotation(repo.get_ref(), &user, quotation_id) {
        Ok(quotation) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "quotations",
                &server_config.auth_service_url,
            );
            context.insert("quotation", &quotation);
            context.insert("statuses", QuotationStatus::ALL);
            render_template(&tera, "quotations/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Quotation not found.").send();
            redirect("/quotations")
        }
        Err(err) => {
            log::error!("Failed to load quotation {quotation_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/quotations/{quotation_id}/edit")]
pub async fn edit_quotation(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditQuotationForm>,
) -> impl Responder {
    let quotation_id = path.into_inner();
    let quotation_url = format!("/quotations/{quotation_id}");

    match update_quotation(repo.get_ref(), &user, quotation_id, form.into_inner()) {
        Ok(_) => {
            FlashMessage::success("Quotation updated.").send();
            redirect(&quotation_url)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&quotation_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Quotation not found.").send();
            redirect("/quotations")
        }
        Err(err) => {
            log::error!("Failed to update quotation {quotation_id}: {err}");
            FlashMessage::error("Could not update the quotation.").send();
            redirect(&quotation_url)
        }
    }
}

#[post("/quotations/{quotation_id}/delete")]
pub async fn delete_quotation(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let quotation_id = path.into_inner();

    match remove_quotation(repo.get_ref(), &user, quotation_id) {
        Ok(()) => {
            FlashMessage::success("Quotation deleted.").send();
            redirect("/quotations")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Quotation not found or already deleted.").send();
            redirect("/quotations")
        }
        Err(err) => {
            log::error!("Failed to delete quotation {quotation_id}: {err}");
            FlashMessage::error("Could not delete the quotation.").send();
            redirect("/quotations")
        }
    }
}
