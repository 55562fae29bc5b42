use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde::Deserialize;
use tera::Tera;

use crate::domain::rate::Region;
use crate::forms::rates::UploadRatesForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::rates::{self, upload_rates};

#[derive(Debug, Default, Deserialize)]
pub struct RatesQuery {
    pub region: Option<String>,
}

#[get("/rates")]
pub async fn show_rates(
    params: web::Query<RatesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match rates::load_rates_page(repo.get_ref(), &user, params.region.as_deref()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "rates",
                &server_config.auth_service_url,
            );
            context.insert("region", &data.region);
            context.insert("region_title", data.region.title());
            context.insert("columns", &data.columns);
            context.insert("rows", &data.rows);
            context.insert("regions", Region::ALL);
            render_template(&tera, "rates/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/rates")
        }
        Err(err) => {
            log::error!("Failed to load rate table: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/rates/upload")]
pub async fn upload_rate_table(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadRatesForm>,
) -> impl Responder {
    match upload_rates(repo.get_ref(), &user, &mut form) {
        Ok((region, stored)) => {
            FlashMessage::success(format!(
                "{} rate table replaced with {stored} rows.",
                region.title()
            ))
            .send();
            redirect(&format!("/rates?region={region}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/rates")
        }
        Err(err) => {
            log::error!("Failed to upload rates: {err}");
            FlashMessage::error("Could not upload the rates.").send();
            redirect("/rates")
        }
    }
}
