use actix_web::{HttpResponse, Responder, get, web};

use crate::forms::rates::FinderQuery;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, finder};

#[get("/v1/rates")]
/// Return the packages priced for a region and pax size as JSON.
///
/// Public endpoint. An incomplete or unknown selection yields `400 Bad Request`.
pub async fn api_v1_rates(
    params: web::Query<FinderQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match finder::search_package_rates(repo.get_ref(), &params) {
        Ok(rates) => HttpResponse::Ok().json(rates),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
        Err(err) => {
            log::error!("Failed to look up package rates: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
