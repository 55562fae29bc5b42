use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use serde::Deserialize;
use tera::Tera;

use crate::domain::money::TRIP_GST_PERCENT;
use crate::domain::trip::TripStatus;
use crate::domain::vendor::MealPlan;
use crate::forms::trips::TripForm;
use crate::repository::DieselRepository;
use crate::routes::parse_nested_form;
use crate::services::ServiceError;
use crate::services::trips::{self, TripsQuery, create_trip, remove_trip, update_trip};

#[derive(Debug, Default, Deserialize)]
pub struct ConvertLeadQuery {
    pub lead_id: Option<i32>,
}

#[get("/trips")]
pub async fn show_trips(
    params: web::Query<TripsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match trips::load_trips_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "trips",
                &server_config.auth_service_url,
            );
            context.insert("trips", &data.trips);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("statuses", TripStatus::ALL);
            render_template(&tera, "trips/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/trips")
        }
        Err(err) => {
            log::error!("Failed to list trips: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/trips/new")]
pub async fn new_trip(
    params: web::Query<ConvertLeadQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match trips::load_trip_prefill(repo.get_ref(), &user, params.lead_id) {
        Ok(lead) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "trips",
                &server_config.auth_service_url,
            );
            context.insert("lead", &lead);
            context.insert("statuses", TripStatus::ALL);
            context.insert("meal_plans", MealPlan::ALL);
            context.insert("gst_percent", &TRIP_GST_PERCENT);
            render_template(&tera, "trips/form.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A trip already exists for this lead.").send();
            match params.lead_id {
                Some(lead_id) => redirect(&format!("/leads/{lead_id}")),
                None => redirect("/trips"),
            }
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead not found.").send();
            redirect("/leads")
        }
        Err(err) => {
            log::error!("Failed to prepare trip form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/trips/add")]
pub async fn add_trip(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form: TripForm = match parse_nested_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse trip form: {err}");
            FlashMessage::error("Could not read the trip form.").send();
            return redirect("/trips/new");
        }
    };

    let lead_id = form.lead_id.clone().filter(|value| !value.trim().is_empty());
    let form_url = match &lead_id {
        Some(lead_id) => format!("/trips/new?lead_id={}", lead_id.trim()),
        None => "/trips/new".to_string(),
    };

    match create_trip(repo.get_ref(), &user, form) {
        Ok(trip) => {
            FlashMessage::success(format!("Trip for {} booked.", trip.customer_name)).send();
            redirect(&format!("/trips/{}", trip.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&form_url)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A trip already exists for this lead.").send();
            match lead_id {
                Some(lead_id) => redirect(&format!("/leads/{}", lead_id.trim())),
                None => redirect("/trips"),
            }
        }
        Err(err) => {
            log::error!("Failed to create trip: {err}");
            FlashMessage::error("Could not book the trip.").send();
            redirect("/trips")
        }
    }
}

#[get("/trips/{trip_id}")]
pub async fn show_trip(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let trip_id = path.into_inner();

    match trips::load_trip_page(repo.get_ref(), &user, trip_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "trips",
                &server_config.auth_service_url,
            );
            context.insert("trip", &data.trip);
            context.insert("payments", &data.payments);
            context.insert("expenses", &data.expenses);
            context.insert("financials", &data.financials);
            render_template(&tera, "trips/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Trip not found.").send();
            redirect("/trips")
        }
        Err(err) => {
            log::error!("Failed to load trip {trip_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/trips/{trip_id}/edit")]
pub async fn show_trip_editor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let trip_id = path.into_inner();

    match trips::load_trip(repo.get_ref(), &user, trip_id) {
        Ok(trip) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "trips",
                &server_config.auth_service_url,
            );
            context.insert("trip", &trip);
            context.insert("statuses", TripStatus::ALL);
            context.insert("meal_plans", MealPlan::ALL);
            context.insert("gst_percent", &TRIP_GST_PERCENT);
            render_template(&tera, "trips/form.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Trip not found.").send();
            redirect("/trips")
        }
        Err(err) => {
            log::error!("Failed to load trip {trip_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/trips/{trip_id}/edit")]
pub async fn edit_trip(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let trip_id = path.into_inner();
    let editor_url = format!("/trips/{trip_id}/edit");

    let form: TripForm = match parse_nested_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse trip form: {err}");
            FlashMessage::error("Could not read the trip form.").send();
            return redirect(&editor_url);
        }
    };

    match update_trip(repo.get_ref(), &user, trip_id, form) {
        Ok(_) => {
            FlashMessage::success("Trip updated.").send();
            redirect(&format!("/trips/{trip_id}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&editor_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Trip not found.").send();
            redirect("/trips")
        }
        Err(err) => {
            log::error!("Failed to update trip {trip_id}: {err}");
            FlashMessage::error("Could not update the trip.").send();
            redirect(&editor_url)
        }
    }
}

#[post("/trips/{trip_id}/delete")]
pub async fn delete_trip(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let trip_id = path.into_inner();

    match remove_trip(repo.get_ref(), &user, trip_id) {
        Ok(()) => {
            FlashMessage::success("Trip deleted.").send();
            redirect("/trips")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Trip not found or already deleted.").send();
            redirect("/trips")
        }
        Err(err) => {
            log::error!("Failed to delete trip {trip_id}: {err}");
            FlashMessage::error("Could not delete the trip.").send();
            redirect("/trips")
        }
    }
}
