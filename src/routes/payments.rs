use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::payment::{PaymentMode, PaymentType};
use crate::forms::payments::PaymentForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::payments::{
    self, PaymentsQuery, create_payment, remove_payment, update_payment,
};

/// Payments recorded against a trip return to that trip.
fn payment_return_url(trip_id: Option<i32>) -> String {
    match trip_id {
        Some(trip_id) => format!("/trips/{trip_id}"),
        None => "/payments".to_string(),
    }
}

#[get("/payments")]
pub async fn show_payments(
    params: web::Query<PaymentsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match payments::load_payments_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "payments",
                &server_config.auth_service_url,
            );
            context.insert("payments", &data.payments);
            context.insert("trip", &data.trip);
            context.insert("trips", &data.trips);
            context.insert("payment_types", PaymentType::ALL);
            context.insert("modes", PaymentMode::ALL);
            render_template(&tera, "payments/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Trip not found.").send();
            redirect("/payments")
        }
        Err(err) => {
            log::error!("Failed to list payments: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/payments/add")]
pub async fn add_payment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<PaymentForm>,
) -> impl Responder {
    match create_payment(repo.get_ref(), &user, form.into_inner()) {
        Ok(payment) => {
            FlashMessage::success("Payment recorded.").send();
            redirect(&payment_return_url(payment.trip_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/payments")
        }
        Err(err) => {
            log::error!("Failed to record payment: {err}");
            FlashMessage::error("Could not record the payment.").send();
            redirect("/payments")
        }
    }
}

#[get("/payments/{payment_id}")]
pub async fn show_payment(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let payment_id = path.into_inner();

    match payments::load_payment_page(repo.get_ref(), &user, payment_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "payments",
                &server_config.auth_service_url,
            );
            context.insert("payment", &data.payment);
            context.insert("trips", &data.trips);
            context.insert("payment_types", PaymentType::ALL);
            context.insert("modes", PaymentMode::ALL);
            render_template(&tera, "payments/edit.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Payment not found.").send();
            redirect("/payments")
        }
        Err(err) => {
            log::error!("Failed to load payment {payment_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/payments/{payment_id}/edit")]
pub async fn edit_payment(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<PaymentForm>,
) -> impl Responder {
    let payment_id = path.into_inner();
    let payment_url = format!("/payments/{payment_id}");

    match update_payment(repo.get_ref(), &user, payment_id, form.into_inner()) {
        Ok(payment) => {
            FlashMessage::success("Payment updated.").send();
            redirect(&payment_return_url(payment.trip_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&payment_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Payment not found.").send();
            redirect("/payments")
        }
        Err(err) => {
            log::error!("Failed to update payment {payment_id}: {err}");
            FlashMessage::error("Could not update the payment.").send();
            redirect(&payment_url)
        }
    }
}

#[post("/payments/{payment_id}/delete")]
pub async fn delete_payment(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payment_id = path.into_inner();

    match remove_payment(repo.get_ref(), &user, payment_id) {
        Ok(()) => {
            FlashMessage::success("Payment deleted.").send();
            redirect("/payments")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Payment not found or already deleted.").send();
            redirect("/payments")
        }
        Err(err) => {
            log::error!("Failed to delete payment {payment_id}: {err}");
            FlashMessage::error("Could not delete the payment.").send();
            redirect("/payments")
        }
    }
}
