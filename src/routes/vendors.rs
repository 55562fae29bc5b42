use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, check_role, redirect, render_template};
use tera::{Context, Tera};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::vendor::{MealPlan, PriceTier, SharingType, VendorCategory};
use crate::forms::vendors::VendorForm;
use crate::repository::DieselRepository;
use crate::routes::parse_nested_form;
use crate::services::ServiceError;
use crate::services::vendors::{
    self, VendorsQuery, create_vendor, remove_vendor, update_vendor,
};

fn insert_vendor_choices(context: &mut Context) {
    context.insert("categories", VendorCategory::ALL);
    context.insert("sharings", SharingType::ALL);
    context.insert("tiers", PriceTier::ALL);
    context.insert("meal_plans", MealPlan::ALL);
}

#[get("/vendors")]
pub async fn show_vendors(
    params: web::Query<VendorsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match vendors::load_vendors_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "vendors",
                &server_config.auth_service_url,
            );
            context.insert("vendors", &data.vendors);
            context.insert("search", &data.search);
            context.insert("category", &data.category);
            context.insert("show_inactive", &data.show_inactive);
            context.insert("categories", VendorCategory::ALL);
            render_template(&tera, "vendors/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/vendors")
        }
        Err(err) => {
            log::error!("Failed to list vendors: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/vendors/new")]
pub async fn new_vendor(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        FlashMessage::error("Insufficient permissions.").send();
        return redirect("/na");
    }

    let mut context = base_context(
        &flash_messages,
        &user,
        "vendors",
        &server_config.auth_service_url,
    );
    insert_vendor_choices(&mut context);
    render_template(&tera, "vendors/form.html", &context)
}

#[post("/vendors/add")]
pub async fn add_vendor(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form: VendorForm = match parse_nested_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse vendor form: {err}");
            FlashMessage::error("Could not read the vendor form.").send();
            return redirect("/vendors/new");
        }
    };

    match create_vendor(repo.get_ref(), &user, form) {
        Ok(vendor) => {
            FlashMessage::success(format!("Vendor {} added.", vendor.name)).send();
            redirect(&format!("/vendors/{}", vendor.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/vendors/new")
        }
        Err(err) => {
            log::error!("Failed to create vendor: {err}");
            FlashMessage::error("Could not add the vendor.").send();
            redirect("/vendors")
        }
    }
}

#[get("/vendors/{vendor_id}")]
pub async fn show_vendor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let vendor_id = path.into_inner();

    match vendors::load_vendor(repo.get_ref(), &user, vendor_id) {
        Ok(vendor) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "vendors",
                &server_config.auth_service_url,
            );
            context.insert("vendor", &vendor);
            render_template(&tera, "vendors/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Vendor not found.").send();
            redirect("/vendors")
        }
        Err(err) => {
            log::error!("Failed to load vendor {vendor_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/vendors/{vendor_id}/edit")]
pub async fn show_vendor_editor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let vendor_id = path.into_inner();

    match vendors::load_vendor(repo.get_ref(), &user, vendor_id) {
        Ok(vendor) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "vendors",
                &server_config.auth_service_url,
            );
            context.insert("vendor", &vendor);
            insert_vendor_choices(&mut context);
            render_template(&tera, "vendors/form.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Vendor not found.").send();
            redirect("/vendors")
        }
        Err(err) => {
            log::error!("Failed to load vendor {vendor_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/vendors/{vendor_id}/edit")]
pub async fn edit_vendor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let vendor_id = path.into_inner();
    let editor_url = format!("/vendors/{vendor_id}/edit");

    let form: VendorForm = match parse_nested_form(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse vendor form: {err}");
            FlashMessage::error("Could not read the vendor form.").send();
            return redirect(&editor_url);
        }
    };

    match update_vendor(repo.get_ref(), &user, vendor_id, form) {
        Ok(_) => {
            FlashMessage::success("Vendor updated.").send();
            redirect(&format!("/vendors/{vendor_id}"))
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
            FlashMessage::error("Vendor not found.").send();
            redirect("/vendors")
        }
        Err(err) => {
            log::error!("Failed to update vendor {vendor_id}: {err}");
            FlashMessage::error("Could not update the vendor.").send();
            redirect(&editor_url)
        }
    }
}

#[post("/vendors/{vendor_id}/delete")]
pub async fn delete_vendor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let vendor_id = path.into_inner();

    match remove_vendor(repo.get_ref(), &user, vendor_id) {
        Ok(()) => {
            FlashMessage::success("Vendor deleted.").send();
            redirect("/vendors")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Vendor not found or already deleted.").send();
            redirect("/vendors")
        }
        Err(err) => {
            log::error!("Failed to delete vendor {vendor_id}: {err}");
            FlashMessage::error("Could not delete the vendor.").send();
            redirect("/vendors")
        }
    }
}
