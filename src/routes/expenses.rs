use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::expense::ExpenseCategory;
use crate::domain::payment::PaymentMode;
use crate::forms::expenses::ExpenseForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::expenses::{
    self, ExpensesQuery, create_expense, remove_expense, update_expense,
};

#[get("/expenses")]
pub async fn show_expenses(
    params: web::Query<ExpensesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match expenses::load_expenses_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "expenses",
                &server_config.auth_service_url,
            );
            context.insert("expenses", &data.expenses);
            context.insert("trip", &data.trip);
            context.insert("category", &data.category);
            context.insert("trips", &data.trips);
            context.insert("vendors", &data.vendors);
            context.insert("categories", ExpenseCategory::ALL);
            context.insert("modes", PaymentMode::ALL);
            render_template(&tera, "expenses/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/expenses")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Trip not found.").send();
            redirect("/expenses")
        }
        Err(err) => {
            log::error!("Failed to list expenses: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/expenses/add")]
pub async fn add_expense(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ExpenseForm>,
) -> impl Responder {
    match create_expense(repo.get_ref(), &user, form.into_inner()) {
        Ok(expense) => {
            FlashMessage::success("Expense recorded.").send();
            match expense.trip_id {
                Some(trip_id) => redirect(&format!("/trips/{trip_id}")),
                None => redirect("/expenses"),
            }
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/expenses")
        }
        Err(err) => {
            log::error!("Failed to record expense: {err}");
            FlashMessage::error("Could not record the expense.").send();
            redirect("/expenses")
        }
    }
}

#[get("/expenses/{expense_id}")]
pub async fn show_expense(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let expense_id = path.into_inner();

    match expenses::load_expense_page(repo.get_ref(), &user, expense_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "expenses",
                &server_config.auth_service_url,
            );
            context.insert("expense", &data.expense);
            context.insert("trips", &data.trips);
            context.insert("vendors", &data.vendors);
            context.insert("categories", ExpenseCategory::ALL);
            context.insert("modes", PaymentMode::ALL);
            render_template(&tera, "expenses/edit.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Expense not found.").send();
            redirect("/expenses")
        }
        Err(err) => {
            log::error!("Failed to load expense {expense_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/expenses/{expense_id}/edit")]
pub async fn edit_expense(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<ExpenseForm>,
) -> impl Responder {
    let expense_id = path.into_inner();
    let expense_url = format!("/expenses/{expense_id}");

    match update_expense(repo.get_ref(), &user, expense_id, form.into_inner()) {
        Ok(_) => {
            FlashMessage::success("Expense updated.").send();
            redirect("/expenses")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&expense_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Expense not found.").send();
            redirect("/expenses")
        }
        Err(err) => {
            log::error!("Failed to update expense {expense_id}: {err}");
            FlashMessage::error("Could not update the expense.").send();
            redirect(&expense_url)
        }
    }
}

#[post("/expenses/{expense_id}/delete")]
pub async fn delete_expense(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let expense_id = path.into_inner();

    match remove_expense(repo.get_ref(), &user, expense_id) {
        Ok(()) => {
            FlashMessage::success("Expense deleted.").send();
            redirect("/expenses")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Expense not found or already deleted.").send();
            redirect("/expenses")
        }
        Err(err) => {
            log::error!("Failed to delete expense {expense_id}: {err}");
            FlashMessage::error("Could not delete the expense.").send();
            redirect("/expenses")
        }
    }
}
