use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use pushkind_travel::repository::DieselRepository;
use pushkind_travel::routes::api::api_v1_rates;
use pushkind_travel::routes::expenses::{
    add_expense, delete_expense, edit_expense, show_expense, show_expenses,
};
use pushkind_travel::routes::finder::show_finder;
use pushkind_travel::routes::leads::{
    add_lead, add_lead_follow_up, complete_lead_follow_up, delete_lead, delete_lead_follow_up,
    edit_lead, set_lead_status, show_lead, show_leads,
};
use pushkind_travel::routes::main::show_dashboard;
use pushkind_travel::routes::payments::{
    add_payment, delete_payment, edit_payment, show_payment, show_payments,
};
use pushkind_travel::routes::quotations::{
    add_quotation, delete_quotation, edit_quotation, new_quotation, show_quotation,
    show_quotations,
};
use pushkind_travel::routes::rates::{show_rates, upload_rate_table};
use pushkind_travel::routes::register_filters;
use pushkind_travel::routes::trips::{
    add_trip, delete_trip, edit_trip, new_trip, show_trip, show_trip_editor, show_trips,
};
use pushkind_travel::routes::vendors::{
    add_vendor, delete_vendor, edit_vendor, new_vendor, show_vendor, show_vendor_editor,
    show_vendors,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = env::var("AUTH_SERVICE_URL");
    let auth_service_url = match auth_service_url {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };
    register_filters(&mut tera);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(show_finder)
            .service(web::scope("/api").service(api_v1_rates))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_dashboard)
                    .service(show_leads)
                    .service(add_lead)
                    .service(show_lead)
                    .service(edit_lead)
                    .service(set_lead_status)
                    .service(delete_lead)
                    .service(add_lead_follow_up)
                    .service(complete_lead_follow_up)
                    .service(delete_lead_follow_up)
                    .service(show_quotations)
                    .service(new_quotation)
                    .service(add_quotation)
                    .service(show_quotation)
                    .service(edit_quotation)
                    .service(delete_quotation)
                    .service(show_trips)
                    .service(new_trip)
                    .service(add_trip)
                    .service(show_trip)
                    .service(show_trip_editor)
                    .service(edit_trip)
                    .service(delete_trip)
                    .service(show_vendors)
                    .service(new_vendor)
                    .service(add_vendor)
                    .service(show_vendor)
                    .service(show_vendor_editor)
                    .service(edit_vendor)
                    .service(delete_vendor)
                    .service(show_payments)
                    .service(add_payment)
                    .service(show_payment)
                    .service(edit_payment)
                    .service(delete_payment)
                    .service(show_expenses)
                    .service(add_expense)
                    .service(show_expense)
                    .service(edit_expense)
                    .service(delete_expense)
                    .service(show_rates)
                    .service(upload_rate_table)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
