use actix_web::{Responder, get, web};
use pushkind_common::routes::render_template;
use tera::{Context, Tera};

use crate::forms::rates::FinderQuery;
use crate::repository::DieselRepository;
use crate::services::finder;

#[get("/finder")]
pub async fn show_finder(
    params: web::Query<FinderQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = finder::load_finder_page(repo.get_ref(), params.into_inner());

    let mut context = Context::new();
    context.insert("finder", &data);
    render_template(&tera, "finder/index.html", &context)
}
