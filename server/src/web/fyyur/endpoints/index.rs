use crate::web::fyyur::base_template::BaseTemplateContext;
use crate::web::fyyur::error::AppError;
use actix_web::web::Html;
use actix_web::{get, HttpRequest, Responder};
use askama::Template;

#[get("/")]
async fn index(req: HttpRequest) -> Result<impl Responder, AppError> {
    let tmpl = IndexTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Fyyur",
        },
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "home.html")]
struct IndexTemplate<'a> {
    base: BaseTemplateContext<'a>,
}
