use actix_web::{delete, get, post, web, HttpResponse, Responder};

use super::{add_log, failure, HttpState};
use crate::domain::template::MessageTemplate;

const SOURCE: &str = "Templates";

#[get("/templates")]
async fn list_templates(data: web::Data<HttpState>) -> impl Responder {
    let console = data.console.console().await;
    HttpResponse::Ok().json(console.templates().list())
}

/// Creates the template, or replaces the one with the same name.
#[post("/templates")]
async fn save_template(
    data: web::Data<HttpState>,
    req: web::Json<MessageTemplate>,
) -> impl Responder {
    let result = data.console.console().await.save_template(req.into_inner());
    match result {
        Ok(template) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "Template saved successfully");
            HttpResponse::Ok().json(template)
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to save template", e),
    }
}

#[get("/templates/{name}")]
async fn get_template(data: web::Data<HttpState>, name: web::Path<String>) -> impl Responder {
    let result = data.console.console().await.template(&name);
    match result {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => failure(&data.logs, SOURCE, "Template lookup failed", e),
    }
}

#[get("/templates/{name}/preview")]
async fn preview_template(data: web::Data<HttpState>, name: web::Path<String>) -> impl Responder {
    let result = data.console.console().await.template_preview(&name);
    match result {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => failure(&data.logs, SOURCE, "Template preview failed", e),
    }
}

#[delete("/templates/{name}")]
async fn delete_template(data: web::Data<HttpState>, name: web::Path<String>) -> impl Responder {
    let removed = data.console.console().await.remove_template(&name);
    if removed {
        add_log(&data.logs, "SUCCESS", SOURCE, "Template deleted");
    }
    HttpResponse::NoContent().finish()
}

pub(super) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_templates)
        .service(save_template)
        .service(get_template)
        .service(preview_template)
        .service(delete_template);
}
