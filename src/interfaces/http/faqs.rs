use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;

use super::{add_log, attachment, failure, HttpState};
use crate::application::use_cases::faq_transfer::ImportFormat;
use crate::application::{ExportKind, FaqQuery};
use crate::domain::error::AppError;
use crate::domain::faq::{FaqInput, FaqPatch};

const SOURCE: &str = "Faqs";

#[derive(Deserialize)]
struct ImportQuery {
    format: Option<ImportFormat>,
    filename: Option<String>,
}

impl ImportQuery {
    fn resolve(&self) -> Result<ImportFormat, AppError> {
        self.format
            .or_else(|| self.filename.as_deref().and_then(ImportFormat::from_filename))
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Import needs a format (json or csv) or a .json/.csv filename".to_string(),
                )
            })
    }
}

#[get("/faqs")]
async fn list_faqs(data: web::Data<HttpState>, query: web::Query<FaqQuery>) -> impl Responder {
    let faqs = data.console.console().await.list_faqs(&query);
    HttpResponse::Ok().json(faqs)
}

#[post("/faqs")]
async fn create_faq(data: web::Data<HttpState>, req: web::Json<FaqInput>) -> impl Responder {
    let result = data.console.console().await.add_faq(req.into_inner());
    match result {
        Ok(faq) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "FAQ added successfully");
            HttpResponse::Created().json(faq)
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to add FAQ", e),
    }
}

#[get("/faqs/export")]
async fn export_faqs(data: web::Data<HttpState>) -> impl Responder {
    match data.console.export(ExportKind::Faqs).await {
        Ok(file) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "FAQs exported successfully");
            attachment(file)
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to export FAQs", e),
    }
}

/// Raw file body; the format comes from `?format=` or `?filename=`.
#[post("/faqs/import")]
async fn import_faqs(
    data: web::Data<HttpState>,
    query: web::Query<ImportQuery>,
    body: web::Bytes,
) -> impl Responder {
    let format = match query.resolve() {
        Ok(format) => format,
        Err(e) => return failure(&data.logs, SOURCE, "Failed to import FAQs", e),
    };

    match data.console.import_faqs(&body, format).await {
        Ok(report) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "FAQs imported successfully");
            HttpResponse::Ok().json(report)
        }
        Err(e) => failure(
            &data.logs,
            SOURCE,
            "Failed to import FAQs. Please check the file format.",
            e,
        ),
    }
}

#[get("/faqs/{id}")]
async fn get_faq(data: web::Data<HttpState>, id: web::Path<i64>) -> impl Responder {
    let result = data.console.console().await.find_faq(*id);
    match result {
        Ok(faq) => HttpResponse::Ok().json(faq),
        Err(e) => failure(&data.logs, SOURCE, "FAQ lookup failed", e),
    }
}

#[put("/faqs/{id}")]
async fn update_faq(
    data: web::Data<HttpState>,
    id: web::Path<i64>,
    req: web::Json<FaqPatch>,
) -> impl Responder {
    let result = data.console.console().await.update_faq(*id, req.into_inner());
    match result {
        Ok(faq) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "FAQ updated successfully");
            HttpResponse::Ok().json(faq)
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to update FAQ", e),
    }
}

/// Deleting an unknown id is not an error.
#[delete("/faqs/{id}")]
async fn delete_faq(data: web::Data<HttpState>, id: web::Path<i64>) -> impl Responder {
    let removed = data.console.console().await.remove_faq(*id);
    if removed {
        add_log(&data.logs, "SUCCESS", SOURCE, "FAQ deleted successfully");
    }
    HttpResponse::NoContent().finish()
}

pub(super) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_faqs)
        .service(create_faq)
        .service(export_faqs)
        .service(import_faqs)
        .service(get_faq)
        .service(update_faq)
        .service(delete_faq);
}

#[cfg(test)]
mod tests {
    use super::super::{routes, test_support};
    use crate::domain::faq::Faq;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::path::PathBuf;

    #[actix_web::test]
    async fn test_faq_crud() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/faqs")
            .set_json(json!({
                "question": "Do you sell gift cards?",
                "answer": "Yes, in any amount.",
                "category": "products",
                "keywords": ["gift", "card"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Faq = test::read_body_json(resp).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/faqs/{}", created.id))
            .set_json(json!({ "status": "inactive" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "inactive");
        assert_eq!(updated["question"], "Do you sell gift cards?");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/faqs/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/faqs/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_blank_question_is_rejected() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/faqs")
            .set_json(json!({ "question": "   ", "answer": "Something" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_list_with_query() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/faqs?search=delivery&category=shipping")
            .to_request();
        let faqs: Vec<Faq> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].question, "How long does delivery take?");
    }

    #[actix_web::test]
    async fn test_csv_import_and_json_export() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let csv = "question,answer,category,keywords\nDo you deliver to Abuja?,Yes,shipping,abuja;delivery\n";
        let req = test::TestRequest::post()
            .uri("/api/faqs/import?filename=extra.csv")
            .set_payload(csv)
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["added"], 1);

        let req = test::TestRequest::get().uri("/api/faqs/export").to_request();
        let resp = test::call_service(&app, req).await;
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert!(disposition.contains("faqs-"));
        let faqs: Vec<Faq> = test::read_body_json(resp).await;
        assert_eq!(faqs.len(), 6);
    }

    #[actix_web::test]
    async fn test_import_without_format_is_rejected() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/faqs/import")
            .set_payload("[]")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_malformed_json_import_leaves_store_unchanged() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/faqs/import?format=json")
            .set_payload("[{\"question\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/faqs").to_request();
        let faqs: Vec<Faq> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(faqs.len(), 5);
    }
}
