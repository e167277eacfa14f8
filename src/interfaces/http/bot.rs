//! Bot settings, connectivity check, deployment and export files.

use actix_web::{get, patch, post, put, web, HttpResponse, Responder};
use serde::Serialize;

use super::{add_log, attachment, failure, HttpState};
use crate::application::ExportKind;
use crate::domain::bot_config::{BotConfig, BotConfigPatch};

const SOURCE: &str = "Bot";

#[derive(Serialize)]
struct SavedExport {
    path: String,
}

#[get("/config")]
async fn get_config(data: web::Data<HttpState>) -> impl Responder {
    let console = data.console.console().await;
    HttpResponse::Ok().json(console.config())
}

#[put("/config")]
async fn replace_config(data: web::Data<HttpState>, req: web::Json<BotConfig>) -> impl Responder {
    let result = data.console.console().await.replace_config(req.into_inner());
    match result {
        Ok(config) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "Bot configuration saved");
            HttpResponse::Ok().json(config)
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to save configuration", e),
    }
}

#[patch("/config")]
async fn patch_config(
    data: web::Data<HttpState>,
    req: web::Json<BotConfigPatch>,
) -> impl Responder {
    let result = data.console.console().await.patch_config(req.into_inner());
    match result {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(e) => failure(&data.logs, SOURCE, "Failed to update configuration", e),
    }
}

#[get("/config/export")]
async fn export_config(data: web::Data<HttpState>) -> impl Responder {
    match data.console.export(ExportKind::Config).await {
        Ok(file) => {
            add_log(
                &data.logs,
                "SUCCESS",
                SOURCE,
                "Bot configuration exported successfully",
            );
            attachment(file)
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to export configuration", e),
    }
}

/// Writes an export into the server's export directory.
#[post("/exports/{kind}")]
async fn save_export(data: web::Data<HttpState>, kind: web::Path<ExportKind>) -> impl Responder {
    match data.console.save_export(kind.into_inner()).await {
        Ok(path) => {
            let path = path.display().to_string();
            add_log(&data.logs, "SUCCESS", SOURCE, &format!("Export saved to {}", path));
            HttpResponse::Created().json(SavedExport { path })
        }
        Err(e) => failure(&data.logs, SOURCE, "Failed to save export", e),
    }
}

#[post("/whatsapp/check")]
async fn check_whatsapp(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", SOURCE, "Testing WhatsApp API connection");

    match data.console.check_api().await {
        Ok(outcome) => {
            let level = if outcome.connected { "SUCCESS" } else { "ERROR" };
            add_log(&data.logs, level, SOURCE, &outcome.message);
            HttpResponse::Ok().json(outcome)
        }
        Err(e) => failure(&data.logs, SOURCE, "Connectivity check failed", e),
    }
}

#[get("/deployment")]
async fn deployment_summary(data: web::Data<HttpState>) -> impl Responder {
    let summary = data.console.console().await.summary();
    HttpResponse::Ok().json(summary)
}

#[post("/deployment")]
async fn deploy(data: web::Data<HttpState>) -> impl Responder {
    match data.console.deploy().await {
        Ok(summary) => {
            add_log(&data.logs, "SUCCESS", SOURCE, "Bot deployed successfully! 🎉");
            HttpResponse::Ok().json(summary)
        }
        Err(e) => failure(&data.logs, SOURCE, "Deployment refused", e),
    }
}

pub(super) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_config)
        .service(replace_config)
        .service(patch_config)
        .service(export_config)
        .service(save_export)
        .service(check_whatsapp)
        .service(deployment_summary)
        .service(deploy);
}

#[cfg(test)]
mod tests {
    use super::super::{routes, test_support};
    use crate::domain::deployment::DeploymentSummary;
    use crate::infrastructure::whatsapp::ProbeOutcome;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::path::PathBuf;

    #[actix_web::test]
    async fn test_patch_config_formats_phone() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::patch()
            .uri("/api/config")
            .set_json(json!({ "name": "Shop Bot", "phoneNumber": "08031234567" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Shop Bot");
        assert_eq!(body["phoneNumber"], "234 080 3123 456");
    }

    #[actix_web::test]
    async fn test_invalid_config_is_bad_request() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::patch()
            .uri("/api/config")
            .set_json(json!({ "responseDelay": 42.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_config_export_is_an_attachment() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::get().uri("/api/config/export").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert!(disposition.contains("bot-config-"));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["faqs"].as_array().unwrap().len(), 5);
        assert_eq!(body["templates"].as_array().unwrap().len(), 3);
        assert!(body["exportDate"].is_string());
    }

    #[actix_web::test]
    async fn test_deploy_flow() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post().uri("/api/deployment").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/api/whatsapp/check").to_request();
        let outcome: ProbeOutcome = test::call_and_read_body_json(&app, req).await;
        assert!(outcome.connected);

        let req = test::TestRequest::patch()
            .uri("/api/config")
            .set_json(json!({ "name": "Shop Bot" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post().uri("/api/deployment").to_request();
        let summary: DeploymentSummary = test::call_and_read_body_json(&app, req).await;
        assert!(summary.deployed);
        assert_eq!(summary.score, 69);

        let req = test::TestRequest::get().uri("/api/deployment").to_request();
        let summary: DeploymentSummary = test::call_and_read_body_json(&app, req).await;
        assert!(summary.deployed);
        assert_eq!(summary.bot_name, "Shop Bot");
    }

    #[actix_web::test]
    async fn test_save_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path().to_path_buf());
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post().uri("/api/exports/faqs").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let path = PathBuf::from(body["path"].as_str().unwrap());
        assert!(path.exists());
    }
}
