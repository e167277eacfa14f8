//! Chat simulator routes.

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{add_log, failure, HttpState};
use crate::domain::transcript::{SessionState, TestSuite, TranscriptEntry};

const SOURCE: &str = "Chat";

#[derive(Deserialize)]
struct SendMessageRequest {
    text: String,
}

#[derive(Deserialize)]
struct QuickReplyRequest {
    reply: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptView {
    session_id: Uuid,
    state: SessionState,
    entries: Vec<TranscriptEntry>,
}

#[post("/chat/messages")]
async fn send_message(
    data: web::Data<HttpState>,
    req: web::Json<SendMessageRequest>,
) -> impl Responder {
    match data.console.send_message(&req.text).await {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(e) => failure(&data.logs, SOURCE, "Message not sent", e),
    }
}

#[post("/chat/quick-replies")]
async fn send_quick_reply(
    data: web::Data<HttpState>,
    req: web::Json<QuickReplyRequest>,
) -> impl Responder {
    match data.console.send_quick_reply(&req.reply).await {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(e) => failure(&data.logs, SOURCE, "Quick reply not sent", e),
    }
}

#[get("/chat/transcript")]
async fn get_transcript(data: web::Data<HttpState>) -> impl Responder {
    let console = data.console.console().await;
    let session = console.session();
    HttpResponse::Ok().json(TranscriptView {
        session_id: session.id(),
        state: session.state(),
        entries: session.transcript().to_vec(),
    })
}

#[delete("/chat")]
async fn clear_chat(data: web::Data<HttpState>) -> impl Responder {
    data.console.console().await.clear_chat();
    add_log(&data.logs, "INFO", SOURCE, "Chat cleared");
    HttpResponse::NoContent().finish()
}

#[get("/chat/metrics")]
async fn get_metrics(data: web::Data<HttpState>) -> impl Responder {
    let metrics = data.console.console().await.metrics();
    HttpResponse::Ok().json(metrics)
}

#[post("/chat/suites/{suite}")]
async fn run_suite(data: web::Data<HttpState>, suite: web::Path<TestSuite>) -> impl Responder {
    let suite = suite.into_inner();
    add_log(
        &data.logs,
        "INFO",
        SOURCE,
        &format!("Running test suite {:?}", suite),
    );

    match data.console.run_suite(suite).await {
        Ok(steps) => HttpResponse::Ok().json(steps),
        Err(e) => failure(&data.logs, SOURCE, "Test suite aborted", e),
    }
}

pub(super) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(send_message)
        .service(send_quick_reply)
        .service(get_transcript)
        .service(clear_chat)
        .service(get_metrics)
        .service(run_suite);
}

#[cfg(test)]
mod tests {
    use super::super::{routes, test_support};
    use super::TranscriptView;
    use crate::domain::transcript::{Sender, SessionState, TestMetrics};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::path::PathBuf;

    #[actix_web::test]
    async fn test_send_message_appends_exchange() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/chat/messages")
            .set_json(json!({ "text": "Do you accept card payment?" }))
            .to_request();
        let reply: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reply["fallback"], false);
        assert_eq!(reply["reply"]["sender"], "bot");

        let req = test::TestRequest::get().uri("/api/chat/transcript").to_request();
        let view: TranscriptView = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view.state, SessionState::Idle);
        assert_eq!(view.entries.len(), 3);
        assert_eq!(view.entries[1].sender, Sender::User);
    }

    #[actix_web::test]
    async fn test_empty_message_is_bad_request() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/chat/messages")
            .set_json(json!({ "text": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_busy_session_is_conflict() {
        let state = test_support::state(PathBuf::from("unused"));
        state
            .console
            .console()
            .await
            .begin_exchange("first")
            .unwrap();
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/chat/quick-replies")
            .set_json(json!({ "reply": "Track order" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_suite_then_clear_resets_metrics() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/chat/suites/common_questions")
            .to_request();
        let steps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|step| step["outcome"] == "replied"));

        let req = test::TestRequest::get().uri("/api/chat/metrics").to_request();
        let metrics: TestMetrics = test::call_and_read_body_json(&app, req).await;
        assert!(metrics.has_run());

        let req = test::TestRequest::delete().uri("/api/chat").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get().uri("/api/chat/transcript").to_request();
        let view: TranscriptView = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view.entries.len(), 1);

        let req = test::TestRequest::get().uri("/api/chat/metrics").to_request();
        let metrics: TestMetrics = test::call_and_read_body_json(&app, req).await;
        assert!(!metrics.has_run());
    }

    #[actix_web::test]
    async fn test_unknown_suite_is_rejected() {
        let state = test_support::state(PathBuf::from("unused"));
        let app = test::init_service(App::new().app_data(state).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/chat/suites/stress")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
