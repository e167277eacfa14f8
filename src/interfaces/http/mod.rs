mod bot;
mod chat;
mod error;
mod faqs;
mod templates;

use crate::application::use_cases::faq_transfer::ExportFile;
use crate::application::ConsoleService;
use crate::domain::error::AppError;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder, ResponseError};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub console: Arc<ConsoleService>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Logs the failure for the operator and renders it with its status code.
fn failure(logs: &Mutex<Vec<LogEntry>>, source: &str, context: &str, err: AppError) -> HttpResponse {
    tracing::warn!(source, error = %err, "{}", context);
    add_log(logs, "ERROR", source, &format!("{}: {}", context, err));
    err.error_response()
}

fn attachment(file: ExportFile) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ))
        .content_type("application/json")
        .body(file.content)
}

/// Every console route, mounted under `/api`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(bot::routes)
            .configure(faqs::routes)
            .configure(templates::routes)
            .configure(chat::routes)
            .service(get_logs),
    );
}

pub fn start_server(
    console: Arc<ConsoleService>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    server: &ServerConfig,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { console, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((server.host.as_str(), server.port))?
    .run();

    Ok(server)
}


#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use std::path::PathBuf;

    #[actix_web::test]
    async fn test_log_feed_is_bounded() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }

    #[actix_web::test]
    async fn test_logs_endpoint_returns_entries() {
        let state = test_support::state(PathBuf::from("unused"));
        add_log(&state.logs, "INFO", "Test", "hello");
        let app = test::init_service(App::new().app_data(state.clone()).configure(routes)).await;

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let entries: Vec<LogEntry> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "hello");
    }
}
