use actix_web::{web, App, HttpServer, HttpResponse, Result, HttpRequest, middleware};
use log::{info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use crate::config::SchedulerConfig;
use crate::display::{schedule_rows, write_schedule_csv};
use crate::form::{export_submission_to_csv, validate_submission, MentorSubmission};
use crate::parser::{read_availability, Roster};
use crate::schedule::{solve, Schedule};

// In-memory storage for the latest schedule
pub struct AppState {
    pub roster: Mutex<Option<Roster>>,
    pub schedule: Mutex<Option<Schedule>>,
    pub admin_password: String,
    pub availability_path: PathBuf,
    pub config: SchedulerConfig,
}

impl AppState {
    pub fn new(admin_password: String, availability_path: PathBuf, config: SchedulerConfig) -> Self {
        Self {
            roster: Mutex::new(None),
            schedule: Mutex::new(None),
            admin_password,
            availability_path,
            config,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("state lock poisoned"))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

// Mentor submission endpoint, appends to the availability sheet
async fn submit(
    req: web::Json<MentorSubmission>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Err(message) = validate_submission(&req) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": message})));
    }

    export_submission_to_csv(&req, &state.availability_path)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save submission: {}", e)))?;
    info!("Stored availability for {}", req.name.trim());

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// Admin CSV upload endpoint, parses the sheet and solves
async fn admin_upload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let mut roster = Roster::default();
    if let Err(e) = read_availability(body.as_ref(), &mut roster) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {}", e)
        })));
    }

    let request = match roster.to_request() {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected availability upload: {}", e);
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })));
        }
    };
    let config = state.config.clone();
    let outcome = web::block(move || solve(&request, &config)).await?;

    match outcome {
        Ok(schedule) => {
            *lock(&state.schedule)? = Some(schedule);
            *lock(&state.roster)? = Some(roster);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Schedule generated successfully"
            })))
        }
        Err(e) => {
            warn!("{}", e);
            Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })))
        }
    }
}

// Schedule endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let schedule = lock(&state.schedule)?;
    match *schedule {
        Some(ref schedule) => Ok(HttpResponse::Ok().json(schedule_rows(schedule))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

// CSV download of the schedule
async fn get_schedule_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let schedule = lock(&state.schedule)?;
    let Some(ref schedule) = *schedule else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"})));
    };
    let columns = lock(&state.roster)?
        .as_ref()
        .map(|roster| roster.companies.len())
        .unwrap_or(0);

    let mut out = Vec::new();
    write_schedule_csv(&mut out, schedule, columns)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to write CSV: {}", e)))?;
    Ok(HttpResponse::Ok().content_type("text/csv").body(out))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/submit", web::post().to(submit))
        .route("/api/upload", web::post().to(admin_upload))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule.csv", web::get().to(get_schedule_csv));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
