use std::fmt;

use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::error;

use crate::model::employee::EmployeeInput;
use crate::model::envelope::{Envelope, FailureKind};
use crate::service::export::EXPORT_FILE_NAME;
use crate::service::record_manager::RecordManager;

fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation => StatusCode::BAD_REQUEST,
        FailureKind::Conflict => StatusCode::CONFLICT,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(envelope: Envelope, success: StatusCode) -> HttpResponse {
    let status = match &envelope {
        Envelope::Success { .. } => success,
        Envelope::Failure { kind, .. } => failure_status(*kind),
    };
    HttpResponse::build(status).json(envelope)
}

/// Body or path extraction failure, answered with the same envelope as a
/// validation failure.
pub fn bad_request<E>(err: E) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let envelope = Envelope::single(FailureKind::Validation, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(envelope)).into()
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "success": true, "message": "added"
        })),
        (status = 400, description = "One or more fields are invalid", body = Object, example = json!({
            "success": false, "errors": ["invalid email format", "invalid phone format"]
        })),
        (status = 409, description = "Email already in use", body = Object, example = json!({
            "success": false, "errors": ["email already in use"]
        })),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "success": false, "errors": ["insert failed"]
        }))
    ),
    tag = "Employee"
)]
pub async fn add_employee(
    manager: web::Data<RecordManager>,
    payload: web::Json<EmployeeInput>,
) -> impl Responder {
    respond(manager.add(&payload).await, StatusCode::CREATED)
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Every employee, ordered by id", body = [crate::model::employee::Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(manager: web::Data<RecordManager>) -> impl Responder {
    let employees = manager.list().await;
    HttpResponse::Ok().json(employees.as_slice())
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Employee updated", body = Object, example = json!({
            "success": true, "message": "updated"
        })),
        (status = 400, description = "One or more fields are invalid"),
        (status = 409, description = "Email used by another employee", body = Object, example = json!({
            "success": false, "errors": ["email already in use by another employee"]
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    manager: web::Data<RecordManager>,
    path: web::Path<i64>,
    payload: web::Json<EmployeeInput>,
) -> impl Responder {
    let employee_id = path.into_inner();
    respond(manager.update(employee_id, &payload).await, StatusCode::OK)
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "success": true, "message": "employee 1 deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "success": false, "errors": ["no employee with id 1"]
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    manager: web::Data<RecordManager>,
    path: web::Path<i64>,
) -> impl Responder {
    let employee_id = path.into_inner();
    respond(manager.delete(employee_id).await, StatusCode::OK)
}

/// Export Employees as CSV
#[utoipa::path(
    get,
    path = "/api/employees/export",
    responses(
        (status = 200, description = "Full table as UTF-8 CSV with a header row", body = String, content_type = "text/csv"),
        (status = 500, description = "Export failed")
    ),
    tag = "Employee"
)]
pub async fn export_employees(manager: web::Data<RecordManager>) -> impl Responder {
    match manager.export_csv().await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ))
            .body(bytes),
        Err(e) => {
            error!(error = %e, "Failed to export employees");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "errors": ["export failed"]
            }))
        }
    }
}

/// Employee Summary
#[utoipa::path(
    get,
    path = "/api/employees/summary",
    responses(
        (status = 200, description = "Head count, salary and group statistics", body = crate::model::summary::Summary)
    ),
    tag = "Employee"
)]
pub async fn employee_summary(manager: web::Data<RecordManager>) -> impl Responder {
    HttpResponse::Ok().json(manager.summary().await)
}
