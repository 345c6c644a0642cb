use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use shared::{CreateEmployeeRequest, Employee, EmployeePageRequest};
use tracing::info;

use crate::domain::{EmployeeError, EmployeeService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub employee_service: EmployeeService,
}

impl AppState {
    pub fn new(employee_service: EmployeeService) -> Self {
        Self { employee_service }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        match self {
            EmployeeError::EmptyDatabase | EmployeeError::NotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            EmployeeError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}

/// The employee route table, nested under `/api/employee` by the caller
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all_employees))
        .route("/single/:id", get(get_employee_by_id))
        .route("/create", post(create_employee))
        .route("/update/:id", put(update_employee))
        .route("/delete/:id", delete(delete_one_employee))
        .route("/deleteAll", delete(delete_all_employees))
        .route("/workingstatus/:working_status", get(find_by_working_status))
        .route("/role/:role", get(find_by_role_starting_with))
        .route("/allEmployees", get(get_all_employee))
        .route("/byName", get(get_employee_by_name))
        .route("/allPagination", get(get_employees_based_on_page))
}

/// Optional name filter for GET /all
#[derive(Deserialize, Debug)]
pub struct NameFilterQuery {
    pub name: Option<String>,
}

/// Required name for GET /byName; a missing parameter is rejected with 400
#[derive(Deserialize, Debug)]
pub struct NameQuery {
    pub name: String,
}

/// Query parameters for GET /allPagination
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

/// GET /api/employee/all
pub async fn get_all_employees(
    State(state): State<AppState>,
    Query(query): Query<NameFilterQuery>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    info!("GET /api/employee/all - name filter: {:?}", query.name);

    let employees = state.employee_service.get_all(query.name.as_deref()).await?;
    Ok(Json(employees))
}

/// GET /api/employee/single/:id
pub async fn get_employee_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, EmployeeError> {
    info!("GET /api/employee/single/{}", id);

    let employee = state.employee_service.get_by_id(id).await?;
    Ok(Json(employee))
}

/// POST /api/employee/create
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), EmployeeError> {
    info!("POST /api/employee/create - request: {:?}", request);

    let employee = state.employee_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// PUT /api/employee/update/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<Json<Employee>, EmployeeError> {
    info!("PUT /api/employee/update/{} - request: {:?}", id, request);

    let employee = state.employee_service.update(id, request).await?;
    Ok(Json(employee))
}

/// DELETE /api/employee/delete/:id
pub async fn delete_one_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, EmployeeError> {
    info!("DELETE /api/employee/delete/{}", id);

    state.employee_service.delete(id).await?;
    Ok(format!("Employee {} has been deleted.", id))
}

/// DELETE /api/employee/deleteAll
pub async fn delete_all_employees(
    State(state): State<AppState>,
) -> Result<String, EmployeeError> {
    info!("DELETE /api/employee/deleteAll");

    state.employee_service.delete_all().await?;
    Ok("All employees have been deleted.".to_string())
}

/// GET /api/employee/workingstatus/:working_status
pub async fn find_by_working_status(
    State(state): State<AppState>,
    Path(working_status): Path<bool>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    info!("GET /api/employee/workingstatus/{}", working_status);

    let employees = state
        .employee_service
        .find_by_working_status(working_status)
        .await?;
    Ok(Json(employees))
}

/// GET /api/employee/role/:role
pub async fn find_by_role_starting_with(
    State(state): State<AppState>,
    Path(role_prefix): Path<String>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    info!("GET /api/employee/role/{}", role_prefix);

    let employees = state
        .employee_service
        .find_by_role_prefix(&role_prefix)
        .await?;
    Ok(Json(employees))
}

/// GET /api/employee/allEmployees
pub async fn get_all_employee(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    info!("GET /api/employee/allEmployees");

    let employees = state.employee_service.get_all_unfiltered().await?;
    Ok(Json(employees))
}

/// GET /api/employee/byName
pub async fn get_employee_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    info!("GET /api/employee/byName - name: {}", query.name);

    let employees = state.employee_service.get_by_name(&query.name).await?;
    Ok(Json(employees))
}

/// GET /api/employee/allPagination
pub async fn get_employees_based_on_page(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    info!("GET /api/employee/allPagination - query: {:?}", query);

    let request = EmployeePageRequest {
        page_number: query.page_number,
        page_size: query.page_size,
        sort_by: query.sort_by,
        sort_dir: query.sort_dir,
    };

    let employees = state.employee_service.get_page(request).await?;
    Ok(Json(employees))
}
