use serde::{Deserialize, Serialize};

/// Externally-visible representation of an employee record.
///
/// Field names are camelCased on the wire (`workingStatus`), matching what
/// the frontend expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier, immutable once assigned
    pub id: i64,
    pub name: String,
    pub role: String,
    /// Years of experience
    pub experience: f64,
    /// Whether the employee is currently working
    pub working_status: bool,
}

/// Body of create and update requests: the four mutable fields, no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub role: String,
    pub experience: f64,
    pub working_status: bool,
}

/// Parameters for the paginated listing endpoint.
///
/// All fields are optional; the service applies the defaults (page 0, size 5,
/// sorted by id ascending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePageRequest {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}
