use crate::db::{EmployeeRow, EmployeeStore};
use shared::{CreateEmployeeRequest, Employee, EmployeePageRequest};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors surfaced by [`EmployeeService`].
///
/// `EmptyDatabase` means the whole collection was empty for an operation that
/// requires at least one record; `NotFound` means a specific lookup or
/// id-targeted mutation matched nothing.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee Database is empty")]
    EmptyDatabase,
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            role: row.role,
            experience: row.experience,
            working_status: row.working_status,
        }
    }
}

/// Service holding the business rules for employee records
#[derive(Clone)]
pub struct EmployeeService {
    store: EmployeeStore,
}

impl EmployeeService {
    pub fn new(store: EmployeeStore) -> Self {
        Self { store }
    }

    /// List all employees, optionally restricted to an exact name match.
    ///
    /// An empty result is reported as an empty database, whether or not a
    /// name filter was supplied.
    pub async fn get_all(&self, name: Option<&str>) -> Result<Vec<Employee>, EmployeeError> {
        info!("Fetching all employees. Filter by name: {:?}", name);

        let rows = match name {
            Some(name) => self.store.find_by_name(name).await?,
            None => self.store.find_all().await?,
        };
        let employees: Vec<Employee> = rows.into_iter().map(Employee::from).collect();

        if employees.is_empty() {
            warn!("Employee database is empty or no employees found for the given name.");
            return Err(EmployeeError::EmptyDatabase);
        }

        info!("Successfully fetched {} employees.", employees.len());
        Ok(employees)
    }

    /// Fetch a single employee by id
    pub async fn get_by_id(&self, id: i64) -> Result<Employee, EmployeeError> {
        info!("Fetching employee by ID: {}", id);

        match self.store.find_by_id(id).await? {
            Some(row) => Ok(Employee::from(row)),
            None => {
                error!("Employee with ID {} not found.", id);
                Err(EmployeeError::NotFound(format!(
                    "Employee with ID {} not found.",
                    id
                )))
            }
        }
    }

    /// Create a new employee; the store assigns the id
    pub async fn create(&self, request: CreateEmployeeRequest) -> Result<Employee, EmployeeError> {
        info!("Creating a new employee: {:?}", request);

        let row = self
            .store
            .insert(
                &request.name,
                &request.role,
                request.experience,
                request.working_status,
            )
            .await?;

        info!("Employee created successfully with ID: {}", row.id);
        Ok(Employee::from(row))
    }

    /// Overwrite the four mutable fields of an existing employee.
    /// The id is never changed.
    pub async fn update(
        &self,
        id: i64,
        request: CreateEmployeeRequest,
    ) -> Result<Employee, EmployeeError> {
        info!("Updating employee with ID: {}", id);

        let updated = self
            .store
            .update(
                id,
                &request.name,
                &request.role,
                request.experience,
                request.working_status,
            )
            .await?;

        if !updated {
            error!("Employee with ID {} not found.", id);
            return Err(EmployeeError::NotFound(format!(
                "Employee with ID {} not found.",
                id
            )));
        }

        info!("Employee with ID {} updated successfully.", id);
        Ok(Employee {
            id,
            name: request.name,
            role: request.role,
            experience: request.experience,
            working_status: request.working_status,
        })
    }

    /// Delete a single employee by id
    pub async fn delete(&self, id: i64) -> Result<(), EmployeeError> {
        info!("Deleting employee with ID: {}", id);

        let deleted = self.store.delete_by_id(id).await?;

        if !deleted {
            error!("Employee with ID {} not found.", id);
            return Err(EmployeeError::NotFound(format!(
                "Employee with ID {} not found.",
                id
            )));
        }

        info!("Employee with ID {} deleted successfully.", id);
        Ok(())
    }

    /// Delete every employee. Fails if the store was already empty.
    pub async fn delete_all(&self) -> Result<(), EmployeeError> {
        info!("Deleting all employees.");

        if self.store.count().await? == 0 {
            warn!("Employee database is empty.");
            return Err(EmployeeError::EmptyDatabase);
        }

        self.store.delete_all().await?;
        info!("All employees deleted successfully.");
        Ok(())
    }

    /// List employees with the given working status
    pub async fn find_by_working_status(
        &self,
        working_status: bool,
    ) -> Result<Vec<Employee>, EmployeeError> {
        info!("Fetching employees by working status: {}", working_status);

        let rows = self.store.find_by_working_status(working_status).await?;
        let employees: Vec<Employee> = rows.into_iter().map(Employee::from).collect();

        if employees.is_empty() {
            warn!("No employees found with working status: {}", working_status);
            return Err(EmployeeError::NotFound(format!(
                "Employee with working status {} are not found.",
                working_status
            )));
        }

        info!(
            "Successfully fetched {} employees with working status {}.",
            employees.len(),
            working_status
        );
        Ok(employees)
    }

    /// List employees whose role starts with the given prefix (case-sensitive)
    pub async fn find_by_role_prefix(&self, prefix: &str) -> Result<Vec<Employee>, EmployeeError> {
        info!("Fetching employees whose roles start with: {}", prefix);

        let rows = self.store.find_by_role_prefix(prefix).await?;
        let employees: Vec<Employee> = rows.into_iter().map(Employee::from).collect();

        if employees.is_empty() {
            warn!("No employees found with roles starting with: {}", prefix);
            return Err(EmployeeError::NotFound(format!(
                "Employee with role {} are not found.",
                prefix
            )));
        }

        info!(
            "Successfully fetched {} employees with roles starting with {}.",
            employees.len(),
            prefix
        );
        Ok(employees)
    }

    /// List all employees without any filter
    pub async fn get_all_unfiltered(&self) -> Result<Vec<Employee>, EmployeeError> {
        info!("Fetching all employees without filters.");

        let rows = self.store.find_all().await?;
        let employees: Vec<Employee> = rows.into_iter().map(Employee::from).collect();

        if employees.is_empty() {
            warn!("Employee database is empty.");
            return Err(EmployeeError::EmptyDatabase);
        }

        info!("Successfully fetched {} employees.", employees.len());
        Ok(employees)
    }

    /// List employees with exactly the given name
    pub async fn get_by_name(&self, name: &str) -> Result<Vec<Employee>, EmployeeError> {
        info!("Fetching employees by name: {}", name);

        let rows = self.store.find_by_name(name).await?;
        let employees: Vec<Employee> = rows.into_iter().map(Employee::from).collect();

        if employees.is_empty() {
            warn!("No employees found with name: {}", name);
            return Err(EmployeeError::NotFound(format!(
                "Employee with name {} are not found.",
                name
            )));
        }

        info!(
            "Successfully fetched {} employees with name {}.",
            employees.len(),
            name
        );
        Ok(employees)
    }

    /// Fetch one page of employees.
    ///
    /// Unlike the other reads, an empty page is not an error: paging past
    /// the last record is expected.
    pub async fn get_page(
        &self,
        request: EmployeePageRequest,
    ) -> Result<Vec<Employee>, EmployeeError> {
        let page_number = request.page_number.unwrap_or(0);
        let page_size = request.page_size.unwrap_or(5);
        let sort_by = request.sort_by.as_deref().unwrap_or("id");
        let sort_dir = request.sort_dir.as_deref().unwrap_or("asc");

        info!(
            "Fetching employees with pagination - Page: {}, Size: {}, SortBy: {}, SortDir: {}",
            page_number, page_size, sort_by, sort_dir
        );

        // Anything other than "asc" (any casing) sorts descending
        let descending = !sort_dir.eq_ignore_ascii_case("asc");

        let rows = self
            .store
            .find_page(page_number, page_size, sort_by, descending)
            .await?;
        let employees: Vec<Employee> = rows.into_iter().map(Employee::from).collect();

        if employees.is_empty() {
            warn!("No employees found in the requested page.");
        }

        info!(
            "Successfully fetched {} employees in the requested page.",
            employees.len()
        );
        Ok(employees)
    }
}
