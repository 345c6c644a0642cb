use sqlx::{migrate::MigrateDatabase, FromRow, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::warn;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:employees.db";

/// A single row of the `employees` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub experience: f64,
    pub working_status: bool,
}

/// EmployeeStore manages all database operations for employee records
#[derive(Clone)]
pub struct EmployeeStore {
    pool: Arc<SqlitePool>,
}

impl EmployeeStore {
    /// Create a new store backed by the database at `url`
    pub async fn new(url: &str) -> Result<Self, sqlx::Error> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self, sqlx::Error> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self, sqlx::Error> {
        // Generate a unique database name so tests don't share state
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                experience REAL NOT NULL,
                working_status BOOLEAN NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a new employee and return it with its assigned id
    pub async fn insert(
        &self,
        name: &str,
        role: &str,
        experience: f64,
        working_status: bool,
    ) -> Result<EmployeeRow, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO employees (name, role, experience, working_status) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(role)
        .bind(experience)
        .bind(working_status)
        .execute(&*self.pool)
        .await?;

        Ok(EmployeeRow {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            role: role.to_string(),
            experience,
            working_status,
        })
    }

    /// Retrieve a single employee by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<EmployeeRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, role, experience, working_status FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
    }

    /// List all employees ordered by id
    pub async fn find_all(&self) -> Result<Vec<EmployeeRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, role, experience, working_status FROM employees ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await
    }

    /// List employees whose name matches exactly
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<EmployeeRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, role, experience, working_status FROM employees \
             WHERE name = ? ORDER BY id",
        )
        .bind(name)
        .fetch_all(&*self.pool)
        .await
    }

    /// List employees with the given working status
    pub async fn find_by_working_status(
        &self,
        working_status: bool,
    ) -> Result<Vec<EmployeeRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, role, experience, working_status FROM employees \
             WHERE working_status = ? ORDER BY id",
        )
        .bind(working_status)
        .fetch_all(&*self.pool)
        .await
    }

    /// List employees whose role starts with the given prefix.
    ///
    /// SQLite's LIKE is case-insensitive for ASCII, so the prefix is compared
    /// with substr() to keep the match case-sensitive.
    pub async fn find_by_role_prefix(&self, prefix: &str) -> Result<Vec<EmployeeRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, role, experience, working_status FROM employees \
             WHERE substr(role, 1, ?) = ? ORDER BY id",
        )
        .bind(prefix.chars().count() as i64)
        .bind(prefix)
        .fetch_all(&*self.pool)
        .await
    }

    /// Fetch one page of employees.
    ///
    /// `sort_by` must be one of the employee field names; anything else sorts
    /// by id. Column name and direction cannot be bound as parameters, so
    /// they are whitelisted into the query text.
    pub async fn find_page(
        &self,
        page_number: u32,
        page_size: u32,
        sort_by: &str,
        descending: bool,
    ) -> Result<Vec<EmployeeRow>, sqlx::Error> {
        let column = match sort_by {
            "id" => "id",
            "name" => "name",
            "role" => "role",
            "experience" => "experience",
            "workingStatus" => "working_status",
            other => {
                warn!("Unknown sort field '{}', sorting by id instead", other);
                "id"
            }
        };
        let direction = if descending { "DESC" } else { "ASC" };
        let offset = i64::from(page_number) * i64::from(page_size);

        let query = format!(
            "SELECT id, name, role, experience, working_status FROM employees \
             ORDER BY {} {} LIMIT ? OFFSET ?",
            column, direction
        );

        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&*self.pool)
            .await
    }

    /// Overwrite the four mutable fields of an existing employee.
    /// Returns true if a row was updated, false if the id does not exist.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        role: &str,
        experience: f64,
        working_status: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employees SET name = ?, role = ?, experience = ?, working_status = ? \
             WHERE id = ?",
        )
        .bind(name)
        .bind(role)
        .bind(experience)
        .bind(working_status)
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an employee by id.
    /// Returns true if a row was deleted, false if the id does not exist.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every employee
    pub async fn delete_all(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM employees")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    /// Number of employees in the store
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&*self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Setup a new test database for each test
    async fn setup_test() -> EmployeeStore {
        EmployeeStore::init_test()
            .await
            .expect("Failed to create test database")
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let store = setup_test().await;

        let created = store
            .insert("Alice", "Engineer", 3.0, true)
            .await
            .expect("Failed to insert employee");

        assert!(created.id > 0);
        assert_eq!(created.name, "Alice");

        let fetched = store
            .find_by_id(created.id)
            .await
            .expect("Failed to fetch employee");

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let store = setup_test().await;

        let result = store.find_by_id(42).await.expect("Query failed");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_increasing() {
        let store = setup_test().await;

        let first = store.insert("Alice", "Engineer", 3.0, true).await.unwrap();
        let second = store.insert("Bob", "Manager", 7.0, false).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_existing() {
        let store = setup_test().await;

        let created = store.insert("Alice", "Engineer", 3.0, true).await.unwrap();

        let updated = store
            .update(created.id, "Alice", "Senior Engineer", 4.0, true)
            .await
            .expect("Failed to update employee");
        assert!(updated);

        let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.role, "Senior Engineer");
        assert_eq!(fetched.experience, 4.0);
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let store = setup_test().await;

        let updated = store
            .update(99, "Nobody", "Ghost", 0.0, false)
            .await
            .expect("Update query failed");

        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = setup_test().await;

        let created = store.insert("Alice", "Engineer", 3.0, true).await.unwrap();

        let deleted = store
            .delete_by_id(created.id)
            .await
            .expect("Failed to delete employee");
        assert!(deleted, "Employee should have been deleted");

        let fetched = store.find_by_id(created.id).await.unwrap();
        assert!(fetched.is_none());

        // Deleting again should report that nothing was removed
        let deleted_again = store.delete_by_id(created.id).await.unwrap();
        assert!(!deleted_again);
    }

    #[tokio::test]
    async fn test_delete_all_and_count() {
        let store = setup_test().await;

        assert_eq!(store.count().await.unwrap(), 0);

        store.insert("Alice", "Engineer", 3.0, true).await.unwrap();
        store.insert("Bob", "Manager", 7.0, false).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        store.delete_all().await.expect("Failed to delete all");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_by_name_exact_match() {
        let store = setup_test().await;

        store.insert("Alice", "Engineer", 3.0, true).await.unwrap();
        store.insert("Alice", "Manager", 8.0, true).await.unwrap();
        store.insert("Alicia", "Engineer", 2.0, true).await.unwrap();

        let found = store.find_by_name("Alice").await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.name == "Alice"));
    }

    #[tokio::test]
    async fn test_find_by_working_status() {
        let store = setup_test().await;

        store.insert("Alice", "Engineer", 3.0, true).await.unwrap();
        store.insert("Bob", "Manager", 7.0, false).await.unwrap();
        store.insert("Carol", "Engineer", 5.0, true).await.unwrap();

        let working = store.find_by_working_status(true).await.unwrap();
        assert_eq!(working.len(), 2);

        let not_working = store.find_by_working_status(false).await.unwrap();
        assert_eq!(not_working.len(), 1);
        assert_eq!(not_working[0].name, "Bob");
    }

    #[tokio::test]
    async fn test_find_by_role_prefix_is_case_sensitive() {
        let store = setup_test().await;

        store.insert("Alice", "Engineer", 3.0, true).await.unwrap();
        store
            .insert("Bob", "engineering lead", 9.0, true)
            .await
            .unwrap();
        store.insert("Carol", "Engineer", 5.0, true).await.unwrap();

        let found = store.find_by_role_prefix("Eng").await.unwrap();

        // "engineering lead" starts with "eng", not "Eng"
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.role.starts_with("Eng")));

        let lower = store.find_by_role_prefix("eng").await.unwrap();
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].name, "Bob");
    }

    #[tokio::test]
    async fn test_find_page_ordering_and_offset() {
        let store = setup_test().await;

        store.insert("Carol", "Engineer", 5.0, true).await.unwrap();
        store.insert("Alice", "Manager", 3.0, true).await.unwrap();
        store.insert("Bob", "Director", 7.0, false).await.unwrap();

        // Sorted by name ascending, two per page
        let page = store.find_page(0, 2, "name", false).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Alice");
        assert_eq!(page[1].name, "Bob");

        let second_page = store.find_page(1, 2, "name", false).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].name, "Carol");

        // Descending by experience
        let by_experience = store.find_page(0, 3, "experience", true).await.unwrap();
        assert_eq!(by_experience[0].name, "Bob");
        assert_eq!(by_experience[2].name, "Alice");
    }

    #[tokio::test]
    async fn test_find_page_unknown_sort_field_falls_back_to_id() {
        let store = setup_test().await;

        store.insert("Carol", "Engineer", 5.0, true).await.unwrap();
        store.insert("Alice", "Manager", 3.0, true).await.unwrap();

        let page = store.find_page(0, 5, "nonsense", false).await.unwrap();

        assert_eq!(page.len(), 2);
        assert!(page[0].id < page[1].id);
    }

    #[tokio::test]
    async fn test_find_page_past_end_is_empty() {
        let store = setup_test().await;

        store.insert("Alice", "Engineer", 3.0, true).await.unwrap();

        let page = store.find_page(10, 5, "id", false).await.unwrap();

        assert!(page.is_empty());
    }
}
