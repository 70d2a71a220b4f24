//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `projects` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Project::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Upsert overwrites the full record for an existing owner account.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::project::{Project, ProjectValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    owner_account,
    name,
    description,
    total_amount,
    completed
FROM projects";

const REQUIRED_COLUMNS: &[&str] = &[
    "owner_account",
    "name",
    "description",
    "total_amount",
    "completed",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProjectValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    /// Inserts or fully replaces the record for `project.owner_account`.
    fn upsert_project(&self, project: &Project) -> RepoResult<()>;
    /// Returns the record for `account`, or `None` when absent.
    fn get_project(&self, account: &str) -> RepoResult<Option<Project>>;
    /// Returns a snapshot of all records, ordered by owner account.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Deletes the record for `account`; returns whether a row was removed.
    fn delete_project(&self, account: &str) -> RepoResult<bool>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Wraps a migrated connection after verifying the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration known by this binary.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   disagrees with this binary's expectations.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn upsert_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                owner_account,
                name,
                description,
                total_amount,
                completed
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(owner_account) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                total_amount = excluded.total_amount,
                completed = excluded.completed,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                project.owner_account.as_str(),
                project.name.as_str(),
                project.description.as_str(),
                i64::from(project.total_amount),
                bool_to_int(project.completed),
            ],
        )?;

        Ok(())
    }

    fn get_project(&self, account: &str) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE owner_account = ?1;"))?;

        let mut rows = stmt.query(params![account])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY owner_account ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_project(&self, account: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE owner_account = ?1;", [account])?;

        Ok(changed > 0)
    }
}

fn verify_schema(conn: &Connection) -> RepoResult<()> {
    let actual_version =
        conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected_version = latest_version();

    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'projects';",
        [],
        |row| row.get::<_, i64>(0),
    )? > 0;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable("projects"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('projects');")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }

    for column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "projects",
                column,
            });
        }
    }

    Ok(())
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let total_amount_raw: i64 = row.get("total_amount")?;
    let total_amount = u32::try_from(total_amount_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid total_amount value `{total_amount_raw}` in projects.total_amount"
        ))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in projects.completed"
            )));
        }
    };

    let project = Project {
        owner_account: row.get("owner_account")?,
        name: row.get("name")?,
        description: row.get("description")?,
        total_amount,
        completed,
    };
    project.validate()?;
    Ok(project)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
