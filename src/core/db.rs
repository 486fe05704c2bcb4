use sqlx::any::AnyRow;
use sqlx::{AnyConnection, Connection, FromRow, Row};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Database statement failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Failed to close the database connection: {0}")]
    Close(#[source] sqlx::Error),
}

/// A positional value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

/// Handle to the store.
///
/// Holds exactly one connection, opened at startup and shared by every
/// request. Statements run one at a time; user input is only ever passed
/// as a bound [`Param`], never spliced into the statement text.
pub struct Database {
    conn: Mutex<AnyConnection>,
}

impl Database {
    /// Opens the single connection. Accepts any URL the sqlx `Any` driver
    /// knows (`mysql://...` in production).
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        sqlx::any::install_default_drivers();

        let conn = AnyConnection::connect(url).await.map_err(DbError::Connect)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Runs a write statement and returns the number of affected rows.
    pub async fn execute(&self, sql: &str, params: &[Param]) -> Result<u64, DbError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                Param::Int(v) => query.bind(*v),
                Param::Text(v) => query.bind(v.clone()),
            };
        }

        let mut conn = self.conn.lock().await;
        let result = query.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    pub async fn fetch_all<T>(&self, sql: &str, params: &[Param]) -> Result<Vec<T>, DbError>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = match param {
                Param::Int(v) => query.bind(*v),
                Param::Text(v) => query.bind(v.clone()),
            };
        }

        let mut conn = self.conn.lock().await;
        Ok(query.fetch_all(&mut *conn).await?)
    }

    pub async fn fetch_optional<T>(&self, sql: &str, params: &[Param]) -> Result<Option<T>, DbError>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = match param {
                Param::Int(v) => query.bind(*v),
                Param::Text(v) => query.bind(v.clone()),
            };
        }

        let mut conn = self.conn.lock().await;
        Ok(query.fetch_optional(&mut *conn).await?)
    }

    /// Closes the connection. Called once the HTTP server has stopped.
    pub async fn close(self) -> Result<(), DbError> {
        self.conn.into_inner().close().await.map_err(DbError::Close)
    }
}

/// Reads a text column that MySQL may report as a blob (`TEXT` columns
/// arrive as `BLOB` through the `Any` driver). Blobs must be valid UTF-8.
pub fn text_column(row: &AnyRow, column: &str) -> Result<String, sqlx::Error> {
    match row.try_get::<String, _>(column) {
        Ok(text) => Ok(text),
        Err(sqlx::Error::ColumnDecode { .. }) => {
            let bytes: Vec<u8> = row.try_get(column)?;
            String::from_utf8(bytes).map_err(|e| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(e),
            })
        }
        Err(e) => Err(e),
    }
}

/// Builds a MySQL URL from its parts. The password is percent-encoded so
/// characters like `@` or `!` survive.
pub fn mysql_url(host: &str, user: &str, password: &str, database: &str) -> String {
    if password.is_empty() {
        format!("mysql://{}@{}/{}", urlencoding::encode(user), host, database)
    } else {
        format!(
            "mysql://{}:{}@{}/{}",
            urlencoding::encode(user),
            urlencoding::encode(password),
            host,
            database
        )
    }
}
