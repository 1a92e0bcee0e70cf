use diesel::result;
use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, deadpool};

/// Handle to the connection pool. Cheap to clone; one is constructed at
/// startup and passed down to every repo through the application state.
#[derive(Clone)]
pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    pub fn connect(database_url: &str) -> Result<Self, deadpool::BuildError> {
        let config = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
        let pool = Pool::builder(config).build()?;

        tracing::info!("DB connection pool created");

        Ok(Database { pool })
    }

    /// Checks out a pooled connection, mapping pool failures onto the diesel
    /// error type so repo signatures stay uniform.
    pub async fn conn(&self) -> Result<Object<AsyncMysqlConnection>, result::Error> {
        self.pool.get().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })
    }
}
