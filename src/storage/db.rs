use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

use crate::config::DatabaseConfig;
use crate::entities::{label, status, task, task_label, user};

/// Database handle shared by all request handlers
#[derive(Clone, Debug)]
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Connect to the configured database and create missing tables
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());

        // Every connection to an in-memory SQLite database sees its own empty database
        let max_connections = if config.is_in_memory() { 1 } else { config.max_connections };
        options
            .max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", config.url))?;

        let storage = Storage { conn };
        storage.init_schema().await?;
        log::info!("Database ready ({} connection(s) max)", max_connections);

        Ok(storage)
    }

    /// Private in-memory database, used by tests and throwaway runs
    pub async fn in_memory() -> Result<Self> {
        Self::new(&DatabaseConfig::in_memory()).await
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        // Referenced tables first so foreign keys resolve
        self.create_table(user::Entity).await?;
        self.create_table(status::Entity).await?;
        self.create_table(label::Entity).await?;
        self.create_table(task::Entity).await?;
        self.create_table(task_label::Entity).await?;
        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);
        let table = entity.table_name().to_owned();

        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();

        self.conn
            .execute(backend.build(&statement))
            .await
            .with_context(|| format!("Failed to create table {}", table))?;
        Ok(())
    }
}
