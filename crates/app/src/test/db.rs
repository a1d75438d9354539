//! Per-test PostgreSQL databases on a shared container.

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

use crate::database;

const TEST_USER: &str = "promoradar_test";
const TEST_PASSWORD: &str = "promoradar_test_password";

static DATABASE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Shared PostgreSQL container, started on first use.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Names of databases waiting to be dropped.
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Only names this module generates are ever interpolated into DDL.
fn is_generated_database_name(name: &str) -> bool {
    name.starts_with("promoradar_test_")
        && name.len() <= 63
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn container_host() -> String {
    std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string())
}

fn database_url(host: &str, port: u16, db_name: &str) -> String {
    format!("postgresql://{TEST_USER}:{TEST_PASSWORD}@{host}:{port}/{db_name}")
}

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(TEST_USER)
        .with_password(TEST_PASSWORD)
        .with_db_name("promoradar_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = drop_database(&db_name).await {
                eprintln!("Failed to drop test database '{db_name}': {err}");
            }
        }
    });

    sender
}

async fn drop_database(db_name: &str) -> Result<(), sqlx::Error> {
    if !is_generated_database_name(db_name) {
        return Ok(());
    }

    let Some(container) = POSTGRES_CONTAINER.get() else {
        return Ok(());
    };

    let Ok(port) = container.get_host_port_ipv4(5432).await else {
        return Ok(());
    };

    let mut conn = PgConnection::connect(&database_url(&container_host(), port, "postgres")).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database owned by one test.
///
/// Services commit their own transactions, so isolation comes from every
/// test getting its own database. The database is dropped in the background
/// once the `TestDb` goes out of scope.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let _cleanup_sender = CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        let counter = DATABASE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!(
            "promoradar_test_{}_{counter}",
            uuid::Uuid::now_v7().simple()
        );

        let container = POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host = container_host();

        let mut conn = PgConnection::connect(&database_url(&host, port, "postgres"))
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&database_url(&host, port, &name))
            .await
            .expect("Failed to create pool for test database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_generated_names_are_dropped() {
        assert!(is_generated_database_name("promoradar_test_0192abcd_3"));
        assert!(!is_generated_database_name("postgres"));
        assert!(!is_generated_database_name("promoradar_test_\"; DROP"));
        assert!(!is_generated_database_name(&format!(
            "promoradar_test_{}",
            "a".repeat(60)
        )));
    }

    #[tokio::test]
    async fn migrated_database_accepts_queries() {
        let test_db = TestDb::new().await;

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to query users table");

        assert_eq!(users, 0);
    }
}
