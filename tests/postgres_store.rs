//! Store contract checks against `PostgreSQL`.
//!
//! Set `TASKBOARD_TEST_DATABASE_URL` to a scratch database to run these;
//! without it every test returns early. The board tables are created on
//! first use and left in place.

mod store_contract;

use std::sync::OnceLock;

use diesel::connection::SimpleConnection;
use eyre::{WrapErr, eyre};
use taskboard::board::adapters::postgres::{
    CREATE_BOARD_TABLES_SQL, PostgresBoardStore, build_pool,
};

const DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

static SCHEMA: OnceLock<Result<(), String>> = OnceLock::new();

/// Connects to the test database, creating the tables once per process.
///
/// Returns `None` when no test database is configured.
async fn store() -> Result<Option<PostgresBoardStore>, eyre::Report> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        tracing::warn!("{DATABASE_URL_ENV} unset; skipping PostgreSQL test");
        return Ok(None);
    };
    tokio::task::spawn_blocking(move || -> Result<PostgresBoardStore, eyre::Report> {
        let pool = build_pool(&url, 4).wrap_err("connect to test database")?;
        SCHEMA
            .get_or_init(|| {
                let mut connection = pool.get().map_err(|err| err.to_string())?;
                connection
                    .batch_execute(CREATE_BOARD_TABLES_SQL)
                    .map_err(|err| err.to_string())
            })
            .clone()
            .map_err(|err| eyre!("create board tables: {err}"))?;
        Ok(PostgresBoardStore::new(pool))
    })
    .await?
    .map(Some)
}

macro_rules! postgres_contract {
    ($($name:ident),+ $(,)?) => {
        $(
            #[tokio::test(flavor = "multi_thread")]
            async fn $name() -> Result<(), eyre::Report> {
                let Some(store) = store().await? else {
                    return Ok(());
                };
                store_contract::$name(&store).await
            }
        )+
    };
}

postgres_contract!(
    stored_task_round_trips,
    duplicate_task_is_rejected,
    missing_task_is_not_found,
    reposition_shifts_only_column_peers,
    reposition_into_other_column,
    list_is_owner_scoped,
    tag_associations_follow_tasks_and_tags,
    deleting_task_keeps_tags,
);
