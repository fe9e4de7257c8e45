mod from_row;
mod schema;
pub mod queries;

pub use schema::init_db;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state holding the database pool.
///
/// Built once at startup and injected into handlers through axum `State`;
/// there is no other shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
}

/// Create the connection pool without checking connectivity up front.
/// A store that is unreachable at startup surfaces as a per-request
/// persistence error rather than aborting the process.
pub fn create_pool(database_path: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_path);
    Pool::builder().max_size(10).build_unchecked(manager)
}
