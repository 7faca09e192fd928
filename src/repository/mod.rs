mod conversion;
mod profile_repository;
mod vouch_repository;

pub use profile_repository::{ProfileRepository, WithdrawResult};
pub use vouch_repository::{AddVouchResult, VouchRepository};

#[cfg(test)]
pub(crate) async fn memory_pool() -> sqlx::SqlitePool {
    use sqlx::sqlite::SqlitePoolOptions;

    // Every connection to `sqlite::memory:` opens a separate database, so keep exactly one alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("In-memory database should open");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Migrations should apply to a fresh database");

    pool
}
