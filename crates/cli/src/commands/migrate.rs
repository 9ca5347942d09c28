use crate::commands::{with_catalog_pool, CommandResult, Failure};

/// Connecting applies pending migrations, so there is nothing left to do once the pool is up.
pub fn run() -> CommandResult {
    match with_catalog_pool("migrate", |_pool| async { Ok::<(), Failure>(()) }) {
        Ok(()) => CommandResult::success("migrate", "applied pending migrations"),
        Err(failure) => failure,
    }
}
