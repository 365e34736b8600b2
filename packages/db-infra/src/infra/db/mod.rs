pub mod core;
pub mod locking;

pub use core::{build_admin_pool, connect, orchestrate_migration, run_migration_on};
pub use locking::{pg_lock_id, with_pg_advisory_lock};
