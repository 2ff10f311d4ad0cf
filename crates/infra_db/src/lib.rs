//! SQLite storage for the back office
//!
//! The domain storage ports land here, one repository per table family, so
//! SQL and row mapping never leak into the domain crates.
//!
//! Storage conventions, relied on by every repository:
//!
//! - identifiers are bare UUID text, without the display prefix
//! - money is integer paise
//! - enumerations keep their wire spelling (`Cash`, `1st`, `A`)
//!
//! Typical startup order:
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, SqliteStudentDirectory, MIGRATOR};
//!
//! let pool = create_pool_from_url("sqlite://backoffice.db").await?;
//! MIGRATOR.run(&pool).await?;
//! let directory = SqliteStudentDirectory::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{SqliteBillingStore, SqliteFundStore, SqliteStudentDirectory};

/// Embedded schema migrations, applied at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
