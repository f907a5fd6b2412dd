//! # Planner Core Library
//!
//! Task scheduling with compact repeat rules and a SQLite task store.
//!
//! ## Repeat rules
//!
//! - `d <n>`: every `n` days, `1 <= n <= 399`
//! - `y`: every year on the same month and day
//! - `w <days>`: on the listed weekdays, `1` = Monday through `7` = Sunday
//! - `m <days> [months]`: on the listed days of the month (`-1` last day,
//!   `-2` the day before), optionally only in the listed months
//!
//! ## Core Modules
//!
//! - [`date`]: `YYYYMMDD` calendar dates
//! - [`rule`]: repeat rule parsing
//! - [`recurrence`]: next occurrence search
//! - [`schedule`]: date policy for submitted and completed tasks
//! - [`db`]: database connection and migration management
//! - [`models`]: task data structures
//! - [`repository`]: data access layer
//! - [`service`]: task operations built on the repository and the engine
//! - [`query`]: search input parsing
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use planner_core::{date::Date, rule, recurrence::next_occurrence};
//!
//! let anchor: Date = "20240113".parse().unwrap();
//! let now: Date = "20240126".parse().unwrap();
//! let next = next_occurrence(anchor, now, &rule::parse("d 7").unwrap()).unwrap();
//! assert_eq!(next.to_string(), "20240127");
//! ```
//!
//! ```rust,no_run
//! use planner_core::{db, models::NewTaskData, repository::SqliteRepository, service::TaskService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let service = TaskService::new(SqliteRepository::new(pool));
//!
//!     let draft = NewTaskData {
//!         title: "Water the plants".to_string(),
//!         repeat: "w 1,4".to_string(),
//!         ..Default::default()
//!     };
//!     let task = service.add_task(draft, "20240126".parse()?).await?;
//!     println!("Created task {} due {}", task.id, task.date);
//!
//!     Ok(())
//! }
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod recurrence;
pub mod repository;
pub mod rule;
pub mod schedule;
pub mod service;
