//! Anytime branch-and-bound for total tardiness on identical processors.
//!
//! Tasks with durations, deadlines, and precedence edges are placed on `p`
//! identical processors so that the sum of `max(0, end - deadline)` is
//! minimal. A greedy list schedule seeds the incumbent, then a depth-first
//! search improves it until the space is exhausted or the time budget runs
//! out. Whatever happens, the result is a complete, valid schedule.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskGraph`, `Instance`,
//!   `ScheduleState`, `Schedule`
//! - **`validation`**: Input integrity checks (ids, durations, DAG cycles)
//!   and schedule verification
//! - **`dispatching`**: Priority rules and the rule engine used to order candidates
//! - **`heuristics`**: Topological layering and the lookahead check
//! - **`scheduler`**: Greedy baseline and schedule KPIs
//! - **`search`**: The branch-and-bound engine, its config and cutoffs
//! - **`io`**: Instance parser and schedule formatters
//! - **`generator`**: Seeded random instances
//!
//! # Example
//!
//! ```
//! use u_tardiness::io::{format_plain, parse_instance};
//! use u_tardiness::search::{solve, SearchConfig};
//!
//! let instance = parse_instance("2,2\n1,1,0\n2,1,0\n").unwrap();
//! let outcome = solve(&instance, SearchConfig::default());
//! assert_eq!(outcome.cost, 2);
//! assert_eq!(format_plain(&outcome.schedule), "1\n1,0\n1\n2,0\n");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod dispatching;
pub mod error;
pub mod generator;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod validation;

pub use error::{Error, Result};
