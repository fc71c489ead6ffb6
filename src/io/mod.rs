//! Text adapters around the core: instance parsing and schedule output.
//!
//! # Instance format
//!
//! ```text
//! n,p
//! index,duration,deadline[,pred...]   (n lines)
//! ```
//!
//! # Plain output format
//!
//! For every processor: a line with its task count, then one
//! `task,start` line per task in scheduling order. An idle processor
//! prints a single `0`.

mod format;
mod parse;

pub use format::{format_json, format_plain, write_plain};
pub use parse::{parse_instance, parse_tasks, read_instance, ParseError, ParsedTasks};
