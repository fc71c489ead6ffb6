//! Instance parser.

use std::io::Read;
use std::str::FromStr;

use thiserror::Error;

use crate::error::Result;
use crate::models::{Instance, Task};

/// Malformed instance text. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("instance is empty")]
    Empty,
    #[error("line {line}: expected header `n,p`, found {found} field(s)")]
    Header { line: usize, found: usize },
    #[error("line {line}: expected `index,duration,deadline[,pred...]`, found {found} field(s)")]
    MissingFields { line: usize, found: usize },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("header announces {expected} task(s), found {found}")]
    TaskCount { expected: usize, found: usize },
}

/// Raw parse result, before structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTasks {
    pub tasks: Vec<Task>,
    pub processors: usize,
}

/// Parses instance text without validating the graph.
///
/// Blank lines are skipped, fields are trimmed, and empty fields (such as a
/// trailing comma) are ignored.
pub fn parse_tasks(input: &str) -> std::result::Result<ParsedTasks, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (header_line, header) = lines.next().ok_or(ParseError::Empty)?;
    let fields = split_fields(header);
    if fields.len() != 2 {
        return Err(ParseError::Header {
            line: header_line,
            found: fields.len(),
        });
    }
    let expected: usize = number(header_line, "task count", fields[0])?;
    let processors: usize = number(header_line, "processor count", fields[1])?;

    let mut tasks = Vec::with_capacity(expected);
    for (line, text) in lines {
        let fields = split_fields(text);
        if fields.len() < 3 {
            return Err(ParseError::MissingFields {
                line,
                found: fields.len(),
            });
        }
        let id = number(line, "task index", fields[0])?;
        let duration = number(line, "duration", fields[1])?;
        let deadline = number(line, "deadline", fields[2])?;
        let predecessors = fields[3..]
            .iter()
            .map(|f| number(line, "predecessor", f))
            .collect::<std::result::Result<Vec<usize>, _>>()?;

        tasks.push(Task::new(id, duration, deadline).with_predecessors(predecessors));
    }

    if tasks.len() != expected {
        return Err(ParseError::TaskCount {
            expected,
            found: tasks.len(),
        });
    }

    Ok(ParsedTasks { tasks, processors })
}

/// Parses and validates an instance.
///
/// # Errors
/// [`Error::Parse`](crate::Error::Parse) for malformed text,
/// [`Error::Rejected`](crate::Error::Rejected) for structural problems.
///
/// # Example
/// ```
/// use u_tardiness::io::parse_instance;
///
/// let instance = parse_instance("3,1\n1,2,5\n2,3,4,1\n3,1,10\n").unwrap();
/// assert_eq!(instance.task_count(), 3);
/// assert_eq!(instance.graph.predecessors(2), &[1]);
///
/// assert!(parse_instance("2,1\n1,1,0,2\n2,1,0,1\n").is_err()); // cycle
/// ```
pub fn parse_instance(input: &str) -> Result<Instance> {
    let parsed = parse_tasks(input)?;
    Instance::new(parsed.tasks, parsed.processors)
}

/// Reads and validates an instance from a reader.
pub fn read_instance(mut reader: impl Read) -> Result<Instance> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_instance(&input)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

fn number<T: FromStr>(line: usize, field: &'static str, value: &str) -> std::result::Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
