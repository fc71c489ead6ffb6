//! Schedule formatters.

use std::fmt::Write as _;
use std::io::{self, Write};

use serde::Serialize;

use crate::models::Schedule;

/// Renders a schedule in the plain text format.
///
/// # Example
/// ```
/// use u_tardiness::io::format_plain;
/// use u_tardiness::models::{Assignment, Schedule};
///
/// let mut schedule = Schedule::with_processors(2);
/// schedule.add_assignment(Assignment::new(1, 0, 0, 2));
/// schedule.add_assignment(Assignment::new(2, 0, 2, 3));
///
/// assert_eq!(format_plain(&schedule), "2\n1,0\n2,2\n0\n");
/// ```
pub fn format_plain(schedule: &Schedule) -> String {
    let mut out = String::new();
    for processor in 0..schedule.processor_count {
        let assignments = schedule.assignments_for_processor(processor);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", assignments.len());
        for a in assignments {
            let _ = writeln!(out, "{},{}", a.task_id, a.start);
        }
    }
    out
}

/// Writes the plain text format to `writer`.
pub fn write_plain(schedule: &Schedule, mut writer: impl Write) -> io::Result<()> {
    writer.write_all(format_plain(schedule).as_bytes())?;
    writer.flush()
}

/// Pretty-printed JSON of any serializable report.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    fn schedule() -> Schedule {
        let mut s = Schedule::with_processors(3);
        s.add_assignment(Assignment::new(3, 0, 0, 1));
        s.add_assignment(Assignment::new(1, 0, 1, 4));
        s.add_assignment(Assignment::new(2, 2, 0, 5));
        s
    }

    #[test]
    fn test_plain_empty_processor_prints_zero() {
        assert_eq!(format_plain(&schedule()), "2\n3,0\n1,1\n0\n1\n2,0\n");
    }

    #[test]
    fn test_plain_no_processors() {
        assert_eq!(format_plain(&Schedule::default()), "");
    }

    #[test]
    fn test_write_plain() {
        let mut buf = Vec::new();
        write_plain(&schedule(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format_plain(&schedule()));
    }

    #[test]
    fn test_json_round_trip() {
        let json = format_json(&schedule()).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule());
    }
}
