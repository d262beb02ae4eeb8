use crate::point::Point;
use std::io::{self, Write};

/// One line of the assignment report
pub fn format_assignment(point: &Point, label: i64) -> String {
    format!("Point {} assigned to cluster {}", point, label)
}

/// Write an `Assignments:` header followed by one line per point
pub fn write_report<W: Write>(
    writer: &mut W,
    points: &[Point],
    labels: &[i64],
) -> io::Result<()> {
    writeln!(writer, "Assignments:")?;
    for (point, &label) in points.iter().zip(labels) {
        writeln!(writer, "{}", format_assignment(point, label))?;
    }
    Ok(())
}
