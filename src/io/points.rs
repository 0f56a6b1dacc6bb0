//! Headerless CSV reader/writer for tagged point sets.
//!
//! Column layout is `[tag, y, x, ...passthrough]` with Y before X, the order
//! every downstream consumer expects. Reading is total per row: either tag,
//! y, and x all parse or the row is rejected with its 1-based row number.
//! Nothing is silently dropped and no NaN ever enters a point set.
use std::io::{Read, Write};
use std::path::Path;

use crate::core::transform::TaggedPoint;
use crate::error::{Error, Result};

fn parse_coordinate(row: usize, value: &str) -> Result<f64> {
    let parsed: f64 = value.trim().parse().map_err(|_| Error::Parse {
        row,
        value: value.to_string(),
    })?;
    // "NaN" and "inf" satisfy f64::from_str but are not coordinates.
    if !parsed.is_finite() {
        return Err(Error::Parse {
            row,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn parse_record(row: usize, record: &csv::StringRecord) -> Result<TaggedPoint> {
    if record.len() < 3 {
        return Err(Error::RowArity {
            row,
            got: record.len(),
        });
    }
    Ok(TaggedPoint {
        tag: record[0].trim().to_string(),
        y: parse_coordinate(row, &record[1])?,
        x: parse_coordinate(row, &record[2])?,
        extra: record.iter().skip(3).map(|c| c.trim().to_string()).collect(),
    })
}

/// Read a point set from any reader.
pub fn read_point_set_from<R: Read>(reader: R) -> Result<Vec<TaggedPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut points = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        points.push(parse_record(idx + 1, &record)?);
    }
    Ok(points)
}

/// Read a point set from a headerless CSV file.
pub fn read_point_set(path: &Path) -> Result<Vec<TaggedPoint>> {
    let file = std::fs::File::open(path)?;
    read_point_set_from(file)
}

/// Write a point set to any writer, `[tag, y, x, ...extra]` per row.
pub fn write_point_set_to<W: Write>(writer: W, points: &[TaggedPoint]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    for p in points {
        let mut record = csv::StringRecord::new();
        record.push_field(&p.tag);
        record.push_field(&p.y.to_string());
        record.push_field(&p.x.to_string());
        for cell in &p.extra {
            record.push_field(cell);
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a point set to a headerless CSV file.
pub fn write_point_set(path: &Path, points: &[TaggedPoint]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_point_set_to(file, points)
}
