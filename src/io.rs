//! Text boundary: headerless CSV points in, fixed-precision matrices out.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;
use ndarray::Array2;

use crate::cluster::util;
use crate::error::Result;
use crate::pipeline::Comparison;

/// Decimal places of every printed value.
pub const PRECISION: usize = 4;

/// Load points from a headerless comma-separated file, one point per row.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let path = path.as_ref();
    let points = read_points(File::open(path)?)?;
    debug!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parse points from any reader; rows must be non-empty, of equal length, and finite.
pub fn read_points<R: Read>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = Vec::with_capacity(record.len());
        for field in record.iter() {
            row.push(field.parse::<f64>()?);
        }
        points.push(row);
    }

    util::check_points(&points)?;
    Ok(points)
}

/// One line per row, values joined by commas, each with [`PRECISION`] decimals.
pub fn format_matrix(m: &Array2<f64>) -> String {
    let mut out = String::new();
    for row in m.rows() {
        for (j, v) in row.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            let _ = write!(out, "{:.*}", PRECISION, v);
        }
        out.push('\n');
    }
    out
}

/// The two score lines of the comparison tool.
pub fn format_scores(cmp: &Comparison) -> String {
    format!(
        "nmf: {:.p$}\nkmeans: {:.p$}\n",
        cmp.nmf,
        cmp.kmeans,
        p = PRECISION
    )
}
