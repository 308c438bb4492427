use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use pcd_core::pointcloud::bounds::Bounds;
use pcd_core::pointcloud::point::PointCloud;

use crate::error::SourceError;

use super::PointSource;

/// Comma-separated coordinate columns, with or without a header row.
///
/// A header row is mapped by column name; a headerless file is read
/// positionally as x, y, z.
pub struct CsvSource;

fn csv_error(path: &Path, source: csv::Error) -> SourceError {
    SourceError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn malformed(path: &Path, line: usize) -> SourceError {
    SourceError::MalformedRecord {
        path: path.to_path_buf(),
        line,
    }
}

/// Column indices for x, y and z, mapped by (normalized) header name.
fn create_field_mapping(headers: &StringRecord) -> Result<[usize; 3], &'static str> {
    let mut mapping: [Option<usize>; 3] = [None; 3];
    for (index, header) in headers.iter().enumerate() {
        let slot = match header.trim().to_lowercase().as_str() {
            "x" => 0,
            "y" => 1,
            "z" => 2,
            _ => continue,
        };
        if mapping[slot].is_none() {
            mapping[slot] = Some(index);
        }
    }
    match mapping {
        [Some(x), Some(y), Some(z)] => Ok([x, y, z]),
        [None, _, _] => Err("x"),
        [_, None, _] => Err("y"),
        [_, _, None] => Err("z"),
    }
}

fn parse_record(
    record: &StringRecord,
    mapping: [usize; 3],
    path: &Path,
    line: usize,
) -> Result<[f64; 3], SourceError> {
    let mut coords = [0.0; 3];
    for (slot, &index) in coords.iter_mut().zip(mapping.iter()) {
        let field = record.get(index).ok_or_else(|| malformed(path, line))?;
        *slot = field.trim().parse().map_err(|_| malformed(path, line))?;
    }
    Ok(coords)
}

impl PointSource for CsvSource {
    fn read_coordinates(&self, path: &Path) -> Result<PointCloud, SourceError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| csv_error(path, e))?;
        let mut records = reader.records();

        let mut cloud = PointCloud::empty();
        let mapping = match records.next() {
            None => return Ok(cloud),
            Some(first) => {
                let first = first.map_err(|e| csv_error(path, e))?;
                match parse_record(&first, [0, 1, 2], path, 1) {
                    Ok([x, y, z]) => {
                        // Headerless file: the first row is data.
                        cloud.push(x, y, z);
                        [0, 1, 2]
                    }
                    Err(_) => create_field_mapping(&first).map_err(|column| {
                        SourceError::MissingColumn {
                            path: path.to_path_buf(),
                            column,
                        }
                    })?,
                }
            }
        };

        for (index, record) in records.enumerate() {
            let record = record.map_err(|e| csv_error(path, e))?;
            let [x, y, z] = parse_record(&record, mapping, path, index + 2)?;
            cloud.push(x, y, z);
        }
        Ok(cloud)
    }

    fn read_bounds(&self, path: &Path) -> Result<Bounds, SourceError> {
        let bounds = self.read_coordinates(path)?.bounds()?;
        Ok(bounds)
    }
}
