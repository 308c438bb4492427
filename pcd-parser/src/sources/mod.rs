use std::path::Path;

use pcd_core::pointcloud::bounds::Bounds;
use pcd_core::pointcloud::point::PointCloud;

use crate::error::SourceError;

pub mod csv;
pub mod las;
pub mod txt;

/// A file format the coordinate data can be read from.
pub trait PointSource {
    /// Full decode of all point coordinates in the file.
    fn read_coordinates(&self, path: &Path) -> Result<PointCloud, SourceError>;

    /// Bounds of the file's contents. LAS reads these from the header
    /// without decoding points; headerless formats fall back to a full
    /// read.
    fn read_bounds(&self, path: &Path) -> Result<Bounds, SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Las,
    Laz,
    Csv,
    Txt,
}

pub fn get_extension(ext: &str) -> Option<Extension> {
    match ext.to_ascii_lowercase().as_str() {
        "las" => Some(Extension::Las),
        "laz" => Some(Extension::Laz),
        "csv" => Some(Extension::Csv),
        "txt" | "xyz" => Some(Extension::Txt),
        _ => None,
    }
}

pub fn source_for(extension: Extension) -> Box<dyn PointSource + Send + Sync> {
    match extension {
        Extension::Las | Extension::Laz => Box::new(las::LasSource),
        Extension::Csv => Box::new(csv::CsvSource),
        Extension::Txt => Box::new(txt::TextSource),
    }
}
