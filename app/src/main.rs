use std::ffi::OsStr;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;

use pcd_core::pointcloud::bounds::{Axis, Bounds};
use pcd_core::pointcloud::point::PointCloud;
use pcd_core::pointcloud::sampling::sampler::{RandomSampler, Sampler as _};
use pcd_exporter::las::write_las;
use pcd_exporter::txt::write_txt;
use pcd_parser::loader::{self, LoadOptions};
use pcd_parser::sources::{get_extension, source_for, Extension};

#[derive(Parser, Debug)]
#[command(
    name = "Point Clip",
    about = "A tool for cropping, splitting and merging point cloud files",
    version = "0.0.1"
)]
struct Cli {
    /// Input files; glob patterns are expanded
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    /// Output file; the extension selects the format (las, laz, txt)
    #[arg(short, long, required = true, value_name = "FILE")]
    output: String,

    /// Lower crop bound on x (inclusive)
    #[arg(long, value_name = "COORD")]
    min_x: Option<f64>,

    /// Lower crop bound on y (inclusive)
    #[arg(long, value_name = "COORD")]
    min_y: Option<f64>,

    /// Lower crop bound on z (inclusive)
    #[arg(long, value_name = "COORD")]
    min_z: Option<f64>,

    /// Upper crop bound on x (exclusive)
    #[arg(long, value_name = "COORD")]
    max_x: Option<f64>,

    /// Upper crop bound on y (exclusive)
    #[arg(long, value_name = "COORD")]
    max_y: Option<f64>,

    /// Upper crop bound on z (exclusive)
    #[arg(long, value_name = "COORD")]
    max_z: Option<f64>,

    /// Allow a crop that keeps no points
    #[arg(long)]
    allow_empty: bool,

    /// Randomly downsample to this many points before export
    #[arg(long, value_name = "N")]
    downsample: Option<usize>,

    /// Seed for deterministic downsampling
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Split along this axis (x, y or z) at the --split-at locations
    #[arg(long, value_name = "AXIS")]
    split_axis: Option<Axis>,

    /// Split locations along --split-axis
    #[arg(long, num_args = 1.., value_name = "COORD")]
    split_at: Vec<f64>,
}

fn expand_globs(input_patterns: Vec<String>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob(&pattern).expect("Failed to read glob pattern") {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => eprintln!("Error: {:?}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    paths
}

fn check_and_get_extension(paths: &[PathBuf]) -> Result<Extension, String> {
    if paths.is_empty() {
        return Err("No input files found".to_string());
    }

    let mut extensions = vec![];
    for path in paths.iter() {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) => extensions.push(ext.to_ascii_lowercase()),
            None => return Err("File extension is not found".to_string()),
        }
    }
    extensions.sort();
    extensions.dedup();

    if extensions.len() > 1 {
        return Err("Multiple extensions are not supported".to_string());
    }

    get_extension(&extensions[0]).ok_or_else(|| format!("Unsupported extension: {}", extensions[0]))
}

fn bounds_from_args(args: &Cli) -> Option<Bounds> {
    let sides = [
        args.min_x, args.min_y, args.min_z, args.max_x, args.max_y, args.max_z,
    ];
    if sides.iter().all(Option::is_none) {
        return None;
    }
    Some(Bounds::new(
        args.min_x, args.min_y, args.min_z, args.max_x, args.max_y, args.max_z,
    ))
}

fn write_output(path: &Path, cloud: &PointCloud) -> Result<(), String> {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .ok_or("Output extension is not found")?;
    match get_extension(ext) {
        Some(Extension::Las) | Some(Extension::Laz) => {
            write_las(path, cloud).map_err(|e| e.to_string())
        }
        Some(Extension::Txt) => write_txt(path, cloud).map_err(|e| e.to_string()),
        Some(Extension::Csv) | None => Err(format!("Unsupported output format: {}", ext)),
    }
}

fn segment_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("segment");
    match output.extension().and_then(OsStr::to_str) {
        Some(ext) => output.with_file_name(format!("{}_{:03}.{}", stem, index, ext)),
        None => output.with_file_name(format!("{}_{:03}", stem, index)),
    }
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    log::info!("input files: {:?}", args.input);
    log::info!("output file: {}", args.output);

    let start = Instant::now();

    log::info!("start processing...");
    let input_files = expand_globs(args.input.clone());
    log::info!("Expanded input files: {:?}", input_files);

    let extension = match check_and_get_extension(&input_files) {
        Ok(extension) => extension,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    let source = source_for(extension);

    if !args.split_at.is_empty() && args.split_axis.is_none() {
        log::error!("Argument --split-at requires --split-axis");
        return;
    }

    let options = LoadOptions {
        bounds: bounds_from_args(&args),
        allow_empty: args.allow_empty.then_some(true),
    };

    log::info!("start loading...");
    let start_local = Instant::now();
    let mut cloud = match loader::load(source.as_ref(), &input_files, &options) {
        Ok(cloud) => cloud,
        Err(e) => {
            log::error!("Failed to load point cloud: {}", e);
            return;
        }
    };
    log::info!(
        "finish loading {} points in {:?}",
        cloud.len(),
        start_local.elapsed()
    );

    if let Some(n) = args.downsample {
        let start_local = Instant::now();
        let mut sampler = match args.seed {
            Some(seed) => RandomSampler::from_seed(seed),
            None => RandomSampler::from_entropy(),
        };
        cloud = sampler.sample(&cloud, n);
        log::info!(
            "downsampled to {} points in {:?}",
            cloud.len(),
            start_local.elapsed()
        );
    }

    let output_path = PathBuf::from(&args.output);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::error!("Failed to create output folder: {}", e);
                return;
            }
        }
    }

    if let Some(axis) = args.split_axis {
        log::info!("start splitting along {} at {:?}...", axis, args.split_at);
        let start_local = Instant::now();
        let segments = match cloud.split(axis, &args.split_at, true) {
            Ok(segments) => segments,
            Err(e) => {
                log::error!("Failed to split point cloud: {}", e);
                return;
            }
        };
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                log::info!("segment {} is empty, skipping", index);
                continue;
            }
            let path = segment_path(&output_path, index);
            if let Err(e) = write_output(&path, segment) {
                log::error!("{}", e);
                return;
            }
            log::info!("wrote {} points to {:?}", segment.len(), path);
        }
        log::info!("Finish splitting in {:?}", start_local.elapsed());
    } else {
        if let Err(e) = write_output(&output_path, &cloud) {
            log::error!("{}", e);
            return;
        }
        log::info!("wrote {} points to {:?}", cloud.len(), output_path);
    }

    log::info!("Elapsed: {:?}", start.elapsed());
    log::info!("Finish processing");
}
