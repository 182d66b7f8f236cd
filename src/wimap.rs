use log::{debug, info, warn};

use county_choropleth::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use text_diff::print_diff;

pub mod config_reader;
pub mod io_boundary;
pub mod io_common;
pub mod io_json;
pub mod io_results;
pub mod io_svg;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MapError {
    #[snafu(display("Cannot open file {path}"))]
    FileNotFound {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Malformed boundary file {path}, line {line}: {message}"))]
    MalformedBoundary {
        path: String,
        line: usize,
        message: String,
    },
    #[snafu(display("Malformed results file {path}, line {line}: {message}"))]
    MalformedResults {
        path: String,
        line: usize,
        message: String,
    },
    #[snafu(display("Error reading CSV file {path}"))]
    CsvRead { source: csv::Error, path: String },
    #[snafu(display("Invalid map in {path}"))]
    InvalidMap { source: MapErrors, path: String },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading or writing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the map to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type MapResult<T> = Result<T, MapError>;

pub const DEFAULT_BOUNDARY_FILE: &str = "WI.txt";
pub const DEFAULT_RESULTS_FILE: &str = "WIGovernor2018.txt";
pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputType {
    Svg,
    Json,
}

impl OutputType {
    pub fn parse(s: &str) -> MapResult<OutputType> {
        match s {
            "svg" => Ok(OutputType::Svg),
            "json" => Ok(OutputType::Json),
            x => whatever!("Unknown output type {:?}: expected svg or json", x),
        }
    }
}

/// Everything needed to draw one map, after merging the configuration file and the
/// command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MapJob {
    pub map_name: String,
    pub boundary_path: String,
    pub results_path: String,
    pub width: u32,
    pub height: u32,
    pub output_type: OutputType,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub render_settings: RenderSettings,
}

impl Default for MapJob {
    fn default() -> Self {
        MapJob {
            map_name: DEFAULT_MAP_NAME.to_string(),
            boundary_path: DEFAULT_BOUNDARY_FILE.to_string(),
            results_path: DEFAULT_RESULTS_FILE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            output_type: OutputType::Svg,
            out: None,
            reference: None,
            render_settings: RenderSettings::DEFAULT_SETTINGS,
        }
    }
}

/// Renders the map for the size of the job and formats it.
pub fn draw_map(job: &MapJob, map: &BoundaryMap, results: &ResultsTable) -> MapResult<String> {
    let ops = render(job.width, job.height, map, results, &job.render_settings);
    debug!("draw_map: {} draw operations", ops.len());
    match job.output_type {
        OutputType::Svg => Ok(io_svg::draw_ops_to_svg(
            map.name(),
            job.width,
            job.height,
            &ops,
        )),
        OutputType::Json => {
            let js = io_json::draw_ops_to_json(map.name(), job.width, job.height, &ops);
            serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})
        }
    }
}

fn check_reference(reference_path: &str, output: &str) -> MapResult<()> {
    let reference = fs::read_to_string(reference_path).context(FileNotFoundSnafu {
        path: reference_path,
    })?;
    if reference.trim_end() != output.trim_end() {
        warn!("Found differences with the reference output");
        print_diff(reference.trim_end(), output.trim_end(), "\n");
        whatever!(
            "Difference detected between the map and the reference output {}",
            reference_path
        )
    }
    info!("The map matches the reference {}", reference_path);
    Ok(())
}

pub fn run_map(job: &MapJob) -> MapResult<()> {
    info!("job: {:?}", job);

    // Both files are loaded before anything gets drawn.
    let map = io_boundary::read_boundary_file(&job.boundary_path, &job.map_name)?;
    let results = io_results::read_results_file(&job.results_path)?;
    info!(
        "Loaded {} regions and {} results",
        map.regions().len(),
        results.len()
    );

    for name in referential_gaps(&map, &results) {
        warn!("No results found for county {:?}", name);
    }

    let output = draw_map(job, &map, &results)?;
    io_common::write_output(job.out.as_deref(), &output)?;

    if let Some(reference_path) = &job.reference {
        check_reference(reference_path, &output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn tiny_job(output_type: OutputType, reference: &str, out_name: &str) -> MapJob {
        let out = std::env::temp_dir().join(out_name);
        MapJob {
            boundary_path: test_data("tiny_map.txt"),
            results_path: test_data("tiny_results.txt"),
            width: 521,
            height: 521,
            output_type,
            out: Some(out.display().to_string()),
            reference: Some(test_data(reference)),
            ..MapJob::default()
        }
    }

    #[test]
    fn tiny_map_svg() {
        let job = tiny_job(OutputType::Svg, "tiny_expected.svg", "wimap_tiny_map.svg");
        let res = run_map(&job);
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn tiny_map_json() {
        let job = tiny_job(OutputType::Json, "tiny_expected.json", "wimap_tiny_map.json");
        let res = run_map(&job);
        assert!(res.is_ok(), "{:?}", res);
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let mut job = tiny_job(OutputType::Svg, "tiny_expected.svg", "wimap_resized.svg");
        job.width = 300;
        assert!(matches!(run_map(&job), Err(MapError::Whatever { .. })));
    }

    #[test]
    fn missing_boundary_file_fails_before_drawing() {
        let out = std::env::temp_dir().join("wimap_never_written.svg");
        let _ = fs::remove_file(&out);
        let job = MapJob {
            boundary_path: test_data("no_such_map.txt"),
            results_path: test_data("tiny_results.txt"),
            out: Some(out.display().to_string()),
            ..MapJob::default()
        };
        assert!(matches!(
            run_map(&job),
            Err(MapError::FileNotFound { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn unknown_output_type() {
        assert_eq!(OutputType::parse("json").ok(), Some(OutputType::Json));
        assert!(OutputType::parse("png").is_err());
    }
}
