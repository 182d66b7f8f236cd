use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::args::Args;
use crate::wimap::io_common::resolve_path;
use crate::wimap::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(rename = "outputType")]
    pub output_type: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    pub margin: Option<u32>,
    #[serde(rename = "halfMargin")]
    pub half_margin: Option<u32>,
    #[serde(rename = "outlineColor")]
    pub outline_color: Option<String>,
    #[serde(rename = "noVotesColor")]
    pub no_votes_color: Option<String>,
    #[serde(rename = "missingResultsColor")]
    pub missing_results_color: Option<String>,
}

impl RenderConfig {
    pub fn render_settings(&self) -> MapResult<RenderSettings> {
        let defaults = RenderSettings::DEFAULT_SETTINGS;
        Ok(RenderSettings {
            margin: self.margin.unwrap_or(defaults.margin),
            half_margin: self.half_margin.unwrap_or(defaults.half_margin),
            outline_color: read_color(&self.outline_color, defaults.outline_color)?,
            no_votes_color: read_color(&self.no_votes_color, defaults.no_votes_color)?,
            missing_results_color: read_color(
                &self.missing_results_color,
                defaults.missing_results_color,
            )?,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapConfig {
    #[serde(rename = "mapName")]
    pub map_name: Option<String>,
    #[serde(rename = "boundaryFile")]
    pub boundary_file: Option<String>,
    #[serde(rename = "resultsFile")]
    pub results_file: Option<String>,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "renderSettings", default)]
    pub render_settings: RenderConfig,
}

fn read_color(x: &Option<String>, default: Rgb) -> MapResult<Rgb> {
    match x {
        None => Ok(default),
        Some(s) => match Rgb::from_hex(s) {
            Some(c) => Ok(c),
            None => whatever!("Cannot read color {:?}: expected #rrggbb", s),
        },
    }
}

pub fn read_config(path: &str) -> MapResult<MapConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: MapConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Merges the command line with the configuration file (if any) and the defaults, in
/// this order of precedence.
pub fn build_job(args: &Args) -> MapResult<MapJob> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            info!("Reading configuration {:?}", config_path);
            let config = read_config(config_path)?;
            (config, Path::new(config_path).parent())
        }
        None => (MapConfig::default(), None),
    };
    job_from_config(args, &config, root)
}

pub fn job_from_config(args: &Args, config: &MapConfig, root: Option<&Path>) -> MapResult<MapJob> {
    let defaults = MapJob::default();
    let from_config = |file: &Option<String>| file.as_deref().map(|f| resolve_path(root, f));
    let output = &config.output_settings;

    let output_type = match args
        .output_type
        .as_deref()
        .or(output.output_type.as_deref())
    {
        Some(s) => OutputType::parse(s)?,
        None => defaults.output_type,
    };

    Ok(MapJob {
        map_name: config.map_name.clone().unwrap_or(defaults.map_name),
        boundary_path: args
            .boundaries
            .clone()
            .or_else(|| from_config(&config.boundary_file))
            .unwrap_or(defaults.boundary_path),
        results_path: args
            .results
            .clone()
            .or_else(|| from_config(&config.results_file))
            .unwrap_or(defaults.results_path),
        width: args.width.or(output.width).unwrap_or(defaults.width),
        height: args.height.or(output.height).unwrap_or(defaults.height),
        output_type,
        out: args.out.clone().or_else(|| from_config(&output.output_file)),
        reference: args.reference.clone(),
        render_settings: config.render_settings.render_settings()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(cmd: &[&str]) -> Args {
        let mut full = vec!["wimap"];
        full.extend_from_slice(cmd);
        Args::parse_from(full)
    }

    #[test]
    fn defaults_without_config() {
        let job = build_job(&args(&[])).unwrap();
        assert_eq!(job, MapJob::default());
        assert_eq!(job.boundary_path, "WI.txt");
        assert_eq!(job.results_path, "WIGovernor2018.txt");
        assert_eq!((job.width, job.height), (500, 500));
    }

    #[test]
    fn command_line_wins_over_config() {
        let config: MapConfig = serde_json::from_str(
            r##"{
                "mapName": "Governor 2018",
                "boundaryFile": "WI.txt",
                "resultsFile": "/abs/WIGovernor2018.txt",
                "outputSettings": {"width": 800, "height": 600, "outputType": "json"},
                "renderSettings": {"margin": 0, "outlineColor": "#ffffff"}
            }"##,
        )
        .unwrap();
        let a = args(&["--width", "1000", "--output-type", "svg", "-o", "map.svg"]);
        let job = job_from_config(&a, &config, Some(Path::new("/maps"))).unwrap();
        assert_eq!(job.map_name, "Governor 2018");
        assert_eq!(job.boundary_path, "/maps/WI.txt");
        assert_eq!(job.results_path, "/abs/WIGovernor2018.txt");
        assert_eq!((job.width, job.height), (1000, 600));
        assert_eq!(job.output_type, OutputType::Svg);
        assert_eq!(job.out.as_deref(), Some("map.svg"));
        assert_eq!(job.render_settings.margin, 0);
        assert_eq!(job.render_settings.half_margin, 10);
        assert_eq!(job.render_settings.outline_color, Rgb::new(255, 255, 255));
        assert_eq!(job.render_settings.no_votes_color, Rgb::NEUTRAL_GRAY);
    }

    #[test]
    fn bad_color_in_config() {
        let config: MapConfig =
            serde_json::from_str(r#"{"renderSettings": {"noVotesColor": "gray"}}"#).unwrap();
        let res = job_from_config(&args(&[]), &config, None);
        assert!(matches!(res, Err(MapError::Whatever { .. })));
    }

    #[test]
    fn config_file() {
        let path = format!("{}/tests/data/tiny_config.json", env!("CARGO_MANIFEST_DIR"));
        let job = build_job(&args(&["--config", path.as_str()])).unwrap();
        let root = format!("{}/tests/data", env!("CARGO_MANIFEST_DIR"));
        assert_eq!(job.boundary_path, format!("{}/tiny_map.txt", root));
        assert_eq!(job.results_path, format!("{}/tiny_results.txt", root));
        assert_eq!((job.width, job.height), (521, 521));
    }

    #[test]
    fn missing_config_file() {
        let res = build_job(&args(&["--config", "/nonexistent/map.json"]));
        assert!(matches!(res, Err(MapError::OpeningJson { .. })));
    }
}
