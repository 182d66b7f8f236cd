// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The title used when the caller does not name the map.
pub const DEFAULT_MAP_NAME: &str = "Wisconsin Voting Results";

/// A point in geographic coordinates: `x` is the longitude, `y` the latitude.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> GeoPoint {
        GeoPoint { x, y }
    }
}

/// The outline of one county.
///
/// The polygon is implicitly closed: the last point connects back to the first one.
#[derive(PartialEq, Debug, Clone)]
pub struct Region {
    pub(crate) name: String,
    pub(crate) points: Vec<GeoPoint>,
}

impl Region {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }
}

/// All the geometry needed to draw one map.
///
/// Built once with [`crate::builder::MapBuilder`] and never modified afterwards.
#[derive(PartialEq, Debug, Clone)]
pub struct BoundaryMap {
    pub(crate) name: String,
    pub(crate) min_longitude: f64,
    pub(crate) min_latitude: f64,
    pub(crate) max_longitude: f64,
    pub(crate) max_latitude: f64,
    pub(crate) regions: Vec<Region>,
}

impl BoundaryMap {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_longitude(&self) -> f64 {
        self.min_longitude
    }

    pub fn min_latitude(&self) -> f64 {
        self.min_latitude
    }

    pub fn max_longitude(&self) -> f64 {
        self.max_longitude
    }

    pub fn max_latitude(&self) -> f64 {
        self.max_latitude
    }

    /// The regions, in the order of the source file.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

/// The vote tallies of one county.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResultRecord {
    pub name: String,
    pub republican_votes: u64,
    pub democrat_votes: u64,
    pub other_votes: u64,
}

impl ResultRecord {
    /// The number of votes of the county. Wide enough that the sum never overflows.
    pub fn total(&self) -> u128 {
        self.republican_votes as u128 + self.democrat_votes as u128 + self.other_votes as u128
    }
}

/// The election results, indexed by county name.
///
/// Keys are compared exactly (case and whitespace matter).
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ResultsTable {
    pub(crate) records: HashMap<String, ResultRecord>,
    pub(crate) replaced_rows: usize,
}

impl ResultsTable {
    pub fn get(&self, name: &str) -> Option<&ResultRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.values()
    }

    /// The number of rows that were overwritten by a later row with the same name.
    pub fn replaced_rows(&self) -> usize {
        self.replaced_rows
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const NEUTRAL_GRAY: Rgb = Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const LIGHT_GRAY: Rgb = Rgb {
        r: 192,
        g: 192,
        b: 192,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Parses colors written as `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A position on the canvas, in whole pixels.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

/// Where the fill color of a region comes from.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Shading {
    /// Mixed from the vote shares of the county.
    Votes,
    /// The county has a record but nobody voted in it.
    NoVotes,
    /// No record matches the name of the county.
    MissingResults,
}

/// One painting instruction for the host surface.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DrawOp {
    Fill {
        region: String,
        points: Vec<Pixel>,
        color: Rgb,
        shading: Shading,
    },
    Outline {
        region: String,
        points: Vec<Pixel>,
        color: Rgb,
    },
}

impl DrawOp {
    pub fn region(&self) -> &str {
        match self {
            DrawOp::Fill { region, .. } | DrawOp::Outline { region, .. } => region,
        }
    }

    pub fn points(&self) -> &[Pixel] {
        match self {
            DrawOp::Fill { points, .. } | DrawOp::Outline { points, .. } => points,
        }
    }
}

/// Errors that prevent a map from being assembled.
#[derive(PartialEq, Debug, Clone)]
pub enum MapErrors {
    /// The bounding box is empty, inverted or not made of finite numbers.
    DegenerateBounds {
        min_longitude: f64,
        min_latitude: f64,
        max_longitude: f64,
        max_latitude: f64,
    },
    NonFiniteCoordinate {
        region: String,
        index: usize,
    },
}

impl Error for MapErrors {}

impl Display for MapErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapErrors::DegenerateBounds {
                min_longitude,
                min_latitude,
                max_longitude,
                max_latitude,
            } => write!(
                f,
                "degenerate bounding box: longitude [{}, {}], latitude [{}, {}]",
                min_longitude, max_longitude, min_latitude, max_latitude
            ),
            MapErrors::NonFiniteCoordinate { region, index } => write!(
                f,
                "region {:?}: point #{} is not a finite coordinate",
                region, index
            ),
        }
    }
}

// ********* Configuration **********

/// The knobs of the renderer.
///
/// The margin is the total number of pixels left free across each axis, and the
/// half margin is the offset of the top-left corner. The defaults are 21 and 10.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RenderSettings {
    pub margin: u32,
    pub half_margin: u32,
    pub outline_color: Rgb,
    pub no_votes_color: Rgb,
    pub missing_results_color: Rgb,
}

impl RenderSettings {
    pub const DEFAULT_SETTINGS: RenderSettings = RenderSettings {
        margin: 21,
        half_margin: 10,
        outline_color: Rgb::BLACK,
        no_votes_color: Rgb::NEUTRAL_GRAY,
        missing_results_color: Rgb::LIGHT_GRAY,
    };
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings::DEFAULT_SETTINGS
    }
}
