/*!
Projection and coloring for county choropleth maps.

The crate turns a [`BoundaryMap`] (the county outlines, in geographic coordinates)
and a [`ResultsTable`] (the vote tallies per county) into a list of [`DrawOp`]s
for a canvas of a given size. It does no I/O: reading the input files and
painting the operations are left to the host.

```
use county_choropleth::builder::{MapBuilder, ResultsBuilder};
use county_choropleth::*;

let mut map = MapBuilder::new(DEFAULT_MAP_NAME, -92.0, 42.0, -87.0, 47.0)?;
map.add_region(
    "Adams",
    &[
        GeoPoint::new(-92.0, 47.0),
        GeoPoint::new(-87.0, 47.0),
        GeoPoint::new(-87.0, 42.0),
    ],
)?;
let map = map.build();

let mut results = ResultsBuilder::new();
results.add_record_simple("Adams", 80, 15, 5);
let results = results.build();

let ops = render(521, 521, &map, &results, &RenderSettings::DEFAULT_SETTINGS);
assert_eq!(ops.len(), 2);
assert_eq!(ops[0].points()[2], Pixel { x: 510, y: 510 });
# Ok::<(), MapErrors>(())
```

See the [`manual`] for the input formats.
*/

mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

pub use crate::config::*;

/// The affine map from geographic coordinates to canvas pixels.
///
/// Latitudes grow upwards while pixel rows grow downwards, so `scale_y` is negative.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Transform {
    /// Fits the bounding box of the map into a canvas of the given size, leaving the
    /// margins of the settings around it.
    pub fn fit(
        width: u32,
        height: u32,
        map: &BoundaryMap,
        settings: &RenderSettings,
    ) -> Transform {
        let margin = settings.margin as f64;
        let half_margin = settings.half_margin as f64;
        let scale_x = (width as f64 - margin) / (map.max_longitude - map.min_longitude);
        let scale_y = (height as f64 - margin) / (map.min_latitude - map.max_latitude);
        Transform {
            scale_x,
            scale_y,
            offset_x: -scale_x * map.min_longitude + half_margin,
            offset_y: -scale_y * map.max_latitude + half_margin,
        }
    }

    /// The exact position on the canvas, before truncation.
    pub fn project(&self, p: GeoPoint) -> (f64, f64) {
        (
            self.scale_x * p.x + self.offset_x,
            self.scale_y * p.y + self.offset_y,
        )
    }

    /// The pixel of a point. Coordinates are truncated toward zero, not rounded.
    pub fn to_pixel(&self, p: GeoPoint) -> Pixel {
        let (x, y) = self.project(p);
        Pixel {
            x: x.trunc() as i32,
            y: y.trunc() as i32,
        }
    }
}

fn channel(votes: u64, total: u128) -> u8 {
    (255.0 * votes as f64 / total as f64).round().clamp(0.0, 255.0) as u8
}

/// The color of a county from its vote shares, or None when nobody voted.
///
/// The republican share drives the red channel, the democrat share the blue channel
/// and the share of the other candidates the green channel.
pub fn vote_color(record: &ResultRecord) -> Option<Rgb> {
    let total = record.total();
    if total == 0 {
        return None;
    }
    Some(Rgb {
        r: channel(record.republican_votes, total),
        g: channel(record.other_votes, total),
        b: channel(record.democrat_votes, total),
    })
}

/// The color of a county from its vote shares.
///
/// Records without any vote get [`Rgb::NEUTRAL_GRAY`].
pub fn color_for(record: &ResultRecord) -> Rgb {
    vote_color(record).unwrap_or(Rgb::NEUTRAL_GRAY)
}

/// The fill color of a region, given the record found for it (if any).
pub fn shade_for(record: Option<&ResultRecord>, settings: &RenderSettings) -> (Rgb, Shading) {
    match record {
        Some(r) => match vote_color(r) {
            Some(c) => (c, Shading::Votes),
            None => (settings.no_votes_color, Shading::NoVotes),
        },
        None => (settings.missing_results_color, Shading::MissingResults),
    }
}

/// The names of the regions that have no entry in the results, in map order.
pub fn referential_gaps(map: &BoundaryMap, results: &ResultsTable) -> Vec<String> {
    map.regions
        .iter()
        .filter(|r| results.get(&r.name).is_none())
        .map(|r| r.name.clone())
        .collect()
}

/// Computes the draw operations for a canvas of `width` x `height` pixels.
///
/// Every region produces a fill followed by an outline, in map order. Regions without
/// results, or with no votes at all, are still drawn with the fallback colors of the
/// settings.
///
/// Arguments:
/// * `width`, `height` the current size of the canvas
/// * `map` the geometry, in geographic coordinates
/// * `results` the vote tallies, looked up by region name
/// * `settings` margins and fallback colors
pub fn render(
    width: u32,
    height: u32,
    map: &BoundaryMap,
    results: &ResultsTable,
    settings: &RenderSettings,
) -> Vec<DrawOp> {
    let transform = Transform::fit(width, height, map, settings);
    debug!(
        "render: {}x{} canvas, {} regions, transform: {:?}",
        width,
        height,
        map.regions.len(),
        transform
    );

    let mut ops: Vec<DrawOp> = Vec::with_capacity(2 * map.regions.len());
    let mut missing = 0;
    for region in map.regions.iter() {
        let points: Vec<Pixel> = region
            .points
            .iter()
            .map(|p| transform.to_pixel(*p))
            .collect();
        let (color, shading) = shade_for(results.get(&region.name), settings);
        match shading {
            Shading::MissingResults => {
                debug!("render: no results for region {:?}", region.name);
                missing += 1;
            }
            Shading::NoVotes => {
                debug!("render: region {:?} has no votes", region.name);
            }
            Shading::Votes => {}
        }
        ops.push(DrawOp::Fill {
            region: region.name.clone(),
            points: points.clone(),
            color,
            shading,
        });
        ops.push(DrawOp::Outline {
            region: region.name.clone(),
            points,
            color: settings.outline_color,
        });
    }
    if missing > 0 {
        info!(
            "render: {} of {} regions drawn without results",
            missing,
            map.regions.len()
        );
    }
    ops
}
