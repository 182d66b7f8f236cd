pub use crate::config::*;

use log::{debug, warn};
use std::collections::HashMap;

/// A builder for assembling a map, one region at a time.
///
/// The bounding box is checked when the builder is created and each region is
/// checked as it is added, so that [`MapBuilder::build`] cannot fail.
///
/// ```
/// use county_choropleth::builder::MapBuilder;
/// use county_choropleth::{GeoPoint, MapErrors};
///
/// let mut builder = MapBuilder::new("Tiny", -92.0, 42.0, -87.0, 47.0)?;
/// builder.add_region(
///     "Adams",
///     &[
///         GeoPoint::new(-92.0, 47.0),
///         GeoPoint::new(-89.5, 47.0),
///         GeoPoint::new(-89.5, 44.5),
///     ],
/// )?;
/// let map = builder.build();
/// assert_eq!(map.regions().len(), 1);
///
/// # Ok::<(), MapErrors>(())
/// ```
pub struct MapBuilder {
    pub(crate) _name: String,
    pub(crate) _bounds: [f64; 4],
    pub(crate) _regions: Vec<Region>,
}

impl MapBuilder {
    /// Starts a map with its bounding box, given in the order of the boundary files:
    /// minimum longitude, minimum latitude, maximum longitude, maximum latitude.
    pub fn new(
        name: &str,
        min_longitude: f64,
        min_latitude: f64,
        max_longitude: f64,
        max_latitude: f64,
    ) -> Result<MapBuilder, MapErrors> {
        let bounds = [min_longitude, min_latitude, max_longitude, max_latitude];
        let ordered = min_longitude < max_longitude && min_latitude < max_latitude;
        if !ordered || bounds.iter().any(|v| !v.is_finite()) {
            return Err(MapErrors::DegenerateBounds {
                min_longitude,
                min_latitude,
                max_longitude,
                max_latitude,
            });
        }
        Ok(MapBuilder {
            _name: name.to_string(),
            _bounds: bounds,
            _regions: Vec::new(),
        })
    }

    /// Appends a region. Points are kept in order; the outline does not need to repeat
    /// its first point.
    pub fn add_region(&mut self, name: &str, points: &[GeoPoint]) -> Result<(), MapErrors> {
        self.add_region_owned(name.to_string(), points.to_vec())
    }

    pub fn add_region_owned(
        &mut self,
        name: String,
        points: Vec<GeoPoint>,
    ) -> Result<(), MapErrors> {
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(MapErrors::NonFiniteCoordinate {
                region: name,
                index,
            });
        }
        debug!("add_region: {:?} with {} points", name, points.len());
        self._regions.push(Region { name, points });
        Ok(())
    }

    pub fn build(self) -> BoundaryMap {
        let [min_longitude, min_latitude, max_longitude, max_latitude] = self._bounds;
        BoundaryMap {
            name: self._name,
            min_longitude,
            min_latitude,
            max_longitude,
            max_latitude,
            regions: self._regions,
        }
    }
}

/// A builder for the results table.
///
/// When two records share a name, the last one replaces the earlier one.
///
/// ```
/// use county_choropleth::builder::ResultsBuilder;
///
/// let mut builder = ResultsBuilder::new();
/// builder.add_record_simple("Adams", 1, 1, 1);
/// builder.add_record_simple("Adams", 80, 15, 5);
/// let table = builder.build();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get("Adams").map(|r| r.republican_votes), Some(80));
/// ```
#[derive(Default)]
pub struct ResultsBuilder {
    pub(crate) _records: HashMap<String, ResultRecord>,
    pub(crate) _replaced_rows: usize,
}

impl ResultsBuilder {
    pub fn new() -> ResultsBuilder {
        ResultsBuilder::default()
    }

    /// Adds a record, returning the record it replaced if the name was already known.
    pub fn add_record(&mut self, record: ResultRecord) -> Option<ResultRecord> {
        let previous = self._records.insert(record.name.clone(), record);
        if let Some(prev) = &previous {
            warn!("add_record: replacing earlier results for {:?}", prev.name);
            self._replaced_rows += 1;
        }
        previous
    }

    pub fn add_record_simple(
        &mut self,
        name: &str,
        republican_votes: u64,
        democrat_votes: u64,
        other_votes: u64,
    ) -> Option<ResultRecord> {
        self.add_record(ResultRecord {
            name: name.to_string(),
            republican_votes,
            democrat_votes,
            other_votes,
        })
    }

    pub fn build(self) -> ResultsTable {
        ResultsTable {
            records: self._records,
            replaced_rows: self._replaced_rows,
        }
    }
}
