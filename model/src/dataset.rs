use std::collections::BTreeSet;

use geo::Point;
use serde::Deserialize;
use tracing::warn;

use crate::{RegionChoice, StoreProperties};

/// One store on the map. `point` is (longitude, latitude).
#[derive(Clone, Debug, PartialEq)]
pub struct StoreFeature {
    pub point: Point,
    pub properties: StoreProperties,
}

impl StoreFeature {
    pub fn region(&self) -> Option<&str> {
        self.properties.region.as_deref()
    }
}

/// The unfiltered feature collection of one layer, as fetched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    features: Vec<StoreFeature>,
}

impl Dataset {
    pub fn new(features: Vec<StoreFeature>) -> Self {
        Self { features }
    }

    /// Parses a GeoJSON FeatureCollection. Features without a point geometry
    /// are dropped.
    pub fn from_geojson(text: &str) -> serde_json::Result<Self> {
        let raw: RawCollection = serde_json::from_str(text)?;
        let total = raw.features.len();
        let features: Vec<_> = raw.features.into_iter().filter_map(|x| x.simplify()).collect();
        if features.len() < total {
            warn!(
                dropped = total - features.len(),
                "skipped features without a point geometry"
            );
        }
        Ok(Self { features })
    }

    pub fn features(&self) -> &[StoreFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Distinct non-empty regions, sorted.
    pub fn regions(&self) -> BTreeSet<&str> {
        self.features.iter().filter_map(|x| x.region()).collect()
    }

    pub fn matching<'a>(&'a self, choice: &'a RegionChoice) -> impl Iterator<Item = &'a StoreFeature> {
        self.features.iter().filter(move |x| choice.matches(x.region()))
    }
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<StoreProperties>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point {
        coordinates: Vec<f64>,
    },
    #[serde(other)]
    Other,
}

impl RawFeature {
    fn simplify(self) -> Option<StoreFeature> {
        let point = match self.geometry? {
            RawGeometry::Point { coordinates } => match coordinates[..] {
                [lon, lat, ..] => Point::new(lon, lat),
                _ => return None,
            },
            RawGeometry::Other => return None,
        };

        Some(StoreFeature {
            point,
            properties: self.properties.unwrap_or_default(),
        })
    }
}
