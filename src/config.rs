use std::{fs, path::Path};

use geo::Point;
use _model::RegionChoice;
use serde::{Deserialize, Serialize};

use crate::{layer::PathStyle, Result};

/// Map setup and the list of layers to load, usually read from a YAML file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub title: String,
    /// `[latitude, longitude]`
    pub initial_center: [f64; 2],
    pub initial_zoom: u8,
    pub min_zoom: u8,
    pub tiles: TileConfig,
    pub panes: Vec<PaneConfig>,
    pub layers: Vec<LayerConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            title: "SEA Map".to_string(),
            initial_center: [43.726, -79.390],
            initial_zoom: 12,
            min_zoom: 10,
            tiles: TileConfig::default(),
            panes: vec![
                PaneConfig::new("basePolys", 250),
                PaneConfig::new("points", 450),
                PaneConfig::new("labels", 550),
            ],
            layers: vec![LayerConfig {
                id: "groceries".to_string(),
                name: "Ethnic Grocery Stores".to_string(),
                url: "data/ethnic-grocery.geojson".to_string(),
                default_visible: true,
                pane: "points".to_string(),
                filterable: true,
                initial_region: None,
                kind: CategoryKind::Grocery,
                popup: PopupConfig::default(),
                style: PathStyle::default(),
                legend: Some(LegendNote {
                    note: "Tap a point to view store details.".to_string(),
                }),
            }],
        }
    }
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn initial_view(&self) -> View {
        let [lat, lon] = self.initial_center;
        View {
            center: Point::new(lon, lat),
            zoom: self.initial_zoom,
        }
    }

    pub fn layer(&self, id: &str) -> Option<&LayerConfig> {
        self.layers.iter().find(|x| x.id == id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    /// (longitude, latitude)
    pub center: Point,
    pub zoom: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    pub url: String,
    pub max_zoom: u8,
    pub min_zoom: u8,
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            min_zoom: 10,
            attribution: "&copy; OpenStreetMap contributors | Data: SEA".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaneConfig {
    pub name: String,
    pub z_index: u32,
}

impl PaneConfig {
    fn new(name: &str, z_index: u32) -> Self {
        Self {
            name: name.to_string(),
            z_index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LayerConfig {
    pub id: String,
    pub name: String,
    /// Relative to the data source base.
    pub url: String,
    #[serde(default)]
    pub default_visible: bool,
    #[serde(default = "default_pane")]
    pub pane: String,
    #[serde(default)]
    pub filterable: bool,
    /// Region selected when the dataset loads. Ignored when the dataset has
    /// no such region.
    #[serde(default)]
    pub initial_region: Option<RegionChoice>,
    #[serde(default)]
    pub kind: CategoryKind,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub style: PathStyle,
    #[serde(default)]
    pub legend: Option<LegendNote>,
}

fn default_pane() -> String {
    "points".to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
    /// Icon markers and the store popup.
    #[default]
    Grocery,
    /// Circle markers and a popup listing configured fields.
    Fields,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Property keys tried in order for the popup heading.
    pub title: Vec<String>,
    pub fallback_title: Option<String>,
    pub fields: Vec<FieldConfig>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FieldConfig {
    pub field: String,
    pub label: String,
    #[serde(default)]
    pub format: FieldFormat,
    pub decimals: Option<usize>,
    pub suffix: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldFormat {
    #[default]
    Text,
    Number,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LegendNote {
    pub note: String,
}
