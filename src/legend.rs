use serde::Serialize;

/// Snapshot of the legend: one entry per layer that has an overlay.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LegendView {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub layer: String,
    pub name: String,
    pub checked: bool,
    pub note: Option<String>,
    pub regions: Option<RegionSelect>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionSelect {
    pub options: Vec<String>,
    pub selected: String,
}

impl LegendView {
    pub fn entry(&self, layer: &str) -> Option<&LegendEntry> {
        self.entries.iter().find(|x| x.layer == layer)
    }
}

/// User input coming back from the legend and map controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegendEvent {
    Toggle { layer: String, checked: bool },
    SelectRegion { layer: String, value: String },
    ResetView,
}
