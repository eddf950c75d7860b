use serde::Serialize;
use serde_json::json;

use crate::{
    app::App,
    config::View,
    format::escape,
    layer::{Overlay, OverlayId},
    legend::LegendView,
    surface::{DisplaySurface, UiSurface},
    Result,
};

/// In-memory map: remembers attached overlays in attach order and the last
/// view.
#[derive(Debug, Default)]
pub struct StaticMap {
    attached: Vec<Overlay>,
    view: Option<View>,
}

impl StaticMap {
    pub fn attached(&self) -> &[Overlay] {
        &self.attached
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }
}

impl DisplaySurface for StaticMap {
    fn attach(&mut self, overlay: &Overlay) {
        if !self.is_attached(overlay.id) {
            self.attached.push(overlay.clone());
        }
    }

    fn detach(&mut self, id: OverlayId) {
        self.attached.retain(|x| x.id != id);
    }

    fn is_attached(&self, id: OverlayId) -> bool {
        self.attached.iter().any(|x| x.id == id)
    }

    fn set_view(&mut self, view: &View) {
        self.view = Some(*view);
    }
}

/// Keeps the most recent legend.
#[derive(Debug, Default)]
pub struct StaticLegend {
    legend: Option<LegendView>,
    renders: usize,
}

impl StaticLegend {
    pub fn legend(&self) -> Option<&LegendView> {
        self.legend.as_ref()
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl UiSurface for StaticLegend {
    fn render_legend(&mut self, legend: &LegendView) {
        self.legend = Some(legend.clone());
        self.renders += 1;
    }
}

#[derive(Serialize)]
struct PageOverlay<'a> {
    #[serde(flatten)]
    overlay: &'a Overlay,
    attached: bool,
}

/// Standalone Leaflet page with every loaded overlay and the legend. Only
/// the attached overlays start on the map; the rest can be checked on.
pub fn render_page(app: &App<StaticMap, StaticLegend>) -> Result<String> {
    let config = app.config();
    let map = app.display();
    let view = map.view().copied().unwrap_or_else(|| config.initial_view());
    let initial = config.initial_view();
    let overlays: Vec<_> = config
        .layers
        .iter()
        .filter_map(|x| app.overlay(&x.id))
        .map(|overlay| PageOverlay {
            overlay,
            attached: map.is_attached(overlay.id),
        })
        .collect();
    let setup = json!({
        "center": [view.center.y(), view.center.x()],
        "zoom": view.zoom,
        "minZoom": config.min_zoom,
        "initialCenter": [initial.center.y(), initial.center.x()],
        "initialZoom": initial.zoom,
        "tiles": config.tiles,
        "panes": config.panes,
        "overlays": overlays,
    });
    // keep "</script>" inside strings from closing the tag
    let setup = serde_json::to_string(&setup)?.replace("</", "<\\/");

    let legend = match app.ui().legend() {
        Some(x) => render_legend(x),
        None => String::new(),
    };

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<style>
html,body,#map{{height:100%;margin:0;}}
.layer-legend{{position:absolute;top:10px;right:10px;z-index:1000;background:#fff;padding:8px 12px;border-radius:4px;box-shadow:0 1px 4px rgba(0,0,0,.3);font:13px/1.4 sans-serif;max-width:240px;}}
.layer-legend h3{{margin:0 0 4px;font-size:15px;}}
.layer-legend h4{{margin:4px 0;font-size:13px;color:#555;}}
.layer-note{{font-size:11px;color:#777;margin-left:20px;}}
.region-select{{margin:4px 0 0 20px;}}
.reset-control{{position:absolute;top:80px;left:10px;z-index:1000;}}
.reset-control a{{display:block;width:30px;height:30px;line-height:30px;text-align:center;background:#fff;border-radius:4px;text-decoration:none;color:#000;box-shadow:0 1px 4px rgba(0,0,0,.3);}}
.popup-address,.popup-notes,.popup-region{{margin:4px 0;}}
.popup-recipes ul{{margin:4px 0;padding-left:18px;}}
.recipe-recommended{{color:#b8860b;font-weight:600;}}
</style>
</head>
<body>
<div id="map"></div>
{legend}
<div class="reset-control"><a href="#" id="reset-view" title="Reset view">⟳</a></div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
const setup = {setup};
const map = L.map('map', {{ center: setup.center, zoom: setup.zoom, minZoom: setup.minZoom }});
setup.panes.forEach(p => {{ map.createPane(p.name); map.getPane(p.name).style.zIndex = p.z_index; }});
L.tileLayer(setup.tiles.url, {{ maxZoom: setup.tiles.max_zoom, minZoom: setup.tiles.min_zoom, attribution: setup.tiles.attribution }}).addTo(map);

const groups = {{}};
setup.overlays.forEach(o => {{
    const group = L.layerGroup();
    o.markers.forEach(m => {{
        const {{ type, ...style }} = m.style;
        const marker = type === 'icon'
            ? L.marker([m.lat, m.lon], {{ icon: L.icon(style), pane: o.pane }})
            : L.circleMarker([m.lat, m.lon], {{ ...style, pane: o.pane }});
        marker.bindPopup(m.popup);
        group.addLayer(marker);
    }});
    if (o.attached) group.addTo(map);
    groups[o.layer] = group;
}});

document.querySelectorAll('.layer-toggle input').forEach(input => {{
    input.addEventListener('change', e => {{
        const group = groups[e.target.value];
        if (!group) return;
        if (e.target.checked) map.addLayer(group); else map.removeLayer(group);
    }});
}});

document.getElementById('reset-view').addEventListener('click', e => {{
    e.preventDefault();
    map.setView(setup.initialCenter, setup.initialZoom);
}});
</script>
</body>
</html>
"##,
        title = escape(&config.title),
    ))
}

fn render_legend(legend: &LegendView) -> String {
    let mut html = String::new();
    for entry in &legend.entries {
        let checked = if entry.checked { " checked" } else { "" };
        html += r#"<div class="layer-entry">"#;
        html += &format!(
            r#"<label class="layer-toggle"><input type="checkbox" value="{}"{checked}><span>{}</span></label>"#,
            escape(&entry.layer),
            escape(&entry.name),
        );
        if let Some(note) = &entry.note {
            html += &format!(r#"<div class="layer-note">{}</div>"#, escape(note));
        }
        if let Some(regions) = &entry.regions {
            html += r#"<select class="region-select" disabled>"#;
            for option in &regions.options {
                let selected = if *option == regions.selected { " selected" } else { "" };
                html += &format!(r#"<option value="{0}"{selected}>{0}</option>"#, escape(option));
            }
            html += "</select>";
        }
        html += "</div>";
    }

    format!(
        r#"<div class="layer-legend"><h3>{}</h3><h4>Layers</h4><form id="layer-legend-form">{html}</form></div>"#,
        escape(&legend.title)
    )
}

#[cfg(test)]
mod tests {
    use _model::Dataset;

    use super::*;
    use crate::config::{CategoryKind, LayerConfig, ProjectConfig};

    const STORES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-79.20, 43.78]},
             "properties": {"name": "Bestco </script>", "region": "East"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-79.55, 43.70]},
             "properties": {"name": "Iqbal Foods", "region": "West"}}
        ]
    }"#;

    #[test]
    fn attach_once() {
        let mut map = StaticMap::default();
        let overlay = crate::layer::LayerFactory::default().build(
            "groceries",
            "points",
            crate::category::for_layer(&ProjectConfig::default().layers[0]).as_ref(),
            Dataset::default().features(),
        );
        map.attach(&overlay);
        map.attach(&overlay);
        assert_eq!(map.attached().len(), 1);
        map.detach(overlay.id);
        assert!(!map.is_attached(overlay.id));
    }

    #[test]
    fn renders_page() {
        let mut app = App::new(
            ProjectConfig::default(),
            StaticMap::default(),
            StaticLegend::default(),
        );
        app.load_dataset("groceries", Dataset::from_geojson(STORES).unwrap());
        app.set_filter("groceries", "East");

        let html = render_page(&app).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>SEA Map</title>"));
        assert!(html.contains(r#"<input type="checkbox" value="groceries" checked>"#));
        assert!(html.contains(r#"<option value="East" selected>East</option>"#));
        assert!(html.contains(r#"<option value="West">West</option>"#));
        assert!(html.contains("Tap a point to view store details."));
        assert!(html.contains("icons/general.png"));
        assert!(!html.contains("Iqbal Foods"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    const MARKETS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-79.39, 43.66]},
             "properties": {"market_name": "Dufferin Grove"}}
        ]
    }"#;

    #[test]
    fn hidden_layer_can_be_checked_on() {
        let mut config = ProjectConfig::default();
        config.layers.push(LayerConfig {
            id: "markets".to_string(),
            name: "Farmers Markets".to_string(),
            url: "data/markets.geojson".to_string(),
            default_visible: false,
            pane: "points".to_string(),
            filterable: false,
            initial_region: None,
            kind: CategoryKind::Fields,
            popup: Default::default(),
            style: Default::default(),
            legend: None,
        });
        let mut app = App::new(config, StaticMap::default(), StaticLegend::default());
        app.load_dataset("groceries", Dataset::from_geojson(STORES).unwrap());
        app.load_dataset("markets", Dataset::from_geojson(MARKETS).unwrap());

        let html = render_page(&app).unwrap();
        assert!(html.contains(r#"<input type="checkbox" value="markets"><span>Farmers Markets</span>"#));
        assert!(!html.contains(r#"value="markets" disabled"#));
        assert!(html.contains(r#""layer":"markets""#));
        assert!(html.contains(r#""attached":false"#));
        assert!(html.contains(r#""attached":true"#));
        assert!(html.contains("if (o.attached) group.addTo(map);"));
    }

    #[test]
    fn legend_markup() {
        let html = render_legend(&LegendView {
            title: "A & B".to_string(),
            entries: Vec::new(),
        });
        assert_eq!(
            html,
            r#"<div class="layer-legend"><h3>A &amp; B</h3><h4>Layers</h4><form id="layer-legend-form"></form></div>"#
        );
    }
}
