use _model::StoreFeature;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Identifies one built overlay. A rebuilt overlay always gets a new id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OverlayId(u64);

/// The rendered markers of one layer, added to or removed from the map as a
/// unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overlay {
    pub id: OverlayId,
    pub layer: String,
    pub pane: String,
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub style: MarkerStyle,
    pub popup: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MarkerStyle {
    Icon(Icon),
    Circle(PathStyle),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_url: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

impl Icon {
    pub fn new(icon_url: String) -> Self {
        Self {
            icon_url,
            icon_size: [28, 28],
            icon_anchor: [14, 28],
            popup_anchor: [0, -24],
        }
    }
}

/// Circle marker options, serialized with Leaflet's option names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct PathStyle {
    pub radius: f64,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            radius: 6.0,
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.9,
            color: None,
            fill_color: None,
        }
    }
}

/// Builds overlays and hands out their ids.
#[derive(Debug, Default)]
pub struct LayerFactory {
    next_id: u64,
}

impl LayerFactory {
    pub fn build<'a>(
        &mut self,
        layer: &str,
        pane: &str,
        category: &dyn Category,
        features: impl IntoIterator<Item = &'a StoreFeature>,
    ) -> Overlay {
        self.next_id += 1;

        let markers = features
            .into_iter()
            .map(|feature| Marker {
                lat: feature.point.y(),
                lon: feature.point.x(),
                style: match category.icon_for(feature) {
                    Some(icon) => MarkerStyle::Icon(icon),
                    None => MarkerStyle::Circle(category.style(feature)),
                },
                popup: category.popup_content_for(feature),
            })
            .collect();

        Overlay {
            id: OverlayId(self.next_id),
            layer: layer.to_string(),
            pane: pane.to_string(),
            markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use _model::{Dataset, StoreFeature, StoreProperties};
    use geo::Point;

    use super::*;

    struct Plain;

    impl Category for Plain {
        fn style(&self, _: &StoreFeature) -> PathStyle {
            PathStyle {
                radius: 3.0,
                ..Default::default()
            }
        }

        fn icon_for(&self, feature: &StoreFeature) -> Option<Icon> {
            feature.properties.icon.as_ref().map(|_| Icon::new(feature.properties.icon_key().path()))
        }

        fn popup_content_for(&self, feature: &StoreFeature) -> String {
            feature.properties.name.clone().unwrap_or_default()
        }
    }

    fn feature(lon: f64, lat: f64, name: &str, icon: Option<&str>) -> StoreFeature {
        StoreFeature {
            point: Point::new(lon, lat),
            properties: StoreProperties {
                name: Some(name.to_string()),
                icon: icon.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn one_marker_per_feature() {
        let dataset = Dataset::new(vec![
            feature(-79.4, 43.6, "A", Some("Halal")),
            feature(-79.5, 43.7, "B", None),
        ]);
        let mut factory = LayerFactory::default();
        let overlay = factory.build("groceries", "points", &Plain, dataset.features());

        assert_eq!(overlay.layer, "groceries");
        assert_eq!(overlay.pane, "points");
        assert_eq!(overlay.markers.len(), 2);
        assert_eq!((overlay.markers[0].lat, overlay.markers[0].lon), (43.6, -79.4));
        assert_eq!(
            overlay.markers[0].style,
            MarkerStyle::Icon(Icon::new("icons/halal.png".to_string()))
        );
        assert!(matches!(&overlay.markers[1].style, MarkerStyle::Circle(x) if x.radius == 3.0));
        assert_eq!(overlay.markers[1].popup, "B");
    }

    #[test]
    fn fresh_ids() {
        let mut factory = LayerFactory::default();
        let empty = Dataset::default();
        let a = factory.build("x", "points", &Plain, empty.features());
        let b = factory.build("x", "points", &Plain, empty.features());
        assert_ne!(a.id, b.id);
        assert!(a.markers.is_empty());
    }

    #[test]
    fn leaflet_option_names() {
        let json = serde_json::to_value(MarkerStyle::Circle(PathStyle::default())).unwrap();
        assert_eq!(json["type"], "circle");
        assert_eq!(json["fillOpacity"], 0.9);
        assert!(json.get("color").is_none());
    }
}
