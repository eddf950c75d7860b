use _model::StoreFeature;

use crate::{
    config::{CategoryKind, LayerConfig, PopupConfig},
    layer::{Icon, PathStyle},
    popup::{fields_popup, store_popup},
};

/// How one kind of layer turns a feature into a marker.
pub trait Category {
    fn style(&self, feature: &StoreFeature) -> PathStyle;

    /// `None` draws a circle marker using [`Category::style`].
    fn icon_for(&self, feature: &StoreFeature) -> Option<Icon>;

    fn popup_content_for(&self, feature: &StoreFeature) -> String;
}

/// Grocery stores: an image per icon key and the full store popup.
pub struct GroceryCategory {
    style: PathStyle,
}

impl Category for GroceryCategory {
    fn style(&self, _: &StoreFeature) -> PathStyle {
        self.style.clone()
    }

    fn icon_for(&self, feature: &StoreFeature) -> Option<Icon> {
        Some(Icon::new(feature.properties.icon_key().path()))
    }

    fn popup_content_for(&self, feature: &StoreFeature) -> String {
        store_popup(&feature.properties)
    }
}

/// Generic point layers: circle markers and a popup of configured fields.
pub struct FieldsCategory {
    style: PathStyle,
    popup: PopupConfig,
}

impl Category for FieldsCategory {
    fn style(&self, _: &StoreFeature) -> PathStyle {
        self.style.clone()
    }

    fn icon_for(&self, _: &StoreFeature) -> Option<Icon> {
        None
    }

    fn popup_content_for(&self, feature: &StoreFeature) -> String {
        fields_popup(&self.popup, &feature.properties)
    }
}

pub fn for_layer(config: &LayerConfig) -> Box<dyn Category> {
    match config.kind {
        CategoryKind::Grocery => Box::new(GroceryCategory {
            style: config.style.clone(),
        }),
        CategoryKind::Fields => Box::new(FieldsCategory {
            style: config.style.clone(),
            popup: config.popup.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use _model::StoreProperties;
    use geo::Point;
    use serde_json::json;

    use super::*;
    use crate::config::ProjectConfig;

    fn feature() -> StoreFeature {
        StoreFeature {
            point: Point::new(-79.4, 43.6),
            properties: serde_json::from_value::<StoreProperties>(json!({
                "name": "Oceans",
                "icon": "Chinese",
                "description": "Supermarket",
            }))
            .unwrap(),
        }
    }

    #[test]
    fn grocery_layer() {
        let config = ProjectConfig::default();
        let category = for_layer(&config.layers[0]);
        let icon = category.icon_for(&feature()).unwrap();
        assert_eq!(icon.icon_url, "icons/chinese.png");
        assert!(category.popup_content_for(&feature()).starts_with("<strong>Oceans</strong>"));
    }

    #[test]
    fn fields_layer() {
        let mut config = ProjectConfig::default().layers.remove(0);
        config.kind = CategoryKind::Fields;
        config.popup = serde_yaml::from_str(
            "{ title: [name], fields: [{ field: description, label: Category }] }",
        )
        .unwrap();

        let category = for_layer(&config);
        assert_eq!(category.icon_for(&feature()), None);
        assert_eq!(category.style(&feature()), PathStyle::default());
        assert_eq!(
            category.popup_content_for(&feature()),
            "<strong>Oceans</strong><br>Category: Supermarket<br>"
        );
    }
}
