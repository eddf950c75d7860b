use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{clean::truthy, clean_value, IconKey};

/// Attributes of one store, cleaned on the way in.
///
/// Every field is optional. The raw property map is kept so config-driven
/// popups can show keys this struct doesn't know about.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct StoreProperties {
    pub name: Option<String>,
    pub region: Option<String>,
    pub icon: Option<String>,
    pub recipes: Option<String>,
    pub recipe_recommended: bool,
    pub flyer: Option<String>,
    pub ordering: Option<String>,
    pub directions: Option<String>,
    pub notes: Option<String>,
    pub address: Option<String>,
    pub raw: BTreeMap<String, Value>,
}

impl StoreProperties {
    /// First present value among `keys`, in order.
    pub fn get(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.raw.get(*k))
            .find_map(clean_value)
    }

    pub fn icon_key(&self) -> IconKey {
        IconKey::from_raw(self.icon.as_deref())
    }
}

impl From<BTreeMap<String, Value>> for StoreProperties {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut props = StoreProperties {
            raw,
            ..Default::default()
        };

        props.name = props.get(&["name", "Name", "store_name", "title"]);
        props.region = props.get(&["region", "Region"]);
        props.icon = props.get(&["icon", "icon_key"]);
        props.recipes = props.get(&["recipes", "recipe"]);
        props.recipe_recommended = props.raw.get("recipe_recommended").is_some_and(truthy);
        props.flyer = props.get(&["flyer", "flyer_url"]);
        props.ordering = props.get(&["ordering", "ordering_url", "order_url"]);
        props.directions = props.get(&["directions", "directions_url"]);
        props.notes = props.get(&["notes", "note"]);
        props.address = props.get(&["full_address", "address"]);
        props
    }
}
