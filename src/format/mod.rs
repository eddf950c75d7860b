use itertools::Itertools;

pub mod recipes;

pub use recipes::{format_recipes, parse_recipes, RecipeLink};

use _model::Address;

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Address block with each line escaped on its own. Empty when there is no
/// address.
pub fn format_address(raw: Option<&str>) -> String {
    let Some(address) = Address::parse(raw) else {
        return String::new();
    };
    let lines = address.lines();
    if lines.is_empty() {
        return String::new();
    }

    format!(
        r#"<div class="popup-address">{}</div>"#,
        lines.iter().map(|x| escape(x)).join("<br>")
    )
}
