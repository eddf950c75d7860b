use _model::{clean_value, StoreProperties};

use crate::{
    config::{FieldFormat, PopupConfig},
    format::{escape, format_address, format_recipes},
};

pub const EMPTY: &str = "No attributes";
pub const STORE_FALLBACK_TITLE: &str = "Grocery Store";

/// Accumulates popup HTML. Every push skips absent input, so callers don't
/// check for presence.
#[derive(Debug, Default)]
pub struct Popup {
    html: String,
}

impl Popup {
    pub fn title(&mut self, title: Option<&str>) -> &mut Self {
        if let Some(x) = title {
            self.html += &format!("<strong>{}</strong><br>", escape(x));
        }
        self
    }

    pub fn field(&mut self, label: &str, value: Option<&str>, suffix: &str) -> &mut Self {
        if let Some(x) = value {
            self.html += &format!("{}: {}{}<br>", escape(label), escape(x), escape(suffix));
        }
        self
    }

    pub fn block(&mut self, class: &str, text: Option<&str>) -> &mut Self {
        if let Some(x) = text {
            self.html += &format!(r#"<div class="{class}">{}</div>"#, escape(x));
        }
        self
    }

    /// Pushes an already escaped fragment.
    pub fn fragment(&mut self, html: &str) -> &mut Self {
        self.html += html;
        self
    }

    pub fn links<'a>(&mut self, links: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> &mut Self {
        let links: Vec<_> = links
            .into_iter()
            .filter_map(|(label, url)| Some((label, url.filter(|x| is_web_url(x))?)))
            .map(|(label, url)| {
                format!(
                    r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                    escape(url),
                    escape(label)
                )
            })
            .collect();

        if !links.is_empty() {
            self.html += &format!(r#"<div class="popup-links">{}</div>"#, links.join(" · "));
        }
        self
    }

    pub fn finish(&mut self) -> String {
        if self.html.is_empty() {
            EMPTY.to_string()
        } else {
            std::mem::take(&mut self.html)
        }
    }
}

fn is_web_url(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://")
}

/// Popup of a grocery store: name, address, notes, recipes and outbound links.
pub fn store_popup(props: &StoreProperties) -> String {
    Popup::default()
        .title(Some(props.name.as_deref().unwrap_or(STORE_FALLBACK_TITLE)))
        .block("popup-region", props.region.as_deref())
        .fragment(&format_address(props.address.as_deref()))
        .block("popup-notes", props.notes.as_deref())
        .fragment(&format_recipes(props.recipes.as_deref(), props.recipe_recommended))
        .links([
            ("Weekly flyer", props.flyer.as_deref()),
            ("Order online", props.ordering.as_deref()),
            ("Directions", props.directions.as_deref()),
        ])
        .finish()
}

/// Popup listing the fields named in the layer config.
pub fn fields_popup(config: &PopupConfig, props: &StoreProperties) -> String {
    let keys: Vec<&str> = config.title.iter().map(String::as_str).collect();
    let title = props.get(&keys).or_else(|| config.fallback_title.clone());

    let mut popup = Popup::default();
    popup.title(title.as_deref());
    for field in &config.fields {
        let Some(value) = props.raw.get(&field.field).and_then(clean_value) else {
            continue;
        };
        let value = match field.format {
            FieldFormat::Number => format_number(&value, field.decimals.unwrap_or(1)),
            FieldFormat::Text => value,
        };
        popup.field(&field.label, Some(value.as_str()), field.suffix.as_deref().unwrap_or_default());
    }
    popup.finish()
}

/// Fixed decimals for numeric input, the input unchanged otherwise.
pub fn format_number(raw: &str, decimals: usize) -> String {
    match raw.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => format!("{x:.decimals$}"),
        _ => raw.to_string(),
    }
}
