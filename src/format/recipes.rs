use std::sync::LazyLock;

use _model::clean;
use itertools::Itertools;
use regex::Regex;

use super::escape;

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("hardcoded"));

pub const DEFAULT_LABEL: &str = "Recipe";
pub const RECOMMENDED: &str = "★ Recommended";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeLink {
    pub label: String,
    pub url: String,
}

/// Reads one `label – url` pair per line. Lines without a URL are dropped.
pub fn parse_recipes(raw: Option<&str>) -> Vec<RecipeLink> {
    let Some(raw) = clean(raw) else {
        return Vec::new();
    };

    raw.lines()
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .filter_map(|line| {
            let found = URL.find(line)?;
            let label = line[..found.start()]
                .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '–'));
            Some(RecipeLink {
                label: if label.is_empty() {
                    DEFAULT_LABEL.to_string()
                } else {
                    label.to_string()
                },
                url: found.as_str().to_string(),
            })
        })
        .collect()
}

/// Recipe list for a popup, or an empty string when no line has a link. The
/// recommendation marker only shows next to at least one link.
pub fn format_recipes(raw: Option<&str>, recommended: bool) -> String {
    let links = parse_recipes(raw);
    if links.is_empty() {
        return String::new();
    }

    let items = links
        .iter()
        .map(|x| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
                escape(&x.url),
                escape(&x.label)
            )
        })
        .join("");

    let mut html = format!(r#"<div class="popup-recipes"><strong>Recipes</strong><ul>{items}</ul>"#);
    if recommended {
        html.push_str(&format!(r#"<div class="recipe-recommended">{RECOMMENDED}</div>"#));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(label: &str, url: &str) -> RecipeLink {
        RecipeLink {
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn keeps_order() {
        assert_eq!(
            parse_recipes(Some("A: http://x\nhttp://y")),
            vec![link("A", "http://x"), link("Recipe", "http://y")]
        );
    }

    #[test]
    fn strips_separators() {
        assert_eq!(
            parse_recipes(Some(
                "  Kimchi jjigae – https://example.com/kimchi?x=1  \n\nJollof rice - https://example.com/jollof\nPho:https://example.com/pho"
            )),
            vec![
                link("Kimchi jjigae", "https://example.com/kimchi?x=1"),
                link("Jollof rice", "https://example.com/jollof"),
                link("Pho", "https://example.com/pho"),
            ]
        );
    }

    #[test]
    fn drops_lines_without_links() {
        assert_eq!(
            parse_recipes(Some("Ask at the counter\nDal: www.example.com\nDosa https://d.example")),
            vec![link("Dosa", "https://d.example")]
        );
    }

    #[test]
    fn none_is_empty() {
        assert_eq!(format_recipes(Some("none"), true), "");
        assert_eq!(format_recipes(Some("None"), false), "");
        assert_eq!(format_recipes(None, true), "");
        assert_eq!(format_recipes(Some("no links here"), true), "");
    }

    #[test]
    fn recommended_marker() {
        let html = format_recipes(Some("Bibimbap: https://b.example"), true);
        assert_eq!(
            html,
            r#"<div class="popup-recipes"><strong>Recipes</strong><ul><li><a href="https://b.example" target="_blank" rel="noopener">Bibimbap</a></li></ul><div class="recipe-recommended">★ Recommended</div></div>"#
        );
        assert!(!format_recipes(Some("https://b.example"), false).contains(RECOMMENDED));
    }
}
