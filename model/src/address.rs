use std::sync::LazyLock;

use regex::Regex;

use crate::clean;

static CODE_POSTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{2})\s+(.+)$").expect("hardcoded"));

/// A free-text address split heuristically into display lines.
///
/// Only the last two segments carry meaning: the last one is read as
/// "province code + postal code" when it starts with a two letter code, and
/// the one before it is the city. Multi-word cities and international formats
/// can misparse.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub code: Option<String>,
    pub postal: Option<String>,
    /// Last segment when it didn't look like a code and postal code.
    pub trailing: Option<String>,
}

impl Address {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = clean(raw)?;
        let separator = if raw.contains('\n') { '\n' } else { ',' };
        let mut segments: Vec<&str> = raw
            .split(separator)
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .collect();

        let last = segments.pop()?;
        let mut address = Address::default();
        match CODE_POSTAL.captures(last) {
            Some(x) => {
                address.code = Some(x[1].to_string());
                address.postal = Some(x[2].trim().to_string());
            }
            None => address.trailing = Some(last.to_string()),
        }

        address.city = segments.pop().map(str::to_string);
        if !segments.is_empty() {
            address.street = Some(segments.join(", "));
        }

        Some(address)
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(x) = &self.street {
            lines.push(x.clone());
        }

        match (&self.city, &self.code) {
            (Some(city), Some(code)) => lines.push(format!("{city} {code}")),
            (Some(x), None) | (None, Some(x)) => lines.push(x.clone()),
            (None, None) => {}
        }

        if self.code.is_some() {
            lines.extend(self.postal.clone());
        } else {
            lines.extend(self.trailing.clone());
        }

        lines
    }
}
