use crate::clean;

/// Short code selecting a marker image, e.g. `korean` or `halal`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconKey(String);

impl IconKey {
    pub const DEFAULT: &'static str = "general";

    pub fn from_raw(raw: Option<&str>) -> Self {
        match clean(raw) {
            Some(x) => Self(x.to_lowercase()),
            None => Self(Self::DEFAULT.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Image path relative to the page. Whether the file exists is not checked.
    pub fn path(&self) -> String {
        format!("icons/{}.png", self.0)
    }
}
