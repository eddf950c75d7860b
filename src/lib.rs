pub mod app;
pub mod category;
pub mod config;
mod error;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod layer;
pub mod legend;
pub mod page;
pub mod popup;
pub mod surface;

pub use _model::{Dataset, RegionChoice, StoreFeature, StoreProperties};
pub use error::{Error, Result};
