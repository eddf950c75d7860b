mod address;
mod clean;
mod dataset;
mod icon;
mod region;
mod store;

pub use address::Address;
pub use clean::{clean, clean_value, truthy};
pub use dataset::{Dataset, StoreFeature};
pub use icon::IconKey;
pub use region::RegionChoice;
pub use store::StoreProperties;
