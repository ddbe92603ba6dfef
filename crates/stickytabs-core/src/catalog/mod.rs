mod loader;
pub mod rows;
mod section;

pub use loader::{Catalog, CatalogItem, Hero};
pub use rows::{flatten, FlatRow, FlatRows, Row};
pub use section::{duplicate_ids, tab_titles, Section};
