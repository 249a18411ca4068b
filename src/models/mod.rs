pub mod catalog;
pub mod filters;
pub mod movie;

pub use catalog::{CatalogGenre, CatalogMovie, GenreMap};
pub use filters::{DiscoverQuery, FilterCriteria};
pub use movie::Movie;
