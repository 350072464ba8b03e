pub mod enrichment;
pub mod movie_search;
pub mod providers;

pub use providers::{MovieCatalog, TmdbProvider};
