//! # Data Loader Crate
//!
//! This crate loads the movie catalog that the recommender is built from.
//!
//! ## Main Components
//!
//! - **types**: `Movie` and `Catalog`
//! - **parser**: Parse the catalog CSV into `Movie` rows
//! - **index**: Build and validate the `Catalog`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_files(Path::new("data/movies.csv"))?;
//!
//! let index = catalog.index_of_title("Avatar").unwrap();
//! let movie = catalog.get_movie(index).unwrap();
//! println!("{} is directed by {:?}", movie.title, movie.director);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Catalog, Movie, MovieIndex};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.titles().is_empty());
    }

    #[test]
    fn test_insert_movie() {
        let mut catalog = Catalog::new();

        let movie = Movie::new(0, "Avatar")
            .with_genres("Action Adventure Fantasy")
            .with_director("James Cameron");

        catalog.insert_movie(movie.clone());

        let retrieved = catalog.get_movie(0).unwrap();
        assert_eq!(retrieved, &movie);
        assert_eq!(catalog.titles(), &["Avatar".to_string()]);
    }

    #[test]
    fn test_duplicate_titles_keep_first() {
        let mut catalog = Catalog::new();
        catalog.insert_movie(Movie::new(0, "The Host"));
        catalog.insert_movie(Movie::new(1, "Heat"));
        catalog.insert_movie(Movie::new(2, "The Host"));

        assert_eq!(catalog.index_of_title("The Host"), Some(0));
        assert_eq!(catalog.distinct_titles(), 2);
        assert_eq!(catalog.titles().len(), 3);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();
        assert!(catalog.get_movie(999).is_none());
        assert!(catalog.index_of_title("Avatar").is_none());
    }
}
