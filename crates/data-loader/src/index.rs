//! Catalog building and validation.
//!
//! Loading is a one-time initialization step: parse the CSV, insert every
//! row in order, then check the invariants the recommendation core relies
//! on (indices are zero-based, contiguous and match row position; every
//! movie has a title).

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Load and validate a catalog CSV file
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_files(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);

        let movies = parser::parse_movies(path)?;
        let catalog = Self::from_movies(movies)?;

        info!(
            "Catalog loaded: {} movies, {} distinct titles",
            catalog.len(),
            catalog.distinct_titles()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-parsed movies, in the order given
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for movie in movies {
            catalog.insert_movie(movie);
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate catalog integrity
    ///
    /// Check that:
    /// - Every movie's index equals its row position
    /// - Every movie has a non-empty title
    pub fn validate(&self) -> Result<()> {
        for (position, movie) in self.movies.iter().enumerate() {
            if movie.index != position {
                return Err(DataLoadError::ValidationError(format!(
                    "movie '{}' has index {} but sits at row {}",
                    movie.title, movie.index, position
                )));
            }
            if movie.title.trim().is_empty() {
                return Err(DataLoadError::InvalidValue {
                    field: "title".to_string(),
                    value: format!("<empty> at index {}", movie.index),
                });
            }
        }

        let duplicates = self.len() - self.distinct_titles();
        if duplicates > 0 {
            debug!(
                "{} rows repeat an earlier title; lookups resolve to the first occurrence",
                duplicates
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_movies_valid() {
        let catalog = Catalog::from_movies(vec![
            Movie::new(0, "Avatar"),
            Movie::new(1, "Titanic"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.index_of_title("Titanic"), Some(1));
    }

    #[test]
    fn test_non_contiguous_index_rejected() {
        let err = Catalog::from_movies(vec![
            Movie::new(0, "Avatar"),
            Movie::new(2, "Titanic"),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError(_)));
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = Catalog::from_movies(vec![Movie::new(0, "  ")]).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "index,title,genres,director").unwrap();
        writeln!(file, "0,Avatar,Action,James Cameron").unwrap();
        writeln!(file, "1,Avatar,Drama,").unwrap();
        writeln!(file, "2,Heat,Crime,Michael Mann").unwrap();

        let catalog = Catalog::load_from_files(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.distinct_titles(), 2);
        // Duplicate title resolves to the first row
        assert_eq!(catalog.index_of_title("Avatar"), Some(0));
        assert!(catalog.get_movie(1).unwrap().director.is_none());
    }

    #[test]
    fn test_load_dataset() {
        // This test requires the actual dataset file
        // Place movies.csv in ../../data/
        let path = Path::new("../../data/movies.csv");

        if path.exists() {
            let catalog = Catalog::load_from_files(path).unwrap();
            assert!(!catalog.is_empty());
            assert_eq!(catalog.titles().len(), catalog.len());
        }
    }
}
