//! Core domain types for the movie catalog.
//!
//! A [`Movie`] is one row of the catalog. The [`Catalog`] owns every movie
//! in load order and keeps the lookups the recommendation core needs:
//! the plain title list (input for fuzzy matching) and a title → index map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the catalog (0..N-1, assigned once at load)
pub type MovieIndex = usize;

// =============================================================================
// Movie
// =============================================================================

/// One catalog entry.
///
/// The five text attributes are optional: a missing cell in the source data
/// is `None`, and downstream code treats it as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub index: MovieIndex,
    pub title: String,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl Movie {
    /// Create a movie with only a title; text attributes start out missing
    pub fn new(index: MovieIndex, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            genres: None,
            keywords: None,
            tagline: None,
            cast: None,
            director: None,
        }
    }

    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = Some(genres.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }
}

// =============================================================================
// Catalog - the ordered, in-memory movie store
// =============================================================================

/// Ordered set of movies available for recommendation.
///
/// Movies are stored in index order, so `movies[i].index == i` once the
/// catalog has been validated. Titles may repeat; `title_index` remembers
/// the first occurrence only.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    /// Titles in catalog order (the candidate list for fuzzy matching)
    pub(crate) titles: Vec<String>,
    /// Title -> first catalog index carrying it
    pub(crate) title_index: HashMap<String, MovieIndex>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            titles: Vec::new(),
            title_index: HashMap::new(),
        }
    }

    /// Get a movie by its catalog index
    pub fn get_movie(&self, index: MovieIndex) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Look up the first catalog index carrying exactly this title
    pub fn index_of_title(&self, title: &str) -> Option<MovieIndex> {
        self.title_index.get(title).copied()
    }

    /// All titles in catalog order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Append a movie and update the title lookup.
    ///
    /// A repeated title keeps pointing at its earliest index.
    pub fn insert_movie(&mut self, movie: Movie) {
        self.title_index
            .entry(movie.title.clone())
            .or_insert(movie.index);
        self.titles.push(movie.title.clone());
        self.movies.push(movie);
    }

    /// Number of distinct titles (less than `len()` when titles repeat)
    pub fn distinct_titles(&self) -> usize {
        self.title_index.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
