//! Parser for movie catalog CSV files.
//!
//! The catalog is a CSV file with a header row. Only these columns are read:
//!
//! `index, title, genres, keywords, tagline, cast, director`
//!
//! Any other column (budget, overview, crew, ...) is ignored, so the wide
//! TMDB-style export can be loaded as-is. Empty cells become `None`.

use crate::error::{DataLoadError, Result};
use crate::types::Movie;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parse a catalog file from disk
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_movies_from_reader(file, &file_name)
}

/// Parse catalog rows from any reader.
///
/// `source` only labels error messages.
pub fn parse_movies_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<Movie>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    check_required_columns(&mut csv_reader, source)?;

    let mut movies = Vec::new();
    for record in csv_reader.deserialize::<Movie>() {
        let movie = record.map_err(|e| to_parse_error(e, source))?;
        movies.push(movie);
    }

    Ok(movies)
}

/// Columns without which a row cannot become a [`Movie`]
const REQUIRED_COLUMNS: [&str; 2] = ["index", "title"];

fn check_required_columns<R: Read>(reader: &mut csv::Reader<R>, source: &str) -> Result<()> {
    let headers = reader.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::ParseError {
                file: source.to_string(),
                line: 1,
                reason: format!("Missing required column '{}'", column),
            });
        }
    }
    Ok(())
}

/// Attach file and line context to a CSV deserialization failure
fn to_parse_error(err: csv::Error, source: &str) -> DataLoadError {
    match err.position() {
        Some(pos) => DataLoadError::ParseError {
            file: source.to_string(),
            line: pos.line(),
            reason: err.to_string(),
        },
        None => DataLoadError::Csv(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
index,budget,genres,keywords,tagline,title,cast,director
0,237000000,Action Adventure,culture clash future,Enter the World of Pandora.,Avatar,Sam Worthington Zoe Saldana,James Cameron
1,300000000,Adventure Fantasy,ocean drug abuse,\"At the end of the world, the adventure begins.\",Pirates of the Caribbean: At World's End,Johnny Depp,Gore Verbinski
2,0,,,,Untitled Project,,
";

    #[test]
    fn test_parse_sample() {
        let movies = parse_movies_from_reader(SAMPLE.as_bytes(), "movies.csv").unwrap();
        assert_eq!(movies.len(), 3);

        assert_eq!(movies[0].index, 0);
        assert_eq!(movies[0].title, "Avatar");
        assert_eq!(movies[0].director.as_deref(), Some("James Cameron"));

        // Quoted field keeps its embedded comma
        assert_eq!(
            movies[1].tagline.as_deref(),
            Some("At the end of the world, the adventure begins.")
        );
    }

    #[test]
    fn test_empty_cells_are_none() {
        let movies = parse_movies_from_reader(SAMPLE.as_bytes(), "movies.csv").unwrap();
        let untitled = &movies[2];
        assert!(untitled.genres.is_none());
        assert!(untitled.keywords.is_none());
        assert!(untitled.tagline.is_none());
        assert!(untitled.cast.is_none());
        assert!(untitled.director.is_none());
    }

    #[test]
    fn test_missing_optional_columns() {
        let csv = "index,title\n0,Avatar\n";
        let movies = parse_movies_from_reader(csv.as_bytes(), "movies.csv").unwrap();
        assert_eq!(movies.len(), 1);
        assert!(movies[0].genres.is_none());
    }

    #[test]
    fn test_missing_title_column() {
        let csv = "index,genres\n0,Action\n";
        let err = parse_movies_from_reader(csv.as_bytes(), "movies.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_invalid_index() {
        let csv = "index,title\nzero,Avatar\n";
        let err = parse_movies_from_reader(csv.as_bytes(), "movies.csv").unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, "movies.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
