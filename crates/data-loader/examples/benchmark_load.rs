use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/movies.csv");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_files(path)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let missing_taglines = catalog
        .movies()
        .iter()
        .filter(|m| m.tagline.is_none())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Distinct titles: {}", catalog.distinct_titles());
    println!("Movies without tagline: {}", missing_taglines);
    println!("\nPerformance: {:.0} movies/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
