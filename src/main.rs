//! Soup search CLI - Run searches from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use soup_search::{
    schema::SearchConfig,
    sim::{Field, soup::SoupSearch},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life soup search from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to search configuration file");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");

        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: SearchConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("Soup Search");
    println!("===========");
    println!("Field: {}x{}", config.field.size, config.field.size);
    println!("Spawn region: {}x{}", config.spawn.width, config.spawn.height);
    println!("Attempts: {}", config.attempts);
    println!("Steps per attempt: {}", config.steps);
    println!();

    let mut search = SoupSearch::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // Print progress every 10%
    println!("Searching...");
    let last_decile = Cell::new(0);
    let outcome = search.run_with_callback(|progress| {
        if progress.total_attempts == 0 {
            return;
        }
        let decile = progress.attempt * 10 / progress.total_attempts;
        if decile > last_decile.get() {
            last_decile.set(decile);
            let best = progress
                .best
                .as_ref()
                .map(|best| best.score.to_string())
                .unwrap_or_else(|| "-".into());
            println!(
                "  Attempt {}/{}: best={}",
                progress.attempt, progress.total_attempts, best
            );
        }
    });

    println!();
    match (&outcome.best, &outcome.soup) {
        (Some(best), Some(soup)) => {
            println!(
                "Best soup: {} live cells after simulation (attempt {})",
                best.score, best.attempt
            );
            println!("Encoded: {}", best.encoded);
            println!();
            print!("{}", render(soup));
            println!();
            let census = soup.census();
            println!(
                "Seed census: {} alive / {} cells",
                census.alive, census.total
            );
        }
        _ => println!("No soup found (no attempts ran)."),
    }
    println!(
        "Time: {:.2}s ({:.0} attempts/s, {} improvements, stopped: {:?})",
        outcome.stats.elapsed_seconds,
        outcome.stats.attempts_per_second,
        outcome.stats.improvements,
        outcome.stats.stop_reason
    );
}

fn render(field: &Field) -> String {
    let mut out = String::with_capacity(field.size() * (field.size() + 1));
    for row in 0..field.size() {
        for col in 0..field.size() {
            out.push(if field.get(row, col) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

fn print_example_config() {
    let config = SearchConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
