use std::env;
use std::fs;

use anyhow::Result;

use litscreen_cache::{CacheSettings, SearchCache};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let argv: Vec<String> = env::args().collect();
    let command = argv.get(1).map(String::as_str).unwrap_or("config");

    let settings = CacheSettings::load()?;
    let cache = SearchCache::from_settings(&settings)?;

    match command {
        "config" => {
            println!("🗂  litscreen search cache");
            println!("==========================");
            println!("backend: {}", settings.backend);
            println!("ttl_hours: {}", settings.ttl_hours);
            match cache.cache_dir() {
                Some(dir) => {
                    let entries = fs::read_dir(dir)
                        .map(|it| {
                            it.filter_map(|e| e.ok())
                                .filter(|e| e.path().extension().map_or(false, |x| x == "json"))
                                .count()
                        })
                        .unwrap_or(0);
                    println!("dir: {} ({} entries)", dir.display(), entries);
                }
                None => println!("dir: (in-memory, per process)"),
            }
        }
        "clear" => {
            cache.clear();
            println!("✅ Cache cleared");
        }
        other => {
            eprintln!("Usage: {} <config|clear>", argv[0]);
            eprintln!("Unknown command: {}", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
