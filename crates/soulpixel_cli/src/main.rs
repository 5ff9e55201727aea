//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `soulpixel_core` linkage.
//! - Optionally summarize the board stored in a database file.
//!
//! Usage: `soulpixel_cli [db_path]`

use soulpixel_core::db::open_db;
use soulpixel_core::{SqliteThoughtStorage, StoreConfig, ThoughtStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("soulpixel_core ping={}", soulpixel_core::ping());
    println!("soulpixel_core version={}", soulpixel_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match summarize(&db_path) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("board summary failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let config = StoreConfig::default();
    let storage = SqliteThoughtStorage::try_new(&conn, config.storage_key.as_str())?;
    let store = ThoughtStore::load(storage, config)?;

    let comments: usize = store.thoughts().iter().map(|t| t.comments.len()).sum();
    let with_mood = store.thoughts().iter().filter(|t| t.mood.is_some()).count();
    Ok(format!(
        "board key={} thoughts={} with_mood={} comments={} legacy_pending={}",
        store.storage().key(),
        store.len(),
        with_mood,
        comments,
        store.migration_pending()
    ))
}
