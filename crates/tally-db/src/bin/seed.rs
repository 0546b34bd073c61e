//! # Demo Catalog Seeder
//!
//! Fills an empty database with goods so the API has something to sell.
//!
//! ```bash
//! cargo run -p tally-db --bin seed                       # 200 goods into ./data/tally.db
//! cargo run -p tally-db --bin seed -- --count 40
//! cargo run -p tally-db --bin seed -- --db /tmp/demo.db
//! ```
//!
//! A database that already holds goods is left alone.

use std::time::Instant;

use tally_core::{Money, NewGood};
use tally_db::{Database, DbConfig};

const DEFAULT_COUNT: usize = 200;
const DEFAULT_DB: &str = "./data/tally.db";

const USAGE: &str = "\
Usage: seed [--count N] [--db PATH]

  -c, --count <N>    Goods to create (default 200, capped by the catalog size)
  -d, --db <PATH>    SQLite file (default ./data/tally.db)
  -h, --help         Print this text";

const ITEMS: &[&str] = &[
    "Wood Screws",
    "Drywall Anchors",
    "Hex Bolts",
    "Wing Nuts",
    "Zip Ties",
    "Duct Tape",
    "Masking Tape",
    "Sandpaper Sheets",
    "Paint Brush",
    "Paint Roller",
    "Wall Hooks",
    "Cable Clips",
    "Extension Cord",
    "LED Bulb",
    "Fuse",
    "Hose Clamp",
    "Washers",
    "Picture Wire",
    "Wood Glue",
    "Silicone Sealant",
];

/// Variant label and price step in cents.
const VARIANTS: &[(&str, i64)] = &[
    ("Mini", 0),
    ("Standard", 75),
    ("Heavy Duty", 150),
    ("Box of 10", 400),
    ("Box of 25", 900),
    ("Box of 50", 1600),
    ("Contractor Pack", 2500),
    ("Bulk Crate", 4000),
    ("Sample", 0),
    ("Refill", 50),
];

#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    count: usize,
    db: String,
}

/// `Ok(None)` means help was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<SeedArgs>, String> {
    let mut parsed = SeedArgs {
        count: DEFAULT_COUNT,
        db: DEFAULT_DB.to_string(),
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "-c" | "--count" => {
                let value = args.next().ok_or("--count needs a value")?;
                parsed.count = value
                    .parse()
                    .map_err(|_| format!("--count expects a number, got '{}'", value))?;
            }
            "-d" | "--db" => {
                parsed.db = args.next().ok_or("--db needs a path")?;
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(Some(parsed))
}

/// The full demo catalog: every item in every variant, names unique.
fn catalog() -> impl Iterator<Item = NewGood> {
    ITEMS.iter().enumerate().flat_map(|(i, item)| {
        VARIANTS.iter().enumerate().map(move |(v, (variant, step))| {
            let n = (i * VARIANTS.len() + v) as i64;
            NewGood {
                name: format!("{} ({})", item, variant),
                quantity: (n * 7) % 60,
                price: Money::from_cents(99 + (n * 37) % 900 + step),
            }
        })
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    let db = Database::new(DbConfig::new(&args.db)).await?;
    let goods = db.goods();

    let existing = goods.count().await?;
    if existing > 0 {
        println!("{} already holds {} goods, nothing to do", args.db, existing);
        db.close().await;
        return Ok(());
    }

    let started = Instant::now();
    let mut inserted = 0usize;
    for good in catalog().take(args.count) {
        let name = good.name.clone();
        match goods.insert(good).await {
            Ok(_) => inserted += 1,
            Err(e) => eprintln!("skipped {}: {}", name, e),
        }
    }

    println!(
        "Seeded {} goods into {} in {:?}",
        inserted,
        args.db,
        started.elapsed()
    );

    db.close().await;
    Ok(())
}
