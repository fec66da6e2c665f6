//! Truck Inventory - command line front end
//!
//! One command per invocation: load the flavor list, apply the command,
//! save, print. Set RUST_LOG to control log output (default: info).

use clap::{Parser, Subcommand};
use scoop_ledger::{StockTap, Thresholds};
use std::path::{Path, PathBuf};
use truck_inventory::{
    format_inventory_list, format_item_detail, CsvStore, Inventory, ItemStore, Result,
    SqliteStore, TossOutcome,
};

/// Ice-cream truck inventory - reserve, stock and tossed tubs per flavor
#[derive(Parser, Debug)]
#[command(name = "truck_inventory")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(short, long, global = true, default_value_t = default_db_path())]
    database: String,

    /// Use a CSV sheet instead of the database
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Low threshold given to new flavors
    #[arg(long, global = true, default_value_t = Thresholds::default().low)]
    default_low: i64,

    /// High threshold given to new flavors
    #[arg(long, global = true, default_value_t = Thresholds::default().high)]
    default_high: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all flavors, stocked ones first
    List {
        /// Only flavors whose name contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print JSON instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Show reserve, stock, tossed and thresholds of one flavor
    Show {
        /// Position or name of the flavor
        item: String,

        #[arg(long)]
        json: bool,
    },

    /// Create a new flavor
    Add {
        name: String,

        /// Full tubs in reserve
        #[arg(long, default_value_t = 0)]
        reserve: i64,

        /// Full tubs in front stock
        #[arg(long, default_value_t = 0)]
        stock: i64,
    },

    /// Move one tub from reserve to stock
    Promote { item: String },

    /// Open a tub (asks for a toss when one is already open)
    Scoop { item: String },

    /// Toss the open tub
    Toss {
        item: String,

        /// Confirm the toss; without it nothing is recorded
        #[arg(long)]
        yes: bool,
    },

    /// Add delivered tubs to the reserve
    Deliver {
        item: String,

        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Set the low and high thresholds of a flavor
    Thresholds {
        item: String,

        #[arg(long, allow_negative_numbers = true)]
        low: i64,

        #[arg(long, allow_negative_numbers = true)]
        high: i64,
    },

    /// Write the current list to a CSV sheet
    Export {
        /// Target file (default: inventory-YYYY-MM-DD.csv)
        path: Option<PathBuf>,
    },

    /// Replace the current list with the contents of a CSV sheet
    Import { path: PathBuf },
}

/// Returns the default database path: ~/.local/share/truck_inventory/inventory.db
fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("truck_inventory")
        .join("inventory.db")
        .to_string_lossy()
        .to_string()
}

/// Returns today's date as `YYYY-MM-DD` using local system time.
fn today_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let defaults = Thresholds {
        low: cli.default_low,
        high: cli.default_high,
    };

    match cli.csv {
        Some(path) => {
            log::info!("Sheet path: {}", path.display());
            let inventory = Inventory::open(CsvStore::new(path), defaults)?;
            execute(inventory, cli.command)
        }
        None => {
            let db_path = PathBuf::from(&cli.database);
            ensure_parent_dir(&db_path)?;
            let inventory = Inventory::open(SqliteStore::open(&db_path)?, defaults)?;
            execute(inventory, cli.command)
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            log::info!("Created directory: {}", parent.display());
        }
    }
    Ok(())
}

fn execute<S: ItemStore>(mut inventory: Inventory<S>, command: Command) -> Result<()> {
    match command {
        Command::List { search, json } => {
            if json {
                let items: Vec<_> = inventory
                    .ledger()
                    .filtered_display(&search)
                    .into_iter()
                    .map(|(_, item)| item.detail())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print!("{}", format_inventory_list(inventory.ledger(), &search));
            }
        }
        Command::Show { item, json } => {
            let index = inventory.resolve(&item)?;
            if let Some(item) = inventory.ledger().get(index) {
                if json {
                    println!("{}", serde_json::to_string_pretty(&item.detail())?);
                } else {
                    print!("{}", format_item_detail(item));
                }
            }
        }
        Command::Add {
            name,
            reserve,
            stock,
        } => {
            let index = inventory.create_item(&name, reserve, stock)?;
            println!("Added flavor #{}", index);
        }
        Command::Promote { item } => {
            let index = inventory.resolve(&item)?;
            let item = inventory.promote(index)?;
            print!("{}", format_item_detail(&item));
        }
        Command::Scoop { item } => {
            let index = inventory.resolve(&item)?;
            match inventory.tap_stock(index)? {
                StockTap::Scooped => {
                    if let Some(item) = inventory.ledger().get(index) {
                        print!("{}", format_item_detail(item));
                    }
                }
                StockTap::TossPending => {
                    println!(
                        "A tub of this flavor is already open. Toss it? Run `toss {} --yes` to record the loss.",
                        index
                    );
                }
            }
        }
        Command::Toss { item, yes } => {
            let index = inventory.resolve(&item)?;
            match inventory.toss(index, yes)? {
                TossOutcome::Tossed(item) => print!("{}", format_item_detail(&item)),
                TossOutcome::Declined => {
                    println!("Nothing tossed. Someone will eat it. (Pass --yes to toss.)")
                }
            }
        }
        Command::Deliver { item, amount } => {
            let index = inventory.resolve(&item)?;
            let item = inventory.record_delivery(index, amount)?;
            print!("{}", format_item_detail(&item));
        }
        Command::Thresholds { item, low, high } => {
            let index = inventory.resolve(&item)?;
            let item = inventory.update_thresholds(index, low, high)?;
            print!("{}", format_item_detail(&item));
        }
        Command::Export { path } => {
            let path =
                path.unwrap_or_else(|| PathBuf::from(format!("inventory-{}.csv", today_date())));
            let mut sheet = CsvStore::new(&path);
            let count = inventory.export_to(&mut sheet)?;
            println!("Exported {} flavor(s) to {}", count, path.display());
        }
        Command::Import { path } => {
            let count = inventory.import_from(&CsvStore::new(&path))?;
            println!("Imported {} flavor(s) from {}", count, path.display());
        }
    }
    Ok(())
}
