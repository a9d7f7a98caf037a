//! Romshelf CLI
//!
//! Browse the ROM catalog, manage favorites and launch games from a terminal.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use romshelf_config::RomshelfConfig;
use romshelf_emulator::{EmulatorLauncher, TargetMode};
use romshelf_library::{
    Category, DirectoryAssets, Item, Library, PreferenceStore, SqlitePreferenceStore,
};

#[derive(Debug, Parser)]
#[command(name = "romshelf", version, about = "Browse and launch NES ROMs")]
struct Cli {
    /// Configuration file (defaults to the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one category, or all of them
    List {
        /// Category name ("All Games", "Music", "Favorites", "Recent")
        category: Option<String>,
    },
    /// Search games or music by ROM path
    Search {
        query: String,
        #[arg(short, long, default_value = "All Games")]
        category: String,
    },
    /// Add or remove a favorite
    Favorite {
        #[arg(value_enum)]
        action: FavoriteAction,
        /// ROM path, e.g. "roms/Contra.nes"
        rom: String,
    },
    /// Launch a ROM in the native emulator
    Launch {
        rom: String,
        /// Load the cheat cartridge alongside the game
        #[arg(long)]
        genie: bool,
        /// Render for a television
        #[arg(long)]
        tv: bool,
    },
    /// Import favorites/recent from the old semicolon-joined format
    ImportLegacy {
        #[arg(long)]
        favorites: Option<String>,
        #[arg(long)]
        recent: Option<String>,
    },
    /// Print favorites/recent in the old semicolon-joined format
    ExportLegacy,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FavoriteAction {
    Add,
    Remove,
}

/// One catalog entry as printed
#[derive(Debug, Serialize)]
struct ItemView<'a> {
    rom: &'a str,
    name: &'a str,
    image: Option<&'a str>,
    year: String,
    developer: &'a str,
    publisher: &'a str,
}

impl<'a> From<&'a Item> for ItemView<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            rom: item.rom(),
            name: item.name(),
            image: item.image(),
            year: item.year_label(),
            developer: item.developer_label(),
            publisher: item.publisher_label(),
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(false).with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<RomshelfConfig> {
    match path {
        Some(path) => RomshelfConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => RomshelfConfig::load_default().context("Failed to load default config"),
    }
}

fn parse_category(name: &str) -> Result<Category> {
    name.parse::<Category>()
        .with_context(|| format!("Expected one of: {}", category_names()))
}

fn category_names() -> String {
    Category::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_items(title: &str, items: &[Arc<Item>], json: bool) -> Result<()> {
    if json {
        let views: Vec<ItemView> = items.iter().map(|i| ItemView::from(&**i)).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!("{} ({})", title, items.len());
    for item in items {
        println!(
            "  {:<40} {:<12} {}",
            item.name(),
            item.year_label(),
            item.rom()
        );
    }
    Ok(())
}

/// Find a catalog item by ROM path, accepting a bare file name too
fn find_item(library: &mut Library, rom: &str) -> Result<Item> {
    let catalog = library.catalog();
    let found = catalog
        .get(rom)
        .or_else(|| catalog.get(&format!("roms/{}", rom)));

    match found {
        Some(item) => Ok(Item::clone(item)),
        None => bail!("No ROM named {} in the catalog", rom),
    }
}

/// Commands that work on the loaded library
fn run(command: Command, library: &mut Library, config: &RomshelfConfig, json: bool) -> Result<()> {
    match command {
        Command::List { category } => match category {
            Some(name) => {
                let category = parse_category(&name)?;
                print_items(category.name(), &library.items(category), json)?;
            }
            None => {
                for (category, items) in library.category_map() {
                    print_items(category.name(), &items, json)?;
                }
            }
        },
        Command::Search { query, category } => {
            let category = parse_category(&category)?;
            if !category.is_searchable() {
                bail!("Only \"All Games\" and \"Music\" can be searched");
            }
            let results = library.search(&query, category);
            print_items(&format!("Results for {:?}", query), &results, json)?;
        }
        Command::Favorite { action, rom } => {
            let item = find_item(library, &rom)?;
            let change = match action {
                FavoriteAction::Add => library.add_to_category(&item, Category::Favorites)?,
                FavoriteAction::Remove => {
                    library.remove_from_category(&item, Category::Favorites)?
                }
            };
            match change {
                Some(change) => println!("{:?} {} in {}", change.kind, change.rom, change.category),
                None => println!("Favorites unchanged"),
            }
        }
        Command::Launch { rom, genie, tv } => {
            let item = find_item(library, &rom)?;
            let mode = if tv {
                TargetMode::Television
            } else {
                TargetMode::Handheld
            };

            let launcher = EmulatorLauncher::from_settings(&config.emulator)?
                .with_working_dir(&config.library.assets_dir);
            let result = launcher.launch_rom(library, &item, genie, mode)?;
            info!("Emulator started with pid {}", result.pid);

            let output = result
                .child
                .wait_with_output()
                .context("Failed to wait for emulator")?;
            if !output.status.success() {
                bail!(
                    "Emulator exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
        }
        Command::ImportLegacy { .. } | Command::ExportLegacy => {
            bail!("Legacy import/export does not need a loaded library")
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let mut store = SqlitePreferenceStore::open(&config.library.database_path).with_context(|| {
        format!(
            "Failed to open preference store {}",
            config.library.database_path.display()
        )
    })?;

    match cli.command {
        Command::ImportLegacy { favorites, recent } => {
            for (category, raw) in [(Category::Favorites, favorites), (Category::Recent, recent)] {
                if let (Some(key), Some(raw)) = (category.store_key(), raw) {
                    let count = store.import_legacy(key, &raw)?;
                    println!("{}: imported {} entries", category, count);
                }
            }
        }
        Command::ExportLegacy => {
            for category in Category::VOLATILE {
                if let Some(key) = category.store_key() {
                    println!("{}={}", key, store.export_legacy(key)?);
                }
            }
        }
        command => {
            info!(
                "Opening library at {} ({} stored favorites)",
                config.library.assets_dir.display(),
                store.load_list("favorites").map(|l| l.len()).unwrap_or(0)
            );
            let mut library = Library::new(DirectoryAssets::new(&config.library.assets_dir), store)
                .with_settings(&config.library);
            library.load();

            run(command, &mut library, &config, cli.json)?;
        }
    }

    Ok(())
}
