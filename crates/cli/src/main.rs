//! Pizzeria CLI - Cart and favorites from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add two Margheritas and show the cart
//! pz-cli add marg "Margherita" 11.99 --quantity 2
//! pz-cli show
//!
//! # Add a large cola (priced off the base price)
//! pz-cli add-size cola "Cola" 2.50 --kind drinks --size large
//!
//! # Quick add a side straight from a menu document
//! pz-cli quick-add --category sides '{"_id":"garlic","name":"Garlic bread","price":4.25,"image":"g.png"}'
//!
//! # Product card minus button for every size of a pizza
//! pz-cli step-down marg --sized
//!
//! # Toggle a favorite
//! pz-cli favorites toggle marg "Margherita" /img/marg.png
//! ```
//!
//! # Commands
//!
//! - `show` - Print lines and the order summary
//! - `add`, `add-size`, `quick-add` - Add products
//! - `remove`, `remove-product`, `set`, `inc`, `dec`, `clear` - Edit lines
//! - `step-down`, `step-up` - Product card quantity controls
//! - `sizes` - List size options and prices
//! - `favorites` - Manage saved favorites

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use pizzeria_cart::{AddItem, CartStore, Favorite, FavoritesStore, JsonSlot, ProductKind};
use pizzeria_core::Category;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CommandResult, cart, favorites};
use crate::config::{CliConfig, LogFormat};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pz-cli")]
#[command(author, version, about = "Pizzeria cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart and order summary
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a product
    Add {
        product_id: String,
        name: String,
        price: Decimal,

        /// Units to add (fractions are floored, minimum 1)
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<f64>,

        /// Variant (e.g. size) kept as a separate line
        #[arg(long)]
        variant: Option<String>,

        /// Image path shown with the line
        #[arg(long, default_value = "")]
        image: String,

        /// Category tag (e.g. `pizza`, `drinks`)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Add one unit of a sized pizza or drink
    AddSize {
        base_product_id: String,
        name: String,
        /// Menu (medium) price
        price: Decimal,

        #[arg(long)]
        kind: ProductKind,

        /// `small`, `medium` or `large`
        #[arg(long)]
        size: String,

        #[arg(long, default_value = "")]
        image: String,
    },
    /// Add one unit of a menu item from its menu API JSON
    QuickAdd {
        /// Menu document, e.g. `{"_id":"t1","name":"Tiramisu","price":6.5,"image":"t.png"}`
        item: String,

        /// Menu category the item was listed under
        #[arg(long)]
        category: Category,
    },
    /// Remove a line by key
    Remove { key: String },
    /// Remove the plain (variant-less) line of a product
    RemoveProduct { product_id: String },
    /// Set a line's quantity; zero or less removes it
    Set {
        key: String,
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },
    /// Add one unit to a line
    Inc { key: String },
    /// Take one unit off a line (never below one)
    Dec { key: String },
    /// Take one unit off a product's last line, removing it at one
    StepDown {
        base_product_id: String,
        /// Match every size of the product
        #[arg(long)]
        sized: bool,
    },
    /// Add one unit to a product's last line
    StepUp {
        base_product_id: String,
        #[arg(long)]
        sized: bool,
    },
    /// Empty the cart
    Clear,
    /// List size options for a product
    Sizes {
        #[arg(long)]
        kind: ProductKind,
        /// Menu (medium) price
        price: Decimal,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites, newest first
    List,
    /// Add a favorite, or remove it if already saved
    Toggle {
        id: String,
        name: String,
        image_url: String,
        #[arg(long)]
        price: Option<Decimal>,
    },
    /// Remove a favorite
    Remove { id: String },
    /// Remove every favorite
    Clear,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pz_cli=info,pizzeria_cart=info".into());
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &CliConfig) -> CommandResult {
    let storage = commands::open_storage(config);
    let mut out = std::io::stdout().lock();
    let mut store = CartStore::open(JsonSlot::cart(storage.clone()));

    let changed = match cli.command {
        Commands::Show { json } => return cart::show(&store, config.delivery_fee, json, &mut out),
        Commands::Sizes { kind, price } => return cart::sizes(kind, price, &mut out),
        Commands::Favorites { action } => {
            let favorites = FavoritesStore::open(JsonSlot::favorites(storage));
            return run_favorites(action, favorites, &mut out);
        }
        Commands::Add {
            product_id,
            name,
            price,
            quantity,
            variant,
            image,
            kind,
        } => {
            let mut item = AddItem::new(product_id, name, price).with_image(image);
            item.quantity = quantity;
            item.variant_key = variant;
            item.kind = kind;
            store.add(item)
        }
        Commands::AddSize {
            base_product_id,
            name,
            price,
            kind,
            size,
            image,
        } => cart::add_size(&mut store, &base_product_id, &name, price, kind, &size, &image)?,
        Commands::QuickAdd { item, category } => cart::quick_add(&mut store, &item, category)?,
        Commands::Remove { key } => store.remove(&key),
        Commands::RemoveProduct { product_id } => store.remove_product(&product_id),
        Commands::Set { key, quantity } => store.set_quantity(&key, quantity),
        Commands::Inc { key } => store.increment(&key),
        Commands::Dec { key } => store.decrement(&key),
        Commands::StepDown {
            base_product_id,
            sized,
        } => store.step_down(&base_product_id, sized),
        Commands::StepUp {
            base_product_id,
            sized,
        } => store.step_up(&base_product_id, sized),
        Commands::Clear => store.clear(),
    };

    cart::report(&mut store, changed, &mut out)
}

fn run_favorites(
    action: FavoritesAction,
    mut store: FavoritesStore,
    out: &mut impl Write,
) -> CommandResult {
    match action {
        FavoritesAction::List => favorites::list(&store, out),
        FavoritesAction::Toggle {
            id,
            name,
            image_url,
            price,
        } => {
            let mut favorite = Favorite::new(id, name, image_url);
            favorite.price = price;
            favorites::toggle(&mut store, favorite, out)
        }
        FavoritesAction::Remove { id } => favorites::remove(&mut store, &id, out),
        FavoritesAction::Clear => favorites::clear(&mut store, out),
    }
}
