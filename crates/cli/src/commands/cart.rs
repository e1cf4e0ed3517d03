//! Cart commands.

use std::io::Write;

use pizzeria_cart::{
    AddItem, CartPersistence, CartStore, OrderSummary, ProductKind, QuickAdd, SizeOption,
    size_options,
};
use pizzeria_core::{ApiItem, Category, CurrencyCode, MenuItem};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use super::CommandResult;

/// Print the cart lines and order summary.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn show<P: CartPersistence>(
    store: &CartStore<P>,
    delivery_fee: Decimal,
    as_json: bool,
    out: &mut impl Write,
) -> CommandResult {
    let summary = OrderSummary::new(store.totals(), delivery_fee, CurrencyCode::USD);

    if as_json {
        let body = json!({ "items": store.items(), "summary": summary });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(());
    }

    if store.items().is_empty() {
        writeln!(out, "Cart is empty")?;
    }
    for item in store.items() {
        writeln!(
            out,
            "{:<32} {:<28} x{:<4} {}",
            item.key.as_str(),
            item.name,
            item.quantity,
            pizzeria_core::Price::usd(item.line_total())
        )?;
    }
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    writeln!(out, "Delivery: {}", summary.delivery_fee)?;
    writeln!(out, "Total:    {}", summary.total)?;
    writeln!(out, "Items:    {}", summary.item_count)?;
    Ok(())
}

/// Report the outcome of a cart change.
///
/// A change that could not be saved is an error for the CLI, since the
/// in-memory cart is gone once the process exits.
///
/// # Errors
///
/// Returns the save error if the change was not persisted, or an error if
/// writing the output fails.
pub fn report<P: CartPersistence>(
    store: &mut CartStore<P>,
    changed: bool,
    out: &mut impl Write,
) -> CommandResult {
    if let Some(e) = store.take_persist_error() {
        return Err(e.into());
    }
    if changed {
        info!(lines = store.items().len(), "Cart updated");
        writeln!(
            out,
            "Cart updated: {} item(s), subtotal {}",
            store.total_quantity(),
            pizzeria_core::Price::usd(store.subtotal())
        )?;
    } else {
        writeln!(out, "Cart unchanged")?;
    }
    Ok(())
}

/// Find a size option by its label or the label's first word
/// (`large` matches `Large (0.7 L)`).
#[must_use]
pub fn find_size<'a>(options: &'a [SizeOption], size: &str) -> Option<&'a SizeOption> {
    let wanted = size.trim().to_lowercase();
    options.iter().find(|option| {
        let label = option.label.to_lowercase();
        label == wanted || label.split_whitespace().next() == Some(wanted.as_str())
    })
}

/// Add one unit of a sized product.
///
/// # Errors
///
/// Returns an error if `size` names none of the product's sizes.
pub fn add_size<P: CartPersistence>(
    store: &mut CartStore<P>,
    base: &str,
    name: &str,
    base_price: Decimal,
    kind: ProductKind,
    size: &str,
    image_path: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let options = size_options(kind, base_price);
    let option = find_size(&options, size).ok_or_else(|| format!("Unknown {kind} size: {size}"))?;
    Ok(store.add(AddItem::sized(base, name, image_path, kind, option)))
}

/// Add one unit of a menu item given as the menu API returns it.
///
/// # Errors
///
/// Returns an error if `raw` is not a menu document, or if the item is sold
/// in sizes and has to go through `add-size`.
pub fn quick_add<P: CartPersistence>(
    store: &mut CartStore<P>,
    raw: &str,
    category: Category,
) -> Result<bool, Box<dyn std::error::Error>> {
    let raw: ApiItem = serde_json::from_str(raw)?;
    let item = MenuItem::normalize(raw, category);
    match store.quick_add(&item) {
        QuickAdd::Added => Ok(true),
        QuickAdd::Unchanged => Ok(false),
        QuickAdd::NeedsSize(kind) => Err(format!(
            "{} is sold in sizes, use add-size {} --kind {kind}",
            item.name, item.id
        )
        .into()),
    }
}

/// Print the size options of a product.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn sizes(kind: ProductKind, base_price: Decimal, out: &mut impl Write) -> CommandResult {
    for option in size_options(kind, base_price) {
        writeln!(out, "{:<16} {}", option.label, pizzeria_core::Price::usd(option.price))?;
    }
    Ok(())
}
