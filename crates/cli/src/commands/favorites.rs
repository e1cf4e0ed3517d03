//! Favorites commands.

use std::io::Write;

use pizzeria_cart::{Favorite, FavoritesStore};
use pizzeria_core::Price;

use super::CommandResult;

/// Print the favorites, newest first.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn list(store: &FavoritesStore, out: &mut impl Write) -> CommandResult {
    if store.items().is_empty() {
        writeln!(out, "No favorites yet")?;
        return Ok(());
    }
    for favorite in store.items() {
        let price = favorite.price.map(|p| Price::usd(p).display()).unwrap_or_default();
        writeln!(out, "{:<24} {:<28} {price}", favorite.id, favorite.name)?;
    }
    Ok(())
}

/// Toggle a favorite and print its new state.
///
/// # Errors
///
/// Returns the save error if the change was not persisted, or an error if
/// writing the output fails.
pub fn toggle(store: &mut FavoritesStore, favorite: Favorite, out: &mut impl Write) -> CommandResult {
    let id = favorite.id.clone();
    let now_favorite = store.toggle(favorite);
    check_saved(store)?;
    if now_favorite {
        writeln!(out, "Added {id} to favorites")?;
    } else {
        writeln!(out, "Removed {id} from favorites")?;
    }
    Ok(())
}

/// Remove a favorite by id.
///
/// # Errors
///
/// Returns the save error if the change was not persisted, or an error if
/// writing the output fails.
pub fn remove(store: &mut FavoritesStore, id: &str, out: &mut impl Write) -> CommandResult {
    let removed = store.remove(id);
    check_saved(store)?;
    if removed {
        writeln!(out, "Removed {id} from favorites")?;
    } else {
        writeln!(out, "{id} is not a favorite")?;
    }
    Ok(())
}

/// Remove every favorite.
///
/// # Errors
///
/// Returns the save error if the change was not persisted, or an error if
/// writing the output fails.
pub fn clear(store: &mut FavoritesStore, out: &mut impl Write) -> CommandResult {
    store.clear();
    check_saved(store)?;
    writeln!(out, "Favorites cleared")?;
    Ok(())
}

/// A change that was not saved is lost when the process exits.
fn check_saved(store: &mut FavoritesStore) -> CommandResult {
    match store.take_persist_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
