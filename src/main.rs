//! Recipe Box entry point
//!
//! On the web this wires the page. Natively it submits one record built from
//! `field=value` arguments into in-memory storage, which is handy for poking
//! at the controller without a browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    recipe_box::web::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> recipe_box::Result<()> {
    use recipe_box::{Config, FormController, MemoryStore, MemorySurface, RecipeStore};

    env_logger::init();
    log::info!("Recipe Box (native) starting...");
    log::info!("Native mode uses in-memory storage - run with `trunk serve` for the web page");

    let config = Config::default();
    let record = record_from_args(std::env::args().skip(1));
    if record.is_empty() {
        log::warn!("No field=value arguments given, nothing to submit");
        return Ok(());
    }

    let store = RecipeStore::with_key(MemoryStore::new(), config.storage_key.clone());
    let mut controller = FormController::new(store, MemorySurface::new(), config.commit_order);
    controller.init()?;
    controller.submit(record)?;

    for (i, card) in controller.surface().cards().iter().enumerate() {
        let fields: Vec<String> = card.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("card {}: {}", i + 1, fields.join(" "));
    }
    Ok(())
}

/// Collect `field=value` arguments into a record, skipping anything else
#[cfg(not(target_arch = "wasm32"))]
fn record_from_args(args: impl IntoIterator<Item = String>) -> recipe_box::Record {
    args.into_iter()
        .filter_map(|arg| {
            let pair = arg.split_once('=').map(|(k, v)| (k.to_string(), v.to_string()));
            if pair.is_none() {
                log::warn!("Ignoring argument '{}' (expected field=value)", arg);
            }
            pair
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_from_args() {
        let record = record_from_args(args(&["title=Pasta", "minutes=20", "oops"]));
        assert_eq!(record.get("title"), Some("Pasta"));
        assert_eq!(record.get("minutes"), Some("20"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_from_no_pairs_is_empty() {
        assert!(record_from_args(args(&[])).is_empty());
        assert!(record_from_args(args(&["plain", "words"])).is_empty());
    }
}
