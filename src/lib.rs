//! In-memory cookbook of ingredients and recipes
//!
//! Entries are keyed by a canonical name produced by [`canonicalize`]. Recipes
//! list required items by name and quantity; [`resolve`] expands a recipe into
//! the base ingredients it needs and the total cook time.
//!
//! # Example
//!
//! ```
//! use cookbook::{EntryStore, build_entry, canonicalize, resolve};
//! use serde_json::json;
//!
//! let mut store = EntryStore::new();
//! for (name, kind, payload) in [
//!     ("egg", "ingredient", json!({"cookTime": 3})),
//!     ("omelette", "recipe", json!({"requiredItems": [{"name": "Egg", "quantity": 2}]})),
//! ] {
//!     let entry = build_entry(name, kind, &payload, &store).unwrap();
//!     store.commit(entry).unwrap();
//! }
//!
//! let summary = resolve(&canonicalize("Omelette").unwrap(), &store).unwrap();
//! assert_eq!(summary.cook_time, 6);
//! assert_eq!(summary.quantity_of("Egg"), Some(2));
//! ```
//!
//! # Names
//!
//! `"chicken-soup_2!"` canonicalizes to `"Chicken Soup"`: separators become
//! spaces, anything that is not a letter is dropped, and every word is
//! title-cased. Input without a single ASCII letter is rejected.
//!
//! # Resolution
//!
//! Quantities multiply along every path from the target to an ingredient.
//! Cycles and missing dependencies are rejected, and the total number of
//! expansions is bounded (see [`Resolver`]).

pub mod config;
pub mod entry;
pub mod error;
pub mod name;
pub mod output;
pub mod resolve;
pub mod seed;
pub mod server;
pub mod store;

pub use config::Config;
pub use entry::{Entry, EntryRequest, Ingredient, Recipe, RequiredItem, build_entry};
pub use error::CookbookError;
pub use name::{CanonicalName, canonicalize};
pub use resolve::{IngredientCount, Resolver, Summary, resolve};
pub use store::{EntryStore, SharedStore};
