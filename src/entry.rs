//! Cookbook entries and their validation
//!
//! Entries arrive as untrusted JSON. [`build_entry`] turns the raw name, type
//! and payload into a typed [`Entry`] or rejects the whole thing. It never
//! touches the store beyond a duplicate-name lookup; committing is the
//! caller's job.

use crate::error::{CookbookError, Result};
use crate::name::{CanonicalName, canonicalize};
use crate::store::EntryStore;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// A base ingredient. Leaf of every recipe graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: CanonicalName,
    pub cook_time: u64,
}

/// One dependency of a recipe and how many units of it one recipe needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredItem {
    pub name: CanonicalName,
    pub quantity: u64,
}

/// A recipe made from other recipes and ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: CanonicalName,
    pub required_items: Vec<RequiredItem>,
}

/// Anything stored in the cookbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entry {
    pub fn name(&self) -> &CanonicalName {
        match self {
            Entry::Ingredient(ingredient) => &ingredient.name,
            Entry::Recipe(recipe) => &recipe.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Ingredient(_) => "ingredient",
            Entry::Recipe(_) => "recipe",
        }
    }
}

/// Build a validated entry from raw request fields.
///
/// `payload` is the request object carrying `cookTime` for ingredients or
/// `requiredItems` for recipes. A single malformed required item rejects
/// the entire recipe.
pub fn build_entry(
    raw_name: &str,
    raw_type: &str,
    payload: &Value,
    existing: &EntryStore,
) -> Result<Entry> {
    let name = canonicalize(raw_name)?;

    if existing.contains(name.as_str()) {
        return Err(CookbookError::DuplicateName(name));
    }

    match raw_type {
        "ingredient" => build_ingredient(name, payload).map(Entry::Ingredient),
        "recipe" => build_recipe(name, payload).map(Entry::Recipe),
        other => Err(CookbookError::UnknownType(other.to_string())),
    }
}

fn build_ingredient(name: CanonicalName, payload: &Value) -> Result<Ingredient> {
    let cook_time = payload
        .get("cookTime")
        .ok_or_else(|| schema("ingredient is missing cookTime"))?;
    let cook_time = non_negative_int(cook_time, "cookTime")?;

    Ok(Ingredient { name, cook_time })
}

fn build_recipe(name: CanonicalName, payload: &Value) -> Result<Recipe> {
    let items = payload
        .get("requiredItems")
        .and_then(Value::as_array)
        .ok_or_else(|| schema("recipe requires a requiredItems array"))?;

    let mut seen = HashSet::new();
    let mut required_items = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let raw_item_name = item
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| schema(format!("requiredItems[{}] needs a string name", i)))?;
        let quantity = item
            .get("quantity")
            .ok_or_else(|| schema(format!("requiredItems[{}] needs a quantity", i)))?;
        let quantity = non_negative_int(quantity, "quantity")?;
        if quantity == 0 {
            return Err(schema(format!("requiredItems[{}] quantity must be positive", i)));
        }

        let item_name = canonicalize(raw_item_name)?;
        if !seen.insert(item_name.clone()) {
            return Err(CookbookError::DuplicateName(item_name));
        }

        required_items.push(RequiredItem {
            name: item_name,
            quantity,
        });
    }

    Ok(Recipe {
        name,
        required_items,
    })
}

/// Accept JSON integers only; floats and booleans are schema errors.
fn non_negative_int(value: &Value, field: &str) -> Result<u64> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    if value.as_i64().is_some() {
        return Err(schema(format!("{} must not be negative", field)));
    }
    Err(schema(format!("{} must be an integer", field)))
}

fn schema(msg: impl Into<String>) -> CookbookError {
    CookbookError::SchemaInvalid(msg.into())
}

/// The `name` and `type` fields pulled out of an entry request body.
#[derive(Debug, Clone)]
pub struct EntryRequest<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub body: &'a Value,
}

impl<'a> EntryRequest<'a> {
    /// Extract the raw fields from a flat JSON request object.
    pub fn from_json(body: &'a Value) -> Result<Self> {
        let name = non_empty_str(body, "name")?;
        let kind = non_empty_str(body, "type")?;
        Ok(Self { name, kind, body })
    }

    pub fn build(&self, existing: &EntryStore) -> Result<Entry> {
        build_entry(self.name, self.kind, self.body, existing)
    }
}

fn non_empty_str<'a>(body: &'a Value, field: &str) -> Result<&'a str> {
    match body.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(schema(format!("entry requires a non-empty string {}", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(entries: &[Value]) -> EntryStore {
        let mut store = EntryStore::new();
        for body in entries {
            let entry = EntryRequest::from_json(body).unwrap().build(&store).unwrap();
            store.commit(entry).unwrap();
        }
        store
    }

    #[test]
    fn test_build_ingredient() {
        let store = EntryStore::new();
        let entry = build_entry("egg", "ingredient", &json!({"cookTime": 6}), &store).unwrap();
        match entry {
            Entry::Ingredient(ingredient) => {
                assert_eq!(ingredient.name, "Egg");
                assert_eq!(ingredient.cook_time, 6);
            }
            other => panic!("expected ingredient, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_cook_time_is_allowed() {
        let store = EntryStore::new();
        assert!(build_entry("Flour", "ingredient", &json!({"cookTime": 0}), &store).is_ok());
    }

    #[test]
    fn test_negative_cook_time_rejected() {
        let store = EntryStore::new();
        let err = build_entry("beef", "ingredient", &json!({"cookTime": -1}), &store).unwrap_err();
        assert!(matches!(err, CookbookError::SchemaInvalid(_)));
    }

    #[test]
    fn test_cook_time_must_be_integer() {
        let store = EntryStore::new();
        for payload in [
            json!({}),
            json!({"cookTime": "5"}),
            json!({"cookTime": 1.5}),
            json!({"cookTime": true}),
            json!({"cookTime": null}),
        ] {
            let err = build_entry("beef", "ingredient", &payload, &store).unwrap_err();
            assert!(matches!(err, CookbookError::SchemaInvalid(_)), "{payload}");
        }
    }

    #[test]
    fn test_build_recipe_canonicalizes_items_in_order() {
        let store = EntryStore::new();
        let payload = json!({"requiredItems": [
            {"name": "beef-patty", "quantity": 2},
            {"name": "  bun ", "quantity": 1},
        ]});
        let entry = build_entry("burger", "recipe", &payload, &store).unwrap();
        let Entry::Recipe(recipe) = entry else {
            panic!("expected recipe");
        };
        assert_eq!(recipe.name, "Burger");
        let names: Vec<_> = recipe.required_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Beef Patty", "Bun"]);
        assert_eq!(recipe.required_items[0].quantity, 2);
    }

    #[test]
    fn test_recipe_with_no_items_is_allowed() {
        let store = EntryStore::new();
        let entry = build_entry("air", "recipe", &json!({"requiredItems": []}), &store).unwrap();
        assert!(matches!(entry, Entry::Recipe(r) if r.required_items.is_empty()));
    }

    #[test]
    fn test_recipe_requires_items_array() {
        let store = EntryStore::new();
        for payload in [json!({}), json!({"requiredItems": "beef"}), json!({"cookTime": 8})] {
            let err = build_entry("Beef", "recipe", &payload, &store).unwrap_err();
            assert!(matches!(err, CookbookError::SchemaInvalid(_)));
        }
    }

    #[test]
    fn test_one_bad_item_rejects_recipe() {
        let store = EntryStore::new();
        for bad in [
            json!({"name": "Bun"}),
            json!({"quantity": 1}),
            json!({"name": 7, "quantity": 1}),
            json!({"name": "Bun", "quantity": 0}),
            json!({"name": "Bun", "quantity": -2}),
            json!({"name": "Bun", "quantity": 1.5}),
            json!("Bun"),
        ] {
            let payload = json!({"requiredItems": [{"name": "Beef", "quantity": 1}, bad]});
            let err = build_entry("Burger", "recipe", &payload, &store).unwrap_err();
            assert!(matches!(err, CookbookError::SchemaInvalid(_)), "{payload}");
        }
    }

    #[test]
    fn test_item_with_unparseable_name_rejects_recipe() {
        let store = EntryStore::new();
        let payload = json!({"requiredItems": [{"name": "123", "quantity": 1}]});
        let err = build_entry("Burger", "recipe", &payload, &store).unwrap_err();
        assert!(matches!(err, CookbookError::NameRejected(_)));
    }

    #[test]
    fn test_duplicate_required_items_rejected() {
        let store = EntryStore::new();
        let payload = json!({"requiredItems": [
            {"name": "Egg", "quantity": 1},
            {"name": "e-g-g", "quantity": 2},
        ]});
        // "e-g-g" is "E G G", not a duplicate
        assert!(build_entry("Omelette", "recipe", &payload, &store).is_ok());

        let payload = json!({"requiredItems": [
            {"name": "Egg", "quantity": 1},
            {"name": "  EGG!! ", "quantity": 2},
        ]});
        let err = build_entry("Omelette", "recipe", &payload, &store).unwrap_err();
        assert_eq!(err, CookbookError::DuplicateName(canonicalize("egg").unwrap()));
    }

    #[test]
    fn test_existing_name_rejected_for_any_type() {
        let store = store_with(&[json!({"type": "ingredient", "name": "Beef", "cookTime": 10})]);

        let err = build_entry("beef", "ingredient", &json!({"cookTime": 8}), &store).unwrap_err();
        assert!(matches!(err, CookbookError::DuplicateName(_)));

        let err = build_entry("BEEF", "recipe", &json!({"cookTime": 8}), &store).unwrap_err();
        assert!(matches!(err, CookbookError::DuplicateName(_)));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let store = EntryStore::new();
        let err = build_entry("pan", "pan", &json!({"cookTime": 20}), &store).unwrap_err();
        assert_eq!(err, CookbookError::UnknownType("pan".into()));
    }

    #[test]
    fn test_bad_name_rejected_before_type() {
        let store = EntryStore::new();
        let err = build_entry("!!!", "pan", &json!({}), &store).unwrap_err();
        assert!(matches!(err, CookbookError::NameRejected(_)));
    }

    #[test]
    fn test_request_requires_name_and_type() {
        for body in [
            json!({"type": "ingredient", "cookTime": 1}),
            json!({"name": "Egg", "cookTime": 1}),
            json!({"name": "", "type": "ingredient", "cookTime": 1}),
            json!({"name": 5, "type": "ingredient", "cookTime": 1}),
            json!([]),
        ] {
            assert!(EntryRequest::from_json(&body).is_err(), "{body}");
        }
    }

    #[test]
    fn test_entry_serializes_with_type_tag() {
        let store = EntryStore::new();
        let entry = build_entry("egg", "ingredient", &json!({"cookTime": 6}), &store).unwrap();
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"type": "ingredient", "name": "Egg", "cookTime": 6})
        );

        let payload = json!({"requiredItems": [{"name": "egg", "quantity": 2}]});
        let entry = build_entry("omelette", "recipe", &payload, &store).unwrap();
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "type": "recipe",
                "name": "Omelette",
                "requiredItems": [{"name": "Egg", "quantity": 2}],
            })
        );
    }
}
