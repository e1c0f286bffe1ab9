//! Recipe resolution
//!
//! Expands a recipe into the flat list of base ingredients it needs and the
//! total cook time. Quantities multiply along each path through the graph,
//! so a recipe needing 2 x Dough where Dough needs 3 x Flour yields 6 Flour.
//!
//! Resolution runs in three steps:
//! 1. The target must exist and be a recipe.
//! 2. An iterative DFS over the reachable subgraph rejects cycles and missing
//!    dependencies before any expansion happens.
//! 3. A breadth-first worklist carries `(entry, multiplier)` pairs down to the
//!    ingredient leaves, then the accumulated counts are priced.

use crate::entry::{Entry, Recipe};
use crate::error::{CookbookError, Result};
use crate::name::CanonicalName;
use crate::store::EntryStore;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Upper bound on worklist entries queued for a single resolution.
///
/// Acyclic graphs can still fan out exponentially (every diamond doubles the
/// number of paths), so the cycle check alone does not bound the work. The
/// bound applies to pushes, so the queue itself never holds more than this.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;

/// One base ingredient and how many units the recipe needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientCount {
    pub name: CanonicalName,
    pub quantity: u64,
}

/// A fully resolved recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: CanonicalName,
    pub cook_time: u64,
    /// In the order the traversal first reached each ingredient
    pub ingredients: Vec<IngredientCount>,
}

impl Summary {
    pub fn quantity_of(&self, name: &str) -> Option<u64> {
        self.ingredients
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.quantity)
    }
}

/// Node state for the cycle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    /// Not yet visited
    Unprocessed,
    /// On the current DFS path
    Processing,
    /// Every dependency checked
    Processed,
}

/// Resolves recipes against an [`EntryStore`]
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    max_expansions: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPANSIONS)
    }
}

impl Resolver {
    pub fn new(max_expansions: usize) -> Self {
        Self { max_expansions }
    }

    pub fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Resolve `target` into its base ingredients and total cook time.
    pub fn resolve(&self, target: &CanonicalName, store: &EntryStore) -> Result<Summary> {
        let root = store
            .get(target.as_str())
            .ok_or_else(|| CookbookError::TargetNotFound(target.clone()))?;
        let Entry::Recipe(recipe) = root else {
            return Err(CookbookError::TargetIsIngredient(target.clone()));
        };

        check_acyclic(recipe, store)?;
        let counts = self.flatten(root, store)?;
        price(target, counts, store)
    }

    /// Breadth-first expansion, accumulating multipliers at ingredient leaves
    fn flatten<'a>(
        &self,
        root: &'a Entry,
        store: &'a EntryStore,
    ) -> Result<Vec<(&'a CanonicalName, u64)>> {
        let mut counts: Vec<(&CanonicalName, u64)> = Vec::new();
        let mut index: HashMap<&CanonicalName, usize> = HashMap::new();
        let mut queue: VecDeque<(&Entry, u64)> = VecDeque::new();
        let mut queued = 0usize;
        self.enqueue(&mut queue, &mut queued, root, 1)?;

        while let Some((entry, multiplier)) = queue.pop_front() {
            match entry {
                Entry::Ingredient(ingredient) => match index.get(&ingredient.name) {
                    Some(&i) => {
                        counts[i].1 = counts[i]
                            .1
                            .checked_add(multiplier)
                            .ok_or_else(|| CookbookError::QuantityOverflow(ingredient.name.clone()))?;
                    }
                    None => {
                        index.insert(&ingredient.name, counts.len());
                        counts.push((&ingredient.name, multiplier));
                    }
                },
                Entry::Recipe(recipe) => {
                    for item in &recipe.required_items {
                        let child = store.get(item.name.as_str()).ok_or_else(|| {
                            CookbookError::DanglingDependency {
                                recipe: recipe.name.clone(),
                                missing: item.name.clone(),
                            }
                        })?;
                        let child_multiplier = multiplier
                            .checked_mul(item.quantity)
                            .ok_or_else(|| CookbookError::QuantityOverflow(item.name.clone()))?;
                        self.enqueue(&mut queue, &mut queued, child, child_multiplier)?;
                    }
                }
            }
        }

        Ok(counts)
    }

    /// Push onto the worklist, counting every push against the bound
    fn enqueue<'a>(
        &self,
        queue: &mut VecDeque<(&'a Entry, u64)>,
        queued: &mut usize,
        entry: &'a Entry,
        multiplier: u64,
    ) -> Result<()> {
        *queued += 1;
        if *queued > self.max_expansions {
            return Err(CookbookError::ExpansionLimit(self.max_expansions));
        }
        queue.push_back((entry, multiplier));
        Ok(())
    }
}

/// Resolve with the default expansion bound.
pub fn resolve(target: &CanonicalName, store: &EntryStore) -> Result<Summary> {
    Resolver::default().resolve(target, store)
}

/// Iterative DFS over the recipes reachable from `root`.
///
/// Stack entries are `(recipe, index_of_next_child_to_visit)`. Reaching a
/// recipe that is still on the path is a cycle.
fn check_acyclic<'a>(root: &'a Recipe, store: &'a EntryStore) -> Result<()> {
    let mut state: HashMap<&CanonicalName, NodeState> = HashMap::new();
    let mut stack: Vec<(&Recipe, usize)> = vec![(root, 0)];
    state.insert(&root.name, NodeState::Processing);

    while let Some((recipe, child_idx)) = stack.pop() {
        let Some(item) = recipe.required_items.get(child_idx) else {
            state.insert(&recipe.name, NodeState::Processed);
            continue;
        };
        stack.push((recipe, child_idx + 1));

        let child = store
            .get(item.name.as_str())
            .ok_or_else(|| CookbookError::DanglingDependency {
                recipe: recipe.name.clone(),
                missing: item.name.clone(),
            })?;
        let Entry::Recipe(child) = child else {
            continue;
        };

        match state.get(&child.name).copied().unwrap_or(NodeState::Unprocessed) {
            NodeState::Unprocessed => {
                state.insert(&child.name, NodeState::Processing);
                stack.push((child, 0));
            }
            NodeState::Processing => {
                return Err(CookbookError::CycleDetected {
                    from: recipe.name.clone(),
                    to: child.name.clone(),
                });
            }
            NodeState::Processed => {}
        }
    }

    Ok(())
}

/// Turn accumulated leaf counts into a summary with total cook time
fn price(
    target: &CanonicalName,
    counts: Vec<(&CanonicalName, u64)>,
    store: &EntryStore,
) -> Result<Summary> {
    let mut cook_time: u64 = 0;
    let mut ingredients = Vec::with_capacity(counts.len());

    for (name, quantity) in counts {
        let Some(Entry::Ingredient(ingredient)) = store.get(name.as_str()) else {
            return Err(CookbookError::InconsistentLeaf(name.clone()));
        };
        cook_time = quantity
            .checked_mul(ingredient.cook_time)
            .and_then(|t| cook_time.checked_add(t))
            .ok_or_else(|| CookbookError::QuantityOverflow(name.clone()))?;
        ingredients.push(IngredientCount {
            name: name.clone(),
            quantity,
        });
    }

    Ok(Summary {
        name: target.clone(),
        cook_time,
        ingredients,
    })
}
