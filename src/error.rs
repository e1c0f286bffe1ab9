//! Cookbook error types.

use crate::name::CanonicalName;
use thiserror::Error;

/// Errors produced while building entries or resolving recipes.
///
/// Every variant is a recoverable rejection. The HTTP layer collapses all of
/// them into one client error; the variant only matters for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CookbookError {
    #[error("not a valid name: {0:?}")]
    NameRejected(String),

    #[error("invalid entry: {0}")]
    SchemaInvalid(String),

    #[error("duplicate name: {0}")]
    DuplicateName(CanonicalName),

    #[error("unknown entry type: {0:?}")]
    UnknownType(String),

    #[error("entry not found: {0}")]
    TargetNotFound(CanonicalName),

    #[error("{0} is an ingredient, only recipes can be summarised")]
    TargetIsIngredient(CanonicalName),

    #[error("recipe {recipe} requires missing item {missing}")]
    DanglingDependency {
        recipe: CanonicalName,
        missing: CanonicalName,
    },

    #[error("{0} was collected as an ingredient but is not one")]
    InconsistentLeaf(CanonicalName),

    #[error("dependency cycle detected: {from} -> {to}")]
    CycleDetected {
        from: CanonicalName,
        to: CanonicalName,
    },

    #[error("expansion limit of {0} exceeded")]
    ExpansionLimit(usize),

    #[error("quantity overflow while expanding {0}")]
    QuantityOverflow(CanonicalName),
}

pub type Result<T, E = CookbookError> = std::result::Result<T, E>;
