//! Name-resolution policy for query paths.

use crate::config::QueryOptions;
use crate::hir::{SchemaType, SemanticModel};

use super::error::QueryError;

/// Decides how identifiers in a query path map to model elements.
///
/// The default methods implement the standard policy; implementors usually
/// only choose case sensitivity.
pub trait UriResolver: Send + Sync {
    /// Whether identifiers are matched ignoring ASCII case.
    fn enable_case_insensitive(&self) -> bool;

    /// Resolve a qualified type name.
    ///
    /// Returns `Ok(None)` when nothing matches. In case-insensitive mode an
    /// exact match wins; otherwise more than one match is an error.
    fn resolve_type<'m>(
        &self,
        model: &'m SemanticModel,
        identifier: &str,
    ) -> Result<Option<SchemaType<'m>>, QueryError> {
        if let Some(ty) = model.find_type(identifier) {
            return Ok(Some(ty));
        }
        if !self.enable_case_insensitive() {
            return Ok(None);
        }

        let mut matches = model.find_types_ignore_case(identifier);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(QueryError::ambiguous_type(identifier)),
        }
    }
}

/// The standard resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultUriResolver {
    case_insensitive: bool,
}

impl DefaultUriResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
        }
    }

    pub fn from_options(options: &QueryOptions) -> Self {
        Self {
            case_insensitive: options.enable_case_insensitive,
        }
    }
}

impl UriResolver for DefaultUriResolver {
    fn enable_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}
