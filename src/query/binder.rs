//! Binding of type-cast segments at the head of a query path.
//!
//! In `NS.Employee/NS.Manager/NumberOfReports`, the leading qualified
//! segments are type casts that narrow the current type; the first ordinary
//! segment ends the run and is left for the caller to bind as a property.
//!
//! ```text
//! current: Person
//!   NS.Employee ─► TypeSegment(Employee)   current: Employee
//!   NS.Manager  ─► TypeSegment(Manager)    current: Manager
//!   NumberOfReports                        first non-type token
//! ```

use tracing::trace;

use crate::config::QueryOptions;
use crate::hir::{EdmSchemaElement, SchemaType, SemanticModel, StructuredType};
use crate::syntax::PathSegmentToken;

use super::error::QueryError;
use super::resolver::{DefaultUriResolver, UriResolver};
use super::segment::{FollowedTypeSegments, TypeSegment};

/// Follow the type casts at the head of the chain starting at `first_token`.
///
/// `first_token` must itself be qualified. Each consumed token must name
/// `current` or a type derived from it. Fewer than `max_depth` tokens may be
/// consumed: once the count reaches `max_depth` the call fails before the
/// next token is looked at, so an otherwise valid path that is too long
/// still fails.
///
/// A qualified token with no successor is not consumed: it is returned as
/// the first non-type token, since it may name a bound operation rather than
/// a cast. The depth limit still applies when such a token follows the last
/// cast.
///
/// On success `current` is set to the narrowest type reached. On failure it
/// is left untouched.
pub fn follow_type_segments<'t, 'm>(
    first_token: &'t PathSegmentToken,
    model: &'m SemanticModel,
    max_depth: usize,
    resolver: &dyn UriResolver,
    current: &mut StructuredType<'m>,
) -> Result<FollowedTypeSegments<'t>, QueryError> {
    if !first_token.is_namespace_or_container_qualified() {
        return Err(QueryError::non_type_segment(first_token.identifier()));
    }

    let mut cursor = *current;
    let mut token = first_token;
    let mut segments = Vec::new();
    let mut depth = 0;

    while token.is_namespace_or_container_qualified() {
        let Some(next) = token.next_token() else {
            break;
        };
        if depth >= max_depth {
            return Err(QueryError::PathTooDeep { max_depth });
        }

        let target = resolve_cast(model, resolver, token.identifier(), cursor)?;
        trace!(
            segment = token.identifier(),
            from = %cursor.full_name(),
            depth,
            "followed type segment"
        );
        segments.push(TypeSegment {
            identifier: token.identifier().into(),
            edm_type: target.id(),
            previous_type: cursor.id(),
        });

        cursor = target;
        token = next;
        depth += 1;
        if depth >= max_depth {
            return Err(QueryError::PathTooDeep { max_depth });
        }
    }

    *current = cursor;
    Ok(FollowedTypeSegments {
        segments,
        first_non_type_token: token,
    })
}

/// Resolve `identifier` as a cast from `current`.
fn resolve_cast<'m>(
    model: &'m SemanticModel,
    resolver: &dyn UriResolver,
    identifier: &str,
    current: StructuredType<'m>,
) -> Result<StructuredType<'m>, QueryError> {
    let target = match resolver.resolve_type(model, identifier)? {
        Some(SchemaType::Structured(target)) => target,
        Some(SchemaType::Enum(_)) => {
            return Err(QueryError::incompatible_type(identifier, current.full_name()));
        }
        None => return Err(QueryError::type_not_found(identifier)),
    };
    if !target.is_or_inherits_from(current.id()) {
        return Err(QueryError::incompatible_type(identifier, current.full_name()));
    }
    Ok(target)
}

/// A model paired with binding options, for callers binding many paths.
pub struct TypeSegmentBinder<'m> {
    model: &'m SemanticModel,
    max_depth: usize,
    resolver: Box<dyn UriResolver + 'm>,
}

impl<'m> TypeSegmentBinder<'m> {
    pub fn new(model: &'m SemanticModel, options: &QueryOptions) -> Self {
        Self {
            model,
            max_depth: options.max_path_depth,
            resolver: Box::new(DefaultUriResolver::from_options(options)),
        }
    }

    /// Replace the resolution policy.
    pub fn with_resolver(mut self, resolver: impl UriResolver + 'm) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Follow the leading casts of `path` starting from `start`.
    ///
    /// Returns the segments with the narrowest type reached.
    pub fn bind<'t>(
        &self,
        path: &'t PathSegmentToken,
        start: StructuredType<'m>,
    ) -> Result<(FollowedTypeSegments<'t>, StructuredType<'m>), QueryError> {
        let mut current = start;
        let followed =
            follow_type_segments(path, self.model, self.max_depth, self.resolver.as_ref(), &mut current)?;
        Ok((followed, current))
    }
}
