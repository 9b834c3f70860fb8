//! Whole-model validation.
//!
//! Every element computes its own diagnostics lazily; validation forces them
//! all and gathers the results. Elements are checked in parallel since each
//! one only reads its own cells and the immutable syntax.

use rayon::prelude::*;
use tracing::debug;

use super::diagnostics::EdmError;
use super::element::EdmCheckable;
use super::model::SemanticModel;

impl SemanticModel {
    /// All diagnostics of the model, in declaration order.
    ///
    /// Construction errors come first, then element errors, then errors of
    /// annotations whose target did not resolve. An empty result means the
    /// model is valid.
    pub fn validate(&self) -> Vec<EdmError> {
        let elements = self.elements();

        let element_errors: Vec<EdmError> = elements
            .par_iter()
            .flat_map_iter(|element| element.errors().iter().cloned())
            .collect();

        let annotation_errors = self
            .vocabulary_annotations()
            .iter()
            .flat_map(|annotation| annotation.errors().iter().cloned());

        let mut errors = self.construction_errors().to_vec();
        errors.extend(element_errors);
        errors.extend(annotation_errors);

        debug!(
            elements = elements.len(),
            errors = errors.len(),
            "validated semantic model"
        );
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
