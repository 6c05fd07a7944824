//! Cross-document checks and customer selection for a batch.

use std::collections::HashSet;

use tracing::info;

use crate::error::BatchError;
use crate::models::{Customer, Document, SelectionMode};

/// Reconciles a batch of validated documents.
#[derive(Default)]
pub struct BatchReconciler;

impl BatchReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Check brand and identifier consistency, assign selection modes and
    /// return the customer list shared by every document.
    ///
    /// Documents are left untouched when an error is returned.
    pub fn reconcile(&self, docs: &mut [Document]) -> Result<Vec<Customer>, BatchError> {
        if docs.is_empty() {
            return Err(BatchError::Empty);
        }

        let mut brands: Vec<String> = Vec::new();
        for doc in docs.iter() {
            if !brands.contains(&doc.brand) {
                brands.push(doc.brand.clone());
            }
        }
        if brands.len() > 1 {
            return Err(BatchError::MixedBrands { brands });
        }

        let mut seen = HashSet::new();
        for doc in docs.iter() {
            if !seen.insert(doc.identifier.as_str()) {
                return Err(BatchError::DuplicateIdentifier {
                    identifier: doc.identifier.clone(),
                });
            }
        }

        let any_outlets = docs.iter().any(|d| !d.outlets.is_empty());
        for doc in docs.iter_mut() {
            doc.selection_mode = if !doc.outlets.is_empty() {
                SelectionMode::IndividualSelectedCustomers
            } else if any_outlets {
                SelectionMode::ExcludedSelectedCustomers
            } else {
                SelectionMode::IndividualAllocation
            };
        }

        let customers: Vec<Customer> = docs
            .iter()
            .find(|d| !d.outlets.is_empty())
            .map(|d| d.outlets.iter().map(Customer::from).collect())
            .unwrap_or_default();

        info!(
            "Reconciled {} document(s), {} shared customer(s)",
            docs.len(),
            customers.len()
        );
        Ok(customers)
    }
}
