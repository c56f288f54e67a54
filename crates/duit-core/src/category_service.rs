//! Category reference data: list and create.

use tracing::debug;

use duit_domain::{Book, Category, CategoryDraft};

use crate::CoreError;

/// Stateless category operations over a caller-owned [`Book`].
///
/// Categories are read-mostly reference data; only listing and creation are
/// supported.
pub struct CategoryService;

impl CategoryService {
    pub fn create(book: &mut Book, draft: CategoryDraft) -> Result<Category, CoreError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(
                "category name must not be empty".into(),
            ));
        }
        if book.category_named(name).is_some() {
            return Err(CoreError::Validation(format!(
                "category `{name}` already exists"
            )));
        }
        let id = book.allocate_id();
        let category = Category::from_draft(id, CategoryDraft::new(name, draft.kind));
        book.push_category(category.clone());
        debug!(%id, name, "category created");
        Ok(category)
    }

    /// Returns the stored sequence in insertion order.
    pub fn list(book: &Book) -> &[Category] {
        &book.categories
    }

    /// Looks a category up by its exact name.
    pub fn find(book: &Book, name: &str) -> Result<Category, CoreError> {
        book.category_named(name)
            .cloned()
            .ok_or_else(|| CoreError::CategoryNotFound(name.to_string()))
    }
}
