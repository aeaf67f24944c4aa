//! # Categories
//!
//! Categories are never stored by the Gateway; they are derived from
//! whatever threads the store currently knows about.

use domains::Thread;

/// Distinct non-blank categories in first-seen order.
///
/// Blankness is judged after trimming, but the original value is kept.
pub fn derive_categories(threads: &[Thread]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in threads.iter().map(|t| &t.category) {
        if category.trim().is_empty() || categories.contains(category) {
            continue;
        }
        categories.push(category.clone());
    }
    categories
}
