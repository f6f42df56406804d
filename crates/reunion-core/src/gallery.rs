//! List utilities for the gallery and the contact directory: filtering,
//! Fisher–Yates shuffling and page slicing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::{ContactRecord, MediaItem, MediaKind};

/// Upper bound for a requested page size
pub const MAX_PAGE_SIZE: usize = 200;

/// One page of a larger list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    /// Length of the full list before slicing
    pub total: usize,
    pub has_more: bool,
}

/// Shuffle in place. A seed makes the order reproducible.
pub fn shuffle<T>(items: &mut [T], seed: Option<u64>) {
    match seed {
        Some(seed) => items.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => items.shuffle(&mut rand::rng()),
    }
}

/// Shuffle everything except the first item, which stays in place.
pub fn shuffle_pinned_first<T>(items: &mut [T], seed: Option<u64>) {
    if let Some((_, rest)) = items.split_first_mut() {
        shuffle(rest, seed);
    }
}

/// Slice out a 1-based page. `page` 0 is treated as 1 and `per_page` is clamped
/// to `1..=MAX_PAGE_SIZE`.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
    let total = items.len();
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total,
        has_more: end < total,
    }
}

/// Keep media of the given kind whose name contains `query` (case-insensitive).
pub fn filter_media(items: Vec<MediaItem>, kind: Option<MediaKind>, query: Option<&str>) -> Vec<MediaItem> {
    let query = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    items
        .into_iter()
        .filter(|item| kind.is_none_or(|k| item.kind == k))
        .filter(|item| {
            query
                .as_ref()
                .is_none_or(|q| item.name.to_lowercase().contains(q.as_str()))
        })
        .collect()
}

/// Whether a contact matches a directory search.
///
/// Name, email and blood group match case-insensitively; phone and WhatsApp
/// numbers match the query as typed.
pub fn contact_matches(contact: &ContactRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    contact.name.to_lowercase().contains(&query)
        || contact.email.to_lowercase().contains(&query)
        || contact.phone.contains(&query)
        || contact
            .whatsapp
            .as_deref()
            .is_some_and(|w| w.contains(&query))
        || contact
            .blood_group
            .as_deref()
            .is_some_and(|b| b.to_lowercase().contains(&query))
}

pub fn search_contacts(contacts: Vec<ContactRecord>, query: Option<&str>) -> Vec<ContactRecord> {
    match query {
        Some(q) => contacts
            .into_iter()
            .filter(|c| contact_matches(c, q))
            .collect(),
        None => contacts,
    }
}
