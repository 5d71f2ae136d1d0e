//! Previous/next navigation over a collection's identifiers.
//!
//! The identifier list is treated as a ring: stepping back from the first
//! identifier lands on the last one and vice versa.

use crate::repository::ArticleRepository;
use crate::source::TabularSource;
use crate::types::Direction;

/// Step from `current` in `direction` over the ring of `identifiers`.
///
/// Returns `current` unchanged when it is not in the list.
///
/// # Examples
/// ```
/// use vademecum_reader::navigation::next;
/// use vademecum_reader::types::Direction;
///
/// let ids = ["3", "5", "8"].map(String::from);
/// assert_eq!(next(&ids, "8", Direction::Next), "3");
/// assert_eq!(next(&ids, "3", Direction::Previous), "8");
/// assert_eq!(next(&ids, "99", Direction::Next), "99");
/// ```
pub fn next(identifiers: &[String], current: &str, direction: Direction) -> String {
    let Some(index) = identifiers.iter().position(|id| id == current) else {
        return current.to_string();
    };

    let last = identifiers.len() - 1;
    let target = match direction {
        Direction::Previous if index == 0 => last,
        Direction::Previous => index - 1,
        Direction::Next if index == last => 0,
        Direction::Next => index + 1,
    };
    identifiers[target].clone()
}

/// Navigation backed by a repository listing.
pub struct Navigator<'a, S: ?Sized> {
    repository: ArticleRepository<'a, S>,
}

impl<'a, S: TabularSource + ?Sized> Navigator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            repository: ArticleRepository::new(source),
        }
    }

    /// Fetch the identifiers of `collection` and step from `current`.
    ///
    /// An unavailable source behaves like an empty list, so `current` is
    /// returned unchanged.
    pub async fn step(
        &self,
        current: &str,
        collection: Option<&str>,
        direction: Direction,
    ) -> String {
        let identifiers = self.repository.all_identifiers(collection).await;
        next(&identifiers, current, direction)
    }
}
