//! Completion predicates
//!
//! A predicate classifies a single snapshot item as "this is the result of the
//! operation I triggered". It is called against every item of every snapshot,
//! including items unrelated to the operation, so it has to positively
//! identify relevance and tolerate missing optional fields.

/// Pure item classifier
pub trait Predicate<T>: Send + Sync {
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// Both predicates must match
pub struct And<A, B>(pub A, pub B);

impl<T, A, B> Predicate<T> for And<A, B>
where
    A: Predicate<T>,
    B: Predicate<T>,
{
    fn matches(&self, item: &T) -> bool {
        self.0.matches(item) && self.1.matches(item)
    }
}

/// Combinators for predicates
pub trait PredicateExt<T>: Predicate<T> + Sized {
    fn and<B: Predicate<T>>(self, other: B) -> And<Self, B> {
        And(self, other)
    }
}

impl<T, P: Predicate<T>> PredicateExt<T> for P {}

/// Index of the first item `predicate` accepts
pub fn first_match<T, P>(items: &[T], predicate: &P) -> Option<usize>
where
    P: Predicate<T> + ?Sized,
{
    items.iter().position(|item| predicate.matches(item))
}
