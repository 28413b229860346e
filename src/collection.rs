//! Collection - an ordered, growable sequence with a fluent operation set.
//!
//! Everything sequential lives here: end operations, clamped positional
//! inserts, deep-equality search, quantifiers, transforms, random
//! selection, and the serde boundary. The concurrent batch operations are
//! in [`crate::batch`].

use core::cmp::Ordering;
use core::slice;

use rand::{Rng, RngExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, growable sequence of values with chainable operations.
///
/// A thin wrapper around `Vec<T>`. Element order is significant and
/// preserved by every operation except [`reverse`](Self::reverse),
/// [`sort`](Self::sort), and [`sort_by`](Self::sort_by). Valid indices are
/// `[0, len)`; reads that can miss return [`Option`] and positional writes
/// clamp, so no method here panics on out-of-range input.
///
/// The type itself places no bounds on `T`. Individual operations ask for
/// what they need: `T: PartialEq` for equality search, `T: Clone` for
/// copying transforms, `T: Ord` for natural sort, `T: Serialize` for the
/// JSON boundary.
///
/// # Example
///
/// ```
/// use fluentseq::Collection;
///
/// let mut fruits = Collection::from(["apple", "orange", "strawberry"]);
///
/// fruits.push("cherry");
/// fruits.insert_at("banana", 1);
///
/// assert_eq!(fruits.items(), ["apple", "banana", "orange", "strawberry", "cherry"]);
/// assert_eq!(fruits.find_index(|_, name| name.starts_with('s')), Some(3));
/// assert_eq!(fruits.pop(), Some("cherry"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty collection with room for `capacity` elements
    /// before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the elements as a slice, in order.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the collection and returns the backing vector.
    #[inline]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns an iterator over references to the elements, first to last.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Appends an element, returning the new length.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len()
    }

    /// Appends every element of `items` in order, returning the new length.
    pub fn push_all<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
        self.items.len()
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the collection is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Removes and returns the first element, shifting the rest left.
    ///
    /// Returns `None` if the collection is empty.
    pub fn shift(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.remove(0))
    }

    /// Prepends an element, returning the new length.
    pub fn unshift(&mut self, item: T) -> usize {
        self.items.insert(0, item);
        self.items.len()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Returns `None` if `index` is out of range.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Inserts an element so that it occupies `index`, shifting later
    /// elements right. Out-of-range indices clamp instead of failing.
    ///
    /// The clamp rules: `index == 0` prepends like
    /// [`unshift`](Self::unshift); `index >= len - 1` appends like
    /// [`push`](Self::push). The second rule deliberately includes
    /// `index == len - 1`, so inserting at the last occupied position
    /// appends *after* the final element rather than before it. Interior
    /// indices insert normally.
    ///
    /// # Example
    ///
    /// ```
    /// use fluentseq::Collection;
    ///
    /// let mut fruits = Collection::from(["apple", "orange", "strawberry"]);
    ///
    /// fruits.insert_at("banana", 1);
    /// assert_eq!(fruits.items(), ["apple", "banana", "orange", "strawberry"]);
    ///
    /// // Index 3 is the last occupied position of 4 elements: appends.
    /// fruits.insert_at("cherry", 3);
    /// assert_eq!(fruits.last(), Some(&"cherry"));
    /// ```
    pub fn insert_at(&mut self, item: T, index: usize) -> &mut Self {
        if index == 0 {
            self.items.insert(0, item);
        } else if index >= self.items.len().saturating_sub(1) {
            self.items.push(item);
        } else {
            self.items.insert(index, item);
        }
        self
    }

    /// Inserts an element one position before `index`, with the same clamp
    /// rules as [`insert_at`](Self::insert_at). `index == 0` prepends.
    pub fn insert_before(&mut self, item: T, index: usize) -> &mut Self {
        self.insert_at(item, index.saturating_sub(1))
    }

    /// Inserts an element one position after `index`, with the same clamp
    /// rules as [`insert_at`](Self::insert_at).
    pub fn insert_after(&mut self, item: T, index: usize) -> &mut Self {
        self.insert_at(item, index.saturating_add(1))
    }

    /// Removes every element, keeping allocated capacity. Chainable.
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    /// Returns `true` if any element satisfies the predicate.
    ///
    /// The predicate receives `(index, element)` and the scan stops at the
    /// first match.
    pub fn contains_by<F>(&self, mut f: F) -> bool
    where
        F: FnMut(usize, &T) -> bool,
    {
        self.items.iter().enumerate().any(|(i, item)| f(i, item))
    }

    /// Returns how many elements satisfy the predicate.
    pub fn count_by<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|&item| f(item)).count()
    }

    /// Returns a reference to the first element satisfying the predicate.
    ///
    /// The predicate receives `(index, element)`. Returns `None` when
    /// nothing matches.
    pub fn find<F>(&self, mut f: F) -> Option<&T>
    where
        F: FnMut(usize, &T) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .find(|&(i, item)| f(i, item))
            .map(|(_, item)| item)
    }

    /// Returns the index of the first element satisfying the predicate, or
    /// `None` when nothing matches.
    pub fn find_index<F>(&self, mut f: F) -> Option<usize>
    where
        F: FnMut(usize, &T) -> bool,
    {
        self.items.iter().enumerate().position(|(i, item)| f(i, item))
    }

    /// Returns `true` if at least one element satisfies the predicate.
    pub fn some<F>(&self, mut f: F) -> bool
    where
        F: FnMut(usize, &T) -> bool,
    {
        self.items.iter().enumerate().any(|(i, item)| f(i, item))
    }

    /// Returns `true` if no element satisfies the predicate.
    ///
    /// Vacuously `true` on an empty collection.
    pub fn none<F>(&self, f: F) -> bool
    where
        F: FnMut(usize, &T) -> bool,
    {
        !self.some(f)
    }

    /// Returns `true` if every element satisfies the predicate.
    ///
    /// Vacuously `true` on an empty collection.
    pub fn all<F>(&self, mut f: F) -> bool
    where
        F: FnMut(usize, &T) -> bool,
    {
        self.items.iter().enumerate().all(|(i, item)| f(i, item))
    }

    /// Calls `f` on `(index, element)` in order until `f` returns `true`
    /// or the elements run out. Chainable.
    ///
    /// ```
    /// use fluentseq::Collection;
    ///
    /// let fruits = Collection::from(["apple", "orange", "strawberry"]);
    /// let mut seen = Vec::new();
    ///
    /// fruits.each(|_, name| {
    ///     seen.push(*name);
    ///     *name == "orange" // stop here
    /// });
    ///
    /// assert_eq!(seen, vec!["apple", "orange"]);
    /// ```
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(usize, &T) -> bool,
    {
        for (i, item) in self.items.iter().enumerate() {
            if f(i, item) {
                break;
            }
        }
        self
    }

    /// Builds a new collection by applying `f` to `(index, element)` for
    /// every element, preserving order. The output element type may differ
    /// from the input's.
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(usize, &T) -> U,
    {
        Collection {
            items: self
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| f(i, item))
                .collect(),
        }
    }

    /// Reverses the element order in place. Chainable.
    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    /// Appends every element of `items` in order. Chainable.
    pub fn concat<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
        self
    }

    /// Sorts the elements in place with the given comparator. Chainable.
    ///
    /// The sort is unstable: equal elements may not keep their relative
    /// order.
    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_unstable_by(compare);
        self
    }

    /// Returns a uniformly random valid index drawn from `rng`, covering
    /// the full range `[0, len)`.
    ///
    /// Returns `None` if the collection is empty. Taking the generator as
    /// an argument keeps selection deterministic under a seeded generator:
    ///
    /// ```
    /// use fluentseq::Collection;
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    ///
    /// let fruits = Collection::from(["apple", "orange", "strawberry"]);
    /// let mut rng = SmallRng::seed_from_u64(12345);
    ///
    /// let index = fruits.random_index_with(&mut rng).unwrap();
    /// assert!(index < fruits.len());
    /// ```
    pub fn random_index_with<R>(&self, rng: &mut R) -> Option<usize>
    where
        R: Rng,
    {
        if self.items.is_empty() {
            return None;
        }
        Some(rng.random_range(0..self.items.len()))
    }

    /// Returns a uniformly random valid index from the thread-local
    /// generator, or `None` if the collection is empty.
    pub fn random_index(&self) -> Option<usize> {
        self.random_index_with(&mut rand::rng())
    }

    /// Returns a reference to a uniformly random element drawn from `rng`,
    /// or `None` if the collection is empty.
    pub fn random_with<R>(&self, rng: &mut R) -> Option<&T>
    where
        R: Rng,
    {
        self.random_index_with(rng).map(|index| &self.items[index])
    }

    /// Returns a reference to a uniformly random element from the
    /// thread-local generator, or `None` if the collection is empty.
    pub fn random(&self) -> Option<&T> {
        self.random_with(&mut rand::rng())
    }
}

impl<T: PartialEq> Collection<T> {
    /// Returns `true` if any element equals `item` by structural equality.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Returns how many elements equal `item` by structural equality.
    pub fn count(&self, item: &T) -> usize {
        self.items.iter().filter(|&candidate| candidate == item).count()
    }

    /// Appends each element of `items` that the collection does not
    /// already contain, returning the resulting length.
    ///
    /// Each candidate is checked against the collection as it stands at
    /// that candidate's turn, so duplicates *within* `items` are also
    /// suppressed after the first occurrence.
    ///
    /// # Example
    ///
    /// ```
    /// use fluentseq::Collection;
    ///
    /// let mut fruits = Collection::from(["apple", "orange"]);
    ///
    /// let len = fruits.push_distinct(["orange", "watermelon", "watermelon"]);
    /// assert_eq!(len, 3);
    /// assert_eq!(fruits.items(), ["apple", "orange", "watermelon"]);
    /// ```
    pub fn push_distinct<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            if !self.items.contains(&item) {
                self.items.push(item);
            }
        }
        self.items.len()
    }

    /// Returns the index of the last element equal to `item`, or `None`
    /// if there is no match.
    ///
    /// Scans forward through the whole sequence rather than backward from
    /// the end.
    pub fn last_index_of(&self, item: &T) -> Option<usize> {
        let mut found = None;
        for (i, candidate) in self.items.iter().enumerate() {
            if candidate == item {
                found = Some(i);
            }
        }
        found
    }
}

impl<T: Clone> Collection<T> {
    /// Builds a new collection holding clones of the elements that satisfy
    /// the predicate, relative order preserved.
    pub fn filter<F>(&self, mut f: F) -> Collection<T>
    where
        F: FnMut(&T) -> bool,
    {
        Collection {
            items: self.items.iter().filter(|&item| f(item)).cloned().collect(),
        }
    }

    /// Returns an independent copy of the half-open range `[from, to)`.
    ///
    /// Bounds clamp rather than fail: `to` is limited to the length, then
    /// `from` is limited to `to`, so out-of-range and inverted bounds
    /// yield the valid (possibly empty) sub-range. The copy never aliases
    /// this collection's storage; mutating either side afterwards leaves
    /// the other untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use fluentseq::Collection;
    ///
    /// let fruits = Collection::from(["apple", "orange", "strawberry"]);
    ///
    /// assert_eq!(fruits.slice(0, 2).items(), ["apple", "orange"]);
    /// assert_eq!(fruits.slice(1, 9999).items(), ["orange", "strawberry"]);
    /// assert!(fruits.slice(2, 1).is_empty());
    /// ```
    pub fn slice(&self, from: usize, to: usize) -> Collection<T> {
        let to = to.min(self.items.len());
        let from = from.min(to);
        Collection {
            items: self.items[from..to].to_vec(),
        }
    }
}

impl<T: Default> Collection<T> {
    /// Left-folds the elements into an accumulator of the same type,
    /// starting from `T::default()`.
    ///
    /// `f` receives `(index, element, accumulator)` and returns the next
    /// accumulator. The accumulator type is fixed to the element type; a
    /// fold into a different type is spelled
    /// `collection.iter().fold(...)` instead.
    ///
    /// # Example
    ///
    /// ```
    /// use fluentseq::Collection;
    ///
    /// let words = Collection::from(["a", "b", "c"]);
    ///
    /// let joined = words
    ///     .map(|_, word| word.to_string())
    ///     .reduce(|_, word, acc| acc + word);
    /// assert_eq!(joined, "abc");
    /// ```
    pub fn reduce<F>(&self, mut f: F) -> T
    where
        F: FnMut(usize, &T, T) -> T,
    {
        self.items
            .iter()
            .enumerate()
            .fold(T::default(), |acc, (i, item)| f(i, item, acc))
    }
}

impl<T: Ord> Collection<T> {
    /// Sorts the elements in place by their natural order. Chainable.
    ///
    /// Unstable, like [`sort_by`](Self::sort_by).
    pub fn sort(&mut self) -> &mut Self {
        self.items.sort_unstable();
        self
    }
}

impl<T: Serialize> Collection<T> {
    /// Encodes the elements as a JSON array, in order.
    ///
    /// # Errors
    ///
    /// Returns the underlying encoder error when an element cannot be
    /// structurally encoded (for example a map with non-string keys).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }
}

impl<T: DeserializeOwned> Collection<T> {
    /// Decodes a collection from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the underlying decoder error when `json` is not a valid
    /// array of `T`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let items: Vec<T> = serde_json::from_str(json)?;
        Ok(Self { items })
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T, const N: usize> From<[T; N]> for Collection<T> {
    fn from(items: [T; N]) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Vec::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::deserialize(deserializer).map(|items| Self { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn make_rng() -> SmallRng {
        SmallRng::seed_from_u64(12345)
    }

    fn fruits() -> Collection<&'static str> {
        Collection::from(["apple", "orange", "strawberry"])
    }

    #[test]
    fn new_is_empty() {
        let items: Collection<u32> = Collection::new();
        assert!(items.is_empty());
        assert_eq!(items.len(), 0);
        assert_eq!(items.items(), &[] as &[u32]);
    }

    #[test]
    fn push_returns_new_length() {
        let mut items = Collection::new();
        assert_eq!(items.push("apple"), 1);
        assert_eq!(items.push("orange"), 2);
        assert_eq!(items.items(), ["apple", "orange"]);
    }

    #[test]
    fn push_all_appends_in_order() {
        let mut items = fruits();
        assert_eq!(items.push_all(["cherry", "banana"]), 5);
        assert_eq!(
            items.items(),
            ["apple", "orange", "strawberry", "cherry", "banana"]
        );
    }

    #[test]
    fn pop_returns_last_then_none() {
        let mut items = fruits();
        assert_eq!(items.pop(), Some("strawberry"));
        assert_eq!(items.pop(), Some("orange"));
        assert_eq!(items.pop(), Some("apple"));
        assert_eq!(items.pop(), None);
    }

    #[test]
    fn shift_returns_first_then_none() {
        let mut items = fruits();
        assert_eq!(items.shift(), Some("apple"));
        assert_eq!(items.shift(), Some("orange"));
        assert_eq!(items.shift(), Some("strawberry"));
        assert_eq!(items.shift(), None);
    }

    #[test]
    fn unshift_prepends() {
        let mut items = fruits();
        assert_eq!(items.unshift("kiwi"), 4);
        assert_eq!(items.first(), Some(&"kiwi"));
    }

    #[test]
    fn at_handles_out_of_range() {
        let items = fruits();
        assert_eq!(items.at(0), Some(&"apple"));
        assert_eq!(items.at(2), Some(&"strawberry"));
        assert_eq!(items.at(3), None);
        assert_eq!(items.at(usize::MAX), None);
    }

    #[test]
    fn first_and_last() {
        let items = fruits();
        assert_eq!(items.first(), Some(&"apple"));
        assert_eq!(items.last(), Some(&"strawberry"));

        let empty: Collection<u8> = Collection::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
    }

    #[test]
    fn insert_at_interior() {
        let mut items = fruits();
        items.insert_at("banana", 1);
        assert_eq!(items.items(), ["apple", "banana", "orange", "strawberry"]);
    }

    #[test]
    fn insert_at_zero_prepends() {
        let mut items = fruits();
        items.insert_at("banana", 0);
        assert_eq!(items.first(), Some(&"banana"));
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn insert_at_last_position_appends() {
        // Index len - 1 falls on the append side of the clamp.
        let mut items = fruits();
        items.insert_at("banana", 2);
        assert_eq!(items.items(), ["apple", "orange", "strawberry", "banana"]);
    }

    #[test]
    fn insert_at_beyond_end_appends() {
        let mut items = fruits();
        items.insert_at("banana", 999);
        assert_eq!(items.last(), Some(&"banana"));
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn insert_at_on_empty_appends() {
        let mut items: Collection<u8> = Collection::new();
        items.insert_at(7, 0);
        items.insert_at(9, 5);
        assert_eq!(items.items(), [7, 9]);
    }

    #[test]
    fn insert_before_and_after() {
        let mut items = fruits();
        items.insert_before("banana", 1);
        assert_eq!(
            items.items(),
            ["banana", "apple", "orange", "strawberry"]
        );

        let mut items = fruits();
        items.insert_after("banana", 0);
        assert_eq!(
            items.items(),
            ["apple", "banana", "orange", "strawberry"]
        );

        // Before index 0 saturates to a prepend.
        let mut items = fruits();
        items.insert_before("banana", 0);
        assert_eq!(items.first(), Some(&"banana"));
    }

    #[test]
    fn clear_empties_and_chains() {
        let mut items = fruits();
        assert_eq!(items.clear().push("kiwi"), 1);
        assert_eq!(items.items(), ["kiwi"]);
    }

    #[test]
    fn contains_and_count() {
        let items = Collection::from(["apple", "orange", "orange", "strawberry"]);
        assert!(items.contains(&"orange"));
        assert!(!items.contains(&"watermelon"));
        assert_eq!(items.count(&"orange"), 2);
        assert_eq!(items.count(&"watermelon"), 0);
    }

    #[test]
    fn contains_by_sees_indices() {
        let items = fruits();
        assert!(items.contains_by(|i, name| i == 2 && *name == "strawberry"));
        assert!(!items.contains_by(|i, name| i == 0 && *name == "strawberry"));
    }

    #[test]
    fn count_by_counts_matches() {
        let items = fruits();
        assert_eq!(items.count_by(|name| name.len() > 5), 2);
        assert_eq!(items.count_by(|_| false), 0);
    }

    #[test]
    fn push_distinct_suppresses_duplicates() {
        let mut items = Collection::from(["apple", "orange"]);
        let len = items.push_distinct(["orange", "watermelon"]);
        assert_eq!(len, 3);
        assert_eq!(items.items(), ["apple", "orange", "watermelon"]);
    }

    #[test]
    fn push_distinct_dedupes_within_input() {
        let mut items: Collection<&str> = Collection::new();
        items.push_distinct(["kiwi", "kiwi", "kiwi"]);
        assert_eq!(items.items(), ["kiwi"]);
    }

    #[test]
    fn find_and_find_index_agree() {
        let items = fruits();
        assert_eq!(items.find(|_, name| name.starts_with('o')), Some(&"orange"));
        assert_eq!(items.find_index(|_, name| name.starts_with('o')), Some(1));

        assert_eq!(items.find(|_, name| name.starts_with('z')), None);
        assert_eq!(items.find_index(|_, name| name.starts_with('z')), None);
    }

    #[test]
    fn last_index_of_takes_last_occurrence() {
        let items = Collection::from(["apple", "orange", "orange", "strawberry"]);
        assert_eq!(items.last_index_of(&"orange"), Some(2));
        assert_eq!(items.last_index_of(&"apple"), Some(0));
        assert_eq!(items.last_index_of(&"watermelon"), None);
    }

    #[test]
    fn random_index_covers_full_range() {
        let items = Collection::from([10u8, 20, 30, 40, 50]);
        let mut rng = make_rng();

        let mut seen = [false; 5];
        for _ in 0..200 {
            let index = items.random_index_with(&mut rng).unwrap();
            assert!(index < items.len());
            seen[index] = true;
        }
        // 200 uniform draws over five indices reach every one of them,
        // the last index included.
        assert_eq!(seen, [true; 5]);
    }

    #[test]
    fn random_on_empty_is_none() {
        let empty: Collection<u8> = Collection::new();
        let mut rng = make_rng();
        assert_eq!(empty.random_index_with(&mut rng), None);
        assert_eq!(empty.random_with(&mut rng), None);
        assert_eq!(empty.random_index(), None);
        assert_eq!(empty.random(), None);
    }

    #[test]
    fn random_returns_an_element_of_the_collection() {
        let items = fruits();
        let mut rng = make_rng();
        for _ in 0..20 {
            let picked = items.random_with(&mut rng).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn reduce_folds_left_from_default() {
        let numbers = Collection::from([1u32, 2, 3, 4]);
        let sum = numbers.reduce(|_, item, acc| acc + item);
        assert_eq!(sum, 10);

        let words = Collection::from(["a".to_string(), "b".to_string()]);
        let joined = words.reduce(|i, word, acc| format!("{acc}{i}{word}"));
        assert_eq!(joined, "0a1b");
    }

    #[test]
    fn reduce_on_empty_is_default() {
        let empty: Collection<u32> = Collection::new();
        assert_eq!(empty.reduce(|_, item, acc| acc + item), 0);
    }

    #[test]
    fn reverse_reverses_in_place() {
        let mut items = fruits();
        items.reverse();
        assert_eq!(items.items(), ["strawberry", "orange", "apple"]);
        items.reverse();
        assert_eq!(items.items(), ["apple", "orange", "strawberry"]);
    }

    #[test]
    fn quantifiers() {
        let items = fruits();
        assert!(items.some(|_, name| name.len() == 5));
        assert!(!items.some(|_, name| name.is_empty()));

        assert!(items.none(|_, name| name.is_empty()));
        assert!(!items.none(|_, name| *name == "apple"));

        assert!(items.all(|_, name| !name.is_empty()));
        assert!(!items.all(|_, name| name.len() == 5));
    }

    #[test]
    fn quantifiers_on_empty() {
        let empty: Collection<u8> = Collection::new();
        assert!(!empty.some(|_, _| true));
        assert!(empty.none(|_, _| true));
        assert!(empty.all(|_, _| false));
    }

    #[test]
    fn map_preserves_order_and_changes_type() {
        let items = fruits();
        let lengths = items.map(|_, name| name.len());
        assert_eq!(lengths.items(), [5, 6, 10]);

        let labeled = items.map(|i, name| format!("{i}:{name}"));
        assert_eq!(labeled.at(2).map(String::as_str), Some("2:strawberry"));
        assert_eq!(items.len(), labeled.len());
    }

    #[test]
    fn each_stops_when_asked() {
        let items = fruits();
        let mut visited = 0;
        items.each(|i, _| {
            visited += 1;
            i == 1
        });
        assert_eq!(visited, 2);

        let mut all = 0;
        items.each(|_, _| {
            all += 1;
            false
        });
        assert_eq!(all, 3);
    }

    #[test]
    fn filter_keeps_relative_order() {
        let items = Collection::from([1u32, 2, 3, 4, 5, 6]);
        let even = items.filter(|n| n % 2 == 0);
        assert_eq!(even.items(), [2, 4, 6]);
        // The source survives untouched.
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn concat_appends_and_chains() {
        let mut items = fruits();
        items.concat(["dog", "cat"]).concat(["bird"]);
        assert_eq!(
            items.items(),
            ["apple", "orange", "strawberry", "dog", "cat", "bird"]
        );
    }

    #[test]
    fn slice_copies_the_range() {
        let items = fruits();
        assert_eq!(items.slice(0, 2).items(), ["apple", "orange"]);
        assert_eq!(items.slice(1, 3).items(), ["orange", "strawberry"]);
    }

    #[test]
    fn slice_clamps_both_directions() {
        let items = fruits();
        assert_eq!(items.slice(1, 9999).items(), ["orange", "strawberry"]);
        assert!(items.slice(9999, 1).is_empty());
        assert!(items.slice(2, 1).is_empty());
        assert!(items.slice(5, 9).is_empty());
    }

    #[test]
    fn slice_is_independent_of_parent() {
        let mut items = fruits();
        let copy = items.slice(0, 2);
        items.clear();
        assert_eq!(copy.items(), ["apple", "orange"]);
    }

    #[test]
    fn sort_by_and_sort() {
        let mut items = Collection::from([3u32, 1, 2]);
        items.sort();
        assert_eq!(items.items(), [1, 2, 3]);

        items.sort_by(|a, b| b.cmp(a));
        assert_eq!(items.items(), [3, 2, 1]);
    }

    #[test]
    fn sorting_after_mutation_chains() {
        let mut items = fruits();
        items.push("banana");
        items.sort();
        assert_eq!(
            items.items(),
            ["apple", "banana", "orange", "strawberry"]
        );
    }

    #[test]
    fn equality_is_elementwise() {
        assert_eq!(fruits(), fruits());
        assert_ne!(fruits(), Collection::from(["apple"]));

        let mut reversed = fruits();
        reversed.reverse();
        assert_ne!(fruits(), reversed);
    }

    #[test]
    fn construction_from_vec_array_and_iterator() {
        let from_vec = Collection::from(vec![1u8, 2, 3]);
        let from_array = Collection::from([1u8, 2, 3]);
        let from_iter: Collection<u8> = (1..=3).collect();
        assert_eq!(from_vec, from_array);
        assert_eq!(from_vec, from_iter);
    }

    #[test]
    fn extend_and_iteration() {
        let mut items = Collection::from([1u32, 2]);
        items.extend([3, 4]);

        let borrowed: Vec<u32> = (&items).into_iter().copied().collect();
        assert_eq!(borrowed, vec![1, 2, 3, 4]);

        let doubled: Vec<u32> = items.iter().map(|n| n * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6, 8]);

        let owned: Vec<u32> = items.into_iter().collect();
        assert_eq!(owned, vec![1, 2, 3, 4]);
    }

    #[test]
    fn into_items_returns_backing_vec() {
        let items = fruits();
        assert_eq!(items.into_items(), vec!["apple", "orange", "strawberry"]);
    }

    #[test]
    fn to_json_encodes_an_array_in_order() {
        let items = fruits();
        assert_eq!(
            items.to_json().unwrap(),
            r#"["apple","orange","strawberry"]"#
        );

        let empty: Collection<u8> = Collection::new();
        assert_eq!(empty.to_json().unwrap(), "[]");
    }

    #[test]
    fn json_round_trip() {
        let items: Collection<String> =
            fruits().map(|_, name| name.to_string());
        let json = items.to_json().unwrap();
        let back: Collection<String> = Collection::from_json(&json).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(Collection::<u32>::from_json("not json").is_err());
        assert!(Collection::<u32>::from_json(r#"{"a":1}"#).is_err());
    }

    #[test]
    fn to_json_propagates_encoding_errors() {
        use std::collections::BTreeMap;

        // JSON object keys must be strings; a sequence key cannot encode.
        let mut keyed: BTreeMap<Vec<u8>, u8> = BTreeMap::new();
        keyed.insert(vec![1, 2], 3);

        let items = Collection::from(vec![keyed]);
        assert!(items.to_json().is_err());
    }
}
