//! List: an ordered, index-addressed sequence.

use core::ops::Index;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        List { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        List {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Materializes the list as a plain vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        List { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        List {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_get_and_materialize() {
        let mut l = List::with_capacity(2);
        assert!(l.is_empty());
        l.push("one");
        l.push("two");
        assert_eq!(l.len(), 2);
        assert_eq!(l.get(1), Some(&"two"));
        assert_eq!(l.get(2), None);
        assert_eq!(l[0], "one");
        assert!(l.contains(&"one"));
        assert!(!l.contains(&"three"));
        assert_eq!(l.to_vec(), vec!["one", "two"]);
    }

    #[test]
    fn collect_and_iterate() {
        let l: List<i32> = (1..=3).collect();
        assert_eq!(l.iter().sum::<i32>(), 6);
        assert_eq!((&l).into_iter().count(), 3);
        assert_eq!(l.clone().into_vec(), vec![1, 2, 3]);
        assert_eq!(l, List::from(vec![1, 2, 3]));
    }
}
