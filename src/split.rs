use rand::seq::SliceRandom;
use rand::Rng;

/// Test/train sizes for a partition of `total` records.
/// A lone record goes to test; otherwise test takes a third (capped) and
/// train takes what is left (capped). Anything beyond both caps is unused.
pub fn split_sizes(total: usize, max_test: usize, max_train: usize) -> (usize, usize) {
    if total == 0 { return (0, 0); }
    if total == 1 { return (1, 0); }
    let test = max_test.min(total / 3);
    let train = max_train.min(total - test);
    (test, train)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Split<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

impl<T> Split<T> {
    pub fn extend(&mut self, other: Split<T>) {
        self.train.extend(other.train);
        self.test.extend(other.test);
    }
}

impl<T: Clone> Split<T> {
    pub fn extend_from(&mut self, other: &Split<T>) {
        self.train.extend_from_slice(&other.train);
        self.test.extend_from_slice(&other.test);
    }
}

/// Shuffle once, then slice test from the front and train right after it.
pub fn shuffle_split<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R, max_test: usize, max_train: usize) -> Split<T> {
    let (test_n, train_n) = split_sizes(items.len(), max_test, max_train);
    items.shuffle(rng);
    items.truncate(test_n + train_n);
    let train = items.split_off(test_n);
    Split { train, test: items }
}
