//! Iterative permutation generator (Heap's algorithm).
//!
//! Yields all `n!` orderings of the input, the input order itself first.
//! Each successive permutation differs from the previous one by a single
//! swap.  The emission order is fixed, and the route optimizer's tie-break
//! ("first minimum found wins") is defined against it.

/// Iterator over all permutations of `items`, in Heap's-algorithm order.
///
/// Each call to `next` clones the current arrangement, so a full run costs
/// O(n · n!) time; callers are expected to keep `n` small.
pub struct HeapPermutations<T: Clone> {
    items:   Vec<T>,
    /// Per-level swap counters.
    c:       Vec<usize>,
    i:       usize,
    started: bool,
}

impl<T: Clone> HeapPermutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let n = items.len();
        Self { items, c: vec![0; n], i: 1, started: false }
    }
}

impl<T: Clone> Iterator for HeapPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if !self.started {
            self.started = true;
            return Some(self.items.clone());
        }
        let n = self.items.len();
        while self.i < n {
            let i = self.i;
            if self.c[i] < i {
                let k = if i % 2 == 1 { self.c[i] } else { 0 };
                self.items.swap(i, k);
                self.c[i] += 1;
                self.i = 1;
                return Some(self.items.clone());
            }
            self.c[i] = 0;
            self.i += 1;
        }
        None
    }
}

/// `n!`, saturating at `u64::MAX`.
pub fn factorial(n: usize) -> u64 {
    (1..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k)).unwrap_or(u64::MAX)
}
