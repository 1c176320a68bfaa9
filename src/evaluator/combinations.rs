/// Lexicographic iterator over all ways to choose 5 indices out of `n`.
///
/// Showdown pools hold 5, 6, or 7 cards (two hole cards plus a 3 to 5 card
/// board), giving 1, 6, or 21 candidate hands. The iterator yields index
/// arrays so the caller can select from its own card slice.
pub struct ChooseFive {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl ChooseFive {
    /// Combinations of 5 out of `n`, in lexicographic order. Yields nothing
    /// when `n < 5`.
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for ChooseFive {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.indices;

        // Advance to the successor: bump the rightmost index with room to
        // grow, then restack everything to its right.
        let mut i = 4;
        loop {
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }

            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}
