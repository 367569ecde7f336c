use std::collections::HashSet;

/// Index of a layout slot in [`crate::CompositionLayout::slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct SlotIdx(pub u32);

/// Interned linking id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct LinkIdx(pub(crate) u32);

/// Hands out deterministic ids (`view-0`, `track-3`, ...) that never collide with
/// ids already present in the tree.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    taken: HashSet<String>,
    next_by_prefix: Vec<(&'static str, u32)>,
}

impl IdAllocator {
    pub(crate) fn with_taken<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: ids.into_iter().map(Into::into).collect(),
            next_by_prefix: Vec::new(),
        }
    }

    /// `preferred` itself when free, otherwise the first free `preferred-N`.
    pub(crate) fn claim(&mut self, preferred: String) -> String {
        if self.taken.insert(preferred.clone()) {
            return preferred;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{preferred}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n = n.saturating_add(1);
        }
    }

    pub(crate) fn fresh(&mut self, prefix: &'static str) -> String {
        let pos = match self.next_by_prefix.iter().position(|(p, _)| *p == prefix) {
            Some(pos) => pos,
            None => {
                self.next_by_prefix.push((prefix, 0));
                self.next_by_prefix.len() - 1
            }
        };
        loop {
            let n = self.next_by_prefix[pos].1;
            self.next_by_prefix[pos].1 = n.saturating_add(1);
            let candidate = format!("{prefix}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
