use crate::foundation::ids::LinkIdx;

/// Disjoint sets over interned linking ids.
///
/// The smaller index always becomes the root, so a set's representative is
/// the id that was seen first.
#[derive(Debug, Default)]
pub(crate) struct LinkSets {
    parent: Vec<u32>,
}

impl LinkSets {
    /// Make sure `idx` has a set of its own (or already belongs to one).
    pub(crate) fn ensure(&mut self, idx: LinkIdx) {
        while self.parent.len() <= idx.0 as usize {
            let next = u32::try_from(self.parent.len()).unwrap_or(u32::MAX);
            self.parent.push(next);
        }
    }

    pub(crate) fn find(&mut self, idx: LinkIdx) -> LinkIdx {
        self.ensure(idx);
        let mut root = idx.0;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression.
        let mut cur = idx.0;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        LinkIdx(root)
    }

    pub(crate) fn union(&mut self, a: LinkIdx, b: LinkIdx) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[merge.0 as usize] = keep.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/linking/union_find.rs"]
mod tests;
