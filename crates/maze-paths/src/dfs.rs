use crate::search::{Frontier, Search};
use crate::traits::Pather;

impl Search {
    /// Pop the most recently pushed cell and push its unseen neighbors.
    ///
    /// Neighbors are pushed in up, down, left, right order, so the last of
    /// them is explored first. Like BFS, a cell is marked seen at push time
    /// and is pushed at most once.
    pub(crate) fn step_dfs<P: Pather>(&mut self, pather: &P) -> Option<usize> {
        let bounds = self.bounds;
        let Frontier::Stack(stack) = &mut self.frontier else {
            return None;
        };

        let ci = stack.pop()?;
        self.closed[ci] = true;
        if ci == self.goal_idx {
            return Some(ci);
        }

        let cp = bounds.pos(ci);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            if let Some(ni) = bounds.idx(np) {
                if !self.seen[ni] {
                    self.seen[ni] = true;
                    self.preds.set_idx(ni, ci);
                    stack.push(ni);
                }
            }
        }

        self.nbuf = nbuf;
        Some(ci)
    }
}
