use crate::search::{Frontier, Search};
use crate::traits::Pather;

impl Search {
    /// Pop the oldest queued cell and enqueue its unseen neighbors.
    ///
    /// A cell is marked seen and given its predecessor when it is enqueued,
    /// so it never enters the queue twice and the first discovery wins. The
    /// goal is returned without being expanded.
    pub(crate) fn step_bfs<P: Pather>(&mut self, pather: &P) -> Option<usize> {
        let bounds = self.bounds;
        let Frontier::Queue(queue) = &mut self.frontier else {
            return None;
        };

        let ci = queue.pop_front()?;
        self.closed[ci] = true;
        if ci == self.goal_idx {
            return Some(ci);
        }

        let cp = bounds.pos(ci);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = bounds.idx(np) else {
                continue;
            };
            if self.seen[ni] {
                continue;
            }
            self.seen[ni] = true;
            self.preds.set_idx(ni, ci);
            queue.push_back(ni);
        }

        self.nbuf = nbuf;
        Some(ci)
    }
}
