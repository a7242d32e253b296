use pathviz_core::Pos;

use crate::SearchRange;
use crate::context::Context;
use crate::event::{Outcome, SearchEvent};
use crate::searchrange::{NO_PARENT, STEP_COST};
use crate::traits::Pather;

impl SearchRange {
    /// Breadth-first search from `from` to `to`.
    ///
    /// Returns the shortest path by edge count. Among equally short paths the
    /// first-discovered predecessor wins and is never overwritten. Each newly
    /// discovered cell is reported as Frontier and each expanded cell as
    /// Visited; `from` and `to` are never reported.
    pub fn bfs_path<P, F>(
        &mut self,
        pather: &P,
        from: Pos,
        to: Pos,
        ctx: &Context,
        mut emit: F,
    ) -> Outcome
    where
        P: Pather,
        F: FnMut(SearchEvent),
    {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return Outcome::NoPathFound;
        };

        let cur_gen = self.next_generation();
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
        }
        self.queue.clear();
        self.queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            if ctx.is_done() {
                break Outcome::Cancelled;
            }
            let Some(ci) = self.queue.pop_front() else {
                break Outcome::NoPathFound;
            };
            if ci == goal_idx {
                break Outcome::PathFound(self.reconstruct(goal_idx));
            }

            let current_dist = self.nodes[ci].g;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    continue;
                }
                n.generation = cur_gen;
                n.g = current_dist + STEP_COST;
                n.parent = ci;
                self.queue.push_back(ni);
                if ni != goal_idx {
                    emit(SearchEvent::frontier(np));
                }
            }

            if ci != start_idx {
                emit(SearchEvent::visited(cp));
            }
        };

        self.queue.clear();
        self.nbuf = nbuf;
        outcome
    }
}
