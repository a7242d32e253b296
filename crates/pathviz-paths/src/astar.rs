use pathviz_core::Pos;

use crate::SearchRange;
use crate::context::Context;
use crate::event::{Outcome, SearchEvent};
use crate::searchrange::{NO_PARENT, NodeRef, STEP_COST, UNREACHABLE};
use crate::traits::AstarPather;

impl SearchRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Superseded queue entries are left in place and skipped when popped
    /// (lazy deletion). Equal f-scores pop in insertion order, so runs are
    /// reproducible. Event reporting matches [`bfs_path`](SearchRange::bfs_path).
    pub fn astar_path<P, F>(
        &mut self,
        pather: &P,
        from: Pos,
        to: Pos,
        ctx: &Context,
        mut emit: F,
    ) -> Outcome
    where
        P: AstarPather,
        F: FnMut(SearchEvent),
    {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return Outcome::NoPathFound;
        };

        let cur_gen = self.next_generation();

        // Initialise the start node.
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = pather.estimate(from, to);
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open = std::mem::take(&mut self.open);
        open.clear();
        let mut seq: u64 = 0;
        open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            if ctx.is_done() {
                break Outcome::Cancelled;
            }
            let Some(current) = open.pop() else {
                break Outcome::NoPathFound;
            };

            let ci = current.idx;

            // Skip stale entries.
            let cn = &self.nodes[ci];
            if cn.generation != cur_gen || !cn.open || cn.f != current.f {
                continue;
            }

            if ci == goal_idx {
                break Outcome::PathFound(self.reconstruct(goal_idx));
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + STEP_COST;
                let h = pather.estimate(np, to);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                n.g = tentative_g;
                n.f = tentative_g + h;
                n.parent = ci;
                n.open = true;

                seq += 1;
                open.push(NodeRef { idx: ni, f: n.f, seq });
                if ni != goal_idx {
                    emit(SearchEvent::frontier(np));
                }
            }

            if ci != start_idx {
                emit(SearchEvent::visited(cp));
            }
        };

        open.clear();
        self.open = open;
        self.nbuf = nbuf;
        outcome
    }
}
