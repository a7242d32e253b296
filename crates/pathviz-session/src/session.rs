use log::{debug, info, warn};
use pathviz_core::{Grid, GridConfig, GridError, Pos, Role};
use pathviz_paths::{Algorithm, Context, Outcome, SearchEvent, SearchRange};
use thiserror::Error;

use crate::command::{Command, Response, RunReport};

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// A rejected command. Rejection never leaves the session partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("a start cell is already placed at {0}")]
    StartAlreadySet(Pos),
    #[error("an end cell is already placed at {0}")]
    EndAlreadySet(Pos),
    /// The target cell holds Start or End, which the command may not
    /// overwrite.
    #[error("cell {pos} holds the {role} marker")]
    Occupied { pos: Pos, role: Role },
}

impl SessionError {
    /// Whether the command named a cell outside the grid.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::Grid(GridError::OutOfBounds { .. }))
    }

    /// Whether the command was refused because of the cell's current state.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            Self::StartAlreadySet(_)
                | Self::EndAlreadySet(_)
                | Self::Occupied { .. }
                | Self::Grid(GridError::InvalidTransition { .. })
        )
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Owns the grid and the Start/End selection, and drives searches.
pub struct Session {
    grid: Grid,
    start: Option<Pos>,
    end: Option<Pos>,
    algorithm: Algorithm,
    search: SearchRange,
    last_report: Option<RunReport>,
}

impl Session {
    /// A session over an empty grid, using A* until told otherwise.
    pub fn new(config: GridConfig) -> Self {
        let grid = Grid::new(config);
        let search = SearchRange::for_grid(&grid);
        Self {
            grid,
            start: None,
            end: None,
            algorithm: Algorithm::default(),
            search,
            last_report: None,
        }
    }

    /// Builder: pick the initial algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Read-only view of the grid for rendering.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> GridConfig {
        self.grid.config()
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Report of the most recent run since the last reset.
    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Process one command.
    pub fn apply(&mut self, cmd: Command) -> Result<Response, SessionError> {
        debug!("command: {cmd}");
        let res = match cmd {
            Command::SetStart(p) => self.set_start(p).map(|_| Response::Applied),
            Command::SetEnd(p) => self.set_end(p).map(|_| Response::Applied),
            Command::ToggleBarrier(p) => self.toggle_barrier(p).map(|_| Response::Applied),
            Command::ClearCell(p) => self.clear_cell(p).map(|_| Response::Applied),
            Command::SelectAlgorithm(a) => {
                self.select_algorithm(a);
                Ok(Response::Applied)
            }
            Command::Run => self.run().map(|r| r.map_or(Response::Ignored, Response::Ran)),
            Command::ResetGrid => {
                self.reset_grid();
                Ok(Response::Applied)
            }
        };
        if let Err(ref e) = res {
            warn!("command {cmd} rejected: {e}");
        }
        res
    }

    /// Place the Start marker. Requires that no Start exists and that `p` is
    /// not the End cell.
    pub fn set_start(&mut self, p: Pos) -> Result<(), SessionError> {
        let role = self.grid.role(p)?;
        if let Some(s) = self.start {
            return Err(SessionError::StartAlreadySet(s));
        }
        if role == Role::End {
            return Err(SessionError::Occupied { pos: p, role });
        }
        self.grid.set_role(p, Role::Start)?;
        self.start = Some(p);
        self.sync_adjacency();
        Ok(())
    }

    /// Place the End marker. Requires that no End exists and that `p` is not
    /// the Start cell.
    pub fn set_end(&mut self, p: Pos) -> Result<(), SessionError> {
        let role = self.grid.role(p)?;
        if let Some(e) = self.end {
            return Err(SessionError::EndAlreadySet(e));
        }
        if role == Role::Start {
            return Err(SessionError::Occupied { pos: p, role });
        }
        self.grid.set_role(p, Role::End)?;
        self.end = Some(p);
        self.sync_adjacency();
        Ok(())
    }

    /// Turn `p` into a barrier. Start and End cells are refused.
    pub fn toggle_barrier(&mut self, p: Pos) -> Result<(), SessionError> {
        let role = self.grid.role(p)?;
        if role.is_endpoint() {
            return Err(SessionError::Occupied { pos: p, role });
        }
        self.grid.set_role(p, Role::Barrier)?;
        self.sync_adjacency();
        Ok(())
    }

    /// Return `p` to Empty, unsetting Start or End if it held one.
    pub fn clear_cell(&mut self, p: Pos) -> Result<(), SessionError> {
        self.grid.set_role(p, Role::Empty)?;
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        self.sync_adjacency();
        Ok(())
    }

    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        if self.algorithm != algorithm {
            info!("algorithm: {} -> {}", self.algorithm, algorithm);
        }
        self.algorithm = algorithm;
    }

    /// Replace the grid with a fresh empty one and forget Start and End.
    pub fn reset_grid(&mut self) {
        self.grid = self.grid.reset();
        self.start = None;
        self.end = None;
        self.last_report = None;
        info!("grid reset ({}x{})", self.grid.rows(), self.grid.cols());
    }

    /// Run the active algorithm. `Ok(None)` when Start or End is missing.
    pub fn run(&mut self) -> Result<Option<RunReport>, SessionError> {
        self.run_with(&Context::new(), |_| {})
    }

    /// Run the active algorithm, forwarding each visitation event to `sink`
    /// as it is produced. Cancelling `ctx` stops the search between steps.
    ///
    /// Marks from the previous run are cleared first. Afterwards the grid
    /// holds every event's role and, if a path was found, Path on each path
    /// cell except End.
    pub fn run_with<F>(
        &mut self,
        ctx: &Context,
        mut sink: F,
    ) -> Result<Option<RunReport>, SessionError>
    where
        F: FnMut(SearchEvent),
    {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            debug!("run ignored: start or end not placed");
            return Ok(None);
        };

        self.grid.clear_search_marks();
        self.grid.refresh_adjacency();
        if !self.search.fits(&self.grid) {
            self.search.resize(self.grid.rows(), self.grid.cols());
        }

        let mut events = Vec::new();
        let outcome = self.search.search(self.algorithm, &self.grid, start, end, ctx, |e| {
            events.push(e);
            sink(e);
        });

        for e in &events {
            self.grid.set_role(e.pos, e.role)?;
        }
        if let Outcome::PathFound(path) = &outcome {
            for &p in path.iter().filter(|&&p| p != end) {
                self.grid.set_role(p, Role::Path)?;
            }
        }

        match &outcome {
            Outcome::PathFound(path) => info!(
                "{}: path of {} steps from {start} to {end}, {} events",
                self.algorithm,
                path.len(),
                events.len()
            ),
            Outcome::NoPathFound => info!(
                "{}: no path from {start} to {end}, {} events",
                self.algorithm,
                events.len()
            ),
            Outcome::Cancelled => info!(
                "{}: run cancelled after {} events",
                self.algorithm,
                events.len()
            ),
        }

        let report = RunReport {
            algorithm: self.algorithm,
            start,
            end,
            outcome,
            events,
        };
        self.last_report = Some(report.clone());
        Ok(Some(report))
    }

    fn sync_adjacency(&mut self) {
        if self.grid.is_adjacency_stale() {
            self.grid.refresh_adjacency();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: i32, cols: i32) -> Session {
        Session::new(GridConfig::new(rows, cols).unwrap())
    }

    fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    fn path_cells(s: &Session) -> Vec<Pos> {
        s.grid()
            .iter()
            .filter(|&(_, r)| r == Role::Path)
            .map(|(p, _)| p)
            .collect()
    }

    #[test]
    fn start_and_end_are_exclusive() {
        let mut s = session(3, 3);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        assert_eq!(
            s.apply(Command::SetStart(p(1, 1))),
            Err(SessionError::StartAlreadySet(p(0, 0)))
        );
        assert_eq!(
            s.apply(Command::SetEnd(p(0, 0))),
            Err(SessionError::Occupied {
                pos: p(0, 0),
                role: Role::Start
            })
        );
        s.apply(Command::SetEnd(p(2, 2))).unwrap();
        assert_eq!(
            s.apply(Command::SetEnd(p(1, 1))),
            Err(SessionError::EndAlreadySet(p(2, 2)))
        );
        assert_eq!(s.grid().role(p(1, 1)), Ok(Role::Empty));
        assert_eq!((s.start(), s.end()), (Some(p(0, 0)), Some(p(2, 2))));
    }

    #[test]
    fn set_start_on_end_cell_rejected() {
        let mut s = session(2, 2);
        s.apply(Command::SetEnd(p(1, 1))).unwrap();
        let err = s.apply(Command::SetStart(p(1, 1))).unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(s.start(), None);
        assert_eq!(s.grid().role(p(1, 1)), Ok(Role::End));
    }

    #[test]
    fn error_classification() {
        let start = SessionError::StartAlreadySet(p(0, 0));
        let occupied = SessionError::Occupied {
            pos: p(1, 1),
            role: Role::End,
        };
        let swap = SessionError::from(GridError::InvalidTransition {
            pos: p(0, 0),
            from: Role::Start,
            to: Role::End,
        });
        for err in [&start, &occupied, &swap] {
            assert!(err.is_invalid_transition(), "{err}");
            assert!(!err.is_out_of_bounds(), "{err}");
        }

        let dims = SessionError::from(GridError::InvalidDimensions { rows: 0, cols: 4 });
        assert!(!dims.is_invalid_transition());
        assert!(!dims.is_out_of_bounds());
    }

    #[test]
    fn out_of_bounds_rejected_without_mutation() {
        let mut s = session(2, 2);
        for cmd in [
            Command::SetStart(p(2, 0)),
            Command::SetEnd(p(0, -1)),
            Command::ToggleBarrier(p(5, 5)),
            Command::ClearCell(p(-1, -1)),
        ] {
            let err = s.apply(cmd).unwrap_err();
            assert!(err.is_out_of_bounds(), "{cmd}: {err}");
            assert!(!err.is_invalid_transition(), "{cmd}: {err}");
        }
        assert_eq!((s.start(), s.end()), (None, None));
        assert!(s.grid().iter().all(|(_, r)| r == Role::Empty));
    }

    #[test]
    fn barrier_refused_on_endpoints() {
        let mut s = session(2, 2);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(1, 1))).unwrap();
        assert!(s.apply(Command::ToggleBarrier(p(0, 0))).is_err());
        assert!(s.apply(Command::ToggleBarrier(p(1, 1))).is_err());
        assert_eq!(s.grid().role(p(0, 0)), Ok(Role::Start));
        assert_eq!(s.grid().role(p(1, 1)), Ok(Role::End));
    }

    #[test]
    fn barrier_then_clear_restores_adjacency() {
        let mut s = session(3, 3);
        s.apply(Command::ToggleBarrier(p(1, 1))).unwrap();
        assert!(!s.grid().neighbors(p(0, 1)).contains(&p(1, 1)));

        s.apply(Command::ClearCell(p(1, 1))).unwrap();
        assert_eq!(s.grid().role(p(1, 1)), Ok(Role::Empty));
        assert!(s.grid().neighbors(p(0, 1)).contains(&p(1, 1)));
        assert_eq!(s.grid().neighbors(p(1, 1)).len(), 4);
    }

    #[test]
    fn clear_cell_unsets_endpoints() {
        let mut s = session(2, 2);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(1, 1))).unwrap();
        s.apply(Command::ClearCell(p(0, 0))).unwrap();
        s.apply(Command::ClearCell(p(1, 1))).unwrap();
        assert_eq!((s.start(), s.end()), (None, None));
        // Both markers can be placed again.
        s.apply(Command::SetStart(p(1, 0))).unwrap();
        s.apply(Command::SetEnd(p(0, 1))).unwrap();
    }

    #[test]
    fn run_without_endpoints_is_ignored() {
        let mut s = session(3, 3);
        assert_eq!(s.apply(Command::Run), Ok(Response::Ignored));
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        assert_eq!(s.apply(Command::Run), Ok(Response::Ignored));
        assert!(s.grid().iter().all(|(q, r)| q == p(0, 0) || r == Role::Empty));
    }

    #[test]
    fn five_by_five_path_marks_intermediate_cells() {
        for algorithm in Algorithm::ALL {
            let mut s = session(5, 5);
            s.apply(Command::SelectAlgorithm(algorithm)).unwrap();
            s.apply(Command::SetStart(p(0, 0))).unwrap();
            s.apply(Command::SetEnd(p(4, 4))).unwrap();
            let Ok(Response::Ran(report)) = s.apply(Command::Run) else {
                panic!("run did not execute");
            };
            assert_eq!(report.algorithm, algorithm);
            assert_eq!(report.path_len(), Some(8));
            // 7 intermediate cells; Start and End keep their markers.
            assert_eq!(path_cells(&s).len(), 7);
            assert_eq!(s.grid().role(p(0, 0)), Ok(Role::Start));
            assert_eq!(s.grid().role(p(4, 4)), Ok(Role::End));
        }
    }

    #[test]
    fn blocked_column_reports_no_path() {
        let mut s = session(3, 3);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(2, 2))).unwrap();
        for r in 0..3 {
            s.apply(Command::ToggleBarrier(p(r, 1))).unwrap();
        }
        for algorithm in Algorithm::ALL {
            s.apply(Command::SelectAlgorithm(algorithm)).unwrap();
            let report = s.run().unwrap().unwrap();
            assert_eq!(report.outcome, Outcome::NoPathFound);
            assert!(path_cells(&s).is_empty());
        }
    }

    #[test]
    fn run_twice_yields_same_path() {
        let mut s = session(6, 6);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(5, 3))).unwrap();
        s.apply(Command::ToggleBarrier(p(2, 0))).unwrap();
        s.apply(Command::ToggleBarrier(p(2, 1))).unwrap();
        let first = s.run().unwrap().unwrap();
        let grid_after_first = s.grid().clone();
        let second = s.run().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(&grid_after_first, s.grid());
    }

    #[test]
    fn run_applies_events_before_path() {
        let mut s = session(1, 4);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(0, 3))).unwrap();
        let mut streamed = Vec::new();
        let report = s
            .run_with(&Context::new(), |e| streamed.push(e))
            .unwrap()
            .unwrap();
        assert_eq!(streamed, report.events);
        assert_eq!(
            s.grid().roles(),
            &[Role::Start, Role::Path, Role::Path, Role::End]
        );
    }

    #[test]
    fn search_marks_are_passable_and_cleared_between_runs() {
        let mut s = session(3, 3);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(2, 2))).unwrap();
        s.run().unwrap();
        assert!(s.grid().iter().any(|(_, r)| r.is_search_mark()));

        s.apply(Command::ToggleBarrier(p(1, 1))).unwrap();
        s.apply(Command::SelectAlgorithm(Algorithm::Bfs)).unwrap();
        let report = s.run().unwrap().unwrap();
        assert_eq!(report.path_len(), Some(4));
        assert_eq!(s.grid().role(p(1, 1)), Ok(Role::Barrier));
        assert_eq!(path_cells(&s).len(), 3);
    }

    #[test]
    fn cancelled_run_marks_no_path() {
        let mut s = session(4, 4);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(3, 3))).unwrap();
        let ctx = Context::new();
        ctx.cancel();
        let report = s.run_with(&ctx, |_| {}).unwrap().unwrap();
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert!(path_cells(&s).is_empty());
    }

    #[test]
    fn reset_grid_forgets_everything() {
        let mut s = session(3, 3);
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        s.apply(Command::SetEnd(p(2, 2))).unwrap();
        s.apply(Command::ToggleBarrier(p(1, 1))).unwrap();
        s.run().unwrap();
        s.apply(Command::ResetGrid).unwrap();
        assert_eq!((s.start(), s.end()), (None, None));
        assert!(s.last_report().is_none());
        assert!(s.grid().iter().all(|(_, r)| r == Role::Empty));
        assert_eq!(s.config(), GridConfig::new(3, 3).unwrap());
    }

    #[test]
    fn start_over_barrier_reopens_cell() {
        let mut s = session(1, 3);
        s.apply(Command::ToggleBarrier(p(0, 0))).unwrap();
        s.apply(Command::SetStart(p(0, 0))).unwrap();
        assert_eq!(s.grid().neighbors(p(0, 1)), &[p(0, 2), p(0, 0)]);
    }
}
