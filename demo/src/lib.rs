//! Interactive pathfinding visualizer model shared by the `pathviz` binary
//! and its tests.
//!
//! Paint Start, End and barriers with the mouse (or the keyboard cursor), pick
//! an algorithm, and watch the search expand before the path appears.

use std::collections::VecDeque;

use log::debug;
use pathviz_core::{GridConfig, Pos, Role};
use pathviz_paths::{Algorithm, Outcome, SearchEvent};
use pathviz_session::{Command, Response, RunReport, Session};
use pathviz_tui::{
    Color, Effect, Glyph, Key, Model, MouseAction, Msg, Screen, Style, role_style,
};

/// Terminal columns per grid cell, so cells render roughly square.
pub const CELL_WIDTH: i32 = 2;
/// Lines below the grid: status and help.
pub const FOOTER_LINES: i32 = 2;

const HELP_LINE: &str =
    "LMB start/end/wall  RMB clear  SPACE run  a A*  b BFS  c clear  arrows+s/e/x/DEL  q quit";

const COL_STATUS_FG: Color = Color::from_rgb(220, 220, 220);
const COL_HELP_FG: Color = Color::from_rgb(140, 140, 160);
const COL_CURSOR_FG: Color = Color::from_rgb(0, 120, 255);

/// Terminal size needed to show a grid of `config` dimensions.
pub fn screen_size(config: GridConfig) -> (i32, i32) {
    (config.cols * CELL_WIDTH, config.rows + FOOTER_LINES)
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

pub struct Visualizer {
    session: Session,
    /// Roles currently on screen. Lags the grid while a run is animated.
    display: Vec<Role>,
    pending: VecDeque<SearchEvent>,
    events_per_tick: usize,
    cursor: Pos,
    show_cursor: bool,
    status: String,
}

impl Visualizer {
    pub fn new(config: GridConfig, algorithm: Algorithm, events_per_tick: usize) -> Self {
        let session = Session::new(config).with_algorithm(algorithm);
        let display = session.grid().roles().to_vec();
        Self {
            session,
            display,
            pending: VecDeque::new(),
            events_per_tick: events_per_tick.max(1),
            cursor: Pos::ZERO,
            show_cursor: false,
            status: "Place a start cell.".into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Roles as currently displayed.
    pub fn display(&self) -> &[Role] {
        &self.display
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a run is still being replayed.
    pub fn is_animating(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Map a terminal position to a grid cell.
    pub fn cell_at(&self, screen: Pos) -> Option<Pos> {
        let cell = Pos::new(screen.row, screen.col.div_euclid(CELL_WIDTH));
        self.session.grid().contains(cell).then_some(cell)
    }

    fn sync_display(&mut self) {
        self.display.clear();
        self.display.extend_from_slice(self.session.grid().roles());
    }

    fn finish_animation(&mut self) {
        if self.is_animating() {
            self.pending.clear();
            self.sync_display();
        }
    }

    fn advance_animation(&mut self) {
        if !self.is_animating() {
            return;
        }
        for _ in 0..self.events_per_tick {
            let Some(ev) = self.pending.pop_front() else {
                break;
            };
            if let Some(i) = self.session.grid().index(ev.pos) {
                self.display[i] = ev.role;
            }
        }
        if self.pending.is_empty() {
            self.sync_display();
        }
    }

    fn start_animation(&mut self, report: &RunReport) {
        // Everything the run marked is hidden until its event is replayed.
        self.display.clear();
        self.display.extend(
            self.session
                .grid()
                .roles()
                .iter()
                .map(|&r| if r.is_search_mark() { Role::Empty } else { r }),
        );
        self.pending.extend(report.events.iter().copied());
        if self.pending.is_empty() {
            self.sync_display();
        }
    }

    /// Apply one command and update the display and status line.
    pub fn execute(&mut self, cmd: Command) {
        self.finish_animation();
        match self.session.apply(cmd) {
            Ok(Response::Ran(report)) => {
                self.status = describe(&report);
                self.start_animation(&report);
            }
            Ok(Response::Ignored) => {
                self.status = "Place both a start and an end cell first.".into();
            }
            Ok(Response::Applied) => {
                self.sync_display();
                self.status = self.hint();
            }
            Err(e) => {
                debug!("rejected {cmd}: {e}");
                self.status = format!("Rejected: {e}");
            }
        }
    }

    fn hint(&self) -> String {
        match (self.session.start(), self.session.end()) {
            (None, _) => "Place a start cell.".into(),
            (_, None) => "Place an end cell.".into(),
            _ => "Draw walls, then press SPACE.".into(),
        }
    }

    /// Primary-button painting: Start first, then End, then barriers.
    fn paint(&mut self, cell: Pos) {
        let start = self.session.start();
        let end = self.session.end();
        let cmd = if start.is_none() && end != Some(cell) {
            Command::SetStart(cell)
        } else if end.is_none() && start != Some(cell) {
            Command::SetEnd(cell)
        } else if start != Some(cell) && end != Some(cell) {
            if self.session.grid().role(cell) == Ok(Role::Barrier) {
                return;
            }
            Command::ToggleBarrier(cell)
        } else {
            return;
        };
        self.execute(cmd);
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let grid = self.session.grid();
        let p = self.cursor.shift(drow, dcol);
        self.cursor = Pos::new(
            p.row.clamp(0, grid.rows() - 1),
            p.col.clamp(0, grid.cols() - 1),
        );
        self.show_cursor = true;
    }
}

fn describe(report: &RunReport) -> String {
    match &report.outcome {
        Outcome::PathFound(path) => format!(
            "{}: path of {} steps, {} cells expanded.",
            report.algorithm,
            path.len(),
            report.visited_count()
        ),
        Outcome::NoPathFound => format!(
            "{}: no path, {} cells expanded.",
            report.algorithm,
            report.visited_count()
        ),
        Outcome::Cancelled => format!("{}: cancelled.", report.algorithm),
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init | Msg::Screen { .. } => None,
            Msg::Quit => Some(Effect::End),
            Msg::Tick => {
                self.advance_animation();
                None
            }
            Msg::KeyDown { key } => {
                match key {
                    Key::Escape | Key::Char('q') | Key::Char('Q') => return Some(Effect::End),
                    Key::Space | Key::Enter => self.execute(Command::Run),
                    Key::Char('a') => self.execute(Command::SelectAlgorithm(Algorithm::Astar)),
                    Key::Char('b') => self.execute(Command::SelectAlgorithm(Algorithm::Bfs)),
                    Key::Char('c') => self.execute(Command::ResetGrid),
                    Key::ArrowUp | Key::Char('k') => self.move_cursor(-1, 0),
                    Key::ArrowDown | Key::Char('j') => self.move_cursor(1, 0),
                    Key::ArrowLeft | Key::Char('h') => self.move_cursor(0, -1),
                    Key::ArrowRight | Key::Char('l') => self.move_cursor(0, 1),
                    Key::Char('s') => self.execute(Command::SetStart(self.cursor)),
                    Key::Char('e') => self.execute(Command::SetEnd(self.cursor)),
                    Key::Char('x') => self.execute(Command::ToggleBarrier(self.cursor)),
                    Key::Backspace | Key::Delete => self.execute(Command::ClearCell(self.cursor)),
                    _ => {}
                }
                None
            }
            Msg::Mouse { action, pos } => {
                let cell = self.cell_at(pos)?;
                match action {
                    MouseAction::Main => {
                        self.show_cursor = false;
                        self.paint(cell);
                    }
                    MouseAction::Secondary => {
                        self.show_cursor = false;
                        self.execute(Command::ClearCell(cell));
                    }
                    MouseAction::Release | MouseAction::Move => {}
                }
                None
            }
        }
    }

    fn draw(&self, screen: &mut Screen) {
        let grid = self.session.grid();
        for (i, &role) in self.display.iter().enumerate() {
            let p = grid.pos(i);
            let cursor = self.show_cursor && p == self.cursor;
            let mut style = role_style(role);
            if cursor {
                style = style.with_fg(COL_CURSOR_FG).with_bold(true);
            }
            for dx in 0..CELL_WIDTH {
                let ch = match (cursor, dx) {
                    (true, 0) => '[',
                    (true, _) => ']',
                    _ => ' ',
                };
                screen.set(Pos::new(p.row, p.col * CELL_WIDTH + dx), Glyph::new(ch, style));
            }
        }

        let status = format!("Algorithm: {}  {}", self.session.algorithm(), self.status);
        screen.print(
            Pos::new(grid.rows(), 0),
            &status,
            Style::default().with_fg(COL_STATUS_FG).with_bold(true),
        );
        screen.print(
            Pos::new(grid.rows() + 1, 0),
            HELP_LINE,
            Style::default().with_fg(COL_HELP_FG),
        );
    }
}
