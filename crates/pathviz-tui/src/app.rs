//! The Model-View-Update loop: [`Model`], [`Driver`], [`Effect`], [`App`].

use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use log::{debug, error};
use pathviz_paths::Context;

use crate::messages::Msg;
use crate::screen::{Frame, Screen, compute_frame};

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `screen`.
    fn draw(&self, screen: &mut Screen);
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and send every available message
    /// through `tx`. Returns early when `ctx` is cancelled.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    /// Interval between [`Msg::Tick`] messages.
    pub tick: Duration,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    tick: Duration,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            tick: config.tick.max(Duration::from_millis(1)),
        }
    }

    /// The model, for inspection after the loop ends.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Enters the event loop: poll → tick → update → draw → diff → flush.
    /// 4. Stops when the model returns `Effect::End`. The driver is closed on
    ///    every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let res = self.event_loop();
        self.driver.close();
        if let Err(ref e) = res {
            error!("application loop failed: {e}");
        }
        res
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        // An empty previous screen makes the first frame a full redraw.
        let mut prev = Screen::new(0, 0);
        let mut curr = Screen::new(self.width, self.height);
        let mut next_tick = Instant::now() + self.tick;

        loop {
            self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;
            if ctx.is_done() {
                return Ok(());
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            self.driver.poll_msgs(&ctx, timeout, &tx)?;

            let now = Instant::now();
            if now >= next_tick {
                tx.send(Msg::Tick).ok();
                next_tick += self.tick;
                if next_tick < now {
                    // Fell behind; do not burst ticks to catch up.
                    next_tick = now + self.tick;
                }
            }
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &mut Screen,
        curr: &mut Screen,
    ) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height } = msg {
                debug!("terminal resized to {width}x{height}");
                *prev = Screen::new(0, 0);
            }
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            curr.fill(Default::default());
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() || frame.full {
                self.driver.flush(frame)?;
            }
            prev.clone_from(curr);
        }

        Ok(())
    }
}
