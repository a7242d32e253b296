//! Crossterm terminal driver.
//!
//! Provides a [`CrosstermDriver`] that implements [`Driver`], mapping the
//! screen/frame model to a terminal via crossterm.

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use ::crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use pathviz_core::Pos;
use pathviz_paths::Context;

use crate::app::Driver;
use crate::messages::{Key, MouseAction, Msg};
use crate::screen::Frame;
use crate::style::Color;

/// Maps a [`Color`] to a crossterm colour.
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Maps a crossterm event to a [`Msg`], dropping events the model has no use
/// for.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            to_key(code).map(Msg::key)
        }
        Event::Mouse(me) => {
            let pos = Pos::new(me.row as i32, me.column as i32);
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left)
                | MouseEventKind::Drag(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::Mouse { action, pos })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(m) = to_msg(event::read()?) {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout();

        if frame.full {
            queue!(stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        }

        for fc in &frame.cells {
            let p = fc.pos;
            let glyph = &fc.glyph;

            queue!(
                stdout,
                cursor::MoveTo(p.col as u16, p.row as u16),
                SetForegroundColor(to_ct_color(glyph.style.fg)),
                SetBackgroundColor(to_ct_color(glyph.style.bg))
            )?;
            if glyph.style.bold {
                queue!(stdout, style::SetAttribute(Attribute::Bold))?;
            }

            write!(stdout, "{}", glyph.ch)?;

            if glyph.style.bold {
                queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            }
        }

        queue!(stdout, style::ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use ::crossterm::event::{KeyEventState, KeyModifiers, MouseEvent};

    use super::*;

    #[test]
    fn mouse_capture_is_configurable() {
        assert!(CrosstermDriver::new().mouse_enabled);
        assert!(CrosstermDriver::default().mouse_enabled);
        assert!(!CrosstermDriver::new().with_mouse(false).mouse_enabled);
    }

    fn key_event(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_on_press_only() {
        assert_eq!(
            to_msg(key_event(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(
            to_msg(key_event(KeyCode::Char('a'), KeyEventKind::Repeat)),
            Some(Msg::key(Key::Char('a')))
        );
        assert_eq!(to_msg(key_event(KeyCode::Esc, KeyEventKind::Release)), None);
        assert_eq!(to_msg(key_event(KeyCode::F(1), KeyEventKind::Press)), None);
    }

    #[test]
    fn drags_repeat_the_button() {
        assert_eq!(
            to_msg(mouse_event(MouseEventKind::Drag(MouseButton::Left), 7, 3)),
            Some(Msg::mouse(MouseAction::Main, 3, 7))
        );
        assert_eq!(
            to_msg(mouse_event(MouseEventKind::Down(MouseButton::Right), 0, 1)),
            Some(Msg::mouse(MouseAction::Secondary, 1, 0))
        );
        assert_eq!(
            to_msg(mouse_event(MouseEventKind::Down(MouseButton::Middle), 0, 0)),
            None
        );
    }

    #[test]
    fn resize_and_colors() {
        assert_eq!(
            to_msg(Event::Resize(80, 24)),
            Some(Msg::Screen {
                width: 80,
                height: 24
            })
        );
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
