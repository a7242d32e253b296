//! Visual styling: [`Color`], [`Style`], and the [`Role`] palette.

use pathviz_core::Role;

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour (0). Drivers map it to the terminal default.
    pub const DEFAULT: Self = Self(0);

    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(1, 1, 1);
    pub const GREY: Self = Self::from_rgb(128, 128, 128);
    pub const GREEN: Self = Self::from_rgb(0, 200, 0);
    pub const RED: Self = Self::from_rgb(220, 0, 0);
    pub const YELLOW: Self = Self::from_rgb(255, 220, 0);
    pub const ORANGE: Self = Self::from_rgb(255, 140, 0);
    pub const PURPLE: Self = Self::from_rgb(128, 0, 128);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Foreground/background colour pair plus a bold flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Style {
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// Cell style for each role.
pub const fn role_style(role: Role) -> Style {
    let bg = match role {
        Role::Empty => Color::WHITE,
        Role::Start => Color::GREEN,
        Role::End => Color::RED,
        Role::Barrier => Color::BLACK,
        Role::Frontier => Color::YELLOW,
        Role::Visited => Color::ORANGE,
        Role::Path => Color::PURPLE,
    };
    Style {
        fg: Color::GREY,
        bg,
        bold: false,
    }
}
