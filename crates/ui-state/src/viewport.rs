//! Viewport size tracking.

/// Layout breakpoints used by the page layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Upper bound (exclusive) of the mobile layout, in CSS pixels.
    pub const TABLET_MIN: u32 = 768;
    /// Upper bound (exclusive) of the tablet layout, in CSS pixels.
    pub const DESKTOP_MIN: u32 = 1024;

    pub fn for_width(width: u32) -> Self {
        if width < Self::TABLET_MIN {
            Breakpoint::Mobile
        } else if width < Self::DESKTOP_MIN {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    /// Number of cards per row in listing grids.
    pub fn columns(self) -> usize {
        match self {
            Breakpoint::Mobile => 1,
            Breakpoint::Tablet => 2,
            Breakpoint::Desktop => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.width)
    }

    /// Records a resize. Returns `true` if the breakpoint changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let before = self.breakpoint();
        self.width = width;
        self.height = height;
        before != self.breakpoint()
    }
}
