//! Scroll progress derived from the host section's layout box.
//!
//! Progress is recomputed from the bounding box on every notification and is
//! never accumulated, so the same scroll offset always maps to the same value.

/// Normalized scroll position in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress(f32);

impl Progress {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Clamp into `[0, 1]`; NaN becomes 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// Bounding box of the host section relative to the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementRect {
    pub top: f32,
    pub bottom: f32,
    pub height: f32,
}

impl ElementRect {
    pub fn from_top_height(top: f32, height: f32) -> Self {
        Self {
            top,
            bottom: top + height,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStrategy {
    /// Runs from the section entering at the bottom of the viewport until it
    /// leaves at the top: `1 - bottom / (height + viewport)`. Used by short
    /// decorative strips.
    EnterToExit,
    /// Pin-and-scrub over a tall section: `-top / (height - viewport)`.
    PinnedScrub,
}

impl ProgressStrategy {
    pub fn progress(self, rect: ElementRect, viewport_height: f32) -> Progress {
        if rect.top > viewport_height {
            return Progress::ZERO;
        }
        if rect.bottom < 0.0 {
            return Progress::ONE;
        }
        match self {
            ProgressStrategy::EnterToExit => {
                let span = rect.height + viewport_height;
                if span <= 0.0 {
                    return Progress::ZERO;
                }
                Progress::new(1.0 - rect.bottom / span)
            }
            ProgressStrategy::PinnedScrub => {
                let scrolled = -rect.top;
                let total = rect.height - viewport_height;
                if total <= 0.0 {
                    return if scrolled > 0.0 {
                        Progress::ONE
                    } else {
                        Progress::ZERO
                    };
                }
                Progress::new(scrolled / total)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollTracker {
    strategy: ProgressStrategy,
    progress: Progress,
}

impl ScrollTracker {
    pub fn new(strategy: ProgressStrategy) -> Self {
        Self {
            strategy,
            progress: Progress::ZERO,
        }
    }

    #[inline]
    pub fn strategy(&self) -> ProgressStrategy {
        self.strategy
    }

    #[inline]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Recompute from the current layout. Without a host element this is a
    /// no-op and the last value is kept.
    pub fn on_layout(&mut self, host: Option<ElementRect>, viewport_height: f32) -> Progress {
        if let Some(rect) = host {
            self.progress = self.strategy.progress(rect, viewport_height);
        }
        self.progress
    }
}
