use tracing::trace;

use crate::host::StickyHeader;

pub const STICKY_SCROLL_RANGE: f64 = 160.0;
pub const SUBTITLE_GUTTER: f64 = 24.0;
pub const SUBTITLE_SHIFT: f64 = 6.0;

pub const SUBTITLE_OPACITY_VAR: &str = "--subtitle-opacity";
pub const SUBTITLE_SHIFT_VAR: &str = "--subtitle-shift";
pub const SUBTITLE_MAX_WIDTH_VAR: &str = "--subtitle-max-width";
pub const SUBTITLE_SCALE_VAR: &str = "--subtitle-scale";
pub const STICKY_OFFSET_VAR: &str = "--sticky-offset";

pub fn sticky_progress(scroll_y: f64) -> f64 {
    if scroll_y.is_nan() {
        return 0.0;
    }
    (scroll_y / STICKY_SCROLL_RANGE).clamp(0.0, 1.0)
}

/// Live geometry at the time of an update. Optional sub-elements that are
/// missing from the page are `None` and count as zero width.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickyMetrics {
    pub scroll_y: f64,
    pub sticky_width: f64,
    pub sticky_height: f64,
    pub subtitle_natural_width: Option<f64>,
    pub word_width: Option<f64>,
    pub actions_width: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyStyle {
    pub progress: f64,
    pub subtitle_opacity: f64,
    pub subtitle_shift: f64,
    pub subtitle_max_width: f64,
    pub subtitle_scale: f64,
    pub sticky_offset: f64,
}

impl StickyStyle {
    pub fn header_properties(&self) -> [(&'static str, String); 4] {
        let opacity = format!("{:.2}", self.subtitle_opacity);
        let shift = format!("{:.2}px", self.subtitle_shift);
        let max_width = format!("{:.2}px", self.subtitle_max_width);
        let scale = format!("{:.3}", self.subtitle_scale);
        [
            (SUBTITLE_OPACITY_VAR, opacity),
            (SUBTITLE_SHIFT_VAR, shift),
            (SUBTITLE_MAX_WIDTH_VAR, max_width),
            (SUBTITLE_SCALE_VAR, scale),
        ]
    }

    pub fn root_property(&self) -> (&'static str, String) {
        (STICKY_OFFSET_VAR, format!("{}px", self.sticky_offset))
    }
}

pub fn compute_sticky_style(metrics: &StickyMetrics) -> StickyStyle {
    let progress = sticky_progress(metrics.scroll_y);
    let remaining = 1.0 - progress;

    let word_width = metrics.word_width.unwrap_or(0.0);
    let actions_width = metrics.actions_width.unwrap_or(0.0);
    let occupied = word_width + actions_width + SUBTITLE_GUTTER;
    let available = (metrics.sticky_width - occupied).max(0.0);
    let max_width = available * remaining;

    let natural_width = metrics
        .subtitle_natural_width
        .filter(|width| *width > 0.0)
        .unwrap_or(1.0);
    let scale = (max_width / natural_width).min(1.0);

    // Avoid emitting "-0.00px" at the top of the page.
    let shift = if progress > 0.0 {
        -SUBTITLE_SHIFT * progress
    } else {
        0.0
    };

    StickyStyle {
        progress,
        subtitle_opacity: remaining,
        subtitle_shift: shift,
        subtitle_max_width: max_width,
        subtitle_scale: scale,
        sticky_offset: metrics.sticky_height.max(0.0),
    }
}

pub struct StickyInterpolator {
    header: Box<dyn StickyHeader>,
}

impl StickyInterpolator {
    pub fn new(header: Box<dyn StickyHeader>) -> Self {
        Self { header }
    }

    pub fn update(&mut self) -> StickyStyle {
        let metrics = self.header.measure();
        let style = compute_sticky_style(&metrics);
        trace!(
            scroll_y = metrics.scroll_y,
            progress = style.progress,
            "sticky header updated"
        );
        self.header.apply(&style);
        style
    }
}
