//! Maps the 24 hour day and the four duty-status rows onto canvas space.

pub const HOURS_PER_DAY: f64 = 24.0;
pub const ROW_COUNT: usize = 4;
pub const GRID_TOP: f64 = 40.0;
/// Space left above and below the grid, together.
pub const GRID_MARGIN: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasDims {
    pub width: f64,
    pub height: f64,
}

impl CanvasDims {
    pub const LOG_SHEET: Self = Self {
        width: 800.0,
        height: 300.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Duty-status rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDuty,
}

impl DutyStatus {
    pub const ALL: [Self; ROW_COUNT] = [
        Self::OffDuty,
        Self::SleeperBerth,
        Self::Driving,
        Self::OnDuty,
    ];

    pub fn row(self) -> usize {
        match self {
            Self::OffDuty => 0,
            Self::SleeperBerth => 1,
            Self::Driving => 2,
            Self::OnDuty => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OffDuty => "Off Duty",
            Self::SleeperBerth => "Sleeper Berth",
            Self::Driving => "Driving",
            Self::OnDuty => "On Duty (Not Driving)",
        }
    }
}

pub fn hour_to_x(hour: f64, canvas_width: f64) -> f64 {
    hour * canvas_width / HOURS_PER_DAY
}

/// Top and bottom edge of a row band.
pub fn row_to_y(row: usize, grid_top: f64, grid_height: f64) -> (f64, f64) {
    let row_height = grid_height / ROW_COUNT as f64;
    let top = grid_top + row as f64 * row_height;
    (top, top + row_height)
}

/// Grid geometry for one canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub dims: CanvasDims,
    pub top: f64,
    pub height: f64,
}

impl GridLayout {
    pub fn new(dims: CanvasDims) -> Self {
        Self {
            dims,
            top: GRID_TOP,
            height: (dims.height - GRID_MARGIN).max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn row_height(&self) -> f64 {
        self.height / ROW_COUNT as f64
    }

    pub fn cell_width(&self) -> f64 {
        self.dims.width / HOURS_PER_DAY
    }

    pub fn hour_to_x(&self, hour: f64) -> f64 {
        hour_to_x(hour, self.dims.width)
    }

    pub fn row_to_y(&self, row: usize) -> (f64, f64) {
        row_to_y(row, self.top, self.height)
    }

    /// Rectangle covering `[start, end)` in `row`, clamped to the day.
    /// Intervals that are empty after clamping yield `None`.
    pub fn interval_to_rect(&self, start: f64, end: f64, row: usize) -> Option<Rect> {
        let start = start.clamp(0.0, HOURS_PER_DAY);
        let end = end.clamp(0.0, HOURS_PER_DAY);
        // NaN fails this comparison too.
        if !(end > start) {
            return None;
        }
        let (top, bottom) = self.row_to_y(row);
        let x = self.hour_to_x(start);
        Some(Rect {
            x,
            y: top,
            width: self.hour_to_x(end) - x,
            height: bottom - top,
        })
    }
}
