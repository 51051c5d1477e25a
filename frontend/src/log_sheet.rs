//! Daily log sheet: a 24 hour, four row duty-status grid.
//!
//! [`render`] turns one [`DailyLog`] into an ordered list of [`DrawCommand`]s.
//! The list depends only on the log and the canvas size, so two renders of
//! the same input compare equal. Painting is a separate step through
//! [`DrawSurface`], implemented by the browser canvas and by `Vec` for tests.

use std::fmt;

use shared::{DailyLog, Period};

use crate::format;
use crate::grid::{CanvasDims, DutyStatus, GridLayout, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

const GRID_BACKGROUND: Color = Color::rgb(0xf9, 0xf9, 0xf9);
const GRID_LINE: Color = Color::rgb(0xdd, 0xdd, 0xdd);
const GRID_LINE_MAJOR: Color = Color::rgb(0x77, 0x77, 0x77);
const BAR_BORDER: Color = Color::rgb(0x55, 0x55, 0x55);
const TEXT: Color = Color::rgb(0x33, 0x33, 0x33);

const MAJOR_HOUR_STEP: usize = 6;
const TICK_LENGTH: f64 = 10.0;
const HOUR_LABEL_OFFSET: f64 = 15.0;
const TEXT_INSET: f64 = 10.0;

pub fn status_color(status: DutyStatus) -> Color {
    match status {
        DutyStatus::OffDuty => Color::rgba(0, 200, 0, 0.5),
        DutyStatus::SleeperBerth => Color::rgba(100, 100, 255, 0.5),
        DutyStatus::Driving => Color::rgba(200, 0, 0, 0.5),
        DutyStatus::OnDuty => Color::rgba(255, 150, 0, 0.5),
    }
}

pub fn periods(log: &DailyLog, status: DutyStatus) -> &[Period] {
    match status {
        DutyStatus::OffDuty => &log.off_duty,
        DutyStatus::SleeperBerth => &log.sleeper_berth,
        DutyStatus::Driving => &log.driving,
        DutyStatus::OnDuty => &log.on_duty,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub size_px: u32,
    pub bold: bool,
}

impl Font {
    const LABEL: Self = Self {
        size_px: 10,
        bold: false,
    };
    const CAPTION: Self = Self {
        size_px: 12,
        bold: false,
    };
    const CAPTION_BOLD: Self = Self {
        size_px: 12,
        bold: true,
    };

    pub fn css(self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{weight}{}px Arial", self.size_px)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Point,
        font: Font,
        align: TextAlign,
        color: Color,
    },
}

pub trait DrawSurface {
    fn draw(&mut self, command: &DrawCommand);
}

impl DrawSurface for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(command.clone());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSheetDrawing {
    pub dims: CanvasDims,
    pub commands: Vec<DrawCommand>,
    bars: Vec<(DutyStatus, Rect)>,
}

impl LogSheetDrawing {
    /// Replays every command in order onto `surface`.
    pub fn paint<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            surface.draw(command);
        }
    }

    /// Activity bars drawn in the given row, in input order.
    pub fn bars(&self, status: DutyStatus) -> Vec<Rect> {
        self.bars
            .iter()
            .filter(|(row, _)| *row == status)
            .map(|(_, rect)| *rect)
            .collect()
    }
}

pub fn render(log: &DailyLog, dims: CanvasDims) -> LogSheetDrawing {
    let grid = GridLayout::new(dims);
    let mut sheet = SheetBuilder {
        grid,
        commands: Vec::new(),
        bars: Vec::new(),
    };

    sheet.push(DrawCommand::Clear {
        width: dims.width,
        height: dims.height,
    });
    sheet.background();
    sheet.grid_lines();
    sheet.hour_labels();
    sheet.row_labels();
    for status in DutyStatus::ALL {
        sheet.activity(status, periods(log, status));
    }
    sheet.header(log);

    LogSheetDrawing {
        dims,
        commands: sheet.commands,
        bars: sheet.bars,
    }
}

struct SheetBuilder {
    grid: GridLayout,
    commands: Vec<DrawCommand>,
    bars: Vec<(DutyStatus, Rect)>,
}

impl SheetBuilder {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn text(&mut self, text: String, x: f64, y: f64, font: Font, align: TextAlign) {
        self.push(DrawCommand::Text {
            text,
            at: Point { x, y },
            font,
            align,
            color: TEXT,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    fn background(&mut self) {
        let rect = Rect {
            x: 0.0,
            y: self.grid.top,
            width: self.grid.dims.width,
            height: self.grid.height,
        };
        self.push(DrawCommand::FillRect {
            rect,
            color: GRID_BACKGROUND,
        });
    }

    fn grid_lines(&mut self) {
        let width = self.grid.dims.width;
        let (top, bottom) = (self.grid.top, self.grid.bottom());

        for row in 0..=DutyStatus::ALL.len() {
            let y = top + row as f64 * self.grid.row_height();
            self.line(Point { x: 0.0, y }, Point { x: width, y }, hour_stroke(1));
        }

        for hour in 0..=24 {
            let x = self.grid.hour_to_x(hour as f64);
            self.line(Point { x, y: top }, Point { x, y: bottom }, hour_stroke(hour));
        }
    }

    fn hour_labels(&mut self) {
        let top = self.grid.top;
        for hour in 0..=24usize {
            let x = self.grid.hour_to_x(hour as f64);
            let label = if hour == 24 { 0 } else { hour };
            self.text(
                label.to_string(),
                x,
                top - HOUR_LABEL_OFFSET,
                Font::LABEL,
                TextAlign::Center,
            );
            self.line(
                Point {
                    x,
                    y: top - TICK_LENGTH,
                },
                Point { x, y: top },
                hour_stroke(hour),
            );
        }
    }

    fn row_labels(&mut self) {
        let x = self.grid.dims.width - TEXT_INSET;
        for status in DutyStatus::ALL {
            let (row_top, row_bottom) = self.grid.row_to_y(status.row());
            let baseline = (row_top + row_bottom) / 2.0 + 4.0;
            self.text(
                status.label().to_string(),
                x,
                baseline,
                Font::CAPTION,
                TextAlign::Right,
            );
        }
    }

    fn activity(&mut self, status: DutyStatus, periods: &[Period]) {
        let color = status_color(status);
        for period in periods {
            let Some(rect) = self
                .grid
                .interval_to_rect(period.start(), period.end(), status.row())
            else {
                continue;
            };
            self.push(DrawCommand::FillRect { rect, color });
            self.push(DrawCommand::StrokeRect {
                rect,
                stroke: Stroke {
                    color: BAR_BORDER,
                    width: 1.0,
                },
            });
            self.bars.push((status, rect));
        }
    }

    fn header(&mut self, log: &DailyLog) {
        self.text(
            format::long_date(log.date),
            TEXT_INSET,
            20.0,
            Font::CAPTION,
            TextAlign::Left,
        );
        self.text(
            format!("Total Miles: {}", log.total_miles.unwrap_or(0.0)),
            TEXT_INSET,
            self.grid.bottom() + 30.0,
            Font::CAPTION_BOLD,
            TextAlign::Left,
        );
    }
}

fn hour_stroke(hour: usize) -> Stroke {
    if hour % MAJOR_HOUR_STEP == 0 {
        Stroke {
            color: GRID_LINE_MAJOR,
            width: 2.0,
        }
    } else {
        Stroke {
            color: GRID_LINE,
            width: 1.0,
        }
    }
}

/// Form fields printed around the grid, with the paper form's placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDetails {
    pub date: String,
    pub carrier: String,
    pub destination: String,
    pub driver: String,
    pub main_office: String,
    pub home_terminal: String,
    pub total_miles: String,
    pub shipping_docs: String,
    pub remarks: String,
}

pub const CERTIFICATION: &str = "I certify that the entries are true and correct:";
pub const SIGNATURE_LABEL: &str = "Driver's Signature";

impl SheetDetails {
    pub fn from_log(log: &DailyLog) -> Self {
        let or = |value: &Option<String>, placeholder: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        };
        Self {
            date: format::short_date(log.date),
            carrier: or(&log.carrier, "Carrier Name"),
            destination: "Destination".to_string(),
            driver: "Driver Name".to_string(),
            main_office: or(&log.main_office, "Office Address"),
            home_terminal: or(&log.home_terminal, "Terminal Address"),
            total_miles: log.total_miles.unwrap_or(0.0).to_string(),
            shipping_docs: or(&log.shipping_docs, "No shipping documents listed"),
            remarks: or(&log.remarks, "No remarks listed"),
        }
    }
}
