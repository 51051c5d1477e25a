//! Top-level view state: request lifecycle, active tab, log pagination.
//!
//! ```text
//! Idle ──submit──▶ Loading ──result──▶ Ready ──submit──▶ Loading
//!                     └────error────▶ Failed ──submit──▶ Loading
//! ```
//!
//! Every accepted submission gets a [`RequestTicket`]; only the response for
//! the most recent ticket is applied.

use shared::{DailyLog, RouteResult, TripRequest};

use crate::error::ApiError;
use crate::form::{FieldErrors, TripForm};
use crate::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    Details,
    Logs,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Map, Self::Details, Self::Logs];

    pub fn title(self) -> &'static str {
        match self {
            Self::Map => "Route Map",
            Self::Details => "Route Details",
            Self::Logs => "Log Sheets",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Map => "map-marked-alt",
            Self::Details => "info-circle",
            Self::Logs => "clipboard-list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// A calculation is already running.
    InFlight,
    Invalid(FieldErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Ready,
    Failed,
    /// Response to a superseded request, dropped.
    Stale,
}

/// What the view has to redraw after a tab change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The map container became visible and must be resized.
    Map,
    /// The log canvas must be painted with the log at this index.
    Log(usize),
    Nothing,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    phase: Phase,
    route: Option<RouteResult>,
    active_tab: Tab,
    active_log_index: usize,
    error: Option<String>,
    last_ticket: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            route: None,
            active_tab: Tab::Map,
            active_log_index: 0,
            error: None,
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn active_log_index(&self) -> usize {
        self.active_log_index
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the form and, when it passes, moves to `Loading`.
    /// Invalid input leaves the phase untouched.
    pub fn submit(&mut self, form: &TripForm) -> Result<(RequestTicket, TripRequest), SubmitError> {
        if self.is_loading() {
            return Err(SubmitError::InFlight);
        }
        let request = form.validate().map_err(SubmitError::Invalid)?;

        self.last_ticket += 1;
        self.phase = Phase::Loading;
        self.error = None;
        logging::debug(&format!(
            "submitting request #{} current={:?} pickup={:?} dropoff={:?} cycle={}",
            self.last_ticket,
            request.current_location,
            request.pickup_location,
            request.dropoff_location,
            request.current_cycle_hours
        ));
        Ok((RequestTicket(self.last_ticket), request))
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// A new route replaces the old one wholesale and resets the tab and log
    /// index. An error keeps the previous route.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RouteResult, ApiError>,
    ) -> Resolution {
        if ticket.0 != self.last_ticket || !self.is_loading() {
            logging::debug(&format!("dropping stale response #{}", ticket.0));
            return Resolution::Stale;
        }

        match outcome {
            Ok(route) => {
                self.route = Some(route);
                self.phase = Phase::Ready;
                self.active_tab = Tab::Map;
                self.active_log_index = 0;
                self.error = None;
                Resolution::Ready
            }
            Err(err) => {
                logging::error(&format!("route request #{} failed: {err}", ticket.0));
                self.phase = Phase::Failed;
                self.error = Some(err.user_message());
                Resolution::Failed
            }
        }
    }

    /// Forgets the current route.
    pub fn clear(&mut self) {
        self.route = None;
        self.active_tab = Tab::Map;
        self.active_log_index = 0;
        if self.phase == Phase::Ready {
            self.phase = Phase::Idle;
        }
    }

    pub fn select_tab(&mut self, tab: Tab) -> Refresh {
        self.active_tab = tab;
        match tab {
            Tab::Map => Refresh::Map,
            Tab::Logs if self.active_log().is_some() => Refresh::Log(self.active_log_index),
            Tab::Logs | Tab::Details => Refresh::Nothing,
        }
    }

    pub fn logs(&self) -> &[DailyLog] {
        self.route
            .as_ref()
            .map(|route| route.logs.as_slice())
            .unwrap_or_default()
    }

    pub fn active_log(&self) -> Option<&DailyLog> {
        self.logs().get(self.active_log_index)
    }

    pub fn has_previous_log(&self) -> bool {
        self.active_log_index > 0
    }

    pub fn has_next_log(&self) -> bool {
        self.active_log_index + 1 < self.logs().len()
    }

    /// Moves back one log; `None` at the first log.
    pub fn previous_log(&mut self) -> Option<usize> {
        if !self.has_previous_log() {
            return None;
        }
        self.active_log_index -= 1;
        Some(self.active_log_index)
    }

    /// Moves forward one log; `None` at the last log.
    pub fn next_log(&mut self) -> Option<usize> {
        if !self.has_next_log() {
            return None;
        }
        self.active_log_index += 1;
        Some(self.active_log_index)
    }

    /// `Log 2 of 3`
    pub fn pagination_caption(&self) -> Option<String> {
        let total = self.logs().len();
        (total > 0).then(|| format!("Log {} of {total}", self.active_log_index + 1))
    }
}
