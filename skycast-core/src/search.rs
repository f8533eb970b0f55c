use tracing::{debug, warn};

use crate::{
    client::{SuggestionSource, WeatherDataSource},
    error::{DataFetchError, SuggestionFetchError},
    model::{CurrentWeather, Forecast, Suggestion},
    state::AppLocationState,
};

/// Inputs shorter than this never trigger a suggestion request.
pub const MIN_SUGGESTION_LEN: usize = 3;

const WEATHER_ERROR_MSG: &str = "Unable to fetch data. Please try again later.";
const SUGGESTION_ERROR_MSG: &str = "Failed to load suggestions. Please try again later.";

/// Where the search workflow currently stands. No terminal state: the
/// controller runs for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Typing,
    Submitting,
    Error,
}

/// Token for one issued suggestion request. Carries the generation number
/// the completion is checked against: only the latest issued request may
/// apply its result, everything older is discarded on arrival.
#[derive(Debug)]
pub struct SuggestionTicket {
    generation: u64,
    pub term: String,
    pub limit: usize,
}

/// Token for one issued paired weather+forecast fetch. Same generation
/// discipline as [`SuggestionTicket`].
#[derive(Debug)]
pub struct SubmitTicket {
    generation: u64,
    pub term: String,
}

/// Orchestrates the search workflow: keystrokes, suggestion fetching,
/// submission, suggestion selection, dismissal and error surfacing.
///
/// Transitions are synchronous and return a ticket when a request should be
/// issued; the caller performs the fetch (directly or through the `drive_*`
/// helpers) and hands the outcome back to the matching `resolve_*` function.
/// Superseded requests are never cancelled; their late results are dropped
/// by the generation check instead of being applied in arrival order.
#[derive(Debug)]
pub struct SearchController {
    state: AppLocationState,
    suggestions: Vec<Suggestion>,
    phase: SearchPhase,
    error: Option<String>,
    suggestion_limit: usize,
    suggestion_gen: u64,
    submit_gen: u64,
}

impl SearchController {
    pub fn new(suggestion_limit: usize) -> Self {
        Self {
            state: AppLocationState::new(),
            suggestions: Vec::new(),
            phase: SearchPhase::Idle,
            error: None,
            suggestion_limit,
            suggestion_gen: 0,
            submit_gen: 0,
        }
    }

    pub fn state(&self) -> &AppLocationState {
        &self.state
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Keystroke transition: updates the query immediately. Inputs longer
    /// than two characters yield exactly one suggestion ticket; shorter
    /// inputs clear the suggestion list synchronously without a request.
    pub fn input(&mut self, text: &str) -> Option<SuggestionTicket> {
        self.state.set_query(text);
        self.error = None;
        self.phase = SearchPhase::Typing;

        if text.chars().count() >= MIN_SUGGESTION_LEN {
            self.suggestion_gen += 1;
            Some(SuggestionTicket {
                generation: self.suggestion_gen,
                term: text.to_string(),
                limit: self.suggestion_limit,
            })
        } else {
            self.suggestions.clear();
            None
        }
    }

    /// Apply the outcome of a suggestion request. Stale completions (any
    /// ticket older than the latest issued one) are discarded untouched.
    pub fn resolve_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        outcome: Result<Vec<Suggestion>, SuggestionFetchError>,
    ) {
        if ticket.generation != self.suggestion_gen {
            debug!(
                stale = ticket.generation,
                latest = self.suggestion_gen,
                term = %ticket.term,
                "discarding superseded suggestion response"
            );
            return;
        }

        match outcome {
            Ok(list) => {
                self.suggestions = list;
                self.error = None;
                if self.phase == SearchPhase::Error {
                    self.phase = SearchPhase::Typing;
                }
            }
            Err(err) => {
                warn!(%err, term = %ticket.term, "suggestion fetch failed");
                self.suggestions.clear();
                self.error = Some(SUGGESTION_ERROR_MSG.to_string());
                self.phase = SearchPhase::Error;
            }
        }
    }

    /// Submit the current query text (search button or Enter).
    pub fn submit(&mut self) -> Option<SubmitTicket> {
        let term = self.state.query().trim().to_string();
        self.begin_submit(term)
    }

    /// Submit an explicit place name, overriding the query field. Used by
    /// suggestion selection and the initial bootstrap fetch.
    pub fn submit_place(&mut self, name: &str) -> Option<SubmitTicket> {
        self.state.set_query(name);
        self.begin_submit(name.trim().to_string())
    }

    /// Select a suggestion by index: sets the query to the suggestion's
    /// place name and issues the paired fetch. The suggestion list is
    /// cleared synchronously, before the fetch resolves.
    pub fn select_suggestion(&mut self, index: usize) -> Option<SubmitTicket> {
        let name = self.suggestions.get(index)?.name.clone();
        self.submit_place(&name)
    }

    /// Outside-click equivalent: close the suggestion list without touching
    /// the query text. Any in-flight suggestion request is invalidated so a
    /// late response cannot reopen the list.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestion_gen += 1;
        if !self.suggestions.is_empty() {
            self.suggestions.clear();
            self.phase = SearchPhase::Typing;
        }
    }

    fn begin_submit(&mut self, term: String) -> Option<SubmitTicket> {
        // Empty term: stay in the current state, issue nothing.
        if term.is_empty() {
            return None;
        }

        // Submission closes the suggestion list for good: invalidate any
        // request still in flight along with the visible list.
        self.suggestion_gen += 1;
        self.suggestions.clear();
        self.error = None;
        self.phase = SearchPhase::Submitting;
        self.submit_gen += 1;

        Some(SubmitTicket {
            generation: self.submit_gen,
            term,
        })
    }

    /// Apply the outcome of a paired weather+forecast fetch.
    ///
    /// Success commits both records together and clears the error. Failure
    /// leaves both stored records untouched (last-good-value policy) and
    /// sets the user-visible error. Stale completions are discarded.
    pub fn resolve_weather(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<(CurrentWeather, Forecast), DataFetchError>,
    ) {
        if ticket.generation != self.submit_gen {
            debug!(
                stale = ticket.generation,
                latest = self.submit_gen,
                term = %ticket.term,
                "discarding superseded weather response"
            );
            return;
        }

        match outcome {
            Ok((weather, forecast)) => {
                self.state.commit_records(weather, forecast);
                self.error = None;
                self.phase = SearchPhase::Idle;
            }
            Err(err) => {
                warn!(%err, term = %ticket.term, "weather fetch failed");
                self.error = Some(WEATHER_ERROR_MSG.to_string());
                self.phase = SearchPhase::Error;
            }
        }
    }

    /// Full keystroke round trip against a suggestion source.
    pub async fn drive_input(&mut self, text: &str, source: &dyn SuggestionSource) {
        if let Some(ticket) = self.input(text) {
            let outcome = source.fetch_suggestions(&ticket.term, ticket.limit).await;
            self.resolve_suggestions(ticket, outcome);
        }
    }

    /// Full submit round trip against a weather source. The two fetches run
    /// concurrently; their relative order is not observable, only the paired
    /// outcome is applied.
    pub async fn drive_submit(&mut self, ticket: SubmitTicket, source: &dyn WeatherDataSource) {
        let (weather, forecast) = tokio::join!(
            source.fetch_current_weather(&ticket.term),
            source.fetch_forecast(&ticket.term),
        );

        let outcome = weather.and_then(|w| forecast.map(|f| (w, f)));
        self.resolve_weather(ticket, outcome);
    }
}
