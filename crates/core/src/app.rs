//! Page controller state machine.
//!
//! Every user action and every completed piece of async work arrives as a
//! [`Message`]; [`App::update`] applies it and hands back the [`Effect`]s a
//! front end has to run. Nothing here touches the network, the clock or the
//! clipboard directly.

use std::{sync::Arc, time::Duration};

use crate::{
    config::timing,
    error::{AnalysisError, ClipboardError},
    notify::{NotificationRequest, Notifications, Severity, StageStep},
    phase::{Phase, Visibility},
    render::{CopyKind, RenderedAnalysis, render},
    ticker::{INITIAL_LOADING_TEXT, LoadingTicker, Tick},
    types::VideoAnalysis,
    validate::validate_input,
};

pub const SUBMIT_LABEL: &str = "🎯 Analyze Video";
pub const SUBMIT_BUSY_LABEL: &str = "🔄 Analyzing";
pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_SUCCESS: &str = "Copied to clipboard!";
pub const NOTHING_TO_COPY: &str = "Nothing to copy";
pub const COPY_FAILED: &str = "Copy failed";

#[derive(Debug, Clone)]
pub enum Message {
    UrlChanged(String),
    Submit,
    AnalysisFinished {
        ticket: u64,
        result: Result<VideoAnalysis, Arc<AnalysisError>>,
    },
    LoadingTick {
        ticket: u64,
    },
    ScrollToResults,
    Notify(NotificationRequest),
    ToastAdvance(u64),
    Copy(CopyKind),
    CopyFinished {
        kind: CopyKind,
        result: Result<&'static str, Arc<ClipboardError>>,
    },
    CopyFlashEnded {
        kind: CopyKind,
        generation: u64,
    },
}

#[derive(Debug, Clone)]
pub enum Effect {
    CheckHealth,
    FocusInput,
    Analyze { ticket: u64, url: String },
    After { delay: Duration, message: Message },
    Copy { kind: CopyKind, text: String },
    ScrollToResults,
}

impl Effect {
    fn after(delay: Duration, message: Message) -> Self {
        Effect::After { delay, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Default)]
pub struct App {
    input: String,
    phase: Phase,
    current: Option<VideoAnalysis>,
    rendered: Option<RenderedAnalysis>,
    loading_text: String,
    ticker: Option<LoadingTicker>,
    next_ticket: u64,
    notifications: Notifications,
    summary_flash: Option<u64>,
    timestamps_flash: Option<u64>,
    flash_generation: u64,
}

impl App {
    /// A fresh page plus the work to do on load.
    pub fn boot() -> (Self, Vec<Effect>) {
        let app = Self {
            loading_text: INITIAL_LOADING_TEXT.to_string(),
            ..Self::default()
        };
        (app, vec![Effect::FocusInput, Effect::CheckHealth])
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::UrlChanged(url) => {
                self.input = url;
                if !self.phase.is_loading() {
                    self.phase = Phase::Idle;
                }
                Vec::new()
            }
            Message::Submit => self.submit(),
            Message::AnalysisFinished { ticket, result } => self.finish_analysis(ticket, result),
            Message::LoadingTick { ticket } => self.loading_tick(ticket),
            Message::ScrollToResults => match self.phase {
                Phase::Results => vec![Effect::ScrollToResults],
                _ => Vec::new(),
            },
            Message::Notify(request) => vec![self.notify(request)],
            Message::ToastAdvance(id) => match self.notifications.advance(id) {
                StageStep::AdvanceAfter(delay) => {
                    vec![Effect::after(delay, Message::ToastAdvance(id))]
                }
                StageStep::Removed => Vec::new(),
            },
            Message::Copy(kind) => self.copy(kind),
            Message::CopyFinished { kind, result } => match result {
                Ok(backend) => {
                    tracing::debug!(?kind, backend, "copied");
                    self.flash_generation += 1;
                    let generation = self.flash_generation;
                    *self.flash_slot(kind) = Some(generation);
                    vec![
                        Effect::after(
                            timing::COPY_FLASH,
                            Message::CopyFlashEnded { kind, generation },
                        ),
                        self.notify(NotificationRequest::new(COPY_SUCCESS, Severity::Success)),
                    ]
                }
                Err(e) => {
                    tracing::warn!(?kind, error = %e, "copy failed");
                    vec![self.notify(NotificationRequest::new(COPY_FAILED, Severity::Error))]
                }
            },
            Message::CopyFlashEnded { kind, generation } => {
                let slot = self.flash_slot(kind);
                if *slot == Some(generation) {
                    *slot = None;
                }
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if let Some(ticket) = self.phase.loading_ticket() {
            tracing::debug!(ticket, "analysis already in flight, ignoring submit");
            return Vec::new();
        }

        let url = match validate_input(&self.input) {
            Ok(url) => url.to_string(),
            Err(e) => {
                self.phase = Phase::Error(e.to_string());
                return Vec::new();
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        tracing::info!(ticket, %url, "starting analysis");

        self.phase = Phase::Loading { ticket };
        self.loading_text = INITIAL_LOADING_TEXT.to_string();
        self.ticker = Some(LoadingTicker::new(ticket));

        vec![
            Effect::Analyze { ticket, url },
            Effect::after(timing::TICKER_INTERVAL, Message::LoadingTick { ticket }),
        ]
    }

    fn finish_analysis(
        &mut self,
        ticket: u64,
        result: Result<VideoAnalysis, Arc<AnalysisError>>,
    ) -> Vec<Effect> {
        if self.phase.loading_ticket() != Some(ticket) {
            tracing::debug!(ticket, "dropping stale analysis result");
            return Vec::new();
        }

        // Leaving Loading re-enables the submit button on every path below.
        self.phase = Phase::Idle;

        match result {
            Ok(data) => {
                tracing::info!(ticket, title = %data.title, "analysis complete");
                self.rendered = Some(render(&data));
                self.current = Some(data);
                self.phase = Phase::Results;
                vec![Effect::after(timing::SCROLL_DELAY, Message::ScrollToResults)]
            }
            Err(e) => {
                tracing::error!(ticket, error = %e, "analysis failed");
                self.phase = Phase::Error(e.user_message());
                Vec::new()
            }
        }
    }

    fn loading_tick(&mut self, ticket: u64) -> Vec<Effect> {
        let loading = self.phase.loading_ticket();
        let Some(ticker) = self.ticker.as_mut().filter(|t| t.ticket() == ticket) else {
            return Vec::new();
        };

        match ticker.tick(loading) {
            Tick::Show(text) => {
                self.loading_text = text.to_string();
                vec![Effect::after(
                    timing::TICKER_INTERVAL,
                    Message::LoadingTick { ticket },
                )]
            }
            Tick::Stop => {
                self.ticker = None;
                Vec::new()
            }
        }
    }

    fn copy(&mut self, kind: CopyKind) -> Vec<Effect> {
        let text = self
            .rendered
            .as_ref()
            .map(|r| r.copy_text(kind))
            .unwrap_or_default();

        if text.is_empty() {
            return vec![self.notify(NotificationRequest::new(NOTHING_TO_COPY, Severity::Error))];
        }
        vec![Effect::Copy { kind, text }]
    }

    fn notify(&mut self, request: NotificationRequest) -> Effect {
        let (id, delay) = self.notifications.push(request);
        Effect::after(delay, Message::ToastAdvance(id))
    }

    fn flash_slot(&mut self, kind: CopyKind) -> &mut Option<u64> {
        match kind {
            CopyKind::Summary => &mut self.summary_flash,
            CopyKind::Timestamps => &mut self.timestamps_flash,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn visibility(&self) -> Visibility {
        self.phase.visibility()
    }

    pub fn current(&self) -> Option<&VideoAnalysis> {
        self.current.as_ref()
    }

    pub fn rendered(&self) -> Option<&RenderedAnalysis> {
        self.rendered.as_ref()
    }

    pub fn loading_text(&self) -> &str {
        &self.loading_text
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn submit_button(&self) -> SubmitButton {
        if self.phase.is_loading() {
            SubmitButton {
                enabled: false,
                label: SUBMIT_BUSY_LABEL,
            }
        } else {
            SubmitButton {
                enabled: true,
                label: SUBMIT_LABEL,
            }
        }
    }

    pub fn copy_label(&self, kind: CopyKind) -> &'static str {
        let flashing = match kind {
            CopyKind::Summary => self.summary_flash.is_some(),
            CopyKind::Timestamps => self.timestamps_flash.is_some(),
        };
        if flashing { COPIED_LABEL } else { kind.label() }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::types::ViewCount;

    fn sample() -> VideoAnalysis {
        VideoAnalysis {
            video_id: Some("abc123".to_string()),
            title: "Title".to_string(),
            duration: "10:00".to_string(),
            views: ViewCount::Count(42),
            channel: "Channel".to_string(),
            summary: "Summary".to_string(),
            key_points: vec!["a".to_string(), "b".to_string()],
            timestamps: vec![],
        }
    }

    fn submit(app: &mut App, url: &str) -> Vec<Effect> {
        app.update(Message::UrlChanged(url.to_string()));
        app.update(Message::Submit)
    }

    fn ticket_of(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Analyze { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("analyze effect")
    }

    #[test]
    fn boot_focuses_input_and_checks_health() {
        let (app, effects) = App::boot();
        assert_eq!(app.phase(), &Phase::Idle);
        assert!(matches!(effects.as_slice(), [Effect::FocusInput, Effect::CheckHealth]));
    }

    #[test]
    fn notify_pushes_a_toast_and_schedules_its_slide_in() {
        let (mut app, _) = App::boot();
        let effects = app.update(Message::Notify(NotificationRequest::new(
            "Backend is warming up",
            Severity::Warning,
        )));

        let toast = app.notifications().iter().next().unwrap();
        assert_eq!(toast.message, "Backend is warming up");
        assert!(matches!(
            effects.as_slice(),
            [Effect::After { message: Message::ToastAdvance(id), .. }] if *id == toast.id
        ));
    }

    #[test]
    fn blank_submit_shows_missing_url_without_request() {
        let (mut app, _) = App::boot();
        let effects = submit(&mut app, "   ");
        assert!(effects.is_empty());
        assert_eq!(app.phase().error_message(), Some("Please enter a YouTube URL"));
        assert!(app.submit_button().enabled);
    }

    #[test]
    fn invalid_submit_shows_invalid_url_without_request() {
        let (mut app, _) = App::boot();
        let effects = submit(&mut app, "https://vimeo.com/12345");
        assert!(effects.is_empty());
        assert_eq!(
            app.phase().error_message(),
            Some("Please enter a valid YouTube URL")
        );
    }

    #[test]
    fn valid_submit_enters_loading() {
        let (mut app, _) = App::boot();
        let effects = submit(&mut app, "  https://youtu.be/abc123 ");

        assert!(matches!(
            &effects[0],
            Effect::Analyze { url, .. } if url == "https://youtu.be/abc123"
        ));
        assert!(app.visibility().loading);
        assert_eq!(
            app.submit_button(),
            SubmitButton {
                enabled: false,
                label: SUBMIT_BUSY_LABEL
            }
        );
        assert_eq!(app.loading_text(), INITIAL_LOADING_TEXT);
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let (mut app, _) = App::boot();
        submit(&mut app, "https://youtu.be/abc123");
        assert!(app.update(Message::Submit).is_empty());
    }

    #[test]
    fn success_renders_and_schedules_scroll() {
        let (mut app, _) = App::boot();
        let ticket = ticket_of(&submit(&mut app, "https://youtu.be/abc123"));

        let effects = app.update(Message::AnalysisFinished {
            ticket,
            result: Ok(sample()),
        });

        assert_eq!(app.phase(), &Phase::Results);
        assert!(app.submit_button().enabled);
        assert_eq!(app.current().unwrap().title, "Title");
        assert!(matches!(
            effects.as_slice(),
            [Effect::After { delay, message: Message::ScrollToResults }] if *delay == timing::SCROLL_DELAY
        ));
        assert!(matches!(
            app.update(Message::ScrollToResults).as_slice(),
            [Effect::ScrollToResults]
        ));
    }

    #[test]
    fn failure_shows_detail_and_restores_button() {
        let (mut app, _) = App::boot();
        let ticket = ticket_of(&submit(&mut app, "https://youtu.be/abc123"));

        app.update(Message::AnalysisFinished {
            ticket,
            result: Err(Arc::new(AnalysisError::Api {
                status: StatusCode::TOO_MANY_REQUESTS,
                detail: Some("quota exceeded".to_string()),
            })),
        });

        assert_eq!(app.phase().error_message(), Some("quota exceeded"));
        assert_eq!(app.submit_button().label, SUBMIT_LABEL);
        assert!(!app.visibility().loading);
    }

    #[test]
    fn stale_results_are_dropped() {
        let (mut app, _) = App::boot();
        let ticket = ticket_of(&submit(&mut app, "https://youtu.be/abc123"));

        let effects = app.update(Message::AnalysisFinished {
            ticket: ticket + 1,
            result: Ok(sample()),
        });
        assert!(effects.is_empty());
        assert!(app.phase().is_loading());
    }

    #[test]
    fn typing_clears_error_and_results() {
        let (mut app, _) = App::boot();
        submit(&mut app, "");
        assert!(app.visibility().error);

        app.update(Message::UrlChanged("h".to_string()));
        assert_eq!(app.visibility(), Visibility::default());
    }

    #[test]
    fn typing_during_loading_keeps_loading() {
        let (mut app, _) = App::boot();
        submit(&mut app, "https://youtu.be/abc123");
        app.update(Message::UrlChanged("x".to_string()));
        assert!(app.phase().is_loading());
    }

    #[test]
    fn ticker_rotates_then_stops_after_loading() {
        let (mut app, _) = App::boot();
        let ticket = ticket_of(&submit(&mut app, "https://youtu.be/abc123"));

        let next = app.update(Message::LoadingTick { ticket });
        assert_eq!(app.loading_text(), "Extracting video information...");
        assert_eq!(next.len(), 1);

        app.update(Message::AnalysisFinished {
            ticket,
            result: Ok(sample()),
        });
        assert!(app.ticker_running());

        // The pending tick notices loading is over and ends the chain.
        assert!(app.update(Message::LoadingTick { ticket }).is_empty());
        assert!(!app.ticker_running());
        assert_eq!(app.loading_text(), "Extracting video information...");
    }

    #[test]
    fn copy_without_results_says_nothing_to_copy() {
        let (mut app, _) = App::boot();
        let effects = app.update(Message::Copy(CopyKind::Summary));

        assert!(effects.iter().all(|e| !matches!(e, Effect::Copy { .. })));
        let toast = app.notifications().iter().next().unwrap();
        assert_eq!(toast.message, NOTHING_TO_COPY);
        assert_eq!(toast.severity, Severity::Error);
    }

    #[test]
    fn copy_success_flashes_label_for_a_while() {
        let (mut app, _) = App::boot();
        let ticket = ticket_of(&submit(&mut app, "https://youtu.be/abc123"));
        app.update(Message::AnalysisFinished {
            ticket,
            result: Ok(sample()),
        });

        let effects = app.update(Message::Copy(CopyKind::Summary));
        assert!(matches!(
            effects.as_slice(),
            [Effect::Copy { kind: CopyKind::Summary, text }] if text == "Summary"
        ));

        let effects = app.update(Message::CopyFinished {
            kind: CopyKind::Summary,
            result: Ok("system"),
        });
        assert_eq!(app.copy_label(CopyKind::Summary), COPIED_LABEL);
        assert_eq!(app.copy_label(CopyKind::Timestamps), CopyKind::Timestamps.label());

        let Some(Effect::After { message, delay }) = effects.first().cloned() else {
            panic!("expected flash timer");
        };
        assert_eq!(delay, timing::COPY_FLASH);
        app.update(message);
        assert_eq!(app.copy_label(CopyKind::Summary), CopyKind::Summary.label());
        assert_eq!(
            app.notifications().iter().last().unwrap().message,
            COPY_SUCCESS
        );
    }

    #[test]
    fn older_flash_timer_does_not_cut_a_newer_flash_short() {
        let (mut app, _) = App::boot();
        app.update(Message::CopyFinished {
            kind: CopyKind::Timestamps,
            result: Ok("system"),
        });
        app.update(Message::CopyFinished {
            kind: CopyKind::Timestamps,
            result: Ok("system"),
        });

        app.update(Message::CopyFlashEnded {
            kind: CopyKind::Timestamps,
            generation: 1,
        });
        assert_eq!(app.copy_label(CopyKind::Timestamps), COPIED_LABEL);
    }

    #[test]
    fn copy_failure_notifies() {
        let (mut app, _) = App::boot();
        app.update(Message::CopyFinished {
            kind: CopyKind::Summary,
            result: Err(Arc::new(ClipboardError::NoCommand)),
        });
        let toast = app.notifications().iter().next().unwrap();
        assert_eq!(toast.message, COPY_FAILED);
        assert_eq!(app.copy_label(CopyKind::Summary), CopyKind::Summary.label());
    }
}
