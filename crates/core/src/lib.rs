//! VidDigest Core Library
//!
//! Client-side controller for the VidDigest summarizer: URL validation, the
//! analysis request lifecycle, result rendering, notifications and clipboard
//! support. Front ends (desktop window, CLI) drive [`App`] and run its effects.

pub mod app;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod format;
pub mod health;
pub mod notify;
pub mod phase;
pub mod render;
pub mod runtime;
pub mod ticker;
pub mod types;
pub mod validate;

// Re-export commonly used items at crate root
pub use app::{App, Effect, Message, SubmitButton};
pub use client::{AnalysisApi, ApiClient};
pub use clipboard::{ClipboardBackend, ClipboardService, CommandClipboard, SystemClipboard};
pub use config::ClientConfig;
pub use error::{AnalysisError, ClipboardError, ConfigError, Result, ValidationError};
pub use format::{format_analysis_readable, format_views};
pub use notify::{Notification, NotificationRequest, Notifications, Severity, ToastStage};
pub use phase::{Phase, Visibility};
pub use render::{CopyKind, RenderedAnalysis, TimestampBlock, render};
pub use runtime::{Driver, Runtime};
pub use types::{AnalyzeRequest, HealthStatus, VideoAnalysis, ViewCount};
pub use validate::{extract_video_id, is_valid_url, validate_input};
