use std::{collections::HashSet, time::Duration};

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use viddigest_core::{App, Notification, Severity};

pub fn format_elapsed(d: Duration) -> String {
    if d < Duration::from_secs(60) {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        let secs = d.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

pub fn toast_line(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => style("✓").green().bold(),
        Severity::Error => style("✗").red().bold(),
        Severity::Warning => style("!").yellow().bold(),
        Severity::Info => style("i").cyan().bold(),
    };
    format!("{} {}", marker, notification.message)
}

/// Prints each toast once, the first time it shows up.
#[derive(Default)]
pub struct ToastEcho {
    seen: HashSet<u64>,
}

impl ToastEcho {
    pub fn echo(&mut self, app: &App, spinner: Option<&ProgressBar>) {
        for toast in app.notifications().iter() {
            if !self.seen.insert(toast.id) {
                continue;
            }
            let line = toast_line(toast);
            match spinner {
                Some(pb) => pb.println(line),
                None => eprintln!("{}", line),
            }
        }
    }
}
