pub const LOADING_MESSAGES: [&str; 6] = [
    "Extracting video information...",
    "Getting transcript data...",
    "Analyzing content with AI...",
    "Generating summary...",
    "Extracting key points...",
    "Almost done...",
];

pub const INITIAL_LOADING_TEXT: &str = "Processing your video...";

/// Rotating status line shown under the spinner.
///
/// The ticker never cancels itself eagerly: each tick is told whether the
/// request it belongs to is still loading and stops the chain when it is not.
#[derive(Debug, Clone)]
pub struct LoadingTicker {
    ticket: u64,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Show(&'static str),
    Stop,
}

impl LoadingTicker {
    pub fn new(ticket: u64) -> Self {
        Self { ticket, index: 0 }
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// `loading` is the ticket currently in the Loading phase, if any.
    pub fn tick(&mut self, loading: Option<u64>) -> Tick {
        if loading != Some(self.ticket) {
            return Tick::Stop;
        }
        let message = LOADING_MESSAGES[self.index];
        self.index = (self.index + 1) % LOADING_MESSAGES.len();
        Tick::Show(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_messages_and_wraps() {
        let mut ticker = LoadingTicker::new(7);
        let shown: Vec<Tick> = (0..8).map(|_| ticker.tick(Some(7))).collect();

        assert_eq!(shown[0], Tick::Show("Extracting video information..."));
        assert_eq!(shown[5], Tick::Show("Almost done..."));
        assert_eq!(shown[6], Tick::Show("Extracting video information..."));
        assert_eq!(shown[7], Tick::Show("Getting transcript data..."));
    }

    #[test]
    fn stops_once_loading_is_over() {
        let mut ticker = LoadingTicker::new(1);
        assert_eq!(ticker.tick(None), Tick::Stop);
    }

    #[test]
    fn stops_when_another_request_took_over() {
        let mut ticker = LoadingTicker::new(1);
        assert_eq!(ticker.tick(Some(2)), Tick::Stop);
    }
}
