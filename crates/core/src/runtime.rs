use std::{future::Future, pin::Pin, sync::Arc};

use futures::{StreamExt, stream::FuturesUnordered};

use crate::{
    app::{App, Effect, Message},
    client::AnalysisApi,
    clipboard::ClipboardService,
    error::AnalysisError,
    health,
};

type PendingEffect = Pin<Box<dyn Future<Output = Option<Message>> + Send>>;

/// Runs [`Effect`]s against the real world.
///
/// Effects a front end must handle itself (focus, scrolling) resolve to
/// `None` here.
#[derive(Clone)]
pub struct Runtime {
    api: Arc<dyn AnalysisApi>,
    clipboard: ClipboardService,
}

impl Runtime {
    pub fn new(api: Arc<dyn AnalysisApi>, clipboard: ClipboardService) -> Self {
        Self { api, clipboard }
    }

    pub async fn perform(self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::CheckHealth => health::probe(self.api.as_ref()).await.map(Message::Notify),
            Effect::Analyze { ticket, url } => {
                let result = self.analyze(url).await.map_err(Arc::new);
                Some(Message::AnalysisFinished { ticket, result })
            }
            Effect::After { delay, message } => {
                tokio::time::sleep(delay).await;
                Some(message)
            }
            Effect::Copy { kind, text } => {
                let result = self.clipboard.copy_async(text).await.map_err(Arc::new);
                Some(Message::CopyFinished { kind, result })
            }
            Effect::FocusInput | Effect::ScrollToResults => None,
        }
    }

    /// The request runs on its own task so that even a panic inside it comes
    /// back as an error and the page always leaves the loading state.
    async fn analyze(&self, url: String) -> Result<crate::types::VideoAnalysis, AnalysisError> {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move { api.analyze(&url).await })
            .await
            .map_err(|e| AnalysisError::Aborted(e.to_string()))?
    }
}

/// Drives an [`App`] without a window: effects run concurrently and their
/// messages are fed back in completion order.
pub struct Driver {
    app: App,
    runtime: Runtime,
    pending: FuturesUnordered<PendingEffect>,
}

impl Driver {
    pub fn new(app: App, runtime: Runtime, effects: Vec<Effect>) -> Self {
        let mut driver = Self {
            app,
            runtime,
            pending: FuturesUnordered::new(),
        };
        driver.spawn_all(effects);
        driver
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn dispatch(&mut self, message: Message) {
        let effects = self.app.update(message);
        self.spawn_all(effects);
    }

    fn spawn_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.pending.push(Box::pin(self.runtime.clone().perform(effect)));
        }
    }

    /// Process messages until `done` holds. Returns `false` if the effects
    /// ran dry first.
    pub async fn run_until(&mut self, mut done: impl FnMut(&App) -> bool) -> bool {
        loop {
            if done(&self.app) {
                return true;
            }
            match self.pending.next().await {
                Some(Some(message)) => self.dispatch(message),
                Some(None) => {}
                None => return done(&self.app),
            }
        }
    }

    /// Let every outstanding effect finish, toasts and timers included.
    pub async fn settle(&mut self) {
        while let Some(next) = self.pending.next().await {
            if let Some(message) = next {
                self.dispatch(message);
            }
        }
    }

    pub fn into_app(self) -> App {
        self.app
    }
}
