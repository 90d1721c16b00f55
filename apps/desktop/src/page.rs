use iced::{
    Task,
    widget::{scrollable, text_input},
};
use viddigest_core::{App, Effect, Message, Runtime};

use crate::view::results_offset;

pub fn url_input_id() -> text_input::Id {
    text_input::Id::new("video-url")
}

pub fn page_scroll_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

/// The window: controller state plus the runtime that executes its effects.
pub struct Page {
    pub(crate) app: App,
    runtime: Runtime,
}

impl Page {
    pub fn new(runtime: Runtime) -> (Self, Task<Message>) {
        let (app, effects) = App::boot();
        let page = Self { app, runtime };
        let task = page.run(effects);
        (page, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.app.update(message);
        self.run(effects)
    }

    fn run(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| self.task_for(effect)))
    }

    fn task_for(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FocusInput => text_input::focus(url_input_id()),
            Effect::ScrollToResults => scrollable::scroll_to(page_scroll_id(), results_offset()),
            effect => Task::future(self.runtime.clone().perform(effect)).then(|message| {
                match message {
                    Some(message) => Task::done(message),
                    None => Task::none(),
                }
            }),
        }
    }
}
