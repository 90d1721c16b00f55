use iced::{
    Background, Border, Color, Element, Length,
    alignment::Horizontal,
    widget::{
        Column, button, column, container, row, scrollable, scrollable::AbsoluteOffset, stack,
        text, text_input,
    },
};
use viddigest_core::{
    CopyKind, Message, Notification, RenderedAnalysis, Severity, TimestampBlock, ToastStage,
};

use crate::page::{Page, page_scroll_id, url_input_id};

const PAGE_PADDING: f32 = 32.0;
const REGION_SPACING: f32 = 24.0;
/// Header and form share a fixed-height block so the results region always
/// starts at [`results_offset`].
const TOP_BLOCK_HEIGHT: f32 = 150.0;

/// Scroll offset that puts the top of the results region at the top of the page.
pub fn results_offset() -> AbsoluteOffset {
    AbsoluteOffset {
        x: 0.0,
        y: PAGE_PADDING + TOP_BLOCK_HEIGHT + REGION_SPACING,
    }
}

impl Page {
    pub fn view(&self) -> Element<'_, Message> {
        let visibility = self.app.visibility();

        let top = container(column![self.header(), self.url_form()].spacing(REGION_SPACING))
            .height(TOP_BLOCK_HEIGHT);
        let mut page = column![top]
            .spacing(REGION_SPACING)
            .padding(PAGE_PADDING)
            .max_width(860.0);

        if visibility.loading {
            page = page.push(self.loading_region());
        }
        if let Some(message) = self.app.phase().error_message() {
            page = page.push(error_region(message));
        }
        if visibility.results {
            if let Some(rendered) = self.app.rendered() {
                page = page.push(self.results_region(rendered));
            }
        }

        let body = scrollable(container(page).width(Length::Fill).center_x(Length::Fill))
            .id(page_scroll_id())
            .height(Length::Fill);

        stack![body, self.toasts()].into()
    }

    fn header(&self) -> Element<'_, Message> {
        column![
            text("🎬 VidDigest").size(32),
            text("Transform YouTube videos into concise, actionable summaries").size(16),
        ]
        .spacing(6)
        .into()
    }

    fn url_form(&self) -> Element<'_, Message> {
        let submit = self.app.submit_button();

        row![
            text_input("Paste a YouTube URL...", self.app.input())
                .id(url_input_id())
                .on_input(Message::UrlChanged)
                .on_submit(Message::Submit)
                .padding(10),
            button(text(submit.label))
                .on_press_maybe(submit.enabled.then_some(Message::Submit))
                .padding(10),
        ]
        .spacing(10)
        .into()
    }

    fn loading_region(&self) -> Element<'_, Message> {
        column![text("⏳").size(32), text(self.app.loading_text())]
            .spacing(8)
            .into()
    }

    fn results_region<'a>(&'a self, rendered: &'a RenderedAnalysis) -> Element<'a, Message> {
        let mut results = column![
            text(rendered.title.as_str()).size(24),
            row![
                text(rendered.duration_line.as_str()),
                text(rendered.views_line.as_str()),
                text(rendered.channel_line.as_str()),
            ]
            .spacing(16),
            self.section_heading("📝 Summary", Some(CopyKind::Summary)),
            text(rendered.summary.as_str()),
        ]
        .spacing(12);

        if let Some(points) = &rendered.key_points {
            results = results
                .push(self.section_heading("🎯 Key Points", None))
                .push(Column::with_children(points.iter().enumerate().map(
                    |(i, point)| text(format!("{}. {}", i + 1, point)).into(),
                )));
        }

        let timestamps: Element<'a, Message> = match &rendered.timestamps {
            TimestampBlock::Entries(entries) => Column::with_children(
                entries.iter().map(|entry| text(entry.as_str()).into()),
            )
            .spacing(8)
            .into(),
            TimestampBlock::Placeholder => text(rendered.timestamps_text()).into(),
        };

        results
            .push(self.section_heading("⏰ Timestamps", Some(CopyKind::Timestamps)))
            .push(timestamps)
            .into()
    }

    fn section_heading(&self, title: &'static str, copy: Option<CopyKind>) -> Element<'_, Message> {
        let heading = row![text(title).size(20)].spacing(12);
        match copy {
            Some(kind) => heading
                .push(button(text(self.app.copy_label(kind))).on_press(Message::Copy(kind)))
                .into(),
            None => heading.into(),
        }
    }

    fn toasts(&self) -> Element<'_, Message> {
        let toasts = Column::with_children(self.app.notifications().iter().map(toast)).spacing(8);

        container(toasts)
            .width(Length::Fill)
            .align_x(Horizontal::Right)
            .padding(20)
            .into()
    }
}

fn error_region(message: &str) -> Element<'_, Message> {
    let red = severity_color(Severity::Error, ToastStage::Shown);
    container(text(message).color(red)).padding(12).into()
}

fn toast(notification: &Notification) -> Element<'_, Message> {
    let color = severity_color(notification.severity, notification.stage);

    container(text(notification.message.as_str()).color(Color::WHITE))
        .padding([12, 20])
        .style(move |_theme| container::Style {
            background: Some(Background::Color(color)),
            text_color: Some(Color::WHITE),
            border: Border {
                radius: 8.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

/// Toasts sliding in or out are drawn translucent.
fn severity_color(severity: Severity, stage: ToastStage) -> Color {
    let [r, g, b] = severity.rgb();
    let color = Color::from_rgb8(r, g, b);
    match stage {
        ToastStage::Shown => color,
        ToastStage::Entering | ToastStage::Leaving => Color { a: 0.6, ..color },
    }
}
