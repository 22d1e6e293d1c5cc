use cosmic::iced::Length;
use cosmic::widget::{column, container, text};
use cosmic::{theme, Element};

use crate::core::dates;
use crate::core::opportunity::Oportunidade;
use crate::fl;
use crate::message::Message;

pub fn timeline_view(record: &Oportunidade) -> Element<'static, Message> {
    let mut content = column()
        .spacing(12)
        .push(text::title4(fl!("timeline-title")))
        .push(text::caption(fl!("timeline-desc")));

    let mut entries = column().spacing(6);
    let mut any = false;

    if let Some(data) = record.created_at.as_deref().and_then(dates::badge) {
        entries = entries.push(text::body(fl!("timeline-created", date = data)));
        any = true;
    }
    if let Some(data) = record.updated_at.as_deref().and_then(dates::badge) {
        entries = entries.push(text::body(fl!("timeline-updated", date = data)));
        any = true;
    }

    if any {
        content = content.push(entries);
    } else {
        content = content.push(text::caption(fl!("not-informed")));
    }

    container(content)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}
