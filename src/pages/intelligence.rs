use cosmic::iced::Length;
use cosmic::widget::{column, container, text};
use cosmic::{theme, Element};

use crate::fl;
use crate::message::Message;

pub fn intelligence_view() -> Element<'static, Message> {
    let content = column()
        .spacing(12)
        .push(text::title4(fl!("intelligence-title")))
        .push(text::caption(fl!("intelligence-desc")))
        .push(
            container(text::body(fl!("intelligence-body")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );

    container(content)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}
