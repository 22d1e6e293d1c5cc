use cosmic::iced::widget::container::Style;
use cosmic::iced::{Background, Border, Color};
use cosmic::widget::{container, text};
use cosmic::{theme, Element};

use crate::core::status::StatusAccent;
use crate::message::Message;

fn accent_color(accent: StatusAccent) -> Color {
    match accent {
        StatusAccent::Green => Color::from_rgb8(0x22, 0xc5, 0x5e),
        StatusAccent::Amber => Color::from_rgb8(0xf5, 0x9e, 0x0b),
        StatusAccent::Yellow => Color::from_rgb8(0xea, 0xb3, 0x08),
        StatusAccent::Purple => Color::from_rgb8(0xa8, 0x55, 0xf7),
        StatusAccent::Blue => Color::from_rgb8(0x3b, 0x82, 0xf6),
        StatusAccent::Red => Color::from_rgb8(0xef, 0x44, 0x44),
        StatusAccent::Neutral => Color::from_rgb8(0x6b, 0x72, 0x80),
    }
}

/// Pill container class filled with the accent color.
pub fn badge_class(accent: StatusAccent) -> theme::Container<'static> {
    let color = accent_color(accent);
    theme::Container::custom(move |_theme| Style {
        background: Some(Background::Color(color)),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 12.0.into(),
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Render a status pill colored by the status name.
pub fn accent_badge(label: String, accent: StatusAccent) -> Element<'static, Message> {
    container(text::caption(label).size(11.0))
        .padding([2, 8])
        .class(badge_class(accent))
        .into()
}

/// Gray pill for labels without a status accent.
pub fn neutral_badge(label: String) -> Element<'static, Message> {
    accent_badge(label, StatusAccent::Neutral)
}
