use cosmic::iced::Length;
use cosmic::widget::{column, container, text, text_input};
use cosmic::{theme, Element};

use crate::core::opportunity::{Oportunidade, OportunidadeDraft};
use crate::fl;
use crate::message::{DraftField, Message};

pub fn object_view(
    record: &Oportunidade,
    draft: Option<&OportunidadeDraft>,
) -> Element<'static, Message> {
    let mut content = column()
        .spacing(12)
        .push(text::title4(fl!("objeto-title")))
        .push(text::caption(fl!("objeto-desc")));

    match draft {
        Some(d) => {
            content = content.push(
                text_input::text_input(fl!("objeto-placeholder"), d.objeto.clone())
                    .on_input(|v| Message::SetDraftField(DraftField::Objeto, v))
                    .width(Length::Fill),
            );
        }
        None => {
            let shown = record
                .objeto
                .clone()
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| fl!("not-informed"));
            content = content.push(text::body(shown));
        }
    }

    container(content)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}
