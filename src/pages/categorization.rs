use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, flex_row, row, text};
use cosmic::{theme, Element};

use crate::api::cache::{LoadState, ScopedList};
use crate::components::badge;
use crate::core::categorization::{available_categorias, vinculo_label, CategoriaVinculo};
use crate::core::reference::Categoria;
use crate::core::status::StatusAccent;
use crate::fl;
use crate::message::Message;

fn categoria_chip(
    categorias: &[Categoria],
    vinculo: &CategoriaVinculo,
) -> Element<'static, Message> {
    let inner = row()
        .spacing(6)
        .align_y(Alignment::Center)
        .push(text::caption(vinculo_label(categorias, vinculo)).size(11.0))
        .push(
            button::custom(text::caption(fl!("remove-link")).size(11.0))
                .padding([0, 4])
                .class(theme::Button::Text)
                .on_press(Message::UnlinkCategoria(vinculo.id)),
        );

    container(inner)
        .padding([2, 8])
        .class(badge::badge_class(StatusAccent::Neutral))
        .into()
}

pub fn categorization_view(
    categorias: &[Categoria],
    vinculos: &ScopedList<CategoriaVinculo>,
) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("categorization-title")));
    content = content.push(text::caption(fl!("categorization-desc")));

    if vinculos.is_initial_loading() {
        content = content.push(text::caption(fl!("categorization-loading")));
    } else {
        content = content.push(text::caption(fl!("linked-categories")).size(11.0));
        if vinculos.items().is_empty() {
            if let LoadState::Failed(detail) = vinculos.state() {
                content = content.push(text::caption(detail.clone()));
                content = content.push(button::standard(fl!("retry")).on_press(Message::Refresh));
            } else {
                content = content.push(text::caption(fl!("no-linked-categories")));
            }
        } else {
            let chips: Vec<Element<'static, Message>> = vinculos
                .items()
                .iter()
                .map(|v| categoria_chip(categorias, v))
                .collect();
            content = content.push(flex_row(chips).row_spacing(8).column_spacing(8));
        }

        content = content.push(text::caption(fl!("add-category")).size(11.0));
        let available = available_categorias(categorias, vinculos.items());
        if available.is_empty() {
            content = content.push(text::caption(fl!("no-category-available")));
        } else {
            // Picking an entry links immediately; the rebuilt list resets the selection.
            let labels: Vec<String> = available.iter().map(|c| c.nome.clone()).collect();
            let ids: Vec<i64> = available.iter().map(|c| c.id).collect();
            content = content.push(
                row()
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .push(
                        dropdown(labels, None::<usize>, move |idx| {
                            Message::LinkCategoria(ids.get(idx).copied().unwrap_or_default())
                        })
                        .width(Length::Fixed(280.0)),
                    )
                    .push(text::caption(fl!("category-placeholder")).size(11.0)),
            );
        }
    }

    container(content)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}
