use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text, text_input};
use cosmic::{theme, Element};

use crate::api::cache::{LoadState, ScopedList};
use crate::core::dates;
use crate::core::opinion::{Parecer, ParecerForm};
use crate::fl;
use crate::message::Message;

fn parecer_card(parecer: &Parecer, confirming_delete: bool) -> Element<'static, Message> {
    let mut header = row().spacing(8).align_y(Alignment::Center);
    header = header.push(text::body(parecer.titulo.clone()).width(Length::Fill));
    if let Some(data) = parecer.criado_em.as_deref().and_then(dates::badge) {
        header = header.push(text::caption(data).size(11.0));
    }

    if confirming_delete {
        header = header.push(text::caption(fl!("confirm-remove-parecer")));
        header = header.push(
            button::destructive(fl!("delete")).on_press(Message::DeleteParecer(parecer.id)),
        );
        header = header.push(
            button::standard(fl!("cancel")).on_press(Message::CancelDeleteParecer),
        );
    } else {
        header = header.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::ConfirmDeleteParecer(parecer.id)),
        );
    }

    let mut body = column().spacing(4).push(header);
    if let Some(ref conteudo) = parecer.conteudo {
        if !conteudo.is_empty() {
            body = body.push(text::caption(conteudo.clone()));
        }
    }

    container(body)
        .padding(12)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

pub fn opinions_view(
    pareceres: &ScopedList<Parecer>,
    form: &ParecerForm,
    pending_delete: Option<i64>,
) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("opinions-title")));
    content = content.push(text::caption(fl!("opinions-desc")));

    content = content.push(
        text_input::text_input(fl!("parecer-titulo-placeholder"), form.titulo.clone())
            .on_input(Message::SetParecerTitulo)
            .width(Length::Fill),
    );
    content = content.push(
        text_input::text_input(fl!("parecer-conteudo-placeholder"), form.conteudo.clone())
            .on_input(Message::SetParecerConteudo)
            .on_submit(|_| Message::SubmitParecer)
            .width(Length::Fill),
    );
    if let Some(ref error) = form.error {
        content = content.push(text::caption(error.clone()));
    }
    content = content.push(
        row().push(button::suggested(fl!("add-parecer")).on_press(Message::SubmitParecer)),
    );

    if pareceres.is_initial_loading() {
        content = content.push(text::caption(fl!("opinions-loading")));
    } else if pareceres.items().is_empty() {
        if let LoadState::Failed(detail) = pareceres.state() {
            content = content.push(text::caption(detail.clone()));
            content = content.push(button::standard(fl!("retry")).on_press(Message::Refresh));
        } else {
            content = content.push(
                container(text::body(fl!("opinions-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        }
    } else {
        for parecer in pareceres.items() {
            content = content.push(parecer_card(parecer, pending_delete == Some(parecer.id)));
        }
    }

    content.into()
}
