use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text, text_input};
use cosmic::{theme, Element};

use crate::api::cache::{LoadState, ScopedList};
use crate::core::document::{Documento, DocumentoForm};
use crate::fl;
use crate::message::Message;

fn documento_row(documento: &Documento, confirming_delete: bool) -> Element<'static, Message> {
    let mut info = column().spacing(2).width(Length::Fill);
    info = info.push(text::body(documento.nome.clone()));
    if let Some(ref url) = documento.url {
        if !url.is_empty() {
            info = info.push(text::caption(url.clone()).size(11.0));
        }
    }
    if let Some(ref observacao) = documento.observacao {
        if !observacao.is_empty() {
            info = info.push(text::caption(observacao.clone()));
        }
    }

    let mut actions = row().spacing(8).align_y(Alignment::Center);
    if documento.has_url() {
        actions = actions.push(
            button::standard(fl!("open-documento"))
                .on_press(Message::OpenDocumentoUrl(documento.id)),
        );
    }
    if confirming_delete {
        actions = actions.push(text::caption(fl!("confirm-remove-documento")));
        actions = actions.push(
            button::destructive(fl!("delete")).on_press(Message::DeleteDocumento(documento.id)),
        );
        actions = actions.push(
            button::standard(fl!("cancel")).on_press(Message::CancelDeleteDocumento),
        );
    } else {
        actions = actions.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::ConfirmDeleteDocumento(documento.id)),
        );
    }

    container(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(info)
            .push(actions),
    )
    .padding(12)
    .width(Length::Fill)
    .class(theme::Container::Card)
    .into()
}

pub fn documents_view(
    documentos: &ScopedList<Documento>,
    form: &DocumentoForm,
    pending_delete: Option<i64>,
) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("documents-title")));
    content = content.push(text::caption(fl!("documents-desc")));

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(fl!("documento-nome-placeholder"), form.nome.clone())
                    .on_input(Message::SetDocumentoNome)
                    .width(Length::Fill),
            )
            .push(
                text_input::text_input(fl!("documento-url-placeholder"), form.url.clone())
                    .on_input(Message::SetDocumentoUrl)
                    .width(Length::Fill),
            ),
    );
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(fl!("documento-obs-placeholder"), form.observacao.clone())
                    .on_input(Message::SetDocumentoObservacao)
                    .on_submit(|_| Message::SubmitDocumento)
                    .width(Length::Fill),
            )
            .push(
                button::suggested(fl!("add-documento")).on_press(Message::SubmitDocumento),
            ),
    );
    if let Some(ref error) = form.error {
        content = content.push(text::caption(error.clone()));
    }

    if documentos.is_initial_loading() {
        content = content.push(text::caption(fl!("documents-loading")));
    } else if documentos.items().is_empty() {
        if let LoadState::Failed(detail) = documentos.state() {
            content = content.push(text::caption(detail.clone()));
            content = content.push(button::standard(fl!("retry")).on_press(Message::Refresh));
        } else {
            content = content.push(
                container(text::body(fl!("documents-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        }
    } else {
        for documento in documentos.items() {
            content = content.push(documento_row(documento, pending_delete == Some(documento.id)));
        }
    }

    content.into()
}
