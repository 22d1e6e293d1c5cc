use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text, text_input};
use cosmic::{theme, Element};

use crate::api::cache::{LoadState, ScopedList};
use crate::core::group::{GroupForm, GroupTarget, Grupo};
use crate::fl;
use crate::message::Message;

fn group_row(grupo: &Grupo, confirming_delete: bool) -> Element<'static, Message> {
    let mut info = column().spacing(2).width(Length::Fill);
    info = info.push(text::body(grupo.nome.clone()));
    if let Some(ref descricao) = grupo.descricao {
        if !descricao.is_empty() {
            info = info.push(text::caption(descricao.clone()));
        }
    }

    let mut actions = row().spacing(8).align_y(Alignment::Center);
    actions = actions.push(
        button::standard(fl!("edit")).on_press(Message::OpenGroupEdit(grupo.clone())),
    );
    if confirming_delete {
        actions = actions.push(text::caption(fl!("confirm-remove-group")));
        actions = actions.push(
            button::destructive(fl!("delete")).on_press(Message::DeleteGrupo(grupo.id)),
        );
        actions = actions.push(
            button::standard(fl!("cancel")).on_press(Message::CancelDeleteGrupo),
        );
    } else {
        actions = actions.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::ConfirmDeleteGrupo(grupo.id)),
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

pub fn groups_view(
    grupos: &ScopedList<Grupo>,
    pending_delete: Option<i64>,
) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                column()
                    .spacing(2)
                    .width(Length::Fill)
                    .push(text::title4(fl!("groups-title")))
                    .push(text::caption(fl!("groups-desc"))),
            )
            .push(button::suggested(fl!("new-group")).on_press(Message::OpenGroupCreate)),
    );

    if grupos.is_initial_loading() {
        content = content.push(text::caption(fl!("groups-loading")));
    } else if grupos.items().is_empty() {
        if let LoadState::Failed(detail) = grupos.state() {
            content = content.push(text::caption(detail.clone()));
            content = content.push(button::standard(fl!("retry")).on_press(Message::Refresh));
        } else {
            content = content.push(
                container(text::body(fl!("groups-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        }
    } else {
        for grupo in grupos.items() {
            content = content.push(group_row(grupo, pending_delete == Some(grupo.id)));
        }
    }

    container(content)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

/// Context drawer body for creating or editing one group.
pub fn group_editor_view(form: &GroupForm) -> column::Column<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::caption(fl!("group-name-label")));
    content = content.push(
        text_input::text_input(fl!("group-name-placeholder"), form.nome.clone())
            .on_input(Message::SetGroupNome)
            .on_submit(|_| Message::SubmitGroup)
            .width(Length::Fill),
    );

    content = content.push(text::caption(fl!("group-desc-label")));
    content = content.push(
        text_input::text_input(fl!("group-desc-placeholder"), form.descricao.clone())
            .on_input(Message::SetGroupDescricao)
            .on_submit(|_| Message::SubmitGroup)
            .width(Length::Fill),
    );

    if let Some(ref error) = form.error {
        content = content.push(text::caption(error.clone()));
    }

    let submit_label = if matches!(form.target, GroupTarget::Creating) {
        fl!("create-group")
    } else {
        fl!("save-changes")
    };
    content = content.push(
        row()
            .spacing(8)
            .push(button::suggested(submit_label).on_press(Message::SubmitGroup))
            .push(button::standard(fl!("cancel")).on_press(Message::CloseGroupEditor)),
    );

    content
}
