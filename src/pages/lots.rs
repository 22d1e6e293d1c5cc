use std::collections::HashMap;

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text, text_input};
use cosmic::{theme, Element};

use crate::api::cache::{LoadState, ScopedList};
use crate::core::lot::{itens_do_lote, Item, ItemForm, Lote, LoteForm};
use crate::fl;
use crate::message::{ItemField, Message};

use super::identification::format_currency;

fn item_meta(item: &Item) -> Option<String> {
    match (item.quantidade, item.unidade.as_deref()) {
        (Some(q), Some(u)) if !u.is_empty() => Some(format!("{} {}", q, u)),
        (Some(q), _) => Some(q.to_string()),
        (None, Some(u)) if !u.is_empty() => Some(u.to_string()),
        _ => None,
    }
}

fn item_row(item: &Item, confirming_delete: bool) -> Element<'static, Message> {
    let mut line = row().spacing(8).align_y(Alignment::Center);
    line = line.push(text::caption(item.descricao.clone()).width(Length::Fill));
    if let Some(meta) = item_meta(item) {
        line = line.push(text::caption(meta).size(11.0));
    }
    if let Some(valor) = item.valor_unitario_estimado {
        line = line.push(text::caption(format_currency(valor)).size(11.0));
    }

    if confirming_delete {
        line = line.push(text::caption(fl!("confirm-remove-item")));
        line = line.push(
            button::destructive(fl!("delete")).on_press(Message::DeleteItem(item.id)),
        );
        line = line.push(button::standard(fl!("cancel")).on_press(Message::CancelDeleteItem));
    } else {
        line = line.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::ConfirmDeleteItem(item.id)),
        );
    }

    line.into()
}

fn item_entry_row(lote_id: i64, form: &ItemForm) -> Element<'static, Message> {
    let mut add = button::icon(icon::from_name("list-add-symbolic"));
    if form.is_submittable() {
        add = add.on_press(Message::SubmitItem(lote_id));
    }

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            text_input::text_input(fl!("item-desc-placeholder"), form.descricao.clone())
                .on_input(move |v| Message::SetItemField(lote_id, ItemField::Descricao, v))
                .on_submit(move |_| Message::SubmitItem(lote_id))
                .width(Length::Fill),
        )
        .push(
            text_input::text_input(fl!("item-qty-placeholder"), form.quantidade.clone())
                .on_input(move |v| Message::SetItemField(lote_id, ItemField::Quantidade, v))
                .width(Length::Fixed(80.0)),
        )
        .push(
            text_input::text_input(fl!("item-unit-placeholder"), form.unidade.clone())
                .on_input(move |v| Message::SetItemField(lote_id, ItemField::Unidade, v))
                .width(Length::Fixed(100.0)),
        )
        .push(add)
        .into()
}

fn lote_card(
    lote: &Lote,
    itens: &[Item],
    item_form: &ItemForm,
    confirming_delete: bool,
    pending_delete_item: Option<i64>,
) -> Element<'static, Message> {
    let mut header = row().spacing(8).align_y(Alignment::Center);
    let mut title = column().spacing(2).width(Length::Fill);
    title = title.push(text::body(lote.numero.clone()));
    if let Some(ref descricao) = lote.descricao {
        if !descricao.is_empty() {
            title = title.push(text::caption(descricao.clone()));
        }
    }
    header = header.push(title);

    if confirming_delete {
        header = header.push(text::caption(fl!("confirm-remove-lote")));
        header = header.push(
            button::destructive(fl!("delete")).on_press(Message::DeleteLote(lote.id)),
        );
        header = header.push(button::standard(fl!("cancel")).on_press(Message::CancelDeleteLote));
    } else {
        header = header.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::ConfirmDeleteLote(lote.id)),
        );
    }

    let mut body = column().spacing(6).push(header);

    let lote_itens = itens_do_lote(itens, lote.id);
    if lote_itens.is_empty() {
        body = body.push(text::caption(fl!("items-empty")).size(11.0));
    } else {
        for item in lote_itens {
            body = body.push(item_row(item, pending_delete_item == Some(item.id)));
        }
    }

    body = body.push(item_entry_row(lote.id, item_form));

    container(body)
        .padding(12)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

pub fn lots_view(
    lotes: &ScopedList<Lote>,
    itens: &ScopedList<Item>,
    lote_form: &LoteForm,
    item_forms: &HashMap<i64, ItemForm>,
    pending_delete_lote: Option<i64>,
    pending_delete_item: Option<i64>,
) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("lots-title")));
    content = content.push(text::caption(fl!("lots-desc")));

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(fl!("lote-numero-placeholder"), lote_form.numero.clone())
                    .on_input(Message::SetLoteNumero)
                    .on_submit(|_| Message::SubmitLote)
                    .width(Length::Fixed(160.0)),
            )
            .push(
                text_input::text_input(fl!("lote-desc-placeholder"), lote_form.descricao.clone())
                    .on_input(Message::SetLoteDescricao)
                    .on_submit(|_| Message::SubmitLote)
                    .width(Length::Fill),
            )
            .push(
                button::icon(icon::from_name("list-add-symbolic")).on_press(Message::SubmitLote),
            ),
    );
    if let Some(ref error) = lote_form.error {
        content = content.push(text::caption(error.clone()));
    }

    if lotes.is_initial_loading() {
        content = content.push(text::caption(fl!("lots-loading")));
    } else if lotes.items().is_empty() {
        if let LoadState::Failed(detail) = lotes.state() {
            content = content.push(text::caption(detail.clone()));
            content = content.push(button::standard(fl!("retry")).on_press(Message::Refresh));
        } else {
            content = content.push(
                container(text::body(fl!("lots-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        }
    } else {
        let default_form = ItemForm::default();
        for lote in lotes.items() {
            let form = item_forms.get(&lote.id).unwrap_or(&default_form);
            content = content.push(lote_card(
                lote,
                itens.items(),
                form,
                pending_delete_lote == Some(lote.id),
                pending_delete_item,
            ));
        }
    }

    content.into()
}
