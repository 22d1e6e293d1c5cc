use cosmic::iced::Length;
use cosmic::widget::{column, container, dropdown, flex_row, text, text_input};
use cosmic::{theme, Element};

use crate::core::opportunity::{Oportunidade, OportunidadeDraft};
use crate::core::reference::{self, FasePipeline, Modalidade, Orgao, StatusOportunidade};
use crate::core::dates;
use crate::fl;
use crate::message::{DraftField, Message};

const FIELD_WIDTH: f32 = 280.0;

/// pt-BR currency text: "R$ 1.234.567,89".
pub(crate) fn format_currency(valor: f64) -> String {
    let negative = valor < 0.0;
    let cents = (valor.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, frac)
}

fn field_block(label: String, inner: Element<'static, Message>) -> Element<'static, Message> {
    column()
        .spacing(4)
        .width(Length::Fixed(FIELD_WIDTH))
        .push(text::caption(label).size(11.0))
        .push(inner)
        .into()
}

fn view_field(label: String, value: Option<String>) -> Element<'static, Message> {
    let shown = value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fl!("not-informed"));
    field_block(label, text::body(shown).into())
}

fn edit_field(
    label: String,
    placeholder: String,
    value: String,
    field: DraftField,
) -> Element<'static, Message> {
    field_block(
        label,
        text_input::text_input(placeholder, value)
            .on_input(move |v| Message::SetDraftField(field, v))
            .width(Length::Fill)
            .into(),
    )
}

fn choice_field(
    label: String,
    placeholder: String,
    names: Vec<String>,
    ids: Vec<i64>,
    selected: Option<i64>,
    on_select: fn(Option<i64>) -> Message,
) -> Element<'static, Message> {
    let labels: Vec<String> = std::iter::once(placeholder).chain(names).collect();
    let index = selected
        .and_then(|id| ids.iter().position(|i| *i == id).map(|p| p + 1))
        .or(Some(0));

    field_block(
        label,
        dropdown(labels, index, move |idx| {
            on_select(idx.checked_sub(1).and_then(|i| ids.get(i).copied()))
        })
        .width(Length::Fill)
        .into(),
    )
}

fn view_fields(
    record: &Oportunidade,
    orgaos: &[Orgao],
    modalidades: &[Modalidade],
    status_list: &[StatusOportunidade],
    fases: &[FasePipeline],
) -> Vec<Element<'static, Message>> {
    let orgao = record
        .orgao_id
        .and_then(|id| reference::orgao_name(orgaos, id))
        .map(str::to_string);
    let modalidade = record
        .modalidade_id
        .and_then(|id| reference::modalidade_name(modalidades, id))
        .map(str::to_string);
    let status = record
        .status_id
        .and_then(|id| reference::status_name(status_list, id))
        .map(str::to_string);
    let fase = record
        .fase_pipeline_id
        .and_then(|id| reference::fase_name(fases, id))
        .map(str::to_string);

    vec![
        view_field(fl!("numero-processo"), record.numero_processo.clone()),
        view_field(fl!("orgao-label"), orgao),
        view_field(fl!("modalidade-label"), modalidade),
        view_field(fl!("status-label"), status),
        view_field(fl!("fase-label"), fase),
        view_field(
            fl!("data-abertura"),
            record.data_abertura.as_deref().and_then(dates::badge),
        ),
        view_field(
            fl!("prazo-final"),
            record.data_entrega.as_deref().and_then(dates::badge),
        ),
        view_field(
            fl!("valor-estimado"),
            record.valor_estimado.map(format_currency),
        ),
        view_field(fl!("observacoes"), record.observacoes.clone()),
    ]
}

fn edit_fields(
    draft: &OportunidadeDraft,
    orgaos: &[Orgao],
    modalidades: &[Modalidade],
    status_list: &[StatusOportunidade],
    fases: &[FasePipeline],
) -> Vec<Element<'static, Message>> {
    vec![
        edit_field(
            fl!("numero-processo"),
            String::new(),
            draft.numero_processo.clone(),
            DraftField::NumeroProcesso,
        ),
        choice_field(
            fl!("orgao-label"),
            fl!("orgao-placeholder"),
            orgaos.iter().map(Orgao::label).collect(),
            orgaos.iter().map(|o| o.id).collect(),
            draft.orgao_id,
            Message::SetDraftOrgao,
        ),
        choice_field(
            fl!("modalidade-label"),
            fl!("modalidade-placeholder"),
            modalidades.iter().map(|m| m.nome.clone()).collect(),
            modalidades.iter().map(|m| m.id).collect(),
            draft.modalidade_id,
            Message::SetDraftModalidade,
        ),
        choice_field(
            fl!("status-label"),
            fl!("status-placeholder"),
            status_list.iter().map(|s| s.nome.clone()).collect(),
            status_list.iter().map(|s| s.id).collect(),
            draft.status_id,
            Message::SetDraftStatus,
        ),
        choice_field(
            fl!("fase-label"),
            fl!("fase-placeholder"),
            fases.iter().map(|f| f.nome.clone()).collect(),
            fases.iter().map(|f| f.id).collect(),
            draft.fase_pipeline_id,
            Message::SetDraftFase,
        ),
        edit_field(
            fl!("data-abertura"),
            fl!("date-placeholder"),
            draft.data_abertura.clone(),
            DraftField::DataAbertura,
        ),
        edit_field(
            fl!("prazo-final"),
            fl!("date-placeholder"),
            draft.data_entrega.clone(),
            DraftField::DataEntrega,
        ),
        edit_field(
            fl!("valor-estimado"),
            "0.00".to_string(),
            draft.valor_estimado.clone(),
            DraftField::ValorEstimado,
        ),
        edit_field(
            fl!("observacoes"),
            String::new(),
            draft.observacoes.clone(),
            DraftField::Observacoes,
        ),
    ]
}

pub fn identification_view(
    record: &Oportunidade,
    draft: Option<&OportunidadeDraft>,
    orgaos: &[Orgao],
    modalidades: &[Modalidade],
    status_list: &[StatusOportunidade],
    fases: &[FasePipeline],
) -> Element<'static, Message> {
    let fields = match draft {
        Some(d) => edit_fields(d, orgaos, modalidades, status_list, fases),
        None => view_fields(record, orgaos, modalidades, status_list, fases),
    };

    let content = column()
        .spacing(12)
        .push(text::title4(fl!("basic-data-title")))
        .push(text::caption(fl!("basic-data-desc")))
        .push(flex_row(fields).row_spacing(12).column_spacing(24));

    container(content)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}
