use std::collections::HashMap;

use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::toaster::{Toast, Toasts};
use cosmic::widget::{button, column, container, flex_row, icon, nav_bar, row, scrollable, text};
use cosmic::{Application, Element, executor};

use crate::api::cache::{Cached, LoadState, ScopedList};
use crate::api::{ApiClient, ApiFailure};
use crate::components::badge;
use crate::config::CertameConfig;
use crate::core::categorization::CategoriaVinculo;
use crate::core::dates;
use crate::core::document::{Documento, DocumentoForm};
use crate::core::group::{GroupForm, GroupTarget, Grupo};
use crate::core::lot::{Item, ItemForm, Lote, LoteForm};
use crate::core::opinion::{Parecer, ParecerForm};
use crate::core::opportunity::{Oportunidade, OportunidadeDraft};
use crate::core::reference::{self, Categoria, FasePipeline, Modalidade, Orgao, StatusOportunidade};
use crate::core::status::StatusAccent;
use crate::fl;
use crate::message::{DetailTab, DraftField, ItemField, Message};
use crate::pages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDrawerState {
    Settings,
    GroupEditor,
}

/// What the content area currently shows for the selected opportunity.
#[derive(Debug, Clone)]
pub enum RecordState {
    Idle,
    Loading,
    Ready(Oportunidade),
    Missing,
    Failed(String),
}

pub struct Flags {
    pub config: CertameConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
    pub launch_oportunidade: Option<i64>,
}

pub struct Certame {
    core: Core,
    nav_model: nav_bar::Model,
    config: CertameConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    api: ApiClient,

    // Opportunity list backing the nav bar
    oportunidades: Cached<Oportunidade>,
    current_id: Option<i64>,

    // Selected record
    record: RecordState,
    draft: Option<OportunidadeDraft>,
    saving: bool,
    active_tab: DetailTab,

    // Reference data, fetched once per session
    orgaos: Cached<Orgao>,
    modalidades: Cached<Modalidade>,
    status_list: Cached<StatusOportunidade>,
    fases: Cached<FasePipeline>,
    categorias: Cached<Categoria>,

    // Per-opportunity collections, loaded when their tab first opens
    vinculos: ScopedList<CategoriaVinculo>,
    grupos: ScopedList<Grupo>,
    lotes: ScopedList<Lote>,
    itens: ScopedList<Item>,
    pareceres: ScopedList<Parecer>,
    documentos: ScopedList<Documento>,

    // Inline forms
    group_form: Option<GroupForm>,
    lote_form: LoteForm,
    item_forms: HashMap<i64, ItemForm>,
    parecer_form: ParecerForm,
    documento_form: DocumentoForm,

    // Deletes waiting on their confirm click
    pending_delete_grupo: Option<i64>,
    pending_delete_lote: Option<i64>,
    pending_delete_item: Option<i64>,
    pending_delete_parecer: Option<i64>,
    pending_delete_documento: Option<i64>,

    context_drawer_state: Option<ContextDrawerState>,
    toasts: Toasts<Message>,
}

impl Application for Certame {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.certame.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let api = ApiClient::new(&flags.config.api_url);

        let record = if flags.launch_oportunidade.is_some() {
            RecordState::Loading
        } else {
            RecordState::Idle
        };

        let mut app = Self {
            core,
            nav_model: nav_bar::Model::default(),
            config: flags.config,
            cosmic_config: flags.cosmic_config,
            api,
            oportunidades: Cached::default(),
            current_id: flags.launch_oportunidade,
            record,
            draft: None,
            saving: false,
            active_tab: DetailTab::Identificacao,
            orgaos: Cached::default(),
            modalidades: Cached::default(),
            status_list: Cached::default(),
            fases: Cached::default(),
            categorias: Cached::default(),
            vinculos: ScopedList::default(),
            grupos: ScopedList::default(),
            lotes: ScopedList::default(),
            itens: ScopedList::default(),
            pareceres: ScopedList::default(),
            documentos: ScopedList::default(),
            group_form: None,
            lote_form: LoteForm::default(),
            item_forms: HashMap::new(),
            parecer_form: ParecerForm::default(),
            documento_form: DocumentoForm::default(),
            pending_delete_grupo: None,
            pending_delete_lote: None,
            pending_delete_item: None,
            pending_delete_parecer: None,
            pending_delete_documento: None,
            context_drawer_state: None,
            toasts: Toasts::new(Message::CloseToast),
        };

        let mut batch = app.startup_tasks();
        if let Some(id) = app.current_id {
            batch.push(app.load_record_task(id));
            batch.extend(app.tab_tasks(id, app.active_tab, false));
        }

        (app, CosmicTask::batch(batch))
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav_model)
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        self.nav_model.activate(id);
        if let Some(oportunidade_id) = self.nav_model.data::<i64>(id).copied() {
            return self.select_oportunidade(oportunidade_id);
        }
        CosmicTask::none()
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        vec![text::title4(fl!("app-title")).into()]
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        vec![
            row()
                .spacing(4)
                .push(
                    button::icon(icon::from_name("view-refresh-symbolic"))
                        .on_press(Message::Refresh),
                )
                .push(
                    button::icon(icon::from_name("emblem-system-symbolic"))
                        .on_press(Message::OpenSettings),
                )
                .into(),
        ]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        match self.context_drawer_state? {
            ContextDrawerState::Settings => Some(
                context_drawer::context_drawer(
                    container(scrollable(
                        pages::settings::settings_view(&self.config).padding(16),
                    ))
                    .width(Length::Fill),
                    Message::CloseContextDrawer,
                )
                .title(fl!("settings-title")),
            ),
            ContextDrawerState::GroupEditor => {
                let form = self.group_form.as_ref()?;
                let title = if matches!(form.target, GroupTarget::Creating) {
                    fl!("new-group")
                } else {
                    fl!("edit-group")
                };
                Some(
                    context_drawer::context_drawer(
                        container(scrollable(
                            pages::groups::group_editor_view(form).padding(16),
                        ))
                        .width(Length::Fill),
                        Message::CloseGroupEditor,
                    )
                    .title(title),
                )
            }
        }
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if let Some(state) = self.context_drawer_state {
            if state == ContextDrawerState::GroupEditor {
                self.group_form = None;
            }
            self.context_drawer_state = None;
            self.core.window.show_context = false;
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                key: cosmic::iced::keyboard::Key::Character(ref c),
                modifiers,
                ..
            }) if c.as_str() == "r" && modifiers.control() => Some(Message::Refresh),
            _ => None,
        })
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            // --- Opportunity list / navigation ---
            Message::OportunidadesFetched(result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load opportunity list: {}", failure.detail);
                }
                self.oportunidades.accept(result.map_err(|f| f.detail));
                self.rebuild_nav();
            }
            Message::Refresh => {
                let mut batch = Vec::new();
                self.oportunidades.begin();
                batch.push(self.load_list_task());
                if let Some(id) = self.current_id {
                    if !matches!(self.record, RecordState::Ready(_)) {
                        self.record = RecordState::Loading;
                    }
                    batch.push(self.load_record_task(id));
                    batch.extend(self.tab_tasks(id, self.active_tab, true));
                }
                return CosmicTask::batch(batch);
            }

            // --- Selected record ---
            Message::OportunidadeLoaded(id, result) => {
                if self.current_id != Some(id) {
                    return CosmicTask::none();
                }
                match result {
                    Ok(Some(record)) => {
                        // A refresh while editing rebuilds the draft from the
                        // server copy rather than keeping stale input.
                        if self.draft.is_some() {
                            self.draft = Some(OportunidadeDraft::from_record(&record));
                        }
                        self.record = RecordState::Ready(record);
                    }
                    Ok(None) => {
                        self.record = RecordState::Missing;
                        self.draft = None;
                    }
                    Err(failure) => {
                        log::error!("Failed to load opportunity {}: {}", id, failure.detail);
                        self.record = RecordState::Failed(failure.detail);
                    }
                }
            }
            Message::SelectTab(tab) => {
                self.active_tab = tab;
                if let Some(id) = self.current_id {
                    return CosmicTask::batch(self.tab_tasks(id, tab, false));
                }
            }

            // --- Reference data ---
            Message::OrgaosFetched(result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load orgaos: {}", failure.detail);
                }
                self.orgaos.accept(result.map_err(|f| f.detail));
            }
            Message::ModalidadesFetched(result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load modalidades: {}", failure.detail);
                }
                self.modalidades.accept(result.map_err(|f| f.detail));
            }
            Message::StatusFetched(result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load status list: {}", failure.detail);
                }
                self.status_list.accept(result.map_err(|f| f.detail));
            }
            Message::FasesFetched(result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load fases: {}", failure.detail);
                }
                self.fases.accept(
                    result
                        .map(|mut fases| {
                            reference::sort_fases(&mut fases);
                            fases
                        })
                        .map_err(|f| f.detail),
                );
            }
            Message::CategoriasFetched(result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load categorias: {}", failure.detail);
                }
                self.categorias.accept(result.map_err(|f| f.detail));
            }

            // --- Detail form ---
            Message::BeginEdit => {
                if let RecordState::Ready(ref record) = self.record {
                    self.draft = Some(OportunidadeDraft::from_record(record));
                }
            }
            Message::CancelEdit => {
                self.draft = None;
            }
            Message::SetDraftField(field, value) => {
                if let Some(ref mut draft) = self.draft {
                    match field {
                        DraftField::NumeroProcesso => draft.numero_processo = value,
                        DraftField::Objeto => draft.objeto = value,
                        DraftField::ValorEstimado => draft.valor_estimado = value,
                        DraftField::Observacoes => draft.observacoes = value,
                        DraftField::DataAbertura => draft.data_abertura = value,
                        DraftField::DataEntrega => draft.data_entrega = value,
                    }
                }
            }
            Message::SetDraftOrgao(id) => {
                if let Some(ref mut draft) = self.draft {
                    draft.orgao_id = id;
                }
            }
            Message::SetDraftModalidade(id) => {
                if let Some(ref mut draft) = self.draft {
                    draft.modalidade_id = id;
                }
            }
            Message::SetDraftStatus(id) => {
                if let Some(ref mut draft) = self.draft {
                    draft.status_id = id;
                }
            }
            Message::SetDraftFase(id) => {
                if let Some(ref mut draft) = self.draft {
                    draft.fase_pipeline_id = id;
                }
            }
            Message::SaveOportunidade => {
                if self.saving {
                    return CosmicTask::none();
                }
                if let (Some(id), Some(draft)) = (self.current_id, self.draft.as_ref()) {
                    self.saving = true;
                    let patch = draft.to_patch();
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.update_oportunidade(id, &patch)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::OportunidadeSaved(id, result)),
                    );
                }
            }
            Message::OportunidadeSaved(id, result) => {
                self.saving = false;
                match result {
                    Ok(()) => {
                        let toast = self.toast(fl!("toast-oportunidade-saved"));
                        if self.current_id == Some(id) {
                            self.draft = None;
                            self.oportunidades.begin();
                            return CosmicTask::batch(vec![
                                toast,
                                self.load_record_task(id),
                                self.load_list_task(),
                            ]);
                        }
                        return toast;
                    }
                    Err(failure) => {
                        log::error!("Failed to save opportunity {}: {}", id, failure.detail);
                        return self.toast(failure.toast_or(fl!("toast-oportunidade-save-error")));
                    }
                }
            }

            // --- Categorization ---
            Message::VinculosFetched(id, result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load category links: {}", failure.detail);
                }
                if !self.vinculos.accept(id, result.map_err(|f| f.detail)) {
                    log::debug!("Dropped stale category links for opportunity {}", id);
                }
            }
            Message::LinkCategoria(categoria_id) => {
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.create_vinculo(id, categoria_id)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::CategoriaLinked(id, result)),
                    );
                }
            }
            Message::UnlinkCategoria(vinculo_id) => {
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.delete_vinculo(vinculo_id)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::CategoriaUnlinked(id, result)),
                    );
                }
            }
            Message::CategoriaLinked(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-categoria-linked"));
                    if self.current_id == Some(id) {
                        self.vinculos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_vinculos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to link categoria: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-categoria-link-error")));
                }
            },
            Message::CategoriaUnlinked(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-categoria-unlinked"));
                    if self.current_id == Some(id) {
                        self.vinculos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_vinculos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to unlink categoria: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-categoria-unlink-error")));
                }
            },

            // --- Groups ---
            Message::GruposFetched(id, result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load grupos: {}", failure.detail);
                }
                if !self.grupos.accept(id, result.map_err(|f| f.detail)) {
                    log::debug!("Dropped stale grupos for opportunity {}", id);
                }
            }
            Message::OpenGroupCreate => {
                self.group_form = Some(GroupForm::creating());
                self.context_drawer_state = Some(ContextDrawerState::GroupEditor);
                self.core.window.show_context = true;
            }
            Message::OpenGroupEdit(grupo) => {
                self.group_form = Some(GroupForm::editing(grupo));
                self.context_drawer_state = Some(ContextDrawerState::GroupEditor);
                self.core.window.show_context = true;
            }
            Message::CloseGroupEditor => {
                self.close_group_editor();
            }
            Message::SetGroupNome(value) => {
                if let Some(ref mut form) = self.group_form {
                    form.nome = value;
                    form.error = None;
                }
            }
            Message::SetGroupDescricao(value) => {
                if let Some(ref mut form) = self.group_form {
                    form.descricao = value;
                }
            }
            Message::SubmitGroup => {
                if let (Some(id), Some(form)) = (self.current_id, self.group_form.as_mut()) {
                    if !form.validate() {
                        return CosmicTask::none();
                    }
                    let nome = form.trimmed_nome();
                    let descricao = form.descricao.trim().to_string();
                    let api = self.api.clone();
                    match form.target {
                        GroupTarget::Creating => {
                            return CosmicTask::perform(
                                async move {
                                    api.create_grupo(id, &nome, &descricao)
                                        .await
                                        .map_err(ApiFailure::from)
                                },
                                move |result| {
                                    cosmic::Action::App(Message::GrupoCreated(id, result))
                                },
                            );
                        }
                        GroupTarget::Editing(ref grupo) => {
                            let grupo_id = grupo.id;
                            return CosmicTask::perform(
                                async move {
                                    api.update_grupo(grupo_id, id, &nome, &descricao)
                                        .await
                                        .map_err(ApiFailure::from)
                                },
                                move |result| {
                                    cosmic::Action::App(Message::GrupoUpdated(id, result))
                                },
                            );
                        }
                    }
                }
            }
            Message::GrupoCreated(id, result) => match result {
                Ok(()) => {
                    self.close_group_editor();
                    let toast = self.toast(fl!("toast-grupo-created"));
                    if self.current_id == Some(id) {
                        self.grupos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_grupos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to create grupo: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-grupo-create-error")));
                }
            },
            Message::GrupoUpdated(id, result) => match result {
                Ok(()) => {
                    self.close_group_editor();
                    let toast = self.toast(fl!("toast-grupo-updated"));
                    if self.current_id == Some(id) {
                        self.grupos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_grupos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to update grupo: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-grupo-update-error")));
                }
            },
            Message::ConfirmDeleteGrupo(grupo_id) => {
                self.pending_delete_grupo = Some(grupo_id);
            }
            Message::CancelDeleteGrupo => {
                self.pending_delete_grupo = None;
            }
            Message::DeleteGrupo(grupo_id) => {
                self.pending_delete_grupo = None;
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move { api.delete_grupo(grupo_id).await.map_err(ApiFailure::from) },
                        move |result| cosmic::Action::App(Message::GrupoDeleted(id, result)),
                    );
                }
            }
            Message::GrupoDeleted(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-grupo-deleted"));
                    if self.current_id == Some(id) {
                        self.grupos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_grupos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to delete grupo: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-grupo-delete-error")));
                }
            },

            // --- Lots and items ---
            Message::LotesFetched(id, result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load lotes: {}", failure.detail);
                }
                if !self.lotes.accept(id, result.map_err(|f| f.detail)) {
                    log::debug!("Dropped stale lotes for opportunity {}", id);
                }
            }
            Message::ItensFetched(id, result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load itens: {}", failure.detail);
                }
                if !self.itens.accept(id, result.map_err(|f| f.detail)) {
                    log::debug!("Dropped stale itens for opportunity {}", id);
                }
            }
            Message::SetLoteNumero(value) => {
                self.lote_form.numero = value;
                self.lote_form.error = None;
            }
            Message::SetLoteDescricao(value) => {
                self.lote_form.descricao = value;
            }
            Message::SubmitLote => {
                if let Some(id) = self.current_id {
                    if !self.lote_form.validate() {
                        return CosmicTask::none();
                    }
                    let numero = self.lote_form.numero.trim().to_string();
                    let descricao = self.lote_form.descricao.trim().to_string();
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.create_lote(id, &numero, &descricao)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::LoteCreated(id, result)),
                    );
                }
            }
            Message::LoteCreated(id, result) => match result {
                Ok(()) => {
                    self.lote_form = LoteForm::default();
                    let toast = self.toast(fl!("toast-lote-created"));
                    if self.current_id == Some(id) {
                        self.lotes.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_lotes_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to create lote: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-lote-create-error")));
                }
            },
            Message::ConfirmDeleteLote(lote_id) => {
                self.pending_delete_lote = Some(lote_id);
            }
            Message::CancelDeleteLote => {
                self.pending_delete_lote = None;
            }
            Message::DeleteLote(lote_id) => {
                self.pending_delete_lote = None;
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move { api.delete_lote(lote_id).await.map_err(ApiFailure::from) },
                        move |result| cosmic::Action::App(Message::LoteDeleted(id, result)),
                    );
                }
            }
            Message::LoteDeleted(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-lote-deleted"));
                    if self.current_id == Some(id) {
                        // Items of the removed lot go away with it.
                        self.lotes.begin(id);
                        self.itens.begin(id);
                        return CosmicTask::batch(vec![
                            toast,
                            self.load_lotes_task(id),
                            self.load_itens_task(id),
                        ]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to delete lote: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-lote-delete-error")));
                }
            },
            Message::SetItemField(lote_id, field, value) => {
                let form = self.item_forms.entry(lote_id).or_default();
                match field {
                    ItemField::Descricao => form.descricao = value,
                    ItemField::Quantidade => form.quantidade = value,
                    ItemField::Unidade => form.unidade = value,
                }
            }
            Message::SubmitItem(lote_id) => {
                if let Some(id) = self.current_id {
                    if let Some(form) = self.item_forms.get(&lote_id) {
                        if !form.is_submittable() {
                            return CosmicTask::none();
                        }
                        let descricao = form.descricao.trim().to_string();
                        let quantidade = form.parsed_quantidade();
                        let unidade = Some(form.unidade.trim().to_string())
                            .filter(|u| !u.is_empty());
                        let api = self.api.clone();
                        return CosmicTask::perform(
                            async move {
                                api.create_item(
                                    id,
                                    lote_id,
                                    &descricao,
                                    quantidade,
                                    unidade.as_deref(),
                                )
                                .await
                                .map_err(ApiFailure::from)
                            },
                            move |result| {
                                cosmic::Action::App(Message::ItemCreated(id, lote_id, result))
                            },
                        );
                    }
                }
            }
            Message::ItemCreated(id, lote_id, result) => match result {
                Ok(()) => {
                    self.item_forms.remove(&lote_id);
                    let toast = self.toast(fl!("toast-item-created"));
                    if self.current_id == Some(id) {
                        self.itens.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_itens_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to create item: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-item-create-error")));
                }
            },
            Message::ConfirmDeleteItem(item_id) => {
                self.pending_delete_item = Some(item_id);
            }
            Message::CancelDeleteItem => {
                self.pending_delete_item = None;
            }
            Message::DeleteItem(item_id) => {
                self.pending_delete_item = None;
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move { api.delete_item(item_id).await.map_err(ApiFailure::from) },
                        move |result| cosmic::Action::App(Message::ItemDeleted(id, result)),
                    );
                }
            }
            Message::ItemDeleted(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-item-deleted"));
                    if self.current_id == Some(id) {
                        self.itens.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_itens_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to delete item: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-item-delete-error")));
                }
            },

            // --- Opinions ---
            Message::PareceresFetched(id, result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load pareceres: {}", failure.detail);
                }
                if !self.pareceres.accept(id, result.map_err(|f| f.detail)) {
                    log::debug!("Dropped stale pareceres for opportunity {}", id);
                }
            }
            Message::SetParecerTitulo(value) => {
                self.parecer_form.titulo = value;
                self.parecer_form.error = None;
            }
            Message::SetParecerConteudo(value) => {
                self.parecer_form.conteudo = value;
            }
            Message::SubmitParecer => {
                if let Some(id) = self.current_id {
                    if !self.parecer_form.validate() {
                        return CosmicTask::none();
                    }
                    let titulo = self.parecer_form.titulo.trim().to_string();
                    let conteudo = self.parecer_form.conteudo.trim().to_string();
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.create_parecer(id, &titulo, &conteudo)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::ParecerCreated(id, result)),
                    );
                }
            }
            Message::ParecerCreated(id, result) => match result {
                Ok(()) => {
                    self.parecer_form = ParecerForm::default();
                    let toast = self.toast(fl!("toast-parecer-created"));
                    if self.current_id == Some(id) {
                        self.pareceres.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_pareceres_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to create parecer: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-parecer-create-error")));
                }
            },
            Message::ConfirmDeleteParecer(parecer_id) => {
                self.pending_delete_parecer = Some(parecer_id);
            }
            Message::CancelDeleteParecer => {
                self.pending_delete_parecer = None;
            }
            Message::DeleteParecer(parecer_id) => {
                self.pending_delete_parecer = None;
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.delete_parecer(parecer_id)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::ParecerDeleted(id, result)),
                    );
                }
            }
            Message::ParecerDeleted(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-parecer-deleted"));
                    if self.current_id == Some(id) {
                        self.pareceres.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_pareceres_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to delete parecer: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-parecer-delete-error")));
                }
            },

            // --- Documents ---
            Message::DocumentosFetched(id, result) => {
                if let Err(ref failure) = result {
                    log::error!("Failed to load documentos: {}", failure.detail);
                }
                if !self.documentos.accept(id, result.map_err(|f| f.detail)) {
                    log::debug!("Dropped stale documentos for opportunity {}", id);
                }
            }
            Message::SetDocumentoNome(value) => {
                self.documento_form.nome = value;
                self.documento_form.error = None;
            }
            Message::SetDocumentoUrl(value) => {
                self.documento_form.url = value;
            }
            Message::SetDocumentoObservacao(value) => {
                self.documento_form.observacao = value;
            }
            Message::SubmitDocumento => {
                if let Some(id) = self.current_id {
                    if !self.documento_form.validate() {
                        return CosmicTask::none();
                    }
                    let nome = self.documento_form.nome.trim().to_string();
                    let url = Some(self.documento_form.url.trim().to_string())
                        .filter(|u| !u.is_empty());
                    let observacao = Some(self.documento_form.observacao.trim().to_string())
                        .filter(|o| !o.is_empty());
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.create_documento(id, &nome, url.as_deref(), observacao.as_deref())
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::DocumentoCreated(id, result)),
                    );
                }
            }
            Message::DocumentoCreated(id, result) => match result {
                Ok(()) => {
                    self.documento_form = DocumentoForm::default();
                    let toast = self.toast(fl!("toast-documento-created"));
                    if self.current_id == Some(id) {
                        self.documentos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_documentos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to create documento: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-documento-create-error")));
                }
            },
            Message::ConfirmDeleteDocumento(documento_id) => {
                self.pending_delete_documento = Some(documento_id);
            }
            Message::CancelDeleteDocumento => {
                self.pending_delete_documento = None;
            }
            Message::DeleteDocumento(documento_id) => {
                self.pending_delete_documento = None;
                if let Some(id) = self.current_id {
                    let api = self.api.clone();
                    return CosmicTask::perform(
                        async move {
                            api.delete_documento(documento_id)
                                .await
                                .map_err(ApiFailure::from)
                        },
                        move |result| cosmic::Action::App(Message::DocumentoDeleted(id, result)),
                    );
                }
            }
            Message::DocumentoDeleted(id, result) => match result {
                Ok(()) => {
                    let toast = self.toast(fl!("toast-documento-deleted"));
                    if self.current_id == Some(id) {
                        self.documentos.begin(id);
                        return CosmicTask::batch(vec![toast, self.load_documentos_task(id)]);
                    }
                    return toast;
                }
                Err(failure) => {
                    log::error!("Failed to delete documento: {}", failure.detail);
                    return self.toast(failure.toast_or(fl!("toast-documento-delete-error")));
                }
            },
            Message::OpenDocumentoUrl(documento_id) => {
                let url = self
                    .documentos
                    .items()
                    .iter()
                    .find(|d| d.id == documento_id)
                    .and_then(|d| d.url.clone())
                    .filter(|u| !u.trim().is_empty());
                match url {
                    Some(url) => {
                        if let Err(e) = std::process::Command::new(&self.config.browser_command)
                            .arg(&url)
                            .spawn()
                        {
                            log::error!("Failed to open URL: {}", e);
                        }
                    }
                    None => return self.toast(fl!("toast-documento-no-url")),
                }
            }

            // --- Settings ---
            Message::OpenSettings => {
                self.context_drawer_state = Some(ContextDrawerState::Settings);
                self.core.window.show_context = true;
            }
            Message::CloseContextDrawer => {
                if self.context_drawer_state == Some(ContextDrawerState::GroupEditor) {
                    self.group_form = None;
                }
                self.context_drawer_state = None;
                self.core.window.show_context = false;
            }
            Message::SetApiUrl(value) => {
                self.config.api_url = value;
                self.save_config();
            }
            Message::ApplyApiUrl => {
                self.api = ApiClient::new(&self.config.api_url);
                self.orgaos.clear();
                self.modalidades.clear();
                self.status_list.clear();
                self.fases.clear();
                self.categorias.clear();
                self.vinculos.clear();
                self.grupos.clear();
                self.lotes.clear();
                self.itens.clear();
                self.pareceres.clear();
                self.documentos.clear();
                self.nav_model = nav_bar::Model::default();
                if self.current_id.is_some() {
                    self.record = RecordState::Loading;
                }
                let mut batch = self.startup_tasks();
                if let Some(id) = self.current_id {
                    batch.push(self.load_record_task(id));
                    batch.extend(self.tab_tasks(id, self.active_tab, true));
                }
                return CosmicTask::batch(batch);
            }
            Message::SetBrowserCommand(value) => {
                self.config.browser_command = value;
                self.save_config();
            }
            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                certame::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }

            // --- Toasts ---
            Message::CloseToast(id) => {
                self.toasts.remove(id);
            }
        }

        CosmicTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.record {
            RecordState::Idle => self.idle_view(),
            RecordState::Loading => self.loading_view(),
            RecordState::Missing => self.missing_view(),
            RecordState::Failed(ref detail) => self.failed_view(detail),
            RecordState::Ready(ref record) => self.detail_view(record),
        };
        cosmic::widget::toaster(&self.toasts, content)
    }
}

impl Certame {
    /// Kick off the opportunity list and every reference table.
    fn startup_tasks(&mut self) -> Vec<CosmicTask<Message>> {
        self.oportunidades.begin();
        self.orgaos.begin();
        self.modalidades.begin();
        self.status_list.begin();
        self.fases.begin();
        self.categorias.begin();

        let orgaos_api = self.api.clone();
        let modalidades_api = self.api.clone();
        let status_api = self.api.clone();
        let fases_api = self.api.clone();
        let categorias_api = self.api.clone();

        vec![
            self.load_list_task(),
            CosmicTask::perform(
                async move { orgaos_api.list_orgaos().await.map_err(ApiFailure::from) },
                |result| cosmic::Action::App(Message::OrgaosFetched(result)),
            ),
            CosmicTask::perform(
                async move {
                    modalidades_api
                        .list_modalidades()
                        .await
                        .map_err(ApiFailure::from)
                },
                |result| cosmic::Action::App(Message::ModalidadesFetched(result)),
            ),
            CosmicTask::perform(
                async move { status_api.list_status().await.map_err(ApiFailure::from) },
                |result| cosmic::Action::App(Message::StatusFetched(result)),
            ),
            CosmicTask::perform(
                async move { fases_api.list_fases().await.map_err(ApiFailure::from) },
                |result| cosmic::Action::App(Message::FasesFetched(result)),
            ),
            CosmicTask::perform(
                async move {
                    categorias_api
                        .list_categorias()
                        .await
                        .map_err(ApiFailure::from)
                },
                |result| cosmic::Action::App(Message::CategoriasFetched(result)),
            ),
        ]
    }

    fn load_list_task(&self) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_oportunidades().await.map_err(ApiFailure::from) },
            |result| cosmic::Action::App(Message::OportunidadesFetched(result)),
        )
    }

    fn load_record_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.fetch_oportunidade(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::OportunidadeLoaded(id, result)),
        )
    }

    fn load_vinculos_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_vinculos(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::VinculosFetched(id, result)),
        )
    }

    fn load_grupos_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_grupos(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::GruposFetched(id, result)),
        )
    }

    fn load_lotes_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_lotes(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::LotesFetched(id, result)),
        )
    }

    fn load_itens_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_itens(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::ItensFetched(id, result)),
        )
    }

    fn load_pareceres_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_pareceres(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::PareceresFetched(id, result)),
        )
    }

    fn load_documentos_task(&self, id: i64) -> CosmicTask<Message> {
        let api = self.api.clone();
        CosmicTask::perform(
            async move { api.list_documentos(id).await.map_err(ApiFailure::from) },
            move |result| cosmic::Action::App(Message::DocumentosFetched(id, result)),
        )
    }

    /// Loads whatever the given tab needs, skipping collections already
    /// cached for this opportunity unless forced.
    fn tab_tasks(&mut self, id: i64, tab: DetailTab, force: bool) -> Vec<CosmicTask<Message>> {
        let mut tasks = Vec::new();
        match tab {
            DetailTab::Grupos => {
                if force || self.grupos.needs_load(id) {
                    self.grupos.begin(id);
                    tasks.push(self.load_grupos_task(id));
                }
            }
            DetailTab::Categorizacao => {
                if force || self.vinculos.needs_load(id) {
                    self.vinculos.begin(id);
                    tasks.push(self.load_vinculos_task(id));
                }
            }
            DetailTab::Lotes => {
                if force || self.lotes.needs_load(id) {
                    self.lotes.begin(id);
                    tasks.push(self.load_lotes_task(id));
                }
                if force || self.itens.needs_load(id) {
                    self.itens.begin(id);
                    tasks.push(self.load_itens_task(id));
                }
            }
            DetailTab::Pareceres => {
                if force || self.pareceres.needs_load(id) {
                    self.pareceres.begin(id);
                    tasks.push(self.load_pareceres_task(id));
                }
            }
            DetailTab::Documentos => {
                if force || self.documentos.needs_load(id) {
                    self.documentos.begin(id);
                    tasks.push(self.load_documentos_task(id));
                }
            }
            DetailTab::Identificacao
            | DetailTab::Objeto
            | DetailTab::Inteligencia
            | DetailTab::Timeline => {}
        }
        tasks
    }

    fn select_oportunidade(&mut self, id: i64) -> CosmicTask<Message> {
        if self.current_id == Some(id) {
            return CosmicTask::none();
        }
        self.current_id = Some(id);
        self.record = RecordState::Loading;
        self.draft = None;
        self.saving = false;
        self.lote_form = LoteForm::default();
        self.item_forms.clear();
        self.parecer_form = ParecerForm::default();
        self.documento_form = DocumentoForm::default();
        self.pending_delete_grupo = None;
        self.pending_delete_lote = None;
        self.pending_delete_item = None;
        self.pending_delete_parecer = None;
        self.pending_delete_documento = None;
        self.close_group_editor();
        self.vinculos.clear();
        self.grupos.clear();
        self.lotes.clear();
        self.itens.clear();
        self.pareceres.clear();
        self.documentos.clear();

        let mut batch = vec![self.load_record_task(id)];
        batch.extend(self.tab_tasks(id, self.active_tab, false));
        CosmicTask::batch(batch)
    }

    fn rebuild_nav(&mut self) {
        let previous = self.current_id;
        self.nav_model = nav_bar::Model::default();
        for oportunidade in self.oportunidades.items() {
            self.nav_model
                .insert()
                .text(oportunidade.display_title())
                .icon(icon::from_name("text-x-generic-symbolic").icon())
                .data::<i64>(oportunidade.id);
        }
        if let Some(current) = previous {
            let entity = self
                .nav_model
                .iter()
                .find(|&id| self.nav_model.data::<i64>(id) == Some(&current));
            if let Some(entity) = entity {
                self.nav_model.activate(entity);
            }
        }
    }

    fn close_group_editor(&mut self) {
        self.group_form = None;
        if self.context_drawer_state == Some(ContextDrawerState::GroupEditor) {
            self.context_drawer_state = None;
            self.core.window.show_context = false;
        }
    }

    fn toast(&mut self, message: impl Into<String>) -> CosmicTask<Message> {
        self.toasts
            .push(Toast::new(message.into()))
            .map(cosmic::Action::App)
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }

    fn idle_view(&self) -> Element<'_, Message> {
        let hint = match self.oportunidades.state() {
            LoadState::Loading => fl!("nav-loading"),
            _ if self.oportunidades.items().is_empty() => fl!("nav-empty"),
            _ => fl!("empty-body"),
        };
        container(
            column()
                .spacing(8)
                .push(text::title4(fl!("empty-title")))
                .push(text::body(hint)),
        )
        .padding(32)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn loading_view(&self) -> Element<'_, Message> {
        container(text::body(fl!("loading")))
            .padding(32)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn missing_view(&self) -> Element<'_, Message> {
        container(
            column()
                .spacing(8)
                .push(text::title4(fl!("not-found-title")))
                .push(text::body(fl!("not-found-body"))),
        )
        .padding(32)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn failed_view(&self, detail: &str) -> Element<'_, Message> {
        container(
            column()
                .spacing(8)
                .push(text::title4(fl!("load-error-title")))
                .push(text::caption(detail.to_string()))
                .push(button::standard(fl!("retry")).on_press(Message::Refresh)),
        )
        .padding(32)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn detail_view(&self, record: &Oportunidade) -> Element<'_, Message> {
        let mut content = column().spacing(16);
        content = content.push(self.header_block(record));
        content = content.push(self.tab_row());
        content = content.push(self.tab_content(record));

        container(scrollable(content.padding(16).width(Length::Fill)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn header_block(&self, record: &Oportunidade) -> Element<'_, Message> {
        let orgao = record
            .orgao_id
            .and_then(|id| reference::orgao_name(self.orgaos.items(), id))
            .map(str::to_string)
            .unwrap_or_else(|| "—".to_string());
        let status = record
            .status_id
            .and_then(|id| reference::status_name(self.status_list.items(), id))
            .map(str::to_string)
            .unwrap_or_else(|| "—".to_string());
        let fase = record
            .fase_pipeline_id
            .and_then(|id| reference::fase_name(self.fases.items(), id))
            .map(str::to_string)
            .unwrap_or_else(|| "—".to_string());

        let accent = StatusAccent::from_status_name(&status);

        let mut badges = row().spacing(8).align_y(Alignment::Center);
        badges = badges.push(badge::accent_badge(status, accent));
        badges = badges.push(badge::neutral_badge(fase));
        if let Some(data) = record.created_at.as_deref().and_then(dates::badge) {
            badges = badges.push(text::caption(fl!("created-at", date = data)));
        }

        let mut info = column().spacing(4).width(Length::Fill);
        info = info.push(text::title4(record.display_title()));
        info = info.push(text::caption(orgao));
        info = info.push(badges);

        let mut actions = row().spacing(8).align_y(Alignment::Center);
        if self.draft.is_some() {
            actions = actions.push(button::standard(fl!("cancel")).on_press(Message::CancelEdit));
            let label = if self.saving {
                fl!("saving")
            } else {
                fl!("save")
            };
            let mut save = button::suggested(label);
            if !self.saving {
                save = save.on_press(Message::SaveOportunidade);
            }
            actions = actions.push(save);
        } else {
            actions = actions.push(button::standard(fl!("edit")).on_press(Message::BeginEdit));
        }

        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(info)
            .push(actions)
            .into()
    }

    fn tab_row(&self) -> Element<'_, Message> {
        let mut tabs: Vec<Element<'_, Message>> = Vec::new();
        for tab in DetailTab::ALL {
            let label = tab.title();
            let btn: Element<'_, Message> = if *tab == self.active_tab {
                button::suggested(label)
                    .on_press(Message::SelectTab(*tab))
                    .into()
            } else {
                button::standard(label)
                    .on_press(Message::SelectTab(*tab))
                    .into()
            };
            tabs.push(btn);
        }
        flex_row(tabs).row_spacing(4).column_spacing(4).into()
    }

    fn tab_content(&self, record: &Oportunidade) -> Element<'_, Message> {
        match self.active_tab {
            DetailTab::Identificacao => pages::identification::identification_view(
                record,
                self.draft.as_ref(),
                self.orgaos.items(),
                self.modalidades.items(),
                self.status_list.items(),
                self.fases.items(),
            ),
            DetailTab::Objeto => pages::object::object_view(record, self.draft.as_ref()),
            DetailTab::Grupos => {
                pages::groups::groups_view(&self.grupos, self.pending_delete_grupo)
            }
            DetailTab::Lotes => pages::lots::lots_view(
                &self.lotes,
                &self.itens,
                &self.lote_form,
                &self.item_forms,
                self.pending_delete_lote,
                self.pending_delete_item,
            ),
            DetailTab::Categorizacao => {
                pages::categorization::categorization_view(self.categorias.items(), &self.vinculos)
            }
            DetailTab::Pareceres => pages::opinions::opinions_view(
                &self.pareceres,
                &self.parecer_form,
                self.pending_delete_parecer,
            ),
            DetailTab::Documentos => pages::documents::documents_view(
                &self.documentos,
                &self.documento_form,
                self.pending_delete_documento,
            ),
            DetailTab::Inteligencia => pages::intelligence::intelligence_view(),
            DetailTab::Timeline => pages::timeline::timeline_view(record),
        }
    }
}
