use cosmic::widget::toaster::ToastId;

use crate::api::ApiFailure;
use crate::core::categorization::CategoriaVinculo;
use crate::core::document::Documento;
use crate::core::group::Grupo;
use crate::core::lot::{Item, Lote};
use crate::core::opinion::Parecer;
use crate::core::opportunity::Oportunidade;
use crate::core::reference::{Categoria, FasePipeline, Modalidade, Orgao, StatusOportunidade};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    NumeroProcesso,
    Objeto,
    ValorEstimado,
    Observacoes,
    DataAbertura,
    DataEntrega,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Descricao,
    Quantidade,
    Unidade,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Opportunity list / navigation
    OportunidadesFetched(Result<Vec<Oportunidade>, ApiFailure>),
    Refresh,

    // Detail record
    OportunidadeLoaded(i64, Result<Option<Oportunidade>, ApiFailure>),
    SelectTab(DetailTab),

    // Reference data
    OrgaosFetched(Result<Vec<Orgao>, ApiFailure>),
    ModalidadesFetched(Result<Vec<Modalidade>, ApiFailure>),
    StatusFetched(Result<Vec<StatusOportunidade>, ApiFailure>),
    FasesFetched(Result<Vec<FasePipeline>, ApiFailure>),
    CategoriasFetched(Result<Vec<Categoria>, ApiFailure>),

    // Detail form
    BeginEdit,
    CancelEdit,
    SetDraftField(DraftField, String),
    SetDraftOrgao(Option<i64>),
    SetDraftModalidade(Option<i64>),
    SetDraftStatus(Option<i64>),
    SetDraftFase(Option<i64>),
    SaveOportunidade,
    OportunidadeSaved(i64, Result<(), ApiFailure>),

    // Categorization
    VinculosFetched(i64, Result<Vec<CategoriaVinculo>, ApiFailure>),
    LinkCategoria(i64),
    UnlinkCategoria(i64),
    CategoriaLinked(i64, Result<(), ApiFailure>),
    CategoriaUnlinked(i64, Result<(), ApiFailure>),

    // Groups
    GruposFetched(i64, Result<Vec<Grupo>, ApiFailure>),
    OpenGroupCreate,
    OpenGroupEdit(Grupo),
    CloseGroupEditor,
    SetGroupNome(String),
    SetGroupDescricao(String),
    SubmitGroup,
    GrupoCreated(i64, Result<(), ApiFailure>),
    GrupoUpdated(i64, Result<(), ApiFailure>),
    ConfirmDeleteGrupo(i64),
    CancelDeleteGrupo,
    DeleteGrupo(i64),
    GrupoDeleted(i64, Result<(), ApiFailure>),

    // Lots and items
    LotesFetched(i64, Result<Vec<Lote>, ApiFailure>),
    ItensFetched(i64, Result<Vec<Item>, ApiFailure>),
    SetLoteNumero(String),
    SetLoteDescricao(String),
    SubmitLote,
    LoteCreated(i64, Result<(), ApiFailure>),
    ConfirmDeleteLote(i64),
    CancelDeleteLote,
    DeleteLote(i64),
    LoteDeleted(i64, Result<(), ApiFailure>),
    SetItemField(i64, ItemField, String),
    SubmitItem(i64),
    ItemCreated(i64, i64, Result<(), ApiFailure>),
    ConfirmDeleteItem(i64),
    CancelDeleteItem,
    DeleteItem(i64),
    ItemDeleted(i64, Result<(), ApiFailure>),

    // Opinions
    PareceresFetched(i64, Result<Vec<Parecer>, ApiFailure>),
    SetParecerTitulo(String),
    SetParecerConteudo(String),
    SubmitParecer,
    ParecerCreated(i64, Result<(), ApiFailure>),
    ConfirmDeleteParecer(i64),
    CancelDeleteParecer,
    DeleteParecer(i64),
    ParecerDeleted(i64, Result<(), ApiFailure>),

    // Documents
    DocumentosFetched(i64, Result<Vec<Documento>, ApiFailure>),
    SetDocumentoNome(String),
    SetDocumentoUrl(String),
    SetDocumentoObservacao(String),
    SubmitDocumento,
    DocumentoCreated(i64, Result<(), ApiFailure>),
    ConfirmDeleteDocumento(i64),
    CancelDeleteDocumento,
    DeleteDocumento(i64),
    DocumentoDeleted(i64, Result<(), ApiFailure>),
    OpenDocumentoUrl(i64),

    // Settings
    OpenSettings,
    CloseContextDrawer,
    SetApiUrl(String),
    ApplyApiUrl,
    SetBrowserCommand(String),
    ToggleDebugLogging,

    // Toasts
    CloseToast(ToastId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Identificacao,
    Objeto,
    Grupos,
    Lotes,
    Categorizacao,
    Pareceres,
    Documentos,
    Inteligencia,
    Timeline,
}

impl DetailTab {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Identificacao => "Identificação",
            Self::Objeto => "Objeto",
            Self::Grupos => "Grupos",
            Self::Lotes => "Lotes/Itens",
            Self::Categorizacao => "Categorização",
            Self::Pareceres => "Pareceres",
            Self::Documentos => "Documentos",
            Self::Inteligencia => "Inteligência",
            Self::Timeline => "Timeline",
        }
    }

    pub const ALL: &'static [DetailTab] = &[
        DetailTab::Identificacao,
        DetailTab::Objeto,
        DetailTab::Grupos,
        DetailTab::Lotes,
        DetailTab::Categorizacao,
        DetailTab::Pareceres,
        DetailTab::Documentos,
        DetailTab::Inteligencia,
        DetailTab::Timeline,
    ];
}
