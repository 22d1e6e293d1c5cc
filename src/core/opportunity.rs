use serde::{Deserialize, Serialize};

use super::dates;

/// An opportunity record as the backend returns it. Everything beyond
/// the id is optional, records created by importers can be sparse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Oportunidade {
    pub id: i64,
    pub numero_processo: Option<String>,
    pub objeto: Option<String>,
    pub valor_estimado: Option<f64>,
    pub observacoes: Option<String>,
    pub data_abertura: Option<String>,
    pub data_entrega: Option<String>,
    pub orgao_id: Option<i64>,
    pub modalidade_id: Option<i64>,
    pub status_id: Option<i64>,
    pub fase_pipeline_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Oportunidade {
    /// Header title, "Sem título" when the process number is missing.
    pub fn display_title(&self) -> String {
        match self.numero_processo.as_deref() {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => "Sem título".to_string(),
        }
    }
}

/// Editable buffer for the detail form. All fields are kept as strings
/// while editing and only interpreted when building the save body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OportunidadeDraft {
    pub numero_processo: String,
    pub objeto: String,
    pub valor_estimado: String,
    pub observacoes: String,
    pub data_abertura: String,
    pub data_entrega: String,
    pub orgao_id: Option<i64>,
    pub modalidade_id: Option<i64>,
    pub status_id: Option<i64>,
    pub fase_pipeline_id: Option<i64>,
}

impl OportunidadeDraft {
    pub fn from_record(record: &Oportunidade) -> Self {
        Self {
            numero_processo: record.numero_processo.clone().unwrap_or_default(),
            objeto: record.objeto.clone().unwrap_or_default(),
            valor_estimado: record
                .valor_estimado
                .map(|v| v.to_string())
                .unwrap_or_default(),
            observacoes: record.observacoes.clone().unwrap_or_default(),
            data_abertura: dates::for_input(record.data_abertura.as_deref().unwrap_or_default()),
            data_entrega: dates::for_input(record.data_entrega.as_deref().unwrap_or_default()),
            orgao_id: record.orgao_id,
            modalidade_id: record.modalidade_id,
            status_id: record.status_id,
            fase_pipeline_id: record.fase_pipeline_id,
        }
    }

    /// Build the partial save body. Blank text is omitted, never sent as
    /// empty strings or null; the value field is omitted unless it parses
    /// as a finite number; invalid dates are omitted.
    pub fn to_patch(&self) -> OportunidadePatch {
        OportunidadePatch {
            numero_processo: non_blank(&self.numero_processo),
            objeto: non_blank(&self.objeto),
            valor_estimado: self
                .valor_estimado
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            observacoes: non_blank(&self.observacoes),
            data_abertura: dates::for_patch(&self.data_abertura),
            data_entrega: dates::for_patch(&self.data_entrega),
            orgao_id: self.orgao_id,
            modalidade_id: self.modalidade_id,
            status_id: self.status_id,
            fase_pipeline_id: self.fase_pipeline_id,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// PUT body for a partial update. Absent fields are left untouched by
/// the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OportunidadePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_processo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objeto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_estimado: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_abertura: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_entrega: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orgao_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalidade_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fase_pipeline_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Oportunidade {
        Oportunidade {
            id: 42,
            numero_processo: Some("PE 90012/2024".to_string()),
            objeto: Some("Aquisição de notebooks".to_string()),
            valor_estimado: Some(250000.0),
            observacoes: None,
            data_abertura: Some("2024-08-01T09:00:00Z".to_string()),
            data_entrega: None,
            orgao_id: Some(3),
            modalidade_id: Some(1),
            status_id: Some(2),
            fase_pipeline_id: None,
            created_at: Some("2024-07-15T12:00:00Z".to_string()),
            updated_at: Some("2024-07-20T12:00:00Z".to_string()),
        }
    }

    #[test]
    fn display_title_falls_back() {
        let mut opp = record();
        assert_eq!(opp.display_title(), "PE 90012/2024");
        opp.numero_processo = Some("   ".to_string());
        assert_eq!(opp.display_title(), "Sem título");
        opp.numero_processo = None;
        assert_eq!(opp.display_title(), "Sem título");
    }

    #[test]
    fn draft_mirrors_record() {
        let draft = OportunidadeDraft::from_record(&record());
        assert_eq!(draft.numero_processo, "PE 90012/2024");
        assert_eq!(draft.valor_estimado, "250000");
        assert_eq!(draft.data_abertura, "2024-08-01");
        assert_eq!(draft.data_entrega, "");
        assert_eq!(draft.orgao_id, Some(3));
        assert_eq!(draft.fase_pipeline_id, None);
    }

    #[test]
    fn rebuilding_the_draft_discards_edits() {
        let rec = record();
        let mut draft = OportunidadeDraft::from_record(&rec);
        draft.numero_processo = "edição perdida".to_string();
        draft.valor_estimado = "1".to_string();
        draft.orgao_id = Some(99);

        let restored = OportunidadeDraft::from_record(&rec);
        assert_eq!(restored, OportunidadeDraft::from_record(&rec));
        assert_ne!(draft, restored);
        assert_eq!(restored.numero_processo, "PE 90012/2024");
        assert_eq!(restored.orgao_id, Some(3));
    }

    #[test]
    fn patch_omits_blank_text() {
        let mut draft = OportunidadeDraft::from_record(&record());
        draft.numero_processo = "   ".to_string();
        draft.objeto = String::new();
        let patch = draft.to_patch();
        assert_eq!(patch.numero_processo, None);
        assert_eq!(patch.objeto, None);

        let body = serde_json::to_value(&patch).unwrap();
        assert!(body.get("numero_processo").is_none());
        assert!(body.get("objeto").is_none());
        assert!(body.get("observacoes").is_none());
    }

    #[test]
    fn patch_parses_value_or_omits() {
        let mut draft = OportunidadeDraft::default();
        draft.valor_estimado = "1234.5".to_string();
        assert_eq!(draft.to_patch().valor_estimado, Some(1234.5));

        draft.valor_estimado = String::new();
        assert_eq!(draft.to_patch().valor_estimado, None);

        draft.valor_estimado = "muito caro".to_string();
        assert_eq!(draft.to_patch().valor_estimado, None);

        draft.valor_estimado = "NaN".to_string();
        assert_eq!(draft.to_patch().valor_estimado, None);
    }

    #[test]
    fn patch_validates_dates() {
        let mut draft = OportunidadeDraft::default();
        draft.data_abertura = "2025-02-10".to_string();
        draft.data_entrega = "10/02/2025".to_string();
        let patch = draft.to_patch();
        assert_eq!(patch.data_abertura, Some("2025-02-10".to_string()));
        assert_eq!(patch.data_entrega, None);
    }

    #[test]
    fn patch_keeps_selected_ids_as_numbers() {
        let draft = OportunidadeDraft {
            status_id: Some(2),
            ..Default::default()
        };
        let body = serde_json::to_value(draft.to_patch()).unwrap();
        assert_eq!(body["status_id"], serde_json::json!(2));
        assert!(body.get("orgao_id").is_none());
    }
}
