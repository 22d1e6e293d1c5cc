use serde::Deserialize;

/// Document metadata attached to an opportunity. The file itself lives
/// wherever `url` points, this client never transfers binaries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Documento {
    pub id: i64,
    pub oportunidade_id: i64,
    pub nome: String,
    pub url: Option<String>,
    pub observacao: Option<String>,
}

impl Documento {
    pub fn has_url(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentoForm {
    pub nome: String,
    pub url: String,
    pub observacao: String,
    pub error: Option<String>,
}

impl DocumentoForm {
    pub fn validate(&mut self) -> bool {
        if self.nome.trim().is_empty() {
            self.error = Some("Informe o nome do documento".to_string());
            false
        } else {
            self.error = None;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nome_is_required() {
        let mut form = DocumentoForm::default();
        form.url = "https://example.gov.br/edital.pdf".to_string();
        assert!(!form.validate());

        form.nome = "Edital".to_string();
        assert!(form.validate());
    }

    #[test]
    fn has_url_ignores_blank() {
        let mut doc = Documento {
            id: 1,
            oportunidade_id: 42,
            nome: "Edital".to_string(),
            url: Some("   ".to_string()),
            observacao: None,
        };
        assert!(!doc.has_url());
        doc.url = Some("https://example.gov.br/edital.pdf".to_string());
        assert!(doc.has_url());
        doc.url = None;
        assert!(!doc.has_url());
    }
}
