use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parecer {
    pub id: i64,
    pub oportunidade_id: i64,
    pub titulo: String,
    pub conteudo: Option<String>,
    pub criado_em: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParecerForm {
    pub titulo: String,
    pub conteudo: String,
    pub error: Option<String>,
}

impl ParecerForm {
    pub fn validate(&mut self) -> bool {
        if self.titulo.trim().is_empty() {
            self.error = Some("Informe o título do parecer".to_string());
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
    fn titulo_is_required() {
        let mut form = ParecerForm::default();
        form.conteudo = "Análise favorável.".to_string();
        assert!(!form.validate());
        assert!(form.error.is_some());

        form.titulo = " Parecer jurídico ".to_string();
        assert!(form.validate());
        assert!(form.error.is_none());
    }
}
