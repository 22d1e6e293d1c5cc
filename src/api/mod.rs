pub mod cache;

use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::categorization::CategoriaVinculo;
use crate::core::document::Documento;
use crate::core::group::Grupo;
use crate::core::lot::{Item, Lote};
use crate::core::opinion::Parecer;
use crate::core::opportunity::{Oportunidade, OportunidadePatch};
use crate::core::reference::{Categoria, FasePipeline, Modalidade, Orgao, StatusOportunidade};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: StatusCode,
        /// Human-readable message the backend put in the error body, if any.
        message: Option<String>,
        body: String,
    },
}

/// Clone-able failure carried through the update loop. The toast shows
/// the server message when one exists, the full detail goes to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub server_message: Option<String>,
    pub detail: String,
}

impl ApiFailure {
    pub fn toast_or(&self, fallback: impl Into<String>) -> String {
        match self.server_message.as_deref() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => fallback.into(),
        }
    }
}

impl From<ApiError> for ApiFailure {
    fn from(err: ApiError) -> Self {
        let server_message = match &err {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Http(_) => None,
        };
        Self {
            server_message,
            detail: err.to_string(),
        }
    }
}

/// Pull the "message" field out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status,
            message: server_message(&body),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.http.get(self.url(path)).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let resp = self.http.put(self.url(path)).json(body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.http.delete(self.url(path)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    // --- Opportunities ---

    pub async fn list_oportunidades(&self) -> Result<Vec<Oportunidade>, ApiError> {
        self.get_json("oportunidades").await
    }

    /// None on 404 so the caller can render the not-found view.
    pub async fn fetch_oportunidade(&self, id: i64) -> Result<Option<Oportunidade>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("oportunidades/{}", id)))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::check(resp).await?;
        Ok(Some(resp.json().await?))
    }

    pub async fn update_oportunidade(
        &self,
        id: i64,
        patch: &OportunidadePatch,
    ) -> Result<(), ApiError> {
        self.put_json(&format!("oportunidades/{}", id), patch).await
    }

    // --- Reference lists ---

    pub async fn list_orgaos(&self) -> Result<Vec<Orgao>, ApiError> {
        self.get_json("orgaos_publicos").await
    }

    pub async fn list_modalidades(&self) -> Result<Vec<Modalidade>, ApiError> {
        self.get_json("modalidades").await
    }

    pub async fn list_status(&self) -> Result<Vec<StatusOportunidade>, ApiError> {
        self.get_json("status_oportunidade").await
    }

    pub async fn list_fases(&self) -> Result<Vec<FasePipeline>, ApiError> {
        self.get_json("fases_pipeline").await
    }

    pub async fn list_categorias(&self) -> Result<Vec<Categoria>, ApiError> {
        self.get_json("categorias").await
    }

    // --- Categorization links ---

    pub async fn list_vinculos(
        &self,
        oportunidade_id: i64,
    ) -> Result<Vec<CategoriaVinculo>, ApiError> {
        self.get_json(&format!(
            "oportunidade_categoria?oportunidade_id={}",
            oportunidade_id
        ))
        .await
    }

    pub async fn create_vinculo(
        &self,
        oportunidade_id: i64,
        categoria_id: i64,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "oportunidade_id": oportunidade_id,
            "categoria_id": categoria_id,
        });
        self.post_json("oportunidade_categoria", &body).await
    }

    pub async fn delete_vinculo(&self, vinculo_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("oportunidade_categoria/{}", vinculo_id))
            .await
    }

    // --- Grupos ---

    pub async fn list_grupos(&self, oportunidade_id: i64) -> Result<Vec<Grupo>, ApiError> {
        self.get_json(&format!("grupo?oportunidade_id={}", oportunidade_id))
            .await
    }

    pub async fn create_grupo(
        &self,
        oportunidade_id: i64,
        nome: &str,
        descricao: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "oportunidade_id": oportunidade_id,
            "nome": nome,
            "descricao": descricao,
        });
        self.post_json("grupo", &body).await
    }

    pub async fn update_grupo(
        &self,
        grupo_id: i64,
        oportunidade_id: i64,
        nome: &str,
        descricao: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "nome": nome,
            "descricao": descricao,
            "oportunidade_id": oportunidade_id,
        });
        self.put_json(&format!("grupo/{}", grupo_id), &body).await
    }

    pub async fn delete_grupo(&self, grupo_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("grupo/{}", grupo_id)).await
    }

    // --- Lotes / itens ---

    pub async fn list_lotes(&self, oportunidade_id: i64) -> Result<Vec<Lote>, ApiError> {
        self.get_json(&format!("lotes?oportunidade_id={}", oportunidade_id))
            .await
    }

    pub async fn create_lote(
        &self,
        oportunidade_id: i64,
        numero: &str,
        descricao: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "oportunidade_id": oportunidade_id,
            "numero": numero,
            "descricao": descricao,
        });
        self.post_json("lotes", &body).await
    }

    pub async fn delete_lote(&self, lote_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("lotes/{}", lote_id)).await
    }

    pub async fn list_itens(&self, oportunidade_id: i64) -> Result<Vec<Item>, ApiError> {
        self.get_json(&format!("itens?oportunidade_id={}", oportunidade_id))
            .await
    }

    pub async fn create_item(
        &self,
        oportunidade_id: i64,
        lote_id: i64,
        descricao: &str,
        quantidade: Option<f64>,
        unidade: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut body = serde_json::json!({
            "oportunidade_id": oportunidade_id,
            "lote_id": lote_id,
            "descricao": descricao,
        });
        if let Some(q) = quantidade {
            body["quantidade"] = serde_json::json!(q);
        }
        if let Some(u) = unidade {
            body["unidade"] = serde_json::json!(u);
        }
        self.post_json("itens", &body).await
    }

    pub async fn delete_item(&self, item_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("itens/{}", item_id)).await
    }

    // --- Pareceres ---

    pub async fn list_pareceres(&self, oportunidade_id: i64) -> Result<Vec<Parecer>, ApiError> {
        self.get_json(&format!("pareceres?oportunidade_id={}", oportunidade_id))
            .await
    }

    pub async fn create_parecer(
        &self,
        oportunidade_id: i64,
        titulo: &str,
        conteudo: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "oportunidade_id": oportunidade_id,
            "titulo": titulo,
            "conteudo": conteudo,
        });
        self.post_json("pareceres", &body).await
    }

    pub async fn delete_parecer(&self, parecer_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("pareceres/{}", parecer_id)).await
    }

    // --- Documentos ---

    pub async fn list_documentos(&self, oportunidade_id: i64) -> Result<Vec<Documento>, ApiError> {
        self.get_json(&format!("documentos?oportunidade_id={}", oportunidade_id))
            .await
    }

    pub async fn create_documento(
        &self,
        oportunidade_id: i64,
        nome: &str,
        url: Option<&str>,
        observacao: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut body = serde_json::json!({
            "oportunidade_id": oportunidade_id,
            "nome": nome,
        });
        if let Some(u) = url {
            body["url"] = serde_json::json!(u);
        }
        if let Some(o) = observacao {
            body["observacao"] = serde_json::json!(o);
        }
        self.post_json("documentos", &body).await
    }

    pub async fn delete_documento(&self, documento_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("documentos/{}", documento_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.url("oportunidades"), "http://localhost:3000/oportunidades");
        assert_eq!(
            client.url("/grupo?oportunidade_id=4"),
            "http://localhost:3000/grupo?oportunidade_id=4"
        );

        let spaced = ApiClient::new("  http://api.local  ");
        assert_eq!(spaced.url("categorias"), "http://api.local/categorias");
    }

    #[test]
    fn server_message_comes_from_json_body() {
        assert_eq!(
            server_message(r#"{"message":"Categoria já vinculada"}"#),
            Some("Categoria já vinculada".to_string())
        );
        assert_eq!(server_message(r#"{"error":"sem message"}"#), None);
        assert_eq!(server_message("<html>500</html>"), None);
        assert_eq!(server_message(""), None);
    }

    #[test]
    fn toast_prefers_server_message() {
        let failure = ApiFailure {
            server_message: Some("Categoria já vinculada".to_string()),
            detail: "server returned 409: ...".to_string(),
        };
        assert_eq!(
            failure.toast_or("Erro ao vincular categoria"),
            "Categoria já vinculada"
        );

        let blank = ApiFailure {
            server_message: Some("  ".to_string()),
            detail: "server returned 500".to_string(),
        };
        assert_eq!(
            blank.toast_or("Erro ao vincular categoria"),
            "Erro ao vincular categoria"
        );

        let none = ApiFailure {
            server_message: None,
            detail: "request failed: connection refused".to_string(),
        };
        assert_eq!(
            none.toast_or("Erro ao desvincular categoria"),
            "Erro ao desvincular categoria"
        );
    }

    #[test]
    fn failure_keeps_detail_for_the_log() {
        let err = ApiError::Status {
            status: StatusCode::CONFLICT,
            message: Some("duplicado".to_string()),
            body: r#"{"message":"duplicado"}"#.to_string(),
        };
        let failure = ApiFailure::from(err);
        assert_eq!(failure.server_message.as_deref(), Some("duplicado"));
        assert!(failure.detail.contains("409"));
    }
}
