use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Orgao {
    pub id: i64,
    pub nome: String,
    pub sigla: Option<String>,
}

impl Orgao {
    /// Display label: sigla, a dash, then nome when a sigla exists; plain nome otherwise.
    pub fn label(&self) -> String {
        match self.sigla.as_deref() {
            Some(sigla) if !sigla.trim().is_empty() => format!("{} \u{2014} {}", sigla, self.nome),
            _ => self.nome.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Modalidade {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusOportunidade {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FasePipeline {
    pub id: i64,
    pub nome: String,
    pub sequencia: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Categoria {
    pub id: i64,
    pub nome: String,
}

/// Pipeline order: by `sequencia`, records without one last, ties keep
/// fetch order.
pub fn sort_fases(fases: &mut Vec<FasePipeline>) {
    fases.sort_by_key(|f| f.sequencia.unwrap_or(9999));
}

pub fn orgao_name(orgaos: &[Orgao], id: i64) -> Option<&str> {
    orgaos.iter().find(|o| o.id == id).map(|o| o.nome.as_str())
}

pub fn categoria_name(categorias: &[Categoria], id: i64) -> Option<&str> {
    categorias.iter().find(|c| c.id == id).map(|c| c.nome.as_str())
}

pub fn status_name(status: &[StatusOportunidade], id: i64) -> Option<&str> {
    status.iter().find(|s| s.id == id).map(|s| s.nome.as_str())
}

pub fn fase_name(fases: &[FasePipeline], id: i64) -> Option<&str> {
    fases.iter().find(|f| f.id == id).map(|f| f.nome.as_str())
}

pub fn modalidade_name(modalidades: &[Modalidade], id: i64) -> Option<&str> {
    modalidades.iter().find(|m| m.id == id).map(|m| m.nome.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fase(id: i64, nome: &str, sequencia: Option<i64>) -> FasePipeline {
        FasePipeline {
            id,
            nome: nome.to_string(),
            sequencia,
        }
    }

    #[test]
    fn orgao_label_with_sigla() {
        let orgao = Orgao {
            id: 1,
            nome: "Tribunal de Contas da União".to_string(),
            sigla: Some("TCU".to_string()),
        };
        assert_eq!(orgao.label(), "TCU \u{2014} Tribunal de Contas da União");
    }

    #[test]
    fn orgao_label_without_sigla() {
        let orgao = Orgao {
            id: 2,
            nome: "Prefeitura de Curitiba".to_string(),
            sigla: None,
        };
        assert_eq!(orgao.label(), "Prefeitura de Curitiba");

        let blank = Orgao {
            id: 3,
            nome: "Câmara Municipal".to_string(),
            sigla: Some("  ".to_string()),
        };
        assert_eq!(blank.label(), "Câmara Municipal");
    }

    #[test]
    fn fases_sort_missing_sequencia_last() {
        let mut fases = vec![
            fase(1, "Proposta", Some(3)),
            fase(2, "Sem ordem", None),
            fase(3, "Prospecção", Some(1)),
            fase(4, "Análise", Some(2)),
        ];
        sort_fases(&mut fases);
        let ids: Vec<i64> = fases.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn fases_sort_is_stable_on_ties() {
        let mut fases = vec![
            fase(1, "A", None),
            fase(2, "B", Some(5)),
            fase(3, "C", None),
            fase(4, "D", Some(5)),
        ];
        sort_fases(&mut fases);
        let ids: Vec<i64> = fases.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn resolves_names_by_id() {
        let categorias = vec![
            Categoria {
                id: 10,
                nome: "Obras".to_string(),
            },
            Categoria {
                id: 11,
                nome: "Serviços de TI".to_string(),
            },
        ];
        assert_eq!(categoria_name(&categorias, 11), Some("Serviços de TI"));
        assert_eq!(categoria_name(&categorias, 99), None);
    }
}
