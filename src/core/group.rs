use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Grupo {
    pub id: i64,
    pub oportunidade_id: i64,
    pub nome: String,
    pub descricao: Option<String>,
}

/// What the group editor is aimed at. Creating and editing are distinct
/// variants so a leftover pointer can never turn a create into an update.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupTarget {
    Creating,
    Editing(Grupo),
}

/// Editor buffer for a grupo, paired with the target it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupForm {
    pub target: GroupTarget,
    pub nome: String,
    pub descricao: String,
    /// Validation message shown inline, cleared on input.
    pub error: Option<String>,
}

impl GroupForm {
    pub fn creating() -> Self {
        Self {
            target: GroupTarget::Creating,
            nome: String::new(),
            descricao: String::new(),
            error: None,
        }
    }

    pub fn editing(grupo: Grupo) -> Self {
        Self {
            nome: grupo.nome.clone(),
            descricao: grupo.descricao.clone().unwrap_or_default(),
            target: GroupTarget::Editing(grupo),
            error: None,
        }
    }

    /// A name that is empty after trimming fails validation.
    pub fn validate(&mut self) -> bool {
        if self.nome.trim().is_empty() {
            self.error = Some("Informe o nome do grupo".to_string());
            false
        } else {
            self.error = None;
            true
        }
    }

    pub fn trimmed_nome(&self) -> String {
        self.nome.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grupo() -> Grupo {
        Grupo {
            id: 5,
            oportunidade_id: 42,
            nome: "Grupo 1".to_string(),
            descricao: Some("Equipamentos".to_string()),
        }
    }

    #[test]
    fn creating_starts_blank() {
        let form = GroupForm::creating();
        assert_eq!(form.target, GroupTarget::Creating);
        assert!(form.nome.is_empty());
        assert!(form.descricao.is_empty());
        assert!(form.error.is_none());
    }

    #[test]
    fn editing_prefills_from_record() {
        let form = GroupForm::editing(grupo());
        assert_eq!(form.nome, "Grupo 1");
        assert_eq!(form.descricao, "Equipamentos");
        assert!(matches!(form.target, GroupTarget::Editing(ref g) if g.id == 5));
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let mut form = GroupForm::creating();
        form.nome = "   \t ".to_string();
        assert!(!form.validate());
        assert_eq!(form.error.as_deref(), Some("Informe o nome do grupo"));
    }

    #[test]
    fn valid_name_clears_the_error() {
        let mut form = GroupForm::creating();
        form.nome = " ".to_string();
        assert!(!form.validate());
        form.nome = "  Grupo A  ".to_string();
        assert!(form.validate());
        assert!(form.error.is_none());
        assert_eq!(form.trimmed_nome(), "Grupo A");
    }

    #[test]
    fn reopening_for_create_does_not_leak_the_edit_target() {
        let edit = GroupForm::editing(grupo());
        assert!(matches!(edit.target, GroupTarget::Editing(_)));
        let create = GroupForm::creating();
        assert_eq!(create.target, GroupTarget::Creating);
        assert!(create.nome.is_empty());
    }
}
