use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lote {
    pub id: i64,
    pub oportunidade_id: i64,
    pub numero: String,
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub id: i64,
    pub lote_id: i64,
    pub oportunidade_id: i64,
    pub descricao: String,
    pub quantidade: Option<f64>,
    pub unidade: Option<String>,
    pub valor_unitario_estimado: Option<f64>,
}

/// New-lote buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoteForm {
    pub numero: String,
    pub descricao: String,
    pub error: Option<String>,
}

impl LoteForm {
    pub fn validate(&mut self) -> bool {
        if self.numero.trim().is_empty() {
            self.error = Some("Informe o número do lote".to_string());
            false
        } else {
            self.error = None;
            true
        }
    }
}

/// Inline per-lote item entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub descricao: String,
    pub quantidade: String,
    pub unidade: String,
}

impl ItemForm {
    pub fn is_submittable(&self) -> bool {
        !self.descricao.trim().is_empty()
    }

    /// Quantity for the wire: omitted unless it parses as a finite number.
    pub fn parsed_quantidade(&self) -> Option<f64> {
        self.quantidade
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// Items of one lote, in fetch order.
pub fn itens_do_lote<'a>(itens: &'a [Item], lote_id: i64) -> Vec<&'a Item> {
    itens.iter().filter(|i| i.lote_id == lote_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, lote_id: i64, descricao: &str) -> Item {
        Item {
            id,
            lote_id,
            oportunidade_id: 42,
            descricao: descricao.to_string(),
            quantidade: None,
            unidade: None,
            valor_unitario_estimado: None,
        }
    }

    #[test]
    fn groups_items_by_lote() {
        let itens = vec![
            item(1, 10, "Notebook"),
            item(2, 11, "Monitor"),
            item(3, 10, "Dock"),
        ];
        let lote_10: Vec<i64> = itens_do_lote(&itens, 10).iter().map(|i| i.id).collect();
        assert_eq!(lote_10, vec![1, 3]);
        assert!(itens_do_lote(&itens, 99).is_empty());
    }

    #[test]
    fn lote_requires_numero() {
        let mut form = LoteForm::default();
        form.descricao = "Só descrição".to_string();
        assert!(!form.validate());
        assert!(form.error.is_some());

        form.numero = "Lote 01".to_string();
        assert!(form.validate());
        assert!(form.error.is_none());
    }

    #[test]
    fn item_requires_descricao() {
        let mut form = ItemForm::default();
        assert!(!form.is_submittable());
        form.descricao = "  ".to_string();
        assert!(!form.is_submittable());
        form.descricao = "Cabo HDMI".to_string();
        assert!(form.is_submittable());
    }

    #[test]
    fn quantidade_parses_or_is_omitted() {
        let mut form = ItemForm::default();
        form.quantidade = "12".to_string();
        assert_eq!(form.parsed_quantidade(), Some(12.0));
        form.quantidade = "2.5".to_string();
        assert_eq!(form.parsed_quantidade(), Some(2.5));
        form.quantidade = "doze".to_string();
        assert_eq!(form.parsed_quantidade(), None);
        form.quantidade = String::new();
        assert_eq!(form.parsed_quantidade(), None);
    }
}
