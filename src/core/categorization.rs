use std::collections::HashSet;

use serde::Deserialize;

use super::reference::Categoria;

/// A row of the opportunity-categoria join table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoriaVinculo {
    pub id: i64,
    pub oportunidade_id: i64,
    pub categoria_id: i64,
}

/// Categorias still eligible for linking: the full list minus those
/// already linked. Complements the badge list at all times.
pub fn available_categorias<'a>(
    categorias: &'a [Categoria],
    vinculos: &[CategoriaVinculo],
) -> Vec<&'a Categoria> {
    let linked: HashSet<i64> = vinculos.iter().map(|v| v.categoria_id).collect();
    categorias
        .iter()
        .filter(|c| !linked.contains(&c.id))
        .collect()
}

/// Badge label for a link: the categoria nome, or "ID {categoria_id}"
/// when the categoria is not in the cached list.
pub fn vinculo_label(categorias: &[Categoria], vinculo: &CategoriaVinculo) -> String {
    categorias
        .iter()
        .find(|c| c.id == vinculo.categoria_id)
        .map(|c| c.nome.clone())
        .unwrap_or_else(|| format!("ID {}", vinculo.categoria_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categoria(id: i64, nome: &str) -> Categoria {
        Categoria {
            id,
            nome: nome.to_string(),
        }
    }

    fn vinculo(id: i64, categoria_id: i64) -> CategoriaVinculo {
        CategoriaVinculo {
            id,
            oportunidade_id: 42,
            categoria_id,
        }
    }

    #[test]
    fn available_is_the_set_difference() {
        let categorias = vec![
            categoria(1, "Obras"),
            categoria(2, "Serviços"),
            categoria(3, "Materiais"),
        ];
        let vinculos = vec![vinculo(100, 2)];
        let available = available_categorias(&categorias, &vinculos);
        let ids: Vec<i64> = available.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn link_then_unlink_restores_availability() {
        let categorias = vec![categoria(1, "Obras"), categoria(2, "Serviços")];
        let mut vinculos: Vec<CategoriaVinculo> = Vec::new();

        let before: Vec<i64> = available_categorias(&categorias, &vinculos)
            .iter()
            .map(|c| c.id)
            .collect();

        vinculos.push(vinculo(7, 1));
        let during: Vec<i64> = available_categorias(&categorias, &vinculos)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(during, vec![2]);

        vinculos.retain(|v| v.id != 7);
        let after: Vec<i64> = available_categorias(&categorias, &vinculos)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn linked_and_available_are_complements() {
        let categorias = vec![
            categoria(1, "A"),
            categoria(2, "B"),
            categoria(3, "C"),
            categoria(4, "D"),
        ];
        let vinculos = vec![vinculo(10, 1), vinculo(11, 4)];

        let available: HashSet<i64> = available_categorias(&categorias, &vinculos)
            .iter()
            .map(|c| c.id)
            .collect();
        let linked: HashSet<i64> = vinculos.iter().map(|v| v.categoria_id).collect();

        assert!(available.is_disjoint(&linked));
        let mut union: Vec<i64> = available.union(&linked).copied().collect();
        union.sort();
        assert_eq!(union, vec![1, 2, 3, 4]);
    }

    #[test]
    fn label_falls_back_to_raw_id() {
        let categorias = vec![categoria(1, "Obras")];
        assert_eq!(vinculo_label(&categorias, &vinculo(5, 1)), "Obras");
        assert_eq!(vinculo_label(&categorias, &vinculo(6, 77)), "ID 77");
    }
}
