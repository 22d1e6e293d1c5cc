use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Semantic color family for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAccent {
    Green,
    Amber,
    Yellow,
    Purple,
    Blue,
    Red,
    Neutral,
}

/// Lowercase and strip combining marks so "Análise" matches "analise".
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

impl StatusAccent {
    /// Map a status name to its badge color. The match is accent- and
    /// case-insensitive, first hit in this order wins.
    pub fn from_status_name(name: &str) -> Self {
        let folded = fold(name);
        if folded.contains("andamento") {
            Self::Green
        } else if folded.contains("analise") {
            Self::Amber
        } else if folded.contains("parecer") {
            Self::Yellow
        } else if folded.contains("proposta") {
            Self::Purple
        } else if folded.contains("final") {
            Self::Blue
        } else if folded.contains("cancel") {
            Self::Red
        } else {
            Self::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_accents_and_case() {
        assert_eq!(fold("Análise"), "analise");
        assert_eq!(fold("EM ANDAMENTO"), "em andamento");
        assert_eq!(fold("Licitação"), "licitacao");
    }

    #[test]
    fn maps_known_status_names() {
        assert_eq!(
            StatusAccent::from_status_name("Em Andamento"),
            StatusAccent::Green
        );
        assert_eq!(
            StatusAccent::from_status_name("Em Análise"),
            StatusAccent::Amber
        );
        assert_eq!(
            StatusAccent::from_status_name("Aguardando Parecer"),
            StatusAccent::Yellow
        );
        assert_eq!(
            StatusAccent::from_status_name("Proposta Enviada"),
            StatusAccent::Purple
        );
        assert_eq!(
            StatusAccent::from_status_name("Finalizada"),
            StatusAccent::Blue
        );
        assert_eq!(
            StatusAccent::from_status_name("Cancelada"),
            StatusAccent::Red
        );
    }

    #[test]
    fn accent_and_case_do_not_matter() {
        assert_eq!(
            StatusAccent::from_status_name("em análise"),
            StatusAccent::Amber
        );
        assert_eq!(
            StatusAccent::from_status_name("ANÁLISE TÉCNICA"),
            StatusAccent::Amber
        );
    }

    #[test]
    fn unknown_names_are_neutral() {
        assert_eq!(
            StatusAccent::from_status_name("Rascunho"),
            StatusAccent::Neutral
        );
        assert_eq!(StatusAccent::from_status_name(""), StatusAccent::Neutral);
    }

    #[test]
    fn first_match_in_priority_order_wins() {
        // "andamento" outranks "cancel" regardless of position in the name.
        assert_eq!(
            StatusAccent::from_status_name("Cancelamento em andamento"),
            StatusAccent::Green
        );
    }
}
