//! # Localizador de Código Postal
//!
//! Procura o código postal informado pelo chamador dentro da sequência de
//! tokens. A posição encontrada decide qual gabarito o
//! [`template`](crate::template) usa e se há uma cidade depois do código.

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Onde (e se) o código postal aparece na sequência.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostalCodeLocation {
    /// Nenhum token é igual ao código postal.
    AbsentOrNotLast,
    /// O código postal é o último token; não há cidade.
    PresentAsFinalToken { index: usize },
    /// O código postal é seguido por tokens que formam a cidade candidata.
    PresentWithTrailingCity { index: usize, city: String },
}

impl PostalCodeLocation {
    /// Índice do token do código postal, se encontrado.
    pub fn index(&self) -> Option<usize> {
        match self {
            PostalCodeLocation::AbsentOrNotLast => None,
            PostalCodeLocation::PresentAsFinalToken { index }
            | PostalCodeLocation::PresentWithTrailingCity { index, .. } => Some(*index),
        }
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            PostalCodeLocation::PresentWithTrailingCity { city, .. } => Some(city.as_str()),
            _ => None,
        }
    }
}

/// Localiza a última ocorrência exata de `postal_code` entre os tokens.
///
/// A comparação é de string, não numérica: "0001" não casa com "1".
pub fn locate_postal_code(tokens: &[Token], postal_code: &str) -> PostalCodeLocation {
    let Some(index) = tokens.iter().rposition(|t| t.text == postal_code) else {
        return PostalCodeLocation::AbsentOrNotLast;
    };

    if index + 1 == tokens.len() {
        return PostalCodeLocation::PresentAsFinalToken { index };
    }

    let city = tokens[index + 1..]
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(',', "")
        .trim()
        .to_string();

    PostalCodeLocation::PresentWithTrailingCity { index, city }
}
