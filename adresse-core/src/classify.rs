//! # Classificadores de Token
//!
//! Predicados independentes e sem estado que dizem se um token tem a "forma"
//! esperada para cada campo do endereço. São usados duas vezes: pelo
//! [`template`](crate::template) para fatiar a sequência e pelo
//! [`builder`](crate::builder) para validar cada fatia.
//!
//! | Predicado                                      | Aceita             | Rejeita          |
//! |------------------------------------------------|--------------------|------------------|
//! | [`is_word`]                                    | "Søvang", "ALLE"   | "", "gade3"      |
//! | [`is_number`]                                  | "0001", "27"       | "27a", ""        |
//! | [`is_likely_street_number`]                    | "19", "19D"        | "19DE", "D19"    |
//! | [`is_likely_floor_or_apartment_designator`]    | "3", "tv", "st"    | "tvv", "3a"      |

use serde::{Deserialize, Serialize};

/// Letras acentuadas aceitas em palavras dinamarquesas e sua forma ASCII.
pub const ACCENTED_LETTERS: &[(char, char)] = &[
    ('é', 'e'),
    ('ë', 'e'),
    ('è', 'e'),
    ('æ', 'a'),
    ('ä', 'a'),
    ('å', 'a'),
    ('ø', 'o'),
    ('ö', 'o'),
    ('É', 'E'),
    ('Ë', 'E'),
    ('È', 'E'),
    ('Æ', 'A'),
    ('Ä', 'A'),
    ('Å', 'A'),
    ('Ø', 'O'),
    ('Ö', 'O'),
];

/// Mapeia uma letra do conjunto acentuado para a letra ASCII correspondente.
/// Qualquer outro caractere é devolvido sem alteração.
pub fn fold_accent(ch: char) -> char {
    ACCENTED_LETTERS
        .iter()
        .find(|(accented, _)| *accented == ch)
        .map(|(_, plain)| *plain)
        .unwrap_or(ch)
}

/// Palavra: uma ou mais letras ASCII depois de dobrar os acentos.
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| fold_accent(ch).is_ascii_alphabetic())
}

/// Número: um ou mais dígitos ASCII.
pub fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit())
}

/// Número de porta: um número, ou dígitos seguidos de exatamente uma letra ("19D").
pub fn is_likely_street_number(token: &str) -> bool {
    if is_number(token) {
        return true;
    }
    match token.char_indices().last() {
        Some((pos, last)) => last.is_ascii_alphabetic() && is_number(&token[..pos]),
        None => false,
    }
}

/// Andar ou apartamento: um número, ou exatamente duas letras ("tv", "th", "mf", "st").
pub fn is_likely_floor_or_apartment_designator(token: &str) -> bool {
    is_number(token) || (token.len() == 2 && token.chars().all(|ch| ch.is_ascii_alphabetic()))
}

/// Resumo das quatro classificações de um token, para visualização.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenShape {
    pub word: bool,
    pub number: bool,
    pub street_number: bool,
    pub designator: bool,
}

impl TokenShape {
    pub fn of(token: &str) -> Self {
        Self {
            word: is_word(token),
            number: is_number(token),
            street_number: is_likely_street_number(token),
            designator: is_likely_floor_or_apartment_designator(token),
        }
    }

    /// Nenhum predicado aceita o token.
    pub fn is_unknown(&self) -> bool {
        !(self.word || self.number || self.street_number || self.designator)
    }
}
