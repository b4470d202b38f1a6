//! # Montagem do Endereço
//!
//! Valida cada fatia candidata com o classificador do seu papel e, só se
//! todas passarem, monta o [`ParsedAddress`]. Não existe resultado parcial.

use serde::{Deserialize, Serialize};

use crate::classify::{is_likely_floor_or_apartment_designator, is_likely_street_number, is_word};
use crate::template::{CandidateSlice, Role};

/// Endereço estruturado devolvido ao chamador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Nome da rua seguido do número ("Pile Alle 19D").
    pub street: String,
    pub apartment: String,
    pub floor: String,
    /// Presente apenas se havia tokens depois do código postal.
    pub city: Option<String>,
}

/// Resultado da validação de um candidato.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCheck {
    pub role: Role,
    pub token_text: String,
    pub passed: bool,
}

/// Valida todos os candidatos na ordem apto, andar, número, rua, cidade.
pub fn check_candidates(slice: &CandidateSlice<'_>) -> Vec<CandidateCheck> {
    let check = |role: Role, text: &str, passed: bool| CandidateCheck {
        role,
        token_text: text.to_string(),
        passed,
    };

    let mut checks = vec![
        check(
            Role::Apartment,
            &slice.apartment.text,
            is_likely_floor_or_apartment_designator(&slice.apartment.text),
        ),
        check(
            Role::Floor,
            &slice.floor.text,
            is_likely_floor_or_apartment_designator(&slice.floor.text),
        ),
        check(
            Role::StreetNumber,
            &slice.street_number.text,
            is_likely_street_number(&slice.street_number.text),
        ),
    ];
    checks.extend(
        slice
            .street_name
            .iter()
            .map(|t| check(Role::StreetName, &t.text, is_word(&t.text))),
    );
    if let Some(city) = slice.city {
        // Cidades de várias palavras ("Store Heddinge") são validadas parte a parte
        checks.push(check(
            Role::City,
            city,
            !city.is_empty() && city.split(' ').all(is_word),
        ));
    }
    checks
}

/// Monta o endereço se todos os candidatos forem válidos.
pub fn build_address(slice: &CandidateSlice<'_>) -> Option<ParsedAddress> {
    if !check_candidates(slice).iter().all(|c| c.passed) {
        return None;
    }
    Some(assemble(slice))
}

fn assemble(slice: &CandidateSlice<'_>) -> ParsedAddress {
    let street = slice
        .street_name
        .iter()
        .chain(std::iter::once(slice.street_number))
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(',', "")
        .trim()
        .to_string();

    ParsedAddress {
        street,
        apartment: slice.apartment.text.clone(),
        floor: slice.floor.text.clone(),
        city: slice.city.map(str::to_string),
    }
}
