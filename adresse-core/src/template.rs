//! # Gabaritos Posicionais
//!
//! Endereços dinamarqueses colocam andar e apartamento logo depois do número
//! da porta ("Pile Alle 19D, 3. tv."). Por isso os últimos tokens antes do
//! código postal (ou do fim da string) têm papel fixo e nenhuma gramática
//! geral é necessária:
//!
//! ```text
//! Com código postal:  [rua ...] [número] [andar] [apto] [código] [cidade ...]
//! Sem código postal:  [rua ...] [número] [andar] [apto]
//! ```
//!
//! Se a sequência for curta demais para o gabarito escolhido, não há palpite:
//! o fatiamento falha.

use serde::{Deserialize, Serialize};

use crate::postal::PostalCodeLocation;
use crate::tokenizer::Token;

/// Gabarito escolhido a partir do resultado do localizador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    WithPostalCode,
    WithoutPostalCode,
}

impl Template {
    pub fn for_location(location: &PostalCodeLocation) -> Self {
        match location {
            PostalCodeLocation::AbsentOrNotLast => Template::WithoutPostalCode,
            PostalCodeLocation::PresentAsFinalToken { .. }
            | PostalCodeLocation::PresentWithTrailingCity { .. } => Template::WithPostalCode,
        }
    }

    /// Mínimo de tokens exigido, contando o código postal quando presente.
    pub fn min_tokens(&self) -> usize {
        match self {
            Template::WithPostalCode => 5,
            Template::WithoutPostalCode => 4,
        }
    }
}

/// Papel atribuído a um token pelo gabarito.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    StreetName,
    StreetNumber,
    Floor,
    Apartment,
    City,
}

/// Token com o papel que o gabarito lhe deu (para a interface web).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub token_index: usize,
    pub token_text: String,
    pub role: Role,
}

/// Fatias candidatas, ainda não validadas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSlice<'a> {
    pub template: Template,
    pub street_name: &'a [Token],
    pub street_number: &'a Token,
    pub floor: &'a Token,
    pub apartment: &'a Token,
    pub city: Option<&'a str>,
}

impl CandidateSlice<'_> {
    pub fn roles(&self) -> Vec<RoleAssignment> {
        let assign = |token: &Token, role: Role| RoleAssignment {
            token_index: token.index,
            token_text: token.text.clone(),
            role,
        };
        let mut roles: Vec<RoleAssignment> = self
            .street_name
            .iter()
            .map(|t| assign(t, Role::StreetName))
            .collect();
        roles.push(assign(self.street_number, Role::StreetNumber));
        roles.push(assign(self.floor, Role::Floor));
        roles.push(assign(self.apartment, Role::Apartment));
        roles
    }
}

/// Fatia a sequência de acordo com o gabarito que a localização do código
/// postal determina. `None` se houver tokens de menos.
pub fn match_template<'a>(
    tokens: &'a [Token],
    location: &'a PostalCodeLocation,
) -> Option<CandidateSlice<'a>> {
    let template = Template::for_location(location);
    match location {
        PostalCodeLocation::AbsentOrNotLast => slice_tail(tokens, template, None),
        PostalCodeLocation::PresentAsFinalToken { index } => {
            slice_tail(&tokens[..*index], template, None)
        }
        PostalCodeLocation::PresentWithTrailingCity { index, city } => {
            slice_tail(&tokens[..*index], template, Some(city.as_str()))
        }
    }
}

/// `head` termina logo antes do código postal (ou é a sequência inteira).
fn slice_tail<'a>(
    head: &'a [Token],
    template: Template,
    city: Option<&'a str>,
) -> Option<CandidateSlice<'a>> {
    let postal_tokens = match template {
        Template::WithPostalCode => 1,
        Template::WithoutPostalCode => 0,
    };
    if head.len() + postal_tokens < template.min_tokens() {
        return None;
    }

    let n = head.len();
    Some(CandidateSlice {
        template,
        street_name: &head[..n - 3],
        street_number: &head[n - 3],
        floor: &head[n - 2],
        apartment: &head[n - 1],
        city,
    })
}
