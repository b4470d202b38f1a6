//! # Comparação de Endereços
//!
//! Endereços vindos de terceiros são comparados com o endereço que já temos
//! usando a mesma noção de token do parser: sem pontuação, sem diferença de
//! maiúsculas e com os acentos dinamarqueses dobrados ("Allé" == "alle").

use crate::builder::ParsedAddress;
use crate::classify::fold_accent;
use crate::tokenizer::tokenize;

/// Tokens de rua normalizados (minúsculos, sem acentos do conjunto dinamarquês).
pub fn street_tokens(street: &str) -> Vec<String> {
    tokenize(street)
        .into_iter()
        .map(|token| {
            token
                .text
                .chars()
                .map(fold_accent)
                .flat_map(char::to_lowercase)
                .collect()
        })
        .collect()
}

/// Duas ruas são a mesma se têm a mesma sequência de tokens normalizados.
pub fn same_street(a: &str, b: &str) -> bool {
    let left = street_tokens(a);
    !left.is_empty() && left == street_tokens(b)
}

impl ParsedAddress {
    /// Identidade para fins de cotação: rua, andar e apartamento precisam
    /// bater; a cidade só é comparada quando os dois lados a têm.
    pub fn matches(&self, other: &ParsedAddress) -> bool {
        let city_matches = match (&self.city, &other.city) {
            (Some(a), Some(b)) => same_street(a, b),
            _ => true,
        };
        same_street(&self.street, &other.street)
            && self.floor.eq_ignore_ascii_case(&other.floor)
            && self.apartment.eq_ignore_ascii_case(&other.apartment)
            && city_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_danish_address;

    #[test]
    fn test_street_tokens() {
        assert_eq!(street_tokens("Søvang Allé 27,"), vec!["sovang", "alle", "27"]);
        assert!(street_tokens(" , ").is_empty());
    }

    #[test]
    fn test_same_street() {
        assert!(same_street("Pile Allé 19D", "PILE ALLE 19d"));
        assert!(same_street("Søvang Alle 27", "Sovang Alle, 27"));
        assert!(!same_street("Pile Alle 19", "Pile Alle 19D"));
        assert!(!same_street("", ""));
    }

    #[test]
    fn test_parsed_address_matches() {
        let held = parse_danish_address(Some("Pile Allé 19D, 3. tv."), "2000").unwrap();
        let third_party =
            parse_danish_address(Some("PILE ALLE 19D 3 TV 2000 Frederiksberg"), "2000").unwrap();
        assert!(held.matches(&third_party));
        assert!(third_party.matches(&held));
    }

    #[test]
    fn test_parsed_address_mismatch() {
        let a = parse_danish_address(Some("Pile Alle 19D, 3. tv. 2000 Frederiksberg"), "2000").unwrap();
        let other_floor = parse_danish_address(Some("Pile Alle 19D, 2. tv. 2000"), "2000").unwrap();
        let other_city = parse_danish_address(Some("Pile Alle 19D, 3. tv. 2000 Valby"), "2000").unwrap();
        assert!(!a.matches(&other_floor));
        assert!(!a.matches(&other_city));
    }
}
