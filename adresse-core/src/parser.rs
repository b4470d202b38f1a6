//! # Parser de Endereços — Orquestrador com Eventos Observáveis
//!
//! O parser coordena tokenizador, classificadores, localizador de código
//! postal, gabaritos e montagem, e emite um evento em cada passo via um canal
//! Rust (`mpsc`). Assim o servidor WebSocket consegue mostrar por que um
//! endereço foi aceito ou rejeitado, enquanto a API pública continua
//! devolvendo apenas `Option<ParsedAddress>`.

use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::builder::{build_address, check_candidates, ParsedAddress};
use crate::classify::TokenShape;
use crate::postal::{locate_postal_code, PostalCodeLocation};
use crate::template::{match_template, Role, RoleAssignment, Template};
use crate::tokenizer::{tokenize, Token};

/// Motivo pelo qual um passo encerrou o parsing sem resultado.
///
/// Só aparece no fluxo de eventos; quem chama [`parse_danish_address`] recebe `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    MissingStreet,
    NoTokens,
    TooFewTokens {
        template: Template,
        required: usize,
        found: usize,
    },
    InvalidCandidate {
        role: Role,
        token_text: String,
    },
}

/// Eventos emitidos pelo parser durante o processamento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ParseEvent {
    /// **Passo 1**: Tokenização concluída.
    TokenizationDone { tokens: Vec<Token>, total: usize },
    /// **Passo 2**: Forma de um token (palavra, número, número de porta, designador).
    TokenClassified {
        token_index: usize,
        token_text: String,
        shape: TokenShape,
    },
    /// **Passo 3**: Resultado da busca pelo código postal.
    PostalCodeLocated { location: PostalCodeLocation },
    /// **Passo 4**: Gabarito aplicado e papel de cada token.
    TemplateSelected {
        template: Template,
        roles: Vec<RoleAssignment>,
    },
    /// **Passo 5**: Validação de um candidato.
    CandidateChecked {
        role: Role,
        token_text: String,
        passed: bool,
    },
    /// Algum passo encerrou o parsing sem resultado.
    Rejected { reason: RejectReason },
    /// **Conclusão**: sempre o último evento. `address` é `None` em caso de falha.
    Done {
        address: Option<ParsedAddress>,
        total_tokens: usize,
        processing_ms: u64,
    },
}

/// Entrada de um registro para [`parse_many`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(default)]
    pub street: Option<String>,
    pub postal_code: String,
}

/// O parser de endereços dinamarqueses.
///
/// Não guarda estado: o mesmo valor pode ser compartilhado entre threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressParser;

impl AddressParser {
    pub fn new() -> Self {
        Self
    }

    /// Processa o endereço de forma síncrona e retorna o resultado final.
    pub fn parse(&self, street: Option<&str>, postal_code: &str) -> Option<ParsedAddress> {
        let (tx, rx) = mpsc::channel();
        self.parse_streaming(street, postal_code, tx);

        // Consome todos os eventos até o fim
        let mut address = None;
        while let Ok(event) = rx.recv() {
            if let ParseEvent::Done { address: parsed, .. } = event {
                address = parsed;
            }
        }
        address
    }

    /// Executa o parsing enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `TokenizationDone`
    /// 2. `TokenClassified` (um por token)
    /// 3. `PostalCodeLocated`
    /// 4. `TemplateSelected`
    /// 5. `CandidateChecked` (um por candidato)
    /// 6. `Done`
    ///
    /// Uma rejeição emite `Rejected` e pula direto para `Done`.
    pub fn parse_streaming(
        &self,
        street: Option<&str>,
        postal_code: &str,
        tx: mpsc::Sender<ParseEvent>,
    ) {
        let start = std::time::Instant::now();

        let finish = |address: Option<ParsedAddress>, total_tokens: usize| {
            let _ = tx.send(ParseEvent::Done {
                address,
                total_tokens,
                processing_ms: start.elapsed().as_millis() as u64,
            });
        };
        let reject = |reason: RejectReason, total_tokens: usize| {
            let _ = tx.send(ParseEvent::Rejected { reason });
            finish(None, total_tokens);
        };

        let Some(street) = street else {
            reject(RejectReason::MissingStreet, 0);
            return;
        };

        // === Passo 1: Tokenização ===
        let tokens = tokenize(street);
        let total = tokens.len();
        let _ = tx.send(ParseEvent::TokenizationDone {
            tokens: tokens.clone(),
            total,
        });
        if tokens.is_empty() {
            reject(RejectReason::NoTokens, 0);
            return;
        }

        // === Passo 2: Classificação ===
        for token in &tokens {
            let _ = tx.send(ParseEvent::TokenClassified {
                token_index: token.index,
                token_text: token.text.clone(),
                shape: TokenShape::of(&token.text),
            });
        }

        // === Passo 3: Código postal ===
        let location = locate_postal_code(&tokens, postal_code);
        let _ = tx.send(ParseEvent::PostalCodeLocated {
            location: location.clone(),
        });

        // === Passo 4: Gabarito ===
        let Some(slice) = match_template(&tokens, &location) else {
            let template = Template::for_location(&location);
            reject(
                RejectReason::TooFewTokens {
                    template,
                    required: template.min_tokens(),
                    found: location.index().map_or(total, |i| i + 1),
                },
                total,
            );
            return;
        };
        let _ = tx.send(ParseEvent::TemplateSelected {
            template: slice.template,
            roles: slice.roles(),
        });

        // === Passo 5: Validação ===
        let checks = check_candidates(&slice);
        for check in &checks {
            let _ = tx.send(ParseEvent::CandidateChecked {
                role: check.role,
                token_text: check.token_text.clone(),
                passed: check.passed,
            });
        }
        if let Some(failed) = checks.iter().find(|c| !c.passed) {
            reject(
                RejectReason::InvalidCandidate {
                    role: failed.role,
                    token_text: failed.token_text.clone(),
                },
                total,
            );
            return;
        }

        finish(build_address(&slice), total);
    }
}

/// Decompõe um endereço dinamarquês em rua, andar, apartamento e cidade.
///
/// `None` para qualquer falha: rua ausente, tokens de menos ou um candidato
/// que não passa no classificador do seu papel.
pub fn parse_danish_address(street: Option<&str>, postal_code: &str) -> Option<ParsedAddress> {
    AddressParser::new().parse(street, postal_code)
}

/// Processa vários registros em paralelo, preservando a ordem de entrada.
pub fn parse_many(inputs: &[AddressInput]) -> Vec<Option<ParsedAddress>> {
    let parser = AddressParser::new();
    inputs
        .par_iter()
        .map(|input| parser.parse(input.street.as_deref(), &input.postal_code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{is_likely_floor_or_apartment_designator, is_likely_street_number, is_word};
    use crate::corpus::demo_addresses;

    fn expect(
        street: &str,
        postal_code: &str,
        expected: (&str, &str, &str, Option<&str>),
    ) {
        let address = parse_danish_address(Some(street), postal_code)
            .unwrap_or_else(|| panic!("falhou ao decompor {street:?}"));
        assert_eq!(address.street, expected.0);
        assert_eq!(address.apartment, expected.1);
        assert_eq!(address.floor, expected.2);
        assert_eq!(address.city.as_deref(), expected.3);
    }

    #[test]
    fn test_parse_with_city() {
        expect(
            "Pile Alle 19D, 3. tv. 2000 Frederiksberg",
            "2000",
            ("Pile Alle 19D", "tv", "3", Some("Frederiksberg")),
        );
    }

    #[test]
    fn test_parse_numeric_apartment_and_letter_floor() {
        expect(
            "Fynsgade 10, st. 0001. 6700 Esbjerg",
            "6700",
            ("Fynsgade 10", "0001", "st", Some("Esbjerg")),
        );
    }

    #[test]
    fn test_parse_multi_word_city() {
        expect(
            "Tinghaven 4, 3, tr. 9310 Store Heddinge",
            "9310",
            ("Tinghaven 4", "tr", "3", Some("Store Heddinge")),
        );
    }

    #[test]
    fn test_parse_postal_code_last() {
        expect(
            "Jesper Brochmands Gade 6, 3. th. 2200",
            "2200",
            ("Jesper Brochmands Gade 6", "th", "3", None),
        );
    }

    #[test]
    fn test_parse_without_postal_code() {
        expect(
            "Søvang Alle 27, 1. tv.",
            "2770",
            ("Søvang Alle 27", "tv", "1", None),
        );
    }

    #[test]
    fn test_parse_ambiguous_designator() {
        assert!(parse_danish_address(Some("Sundgade 1A, 3. 6400 Sønderborg"), "6400").is_none());
    }

    #[test]
    fn test_parse_empty_and_missing() {
        assert!(parse_danish_address(Some(""), "2000").is_none());
        assert!(parse_danish_address(None, "2000").is_none());
        assert!(parse_danish_address(None, "").is_none());
    }

    #[test]
    fn test_parse_fewer_than_four_tokens() {
        for street in ["Vej", "Vej 1", "Vej 1 tv", "Vej, 1. tv."] {
            assert!(parse_danish_address(Some(street), "9999").is_none(), "{street}");
        }
    }

    #[test]
    fn test_parse_results_pass_classifiers_again() {
        for (_, street, postal_code) in demo_addresses() {
            let Some(address) = parse_danish_address(Some(street), postal_code) else {
                continue;
            };
            let (name, number) = address.street.rsplit_once(' ').unwrap();
            assert!(name.split(' ').all(is_word), "{street}");
            assert!(is_likely_street_number(number), "{street}");
            assert!(is_likely_floor_or_apartment_designator(&address.floor));
            assert!(is_likely_floor_or_apartment_designator(&address.apartment));
            if let Some(city) = &address.city {
                assert!(city.split(' ').all(is_word));
            }
        }
    }

    #[test]
    fn test_parse_streaming_events_order() {
        let (tx, rx) = mpsc::channel();
        AddressParser::new().parse_streaming(
            Some("Pile Alle 19D, 3. tv. 2000 Frederiksberg"),
            "2000",
            tx,
        );
        let events: Vec<ParseEvent> = rx.try_iter().collect();

        assert!(
            matches!(&events[0], ParseEvent::TokenizationDone { total: 7, .. }),
            "Primeiro evento deve ser TokenizationDone"
        );
        let classified = events
            .iter()
            .filter(|e| matches!(e, ParseEvent::TokenClassified { .. }))
            .count();
        assert_eq!(classified, 7);
        assert!(events.iter().any(|e| matches!(
            e,
            ParseEvent::TemplateSelected {
                template: Template::WithPostalCode,
                ..
            }
        )));
        assert!(!events.iter().any(|e| matches!(e, ParseEvent::Rejected { .. })));

        let last = events.last().unwrap();
        assert!(
            matches!(last, ParseEvent::Done { address: Some(_), .. }),
            "Último evento deve ser Done com endereço"
        );
    }

    #[test]
    fn test_parse_streaming_reject_reasons() {
        let reason_for = |street: Option<&str>, postal_code: &str| {
            let (tx, rx) = mpsc::channel();
            AddressParser::new().parse_streaming(street, postal_code, tx);
            rx.try_iter().find_map(|e| match e {
                ParseEvent::Rejected { reason } => Some(reason),
                _ => None,
            })
        };

        assert_eq!(reason_for(None, "2000"), Some(RejectReason::MissingStreet));
        assert_eq!(reason_for(Some(", -"), "2000"), Some(RejectReason::NoTokens));
        assert_eq!(
            reason_for(Some("Sundgade 1A, 3. 6400 Sønderborg"), "6400"),
            Some(RejectReason::TooFewTokens {
                template: Template::WithPostalCode,
                required: 5,
                found: 4,
            })
        );
        assert_eq!(
            reason_for(Some("Pile Alle 19DE 3 tv"), "2000"),
            Some(RejectReason::InvalidCandidate {
                role: Role::StreetNumber,
                token_text: "19DE".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_event_serialization() {
        let event = ParseEvent::Rejected {
            reason: RejectReason::MissingStreet,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Rejected");
        assert_eq!(json["data"]["reason"]["reason"], "missing_street");
    }

    #[test]
    fn test_parse_many_preserves_order() {
        let inputs = vec![
            AddressInput {
                street: Some("Søvang Alle 27, 1. tv.".to_string()),
                postal_code: "2770".to_string(),
            },
            AddressInput {
                street: None,
                postal_code: "2770".to_string(),
            },
            AddressInput {
                street: Some("Jesper Brochmands Gade 6, 3. th. 2200".to_string()),
                postal_code: "2200".to_string(),
            },
        ];
        let results = parse_many(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().street, "Søvang Alle 27");
        assert!(results[1].is_none());
        assert_eq!(results[2].as_ref().unwrap().street, "Jesper Brochmands Gade 6");
    }
}
