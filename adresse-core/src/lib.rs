//! # adresse-core — Decomposição de Endereços Dinamarqueses
//!
//! Este crate transforma um endereço dinamarquês em texto livre (mais um código
//! postal conhecido) em um registro estruturado: rua com número, andar,
//! apartamento e, opcionalmente, cidade. Os endereços vêm de fontes de
//! terceiros com pontuação, espaços e acentos inconsistentes e precisam ser
//! decompostos antes de serem comparados com o endereço que já temos.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui por um pipeline linear, sem estado e sem I/O:
//!
//! 1.  **Entrada**: endereço bruto (`Option<&str>`) e código postal (`&str`).
//! 2.  **Tokenização** ([`tokenizer`]): remove ruído e separa em tokens.
//! 3.  **Localização do código postal** ([`postal`]): no fim, seguido de cidade, ou ausente.
//! 4.  **Gabarito** ([`template`]): fatia a cauda em número, andar e apartamento.
//! 5.  **Montagem** ([`builder`]): valida cada fatia com os [`classify`] e monta o resultado.
//! 6.  **Saída**: `Option<ParsedAddress>`. Toda falha é simplesmente `None`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use adresse_core::parse_danish_address;
//!
//! let address = parse_danish_address(Some("Pile Alle 19D, 3. tv. 2000 Frederiksberg"), "2000")
//!     .expect("endereço válido");
//!
//! assert_eq!(address.street, "Pile Alle 19D");
//! assert_eq!(address.floor, "3");
//! assert_eq!(address.apartment, "tv");
//! assert_eq!(address.city.as_deref(), Some("Frederiksberg"));
//!
//! // Só um designador depois do número: ambíguo, sem palpite
//! assert!(parse_danish_address(Some("Sundgade 1A, 3. 6400 Sønderborg"), "6400").is_none());
//! ```
//!
//! ## Módulos Principais
//!
//! - [`parser`]: orquestrador com eventos observáveis e parsing em lote.
//! - [`matching`]: comparação de um endereço decomposto com outro.
//! - [`corpus`]: endereços de demonstração.

pub mod builder;
pub mod classify;
pub mod corpus;
pub mod matching;
pub mod parser;
pub mod postal;
pub mod template;
pub mod tokenizer;

pub use builder::ParsedAddress;
pub use classify::{
    is_likely_floor_or_apartment_designator, is_likely_street_number, is_number, is_word,
};
pub use parser::{parse_danish_address, parse_many, AddressInput, AddressParser, ParseEvent};
pub use tokenizer::Token;
