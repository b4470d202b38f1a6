//! # Tokenizador de Endereços
//!
//! Divide o endereço bruto em tokens limpos. Fontes de dados de terceiros
//! entregam o mesmo endereço com pontuação variada ("Pile Alle 19D, 3. tv."),
//! espaços duplicados e hífens soltos; o tokenizador remove esse ruído antes
//! que a posição de cada token seja interpretada.
//!
//! ## Regra de Limpeza
//!
//! - Letras (incluindo é, ë, è, æ, ä, å, ø, ö) e dígitos ASCII são mantidos.
//! - Espaços em branco separam tokens.
//! - Qualquer outro caractere é ruído e é descartado sem quebrar o token.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use adresse_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Pile Alle 19D, 3. tv.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["Pile", "Alle", "19D", "3", "tv"]);
//! ```

use serde::{Deserialize, Serialize};

/// Um token extraído do endereço original.
///
/// `text` já está limpo; `start` e `end` apontam para o trecho correspondente
/// no texto original (incluindo pontuação interna descartada), o que permite
/// destacar o token na interface web.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// O texto limpo do token (ex: "19D", "tv", "Søvang").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Posição do token na sequência (0, 1, 2...).
    pub index: usize,
}

/// Caractere que sobrevive à limpeza (além do espaço em branco).
fn is_kept(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_ascii_digit()
}

/// Remove todo caractere de ruído, preservando letras, dígitos e espaços.
pub fn strip_noise(text: &str) -> String {
    text.chars()
        .filter(|&ch| is_kept(ch) || ch.is_whitespace())
        .collect()
}

/// Tokeniza um endereço: remove ruído e separa por espaços em branco.
///
/// Fragmentos vazios (ex: ", -" entre duas palavras) nunca viram tokens,
/// então uma entrada vazia ou só de pontuação devolve uma sequência vazia.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut end = 0;

    for (byte_pos, ch) in text.char_indices() {
        if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current, start, end);
        } else if is_kept(ch) {
            if current.is_empty() {
                start = byte_pos;
            }
            current.push(ch);
            end = byte_pos + ch.len_utf8();
        }
        // Ruído: descartado sem encerrar o token atual
    }
    flush_token(&mut tokens, &mut current, start, end);

    tokens
}

/// Fecha o token acumulado e adiciona à lista (se não vazio)
fn flush_token(tokens: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        let index = tokens.len();
        tokens.push(Token {
            text: std::mem::take(text),
            start,
            end,
            index,
        });
    }
}
