//! Endereços de demonstração, no formato em que chegam de fontes de terceiros.

/// Retorna `(rótulo, endereço, código postal)` para a interface web e os testes.
pub fn demo_addresses() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "Com cidade",
            "Pile Alle 19D, 3. tv. 2000 Frederiksberg",
            "2000",
        ),
        (
            "Apartamento numérico",
            "Fynsgade 10, st. 0001. 6700 Esbjerg",
            "6700",
        ),
        (
            "Cidade composta",
            "Tinghaven 4, 3, tr. 9310 Store Heddinge",
            "9310",
        ),
        (
            "Código postal no fim",
            "Jesper Brochmands Gade 6, 3. th. 2200",
            "2200",
        ),
        ("Sem código postal", "Søvang Alle 27, 1. tv.", "2770"),
        (
            "Ambíguo (rejeitado)",
            "Sundgade 1A, 3. 6400 Sønderborg",
            "6400",
        ),
        ("Vazio", "", "1000"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_addresses_not_empty() {
        let demos = demo_addresses();
        assert!(demos.len() >= 5);
        assert!(demos.iter().all(|(label, _, postal)| !label.is_empty() && !postal.is_empty()));
    }
}
