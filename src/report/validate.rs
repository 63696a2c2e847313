use std::sync::LazyLock;

use regex::Regex;

/// Minimum number of characters in a well-formed contract ID.
pub const MIN_CONTRACT_ID_LEN: usize = 6;

static CONTRACT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.-]{6,}$").expect("contract id pattern compiles")
});

/// Syntactic check for a contract ID: 6+ ASCII letters, digits, dots or dashes.
///
/// This does not look the ID up anywhere. It only gates the submit controls so
/// an empty or obviously malformed identifier cannot be sent.
pub fn is_valid_contract_id(contract_id: &str) -> bool {
    CONTRACT_ID.is_match(contract_id)
}

/// Explain why a contract ID fails [`is_valid_contract_id`]. `None` when it passes.
pub fn contract_id_error(contract_id: &str) -> Option<String> {
    if is_valid_contract_id(contract_id) {
        return None;
    }
    if contract_id.is_empty() {
        return Some("El ID del contrato es obligatorio".to_string());
    }
    if !contract_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Some(
            "El ID del contrato solo puede contener letras, números, puntos y guiones".to_string(),
        );
    }
    Some(format!(
        "El ID del contrato debe tener al menos {MIN_CONTRACT_ID_LEN} caracteres"
    ))
}
