// src/utils/mod.rs
pub mod error;
pub mod logging;

pub use error::AppError; // Re-export main error type for convenience

/// Turns a source file stem like `hdfc_bank_q3` into a display company
/// name like `Hdfc Bank Q3` (underscores to spaces, each word
/// capitalized). The company name keys every record from a document.
pub fn company_name_from_stem(stem: &str) -> String {
    stem.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_name_title_cases_stem() {
        assert_eq!(company_name_from_stem("hdfc_bank"), "Hdfc Bank");
        assert_eq!(company_name_from_stem("ACME_corp"), "Acme Corp");
        assert_eq!(company_name_from_stem("tesla"), "Tesla");
    }
}
