/// Export of word pools to other random-table formats.

use std::fmt::Write;

use crate::core::pool::WordPool;

/// Render a pool as Abulafia random tables.
///
/// Each category becomes a `;name` table header followed by one
/// equally-weighted `1,word` row per candidate and a blank line.
/// Categories and rows are sorted.
pub fn to_abulafia(pool: &WordPool) -> String {
    let mut out = String::new();
    for category in pool.categories() {
        let _ = writeln!(out, ";{}", category);
        for word in pool.candidates(category).unwrap_or_default() {
            let _ = writeln!(out, "1,{}", word);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::word_list::WordSource;

    #[test]
    fn abulafia_tables() {
        let pool = WordPool::merge([WordSource::new()
            .with("people", &["wizard", "chef"])
            .with("adjectives", &["old"])
            .with("items", &[])]);
        assert_eq!(
            to_abulafia(&pool),
            ";adjectives\n1,old\n\n;items\n\n;people\n1,chef\n1,wizard\n\n"
        );
    }

    #[test]
    fn abulafia_empty_pool() {
        assert_eq!(to_abulafia(&WordPool::new()), "");
    }
}
