use rusqlite::types::Value as SqlValue;

/// The lookups the SQLite store can answer from its indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup<'a> {
    All,
    /// Lowercased name prefix, answered as a range scan on `name_lower`.
    NamePrefix(&'a str),
    /// Exact series label, answered from `item_series`.
    SeriesLabel(&'a str),
    Id(&'a str),
}

/// Compiled SQL query fragment with bound parameters.
pub(crate) struct CompiledQuery {
    pub where_clause: String,
    pub params: Vec<SqlValue>,
    pub order_clause: &'static str,
}

/// Translate a lookup into SQL fragments.
pub(crate) fn compile_lookup(lookup: &Lookup<'_>) -> CompiledQuery {
    let mut params = Vec::new();
    let where_clause = match *lookup {
        Lookup::All => String::new(),
        Lookup::NamePrefix("") => String::new(),
        Lookup::NamePrefix(prefix) => {
            params.push(SqlValue::Text(prefix.to_string()));
            match prefix_upper_bound(prefix) {
                Some(upper) => {
                    params.push(SqlValue::Text(upper));
                    "WHERE name_lower >= ? AND name_lower < ?".to_string()
                }
                None => "WHERE name_lower >= ?".to_string(),
            }
        }
        Lookup::SeriesLabel(label) => {
            params.push(SqlValue::Text(label.to_string()));
            "WHERE id IN (SELECT item_id FROM item_series WHERE label = ?)".to_string()
        }
        Lookup::Id(id) => {
            params.push(SqlValue::Text(id.to_string()));
            "WHERE id = ?".to_string()
        }
    };

    CompiledQuery {
        where_clause,
        params,
        order_clause: "ORDER BY position",
    }
}

/// Smallest string greater than every string starting with `prefix`.
///
/// Bumps the last character that has a successor, dropping the ones after
/// it. `None` when no such bound exists (every character is `char::MAX`).
pub(crate) fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = char_successor(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

fn char_successor(c: char) -> Option<char> {
    match c {
        char::MAX => None,
        // Skip the surrogate block, which has no `char` values.
        '\u{D7FF}' => Some('\u{E000}'),
        _ => char::from_u32(c as u32 + 1),
    }
}
