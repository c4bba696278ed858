use super::super::traits::SqlGenerator;

/// Reference dialect: ANSI double-quoted identifiers, `?` placeholders, no
/// function translation or limit emulation. Identifiers are left unquoted
/// unless the caller turns auto-quoting on.
pub struct StandardGenerator;

impl SqlGenerator for StandardGenerator {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "true".to_string() } else { "false".to_string() }
    }

    fn auto_quote_identifiers(&self) -> bool {
        false
    }
}
