//! Placeholder extraction for unique text.
//!
//! Unique strings use two bracket styles:
//! - `[...]` marks a parameter of the clause it appears in
//! - `<...>` marks a trailing conditional clause
//!
//! A bracket without a partner (or a nested opening bracket) is left alone as literal
//! text. Nothing in here fails; malformed input simply yields fewer parameters.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker that replaces each parameter in a placeholder pattern.
pub const PARAM_MARKER: &str = "[]";

lazy_static! {
    static ref SQUARE_BRACES: Regex = Regex::new(r"\[([^\[\]]*)\]").expect("static regex");
    static ref POINTY_BRACES: Regex = Regex::new(r"<([^<>]*)>").expect("static regex");
}

/// Strip every `<conditional>` from `text` and tidy the whitespace left behind.
pub fn remove_conditionals(text: &str) -> String {
    let stripped = POINTY_BRACES.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into its main clause and the inner texts of its conditionals, in order.
pub fn split_conditionals(text: &str) -> (String, Vec<String>) {
    (remove_conditionals(text), conditional_texts(text))
}

/// Inner text of every `<conditional>` in `text`, in declaration order.
pub fn conditional_texts(text: &str) -> Vec<String> {
    POINTY_BRACES
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Placeholder pattern of the main clause: parameters blanked, conditionals removed.
pub fn placeholder_text(text: &str) -> String {
    clause_parts(&remove_conditionals(text)).0
}

/// Parameters of the main clause, in order. Conditional parameters are not included.
pub fn placeholder_parameters(text: &str) -> Vec<String> {
    clause_parts(&remove_conditionals(text)).1
}

/// Both halves of the extraction at once.
pub fn extract(text: &str) -> (String, Vec<String>) {
    clause_parts(&remove_conditionals(text))
}

/// Pattern and parameters of a clause that has no `<conditional>` left in it,
/// such as the main clause returned by [`split_conditionals`].
pub fn clause_parts(clause: &str) -> (String, Vec<String>) {
    let params = SQUARE_BRACES
        .captures_iter(clause)
        .map(|caps| caps[1].to_string())
        .collect();
    (SQUARE_BRACES.replace_all(clause, PARAM_MARKER).into_owned(), params)
}

/// Rebuild unique text from a placeholder pattern by filling its markers in order.
///
/// Markers without a matching parameter stay as `[]`; surplus parameters are dropped.
pub fn fill_placeholders(pattern: &str, params: &[String]) -> String {
    let mut filled = String::with_capacity(pattern.len() + params.iter().map(String::len).sum::<usize>());
    let mut params = params.iter();
    let mut pieces = pattern.split(PARAM_MARKER).peekable();
    while let Some(piece) = pieces.next() {
        filled.push_str(piece);
        if pieces.peek().is_none() {
            break;
        }
        filled.push('[');
        if let Some(param) = params.next() {
            filled.push_str(param);
        }
        filled.push(']');
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_pattern_and_params_without_conditionals() {
        let text = "[+1 Gold] [in this city] <after discovering [Currency]>";
        assert_eq!(placeholder_text(text), "[] []");
        assert_eq!(placeholder_parameters(text), vec!["+1 Gold", "in this city"]);
    }

    #[test]
    fn conditionals_are_returned_in_order() {
        let (main, conditionals) =
            split_conditionals("[+15]% Strength <when attacking> <vs [Mounted] units>  <when at war>");
        assert_eq!(main, "[+15]% Strength");
        assert_eq!(conditionals, vec!["when attacking", "vs [Mounted] units", "when at war"]);
    }

    #[test]
    fn text_without_brackets_is_its_own_pattern() {
        let (pattern, params) = extract("Free Technology");
        assert_eq!(pattern, "Free Technology");
        assert!(params.is_empty());
    }

    #[test]
    fn unmatched_brackets_are_literal() {
        let (pattern, params) = extract("Gain [5 Gold");
        assert_eq!(pattern, "Gain [5 Gold");
        assert!(params.is_empty());

        let (pattern, params) = extract("[a [b] c]");
        assert_eq!(pattern, "[a [] c]");
        assert_eq!(params, vec!["b"]);

        assert_eq!(remove_conditionals("fewer than <5 units"), "fewer than <5 units");
    }

    #[test]
    fn extraction_is_idempotent_through_fill() {
        for text in [
            "[+2 Food] from [Grassland] tiles [in all cities]",
            "[a [b] c]",
            "Empty [] slot",
            "No params at all",
            "[x] <when at war>",
        ] {
            let (pattern, params) = extract(text);
            let rebuilt = fill_placeholders(&pattern, &params);
            assert_eq!(extract(&rebuilt), (pattern, params), "round trip for {text:?}");
        }
    }

    #[test]
    fn split_main_clause_feeds_clause_parts() {
        let text = "[+1 Gold] [in this city] <after discovering [Currency]>";
        let (main, conditionals) = split_conditionals(text);
        assert_eq!(clause_parts(&main), extract(text));
        assert_eq!(conditionals, vec!["after discovering [Currency]"]);
    }

    #[test]
    fn fill_leaves_missing_markers_blank() {
        assert_eq!(fill_placeholders("[] from []", &["+1 Gold".to_string()]), "[+1 Gold] from []");
    }
}
