//! Decode helpers: extracting native values from configuration cells.
//!
//! None of these raise on a shape mismatch. A mismatch is expected when
//! the configuration is in a non-normal form (a stuck run leaves cells
//! half-evaluated), so every helper reports "value not meaningfully
//! present" as `None` and leaves escalation to the caller.

use crate::Term;

/// Sort name of string tokens.
pub const SORT_STRING: &str = "String";
/// Sort name of integer tokens.
pub const SORT_INT: &str = "Int";
/// Associative concatenation label of the builtin `List`.
pub const LIST_LABEL: &str = "_List_";
/// Unary wrapper label around each `List` element.
pub const LIST_ITEM_LABEL: &str = "ListItem";

/// The value of a `String`-sorted token, with the one leading and one
/// trailing quote of its lexical form stripped. `None` for any other term.
pub fn as_string(term: &Term) -> Option<String> {
    match term {
        Term::Token { sort, text } if sort == SORT_STRING => {
            let inner = text.strip_prefix('"')?.strip_suffix('"')?;
            Some(inner.to_string())
        }
        _ => None,
    }
}

/// The value of an `Int`-sorted token, parsed base-10. `None` for any
/// other term or unparseable text.
pub fn as_int(term: &Term) -> Option<i64> {
    match term {
        Term::Token { sort, text } if sort == SORT_INT => text.parse().ok(),
        _ => None,
    }
}

/// Fully unroll a `_List_` concatenation into its elements, preserving
/// left-to-right order. A non-concatenation term is itself one element
/// (in particular, the empty-list constructor `.List` comes back as an
/// element and is dropped later by [`string_list`]).
pub fn flatten_list(term: &Term) -> Vec<&Term> {
    let mut items = Vec::new();
    collect_list(term, &mut items);
    items
}

fn collect_list<'a>(term: &'a Term, items: &mut Vec<&'a Term>) {
    match term {
        Term::Apply { label, args } if label == LIST_LABEL => {
            for arg in args {
                collect_list(arg, items);
            }
        }
        _ => items.push(term),
    }
}

/// The string payload of a `ListItem(_)` element. `None` for any other
/// shape, including a `ListItem` whose payload is not a string token.
pub fn list_item_to_string(item: &Term) -> Option<String> {
    match item {
        Term::Apply { label, args } if label == LIST_ITEM_LABEL && args.len() == 1 => {
            as_string(&args[0])
        }
        _ => None,
    }
}

/// Map [`list_item_to_string`] over the elements, silently discarding
/// everything that does not decode. Best-effort by design: auxiliary
/// structural noise in the errors cell is expected, not an error.
pub fn string_list<'a>(items: impl IntoIterator<Item = &'a Term>) -> Vec<String> {
    items.into_iter().filter_map(list_item_to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_item(value: &str) -> Term {
        Term::apply(LIST_ITEM_LABEL, vec![Term::string_token(value)])
    }

    #[test]
    fn test_as_string() {
        assert_eq!(
            as_string(&Term::string_token("hello")).as_deref(),
            Some("hello")
        );
        // Only the outermost quotes are stripped.
        assert_eq!(
            as_string(&Term::token(SORT_STRING, "\"\\\"x\\\"\"")).as_deref(),
            Some("\\\"x\\\"")
        );
    }

    #[test]
    fn test_as_string_mismatch() {
        assert_eq!(as_string(&Term::int_token(5)), None);
        assert_eq!(as_string(&Term::empty_sequence()), None);
        assert_eq!(as_string(&Term::apply("foo", vec![])), None);
    }

    #[test]
    fn test_as_int() {
        assert_eq!(as_int(&Term::int_token(42)), Some(42));
        assert_eq!(as_int(&Term::int_token(-7)), Some(-7));
        assert_eq!(as_int(&Term::string_token("42")), None);
        assert_eq!(as_int(&Term::apply("foo", vec![])), None);
    }

    #[test]
    fn test_flatten_list_unrolls_nesting() {
        let a = list_item("a");
        let b = list_item("b");
        let c = list_item("c");
        let term = Term::apply(
            LIST_LABEL,
            vec![
                Term::apply(LIST_LABEL, vec![a.clone(), b.clone()]),
                c.clone(),
            ],
        );
        assert_eq!(flatten_list(&term), vec![&a, &b, &c]);
    }

    #[test]
    fn test_flatten_list_singleton() {
        let a = list_item("only");
        assert_eq!(flatten_list(&a), vec![&a]);
    }

    #[test]
    fn test_list_item_to_string() {
        assert_eq!(list_item_to_string(&list_item("x")).as_deref(), Some("x"));
        // Wrong payload, wrong arity, wrong label: all absent.
        assert_eq!(
            list_item_to_string(&Term::apply(LIST_ITEM_LABEL, vec![Term::int_token(1)])),
            None
        );
        assert_eq!(
            list_item_to_string(&Term::apply(
                LIST_ITEM_LABEL,
                vec![Term::string_token("a"), Term::string_token("b")]
            )),
            None
        );
        assert_eq!(
            list_item_to_string(&Term::apply("SetItem", vec![Term::string_token("a")])),
            None
        );
    }

    #[test]
    fn test_string_list_drops_malformed_keeps_order() {
        let items = vec![
            list_item("first"),
            Term::apply(".List", vec![]),
            Term::apply(LIST_ITEM_LABEL, vec![Term::int_token(9)]),
            list_item("second"),
            Term::int_token(0),
            list_item("third"),
        ];
        assert_eq!(
            string_list(&items),
            vec!["first".to_string(), "second".to_string(), "third".to_string()]
        );
    }

    #[test]
    fn test_string_list_empty() {
        assert_eq!(string_list(&Vec::<Term>::new()), Vec::<String>::new());
    }
}
