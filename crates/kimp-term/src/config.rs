use crate::Term;
use thiserror::Error;

/// Control (continuation) cell name.
pub const K_CELL: &str = "k";
/// Exit-code cell name. May legitimately be absent (defaults to 0).
pub const EXIT_CODE_CELL: &str = "exit-code";
/// Errors cell name. May legitimately be absent (defaults to empty).
pub const ERRORS_CELL: &str = "errors";

/// Label prefix of the engine's bookkeeping cells (`<generatedTop>`,
/// `<generatedCounter>`, ...), stripped before pretty-printing.
const GENERATED_CELL_PREFIX: &str = "<generated";

/// Synthetic top cell the engine wraps the whole configuration in.
const GENERATED_TOP_LABEL: &str = "<generatedTop>";

/// A structurally required cell was absent from the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing <{cell}> cell in final configuration")]
pub struct MissingCellError {
    pub cell: String,
}

/// A final configuration: the root term of the engine's output, viewed as
/// a collection of named cells.
///
/// Cells are `Apply` nodes whose label is the cell name in angle brackets,
/// each wrapping exactly one content term; cells nest arbitrarily under
/// the top cell. The configuration owns its terms for the duration of one
/// postprocess call and is never retained across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    root: Term,
}

impl Configuration {
    /// Wrap a decoded final-configuration term.
    pub fn new(root: Term) -> Self {
        Self { root }
    }

    /// The underlying configuration term.
    pub fn root(&self) -> &Term {
        &self.root
    }

    /// Look up a named cell and return its content term.
    ///
    /// `name` is the bare cell name (`"k"`, not `"<k>"`). Returns `None`
    /// when the cell is absent; callers pick their own default (exit code
    /// 0, empty error list) and only escalate via [`Self::require_cell`]
    /// when the cell is structurally required.
    pub fn cell(&self, name: &str) -> Option<&Term> {
        let label = format!("<{name}>");
        find_cell(&self.root, &label)
    }

    /// Look up a structurally required cell.
    pub fn require_cell(&self, name: &str) -> Result<&Term, MissingCellError> {
        self.cell(name).ok_or_else(|| MissingCellError {
            cell: name.to_string(),
        })
    }

    /// A copy of this configuration with the engine's bookkeeping cells
    /// removed, leaving only the semantics' own cells for display. The
    /// synthetic `<generatedTop>` wrapper is unwrapped as well.
    pub fn without_generated_cells(&self) -> Configuration {
        let root = match prune_generated(&self.root) {
            Term::Apply { label, mut args } if label == GENERATED_TOP_LABEL && args.len() == 1 => {
                args.remove(0)
            }
            other => other,
        };
        Configuration { root }
    }
}

/// Depth-first search for the cell with the given bracketed label,
/// returning its sole content term.
fn find_cell<'a>(term: &'a Term, label: &str) -> Option<&'a Term> {
    match term {
        Term::Apply {
            label: node_label,
            args,
        } => {
            if node_label == label && args.len() == 1 {
                return Some(&args[0]);
            }
            args.iter().find_map(|arg| find_cell(arg, label))
        }
        Term::Sequence(items) => items.iter().find_map(|item| find_cell(item, label)),
        Term::Token { .. } => None,
    }
}

fn is_generated_cell(term: &Term) -> bool {
    matches!(term, Term::Apply { label, .. } if label.starts_with(GENERATED_CELL_PREFIX))
}

fn prune_generated(term: &Term) -> Term {
    match term {
        Term::Apply { label, args } => Term::Apply {
            label: label.clone(),
            args: args
                .iter()
                .filter(|arg| !is_generated_cell(arg))
                .map(prune_generated)
                .collect(),
        },
        Term::Sequence(items) => Term::Sequence(
            items
                .iter()
                .filter(|item| !is_generated_cell(item))
                .map(prune_generated)
                .collect(),
        ),
        Term::Token { .. } => term.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A final configuration in the shape the engine produces:
    /// `<generatedTop>` wrapping `<T>` wrapping the semantics' cells.
    fn sample_config() -> Configuration {
        Configuration::new(Term::apply(
            "<generatedTop>",
            vec![Term::apply(
                "<T>",
                vec![
                    Term::apply("<k>", vec![Term::empty_sequence()]),
                    Term::apply("<env>", vec![Term::apply(".Map", vec![])]),
                    Term::apply("<exit-code>", vec![Term::int_token(42)]),
                ],
            )],
        ))
    }

    #[test]
    fn test_cell_lookup_nested() {
        let config = sample_config();
        assert_eq!(config.cell("k"), Some(&Term::empty_sequence()));
        assert_eq!(config.cell("exit-code"), Some(&Term::int_token(42)));
    }

    #[test]
    fn test_cell_absent() {
        let config = sample_config();
        assert_eq!(config.cell("errors"), None);
    }

    #[test]
    fn test_require_cell_error() {
        let config = sample_config();
        let err = config.require_cell("errors").unwrap_err();
        assert_eq!(err.cell, "errors");
        assert_eq!(
            format!("{err}"),
            "missing <errors> cell in final configuration"
        );
    }

    #[test]
    fn test_without_generated_cells_unwraps_top() {
        let pruned = sample_config().without_generated_cells();
        match pruned.root() {
            Term::Apply { label, args } => {
                assert_eq!(label, "<T>");
                assert_eq!(args.len(), 3);
            }
            other => panic!("expected <T> root, got {other}"),
        }
    }

    #[test]
    fn test_without_generated_cells() {
        let config = Configuration::new(Term::apply(
            "<T>",
            vec![
                Term::apply("<k>", vec![Term::empty_sequence()]),
                Term::apply("<generatedCounter>", vec![Term::int_token(7)]),
            ],
        ));
        let pruned = config.without_generated_cells();
        assert_eq!(
            pruned.root(),
            &Term::apply("<T>", vec![Term::apply("<k>", vec![Term::empty_sequence()])])
        );
        // Cell access on the original is unaffected.
        assert!(config.cell("generatedCounter").is_some());
    }

    #[test]
    fn test_cell_inside_sequence_content() {
        // A stuck control cell can leave cells wrapped in continuations.
        let config = Configuration::new(Term::apply(
            "<T>",
            vec![Term::sequence(vec![Term::apply(
                "<exit-code>",
                vec![Term::int_token(3)],
            )])],
        ));
        assert_eq!(config.cell("exit-code"), Some(&Term::int_token(3)));
    }
}
