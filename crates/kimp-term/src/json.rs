//! kast-JSON wire format.
//!
//! The K tools emit and accept terms as JSON (`krun --output json`,
//! `kast --input json`). This module converts between that format and
//! [`Term`]. Node kinds outside the `Term` sum (`KVariable`, `KRewrite`,
//! ...) cannot occur in a concrete final configuration and are rejected
//! at deserialization.

use crate::Term;
use serde::{Deserialize, Serialize};

const KAST_FORMAT: &str = "KAST";
const KAST_VERSION: u64 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct KastDocument {
    format: String,
    version: u64,
    term: KastNode,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "node")]
enum KastNode {
    KToken {
        token: String,
        sort: KastSort,
    },
    KApply {
        label: KastLabel,
        arity: usize,
        args: Vec<KastNode>,
    },
    KSequence {
        arity: usize,
        items: Vec<KastNode>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "node")]
enum KastSort {
    KSort { name: String },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "node")]
enum KastLabel {
    KLabel {
        name: String,
        #[serde(default)]
        params: Vec<KastSort>,
    },
}

impl From<&Term> for KastNode {
    fn from(term: &Term) -> Self {
        match term {
            Term::Token { sort, text } => KastNode::KToken {
                token: text.clone(),
                sort: KastSort::KSort { name: sort.clone() },
            },
            Term::Apply { label, args } => KastNode::KApply {
                label: KastLabel::KLabel {
                    name: label.clone(),
                    params: Vec::new(),
                },
                arity: args.len(),
                args: args.iter().map(KastNode::from).collect(),
            },
            Term::Sequence(items) => KastNode::KSequence {
                arity: items.len(),
                items: items.iter().map(KastNode::from).collect(),
            },
        }
    }
}

impl From<KastNode> for Term {
    fn from(node: KastNode) -> Self {
        match node {
            KastNode::KToken {
                token,
                sort: KastSort::KSort { name },
            } => Term::Token {
                sort: name,
                text: token,
            },
            KastNode::KApply {
                label: KastLabel::KLabel { name, .. },
                args,
                ..
            } => Term::Apply {
                label: name,
                args: args.into_iter().map(Term::from).collect(),
            },
            KastNode::KSequence { items, .. } => {
                Term::Sequence(items.into_iter().map(Term::from).collect())
            }
        }
    }
}

/// Serialize a term as a kast-JSON document.
pub fn term_to_json(term: &Term) -> Result<String, serde_json::Error> {
    serde_json::to_string(&KastDocument {
        format: KAST_FORMAT.to_string(),
        version: KAST_VERSION,
        term: KastNode::from(term),
    })
}

/// Deserialize a kast-JSON document into a term.
pub fn term_from_json(text: &str) -> Result<Term, serde_json::Error> {
    let doc: KastDocument = serde_json::from_str(text)?;
    Ok(Term::from(doc.term))
}
