//! Tree validation utilities.
//!
//! Findings are reported as [`Diagnostic`]s rather than errors: none of them
//! stops generation, but each one points at output that will be surprising
//! (an overwritten file, a reused header guard).

use crate::types::Root;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A suspicious construct found in a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The same class name is declared more than once.
    DuplicateClass {
        /// Class name.
        name: String,
        /// Number of declarations.
        count: usize,
    },
    /// Two distinct class names are equal after case folding.
    CaseCollision {
        /// First name seen.
        first: String,
        /// Colliding name.
        second: String,
    },
    /// Two arguments of one prototype share a name.
    DuplicateArgument {
        /// Owning class.
        class: String,
        /// Function name.
        function: String,
        /// Argument name.
        argument: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateClass { name, count } => {
                write!(f, "class '{name}' is declared {count} times")
            }
            Self::CaseCollision { first, second } => write!(
                f,
                "classes '{first}' and '{second}' differ only by case and share a header guard"
            ),
            Self::DuplicateArgument {
                class,
                function,
                argument,
            } => write!(
                f,
                "argument '{argument}' appears twice in {class}::{function}"
            ),
        }
    }
}

/// Validates a parsed tree.
///
/// # Arguments
/// * `root` - The tree to validate
///
/// # Returns
/// Every finding, in declaration order. An empty list means the tree is clean.
#[must_use]
pub fn validate(root: &Root) -> Vec<Diagnostic> {
    let mut diagnostics = validate_class_names(root);
    diagnostics.extend(validate_arguments(root));
    diagnostics
}

/// Checks class names for exact and case-folded duplicates.
fn validate_class_names(root: &Root) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    let mut folded: HashMap<String, &str> = HashMap::new();

    for class in &root.classes {
        let count = counts.entry(class.name.as_str()).or_insert(0);
        *count += 1;
        if *count == 1 {
            order.push(class.name.as_str());
        }

        let key = class.name.to_uppercase();
        match folded.get(&key) {
            Some(&first) if first != class.name => diagnostics.push(Diagnostic::CaseCollision {
                first: first.to_string(),
                second: class.name.clone(),
            }),
            Some(_) => {}
            None => {
                folded.insert(key, class.name.as_str());
            }
        }
    }

    for name in order {
        let count = counts[name];
        if count > 1 {
            diagnostics.push(Diagnostic::DuplicateClass {
                name: name.to_string(),
                count,
            });
        }
    }

    diagnostics
}

/// Checks every prototype for repeated argument names.
fn validate_arguments(root: &Root) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for class in &root.classes {
        for function in class.functions() {
            let mut seen = HashSet::new();
            for arg in function.args.iter().filter(|a| !a.name.is_empty()) {
                if !seen.insert(arg.name.as_str()) {
                    diagnostics.push(Diagnostic::DuplicateArgument {
                        class: class.name.clone(),
                        function: function.name.clone(),
                        argument: arg.name.clone(),
                    });
                }
            }
        }
    }

    diagnostics
}
