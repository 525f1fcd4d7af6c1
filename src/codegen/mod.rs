//! Code generation: Python emission from the checked parse tree.

mod py_emitter;

pub use py_emitter::PyEmitter;

use thiserror::Error;

/// An internal inconsistency encountered while emitting output. These only
/// arise from trees that bypass the parser's structural guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("translation failure: {0}")]
pub struct TranslationFailure(pub String);
