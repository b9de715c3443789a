mod ctx;
mod error;
mod num;
mod pool;
mod random;
mod result;
mod stringify;

use crate::config::RollConfig;
use crate::parse::ast;

pub(crate) type RResult<T> = Result<T, EvalError>;

pub use ctx::RollContext;
pub use error::{Ceiling, EvalError};
pub use num::Number;
pub use pool::Pool;
pub use random::{MaxSource, RandomSource, ScriptedSource};
pub use result::{DiceGroup, DieDraw, DieStatus, RollResult};
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};

/// Evaluates `ast` with the default [`RollConfig`].
pub fn evaluate<R: RandomSource + ?Sized>(ast: &ast::Node, source: &mut R) -> RResult<RollResult> {
    evaluate_with(ast, source, &RollConfig::default())
}

pub fn evaluate_with<R: RandomSource + ?Sized>(
    ast: &ast::Node,
    source: &mut R,
    config: &RollConfig,
) -> RResult<RollResult> {
    RollContext::new(source, *config).eval(ast)
}
