//! The executor seam

use crate::action::{ActionArgs, ActionResult};
use crate::error::Result;

/// Performs one concrete package operation.
pub trait Executor {
    fn execute(&self, args: ActionArgs) -> Result<ActionResult>;
}

impl<F> Executor for F
where
    F: Fn(ActionArgs) -> Result<ActionResult>,
{
    fn execute(&self, args: ActionArgs) -> Result<ActionResult> {
        self(args)
    }
}
