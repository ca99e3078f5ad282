//! Ordered text transformation steps.
//!
//! Every rewrite the Markdown and HTML stages perform is a named pure
//! function from text to text. A [`Pipeline`] folds its input through a
//! fixed slice of steps, each step seeing the cumulative output of the
//! steps before it.

use tracing::trace;

/// Named text rewrite.
#[derive(Clone, Copy)]
pub struct Step {
    name: &'static str,
    apply: fn(&str) -> String,
}

impl Step {
    /// Creates a step from a name and a rewrite function.
    pub const fn new(name: &'static str, apply: fn(&str) -> String) -> Self {
        Self { name, apply }
    }

    /// Step name, used in trace output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies the rewrite to `input`.
    pub fn apply(&self, input: &str) -> String {
        (self.apply)(input)
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Step").field(&self.name).finish()
    }
}

/// Fixed ordered sequence of steps.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    steps: &'static [Step],
}

impl Pipeline {
    /// Creates pipeline over a static step list.
    pub const fn new(steps: &'static [Step]) -> Self {
        Self { steps }
    }

    /// Runs every step in order over `input`.
    pub fn run(&self, input: &str) -> String {
        run_steps(self.steps.iter(), input)
    }
}

/// Folds `input` through `steps` in iteration order.
///
/// Used directly when the step list depends on runtime context, such as
/// repository specific rules in the HTML post-processor.
pub fn run_steps<'a>(steps: impl IntoIterator<Item = &'a Step>, input: &str) -> String {
    steps.into_iter().fold(input.to_string(), |text, step| {
        let next = step.apply(&text);
        if next != text {
            trace!(step = step.name(), "step rewrote text");
        }
        next
    })
}
