use rustyline::{
    completion::{Candidate, Completer},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Helper,
};
use std::{
    env,
    time::{Duration, Instant},
};

// hints must never hold up typing
const HINT_TIME_LIMIT: Duration = Duration::from_millis(20);
const MAX_HINT_LEN: usize = 50;

pub struct HintInterrupt {
    start: Instant,
    duration: Duration,
}

impl cowint_core::Interrupt for HintInterrupt {
    fn should_interrupt(&self) -> bool {
        Instant::now().duration_since(self.start) >= self.duration
    }
}

impl Default for HintInterrupt {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            duration: HINT_TIME_LIMIT,
        }
    }
}

/// Shows the value of the current line as a hint while typing.
///
/// Hints are evaluated on a copy of the REPL's variables, so assignments
/// typed so far don't take effect until the line is submitted.
pub struct CowintHelper {
    ctx: cowint_core::Context,
    live: bool,
}

impl CowintHelper {
    pub fn new(ctx: cowint_core::Context) -> Self {
        Self {
            ctx,
            live: enable_live_output(),
        }
    }

    fn hint_for(&self, line: &str, int: &impl cowint_core::Interrupt) -> Option<String> {
        let mut ctx = self.ctx.clone();
        let result = cowint_core::evaluate_with_interrupt(line, &mut ctx, int).ok()?;
        let res = result.get_main_result();
        if res.is_empty() || res.len() > MAX_HINT_LEN || res.trim() == line.trim() {
            None
        } else {
            Some(format!("\n{}", res))
        }
    }
}

impl Hinter for CowintHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if !self.live {
            return None;
        }
        self.hint_for(line, &HintInterrupt::default())
    }
}

impl Highlighter for CowintHelper {}

impl Validator for CowintHelper {}

pub struct CowintCandidate {}
impl Candidate for CowintCandidate {
    fn display(&self) -> &str {
        ""
    }
    fn replacement(&self) -> &str {
        ""
    }
}

impl Completer for CowintHelper {
    type Candidate = CowintCandidate;
}

impl Helper for CowintHelper {}

fn enable_live_output() -> bool {
    env::var_os("COWINT_LIVE").is_some()
}
