use cowint_core::{Context, EvalResult, Interrupt};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// conventional status for termination by SIGINT
const EXIT_ON_SECOND_PRESS: i32 = 130;

/// Ctrl-C state shared with the signal handler.
///
/// While a line is being evaluated the terminal is in cooked mode, so Ctrl-C
/// reaches the handler: the first press abandons the evaluation and a second
/// press before it notices exits the process. At the prompt rustyline reads
/// Ctrl-C itself and the handler never runs.
pub struct CtrlCInterrupt {
    pressed: Arc<AtomicBool>,
}

impl Interrupt for CtrlCInterrupt {
    fn should_interrupt(&self) -> bool {
        self.pressed.load(Ordering::Relaxed)
    }
}

impl CtrlCInterrupt {
    pub fn install() -> Self {
        let pressed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pressed);
        let handler = move || {
            if flag.swap(true, Ordering::SeqCst) {
                process::exit(EXIT_ON_SECOND_PRESS);
            }
        };
        if ctrlc::set_handler(handler).is_err() {
            eprintln!("Unable to set Ctrl-C handler");
        }
        Self { pressed }
    }

    /// Evaluates one line, giving up at the next poll once Ctrl-C is pressed.
    /// Presses from before the call are ignored, and the flag is clear again
    /// when it returns.
    pub fn evaluate(&self, line: &str, context: &mut Context) -> Result<EvalResult, String> {
        self.pressed.store(false, Ordering::SeqCst);
        let result = cowint_core::evaluate_with_interrupt(line, context, self);
        self.pressed.store(false, Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::CtrlCInterrupt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn already_pressed() -> CtrlCInterrupt {
        CtrlCInterrupt {
            pressed: Arc::new(AtomicBool::new(true)),
        }
    }

    #[test]
    fn test_stale_press_does_not_cancel_next_line() {
        let int = already_pressed();
        let mut context = cowint_core::Context::new();
        let result = int.evaluate("6 * 7", &mut context).unwrap();
        assert_eq!(result.get_main_result(), "42");
        assert!(!int.pressed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_press_during_evaluation_cancels_it() {
        let int = CtrlCInterrupt {
            pressed: Arc::new(AtomicBool::new(false)),
        };
        let flag = Arc::clone(&int.pressed);
        let presser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::SeqCst);
        });
        let mut context = cowint_core::Context::new();
        let result = int.evaluate("x = factorial(200000)", &mut context);
        presser.join().unwrap();
        assert_eq!(result, Err("interrupted".to_string()));
        assert!(context.get_variable("x").is_none());
        // the next line runs normally
        assert!(!int.pressed.load(Ordering::SeqCst));
        let result = int.evaluate("1 + 1", &mut context).unwrap();
        assert_eq!(result.get_main_result(), "2");
    }
}
