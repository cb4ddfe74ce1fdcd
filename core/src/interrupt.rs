use crate::error::CowintError;

/// Polled by long-running operations. Returning `true` aborts the
/// computation with [`CowintError::Interrupted`].
pub trait Interrupt {
	fn should_interrupt(&self) -> bool;
}

pub(crate) fn test_int<I: Interrupt>(int: &I) -> Result<(), CowintError> {
	if int.should_interrupt() {
		Err(CowintError::Interrupted)
	} else {
		Ok(())
	}
}

#[derive(Default)]
pub(crate) struct Never {}
impl Interrupt for Never {
	fn should_interrupt(&self) -> bool {
		false
	}
}
