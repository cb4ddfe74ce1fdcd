use crate::error::CowintError;

pub(crate) type CowintResult<T> = Result<T, CowintError>;
