use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Scoped single-operation lock over a router's `locked` flag.
///
/// The flag is cleared when the guard drops, so every exit path of the
/// distribution (success, failed leg, early `?`) releases it.
pub struct OperationLock<'a> {
    held: &'a mut bool,
}

impl<'a> OperationLock<'a> {
    pub fn acquire(flag: &'a mut bool) -> Result<Self> {
        require!(!*flag, ErrorCode::ReentrantCall);
        *flag = true;
        Ok(Self { held: flag })
    }
}

impl Drop for OperationLock<'_> {
    fn drop(&mut self) {
        *self.held = false;
    }
}
