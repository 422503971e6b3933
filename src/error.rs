use core::fmt;

use num_enum::TryFromPrimitive;

/// Standard SBI error codes, as returned in `a0` by an `ecall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(isize)]
pub enum SbiError {
    Failed = -1,
    NotSupported = -2,
    InvalidParam = -3,
    Denied = -4,
    InvalidAddress = -5,
    AlreadyAvailable = -6,
    AlreadyStarted = -7,
    AlreadyStopped = -8,
    NoSharedMemory = -9,
}

impl SbiError {
    /// Codes outside the standard set are reported as `Failed`.
    pub fn from_code(code: isize) -> Self {
        SbiError::try_from(code).unwrap_or(SbiError::Failed)
    }
}

impl fmt::Display for SbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SbiError::Failed => "failed",
            SbiError::NotSupported => "not supported",
            SbiError::InvalidParam => "invalid parameter",
            SbiError::Denied => "denied",
            SbiError::InvalidAddress => "invalid address",
            SbiError::AlreadyAvailable => "already available",
            SbiError::AlreadyStarted => "already started",
            SbiError::AlreadyStopped => "already stopped",
            SbiError::NoSharedMemory => "no shared memory",
        };
        write!(f, "{} ({})", msg, *self as isize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_convert() {
        assert_eq!(SbiError::from_code(-2), SbiError::NotSupported);
        assert_eq!(SbiError::from_code(-7), SbiError::AlreadyStarted);
    }

    #[test]
    fn unknown_codes_are_failed() {
        assert_eq!(SbiError::from_code(-1000), SbiError::Failed);
        assert_eq!(SbiError::from_code(3), SbiError::Failed);
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(
            format!("{}", SbiError::AlreadyStarted),
            "already started (-7)"
        );
    }
}
