//! Thin gateway to the SBI firmware.
//!
//! Nothing here makes decisions: every call is a single synchronous `ecall`
//! and the outcome is handed back untouched.

use num_enum::TryFromPrimitive;

use crate::error::SbiError;

/// SBI extensions the loader probes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Extension {
    /// Hart State Management.
    Hsm = 0x0048_534D,
}

/// `sbi_hart_get_status` states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(usize)]
pub enum HartState {
    Started = 0,
    Stopped = 1,
    StartPending = 2,
    StopPending = 3,
    Suspended = 4,
    SuspendPending = 5,
    ResumePending = 6,
}

pub trait Firmware {
    /// Returns the probe value; nonzero means the extension is available.
    fn probe_extension(&self, extension: Extension) -> Result<usize, SbiError>;

    /// Asks the firmware to start `hart_id` at `entry` with `opaque` in `a1`.
    fn hart_start(&self, hart_id: usize, entry: usize, opaque: usize) -> Result<(), SbiError>;

    /// Stops the calling hart. Only returns if the firmware refused.
    fn hart_stop(&self) -> Result<(), SbiError>;

    fn hart_status(&self, hart_id: usize) -> Result<HartState, SbiError>;

    fn console_putchar(&self, c: u8);
}

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub use self::rt::{SbiFirmware, SBI};

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
mod rt {
    use super::{Extension, Firmware, HartState};
    use crate::error::SbiError;
    use sbi_rt::SbiRet;

    pub struct SbiFirmware;

    pub static SBI: SbiFirmware = SbiFirmware;

    fn into_result(ret: SbiRet) -> Result<usize, SbiError> {
        if ret.error == 0 {
            Ok(ret.value)
        } else {
            Err(SbiError::from_code(ret.error as isize))
        }
    }

    impl Firmware for SbiFirmware {
        fn probe_extension(&self, extension: Extension) -> Result<usize, SbiError> {
            // sbi-rt only surfaces availability; the base extension has no
            // failure mode of its own.
            let info = match extension {
                Extension::Hsm => sbi_rt::probe_extension(sbi_rt::Hsm),
            };
            Ok(usize::from(!info.is_unavailable()))
        }

        fn hart_start(&self, hart_id: usize, entry: usize, opaque: usize) -> Result<(), SbiError> {
            into_result(sbi_rt::hart_start(hart_id, entry, opaque)).map(|_| ())
        }

        fn hart_stop(&self) -> Result<(), SbiError> {
            into_result(sbi_rt::hart_stop()).map(|_| ())
        }

        fn hart_status(&self, hart_id: usize) -> Result<HartState, SbiError> {
            let raw = into_result(sbi_rt::hart_get_status(hart_id))?;
            HartState::try_from(raw).map_err(|_| SbiError::Failed)
        }

        #[allow(deprecated)]
        fn console_putchar(&self, c: u8) {
            sbi_rt::legacy::console_putchar(c as usize);
        }
    }
}

#[cfg(test)]
pub mod mock {
    use std::{cell::RefCell, vec::Vec};

    use super::{Extension, Firmware, HartState};
    use crate::error::SbiError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Probe(Extension),
        HartStart {
            hart_id: usize,
            entry: usize,
            opaque: usize,
        },
        HartStop,
        HartStatus(usize),
    }

    /// Records every gateway call and answers with scripted results.
    pub struct MockFirmware {
        pub probe: Result<usize, SbiError>,
        pub start: Result<(), SbiError>,
        pub stop: Result<(), SbiError>,
        pub status: Result<HartState, SbiError>,
        pub calls: RefCell<Vec<Call>>,
        pub console: RefCell<Vec<u8>>,
    }

    impl MockFirmware {
        pub fn with_hsm() -> Self {
            Self {
                probe: Ok(1),
                start: Ok(()),
                stop: Err(SbiError::Failed),
                status: Ok(HartState::Started),
                calls: RefCell::new(Vec::new()),
                console: RefCell::new(Vec::new()),
            }
        }

        pub fn without_hsm() -> Self {
            Self {
                probe: Ok(0),
                ..Self::with_hsm()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn start_requests(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::HartStart { .. }))
                .count()
        }
    }

    impl Firmware for MockFirmware {
        fn probe_extension(&self, extension: Extension) -> Result<usize, SbiError> {
            self.calls.borrow_mut().push(Call::Probe(extension));
            self.probe
        }

        fn hart_start(&self, hart_id: usize, entry: usize, opaque: usize) -> Result<(), SbiError> {
            self.calls.borrow_mut().push(Call::HartStart {
                hart_id,
                entry,
                opaque,
            });
            self.start
        }

        fn hart_stop(&self) -> Result<(), SbiError> {
            self.calls.borrow_mut().push(Call::HartStop);
            self.stop
        }

        fn hart_status(&self, hart_id: usize) -> Result<HartState, SbiError> {
            self.calls.borrow_mut().push(Call::HartStatus(hart_id));
            self.status
        }

        fn console_putchar(&self, c: u8) {
            self.console.borrow_mut().push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsm_extension_id_spells_hsm() {
        let eid = u32::from_be_bytes([0, b'H', b'S', b'M']) as usize;
        assert_eq!(Extension::Hsm as usize, eid);
    }

    #[test]
    fn hart_states_decode() {
        assert_eq!(HartState::try_from(0usize).ok(), Some(HartState::Started));
        assert_eq!(HartState::try_from(2usize).ok(), Some(HartState::StartPending));
        assert!(HartState::try_from(7usize).is_err());
    }
}
