use log::{info, warn};

use crate::{context::HartBootContext, cpu, sbi::Firmware};

/// Terminal state for a hart that is not needed. Asks the firmware to stop
/// the hart; if that comes back, spins on `wfi` forever.
pub fn park<F: Firmware>(firmware: &F, ctx: &HartBootContext) -> ! {
    request_stop(firmware, ctx);
    cpu::wait_forever()
}

/// The firmware half of [`park`]. Only returns if the hart is still running.
pub fn request_stop<F: Firmware>(firmware: &F, ctx: &HartBootContext) {
    match ctx.logical_id {
        Some(id) => info!("hart {}: parking, logical id {}", ctx.physical_id, id),
        None => info!("hart {}: parking", ctx.physical_id),
    }

    match firmware.hart_stop() {
        Ok(()) => warn!("hart {}: hart_stop returned", ctx.physical_id),
        Err(err) => warn!("hart {}: hart_stop failed: {}", ctx.physical_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::LogicalId,
        error::SbiError,
        sbi::mock::{Call, MockFirmware},
    };

    #[test]
    fn stop_is_requested_even_if_it_returns() {
        let fw = MockFirmware {
            stop: Ok(()),
            ..MockFirmware::with_hsm()
        };
        let mut ctx = HartBootContext::new(3, 0x8700_0000);
        ctx.logical_id = Some(LogicalId(2));

        request_stop(&fw, &ctx);
        assert_eq!(fw.calls(), [Call::HartStop]);
    }

    #[test]
    fn failed_stop_is_requested_once() {
        let fw = MockFirmware {
            stop: Err(SbiError::NotSupported),
            ..MockFirmware::without_hsm()
        };
        let ctx = HartBootContext::new(40, 0x8700_0000);

        request_stop(&fw, &ctx);
        assert_eq!(fw.calls(), [Call::HartStop]);
    }
}
