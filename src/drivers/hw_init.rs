//! One-shot IR receiver input initialisation.
//!
//! Configures the receiver GPIO as an any-edge interrupt input using raw
//! ESP-IDF sys calls and registers the ISR that feeds
//! [`IR_EDGES`](crate::ir::edges::IR_EDGES). Outputs (PWM, direction and
//! steering pins) are owned by typed `esp-idf-hal` drivers built in
//! `main()`. Called once before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrAddFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrAddFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(_: HwInitError) -> Self {
        Self::Init("IR receiver input")
    }
}

// ── ISR ───────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn ir_edge_isr(_arg: *mut core::ffi::c_void) {
    use crate::ir::edges::{Edge, IR_EDGES};
    use crate::pins;

    // SAFETY: esp_timer_get_time is an RTC counter read and gpio_get_level
    // a register read; both are ISR-safe.
    let at_us = unsafe { esp_timer_get_time() } as u32;
    let high = unsafe { gpio_get_level(pins::IR_RECEIVER_GPIO) } != 0;
    // A full queue drops the edge; the decoder resyncs on the next lead mark.
    let _ = IR_EDGES.push(Edge { at_us, high });
}

/// Configure the receiver pin and hook its any-edge interrupt.
#[cfg(target_os = "espidf")]
pub fn init_ir_input() -> Result<(), HwInitError> {
    use crate::pins;
    use log::info;

    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::IR_RECEIVER_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };

    // SAFETY: called once from main() before the loop starts. The handler
    // is a static function that only pushes to the lock-free edge queue.
    unsafe {
        let ret = gpio_config(&cfg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }

        // ESP_ERR_INVALID_STATE means the service is already installed.
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let ret = gpio_isr_handler_add(pins::IR_RECEIVER_GPIO, Some(ir_edge_isr), core::ptr::null_mut());
        if ret != ESP_OK as i32 {
            return Err(HwInitError::IsrAddFailed(ret));
        }
        gpio_intr_enable(pins::IR_RECEIVER_GPIO);
    }

    info!("hw_init: IR receiver on GPIO{} (any-edge ISR)", pins::IR_RECEIVER_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_ir_input() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): IR input skipped");
    Ok(())
}
