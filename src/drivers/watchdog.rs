//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the control loop stops feeding it for longer than
//! the configured timeout. The timeout must exceed the longest blocking
//! tone plus the reversal pause.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Self {
        // SAFETY: TWDT calls take a config by reference and the current
        // task handle (null); called once from the main task.
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK as i32 {
                warn!("TWDT reconfigure returned {} (may already be configured)", ret);
            }

            let subscribed = esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK as i32;
            if subscribed {
                info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
            } else {
                warn!("Watchdog: failed to subscribe");
            }
            Self { timeout_ms, subscribed }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Self {
        info!("Watchdog(sim): no-op ({} ms)", timeout_ms);
        Self { timeout_ms }
    }

    /// Feed the watchdog. Called once per loop iteration.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: resets the TWDT for the subscribed calling task.
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}
