//! Execution context threaded through inference and evaluation.
//!
//! Device placement is explicit: every evaluator receives an
//! [`ExecutionContext`] instead of probing for an accelerator at load time, so
//! tests run the same way on any machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where model state and batches live during inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Device {
    /// Host CPU
    #[default]
    Cpu,
    /// Accelerator selected by ordinal
    Accelerator {
        #[serde(default)]
        ordinal: usize,
    },
}

impl Device {
    /// Check if this is the host CPU
    pub fn is_cpu(&self) -> bool {
        matches!(self, Self::Cpu)
    }

    /// Check if this is an accelerator
    pub fn is_accelerator(&self) -> bool {
        matches!(self, Self::Accelerator { .. })
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Accelerator { ordinal } => write!(f, "accelerator:{ordinal}"),
        }
    }
}

/// Execution context for one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionContext {
    device: Device,
}

impl ExecutionContext {
    /// Create a context targeting the given device
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    /// CPU-only context
    pub fn cpu() -> Self {
        Self::new(Device::Cpu)
    }

    /// Target device
    pub fn device(&self) -> Device {
        self.device
    }
}
