//! NFC hardware collaborator.
//!
//! The controller only needs to ask whether discovery is available and to
//! receive tag-detection events. Real adapters live outside this crate; the
//! simulated adapter and the event sources here drive the controller from
//! settings, channels and text input.

mod events;

pub use events::{channel, parse_tag_line, tag_list, text_events, TagEvents, TagSender};

use crate::config::HardwareSettings;

/// Capability queries the controller makes before starting a scan.
pub trait NfcHardware {
    /// Whether the device has NFC discovery at all.
    fn is_supported(&self) -> bool;

    /// Whether discovery is currently switched on.
    fn is_enabled(&self) -> bool;
}

impl<T: NfcHardware + ?Sized> NfcHardware for &T {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// A tag-detection event delivered by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagEvent {
    /// Raw identifier read from the tag, if the tag reported one.
    pub raw_id: Option<Vec<u8>>,
}

impl TagEvent {
    /// An event carrying the given identifier bytes.
    pub fn new(raw_id: impl Into<Vec<u8>>) -> Self {
        Self {
            raw_id: Some(raw_id.into()),
        }
    }

    /// An event without identifier data.
    pub fn empty() -> Self {
        Self { raw_id: None }
    }

    /// The identifier bytes, or `None` when absent or empty.
    pub fn payload(&self) -> Option<&[u8]> {
        self.raw_id.as_deref().filter(|bytes| !bytes.is_empty())
    }
}

/// Adapter whose capabilities are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedHardware {
    supported: bool,
    enabled: bool,
}

impl SimulatedHardware {
    /// Create an adapter with explicit capabilities.
    pub const fn new(supported: bool, enabled: bool) -> Self {
        Self { supported, enabled }
    }

    /// A supported, enabled adapter.
    pub const fn available() -> Self {
        Self::new(true, true)
    }

    /// A device without NFC.
    pub const fn unsupported() -> Self {
        Self::new(false, false)
    }

    /// A device with NFC switched off.
    pub const fn disabled() -> Self {
        Self::new(true, false)
    }

    /// Toggle the enabled switch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for SimulatedHardware {
    fn default() -> Self {
        Self::available()
    }
}

impl From<HardwareSettings> for SimulatedHardware {
    fn from(settings: HardwareSettings) -> Self {
        Self::new(settings.supported, settings.enabled)
    }
}

impl NfcHardware for SimulatedHardware {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn is_enabled(&self) -> bool {
        self.supported && self.enabled
    }
}
