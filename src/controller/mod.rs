//! Acquisition controller.
//!
//! Coordinates the three ways an identifier is obtained (manual edit, random
//! generation, tag scan) and routes each result through the codec into the
//! store. The whole state machine is the [`transition`] function; the
//! [`Controller`] just owns the state and its collaborators and feeds inputs
//! through it.
//!
//! ```text
//!            Modify                Scan (supported + enabled)
//!   Idle ───────────► Editing     Idle ─────────────► Scanning
//!    ▲  Save (valid) /   │         ▲   TagDetected (data)  │
//!    └──── Cancel ───────┘         └──────── Cancel ───────┘
//! ```

mod session;
mod shared;

pub use session::{await_tag, begin_scan, run_scan_session, ScanReport};
pub use shared::SharedController;

use crate::codec::{self, ValidationMode, GENERATED_BYTES};
use crate::config::AppSettings;
use crate::error::AcquisitionError;
use crate::hardware::{NfcHardware, TagEvent};
use crate::storage::{IdentifierSource, IdentifierStore};
use crate::types::Identifier;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// The edit field is open.
    Editing,
    /// Waiting for a tag to be presented.
    Scanning,
}

impl fmt::Display for AcquisitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Editing => write!(f, "editing"),
            Self::Scanning => write!(f, "scanning"),
        }
    }
}

/// Requests and events fed into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Open the edit field.
    Modify,
    /// Submit edited text.
    Save(String),
    /// Replace the identifier with a random one.
    Generate,
    /// Start waiting for a tag.
    Scan,
    /// Discovery reported a tag.
    TagDetected(TagEvent),
    /// Close the edit field or the scan prompt.
    Cancel,
}

impl Input {
    /// Short verb naming the input.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Modify => "modify",
            Self::Save(_) => "save",
            Self::Generate => "generate",
            Self::Scan => "scan",
            Self::TagDetected(_) => "accept a tag",
            Self::Cancel => "cancel",
        }
    }
}

/// What the presentation layer is told after an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The edit field opened, pre-filled with the current identifier.
    EditStarted { current: String },
    /// The store now holds `identifier`.
    Updated {
        identifier: String,
        display: String,
        source: IdentifierSource,
    },
    /// The "please tap a card" prompt is up.
    ScanStarted,
    /// The edit or scan was abandoned; the store is untouched.
    Cancelled,
    /// The input failed; see the error for the class of failure.
    Rejected {
        #[serde(serialize_with = "serialize_rejection")]
        error: AcquisitionError,
    },
}

fn serialize_rejection<S>(error: &AcquisitionError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeStruct;
    let mut out = serializer.serialize_struct("Rejection", 2)?;
    out.serialize_field("kind", error.kind())?;
    out.serialize_field("message", &error.to_string())?;
    out.end()
}

impl Outcome {
    /// Wrap an error.
    pub fn rejected(error: AcquisitionError) -> Self {
        Self::Rejected { error }
    }

    /// The error, if this outcome is a rejection.
    pub fn error(&self) -> Option<&AcquisitionError> {
        match self {
            Self::Rejected { error } => Some(error),
            _ => None,
        }
    }

    /// Whether the store was changed.
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Tunables the transition function needs from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionPolicy {
    /// How manual edits are validated.
    pub validation: ValidationMode,
    /// Byte count of generated identifiers.
    pub generated_bytes: usize,
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Lenient,
            generated_bytes: GENERATED_BYTES,
        }
    }
}

impl From<&AppSettings> for AcquisitionPolicy {
    fn from(settings: &AppSettings) -> Self {
        Self {
            validation: settings.validation,
            generated_bytes: settings.generated_bytes.max(1),
        }
    }
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State after the input.
    pub next: AcquisitionState,
    /// Outcome to report, or `None` when the input is ignored.
    pub outcome: Option<Outcome>,
}

impl Step {
    fn stay(state: AcquisitionState, outcome: Outcome) -> Self {
        Self {
            next: state,
            outcome: Some(outcome),
        }
    }

    fn ignore(state: AcquisitionState) -> Self {
        Self {
            next: state,
            outcome: None,
        }
    }
}

/// Store `identifier` and move to `Idle`, or stay in `state` if the store fails.
fn commit<S>(
    state: AcquisitionState,
    store: &mut S,
    identifier: Identifier,
    source: IdentifierSource,
) -> Step
where
    S: IdentifierStore + ?Sized,
{
    match store.set_current_from(identifier.as_str(), source) {
        Ok(()) => Step {
            next: AcquisitionState::Idle,
            outcome: Some(Outcome::Updated {
                display: identifier.display_form(),
                identifier: identifier.into(),
                source,
            }),
        },
        Err(e) => {
            warn!(error = %e, "failed to store identifier");
            Step::stay(state, Outcome::rejected(e.into()))
        }
    }
}

/// The acquisition state machine.
///
/// Maps `(state, input)` to the next state and the outcome to report,
/// writing to `store` when an identifier is accepted. Tag events outside
/// `Scanning` are dropped without an outcome, as is `Cancel` while `Idle`.
pub fn transition<S, H>(
    state: AcquisitionState,
    input: Input,
    store: &mut S,
    hardware: &H,
    policy: &AcquisitionPolicy,
) -> Step
where
    S: IdentifierStore + ?Sized,
    H: NfcHardware + ?Sized,
{
    use AcquisitionState::*;

    match (state, input) {
        (Idle | Editing, Input::Modify) => match store.get_current() {
            Ok(current) => Step::stay(Editing, Outcome::EditStarted { current }),
            Err(e) => Step::stay(state, Outcome::rejected(e.into())),
        },

        (Editing, Input::Save(text)) => match Identifier::parse_input(&text, policy.validation) {
            Ok(identifier) => commit(Editing, store, identifier, IdentifierSource::Manual),
            Err(e) => {
                warn!(input = ?text, error = %e, "rejected identifier edit");
                Step::stay(Editing, Outcome::rejected(e.into()))
            }
        },

        (Idle | Editing, Input::Generate) => match Identifier::random(policy.generated_bytes) {
            Some(identifier) => commit(state, store, identifier, IdentifierSource::Generated),
            None => Step::stay(
                state,
                Outcome::rejected(AcquisitionError::Internal(
                    "generated identifiers need at least one byte".to_string(),
                )),
            ),
        },

        (Idle, Input::Scan) => {
            if !hardware.is_supported() {
                Step::stay(Idle, Outcome::rejected(AcquisitionError::HardwareUnsupported))
            } else if !hardware.is_enabled() {
                Step::stay(Idle, Outcome::rejected(AcquisitionError::HardwareDisabled))
            } else {
                Step::stay(Scanning, Outcome::ScanStarted)
            }
        }

        (Scanning, Input::TagDetected(event)) => {
            match event.payload().and_then(Identifier::from_bytes) {
                Some(identifier) => commit(Scanning, store, identifier, IdentifierSource::Scanned),
                None => Step::stay(Scanning, Outcome::rejected(AcquisitionError::NoTagData)),
            }
        }

        (_, Input::TagDetected(_)) => {
            debug!(%state, "dropping tag event outside a scan");
            Step::ignore(state)
        }

        (Editing | Scanning, Input::Cancel) => Step::stay(Idle, Outcome::Cancelled),

        (Idle, Input::Cancel) => Step::ignore(Idle),

        (state, input) => Step::stay(
            state,
            Outcome::rejected(AcquisitionError::InvalidState {
                state: state.to_string(),
                input: input.name().to_string(),
            }),
        ),
    }
}

/// Owns the state machine together with its store and hardware.
#[derive(Debug)]
pub struct Controller<S, H> {
    state: AcquisitionState,
    store: S,
    hardware: H,
    policy: AcquisitionPolicy,
}

impl<S, H> Controller<S, H>
where
    S: IdentifierStore,
    H: NfcHardware,
{
    /// Create an idle controller with the default policy.
    pub fn new(store: S, hardware: H) -> Self {
        Self {
            state: AcquisitionState::Idle,
            store,
            hardware,
            policy: AcquisitionPolicy::default(),
        }
    }

    /// Replace the policy.
    pub fn with_policy(mut self, policy: AcquisitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current state.
    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Whether a scan is outstanding.
    pub fn is_scanning(&self) -> bool {
        self.state == AcquisitionState::Scanning
    }

    /// The store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The hardware adapter.
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Mutable access to the hardware adapter.
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The current identifier in display form.
    pub fn current_display(&self) -> Result<String, crate::error::StorageError> {
        Ok(codec::to_display(&self.store.get_current()?))
    }

    /// Feed one input through the state machine.
    pub fn handle(&mut self, input: Input) -> Option<Outcome> {
        let name = input.name();
        let from = self.state;
        let step = transition(from, input, &mut self.store, &self.hardware, &self.policy);
        debug!(%from, to = %step.next, input = name, "transition");
        self.state = step.next;
        step.outcome
    }

    /// Open the edit field.
    pub fn modify(&mut self) -> Option<Outcome> {
        self.handle(Input::Modify)
    }

    /// Submit edited text.
    pub fn save(&mut self, text: impl Into<String>) -> Option<Outcome> {
        self.handle(Input::Save(text.into()))
    }

    /// Generate a random identifier.
    pub fn generate(&mut self) -> Option<Outcome> {
        self.handle(Input::Generate)
    }

    /// Start a scan.
    pub fn scan(&mut self) -> Option<Outcome> {
        self.handle(Input::Scan)
    }

    /// Deliver a tag event.
    pub fn tag_detected(&mut self, event: TagEvent) -> Option<Outcome> {
        self.handle(Input::TagDetected(event))
    }

    /// Cancel the edit or scan in progress.
    pub fn cancel(&mut self) -> Option<Outcome> {
        self.handle(Input::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecError, StorageError, StorageResult};
    use crate::hardware::SimulatedHardware;
    use crate::storage::MemoryStore;

    fn controller() -> Controller<MemoryStore, SimulatedHardware> {
        Controller::new(MemoryStore::new(), SimulatedHardware::available())
    }

    struct BrokenStore;

    impl IdentifierStore for BrokenStore {
        fn get_current(&self) -> StorageResult<String> {
            Err(StorageError::Corrupt("broken".to_string()))
        }

        fn set_current(&mut self, _text: &str) -> StorageResult<()> {
            Err(StorageError::DirectoryError("read-only".to_string()))
        }
    }

    #[test]
    fn test_modify_prefills_current() {
        let mut c = Controller::new(MemoryStore::holding("04A1B2C3"), SimulatedHardware::available());
        assert_eq!(
            c.modify(),
            Some(Outcome::EditStarted {
                current: "04A1B2C3".to_string()
            })
        );
        assert_eq!(c.state(), AcquisitionState::Editing);
    }

    #[test]
    fn test_save_uppercases_and_stores() {
        let mut c = controller();
        c.modify();
        let outcome = c.save("04a1b2c3d4e5").unwrap();
        assert_eq!(
            outcome,
            Outcome::Updated {
                identifier: "04A1B2C3D4E5".to_string(),
                display: "C3B2A104D4E5".to_string(),
                source: IdentifierSource::Manual,
            }
        );
        assert_eq!(c.state(), AcquisitionState::Idle);
        assert_eq!(c.store().get_current().unwrap(), "04A1B2C3D4E5");
    }

    #[test]
    fn test_invalid_save_stays_editing() {
        let mut c = controller();
        c.modify();
        let outcome = c.save("12G4").unwrap();
        assert_eq!(
            outcome.error(),
            Some(&AcquisitionError::InvalidHexInput(CodecError::InvalidCharacter {
                ch: 'G',
                position: 2
            }))
        );
        assert_eq!(c.state(), AcquisitionState::Editing);
        assert!(!c.store().is_set());
    }

    #[test]
    fn test_strict_policy_rejects_odd_length() {
        let mut c = controller().with_policy(AcquisitionPolicy {
            validation: ValidationMode::Strict,
            ..AcquisitionPolicy::default()
        });
        c.modify();
        let outcome = c.save("04A1B2C3D").unwrap();
        assert_eq!(outcome.error().map(|e| e.kind()), Some("invalid-hex"));
        assert_eq!(c.state(), AcquisitionState::Editing);
    }

    #[test]
    fn test_generate() {
        let mut c = controller();
        match c.generate() {
            Some(Outcome::Updated {
                identifier,
                display,
                source,
            }) => {
                assert_eq!(identifier.len(), 12);
                assert!(codec::validate(&identifier));
                assert_eq!(display, codec::to_display(&identifier));
                assert_eq!(source, IdentifierSource::Generated);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(c.state(), AcquisitionState::Idle);
    }

    #[test]
    fn test_generate_ends_edit() {
        let mut c = controller();
        c.modify();
        assert!(c.generate().unwrap().is_update());
        assert_eq!(c.state(), AcquisitionState::Idle);
    }

    #[test]
    fn test_save_rejects_surrounding_whitespace() {
        let mut c = Controller::new(MemoryStore::holding("0A0B0C0D"), SimulatedHardware::available());
        c.modify();
        let outcome = c.save(" 04a1b2c3 \n").unwrap();
        assert_eq!(
            outcome.error(),
            Some(&AcquisitionError::InvalidHexInput(CodecError::InvalidCharacter {
                ch: ' ',
                position: 0
            }))
        );
        assert_eq!(c.state(), AcquisitionState::Editing);
        assert_eq!(c.store().get_current().unwrap(), "0A0B0C0D");
        assert_eq!(c.store().writes(), 0);
    }

    #[test]
    fn test_generate_with_zero_bytes_is_rejected() {
        let mut c = controller().with_policy(AcquisitionPolicy {
            generated_bytes: 0,
            ..AcquisitionPolicy::default()
        });
        let outcome = c.generate().unwrap();
        assert_eq!(outcome.error().map(AcquisitionError::kind), Some("internal"));
        assert!(!c.store().is_set());
    }

    #[test]
    fn test_generate_uses_policy_length() {
        let mut c = controller().with_policy(AcquisitionPolicy {
            generated_bytes: 4,
            ..AcquisitionPolicy::default()
        });
        c.generate();
        assert_eq!(c.store().get_current().unwrap().len(), 8);
    }

    #[test]
    fn test_scan_then_tag() {
        let mut c = controller();
        assert_eq!(c.scan(), Some(Outcome::ScanStarted));
        assert!(c.is_scanning());

        let outcome = c.tag_detected(TagEvent::new(vec![0x04, 0xA1, 0xB2, 0xC3]));
        assert_eq!(
            outcome,
            Some(Outcome::Updated {
                identifier: "04A1B2C3".to_string(),
                display: "C3B2A104".to_string(),
                source: IdentifierSource::Scanned,
            })
        );
        assert_eq!(c.state(), AcquisitionState::Idle);
    }

    #[test]
    fn test_empty_tag_keeps_scanning() {
        let mut c = controller();
        c.scan();
        assert_eq!(
            c.tag_detected(TagEvent::empty()),
            Some(Outcome::rejected(AcquisitionError::NoTagData))
        );
        assert_eq!(
            c.tag_detected(TagEvent::new(Vec::new())),
            Some(Outcome::rejected(AcquisitionError::NoTagData))
        );
        assert!(c.is_scanning());
        assert!(!c.store().is_set());
    }

    #[test]
    fn test_tag_outside_scan_is_ignored() {
        let mut c = controller();
        assert_eq!(c.tag_detected(TagEvent::new(vec![1, 2, 3, 4])), None);
        c.modify();
        assert_eq!(c.tag_detected(TagEvent::new(vec![1, 2, 3, 4])), None);
        assert_eq!(c.state(), AcquisitionState::Editing);
        assert_eq!(c.store().writes(), 0);
    }

    #[test]
    fn test_scan_unsupported_and_disabled() {
        let mut c = Controller::new(MemoryStore::new(), SimulatedHardware::unsupported());
        assert_eq!(
            c.scan(),
            Some(Outcome::rejected(AcquisitionError::HardwareUnsupported))
        );
        assert_eq!(c.state(), AcquisitionState::Idle);

        let mut c = Controller::new(MemoryStore::new(), SimulatedHardware::disabled());
        assert_eq!(
            c.scan(),
            Some(Outcome::rejected(AcquisitionError::HardwareDisabled))
        );
        c.hardware_mut().set_enabled(true);
        assert_eq!(c.scan(), Some(Outcome::ScanStarted));
    }

    #[test]
    fn test_cancel_scan_discards_late_tag() {
        let mut c = controller();
        c.scan();
        assert_eq!(c.cancel(), Some(Outcome::Cancelled));
        assert_eq!(c.tag_detected(TagEvent::new(vec![1, 2, 3, 4])), None);
        assert!(!c.store().is_set());
    }

    #[test]
    fn test_cancel_edit_and_idle_cancel() {
        let mut c = controller();
        c.modify();
        assert_eq!(c.cancel(), Some(Outcome::Cancelled));
        assert_eq!(c.state(), AcquisitionState::Idle);
        assert_eq!(c.cancel(), None);
    }

    #[test]
    fn test_invalid_state_inputs() {
        let mut c = controller();
        let outcome = c.save("01020304").unwrap();
        assert_eq!(outcome.error().map(|e| e.kind()), Some("invalid-state"));
        assert_eq!(c.state(), AcquisitionState::Idle);

        c.scan();
        for input in [Input::Modify, Input::Generate, Input::Scan, Input::Save("AA".into())] {
            let outcome = c.handle(input).unwrap();
            assert_eq!(outcome.error().map(|e| e.kind()), Some("invalid-state"));
            assert!(c.is_scanning());
        }
    }

    #[test]
    fn test_store_failure_is_internal() {
        let mut c = Controller::new(BrokenStore, SimulatedHardware::available());
        let outcome = c.modify().unwrap();
        assert_eq!(outcome.error().map(|e| e.kind()), Some("internal"));
        assert_eq!(c.state(), AcquisitionState::Idle);

        c.scan();
        let outcome = c.tag_detected(TagEvent::new(vec![1, 2, 3, 4])).unwrap();
        assert_eq!(outcome.error().map(|e| e.kind()), Some("internal"));
        assert!(c.is_scanning());
    }

    #[test]
    fn test_transition_function_directly() {
        let mut store = MemoryStore::new();
        let hw = SimulatedHardware::available();
        let policy = AcquisitionPolicy::default();

        let step = transition(AcquisitionState::Idle, Input::Scan, &mut store, &hw, &policy);
        assert_eq!(step.next, AcquisitionState::Scanning);

        let step = transition(
            step.next,
            Input::TagDetected(TagEvent::new(vec![0xDE, 0xAD, 0xBE, 0xEF, 0x01])),
            &mut store,
            &hw,
            &policy,
        );
        assert_eq!(step.next, AcquisitionState::Idle);
        assert_eq!(store.get_current().unwrap(), "DEADBEEF01");
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_value(Outcome::rejected(AcquisitionError::NoTagData)).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["error"]["kind"], "no-tag-data");

        let json = serde_json::to_value(Outcome::ScanStarted).unwrap();
        assert_eq!(json["outcome"], "scan_started");
    }
}
