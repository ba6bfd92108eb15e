//! Visage Core Runtime
//!
//! Session-side primitives of the capture bridge:
//!
//! - **State Machines**: generic flat FSM runtime with guards and entry/exit actions
//! - **Session Lifecycle**: one machine per capture attempt, from `NotReady` to a terminal state
//! - **Event Normalization**: any host event shape into one [`SessionState`]
//!
//! # Example
//!
//! ```rust
//! use visage_core::{normalize, RawEvent, SessionMachine, SessionStatus};
//!
//! let mut session = SessionMachine::new();
//! session.mark_ready();
//! session.begin();
//!
//! let cancelled = session.abort(None).unwrap();
//! let wire = cancelled.to_wire().unwrap();
//!
//! let state = normalize(RawEvent::Wire(wire));
//! assert_eq!(state.status, SessionStatus::Cancelled);
//! assert!(state.load.is_none());
//! ```

pub mod error;
pub mod fsm;
pub mod load;
pub mod normalizer;
pub mod session;
pub mod wire;

pub use error::{Result, SessionError};
pub use fsm::{StateMachine, StateMachineBuilder, Transition};
pub use load::{RawSessionResult, SessionLoad};
pub use normalizer::{normalize, RawEvent};
pub use session::{SessionMachine, SessionPhase, SessionState, SessionStatus, SessionTrigger};
pub use wire::WireState;
