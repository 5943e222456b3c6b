//! # Voxa Testing
//!
//! Mock handlers, a recording ledger, and dispatcher fixtures for testing
//! Voxa assistants. Mocks share their call tracking across clones, so a
//! test can hold a handle while the dispatcher owns the registered copy.

pub mod fixtures;
pub mod ledger;
pub mod mock;

pub use fixtures::{test_agent, test_dispatcher, test_tool};
pub use ledger::RecordingLedger;
pub use mock::MockHandler;
