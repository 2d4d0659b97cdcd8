pub mod handshake;
pub mod relay;
pub mod store;

mod session;

pub use handshake::HandshakeError;
pub use relay::{CodeRelay, RelayHandle};
pub use session::{CONTROL_REFRESH_DELAY, POLL_INTERVAL, PollTick, Session, SessionPhase};
pub use store::{CredentialStore, StoreError};
