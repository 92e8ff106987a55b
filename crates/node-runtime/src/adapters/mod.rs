//! # Adapters
//!
//! In-process implementations of the keyshare outbound ports.
//!
//! | Port | Adapter |
//! |------|---------|
//! | `StakingView` | [`GenesisStakingView`] |
//! | `PeerKeyRegistry` | [`InProcessPeerRegistry`] |
//! | `ChannelTransport` | [`LoopbackTransport`] |

pub mod peer;
pub mod staking;
pub mod transport;

pub use peer::{InProcessPeerRegistry, PeerKeys};
pub use staking::GenesisStakingView;
pub use transport::{Delivered, LoopbackTransport};
