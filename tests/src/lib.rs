//! # Quantum-Chain Keyshare Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the block hooks
//! └── src/integration/  # Multi-block and cross-chain scenarios
//!     ├── block_lifecycle.rs
//!     ├── handshake.rs
//!     └── runtime.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::handshake
//! cargo bench -p qc-tests
//! ```

pub mod integration;
