//! # Wallet Session Subsystem (GMN-02)
//!
//! Supplies the signing identity the token gate works against and owns
//! its lifecycle.
//!
//! ```text
//! connect ──→ [Active gen=n] ──account_changed──→ [Active gen=n+1]
//!                   │                                   │
//!                   └─chain_changed─→ [Active gen=n+1]  └─disconnect─→ [None gen=n+2]
//! ```
//!
//! Every lifecycle change bumps the session generation and publishes a
//! [`shared_bus::SessionEvent`]. A consumer that captured generation `n`
//! knows the identity is gone as soon as the generation moves.
//!
//! ## Signers
//!
//! - [`LocalWallet`]: key held in process memory, zeroized on drop
//! - [`RpcWallet`]: delegates to an unlocked node account, the stand-in
//!   for a browser-injected provider

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::local_wallet::LocalWallet;
pub use adapters::rpc_wallet::RpcWallet;
pub use domain::errors::WalletError;
pub use domain::session::SessionSnapshot;
pub use ports::inbound::{MockWallet, WalletSigner};
pub use service::{SessionManager, USER_DISCONNECT_CODE};
