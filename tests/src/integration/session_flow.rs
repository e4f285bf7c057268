//! # Session Flow
//!
//! Session events from the wallet provider (02) travel over the shared
//! bus and revoke the gate's decision (04) through the watcher the
//! container spawns.

#[cfg(test)]
mod tests {
    use crate::support::{container, stub_config, StubCms, StubNode};
    use gmn_02_wallet_session::{LocalWallet, WalletSigner, USER_DISCONNECT_CODE};
    use gmn_04_token_gate::{AuthState, ContentGate};
    use std::sync::Arc;
    use std::time::Duration;

    const CHAIN_ID: u64 = 31337;

    async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
        for _ in 0..100 {
            if condition() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    async fn signed_in() -> (StubNode, StubCms, gate_runtime::GateContainer) {
        let wallet = LocalWallet::random(CHAIN_ID);
        let address = wallet.address();
        let node = StubNode::start(vec![wallet]).await;
        node.set_token_balance(address, 1);
        let cms = StubCms::start(vec![]).await;
        let (c, _) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();
        c.gate.sign_in().await.unwrap();
        (node, cms, c)
    }

    #[tokio::test]
    async fn test_disconnect_revokes_access() {
        let (_node, _cms, c) = signed_in().await;
        assert!(c.gate.can_view());

        c.session.disconnect(USER_DISCONNECT_CODE, "user").await;

        // Access is gone at once; the watcher then clears the state.
        assert!(!c.gate.can_view());
        assert!(wait_until(|| c.gate.state() == AuthState::Idle).await);
    }

    #[tokio::test]
    async fn test_account_change_revokes_access() {
        let (_node, _cms, c) = signed_in().await;

        c.session
            .account_changed(Arc::new(LocalWallet::random(CHAIN_ID)))
            .await;

        assert!(!c.gate.can_view());
        assert!(wait_until(|| c.gate.state() == AuthState::Idle).await);
    }

    #[tokio::test]
    async fn test_chain_change_revokes_access() {
        let (_node, _cms, c) = signed_in().await;

        c.session.chain_changed(137).await;

        assert!(!c.gate.can_view());
        assert!(wait_until(|| c.gate.state() == AuthState::Idle).await);
    }

    #[tokio::test]
    async fn test_reconnect_allows_fresh_sign_in() {
        let (_node, _cms, c) = signed_in().await;
        c.session.disconnect(USER_DISCONNECT_CODE, "user").await;
        assert!(wait_until(|| c.gate.state() == AuthState::Idle).await);

        c.connect_wallet().await.unwrap();
        c.gate.sign_in().await.unwrap();

        assert!(c.gate.can_view());
    }
}
