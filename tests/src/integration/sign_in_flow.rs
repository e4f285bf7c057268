//! # Sign-In Flow
//!
//! Wallet (02) → challenge + signature (04, 01) → `balanceOf` on the node
//! (03) → gate decision, with every hop going over real HTTP to the stub
//! node.

#[cfg(test)]
mod tests {
    use crate::support::{container, nonce_config, stub_config, StubCms, StubNode};
    use gate_runtime::container::WalletSource;
    use gmn_02_wallet_session::{LocalWallet, WalletSigner};
    use gmn_03_chain_reader::NetworkStatus;
    use gmn_04_token_gate::{AuthState, NotificationKind, SignInError};

    const CHAIN_ID: u64 = 31337;

    /// Node with one unlocked account holding `holder_balance` tokens.
    async fn stubs(holder_balance: u64) -> (StubNode, StubCms) {
        let wallet = LocalWallet::random(CHAIN_ID);
        let address = wallet.address();
        let node = StubNode::start(vec![wallet]).await;
        node.set_token_balance(address, holder_balance);
        let cms = StubCms::start(vec![]).await;
        (node, cms)
    }

    #[tokio::test]
    async fn test_holder_signs_in_through_node_wallet() {
        let (node, cms) = stubs(3).await;
        let (c, notifier) = container(stub_config(&node, &cms));

        let address = c.connect_wallet().await.unwrap();
        let signed_in = c.gate.sign_in().await.unwrap();

        assert_eq!(signed_in, address);
        assert!(c.gate.is_authorized());
        assert_eq!(notifier.last().unwrap().kind, NotificationKind::Success);
        assert_eq!(node.request_count("personal_sign"), 1);
        assert_eq!(node.request_count("eth_call"), 1);
    }

    #[tokio::test]
    async fn test_zero_balance_is_denied() {
        let (node, cms) = stubs(0).await;
        let (c, notifier) = container(stub_config(&node, &cms));
        let address = c.connect_wallet().await.unwrap();

        let err = c.gate.sign_in().await.unwrap_err();

        assert_eq!(err, SignInError::NotAHolder(address));
        assert!(matches!(c.gate.state(), AuthState::Denied { .. }));
        assert_eq!(notifier.last().unwrap().message, "No GMN tokens found");
    }

    #[tokio::test]
    async fn test_rejected_signature_keeps_idle() {
        let (node, cms) = stubs(5).await;
        node.reject_signatures(true);
        let (c, notifier) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();

        let err = c.gate.sign_in().await.unwrap_err();

        assert!(matches!(err, SignInError::SignatureRejected(_)));
        assert_eq!(c.gate.state(), AuthState::Idle);
        assert_eq!(notifier.count(NotificationKind::Error), 1);
    }

    #[tokio::test]
    async fn test_node_failure_keeps_prior_grant() {
        let (node, cms) = stubs(1).await;
        let (c, _) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();
        c.gate.sign_in().await.unwrap();

        node.fail_balance_of(true);
        let err = c.gate.sign_in().await.unwrap_err();

        assert!(matches!(err, SignInError::BalanceQueryFailed(_)));
        assert!(c.gate.is_authorized());
        assert!(!c.gate.is_busy());
    }

    #[tokio::test]
    async fn test_local_wallet_with_nonce_challenge() {
        let node = StubNode::start(vec![]).await;
        let cms = StubCms::start(vec![]).await;
        let key = format!("0x{}", "42".repeat(32));
        let wallet = LocalWallet::from_hex(&key, CHAIN_ID).unwrap();
        node.set_token_balance(wallet.address(), 1);

        let mut config = nonce_config(&node, &cms);
        config.wallet = WalletSource::Local(key.into());
        let (c, _) = container(config);

        let address = c.connect_wallet().await.unwrap();
        assert_eq!(address, wallet.address());
        assert_eq!(c.gate.sign_in().await.unwrap(), address);
        // Local signing never reaches the node.
        assert_eq!(node.request_count("personal_sign"), 0);
    }

    #[tokio::test]
    async fn test_network_mismatch_is_reported() {
        let (node, cms) = stubs(1).await;
        let mut config = stub_config(&node, &cms);
        config.network = "polygon".into();
        let (c, _) = container(config);

        let status = c.chain.network_status().await.unwrap();
        assert_eq!(
            status,
            NetworkStatus::WrongNetwork {
                expected: 137,
                actual: CHAIN_ID
            }
        );
    }
}
