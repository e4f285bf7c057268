//! # Mint Flow
//!
//! `cost()` → `mint(quantity)` → receipt polling (03), after which the
//! minted balance opens the gate (04).

#[cfg(test)]
mod tests {
    use crate::support::stub_node::MINT_COST;
    use crate::support::{container, stub_config, StubCms, StubNode};
    use gate_runtime::commands;
    use gmn_02_wallet_session::{LocalWallet, WalletSigner};
    use gmn_03_chain_reader::TransactionUpdate;
    use shared_types::{to_quantity, U256};

    const CHAIN_ID: u64 = 31337;

    async fn stubs() -> (StubNode, StubCms, shared_types::Address) {
        let wallet = LocalWallet::random(CHAIN_ID);
        let address = wallet.address();
        let node = StubNode::start(vec![wallet]).await;
        let cms = StubCms::start(vec![]).await;
        (node, cms, address)
    }

    #[tokio::test]
    async fn test_mint_pays_cost_times_quantity() {
        let (node, cms, address) = stubs().await;
        let (c, _) = container(stub_config(&node, &cms));

        let tx_hash = c.mint.mint(address, 3).await.unwrap();

        assert!(tx_hash.starts_with("0x"));
        let sent = node.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0]["value"].as_str().unwrap(),
            to_quantity(U256::from(MINT_COST) * U256::from(3u64))
        );
        assert_eq!(sent[0]["to"].as_str().unwrap(), node.token.to_lower_hex());
    }

    #[tokio::test]
    async fn test_mint_then_sign_in() {
        let (node, cms, address) = stubs().await;
        let (c, _) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();
        assert!(c.gate.sign_in().await.is_err());

        let mut updates = Vec::new();
        let terminal = c
            .mint
            .mint_and_wait(address, 2, |u| updates.push(u.clone()))
            .await
            .unwrap();

        assert!(matches!(terminal, TransactionUpdate::Confirmed { .. }));
        assert!(matches!(updates[0], TransactionUpdate::Submitted { .. }));
        assert_eq!(node.token_balance(address), U256::from(2u64));
        assert_eq!(c.gate.sign_in().await.unwrap(), address);
    }

    #[tokio::test]
    async fn test_reverted_mint_reports_failure() {
        let (node, cms, address) = stubs().await;
        node.revert_mints(true);
        let (c, _) = container(stub_config(&node, &cms));

        let terminal = c.mint.mint_and_wait(address, 1, |_| {}).await.unwrap();

        assert!(matches!(terminal, TransactionUpdate::Failed { .. }));
        assert_eq!(node.token_balance(address), U256::zero());
    }

    #[tokio::test]
    async fn test_mint_command_prints_progress() {
        let (node, cms, _) = stubs().await;
        let (c, _) = container(stub_config(&node, &cms));
        let mut out = Vec::new();

        commands::mint(&c, 1, true, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("submitted: 0x"));
        assert!(text.contains("confirmed: 0x"));
        // Local chains have no explorer.
        assert!(!text.contains("explorer:"));
    }

    #[tokio::test]
    async fn test_verify_command_end_to_end() {
        let (node, cms, address) = stubs().await;
        node.set_token_balance(address, 1);
        let (c, _) = container(stub_config(&node, &cms));
        let mut out = Vec::new();

        commands::verify(&c, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("authorized: {address}\n")
        );
    }
}
