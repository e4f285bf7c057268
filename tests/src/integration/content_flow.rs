//! # Content Flow
//!
//! CMS (05) over HTTP, filtered through the gate (04): listings always
//! load, post bodies only after a successful sign-in.

#[cfg(test)]
mod tests {
    use crate::support::stub_cms::sample_post;
    use crate::support::{container, stub_config, StubCms, StubNode};
    use gmn_02_wallet_session::{LocalWallet, WalletSigner};
    use gmn_05_content::ContentError;

    const CHAIN_ID: u64 = 31337;

    async fn stubs(balance: u64) -> (StubNode, StubCms) {
        let wallet = LocalWallet::random(CHAIN_ID);
        let address = wallet.address();
        let node = StubNode::start(vec![wallet]).await;
        node.set_token_balance(address, balance);
        let cms = StubCms::start(vec![
            sample_post("Moon Landing", "moon-landing", "Ada"),
            sample_post("Deep Sea", "deep-sea", "Grace"),
        ])
        .await;
        (node, cms)
    }

    #[tokio::test]
    async fn test_listing_is_locked_before_sign_in() {
        let (node, cms) = stubs(1).await;
        let (c, _) = container(stub_config(&node, &cms));

        let entries = c.content.listing(None).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.view_path.is_none()));
        assert_eq!(
            entries[0].image_url.as_deref(),
            Some("https://cdn.example/moon-landing.png")
        );
    }

    #[tokio::test]
    async fn test_holder_reads_post() {
        let (node, cms) = stubs(1).await;
        let (c, _) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();
        c.gate.sign_in().await.unwrap();

        let listing = c.content.listing(Some("MOON")).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].view_path.as_deref(), Some("/moon-landing"));

        let post = c.content.open_post("moon-landing").await.unwrap();
        assert_eq!(post.name.as_deref(), Some("Ada"));
        assert_eq!(post.body_text(), "Moon Landing body");
    }

    #[tokio::test]
    async fn test_locked_post_is_not_fetched() {
        let (node, cms) = stubs(0).await;
        let (c, _) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();
        assert!(c.gate.sign_in().await.is_err());

        let err = c.content.open_post("moon-landing").await.unwrap_err();

        assert_eq!(err, ContentError::Locked);
        assert_eq!(cms.query_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let (node, cms) = stubs(1).await;
        let (c, _) = container(stub_config(&node, &cms));
        c.connect_wallet().await.unwrap();
        c.gate.sign_in().await.unwrap();

        let err = c.content.open_post("missing-post").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cms_error_surfaces_description() {
        let (node, cms) = stubs(1).await;
        cms.set_failing(true);
        let (c, _) = container(stub_config(&node, &cms));

        let err = c.content.listing(None).await.unwrap_err();
        assert_eq!(
            err,
            ContentError::Api {
                status: 500,
                message: "dataset unavailable".into()
            }
        );
    }
}
