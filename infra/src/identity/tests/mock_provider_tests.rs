//! Unit tests for the mock identity provider

#[cfg(test)]
mod tests {
    use reqwest::Url;

    use crate::identity::mock::{MockIdentityProvider, DEFAULT_MOCK_TOKEN_LIFETIME_MS};
    use nv_core::services::verification::IdentityProviderTrait;

    fn code_from(url: &str) -> String {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "code")
            .map(|(_, v)| v.into_owned())
            .expect("code parameter")
    }

    #[test]
    fn test_url_loops_back_to_callback() {
        let provider = MockIdentityProvider::new("http://localhost:3000/step2");
        let url = provider.build_authorization_url("tok-1").unwrap();

        assert!(url.starts_with("http://localhost:3000/step2?"));
        assert!(url.contains("state=tok-1"));
        assert!(code_from(&url).starts_with("mock-code-"));
    }

    #[test]
    fn test_invalid_redirect_uri() {
        let provider = MockIdentityProvider::new("not a url");
        assert!(provider.build_authorization_url("tok-1").is_err());
    }

    #[tokio::test]
    async fn test_full_mock_round_trip() {
        let provider = MockIdentityProvider::new("http://localhost:3000/step2");
        let url = provider.build_authorization_url("tok-1").unwrap();

        let token = provider
            .exchange_code_for_token(&code_from(&url))
            .await
            .unwrap();
        assert!(token.access_token.starts_with("mock-token-"));
        assert_eq!(token.expires_in_ms, DEFAULT_MOCK_TOKEN_LIFETIME_MS);

        let result = provider
            .verify_number(&token.access_token, "+14155550100")
            .await
            .unwrap();
        assert_eq!(result["devicePhoneNumberVerified"], true);
    }

    #[tokio::test]
    async fn test_unknown_code_rejected() {
        let provider = MockIdentityProvider::new("http://localhost:3000/step2");
        assert!(provider.exchange_code_for_token("forged").await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_number_not_verified() {
        let provider = MockIdentityProvider::new("http://localhost:3000/step2");
        let token = provider
            .exchange_code_for_token("mock-code-x")
            .await
            .unwrap();

        let result = provider
            .verify_number(&token.access_token, "12345")
            .await
            .unwrap();
        assert_eq!(result["devicePhoneNumberVerified"], false);
    }

    #[tokio::test]
    async fn test_custom_token_lifetime() {
        let provider =
            MockIdentityProvider::new("http://localhost:3000/step2").with_token_lifetime_ms(1_500);
        let token = provider.exchange_code_for_token("mock-code-x").await.unwrap();
        assert_eq!(token.expires_in_ms, 1_500);
    }
}
