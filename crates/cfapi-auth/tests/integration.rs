use cfapi_auth::{vars, ApiKey, ApiToken, Auth, AuthError, NoAuth, UserServiceKey};

// Environment is process-global, so every env-driven case lives in one test.
#[test]
fn test_from_env_constructors() {
    std::env::remove_var(vars::API_TOKEN);
    let missing = ApiToken::from_env().unwrap_err();
    assert!(matches!(missing, AuthError::NotSet { ref var } if var == vars::API_TOKEN));
    assert!(missing.to_string().contains(vars::API_TOKEN));

    std::env::set_var(vars::API_TOKEN, "");
    assert!(ApiToken::from_env().is_err());

    std::env::set_var(vars::API_TOKEN, "scoped-token");
    let token = ApiToken::from_env().unwrap();
    assert_eq!(token.headers().get("Authorization"), Some("Bearer scoped-token"));

    std::env::set_var(vars::EMAIL, "ops@example.com");
    std::env::set_var(vars::API_KEY, "global");
    let key = ApiKey::from_env().unwrap();
    assert_eq!(key.headers().get("X-Auth-Email"), Some("ops@example.com"));

    std::env::set_var(vars::USER_SERVICE_KEY, "v1.0-abc");
    let service = UserServiceKey::from_env().unwrap();
    assert_eq!(service.headers().get("X-Auth-User-Service-Key"), Some("v1.0-abc"));
}

#[test]
fn test_auth_through_trait_objects() {
    let providers: Vec<Box<dyn Auth>> = vec![
        Box::new(NoAuth),
        Box::new(ApiToken::new("t")),
        Box::new(ApiKey::new("a@b.c", "k")),
    ];

    let counts: Vec<usize> = providers.iter().map(|p| p.headers().len()).collect();
    assert_eq!(counts, vec![0, 1, 2]);

    let token = ApiToken::new("t");
    let borrowed: &dyn Auth = &token;
    assert_eq!(borrowed.headers().get("Authorization"), Some("Bearer t"));
}
