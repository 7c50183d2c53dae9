use brrtcors::{AllowPattern, CorsConfig, CorsConfigError, CorsOptions, CorsService};
use http::Method;

#[test]
fn test_yaml_config_to_options() {
    let yaml = r#"
allowed_origins:
  - "https://app.example.com"
  - "*.example.com"
allowed_methods: [GET, POST, patch]
allowed_headers: [Content-Type, X-Request-Id]
exposed_headers: [X-Total-Count]
max_age: 86400
allowed_credentials: true
"#;
    let config: CorsConfig = serde_yaml::from_str(yaml).unwrap();
    let options = CorsOptions::try_from(config).unwrap();

    assert_eq!(options.allowed_origins.len(), 2);
    assert!(matches!(options.allowed_origins[0], AllowPattern::Exact(_)));
    assert_eq!(
        options.allowed_origins[1],
        AllowPattern::SubdomainWildcard {
            scheme: None,
            domain: "example.com".into()
        }
    );
    assert_eq!(
        options.allowed_methods,
        vec![Method::GET, Method::POST, Method::PATCH]
    );
    assert_eq!(options.allowed_headers, vec!["Content-Type", "X-Request-Id"]);
    assert_eq!(options.exposed_headers, vec!["X-Total-Count"]);
    assert_eq!(options.max_age, Some(86400));
    assert!(options.allow_credentials);
}

#[test]
fn test_camel_case_aliases() {
    let json = r#"{
        "allowedOrigins": ["*"],
        "allowedHeaders": ["X-A"],
        "exposeHeaders": ["X-B"],
        "maxAge": 5,
        "allowCredentials": false,
        "unknownKey": 42
    }"#;
    let config: CorsConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.allowed_origins, Some(vec!["*".to_string()]));
    assert_eq!(config.exposed_headers, Some(vec!["X-B".to_string()]));
    assert_eq!(config.max_age, Some(5));
    assert_eq!(config.allowed_credentials, Some(false));
}

#[test]
fn test_missing_keys_keep_secure_defaults() {
    let config: CorsConfig = serde_yaml::from_str("max_age: 60").unwrap();
    let options = CorsOptions::try_from(config).unwrap();
    assert!(options.allowed_origins.is_empty());
    assert_eq!(options.allowed_headers, CorsOptions::default().allowed_headers);
    assert_eq!(options.allowed_methods, CorsOptions::default().allowed_methods);
    assert_eq!(options.max_age, Some(60));
    assert!(!options.allow_credentials);
}

#[test]
fn test_invalid_values_rejected() {
    let config: CorsConfig = serde_yaml::from_str("allowed_origins: [\"example.com\"]").unwrap();
    assert_eq!(
        CorsOptions::try_from(config).unwrap_err(),
        CorsConfigError::InvalidOriginFormat {
            origin: "example.com".into()
        }
    );

    let config: CorsConfig = serde_yaml::from_str("allowed_methods: [\"GE T\"]").unwrap();
    assert_eq!(
        CorsService::from_config(config).unwrap_err(),
        CorsConfigError::InvalidMethod {
            method: "GE T".into()
        }
    );

    assert!(serde_yaml::from_str::<CorsConfig>("max_age: -5").is_err());
}

#[test]
fn test_serialize_skips_unset_keys() {
    let config = CorsConfig {
        allowed_origins: Some(vec!["https://a.io".into()]),
        ..CorsConfig::default()
    };
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value, serde_json::json!({ "allowed_origins": ["https://a.io"] }));
}
