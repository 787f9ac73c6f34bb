//! Unit tests for config module

use logwin::window::ConfigError;
use logwin::{Config, OutputFormat, TokenizerKind};

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.window.max_tokens, 5000);
    assert_eq!(config.window.overlap_ratio, 0.15);
    assert_eq!(config.window.min_tokens, 100);
    assert_eq!(config.window.tokenizer, TokenizerKind::Exact);
    assert_eq!(config.window.encoding, "cl100k_base");
    assert_eq!(
        config.preprocess.filters,
        vec!["healthz", "readinessprobe", "livenessprobe"]
    );
    assert!(!config.preprocess.split_long_lines);
    assert_eq!(config.preprocess.max_line_tokens, 1000);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn partial_sections_fill_defaults() {
    let toml_str = r#"
[window]
max_tokens = 3000
tokenizer = "approx"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.window.max_tokens, 3000);
    assert_eq!(config.window.tokenizer, TokenizerKind::Approximate);
    assert_eq!(config.window.overlap_ratio, 0.15);
    assert_eq!(config.preprocess.max_line_tokens, 1000);
}

#[test]
fn empty_filter_list_is_kept() {
    let config: Config = toml::from_str("[preprocess]\nfilters = []\n").unwrap();
    assert!(config.preprocess.filters.is_empty());
    let options = config.pipeline_options();
    assert_eq!(options.preprocessor.map(|p| p.filters().len()), Some(0));
}

#[test]
fn tokenizer_names_parse() {
    assert_eq!("exact".parse::<TokenizerKind>(), Ok(TokenizerKind::Exact));
    assert_eq!("TikToken".parse::<TokenizerKind>(), Ok(TokenizerKind::Exact));
    assert_eq!("simple".parse::<TokenizerKind>(), Ok(TokenizerKind::Approximate));
    assert_eq!(
        "bpe".parse::<TokenizerKind>(),
        Err(ConfigError::UnknownTokenizer("bpe".to_string()))
    );
}

#[test]
fn output_formats_parse() {
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert_eq!(OutputFormat::Text.to_string(), "text");
    assert!("yaml".parse::<OutputFormat>().is_err());
}

#[test]
fn validation_names_the_field() {
    let mut config = Config::default();
    config.window.max_tokens = 0;
    assert_eq!(
        config.validate().unwrap_err().to_string(),
        "window.max_tokens must be > 0 (got 0)"
    );

    let mut config = Config::default();
    config.window.overlap_ratio = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidOverlapRatio(_))
    ));
}
