//! watchbench.toml 통합 설정 테스트
//!
//! - watchbench.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 잘못된 형식 에러 테스트

use watchbench_core::config::WatchbenchConfig;
use watchbench_core::error::{ConfigError, WatchbenchError};

// =============================================================================
// watchbench.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../watchbench.toml.example");
    let config = WatchbenchConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.service.endpoint, "http://127.0.0.1:9322");
    assert_eq!(config.audit.poll_interval_secs, 2);
    assert_eq!(config.audit.timeout_secs, 300);
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../watchbench.toml.example");
    let config = WatchbenchConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

// =============================================================================
// 부분 설정 로딩 테스트
// =============================================================================

#[test]
fn partial_config_uses_defaults_for_missing_sections() {
    let config = WatchbenchConfig::parse("[service]\nendpoint = \"http://w:9322\"")
        .expect("partial config should parse");

    assert_eq!(config.service.endpoint, "http://w:9322");
    // 누락된 섹션은 기본값
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.runner.concurrency, 1);
    assert_eq!(config.context.audit_template_count, 1);
}

#[test]
fn empty_config_is_all_defaults() {
    let config = WatchbenchConfig::parse("").expect("empty config should parse");
    config.validate().expect("defaults should validate");
    assert_eq!(config.audit.poll_interval_secs, 2);
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_beats_file_value() {
    let mut config = WatchbenchConfig::parse("[runner]\niterations = 10")
        .expect("config should parse");
    assert_eq!(config.runner.iterations, 10);

    // SAFETY: 테스트는 serial로 실행되므로 환경변수 조작이 안전합니다.
    unsafe { std::env::set_var("WATCHBENCH_RUNNER_ITERATIONS", "25") };
    config.apply_env_overrides();
    unsafe { std::env::remove_var("WATCHBENCH_RUNNER_ITERATIONS") };

    assert_eq!(config.runner.iterations, 25);
}

// =============================================================================
// 에러 테스트
// =============================================================================

#[test]
fn malformed_toml_is_parse_error() {
    let result = WatchbenchConfig::parse("[service\nendpoint=");
    assert!(matches!(
        result,
        Err(WatchbenchError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn wrong_value_type_is_parse_error() {
    let result = WatchbenchConfig::parse("[runner]\nconcurrency = \"many\"");
    assert!(matches!(
        result,
        Err(WatchbenchError::Config(ConfigError::ParseFailed { .. }))
    ));
}
