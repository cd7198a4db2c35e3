// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证分析参数读取、覆写、回退默认值
// ==========================================

mod test_helpers;

use freight_quote_analyzer::config::{config_keys, AnalysisConfig, AnalysisConfigReader, ConfigManager};
use test_helpers::{create_test_db, insert_config, open_test_connection};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_empty_config_uses_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let config = config_manager
        .get_analysis_config()
        .await
        .expect("Should load analysis config");

    assert_eq!(config, AnalysisConfig::default());
    assert_eq!(config.safe_buffer_days, 3);
    assert_eq!(config.min_reliable_quote_count, 2);
    assert_eq!(config.unknown_forwarder_label, "Unknown");
}

#[tokio::test]
async fn test_stored_values_override_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&conn, config_keys::SAFE_BUFFER_DAYS, "5").unwrap();
    insert_config(&conn, config_keys::ANNUAL_CARRYING_COST_RATE, "0.08").unwrap();
    insert_config(&conn, config_keys::UNKNOWN_FORWARDER_LABEL, "  未知货代 ").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let config = config_manager.get_analysis_config().await.unwrap();

    assert_eq!(config.safe_buffer_days, 5);
    assert_eq!(config.annual_carrying_cost_rate, 0.08);
    assert_eq!(config.unknown_forwarder_label, "未知货代");
    assert_eq!(config.high_flexibility_days, 25);
}

#[tokio::test]
async fn test_malformed_value_falls_back_to_default() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&conn, config_keys::MEDIUM_FLEXIBILITY_DAYS, "two weeks").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let config = config_manager.get_analysis_config().await.unwrap();

    assert_eq!(config.medium_flexibility_days, 14);
}

#[tokio::test]
async fn test_inconsistent_thresholds_are_rejected() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&conn, config_keys::MEDIUM_FLEXIBILITY_DAYS, "30").unwrap();
    insert_config(&conn, config_keys::HIGH_FLEXIBILITY_DAYS, "20").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert!(config_manager.get_analysis_config().await.is_err());
}

#[tokio::test]
async fn test_set_and_snapshot() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::MIN_RELIABLE_QUOTE_COUNT, "3")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::MIN_RELIABLE_QUOTE_COUNT, "4")
        .unwrap();

    assert_eq!(
        config_manager
            .get_global_config_value(config_keys::MIN_RELIABLE_QUOTE_COUNT)
            .unwrap()
            .as_deref(),
        Some("4")
    );

    let snapshot: serde_json::Value =
        serde_json::from_str(&config_manager.get_config_snapshot().unwrap()).unwrap();
    assert_eq!(snapshot[config_keys::MIN_RELIABLE_QUOTE_COUNT], "4");

    let config = config_manager.load_analysis_config().unwrap();
    assert_eq!(config.min_reliable_quote_count, 4);
}

#[tokio::test]
async fn test_reliability_threshold_below_two_is_rejected() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_config(&conn, config_keys::MIN_RELIABLE_QUOTE_COUNT, "1").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let err = config_manager.get_analysis_config().await.unwrap_err();

    assert!(err.to_string().contains("min_reliable_quote_count"));
}
