// ==========================================
// 仓储层集成测试
// ==========================================
// 测试目标: 归属校验、联表读取、存量数据校验
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use freight_quote_analyzer::domain::{ForwarderSummary, Quote, QuoteStatus, ShipmentRequest, TransportMode};
use freight_quote_analyzer::repository::{
    QuoteRepository, QuoteStore, RepositoryError, ShipmentRequestRepository, ShipmentRequestStore,
};
use test_helpers::{
    create_test_db, insert_forwarder, insert_quote, insert_request, open_shared_connection,
    open_test_connection, seed_standard_scenario, OTHER_USER, OWNER,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_find_owned_returns_request_for_owner() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_standard_scenario(&conn).unwrap();

    let repo = ShipmentRequestRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let request = repo.find_owned("REQ-001", OWNER).await.unwrap().expect("request should exist");

    assert_eq!(request.id, "REQ-001");
    assert_eq!(request.cargo_ready_date, Some(date(2025, 1, 1)));
    assert_eq!(request.delivery_required_date, Some(date(2025, 1, 31)));
    assert_eq!(request.value_usd, Some(100_000.0));
}

#[tokio::test]
async fn test_find_owned_hides_other_users_request() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_standard_scenario(&conn).unwrap();

    let repo = ShipmentRequestRepository::from_connection(open_shared_connection(&db_path).unwrap());

    assert_eq!(repo.find_owned("REQ-001", OTHER_USER).await.unwrap(), None);
    assert_eq!(repo.find_owned("REQ-404", OWNER).await.unwrap(), None);
}

#[tokio::test]
async fn test_request_with_null_fields() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_request(&conn, "REQ-002", OWNER, None, None, None).unwrap();

    let repo = ShipmentRequestRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let request = repo.find_owned("REQ-002", OWNER).await.unwrap().unwrap();

    assert_eq!(request, ShipmentRequest::new("REQ-002"));
}

#[tokio::test]
async fn test_request_with_malformed_date_is_field_value_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_request(&conn, "REQ-003", OWNER, Some("31/01/2025"), None, None).unwrap();

    let repo = ShipmentRequestRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let err = repo.find_owned("REQ-003", OWNER).await.unwrap_err();

    match err {
        RepositoryError::FieldValueError { field, .. } => {
            assert_eq!(field, "shipment_requests.cargo_ready_date")
        }
        other => panic!("Expected FieldValueError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upsert_request_round_trip() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ShipmentRequestRepository::from_connection(open_shared_connection(&db_path).unwrap());

    let mut request = ShipmentRequest::new("REQ-010");
    request.delivery_required_date = Some(date(2025, 3, 1));
    repo.upsert(&request, OWNER).unwrap();

    request.value_usd = Some(42_000.0);
    repo.upsert(&request, OWNER).unwrap();

    assert_eq!(repo.find_owned("REQ-010", OWNER).await.unwrap(), Some(request));
}

#[tokio::test]
async fn test_list_by_request_joins_forwarder_names_and_keeps_all_statuses() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_standard_scenario(&conn).unwrap();

    let repo = QuoteRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let mut quotes = repo.list_by_request("REQ-001").await.unwrap();
    quotes.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(quotes.len(), 3);

    let air = &quotes[0];
    assert_eq!(air.id, "Q-AIR-1");
    assert_eq!(air.mode, TransportMode::Air);
    assert_eq!(air.forwarder_name(), Some("SkyBridge Air Cargo"));
    assert_eq!(air.transit_days, Some(5));
    assert_eq!(air.eta, Some(date(2025, 1, 6)));
    assert_eq!(air.currency, "USD");

    let expired = &quotes[1];
    assert_eq!(expired.id, "Q-SEA-1");
    assert_eq!(expired.status, QuoteStatus::Expired);
}

#[tokio::test]
async fn test_quote_without_forwarder_row_has_no_name() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_request(&conn, "REQ-004", OWNER, None, None, None).unwrap();
    insert_quote(&conn, "Q1", "REQ-004", "FWD-GONE", "sea", 800.0, None, None, "active").unwrap();

    let repo = QuoteRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let quotes = repo.list_by_request("REQ-004").await.unwrap();

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].forwarder, None);
    assert_eq!(quotes[0].eta, None);
}

#[tokio::test]
async fn test_stored_negative_amount_is_field_value_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_request(&conn, "REQ-005", OWNER, None, None, None).unwrap();
    insert_forwarder(&conn, "FWD-1", "Blue Anchor Logistics").unwrap();
    insert_quote(&conn, "Q1", "REQ-005", "FWD-1", "air", -10.0, None, None, "active").unwrap();

    let repo = QuoteRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let err = repo.list_by_request("REQ-005").await.unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::FieldValueError { ref field, .. } if field == "quotes.total_amount"
    ));
}

#[tokio::test]
async fn test_stored_text_amount_is_field_value_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_request(&conn, "REQ-007", OWNER, None, None, None).unwrap();
    conn.execute(
        "INSERT INTO quotes (id, request_id, forwarder_id, mode, total_amount) \
         VALUES ('Q1', 'REQ-007', 'FWD-1', 'air', 'twelve thousand')",
        [],
    )
    .unwrap();

    let repo = QuoteRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let err = repo.list_by_request("REQ-007").await.unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::FieldValueError { ref field, .. } if field == "quotes.total_amount"
    ));
}

#[tokio::test]
async fn test_stored_text_cargo_value_is_field_value_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    conn.execute(
        "INSERT INTO shipment_requests (id, owner_id, value_usd) VALUES ('REQ-008', ?1, 'n/a')",
        [OWNER],
    )
    .unwrap();

    let repo = ShipmentRequestRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let err = repo.find_owned("REQ-008", OWNER).await.unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::FieldValueError { ref field, .. } if field == "shipment_requests.value_usd"
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_store_reads_on_multi_thread_runtime() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    seed_standard_scenario(&conn).unwrap();

    let shared = open_shared_connection(&db_path).unwrap();
    let request_repo = ShipmentRequestRepository::from_connection(shared.clone());
    let quote_repo = QuoteRepository::from_connection(shared);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let request_repo = request_repo.clone();
        let quote_repo = quote_repo.clone();
        handles.push(tokio::spawn(async move {
            let request = request_repo.find_owned("REQ-001", OWNER).await.unwrap();
            let quotes = quote_repo.list_by_request("REQ-001").await.unwrap();
            (request.is_some(), quotes.len())
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), (true, 3));
    }
}

#[tokio::test]
async fn test_stored_unknown_status_is_field_value_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_request(&conn, "REQ-006", OWNER, None, None, None).unwrap();
    insert_quote(&conn, "Q1", "REQ-006", "FWD-1", "air", 10.0, None, None, "archived").unwrap();

    let repo = QuoteRepository::from_connection(open_shared_connection(&db_path).unwrap());
    let err = repo.list_by_request("REQ-006").await.unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::FieldValueError { ref field, .. } if field == "quotes.status"
    ));
}

#[tokio::test]
async fn test_insert_quote_round_trip() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let shared = open_shared_connection(&db_path).unwrap();
    let request_repo = ShipmentRequestRepository::from_connection(shared.clone());
    let quote_repo = QuoteRepository::from_connection(shared);

    request_repo.upsert(&ShipmentRequest::new("REQ-020"), OWNER).unwrap();
    let forwarder = ForwarderSummary {
        id: "FWD-9".to_string(),
        name: "Harbor Line".to_string(),
    };
    quote_repo.upsert_forwarder(&forwarder).unwrap();

    let quote = Quote {
        id: "Q-20".to_string(),
        request_id: "REQ-020".to_string(),
        forwarder_id: "FWD-9".to_string(),
        forwarder: Some(forwarder),
        mode: TransportMode::Sea,
        total_amount: 2_750.5,
        currency: "USD".to_string(),
        transit_days: Some(30),
        etd: Some(date(2025, 2, 1)),
        eta: Some(date(2025, 3, 3)),
        status: QuoteStatus::Selected,
    };
    quote_repo.insert(&quote).unwrap();

    assert_eq!(quote_repo.list_by_request("REQ-020").await.unwrap(), vec![quote]);
}
