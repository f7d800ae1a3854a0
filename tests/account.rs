use miette::Result;
use parasut_rs::{
    Currency, Error, ListParameters,
    entities::account::{AccountAttributes, AccountType},
};
use reqwest::StatusCode;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};


#[tokio::test]
async fn list_accounts_with_page_and_filter() -> Result<()> {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/123/accounts"))
        .and(query_param("page[number]", "2"))
        .and(query_param("page[size]", "25"))
        .and(query_param("sort", "-balance"))
        .and(query_param("filter[currency]", "TRL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "1",
                "type": "accounts",
                "attributes": {
                    "name": "Kasa",
                    "currency": "TRL",
                    "account_type": "cash",
                    "balance": "1000.0",
                    "created_at": "2024-01-15T10:30:00.000+03:00"
                }
            }],
            "meta": {"current_page": 2, "total_pages": 2, "total_count": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    let parameters = ListParameters::builder()
        .with_page(2)
        .with_page_size(25)
        .with_sort("-balance")
        .with_filter("currency", "TRL");
    let accounts = client.accounts().list(&parameters).await?;

    assert_eq!(accounts.data.len(), 1);
    let account = &accounts.data[0];
    assert_eq!(account.resource_type, "accounts");
    assert_eq!(account.attributes.account_type, AccountType::Cash);
    assert_eq!(account.attributes.balance, Some(dec!(1000.0)));
    assert!(account.attributes.created_at.is_some());

    let meta = accounts.meta.expect("meta should be present");
    assert_eq!(meta.current_page, 2);
    assert_eq!(meta.total_count, 1);
    Ok(())
}

#[tokio::test]
async fn list_first_page_with_numeric_balance() -> Result<()> {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/123/accounts"))
        .and(query_param("page[number]", "1"))
        .and(query_param("page[size]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "1",
                "type": "accounts",
                "attributes": {
                    "name": "Kasa",
                    "currency": null,
                    "account_type": "cash",
                    "balance": 1000.0
                }
            }],
            "meta": {"current_page": 1, "total_pages": 1, "total_count": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    let parameters = ListParameters::builder().with_page(1).with_page_size(10);
    let accounts = client.accounts().list(&parameters).await?;

    assert_eq!(accounts.data.len(), 1);
    let account = &accounts.data[0];
    assert_eq!(account.id, "1");
    assert_eq!(account.attributes.name, "Kasa");
    assert_eq!(account.attributes.currency, Currency::Trl);
    assert_eq!(account.attributes.balance, Some(dec!(1000)));

    let meta = accounts.meta.expect("meta should be present");
    assert_eq!(meta.current_page, 1);
    assert_eq!(meta.total_count, 1);
    Ok(())
}

#[tokio::test]
async fn create_account_sends_type_without_relationships() -> Result<()> {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/123/accounts"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "42",
                "type": "accounts",
                "attributes": {"name": "Ziraat", "currency": "USD", "account_type": "bank"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    let attributes = AccountAttributes::new("Ziraat", Currency::Usd, AccountType::Bank);
    let created = client.accounts().create(&attributes).await?;
    assert_eq!(created.id, "42");
    assert_eq!(created.attributes.currency, Currency::Usd);

    let requests = server.received_requests().await.expect("recording is enabled");
    let body: Value = requests[0].body_json().expect("request body is json");
    assert_eq!(
        body,
        json!({
            "data": {
                "type": "accounts",
                "attributes": {"name": "Ziraat", "currency": "USD", "account_type": "bank"}
            }
        })
    );
    Ok(())
}

#[tokio::test]
async fn update_account_puts_full_record_with_id() -> Result<()> {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v4/123/accounts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "42",
                "type": "accounts",
                "attributes": {"name": "Renamed", "currency": "TRL", "account_type": "cash"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    let attributes = AccountAttributes::new("Renamed", Currency::Trl, AccountType::Cash);
    let updated = client.accounts().update("42", &attributes).await?;
    assert_eq!(updated.attributes.name, "Renamed");

    let requests = server.received_requests().await.expect("recording is enabled");
    let body: Value = requests[0].body_json().expect("request body is json");
    assert_eq!(body["data"]["id"], "42");
    assert_eq!(body["data"]["type"], "accounts");
    assert!(body["data"].get("relationships").is_none());
    Ok(())
}

#[tokio::test]
async fn delete_succeeds_for_empty_responses() -> Result<()> {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v4/123/accounts/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v4/123/accounts/2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    client.accounts().delete("1").await?;
    client.accounts().delete("2").await?;
    Ok(())
}

#[tokio::test]
async fn delete_tolerates_error_status() -> Result<()> {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v4/123/accounts/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"title": "Not Found", "detail": "Record not found"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    client.accounts().delete("404").await?;
    Ok(())
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/123/accounts"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [
                {"title": "Validation Error", "detail": "Name is required"},
                {"title": "Authorization Error", "detail": "Invalid token"}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    let attributes = AccountAttributes::new("", Currency::Trl, AccountType::Cash);
    let error = client
        .accounts()
        .create(&attributes)
        .await
        .expect_err("422 should fail");

    assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    match error {
        Error::Api { url, response, .. } => {
            assert!(url.ends_with("/v4/123/accounts"));
            assert_eq!(
                response.to_string(),
                "Validation Error: Name is required; Authorization Error: Invalid token"
            );
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_keeps_raw_text() {
    test_utils::do_setup();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/123/accounts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": [1, 2"))
        .mount(&server)
        .await;

    let client = test_utils::authenticated_client(&server);
    let error = client.accounts().get("1").await.expect_err("bad json should fail");
    match error {
        Error::DeserializationError(_, Some(text)) => assert_eq!(text, "{\"data\": [1, 2"),
        other => panic!("expected deserialization error, got {other:?}"),
    }
}
