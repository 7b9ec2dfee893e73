use serde_json::json;

mod common;
use common::TestEnvironment;

#[tokio::test]
async fn test_client_lifecycle() {
    let env = TestEnvironment::new().await;

    // Create with an explicit username
    let body = env
        .add_client(json!({ "username": "user0", "name": "myname" }))
        .await;
    assert_eq!(
        body,
        "Client = { username = user0, name = myname, \
         cart = ShoppingCart = { nextProductId = 0, numberProducts = 0 } }"
    );

    // Read it back
    let response = env
        .client
        .get(&format!("{}/user0", env.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), body);

    // Remove it; the id is echoed
    let response = env
        .client
        .delete(&format!("{}/user0", env.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "user0");

    // Gone afterwards
    let body = env
        .client
        .get(&format!("{}/user0", env.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "Error, no such client: user0");
}

#[tokio::test]
async fn test_missing_client_lookup_is_200_with_error_string() {
    let env = TestEnvironment::new().await;

    let response = env
        .client
        .get(&format!("{}/nobody", env.base_url))
        .send()
        .await
        .unwrap();

    // Misses are formatted strings in a success response, never an error status
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        "Error, no such client: nobody"
    );
}

#[tokio::test]
async fn test_anonymous_usernames_are_assigned_in_order() {
    let env = TestEnvironment::new().await;

    let first = env.add_client(json!({ "name": "a" })).await;
    assert!(first.contains("username = client1"), "got: {}", first);

    // An explicit username in between does not advance the numbering
    env.add_client(json!({ "username": "named", "name": "b" }))
        .await;

    let second = env.add_client(json!({ "name": "c" })).await;
    assert!(second.contains("username = client2"), "got: {}", second);
}

#[tokio::test]
async fn test_cart_worked_example() {
    let env = TestEnvironment::new().await;

    env.add_client(json!({ "username": "user0", "name": "myname" }))
        .await;

    // Empty cart renders as []
    assert_eq!(env.get_products("user0").await, "[]");

    // One banana; the harness posts amount as a string
    let body = env
        .add_product(json!({ "username": "user0", "name": "Banana", "amount": "1" }))
        .await;
    assert!(
        body.starts_with("Product = { id = user0$0, name = Banana, quantity = 1, timestamp = "),
        "got: {}",
        body
    );
    assert!(
        body.ends_with("price = Price = { currency = EUR, amount = 1.000000 } }"),
        "got: {}",
        body
    );

    let listing = env.get_products("user0").await;
    assert!(listing.starts_with("[Product = { id = user0$0"), "got: {}", listing);
    assert!(!listing.contains(", Product"), "expected one element: {}", listing);

    // Remove the banana; the product id is echoed
    let response = env
        .client
        .delete(&format!("{}/cart", env.base_url))
        .json(&json!({ "id": "user0$0", "username": "user0" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "user0$0");

    assert_eq!(env.get_products("user0").await, "[]");
}

#[tokio::test]
async fn test_counters_and_id_reuse() {
    let env = TestEnvironment::new().await;
    env.add_client(json!({ "username": "user0", "name": "n" }))
        .await;

    env.add_product(json!({ "username": "user0", "name": "A", "amount": 1 }))
        .await;
    env.add_product(json!({ "username": "user0", "name": "B", "amount": 2 }))
        .await;

    let client = env.shop_service.get_client("user0").await.unwrap();
    assert_eq!(client.cart.next_product_id, 2);
    assert_eq!(client.cart.number_products, 2);

    env.client
        .delete(&format!("{}/cart", env.base_url))
        .json(&json!({ "id": "user0$0", "username": "user0" }))
        .send()
        .await
        .unwrap();

    // Removal decrements only the product count; ids are never reused
    let client = env.shop_service.get_client("user0").await.unwrap();
    assert_eq!(client.cart.next_product_id, 2);
    assert_eq!(client.cart.number_products, 1);

    let body = env
        .add_product(json!({ "username": "user0", "name": "C", "amount": 1 }))
        .await;
    assert!(body.contains("id = user0$2"), "got: {}", body);

    // The listing skips the removed id and keeps increasing order
    let listing = env.get_products("user0").await;
    let pos_b = listing.find("user0$1").expect("B present");
    let pos_c = listing.find("user0$2").expect("C present");
    assert!(!listing.contains("user0$0"), "removed product still listed: {}", listing);
    assert!(pos_b < pos_c);
}

#[tokio::test]
async fn test_client_removal_cascades_to_products() {
    let env = TestEnvironment::new().await;
    env.add_client(json!({ "username": "user0", "name": "n" }))
        .await;
    for name in ["A", "B", "C"] {
        env.add_product(json!({ "username": "user0", "name": name, "amount": 1 }))
            .await;
    }

    env.client
        .delete(&format!("{}/user0", env.base_url))
        .send()
        .await
        .unwrap();

    for i in 0..3 {
        assert!(env
            .shop_service
            .get_product(&format!("user0${}", i))
            .await
            .is_none());
    }
    assert_eq!(env.shop_service.cache_entries().await, 0);
}

#[tokio::test]
async fn test_memory_endpoint_reports_kilobytes() {
    let env = TestEnvironment::new().await;

    let body = env
        .client
        .get(&format!("{}/memory", env.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let _kb: u64 = body.parse().expect("memory body is an integer");
}

#[tokio::test]
async fn test_parse_probe_endpoint() {
    let env = TestEnvironment::new().await;

    let body = env
        .client
        .get(&format!("{}/parse/", env.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "test");
}

#[tokio::test]
async fn test_parse_rejects_unknown_media_type() {
    let env = TestEnvironment::new().await;

    let response = env
        .client
        .post(&format!("{}/parse/text", env.base_url))
        .header("content-type", "text/csv")
        .body("a,b,c")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 415);
}

#[tokio::test]
async fn test_parse_rejects_broken_document() {
    let env = TestEnvironment::new().await;

    let response = env
        .client
        .post(&format!("{}/parse/text", env.base_url))
        .header("content-type", "application/pdf")
        .body("definitely not a pdf")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn test_document_over_default_extractor_limit_is_accepted() {
    let env = TestEnvironment::new().await;

    // 3MB: above axum's stock 2MB body cap, below the configured 10MB budget.
    // The payload must reach the extractor and fail as a broken PDF, not be
    // rejected up front as too large.
    let payload = vec![0u8; 3 * 1024 * 1024];
    let response = env
        .client
        .post(&format!("{}/parse/text", env.base_url))
        .header("content-type", "application/pdf")
        .body(payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn test_document_over_configured_limit_is_rejected() {
    let env = TestEnvironment::new().await;

    let payload = vec![0u8; 11 * 1024 * 1024];
    let response = env
        .client
        .post(&format!("{}/parse/text", env.base_url))
        .header("content-type", "application/pdf")
        .body(payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 413);
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let env = TestEnvironment::new().await;

    let response = env
        .client
        .get(&format!("{}/health/status", env.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let health: serde_json::Value = response.json().await.unwrap();
    assert_eq!(health["status"], "healthy");
    assert!(health["cache_entries"].is_u64());
    assert!(health["price_table_entries"].is_u64());

    // Drive one request through so the counters exist, then scrape
    env.add_client(json!({ "username": "m", "name": "m" })).await;
    let body = env
        .client
        .get(&format!("{}/metrics", env.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("shop_operations_total"));
}
