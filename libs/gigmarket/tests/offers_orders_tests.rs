mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{create_offer, delete, get, patch, post, register, test_app, three_tiers};

#[tokio::test]
async fn business_user_creates_offer_with_three_tiers() {
    let app = test_app().await;
    let (token, _) = register(&app, "studio", "business").await;

    let body = create_offer(&app, &token, "Logo design").await;
    assert_eq!(body["title"], "Logo design");
    let details = body["details"].as_array().expect("details");
    assert_eq!(details.len(), 3);
    let tiers: Vec<&str> = details
        .iter()
        .map(|d| d["offer_type"].as_str().unwrap())
        .collect();
    assert_eq!(tiers, ["basic", "standard", "premium"]);
}

#[tokio::test]
async fn customer_cannot_create_offer() {
    let app = test_app().await;
    let (token, _) = register(&app, "buyer", "customer").await;

    let (status, _) = post(
        &app,
        "/api/offers",
        Some(&token),
        json!({
            "title": "Nope",
            "image": null,
            "description": "x",
            "details": three_tiers(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn incomplete_tier_set_is_rejected_and_nothing_persists() {
    let app = test_app().await;
    let (token, _) = register(&app, "studio", "business").await;

    let mut details = three_tiers();
    details.as_array_mut().unwrap().pop();
    let (status, _) = post(
        &app,
        "/api/offers",
        Some(&token),
        json!({
            "title": "Broken",
            "image": null,
            "description": "x",
            "details": details,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate tiers fail too.
    let mut details = three_tiers();
    details.as_array_mut().unwrap()[1]["offer_type"] = json!("basic");
    let (status, _) = post(
        &app,
        "/api/offers",
        Some(&token),
        json!({
            "title": "Broken",
            "image": null,
            "description": "x",
            "details": details,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/offers", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn offer_list_is_public_and_paginated() {
    let app = test_app().await;
    let (token, _) = register(&app, "studio", "business").await;
    for i in 0..3 {
        create_offer(&app, &token, &format!("Offer {i}")).await;
    }

    let (status, body) = get(&app, "/api/offers?page_size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let item = &body["results"][0];
    assert_eq!(item["min_price"], 50.0);
    assert_eq!(item["min_delivery_time"], 5);
    assert_eq!(item["user_details"]["username"], "studio");

    let (_, page2) = get(&app, "/api/offers?page_size=2&page=2", None).await;
    assert_eq!(page2["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn offer_list_filters_and_search() {
    let app = test_app().await;
    let (token, user_id) = register(&app, "studio", "business").await;
    let (other_token, _) = register(&app, "atelier", "business").await;
    create_offer(&app, &token, "Logo design").await;
    create_offer(&app, &other_token, "Video editing").await;

    let (_, body) = get(&app, &format!("/api/offers?creator_id={user_id}"), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Logo design");

    let (_, body) = get(&app, "/api/offers?search=video", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["title"], "Video editing");

    // Matching is case-insensitive in both directions.
    let (_, body) = get(&app, "/api/offers?search=VIDEO", None).await;
    assert_eq!(body["count"], 1);
    let (_, body) = get(&app, "/api/offers?search=LoGo", None).await;
    assert_eq!(body["count"], 1);

    let (_, body) = get(&app, "/api/offers?max_delivery_time=5", None).await;
    assert_eq!(body["count"], 2);

    let (_, body) = get(&app, "/api/offers?min_price=60", None).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn offer_update_upserts_single_tier() {
    let app = test_app().await;
    let (token, _) = register(&app, "studio", "business").await;
    let offer = create_offer(&app, &token, "Logo design").await;
    let offer_id = offer["id"].as_str().unwrap();

    let (status, body) = patch(
        &app,
        &format!("/api/offers/{offer_id}"),
        Some(&token),
        json!({
            "details": [{
                "title": "Basic plus",
                "revisions": 3,
                "delivery_time_in_days": 4,
                "price": 60.0,
                "features": ["Logo", "Icon"],
                "offer_type": "basic",
            }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    let basic = details
        .iter()
        .find(|d| d["offer_type"] == "basic")
        .unwrap();
    assert_eq!(basic["title"], "Basic plus");
    assert_eq!(basic["price"], 60.0);
}

#[tokio::test]
async fn offer_update_and_delete_are_owner_only() {
    let app = test_app().await;
    let (owner_token, _) = register(&app, "studio", "business").await;
    let (other_token, _) = register(&app, "rival", "business").await;
    let offer = create_offer(&app, &owner_token, "Logo design").await;
    let offer_id = offer["id"].as_str().unwrap();

    let (status, _) = patch(
        &app,
        &format!("/api/offers/{offer_id}"),
        Some(&other_token),
        json!({"title": "Hijacked"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete(&app, &format!("/api/offers/{offer_id}"), Some(&other_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete(&app, &format!("/api/offers/{offer_id}"), Some(&owner_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &format!("/api/offers/{offer_id}"), Some(&owner_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn first_detail_id(app: &axum::Router, token: &str, offer: &Value) -> String {
    let offer_id = offer["id"].as_str().unwrap();
    let (_, body) = get(app, &format!("/api/offers/{offer_id}"), Some(token)).await;
    body["details"][0]["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn order_snapshots_survive_offer_edits() {
    let app = test_app().await;
    let (biz_token, _) = register(&app, "studio", "business").await;
    let (customer_token, _) = register(&app, "buyer", "customer").await;
    let offer = create_offer(&app, &biz_token, "Logo design").await;
    let detail_id = first_detail_id(&app, &biz_token, &offer).await;

    let (status, order) = post(
        &app,
        "/api/orders",
        Some(&customer_token),
        json!({"offer_detail_id": detail_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "in_progress");
    assert_eq!(order["price"], 50.0);

    // Reprice the basic tier; the order keeps its frozen copy.
    let offer_id = offer["id"].as_str().unwrap();
    patch(
        &app,
        &format!("/api/offers/{offer_id}"),
        Some(&biz_token),
        json!({
            "details": [{
                "title": "Basic package",
                "revisions": 2,
                "delivery_time_in_days": 5,
                "price": 999.0,
                "features": ["Logo"],
                "offer_type": "basic",
            }],
        }),
    )
    .await;

    let order_id = order["id"].as_str().unwrap();
    let (_, fetched) = get(&app, &format!("/api/orders/{order_id}"), Some(&customer_token)).await;
    assert_eq!(fetched["price"], 50.0);
    assert_eq!(fetched["title"], "Basic package");
}

#[tokio::test]
async fn business_users_cannot_place_orders() {
    let app = test_app().await;
    let (biz_token, _) = register(&app, "studio", "business").await;
    let offer = create_offer(&app, &biz_token, "Logo design").await;
    let detail_id = first_detail_id(&app, &biz_token, &offer).await;

    let (status, _) = post(
        &app,
        "/api/orders",
        Some(&biz_token),
        json!({"offer_detail_id": detail_id}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn order_listing_is_scoped_to_participants() {
    let app = test_app().await;
    let (biz_token, _) = register(&app, "studio", "business").await;
    let (customer_token, _) = register(&app, "buyer", "customer").await;
    let (outsider_token, _) = register(&app, "watcher", "customer").await;
    let offer = create_offer(&app, &biz_token, "Logo design").await;
    let detail_id = first_detail_id(&app, &biz_token, &offer).await;

    let (_, order) = post(
        &app,
        "/api/orders",
        Some(&customer_token),
        json!({"offer_detail_id": detail_id}),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    for token in [&biz_token, &customer_token] {
        let (_, list) = get(&app, "/api/orders", Some(token)).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }
    let (_, list) = get(&app, "/api/orders", Some(&outsider_token)).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = get(&app, &format!("/api/orders/{order_id}"), Some(&outsider_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_the_business_side_updates_order_status() {
    let app = test_app().await;
    let (biz_token, biz_id) = register(&app, "studio", "business").await;
    let (customer_token, _) = register(&app, "buyer", "customer").await;
    let offer = create_offer(&app, &biz_token, "Logo design").await;
    let detail_id = first_detail_id(&app, &biz_token, &offer).await;

    let (_, order) = post(
        &app,
        "/api/orders",
        Some(&customer_token),
        json!({"offer_detail_id": detail_id}),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let (status, _) = patch(
        &app,
        &format!("/api/orders/{order_id}"),
        Some(&customer_token),
        json!({"status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = patch(
        &app,
        &format!("/api/orders/{order_id}"),
        Some(&biz_token),
        json!({"status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    // Bogus status values are a validation error.
    let (status, _) = patch(
        &app,
        &format!("/api/orders/{order_id}"),
        Some(&biz_token),
        json!({"status": "on_hold"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, counts) = get(
        &app,
        &format!("/api/order-count/{biz_id}"),
        Some(&customer_token),
    )
    .await;
    assert_eq!(counts["order_count"], 0);
    let (_, counts) = get(
        &app,
        &format!("/api/completed-order-count/{biz_id}"),
        Some(&customer_token),
    )
    .await;
    assert_eq!(counts["completed_order_count"], 1);
}

#[tokio::test]
async fn order_counts_404_for_unknown_business_user() {
    let app = test_app().await;
    let (token, _) = register(&app, "buyer", "customer").await;

    let (status, _) = get(
        &app,
        "/api/order-count/00000000-0000-0000-0000-000000000000",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_delete_is_staff_only() {
    let app = test_app().await;
    let (biz_token, _) = register(&app, "studio", "business").await;
    let (customer_token, _) = register(&app, "buyer", "customer").await;
    let offer = create_offer(&app, &biz_token, "Logo design").await;
    let detail_id = first_detail_id(&app, &biz_token, &offer).await;

    let (_, order) = post(
        &app,
        "/api/orders",
        Some(&customer_token),
        json!({"offer_detail_id": detail_id}),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    for token in [&biz_token, &customer_token] {
        let (status, _) = delete(&app, &format!("/api/orders/{order_id}"), Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
