//! Create / read / delete over HTTP.

use reqwest::header::{CONTENT_TYPE, ETAG, LOCATION};
use serde_json::{json, Value};

use crate::support::start_server;

#[tokio::test]
async fn health_check() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn get_coffee_by_id() {
    let server = start_server().await;
    let coffee = server.seed("My Coffee", 1);

    let resp = server
        .client
        .get(server.url(&format!("/coffee/{}", coffee.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(resp.headers()[LOCATION], format!("/coffee/{}", coffee.id));
    assert_eq!(resp.headers()[ETAG], "\"1\"");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": coffee.id, "name": "My Coffee", "version": 1 })
    );
}

#[tokio::test]
async fn get_missing_coffee_returns_404_with_empty_body() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/coffee/1")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_coffees_empty() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/coffees")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_coffees() {
    let server = start_server().await;
    server.seed("Coffee 1", 1);
    server.seed("Coffee 2", 1);
    server.seed("Coffee 3", 1);

    let resp = server.client.get(server.url("/coffees")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let coffees = body.as_array().unwrap();
    assert_eq!(coffees.len(), 3);
    assert_eq!(coffees[0]["name"], "Coffee 1");
}

#[tokio::test]
async fn get_coffees_by_name() {
    let server = start_server().await;
    server.seed("Coffee 1", 1);
    let wanted = server.seed("Coffee 2", 4);
    server.seed("Coffee 3", 1);

    let resp = server
        .client
        .get(server.url("/coffees"))
        .query(&[("name", "Coffee 2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!([{ "id": wanted.id, "name": "Coffee 2", "version": 4 }])
    );
}

#[tokio::test]
async fn create_coffee() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("/coffee"))
        .json(&json!({ "name": "Coffee 4" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()[ETAG], "\"1\"");

    let location = resp.headers()[LOCATION].to_str().unwrap().to_string();
    let body: Value = resp.json().await.unwrap();
    let id = body["id"].as_u64().unwrap();
    assert_eq!(location, format!("/coffee/{id}"));
    assert_eq!(body, json!({ "id": id, "name": "Coffee 4", "version": 1 }));

    // Location resolves to the created record
    let resp = server.client.get(server.url(&location)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn create_ignores_client_id_and_version() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("/coffee"))
        .json(&json!({ "id": 500, "name": "Coffee 5", "version": 42 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()[ETAG], "\"1\"");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["version"], 1);
    assert_ne!(body["id"], 500);
    assert!(server.stored(500).is_none());
}

#[tokio::test]
async fn create_without_name_is_rejected() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("/coffee"))
        .json(&json!({ "version": 1 }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
    assert!(server.store_is_empty());
}

#[tokio::test]
async fn delete_coffee_then_get_and_delete_again() {
    let server = start_server().await;
    let coffee = server.seed("Cold Coffee", 2);
    let path = format!("/coffee/{}", coffee.id);

    let resp = server.client.delete(server.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().is_empty());

    let resp = server.client.get(server.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = server.client.delete(server.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_missing_coffee_returns_404() {
    let server = start_server().await;

    let resp = server.client.delete(server.url("/coffee/1")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let server = start_server().await;
    let first = server.seed("A", 1);
    server
        .client
        .delete(server.url(&format!("/coffee/{}", first.id)))
        .send()
        .await
        .unwrap();

    let resp = server
        .client
        .post(server.url("/coffee"))
        .json(&json!({ "name": "B" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_ne!(body["id"], first.id);
}
