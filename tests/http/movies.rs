//! Movie CRUD over HTTP.

use serde_json::{json, Value};

use crate::support::{new_movie, start_server, SHAWSHANK_ID};

#[tokio::test]
async fn list_returns_all_movies() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/movies")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(body.len(), movies_api::seed_movies().unwrap().len());
}

#[tokio::test]
async fn list_filters_by_genre_case_insensitively() {
    let server = start_server().await;

    let resp = server
        .client
        .get(server.url("/movies?genre=sci-fi"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Vec<Value> = resp.json().await.unwrap();
    assert!(!body.is_empty());
    for movie in &body {
        let genres = movie["genre"].as_array().unwrap();
        assert!(genres.iter().any(|g| g == "Sci-Fi"));
    }

    let resp = server
        .client
        .get(server.url("/movies?genre=Western"))
        .send()
        .await
        .unwrap();
    let body: Vec<Value> = resp.json().await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_by_id() {
    let server = start_server().await;

    let resp = server
        .client
        .get(server.url(&format!("/movies/{SHAWSHANK_ID}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], SHAWSHANK_ID);
    assert_eq!(body["title"], "The Shawshank Redemption");
}

#[tokio::test]
async fn get_unknown_returns_404() {
    let server = start_server().await;

    for id in ["00000000-0000-0000-0000-000000000000", "not-a-uuid"] {
        let resp = server
            .client
            .get(server.url(&format!("/movies/{id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "message": "Movie not found" }));
    }
}

#[tokio::test]
async fn create_returns_201_with_new_id() {
    let server = start_server().await;

    let existing: Vec<Value> = server
        .client
        .get(server.url("/movies"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let resp = server
        .client
        .post(server.url("/movies"))
        .json(&new_movie())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(existing.iter().all(|m| m["id"] != id.as_str()));
    assert_eq!(created["title"], "Spirited Away");

    let resp = server
        .client
        .get(server.url(&format!("/movies/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_defaults_rate() {
    let server = start_server().await;
    let mut payload = new_movie();
    payload.as_object_mut().unwrap().remove("rate");

    let resp = server
        .client
        .post(server.url("/movies"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["rate"], json!(5.0));
}

#[tokio::test]
async fn create_invalid_returns_422_and_does_not_mutate() {
    let server = start_server().await;
    let mut payload = new_movie();
    payload.as_object_mut().unwrap().remove("title");

    let resp = server
        .client
        .post(server.url("/movies"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    let errors = body["error"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["path"] == json!(["title"])));

    let all: Vec<Value> = server
        .client
        .get(server.url("/movies"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), movies_api::seed_movies().unwrap().len());
    assert!(all.iter().all(|m| m["director"] != "Hayao Miyazaki"));
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let server = start_server().await;
    let url = server.url(&format!("/movies/{SHAWSHANK_ID}"));

    let before: Value = server.client.get(&url).send().await.unwrap().json().await.unwrap();

    let resp = server
        .client
        .patch(&url)
        .json(&json!({ "year": 1995, "id": "hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"], SHAWSHANK_ID);
    assert_eq!(updated["year"], 1995);
    for field in ["title", "director", "duration", "rate", "poster", "genre"] {
        assert_eq!(updated[field], before[field], "{field} changed");
    }

    let after: Value = server.client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(after, updated);
}

#[tokio::test]
async fn patch_invalid_returns_422() {
    let server = start_server().await;

    let resp = server
        .client
        .patch(server.url(&format!("/movies/{SHAWSHANK_ID}")))
        .json(&json!({ "rate": 42 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"][0]["path"], json!(["rate"]));
    assert_eq!(body["error"][0]["code"], "too_big");
}

#[tokio::test]
async fn patch_unknown_returns_404() {
    let server = start_server().await;

    let resp = server
        .client
        .patch(server.url("/movies/00000000-0000-0000-0000-000000000000"))
        .json(&json!({ "rate": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let server = start_server().await;
    let url = server.url(&format!("/movies/{SHAWSHANK_ID}"));

    let resp = server.client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Movie deleted" }));

    let resp = server.client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = server.client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn servers_do_not_share_state() {
    let first = start_server().await;
    let second = start_server().await;

    let resp = first
        .client
        .delete(first.url(&format!("/movies/{SHAWSHANK_ID}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = second
        .client
        .get(second.url(&format!("/movies/{SHAWSHANK_ID}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn unmatched_route_returns_plain_404() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/actors")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "Error 404");

    let resp = server
        .client
        .put(server.url(&format!("/movies/{SHAWSHANK_ID}")))
        .json(&new_movie())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn health_check() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["movies"], movies_api::seed_movies().unwrap().len());
}

#[tokio::test]
async fn create_without_json_content_type_is_validated_as_empty() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("/movies"))
        .body("")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    let errors = body["error"].as_array().unwrap();
    for field in ["title", "year", "director", "duration", "poster", "genre"] {
        assert!(
            errors.iter().any(|e| e["path"] == json!([field])),
            "missing error for {field}"
        );
    }
}

#[tokio::test]
async fn patch_without_body_leaves_movie_unchanged() {
    let server = start_server().await;
    let url = server.url(&format!("/movies/{SHAWSHANK_ID}"));

    let before: Value = server.client.get(&url).send().await.unwrap().json().await.unwrap();

    let resp = server.client.patch(&url).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, before);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let server = start_server().await;

    let resp = server
        .client
        .post(server.url("/movies"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"{"title": "#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let all: Vec<Value> = server
        .client
        .get(server.url("/movies"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), movies_api::seed_movies().unwrap().len());
}

#[tokio::test]
async fn trailing_slash_is_accepted() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/movies/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(body.len(), movies_api::seed_movies().unwrap().len());

    let resp = server
        .client
        .get(server.url(&format!("/movies/{SHAWSHANK_ID}/")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], SHAWSHANK_ID);
}
