use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use super::configure_routes;
use crate::state::AppState;

macro_rules! test_app {
    () => {
        test_app!(AppState::in_memory())
    };
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri)
}

fn delete(uri: &str) -> test::TestRequest {
    test::TestRequest::delete().uri(uri)
}

fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

fn put_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::put().uri(uri).set_json(body)
}

fn post_payload(title: &str, likes: i32, published: bool, user_id: i64) -> Value {
    json!({
        "title": title,
        "content": format!("{title} content"),
        "isPublished": published,
        "likesCount": likes,
        "user": { "id": user_id }
    })
}

fn header_str<B>(resp: &ServiceResponse<B>, name: header::HeaderName) -> String {
    let value = resp.headers().get(name).unwrap();
    value.to_str().unwrap().to_string()
}

const BOUNDARY: &str = "postboard-test-boundary";

fn multipart_request(file: &str) -> test::TestRequest {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"posts.json\"\r\n\
         Content-Type: application/json\r\n\r\n\
         {file}\r\n\
         --{BOUNDARY}--\r\n"
    );
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");

    test::TestRequest::post()
        .uri("/api/v1/posts/upload")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!();

    let (status, body) = call_json!(app, get("/api/health"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "in-memory");
}

#[actix_web::test]
async fn test_user_crud() {
    let app = test_app!();

    let user = json!({"username": "john doe", "email": "john.doe@example.com"});
    let req = post_json("/api/v1/users", user).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = header_str(&resp, header::LOCATION);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["username"], "john doe");
    assert_eq!(location, format!("/api/v1/users/{id}"));

    let uri = format!("/api/v1/users/{id}");
    let replacement = json!({"username": "johnny", "email": "johnny@example.com"});
    let (status, body) = call_json!(app, put_json(&uri, replacement));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "johnny");

    let (status, body) = call_json!(app, get("/api/v1/users"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], "johnny@example.com");

    let (status, body) = call_json!(app, delete(&uri));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully.");

    let (status, body) = call_json!(app, get(&uri));
    assert_eq!(status, StatusCode::NOT_FOUND);
    let expected = format!("An error occurred: User not found with id: {id}");
    assert_eq!(body["errorMessage"], expected);
}

#[actix_web::test]
async fn test_duplicate_username_is_bad_request() {
    let app = test_app!();
    let payload = json!({"username": "anna", "email": "anna@example.com"});

    let (status, _) = call_json!(app, post_json("/api/v1/users", payload.clone()));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(app, post_json("/api/v1/users", payload));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["errorMessage"].as_str().unwrap();
    assert!(message.starts_with("Invalid argument:"));
}

#[actix_web::test]
async fn test_post_crud() {
    let app = test_app!();
    let user = json!({"username": "a", "email": "a@x.com"});
    let (_, user) = call_json!(app, post_json("/api/v1/users", user));
    let user_id = user["id"].as_i64().unwrap();

    let post = json!({
        "title": "Test Post",
        "content": "This is a test post content.",
        "isPublished": true,
        "user": { "id": user_id }
    });
    let resp = test::call_service(&app, post_json("/api/v1/posts", post).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = header_str(&resp, header::LOCATION);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/v1/posts/{id}"));
    assert_eq!(created["title"], "Test Post");
    assert_eq!(created["content"], "This is a test post content.");
    assert_eq!(created["isPublished"], true);
    assert_eq!(created["likesCount"], 0);
    assert_eq!(created["user"]["id"], user_id);

    let uri = format!("/api/v1/posts/{id}");
    let (status, body) = call_json!(app, get(&uri));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "a");

    let replacement = post_payload("Updated", 7, false, user_id);
    let (status, body) = call_json!(app, put_json(&uri, replacement));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Updated");
    assert_eq!(body["likesCount"], 7);
    assert_eq!(body["isPublished"], false);

    let (status, body) = call_json!(app, delete(&uri));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully.");

    let (status, body) = call_json!(app, delete(&uri));
    assert_eq!(status, StatusCode::NOT_FOUND);
    let expected = format!("An error occurred: Post not found with id: {id}");
    assert_eq!(body["errorMessage"], expected);
}

#[actix_web::test]
async fn test_missing_post_is_not_found() {
    let app = test_app!();

    let (status, body) = call_json!(app, get("/api/v1/posts/404"));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["errorMessage"].as_str().unwrap().contains("404"));
    assert!(body.get("dateTime").is_some());
}

#[actix_web::test]
async fn test_create_post_for_missing_user_is_not_found() {
    let app = test_app!();
    let orphan = post_payload("Orphan", 0, true, 9999);

    let (status, body) = call_json!(app, post_json("/api/v1/posts", orphan));

    assert_eq!(status, StatusCode::NOT_FOUND);
    let expected = "An error occurred: User not found with id: 9999";
    assert_eq!(body["errorMessage"], expected);
}

#[actix_web::test]
async fn test_invalid_post_reports_field_errors() {
    let app = test_app!();
    let post = json!({
        "title": "t".repeat(101),
        "content": "",
        "isPublished": true,
        "user": {}
    });

    let (status, body) = call_json!(app, post_json("/api/v1/posts", post));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["fieldName"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"content"));
    assert!(fields.contains(&"user.id"));

    let title = errors.iter().find(|e| e["fieldName"] == "title").unwrap();
    assert_eq!(title["constraint"], "Title must be at most 100 characters");
}

#[actix_web::test]
async fn test_malformed_json_body_is_bad_request() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"username\": ");
    let (status, body) = call_json!(app, req);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["errorMessage"].as_str().unwrap();
    assert!(message.starts_with("Invalid argument:"));
}

#[actix_web::test]
async fn test_non_numeric_path_is_bad_request() {
    let app = test_app!();

    let (status, body) = call_json!(app, get("/api/v1/posts/abc"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errorMessage"].is_string());
}

/// Creates user `a` with three posts (likes 0/5/10, published true/false/true).
macro_rules! seed_scenario {
    ($app:expr) => {{
        let user = json!({"username": "a", "email": "a@x.com"});
        let req = post_json("/api/v1/users", user).to_request();
        let user: Value = test::call_and_read_body_json(&$app, req).await;
        let user_id = user["id"].as_i64().unwrap();

        let seeds = [(0, true), (5, false), (10, true)];
        for (i, (likes, published)) in seeds.into_iter().enumerate() {
            let post = post_payload(&format!("Post {i}"), likes, published, user_id);
            let req = post_json("/api/v1/posts", post).to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        user_id
    }};
}

#[actix_web::test]
async fn test_list_filters_and_paginates() {
    let app = test_app!();
    let user_id = seed_scenario!(app);

    let filter = json!({"userId": user_id, "likesCount": 5, "page": 0, "size": 10});
    let (status, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
    assert_eq!(status, StatusCode::OK);
    let list = body["list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|p| p["likesCount"].as_i64().unwrap() >= 5));
    assert_eq!(body["totalPages"], 1);

    let filter = json!({"userId": user_id, "isPublished": true, "page": 0, "size": 10});
    let (_, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
    let list = body["list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|p| p["isPublished"] == true));

    let filter = json!({"userId": user_id, "page": 1, "size": 2});
    let (_, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["list"].as_array().unwrap().len(), 1);
    assert_eq!(body["list"][0]["likesCount"], 10);
}

#[actix_web::test]
async fn test_list_rejects_bad_page_request() {
    let app = test_app!();

    for (page, size) in [(-1, 10), (0, 0), (0, -5)] {
        let filter = json!({"userId": 1, "page": page, "size": size});
        let (status, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
        assert_eq!(status, StatusCode::BAD_REQUEST, "page={page} size={size}");
        assert!(body["errors"].is_array());
    }
}

#[actix_web::test]
async fn test_report_is_csv_attachment() {
    let app = test_app!();
    let user_id = seed_scenario!(app);

    let filter = json!({"userId": user_id, "likesCount": 5});
    let req = post_json("/api/v1/posts/_report", filter).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CONTENT_TYPE), "text/csv");
    let disposition = header_str(&resp, header::CONTENT_DISPOSITION);
    assert_eq!(disposition, "attachment; filename=report.csv");

    let body = test::read_body(resp).await;
    let csv = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Post ID;Title;Content;Likes Count;Published;User ID");
    assert!(lines[1].ends_with(&format!(";5;false;{user_id}")));
}

#[actix_web::test]
async fn test_upload_counts_failures() {
    let app = test_app!();
    let user = json!({"username": "a", "email": "a@x.com"});
    let (_, user) = call_json!(app, post_json("/api/v1/users", user));
    let user_id = user["id"].as_i64().unwrap();

    let untitled = json!({
        "title": "",
        "content": "no title",
        "isPublished": true,
        "user": { "id": user_id }
    });
    let file = json!([
        post_payload("First", 1, true, user_id),
        post_payload("Second", 2, false, user_id),
        post_payload("Dangling", 3, true, 9999),
        untitled
    ])
    .to_string();

    let (status, body) = call_json!(app, multipart_request(&file));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["successfulImports"], 2);
    assert_eq!(body["failedImports"], 2);

    let filter = json!({"userId": user_id, "page": 0, "size": 10});
    let (_, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
    assert_eq!(body["list"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_upload_rejects_empty_and_non_array_files() {
    let app = test_app!();

    let (status, body) = call_json!(app, multipart_request(""));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errorMessage"].as_str().unwrap().contains("empty"));

    let (status, body) = call_json!(app, multipart_request(r#"{"title": "not a list"}"#));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected = "Invalid argument: Invalid JSON format: expected array";
    assert_eq!(body["errorMessage"], expected);

    let (status, _) = call_json!(app, multipart_request("[{"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_upload_over_limit_is_rejected_before_import() {
    let app = test_app!(AppState::in_memory().with_upload_limit(1024));
    let user = json!({"username": "a", "email": "a@x.com"});
    let (_, user) = call_json!(app, post_json("/api/v1/users", user));
    let user_id = user["id"].as_i64().unwrap();

    let posts: Vec<Value> = (0..100)
        .map(|i| post_payload(&format!("Post {i}"), i, true, user_id))
        .collect();
    let file = Value::Array(posts).to_string();
    assert!(file.len() > 1024);

    let (status, body) = call_json!(app, multipart_request(&file));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["errorMessage"].as_str().unwrap();
    assert!(message.contains("exceeds the limit of 1024 bytes"));

    let filter = json!({"userId": user_id, "page": 0, "size": 10});
    let (_, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
    assert_eq!(body["totalPages"], 0);
}

#[actix_web::test]
async fn test_upload_within_limit_is_imported() {
    let app = test_app!(AppState::in_memory().with_upload_limit(1024));
    let user = json!({"username": "a", "email": "a@x.com"});
    let (_, user) = call_json!(app, post_json("/api/v1/users", user));
    let user_id = user["id"].as_i64().unwrap();

    let file = json!([post_payload("Small", 0, true, user_id)]).to_string();

    let (status, body) = call_json!(app, multipart_request(&file));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["successfulImports"], 1);
}

#[actix_web::test]
async fn test_deleting_user_removes_posts() {
    let app = test_app!();
    let user_id = seed_scenario!(app);

    let filter = json!({"userId": user_id, "page": 0, "size": 10});
    let (_, body) = call_json!(app, post_json("/api/v1/posts/_list", filter));
    let ids: Vec<i64> = body["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);

    let (status, _) = call_json!(app, delete(&format!("/api/v1/users/{user_id}")));
    assert_eq!(status, StatusCode::OK);

    for id in ids {
        let req = get(&format!("/api/v1/posts/{id}")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
