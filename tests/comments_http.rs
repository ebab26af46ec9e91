use std::sync::Arc;

use bytes::Bytes;
use commentd::comment::routes::NOT_FOUND_MESSAGE;
use commentd::{Comment, CommentId, CommentStore, Response, Router};
use http_body_util::Full;
use serde_json::{json, Value};

fn id(raw: u64) -> CommentId {
    CommentId::new(raw).unwrap()
}

fn setup() -> (Arc<CommentStore>, Arc<Router>) {
    let store = Arc::new(
        CommentStore::seeded([Comment::new(id(1), "a"), Comment::new(id(2), "b")]).unwrap(),
    );
    let app = Arc::new(commentd::app(Arc::clone(&store)));
    (store, app)
}

async fn send(app: &Arc<Router>, method: &str, path: &str, body: &str) -> Response {
    let req = http::Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_owned())))
        .unwrap();
    app.oneshot(req).await
}

fn json_body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

fn assert_not_found(res: &Response) {
    assert_eq!(res.status_code(), http::StatusCode::NOT_FOUND);
    assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    assert_eq!(std::str::from_utf8(res.body()).unwrap(), NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn get_returns_the_comment() {
    let (_, app) = setup();

    let res = send(&app, "GET", "/comments/2", "").await;

    assert_eq!(res.status_code(), http::StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(json_body(&res), json!({"id": 2, "text": "b"}));
}

#[tokio::test]
async fn list_returns_all_comments_in_order() {
    let (_, app) = setup();

    let res = send(&app, "GET", "/comments", "").await;

    assert_eq!(json_body(&res), json!([{"id": 1, "text": "a"}, {"id": 2, "text": "b"}]));
}

#[tokio::test]
async fn unknown_and_unparseable_ids_are_404() {
    let (store, app) = setup();

    for path in ["/comments/9", "/comments/abc", "/comments/0", "/comments/12abc"] {
        assert_not_found(&send(&app, "GET", path, "").await);
        assert_not_found(&send(&app, "PATCH", path, r#"{"text":"x"}"#).await);
        assert_not_found(&send(&app, "DELETE", path, "").await);
    }
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn patch_updates_text_and_returns_the_record() {
    let (store, app) = setup();

    let res = send(&app, "PATCH", "/comments/1", r#"{"text":"z","id":99}"#).await;

    assert_eq!(res.status_code(), http::StatusCode::OK);
    assert_eq!(json_body(&res), json!({"id": 1, "text": "z"}));
    assert_eq!(store.find(id(1)).unwrap().text, "z");
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn patch_with_bad_body_is_400_and_changes_nothing() {
    let (store, app) = setup();

    for body in ["", "not json", r#"{"txt":"z"}"#, r#"{"text":5}"#] {
        let res = send(&app, "PATCH", "/comments/1", body).await;
        assert_eq!(res.status_code(), http::StatusCode::BAD_REQUEST, "body {body:?}");
    }
    assert_eq!(store.find(id(1)).unwrap().text, "a");
}

#[tokio::test]
async fn delete_returns_snapshot_then_404() {
    let (store, app) = setup();

    let res = send(&app, "DELETE", "/comments/1", "").await;
    assert_eq!(res.status_code(), http::StatusCode::OK);
    assert_eq!(json_body(&res), json!({"id": 1, "text": "a"}));
    assert_eq!(store.len(), 1);

    assert_not_found(&send(&app, "DELETE", "/comments/1", "").await);
    assert_not_found(&send(&app, "GET", "/comments/1", "").await);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn scenario_update_then_delete() {
    let (store, app) = setup();

    let res = send(&app, "PATCH", "/comments/1", r#"{"text":"z"}"#).await;
    assert_eq!(json_body(&res), json!({"id": 1, "text": "z"}));

    let res = send(&app, "DELETE", "/comments/1", "").await;
    assert_eq!(json_body(&res), json!({"id": 1, "text": "z"}));

    assert_eq!(store.list(), vec![Comment::new(id(2), "b")]);
    assert_not_found(&send(&app, "GET", "/comments/1", "").await);
}

#[tokio::test]
async fn unsupported_method_is_405() {
    let (_, app) = setup();

    let res = send(&app, "POST", "/comments/1", r#"{"text":"new"}"#).await;

    assert_eq!(res.status_code(), http::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.header("allow"), Some("DELETE, GET, PATCH"));
}

#[tokio::test]
async fn concurrent_deletes_succeed_exactly_once() {
    let (store, app) = setup();

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { send(&app, "DELETE", "/comments/2", "").await.status_code() })
        })
        .collect();

    let mut ok = 0;
    for task in tasks {
        if task.await.unwrap() == http::StatusCode::OK {
            ok += 1;
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(store.list(), vec![Comment::new(id(1), "a")]);
}
