// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod common;

use std::time::Duration;

use common::{CURSOR_PATH, connect, text};
use docdb_client::{Error, Method, Query, TransportError};
use futures_util::StreamExt;

const QUERY: &str = "FOR c IN customer RETURN c";

fn put_path(id: &str) -> String {
	format!("{}/{}", CURSOR_PATH, id)
}

#[tokio::test]
async fn test_single_empty_page() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "errorMessage": "", "result": []}"#);

	let result = connection.run(&Query::new(QUERY)).await.unwrap();
	assert_eq!(text(result), "[]");
	assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_missing_result_is_empty() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false}"#);

	let result = connection.run(&Query::new(QUERY)).await.unwrap();
	assert_eq!(text(result), "[]");
}

#[tokio::test]
async fn test_two_pages_merged() {
	let (connection, mock) = connect();
	mock.register(
		Method::Post,
		CURSOR_PATH,
		200,
		r#"{"error": false, "errorMessage": "", "result": [{}], "hasMore":true, "id":"1000"}"#,
	);
	mock.register(Method::Put, put_path("1000"), 200, r#"{"error": false, "errorMessage": "", "result": [{}], "hasMore":false}"#);

	let result = connection.run(&Query::new(QUERY)).await.unwrap();
	assert_eq!(text(result), "[{},{}]");
	assert_eq!(
		mock.call_targets(),
		vec![(Method::Post, CURSOR_PATH.to_string()), (Method::Put, put_path("1000"))]
	);
}

#[tokio::test]
async fn test_continuation_follows_advancing_id() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);
	mock.register(Method::Put, put_path("1000"), 200, r#"{"error": false, "result": [2], "hasMore": true, "id": "1001"}"#);
	mock.register(Method::Put, put_path("1001"), 200, r#"{"error": false, "result": [3, 4], "hasMore": true, "id": "1002"}"#);
	mock.register(Method::Put, put_path("1002"), 200, r#"{"error": false, "result": [], "hasMore": false}"#);

	let result = connection.run(&Query::new(QUERY)).await.unwrap();
	assert_eq!(text(result), "[1,2,3,4]");

	let calls = mock.calls();
	let targets: Vec<_> = calls.iter().map(|c| (c.method, c.path.as_str())).collect();
	assert_eq!(
		targets,
		vec![
			(Method::Post, CURSOR_PATH),
			(Method::Put, put_path("1000").as_str()),
			(Method::Put, put_path("1001").as_str()),
			(Method::Put, put_path("1002").as_str()),
		]
	);
	assert!(calls[1..].iter().all(|c| c.body.is_empty()));
	assert!(calls.iter().all(|c| c.credentials.as_ref().map(|c| c.user.as_str()) == Some("foo")));
}

#[tokio::test]
async fn test_continuation_error_discards_pages() {
	let (connection, mock) = connect();
	mock.register(
		Method::Post,
		CURSOR_PATH,
		200,
		r#"{"error": false, "errorMessage": "", "result": [{}], "hasMore":true, "id":"1000"}"#,
	);
	mock.register(
		Method::Put,
		put_path("1000"),
		200,
		r#"{"error": true, "errorMessage": "ERROR !", "result": [], "hasMore":false, "id":"1000"}"#,
	);

	let err = connection.run(&Query::new(QUERY)).await.unwrap_err();
	assert!(err.is_database());
	assert_eq!(err.to_string(), "ERROR !");
}

#[tokio::test]
async fn test_error_at_any_page_fails_run() {
	for failing in 1..=4usize {
		let (connection, mock) = connect();
		let page = |n: usize| {
			if n == failing {
				r#"{"error": true, "errorMessage": "ERROR !"}"#.to_string()
			} else {
				format!(r#"{{"error": false, "result": [{}], "hasMore": true, "id": "{}"}}"#, n, n)
			}
		};

		mock.register(Method::Post, CURSOR_PATH, 200, page(1));
		for n in 2..=failing {
			mock.register(Method::Put, put_path(&(n - 1).to_string()), 200, page(n));
		}

		let err = connection.run(&Query::new(QUERY)).await.unwrap_err();
		assert_eq!(err.database_message(), Some("ERROR !"), "failing page {failing}");
		assert_eq!(mock.call_count(), failing);
	}
}

#[tokio::test]
async fn test_unauthorized_creates_no_cursor() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 401, "");

	let err = connection.run(&Query::new(QUERY)).await.unwrap_err();
	assert!(matches!(
		err,
		Error::Transport(TransportError::Status {
			status: 401,
			..
		})
	));

	let err = connection.run_async(&Query::new(QUERY)).await.unwrap_err();
	assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_server() {
	let (connection, _mock) = connect();

	let err = connection.run_async(&Query::new(QUERY)).await.unwrap_err();
	assert!(matches!(err, Error::Transport(TransportError::Unavailable(_))));
}

#[tokio::test]
async fn test_malformed_first_envelope_creates_no_cursor() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, "<html>");

	let err = connection.run_async(&Query::new(QUERY)).await.unwrap_err();
	assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_error_status_with_envelope() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 500, r#"{"error": true, "errorMessage": "error !"}"#);

	let err = connection.run(&Query::new(QUERY)).await.unwrap_err();
	assert_eq!(err.database_message(), Some("error !"));
}

#[tokio::test]
async fn test_first_envelope_error_is_delivered_in_band() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": true, "errorMessage": "ERROR !"}"#);

	let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	let err = cursor.next().await.unwrap().unwrap_err();
	assert_eq!(err.to_string(), "ERROR !");
	assert!(cursor.next().await.is_none());
	assert!(!cursor.has_more());
}

#[tokio::test]
async fn test_missing_continuation_responder_ends_stream_with_error() {
	let (connection, mock) = connect();
	mock.register(
		Method::Post,
		CURSOR_PATH,
		200,
		r#"{"error": false, "errorMessage": "", "result": [], "hasMore":true, "id":"1000"}"#,
	);

	let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	assert_eq!(cursor.next().await.unwrap().unwrap().get(), "[]");

	let err = cursor.next().await.unwrap().unwrap_err();
	assert!(matches!(err, Error::Transport(TransportError::Unavailable(_))));
	assert!(cursor.next().await.is_none());
}

#[tokio::test]
async fn test_async_pages_in_order() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "a"}"#);
	mock.register(Method::Put, put_path("a"), 200, r#"{"error": false, "result": [2,3], "hasMore": true, "id": "b"}"#);
	mock.register(Method::Put, put_path("b"), 200, r#"{"error": false, "result": [4]}"#);

	let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	assert!(cursor.has_more());

	let mut pages = Vec::new();
	while let Some(page) = cursor.next().await {
		pages.push(page.unwrap().get().to_string());
	}
	assert_eq!(pages, vec!["[1]", "[2,3]", "[4]"]);
	assert!(!cursor.has_more());

	let merged = connection.run(&Query::new(QUERY)).await.unwrap();
	assert_eq!(text(merged), "[1,2,3,4]");
}

#[tokio::test]
async fn test_has_more_until_drained() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [{}]}"#);

	let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	assert!(cursor.has_more());
	assert_eq!(cursor.next().await.unwrap().unwrap().get(), "[{}]");
	assert!(cursor.next().await.is_none());
	assert!(!cursor.has_more());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_has_more_false_once_final_page_taken() {
	for round in 0..500 {
		let (connection, mock) = connect();
		mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);
		mock.register(Method::Put, put_path("1000"), 200, r#"{"error": false, "result": [2]}"#);

		let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
		assert_eq!(cursor.next().await.unwrap().unwrap().get(), "[1]");
		assert_eq!(cursor.next().await.unwrap().unwrap().get(), "[2]");
		assert!(!cursor.has_more(), "round {round}");
		assert!(cursor.next().await.is_none());
	}
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_has_more_false_once_error_taken() {
	for round in 0..500 {
		let (connection, mock) = connect();
		mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);
		mock.register(Method::Put, put_path("1000"), 200, r#"{"error": true, "errorMessage": "ERROR !"}"#);

		let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
		assert!(cursor.next().await.unwrap().is_ok());
		assert!(cursor.next().await.unwrap().is_err());
		assert!(!cursor.has_more(), "round {round}");
	}
}

#[tokio::test]
async fn test_malformed_continuation_fails_run() {
	for body in ["<html>", r#"{"error": false, "result": [2], "hasMore": true}"#] {
		let (connection, mock) = connect();
		mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);
		mock.register(Method::Put, put_path("1000"), 200, body);

		let err = connection.run(&Query::new(QUERY)).await.unwrap_err();
		assert!(matches!(err, Error::Decode(_)), "continuation {body}: {err:?}");
		assert_eq!(mock.call_count(), 2);
	}
}

#[tokio::test]
async fn test_malformed_continuation_ends_stream_with_error() {
	for body in ["<html>", r#"{"error": false, "result": [2], "hasMore": true}"#] {
		let (connection, mock) = connect();
		mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);
		mock.register(Method::Put, put_path("1000"), 200, body);

		let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
		assert_eq!(cursor.next().await.unwrap().unwrap().get(), "[1]");

		let err = cursor.next().await.unwrap().unwrap_err();
		assert!(matches!(err, Error::Decode(_)), "continuation {body}: {err:?}");
		assert!(cursor.next().await.is_none());
		assert!(!cursor.has_more());
	}
}

#[tokio::test]
async fn test_missing_continuation_responder_fails_run() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);

	let err = connection.run(&Query::new(QUERY)).await.unwrap_err();
	assert!(matches!(err, Error::Transport(TransportError::Unavailable(_))));
	assert_eq!(mock.call_targets(), vec![(Method::Post, CURSOR_PATH.to_string()), (Method::Put, put_path("1000"))]);
}

#[tokio::test]
async fn test_unsafe_cursor_id_is_not_followed() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "../../_admin"}"#);

	let err = connection.run_async(&Query::new(QUERY)).await.unwrap_err();
	assert!(matches!(err, Error::Decode(_)));
	assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_into_stream() {
	let (connection, mock) = connect();
	mock.register(Method::Post, CURSOR_PATH, 200, r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#);
	mock.register(Method::Put, put_path("1000"), 200, r#"{"error": false, "result": [2]}"#);

	let cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	let pages: Vec<String> = cursor.into_stream().map(|page| page.unwrap().get().to_string()).collect().await;
	assert_eq!(pages, vec!["[1]", "[2]"]);
}

#[tokio::test]
async fn test_dropping_cursor_stops_producer() {
	let (connection, mock) = connect();
	let endless = r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#;
	mock.register(Method::Post, CURSOR_PATH, 200, endless);
	mock.register(Method::Put, put_path("1000"), 200, endless);

	let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	for _ in 0..5 {
		assert_eq!(cursor.next().await.unwrap().unwrap().get(), "[1]");
	}
	assert!(mock.call_count() >= 5);
	drop(cursor);

	tokio::time::sleep(Duration::from_millis(20)).await;
	let settled = mock.call_count();
	tokio::time::sleep(Duration::from_millis(50)).await;
	assert_eq!(mock.call_count(), settled);
}

#[tokio::test]
async fn test_cancel_keeps_buffered_pages() {
	let (connection, mock) = connect();
	let endless = r#"{"error": false, "result": [1], "hasMore": true, "id": "1000"}"#;
	mock.register(Method::Post, CURSOR_PATH, 200, endless);
	mock.register(Method::Put, put_path("1000"), 200, endless);

	let mut cursor = connection.run_async(&Query::new(QUERY)).await.unwrap();
	assert!(cursor.next().await.unwrap().is_ok());
	cursor.cancel();

	let mut remaining = 0;
	while let Some(page) = cursor.next().await {
		assert!(page.is_ok());
		remaining += 1;
	}
	assert!(remaining <= connection.config().channel_capacity);
	assert!(!cursor.has_more());
}
