//! API integration tests
//!
//! Each test boots its own server with an empty in-memory store and a mock
//! platform, so tests are independent and need no external services.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, fixtures::*, TestServer, OPERATOR_HEADER};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn community() -> Vec<Value> {
    vec![
        remote_member("101", "별빛"),
        remote_member("102", "달빛"),
        banned_member("103", "햇살"),
    ]
}

fn feed() -> Vec<Value> {
    vec![
        join_post("101", "이름: 김별\n사는 곳: 서울 강남\n공부 내용: 영어 회화"),
        article("101", "스터디 인증"),
        article("102", "질문 있어요"),
    ]
}

async fn members(server: &TestServer, query: &str) -> MemberList {
    let response = server.get(&format!("/api/members{query}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn logs(server: &TestServer) -> LogList {
    let response = server.get("/api/logs").await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn sync_ok(server: &TestServer) -> SyncResponse {
    let response = server.sync().await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

// ============================================================================
// Synchronization Tests
// ============================================================================

#[tokio::test]
async fn test_first_sync_imports_and_second_is_a_no_op() {
    let server = TestServer::start().await.unwrap();
    server.serve_platform(&community(), &feed()).await;

    let first = sync_ok(&server).await;
    assert!(first.success);
    assert_eq!(first.inserted_count, 2);
    assert_eq!(first.updated_count, 0);
    assert_eq!(first.inserted_names, vec!["별빛", "달빛", "햇살 (탈퇴)"]);
    assert_eq!(first.remote_member_total, 3);

    let second = sync_ok(&server).await;
    assert!(second.success);
    assert_eq!(second.inserted_count, 0);
    assert_eq!(second.updated_count, 0);
    assert!(second.inserted_names.is_empty());

    let active = members(&server, "").await;
    assert_eq!(active.nicknames(), vec!["별빛", "달빛"]);

    let withdrawn = members(&server, "?status=withdrawn").await;
    assert_eq!(withdrawn.nicknames(), vec!["햇살"]);
    assert_eq!(withdrawn.members[0].status, "탈퇴회원");
    assert_eq!(withdrawn.members[0].activity_status, "탈퇴");
    assert!(!withdrawn.members[0].leave_date.is_empty());

    let entries = logs(&server).await.logs;
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.operator_id == "System"));
    assert_eq!(entries.iter().filter(|e| e.action == "초기동기화").count(), 2);
    assert_eq!(entries.iter().filter(|e| e.action == "탈퇴회원연동").count(), 1);
}

#[tokio::test]
async fn test_intro_and_article_counts_reach_the_roster() {
    let server = TestServer::start().await.unwrap();
    server.serve_platform(&community(), &feed()).await;
    sync_ok(&server).await;

    let active = members(&server, "").await;
    let star = active.find("별빛").unwrap();
    assert_eq!(star.real_name, "김별");
    assert_eq!(star.location, "서울 강남");
    assert_eq!(star.study_content, "영어 회화");
    assert_eq!(star.article_count, 2);
    assert!(star.intro_text.contains("이름: 김별"));
    assert_eq!(star.status, "현재회원");
    assert_eq!(star.role, "일반");

    let moon = active.find("달빛").unwrap();
    assert_eq!(moon.real_name, "달빛");
    assert_eq!(moon.article_count, 1);
    assert!(moon.intro_text.is_empty());
}

#[tokio::test]
async fn test_ban_moves_member_and_keeps_id() {
    let server = TestServer::start().await.unwrap();
    server
        .serve_platform(&[remote_member("101", "별빛"), remote_member("102", "달빛")], &[])
        .await;
    sync_ok(&server).await;
    let moon_id = members(&server, "").await.find("달빛").unwrap().id.clone();

    server
        .serve_platform(&[remote_member("101", "별빛"), banned_member("102", "달빛")], &[])
        .await;
    let result = sync_ok(&server).await;
    assert_eq!(result.inserted_count, 0);
    assert_eq!(result.updated_count, 1);
    assert!(result.inserted_names.is_empty());

    assert_eq!(members(&server, "").await.nicknames(), vec!["별빛"]);
    let withdrawn = members(&server, "?status=withdrawn").await;
    let moon = withdrawn.find("달빛").unwrap();
    assert_eq!(moon.id, moon_id);
    assert!(!moon.leave_date.is_empty());

    let entries = logs(&server).await.logs;
    let detected: Vec<_> = entries.iter().filter(|e| e.action == "탈퇴(동기화)").collect();
    assert_eq!(detected.len(), 1);
    assert_eq!(detected[0].member_id, moon_id);
    assert!(detected[0].detail.contains("[달빛]"));

    // Already withdrawn: nothing left to do
    let again = sync_ok(&server).await;
    assert_eq!(again.updated_count, 0);
    assert_eq!(members(&server, "?status=withdrawn").await.members.len(), 1);
}

#[tokio::test]
async fn test_manual_memo_survives_sync() {
    let server = TestServer::start().await.unwrap();
    server.serve_platform(&community(), &feed()).await;
    sync_ok(&server).await;

    let id = members(&server, "").await.find("별빛").unwrap().id.clone();
    let response = server
        .put(&format!("/api/members/{id}"), &json!({"memo": "스터디장 후보"}))
        .await
        .unwrap();
    assert_json::<Mutation>(response, StatusCode::OK).await.unwrap();

    let result = sync_ok(&server).await;
    assert_eq!(result.updated_count, 0);

    let star = members(&server, "").await.find("별빛").unwrap().clone();
    assert_eq!(star.id, id);
    assert_eq!(star.memo, "스터디장 후보");
}

#[tokio::test]
async fn test_sync_without_feed_still_reconciles() {
    let server = TestServer::start().await.unwrap();
    server.serve_snapshot_only(&community()).await;

    let result = sync_ok(&server).await;
    assert_eq!(result.inserted_count, 2);

    let active = members(&server, "").await;
    assert!(active.members.iter().all(|m| m.article_count == 0));
}

#[tokio::test]
async fn test_unavailable_platform_fails_without_writes() {
    let server = TestServer::start().await.unwrap();
    server.platform_down().await;

    let response = server.sync().await.unwrap();
    let failure: SyncFailureResponse = assert_json(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert!(!failure.success);
    assert_eq!(failure.code, "REMOTE_UNAVAILABLE");
    assert!(!failure.error.is_empty());

    assert!(members(&server, "").await.members.is_empty());
    assert!(logs(&server).await.logs.is_empty());
}

// ============================================================================
// Member Administration Tests
// ============================================================================

#[tokio::test]
async fn test_member_lifecycle() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .client
        .post(server.url("/api/members"))
        .header(OPERATOR_HEADER, "admin-1")
        .json(&json!({"nickname": "수동회원", "location": "부산 해운대"}))
        .send()
        .await
        .unwrap();
    let created: Mutation = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(created.success);
    let id = created.id.unwrap();

    let response = server.get(&format!("/api/members/{id}")).await.unwrap();
    let detail: MemberDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.member.nickname, "수동회원");
    assert_eq!(detail.member.real_name, "수동회원");
    assert_eq!(detail.member.status, "현재회원");
    assert_eq!(detail.member.activity_status, "신입");
    assert_eq!(detail.member.location, "부산 해운대");

    let response = server
        .client
        .put(server.url(&format!("/api/members/{id}")))
        .header(OPERATOR_HEADER, "admin-1")
        .json(&json!({"studyContent": "자격증"}))
        .send()
        .await
        .unwrap();
    assert_json::<Mutation>(response, StatusCode::OK).await.unwrap();

    let response = server
        .client
        .delete(server.url(&format!("/api/members/{id}")))
        .header(OPERATOR_HEADER, "admin-2")
        .send()
        .await
        .unwrap();
    assert_json::<Mutation>(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/api/members/{id}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let withdrawn = members(&server, "?status=withdrawn").await;
    let gone = withdrawn.find("수동회원").unwrap();
    assert_eq!(gone.id, id);
    assert_eq!(gone.study_content, "자격증");

    let entries = logs(&server).await.logs;
    assert_eq!(entries.len(), 3);
    let by_action = |action: &str| entries.iter().find(|e| e.action == action).unwrap();
    assert_eq!(by_action("가입").detail, "신규 회원 수동회원 등록");
    assert_eq!(by_action("가입").operator_id, "admin-1");
    assert_eq!(by_action("정보 수정").detail, "studyContent 변경됨");
    assert_eq!(by_action("탈퇴").detail, "회원 탈퇴 처리");
    assert_eq!(by_action("탈퇴").operator_id, "admin-2");
    assert!(entries.iter().all(|e| e.member_id == id));
}

#[tokio::test]
async fn test_duplicate_nickname_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let body = json!({"nickname": "중복"});

    let response = server.post("/api/members", &body).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = server.post("/api/members", &body).await.unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.error.code, "NICKNAME_TAKEN");
}

#[tokio::test]
async fn test_invalid_member_requests() {
    let server = TestServer::start().await.unwrap();

    let response = server.post("/api/members", &json!({"nickname": ""})).await.unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");

    let response = server.post("/api/members", &json!({"nickname": "a"})).await.unwrap();
    let created: Mutation = assert_json(response, StatusCode::CREATED).await.unwrap();
    let id = created.id.unwrap();

    let response = server.put(&format!("/api/members/{id}"), &json!({})).await.unwrap();
    let err: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");
    assert!(!err.error.message.is_empty());

    let response = server
        .put(&format!("/api/members/{id}"), &json!({"role": "대장"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server.get("/api/members?role=nobody").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_member_filters() {
    let server = TestServer::start().await.unwrap();
    server.post("/api/members", &json!({"nickname": "운영자", "role": "운영진"})).await.unwrap();
    server.post("/api/members", &json!({"nickname": "회원"})).await.unwrap();

    let staff = members(&server, "?role=staff").await;
    assert_eq!(staff.nicknames(), vec!["운영자"]);

    let fresh = members(&server, "?activityStatus=new").await;
    assert_eq!(fresh.members.len(), 2);
}

// ============================================================================
// Statistics Tests
// ============================================================================

#[tokio::test]
async fn test_statistics_after_sync() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/statistics").await.unwrap();
    let empty: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(empty["stats"]["total"], 0);

    server.serve_platform(&community(), &feed()).await;
    sync_ok(&server).await;

    let response = server.get("/api/statistics").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let stats = &body["stats"];
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["current"], 2);
    assert_eq!(stats["left"], 0);
    assert_eq!(stats["regionStats"]["서울"], 1);
    assert_eq!(stats["studyStats"]["영어 회화"], 1);
    assert_eq!(stats["dayStats"]["월"], 0);
}
