//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, set_cookie_value,
    TestServer,
};
use reqwest::{header, StatusCode};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_unknown_api_route_uses_error_envelope() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/nope").await.unwrap();
    let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.code, "NOT_FOUND");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_sets_session_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::company();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let cookie = set_cookie_value(&response, &server.cookie_name).expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.user_type, "company");
    assert_eq!(auth.user.status, "active");
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::cfo();
    server.post("/api/auth/register", &request).await.unwrap();

    // Same address in a different case is still the same account
    let mut duplicate = request.clone();
    duplicate.email = request.email.to_uppercase();
    let response = server.post("/api/auth/register", &duplicate).await.unwrap();
    assert_error(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::company();
    request.password = "short".to_string();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_and_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let account = TestAccount::cfo(&server).await.unwrap();

    let login = LoginRequest::from_register(&account.register);
    let response = server.post("/api/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.id, account.id);

    // The cookie alone authenticates API calls
    let response = server
        .get_with_cookie("/api/auth/session", &auth.access_token)
        .await
        .unwrap();
    let session: SessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(session.user_id, account.id);
    assert_eq!(session.user_type, "cfo");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let account = TestAccount::company(&server).await.unwrap();

    let login = LoginRequest {
        email: account.register.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/api/auth/login", &login).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let account = TestAccount::company(&server).await.unwrap();

    let refresh = RefreshTokenRequest {
        refresh_token: account.refresh_token.clone(),
    };
    let response = server.post("/api/auth/refresh", &refresh).await.unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, account.refresh_token);

    let response = server.post("/api/auth/refresh", &refresh).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_protected_endpoint_without_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users/me").await.unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.code, "MISSING_AUTH");
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_update_and_deactivate_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let account = TestAccount::company(&server).await.unwrap();

    let body = serde_json::json!({ "display_name": "Renamed Co" });
    let response = server
        .patch_auth("/api/users/me", &account.access_token, &body)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.display_name, "Renamed Co");

    let response = server
        .delete_auth("/api/users/me", &account.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Refresh tokens were revoked along with the account
    let refresh = RefreshTokenRequest {
        refresh_token: account.refresh_token.clone(),
    };
    let response = server.post("/api/auth/refresh", &refresh).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Directory Tests
// ============================================================================

#[tokio::test]
async fn test_cfo_search_filters() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let cfo = TestAccount::cfo(&server).await.unwrap();
    let company = TestAccount::company(&server).await.unwrap();
    let tag = format!("tag-{}", unique_suffix());

    let response = server
        .put_auth(
            "/api/cfos/me",
            &cfo.access_token,
            &CfoProfileRequest::tokyo_monthly(&tag),
        )
        .await
        .unwrap();
    let profile: CfoProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.prefecture.as_deref(), Some("東京都"));
    assert_eq!(profile.monthly_fee_min, Some(800_000));

    // The fee floor of 800k falls in the 500k-1m band
    let matching = format!(
        "/api/cfos?compensation=monthly_500k_1m&prefecture=東京都&weekly_days=3&skills={tag}"
    );
    let response = server.get_auth(&matching, &company.access_token).await.unwrap();
    let page: Page<CfoProfileResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].user_id, cfo.id);

    let other_band = format!("/api/cfos?compensation=monthly_2m_plus&skills={tag}");
    let response = server.get_auth(&other_band, &company.access_token).await.unwrap();
    let page: Page<CfoProfileResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.items.is_empty());

    let more_days = format!("/api/cfos?weekly_days=5&skills={tag}");
    let response = server.get_auth(&more_days, &company.access_token).await.unwrap();
    let page: Page<CfoProfileResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_cfo_search_rejects_unknown_band() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();

    let response = server
        .get_auth("/api/cfos?compensation=lots", &company.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_company_cannot_write_cfo_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();

    let response = server
        .put_auth(
            "/api/cfos/me",
            &company.access_token,
            &CfoProfileRequest::tokyo_monthly("tag"),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_conversation_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();
    let cfo = TestAccount::cfo(&server).await.unwrap();

    let start = StartConversationRequest {
        recipient_id: cfo.id.clone(),
        content: "Hello, are you available?".to_string(),
    };
    let response = server
        .post_auth("/api/messages", &company.access_token, &start)
        .await
        .unwrap();
    let started: StartConversationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(started.message.sender_id, company.id);

    // Starting again reuses the same conversation
    let response = server
        .post_auth("/api/messages", &company.access_token, &start)
        .await
        .unwrap();
    let again: StartConversationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(again.conversation_id, started.conversation_id);

    let response = server.get_auth("/api/messages", &cfo.access_token).await.unwrap();
    let inbox: Vec<ConversationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let conversation = inbox
        .iter()
        .find(|c| c.id == started.conversation_id)
        .expect("conversation listed");
    assert_eq!(conversation.other_participant_id, company.id);
    assert_eq!(conversation.unread_count, 2);

    let thread = format!("/api/messages/{}", started.conversation_id);
    let reply = SendMessageRequest {
        content: "Yes, from next month.".to_string(),
    };
    let response = server.post_auth(&thread, &cfo.access_token, &reply).await.unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.sender_id, cfo.id);

    let read = format!("{thread}/read");
    let response = server
        .post_auth(&read, &cfo.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let marked: MarkReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.updated, 2);

    let response = server.get_auth(&thread, &company.access_token).await.unwrap();
    let history: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_outsider_cannot_read_conversation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();
    let cfo = TestAccount::cfo(&server).await.unwrap();
    let outsider = TestAccount::company(&server).await.unwrap();

    let start = StartConversationRequest {
        recipient_id: cfo.id.clone(),
        content: "Private".to_string(),
    };
    let response = server
        .post_auth("/api/messages", &company.access_token, &start)
        .await
        .unwrap();
    let started: StartConversationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let thread = format!("/api/messages/{}", started.conversation_id);
    let response = server.get_auth(&thread, &outsider.access_token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Scout and Interest Tests
// ============================================================================

#[tokio::test]
async fn test_scout_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();
    let cfo = TestAccount::cfo(&server).await.unwrap();

    let response = server
        .post_auth("/api/scouts", &company.access_token, &CreateScoutRequest::to(&cfo.id))
        .await
        .unwrap();
    let scout: ScoutResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(scout.status, "pending");

    let response = server
        .post_auth("/api/scouts", &company.access_token, &CreateScoutRequest::to(&cfo.id))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.code, "SCOUT_ALREADY_EXISTS");

    let response = server.get_auth("/api/scouts", &cfo.access_token).await.unwrap();
    let received: Vec<ScoutResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(received.iter().any(|s| s.id == scout.id));

    let response = server
        .get_auth("/api/scouts?box=sent", &company.access_token)
        .await
        .unwrap();
    let sent: Vec<ScoutResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sent.len(), 1);

    let path = format!("/api/scouts/{}", scout.id);
    let response = server
        .patch_auth(&path, &company.access_token, &StatusUpdate::new("accepted"))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &cfo.access_token, &StatusUpdate::new("accepted"))
        .await
        .unwrap();
    let accepted: ScoutResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "accepted");
}

#[tokio::test]
async fn test_interest_add_and_remove() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();
    let cfo = TestAccount::cfo(&server).await.unwrap();

    let request = CreateInterestRequest {
        target_id: cfo.id.clone(),
    };
    let response = server
        .post_auth("/api/interests", &company.access_token, &request)
        .await
        .unwrap();
    let interest: InterestResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(interest.liker_id, company.id);

    let response = server
        .post_auth("/api/interests", &company.access_token, &request)
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT).await.unwrap();

    let path = format!("/api/interests/{}", cfo.id);
    let response = server.delete_auth(&path, &company.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &company.access_token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Contract and Invoice Tests
// ============================================================================

#[tokio::test]
async fn test_contract_and_invoice_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();
    let cfo = TestAccount::cfo(&server).await.unwrap();

    let response = server
        .post_auth("/api/scouts", &company.access_token, &CreateScoutRequest::to(&cfo.id))
        .await
        .unwrap();
    let scout: ScoutResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A contract can only cite a scout the CFO accepted
    let response = server
        .post_auth(
            "/api/contracts",
            &company.access_token,
            &CreateContractRequest::with(&cfo.id, Some(&scout.id)),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/scouts/{}", scout.id),
            &cfo.access_token,
            &StatusUpdate::new("accepted"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            "/api/contracts",
            &company.access_token,
            &CreateContractRequest::with(&cfo.id, Some(&scout.id)),
        )
        .await
        .unwrap();
    let contract: ContractResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(contract.status, "draft");
    assert_eq!(contract.scout_id.as_deref(), Some(scout.id.as_str()));

    let invoices = format!("/api/contracts/{}/invoices", contract.id);

    // Draft contracts cannot be billed
    let response = server
        .post_auth(&invoices, &cfo.access_token, &CreateInvoiceRequest::monthly(500_005))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/contracts/{}", contract.id),
            &cfo.access_token,
            &StatusUpdate::new("active"),
        )
        .await
        .unwrap();
    let active: ContractResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(active.status, "active");

    // Only the CFO bills
    let response = server
        .post_auth(&invoices, &company.access_token, &CreateInvoiceRequest::monthly(500_005))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(&invoices, &cfo.access_token, &CreateInvoiceRequest::monthly(500_005))
        .await
        .unwrap();
    let invoice: InvoiceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(invoice.tax_amount, 50_000);
    assert_eq!(invoice.total, 550_005);
    assert_eq!(invoice.status, "draft");

    let path = format!("/api/invoices/{}", invoice.id);
    let response = server
        .patch_auth(&path, &cfo.access_token, &StatusUpdate::new("issued"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch_auth(&path, &cfo.access_token, &StatusUpdate::new("paid"))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &company.access_token, &StatusUpdate::new("paid"))
        .await
        .unwrap();
    let paid: InvoiceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paid.status, "paid");

    let response = server.get_auth(&invoices, &company.access_token).await.unwrap();
    let listed: Vec<InvoiceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].contract_id, contract.id);
}

#[tokio::test]
async fn test_cfo_cannot_create_contract() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let cfo = TestAccount::cfo(&server).await.unwrap();
    let other_cfo = TestAccount::cfo(&server).await.unwrap();

    let response = server
        .post_auth(
            "/api/contracts",
            &cfo.access_token,
            &CreateContractRequest::with(&other_cfo.id, None),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Route Guard Tests
// ============================================================================

#[tokio::test]
async fn test_guard_redirects_anonymous_page_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/messages").await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/auth/login?callbackUrl=%2Fmessages"
    );
}

#[tokio::test]
async fn test_guard_sends_signed_in_user_to_landing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let company = TestAccount::company(&server).await.unwrap();

    let response = server
        .get_with_cookie("/auth/login", &company.access_token)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/discover/cfos");
}
