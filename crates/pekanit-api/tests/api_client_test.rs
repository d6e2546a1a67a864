#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pekanit_api::{ApiClient, Audience, Error, GuestQuestionnaire, Rating, Ratings};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url).unwrap();
    (server, client)
}

fn token() -> SecretString {
    SecretString::from("tok-123".to_string())
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "nis": "12345" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "tok-123",
            "data": { "user_id": "7", "name": "Rina", "kelas": "XI-RPL-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.login("12345").await.unwrap();

    assert!(resp.success);
    assert_eq!(resp.token.as_deref(), Some("tok-123"));
    let user = resp.data.unwrap();
    assert_eq!(user.user_id, "7");
    assert_eq!(user.kelas, "XI-RPL-1");
}

#[tokio::test]
async fn test_login_http_error_carries_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "NIS tidak ditemukan" })),
        )
        .mount(&server)
        .await;

    let result = client.login("999").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("NIS tidak ditemukan"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_http_error_without_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.login("1").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.backend_message(), None);
}

// ── Antrian ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_issue_queue_number_sends_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/antrian"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "user_id": "7" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.issue_queue_number(&token(), "7").await.unwrap();
}

#[tokio::test]
async fn test_show_queue_number_returns_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/antrian/show/7"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "no_antrian": "A12" } })),
        )
        .mount(&server)
        .await;

    let body = client.show_queue_number(&token(), "7").await.unwrap();

    assert_eq!(body["data"]["no_antrian"], "A12");
}

#[tokio::test]
async fn test_class_queue_lists_entries() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/antrian/kelas/XI-RPL-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "name": "Rina", "no_antrian": 3 },
                { "id": 2, "name": "Budi", "no_antrian": "4" }
            ]
        })))
        .mount(&server)
        .await;

    let entries = client.class_queue("XI-RPL-1").await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "1");
    assert_eq!(entries[0].no_antrian.as_ref().unwrap().as_str(), "3");
    assert_eq!(entries[1].name, "Budi");
}

#[tokio::test]
async fn test_class_queue_missing_data_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/antrian/kelas/X-DKV-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let entries = client.class_queue("X-DKV-1").await.unwrap();

    assert!(entries.is_empty());
}

// ── Kuesioner ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_guest_questionnaire_is_anonymous() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/tamu/send"))
        .and(body_json(json!({
            "nama": "Pak Joko",
            "instansi": "SMPN 1",
            "tampilan_produk": "Baik",
            "tampilan_stand": "Baik",
            "penjelasan_produk": "Cukup",
            "hiburan": "Kurang",
            "kritik_saran": "Mantap"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let body = GuestQuestionnaire {
        nama: "Pak Joko".into(),
        instansi: "SMPN 1".into(),
        ratings: Ratings {
            tampilan_produk: Rating::Baik,
            tampilan_stand: Rating::Baik,
            penjelasan_produk: Rating::Cukup,
            hiburan: Rating::Kurang,
        },
        kritik_saran: "Mantap".into(),
    };
    client.submit_guest_questionnaire(&body).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

// ── Reports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_student_responses() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/show/siswa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": 1,
                "nama_wali_siswa": "Bu Sari",
                "nama_siswa": "Rina",
                "kelas": "XI-RPL-1",
                "tampilan_produk": "Baik",
                "tampilan_stand": "Cukup",
                "penjelasan_produk": "Baik",
                "hiburan": "Baik",
                "kritik_saran": null,
                "created_at": "2025-02-10T08:00:00.000000Z"
            }]
        })))
        .mount(&server)
        .await;

    let rows = client.list_student_responses().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].nama_siswa.as_deref(), Some("Rina"));
    assert_eq!(rows[0].tampilan_stand, "Cukup");
    assert!(rows[0].kritik_saran.is_none());
}

#[tokio::test]
async fn test_list_rejects_unsuccessful_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/show/tamu"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "data": [] })),
        )
        .mount(&server)
        .await;

    let result = client.list_guest_responses().await;

    assert!(
        matches!(result, Err(Error::UnexpectedPayload { .. })),
        "expected UnexpectedPayload, got: {result:?}"
    );
}

#[tokio::test]
async fn test_export_passes_bytes_through() {
    let (server, client) = setup().await;
    let payload: &[u8] = b"PK\x03\x04fake-xlsx";

    Mock::given(method("GET"))
        .and(path("/api/export-kuesioner-tamu"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload))
        .mount(&server)
        .await;

    let bytes = client.export(Audience::Tamu).await.unwrap();

    assert_eq!(&bytes[..], payload);
}

#[tokio::test]
async fn test_export_failure_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/export-kuesioner"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.export(Audience::Siswa).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}
