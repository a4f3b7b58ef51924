use super::*;
use serde_json::json;

#[test]
fn test_request_parses_wire_type_tag() {
    let request: Request = serde_json::from_value(json!({
        "type": "CACHE_TEMP_CREDENTIALS",
        "url": "https://univille.br/login",
        "username": "alice",
        "password": "secret1"
    }))
    .unwrap();

    assert_eq!(
        request,
        Request::CacheTempCredentials {
            url: "https://univille.br/login".to_string(),
            username: "alice".to_string(),
            password: "secret1".to_string(),
        }
    );
    assert_eq!(request.kind(), MessageKind::CacheTempCredentials);
}

#[test]
fn test_request_serializes_wire_names() {
    for (request, name) in [
        (Request::GetLogin { url: "u".into() }, "GET_LOGIN"),
        (Request::CheckPendingToSave { url: "u".into() }, "CHECK_PENDING_TO_SAVE"),
        (
            Request::IsFeaturePaused {
                feature: PausedFeature::AutoLogin,
                hostname: "h".into(),
            },
            "IS_FEATURE_PAUSED",
        ),
    ] {
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], name);
        assert_eq!(request.kind().as_str(), name);
    }
}

#[test]
fn test_request_rejects_unknown_type() {
    let result = serde_json::from_value::<Request>(json!({"type": "DELETE_ALL"}));
    assert!(result.is_err());
}

#[test]
fn test_request_rejects_missing_field() {
    let result = serde_json::from_value::<Request>(json!({
        "type": "CHECK_CREDENTIALS_EXIST",
        "url": "https://univille.br"
    }));
    assert!(result.is_err());
}

#[test]
fn test_response_wire_shapes() {
    assert_eq!(serde_json::to_value(Response::Login(None)).unwrap(), json!(null));
    assert_eq!(serde_json::to_value(Response::Exists(true)).unwrap(), json!(true));
    assert_eq!(
        serde_json::to_value(Response::Cached(CacheAck::cached())).unwrap(),
        json!({"status": "cached"})
    );
    assert_eq!(serde_json::to_value(Response::Pending(None)).unwrap(), json!(null));
}

#[test]
fn test_response_decode_by_kind() {
    let decoded = Response::decode(MessageKind::SaveCredentials, json!(true)).unwrap();
    assert_eq!(decoded, Response::Saved(true));

    let decoded = Response::decode(MessageKind::GetLogin, json!(null)).unwrap();
    assert_eq!(decoded, Response::Login(None));

    let decoded = Response::decode(
        MessageKind::GetLogin,
        json!({"id": "1", "site": "univille.br", "username": "alice", "password": "pw"}),
    )
    .unwrap();
    match decoded {
        Response::Login(Some(record)) => assert_eq!(record.username, "alice"),
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn test_response_decode_rejects_wrong_shape() {
    let result = Response::decode(MessageKind::CheckCredentialsExist, json!({"status": "cached"}));
    assert!(result.is_err());
}

#[test]
fn test_message_kind_all_is_complete() {
    assert_eq!(MessageKind::ALL.len(), 6);
    assert_eq!(MessageKind::CheckCredentialsExist.to_string(), "CHECK_CREDENTIALS_EXIST");
}
