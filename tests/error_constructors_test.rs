use excess_watch::error::ExcessError;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(
        ExcessError::config("x"),
        ExcessError::Config { .. }
    ));
    assert!(matches!(
        ExcessError::validation("f", "m"),
        ExcessError::Validation { .. }
    ));
    assert!(matches!(ExcessError::io("x"), ExcessError::Io { .. }));
    assert!(matches!(
        ExcessError::network("x"),
        ExcessError::Network { .. }
    ));
    assert!(matches!(ExcessError::api("x"), ExcessError::Api { .. }));
}

#[test]
fn error_constructors_group_2() {
    assert!(matches!(
        ExcessError::portal("5000", "boom"),
        ExcessError::Portal { .. }
    ));
    assert!(matches!(
        ExcessError::login_failed("x"),
        ExcessError::LoginFailed { .. }
    ));
    assert!(matches!(
        ExcessError::session_expired("3010022"),
        ExcessError::SessionExpired { .. }
    ));
    assert!(matches!(
        ExcessError::offline("77"),
        ExcessError::Offline { .. }
    ));
}

#[test]
fn display_messages() {
    let s = format!("{}", ExcessError::portal("5000", "server busy"));
    assert_eq!(s, "Portal error: code 5000 - server busy");

    let s = format!("{}", ExcessError::offline("77"));
    assert!(s.contains("Station 77 offline"));
}

#[test]
fn io_and_json_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(ExcessError::from(io), ExcessError::Io { .. }));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ExcessError::from(json),
        ExcessError::Serialization { .. }
    ));
}
