use actix_web_flash_messages::Level;
use chrono::Utc;

use servicetracker::models::auth::{AuthenticatedUser, check_role};
use servicetracker::routes::alert_level_to_str;

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn test_check_role() {
    let roles = vec!["service".to_string(), "service_admin".to_string()];
    assert!(check_role("service", &roles));
    assert!(check_role("service_admin", &roles));
    assert!(!check_role("accounting", &roles));
}

fn sample_user(exp: usize) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-1".to_string(),
        email: "staff@example.com".to_string(),
        name: "Staff".to_string(),
        roles: vec!["service".to_string()],
        exp,
    }
}

#[test]
fn test_jwt_round_trip() {
    let secret = "test-secret";
    let exp = (Utc::now().timestamp() + 3600) as usize;
    let user = sample_user(exp);

    let token = user.to_jwt(secret).unwrap();
    let decoded = AuthenticatedUser::from_jwt(&token, secret).unwrap();
    assert_eq!(decoded, user);

    assert!(AuthenticatedUser::from_jwt(&token, "other-secret").is_err());
}

#[test]
fn test_expired_jwt_is_rejected() {
    let secret = "test-secret";
    let exp = (Utc::now().timestamp() - 3600) as usize;
    let user = sample_user(exp);

    let token = user.to_jwt(secret).unwrap();
    assert!(AuthenticatedUser::from_jwt(&token, secret).is_err());
}
