use serde_json::json;

use servicetracker::domain::company::{NewCompanyProfile, WorkingDay, WorkingHours};
use servicetracker::domain::error_log::NewErrorLogEntry;
use servicetracker::repository::{
    CompanyReader, CompanyWriter, ErrorLogReader, ErrorLogWriter,
};

mod common;

#[test]
fn test_company_profile_upsert_and_logo() {
    let test_db = common::TestDb::new("test_company_profile_upsert.db");
    let repo = test_db.repo();

    assert!(repo.get_company_profile().unwrap().is_none());
    assert!(repo.update_company_logo(Some("/uploads/x.png")).is_err());

    let mut profile = NewCompanyProfile::new(
        "Atlas Oto".to_string(),
        "Info@AtlasOto.example".to_string(),
        "+902121234567".to_string(),
        "Sanayi Cd. 12".to_string(),
        "Istanbul".to_string(),
        "TR".to_string(),
    );
    profile.working_hours = Some(WorkingHours {
        monday: Some(WorkingDay {
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            closed: false,
        }),
        ..WorkingHours::default()
    });

    let created = repo.upsert_company_profile(&profile).unwrap();
    assert_eq!(created.email, "info@atlasoto.example");
    assert!(created.working_hours.is_some());

    // A second save updates the same row instead of inserting another.
    profile.name = "Atlas Oto Servis".to_string();
    let updated = repo.upsert_company_profile(&profile).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Atlas Oto Servis");

    let with_logo = repo.update_company_logo(Some("/uploads/logo.png")).unwrap();
    assert_eq!(with_logo.logo_url.as_deref(), Some("/uploads/logo.png"));

    // The logo survives a later profile save.
    let resaved = repo.upsert_company_profile(&profile).unwrap();
    assert_eq!(resaved.logo_url.as_deref(), Some("/uploads/logo.png"));
}

#[test]
fn test_error_log_round_trip() {
    let test_db = common::TestDb::new("test_error_log_round_trip.db");
    let repo = test_db.repo();

    let entry = NewErrorLogEntry::new("ServiceError", "report build failed")
        .metadata(json!({ "endpoint": "reports" }));
    repo.create_error_log(&entry).unwrap();
    repo.create_error_log(&NewErrorLogEntry::new("ApiError", "listing failed"))
        .unwrap();

    let logs = repo.list_error_logs(10).unwrap();
    assert_eq!(logs.len(), 2);
    // Newest first.
    assert_eq!(logs[0].error_type, "ApiError");
    assert_eq!(
        logs[1].metadata.as_ref().unwrap()["endpoint"],
        json!("reports")
    );

    assert_eq!(repo.list_error_logs(1).unwrap().len(), 1);
}
