use projectledger_core::db::open_db_in_memory;
use projectledger_core::{
    CallContext, ProjectValidationError, RegisterProjectRequest, RegistryConfig, RegistryError,
    RegistryService, SqliteProjectRepository, ONE_UNIT,
};
use rusqlite::Connection;

const ADMIN: &str = "admin.testnet";

fn service(conn: &Connection) -> RegistryService<SqliteProjectRepository<'_>> {
    let repo = SqliteProjectRepository::try_new(conn).unwrap();
    let config = RegistryConfig::with_default_fee(ADMIN).unwrap();
    RegistryService::new(repo, config)
}

fn request(name: &str, description: &str, total_amount: u32) -> RegisterProjectRequest {
    RegisterProjectRequest {
        name: name.to_string(),
        description: description.to_string(),
        total_amount,
    }
}

fn admin_paid() -> CallContext {
    CallContext::new(ADMIN, ONE_UNIT)
}

#[test]
fn register_then_get_returns_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("Proj1", "Desc1", 150))
        .unwrap();

    let project = service.get_project(ADMIN).unwrap().unwrap();
    assert_eq!(project.name, "Proj1");
    assert_eq!(project.owner_account, ADMIN);
    assert_eq!(project.description, "Desc1");
    assert_eq!(project.total_amount, 150);
    assert!(!project.completed);
}

#[test]
fn register_accepts_payment_above_the_fee() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let generous = CallContext::new(ADMIN, ONE_UNIT * 2);
    service
        .register(&generous, &request("Proj1", "Desc1", 150))
        .unwrap();
    assert!(service.get_project(ADMIN).unwrap().is_some());
}

#[test]
fn register_by_non_admin_fails_regardless_of_input_validity() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let outsider = CallContext::new("mallory.testnet", ONE_UNIT);
    let err = service
        .register(&outsider, &request("Proj1", "Desc1", 150))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Unauthorized { ref caller } if caller == "mallory.testnet"
    ));
    assert!(service.list_projects().unwrap().is_empty());

    // Authorization is checked first, so invalid input still reports
    // Unauthorized for outsiders.
    let err = service
        .register(&CallContext::unpaid("mallory.testnet"), &request("x", "y", 0))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Unauthorized { .. }));
}

#[test]
fn register_with_zero_amount_fails_without_write() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .register(&admin_paid(), &request("Proj1", "Desc1", 0))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidInput(ProjectValidationError::AmountNotPositive)
    ));
    assert!(service.get_project(ADMIN).unwrap().is_none());
}

#[test]
fn register_with_short_name_fails_without_write() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .register(&admin_paid(), &request("ab", "Desc1", 150))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidInput(ProjectValidationError::NameTooShort { len: 2 })
    ));
    assert!(service.get_project(ADMIN).unwrap().is_none());
}

#[test]
fn register_with_short_description_fails_without_write() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .register(&admin_paid(), &request("Proj1", "ab", 150))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidInput(ProjectValidationError::DescriptionTooShort { len: 2 })
    ));
    assert!(service.get_project(ADMIN).unwrap().is_none());
}

#[test]
fn register_with_insufficient_payment_fails_without_write() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let underpaid = CallContext::new(ADMIN, ONE_UNIT - 1);
    let err = service
        .register(&underpaid, &request("Proj1", "Desc1", 150))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InsufficientPayment { attached, required }
            if attached == ONE_UNIT - 1 && required == ONE_UNIT
    ));
    assert!(service.get_project(ADMIN).unwrap().is_none());
}

#[test]
fn register_twice_overwrites_the_first_record_entirely() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("First", "first record", 100))
        .unwrap();
    service
        .register(&admin_paid(), &request("Second", "second record", 200))
        .unwrap();

    let project = service.get_project(ADMIN).unwrap().unwrap();
    assert_eq!(project.name, "Second");
    assert_eq!(project.description, "second record");
    assert_eq!(project.total_amount, 200);
    assert!(!project.completed);
    assert_eq!(service.list_projects().unwrap().len(), 1);
}

#[test]
fn register_overwrites_completed_project() {
    // Pins the observed compatibility behavior: re-registration silently
    // resets an already-completed project back to incomplete.
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("First", "first record", 100))
        .unwrap();
    assert!(service.complete(&CallContext::unpaid(ADMIN), ADMIN).unwrap());

    service
        .register(&admin_paid(), &request("Second", "second record", 200))
        .unwrap();
    let project = service.get_project(ADMIN).unwrap().unwrap();
    assert!(!project.completed);
}

#[test]
fn complete_on_absent_account_returns_false_and_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let flipped = service
        .complete(&CallContext::unpaid(ADMIN), "nobody.testnet")
        .unwrap();
    assert!(!flipped);
    assert!(service.get_project("nobody.testnet").unwrap().is_none());
}

#[test]
fn complete_twice_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("Proj1", "Desc1", 150))
        .unwrap();

    let ctx = CallContext::unpaid(ADMIN);
    assert!(service.complete(&ctx, ADMIN).unwrap());
    assert!(service.get_project(ADMIN).unwrap().unwrap().completed);

    assert!(!service.complete(&ctx, ADMIN).unwrap());
    assert!(service.get_project(ADMIN).unwrap().unwrap().completed);
}

#[test]
fn complete_requires_admin() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("Proj1", "Desc1", 150))
        .unwrap();

    let err = service
        .complete(&CallContext::unpaid("mallory.testnet"), ADMIN)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Unauthorized { .. }));
    assert!(!service.get_project(ADMIN).unwrap().unwrap().completed);
}

#[test]
fn remove_of_incomplete_project_returns_false_and_keeps_it_listed() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("Proj1", "Desc1", 150))
        .unwrap();

    let removed = service.remove(&CallContext::unpaid(ADMIN), ADMIN).unwrap();
    assert!(!removed);
    assert_eq!(service.list_projects().unwrap().len(), 1);
}

#[test]
fn remove_of_absent_project_returns_false() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let removed = service
        .remove(&CallContext::unpaid(ADMIN), "nobody.testnet")
        .unwrap();
    assert!(!removed);
}

#[test]
fn remove_requires_admin() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("Proj1", "Desc1", 150))
        .unwrap();
    service.complete(&CallContext::unpaid(ADMIN), ADMIN).unwrap();

    let err = service
        .remove(&CallContext::unpaid("mallory.testnet"), ADMIN)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Unauthorized { .. }));
    assert_eq!(service.list_projects().unwrap().len(), 1);
}

#[test]
fn full_lifecycle_register_complete_remove() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .register(&admin_paid(), &request("Proj1", "Desc1", 150))
        .unwrap();
    let project = service.get_project(ADMIN).unwrap().unwrap();
    assert_eq!(project.name, "Proj1");
    assert_eq!(project.owner_account, ADMIN);
    assert_eq!(project.description, "Desc1");
    assert_eq!(project.total_amount, 150);
    assert!(!project.completed);

    let ctx = CallContext::unpaid(ADMIN);
    assert!(service.complete(&ctx, ADMIN).unwrap());
    assert!(service.get_project(ADMIN).unwrap().unwrap().completed);

    assert!(service.remove(&ctx, ADMIN).unwrap());
    assert!(service.get_project(ADMIN).unwrap().is_none());
    assert!(service.list_projects().unwrap().is_empty());
}
