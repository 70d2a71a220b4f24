//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `projectledger_core` linkage.
//! - Walk one project lifecycle against an in-memory database so the run
//!   stays deterministic and side-effect free.

use projectledger_core::db::open_db_in_memory;
use projectledger_core::{
    CallContext, RegisterProjectRequest, RegistryConfig, RegistryService,
    SqliteProjectRepository, ONE_UNIT,
};

fn main() {
    println!("projectledger_core version={}", projectledger_core::core_version());

    if let Err(err) = run_lifecycle_probe() {
        eprintln!("lifecycle probe failed: {err}");
        std::process::exit(1);
    }
}

fn run_lifecycle_probe() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteProjectRepository::try_new(&conn)?;
    let config = RegistryConfig::with_default_fee("admin.testnet")?;
    let service = RegistryService::new(repo, config);
    println!("admin={}", service.config().admin_account());

    let admin = CallContext::new("admin.testnet", ONE_UNIT);
    service.register(
        &admin,
        &RegisterProjectRequest {
            name: "Probe".to_string(),
            description: "Smoke lifecycle probe".to_string(),
            total_amount: 150,
        },
    )?;

    let listed = service.list_projects()?;
    println!("registered projects={}", listed.len());

    let completed = service.complete(&admin, "admin.testnet")?;
    println!("completed={completed}");

    let removed = service.remove(&admin, "admin.testnet")?;
    println!("removed={removed}");

    Ok(())
}
