//! User data migration over YAML permission and economy fixtures.
//!
//! Run with: `cargo test -p playerdata-migrate --test userdata_test`

#![allow(clippy::pedantic)]

mod common;

use std::path::Path;
use tempfile::TempDir;

use common::ScriptedPrompter;
use playerdata_migrate::migrators::userdata::{migrate_users, UserDataSources};
use playerdata_migrate::{
    DocumentStore, Error, MemoryStore, MigrationConfig, MigrationContext, MigrationOptions,
    MigratorRegistry,
};

const ALEX: &str = "00000000-0000-4000-8000-000000000001";
const STEVE: &str = "00000000-0000-4000-8000-000000000002";

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn sources(root: &Path, worlds: &[&str], custom_meta: bool) -> UserDataSources {
    UserDataSources {
        userdata_dir: root.join("Essentials/userdata"),
        permissions_dir: root.join("bPermissions"),
        whitelist: vec!["hero".to_string(), "diamond".to_string()],
        worlds: worlds.iter().map(|w| w.to_string()).collect(),
        custom_meta,
    }
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("bPermissions/world/users.yml"),
        &format!(
            "users:\n  {ALEX}:\n    groups:\n    - Hero\n    - default\n    meta:\n      prefix: '&a[A]'\n      suffix: '!'\n  {STEVE}:\n    groups:\n    - diamond\n"
        ),
    );
    write(
        &dir.path().join(format!("Essentials/userdata/{ALEX}.yml")),
        "lastAccountName: Alex\nmoney: '1500.5'\n",
    );
    write(
        &dir.path().join(format!("Essentials/userdata/{STEVE}.yml")),
        "lastAccountName: Steve\nmoney: 42\n",
    );
    dir
}

#[tokio::test]
async fn test_migrates_users_with_economy_data() {
    let dir = fixture();
    let store = MemoryStore::new();

    let stats = migrate_users(
        &sources(dir.path(), &["world"], false),
        &store,
        &MigrationOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(stats.migrated, 2);
    assert_eq!(stats.written, 2);
    assert_eq!(store.bulk_writes(), 1);

    let users = store.users();
    let alex = users.iter().find(|u| u.get_str("uuid").is_ok_and(|v| v == ALEX)).unwrap();
    assert_eq!(alex.get_str("name").unwrap(), "Alex");
    assert_eq!(alex.get_f64("balance").unwrap(), 1500.5);
    let groups: Vec<_> = alex
        .get_array("groups")
        .unwrap()
        .iter()
        .filter_map(|g| g.as_str())
        .collect();
    assert_eq!(groups, ["Hero"]);
    assert!(alex.get("custom_prefix").map_or(true, |v| v.as_null().is_some()));

    let steve = users.iter().find(|u| u.get_str("uuid").is_ok_and(|v| v == STEVE)).unwrap();
    assert_eq!(steve.get_f64("balance").unwrap(), 42.0);
}

#[tokio::test]
async fn test_custom_meta_is_copied_when_enabled() {
    let dir = fixture();
    let store = MemoryStore::new();

    migrate_users(
        &sources(dir.path(), &["world"], true),
        &store,
        &MigrationOptions::default(),
    )
    .await
    .unwrap();

    let users = store.users();
    let alex = users.iter().find(|u| u.get_str("uuid").is_ok_and(|v| v == ALEX)).unwrap();
    assert_eq!(alex.get_str("custom_prefix").unwrap(), "&a[A]");
    assert_eq!(alex.get_str("custom_suffix").unwrap(), "!");
}

#[tokio::test]
async fn test_missing_economy_file_defaults() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("bPermissions/world/users.yml"),
        &format!("users:\n  {ALEX}:\n    groups: []\n"),
    );

    let store = MemoryStore::new();
    migrate_users(
        &sources(dir.path(), &["world"], false),
        &store,
        &MigrationOptions::default(),
    )
    .await
    .unwrap();

    let users = store.users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].get_f64("balance").unwrap(), 0.0);
    assert!(!users[0].contains_key("name"));
}

#[tokio::test]
async fn test_later_world_wins_for_same_player() {
    let dir = fixture();
    write(
        &dir.path().join("bPermissions/world_nether/users.yml"),
        &format!("users:\n  {ALEX}:\n    groups:\n    - diamond\n"),
    );

    let store = MemoryStore::new();
    let stats = migrate_users(
        &sources(dir.path(), &["world", "world_nether"], false),
        &store,
        &MigrationOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(stats.scanned, 3);
    assert_eq!(stats.written, 2);

    let users = store.users();
    assert_eq!(users.len(), 2);
    let alex = users.iter().find(|u| u.get_str("uuid").is_ok_and(|v| v == ALEX)).unwrap();
    let groups: Vec<_> = alex
        .get_array("groups")
        .unwrap()
        .iter()
        .filter_map(|g| g.as_str())
        .collect();
    assert_eq!(groups, ["diamond"]);
}

#[tokio::test]
async fn test_upsert_keeps_existing_user_id() {
    let dir = fixture();
    let store = MemoryStore::new();
    let id = store.insert_user(ALEX).await.unwrap();

    migrate_users(
        &sources(dir.path(), &["world"], false),
        &store,
        &MigrationOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(store.users().len(), 2);
    assert_eq!(store.find_user_id(ALEX).await.unwrap(), Some(id));
}

#[tokio::test]
async fn test_world_without_users_key_is_skipped() {
    let dir = fixture();
    write(&dir.path().join("bPermissions/creative/users.yml"), "groups: {}\n");

    let store = MemoryStore::new();
    let stats = migrate_users(
        &sources(dir.path(), &["creative", "world"], false),
        &store,
        &MigrationOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(stats.migrated, 2);
}

#[tokio::test]
async fn test_missing_users_file_is_fatal() {
    let dir = fixture();
    let store = MemoryStore::new();

    let result = migrate_users(
        &sources(dir.path(), &["world", "missing"], false),
        &store,
        &MigrationOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(store.bulk_writes(), 0);
}

#[tokio::test]
async fn test_dry_run_through_registry() {
    let dir = fixture();
    let userdata = dir.path().join("Essentials/userdata");
    let perms = dir.path().join("bPermissions");

    let mut config = MigrationConfig::default();
    config.options.dry_run = true;
    config.answers.insert(
        "userdata".to_string(),
        [
            ("userData", userdata.to_string_lossy().into_owned()),
            ("bPerms", perms.to_string_lossy().into_owned()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    );

    let prompter = ScriptedPrompter::default();
    let mut ctx = MigrationContext::new(config, Box::new(prompter));

    let registry = MigratorRegistry::with_builtin();
    assert!(registry.get("userdata").unwrap().migrate(&mut ctx).await);
}
