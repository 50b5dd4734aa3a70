//! End-to-end ender chest migration over generated player files.
//!
//! Run with: `cargo test -p playerdata-migrate --test enderchest_test`

#![allow(clippy::pedantic)]

mod common;

use mongodb::bson::{doc, Bson};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    compound, item_table, legacy_item, named_item, player_root, write_player_file,
    ScriptedPrompter,
};
use playerdata_migrate::migrators::enderchest::migrate_directory;
use playerdata_migrate::nbt::{List, Tag, TagKind};
use playerdata_migrate::{
    DocumentStore, MemoryStore, MigrationConfig, MigrationContext, MigrationOptions,
    MigratorRegistry,
};

const ALEX: &str = "00000000-0000-4000-8000-000000000001";
const STEVE: &str = "00000000-0000-4000-8000-000000000002";
const EMPTY: &str = "00000000-0000-4000-8000-000000000003";
const BROKEN: &str = "00000000-0000-4000-8000-000000000004";

fn options() -> MigrationOptions {
    MigrationOptions {
        dry_run: false,
        progress_interval: 1,
    }
}

#[tokio::test]
async fn test_migrates_directory_into_banks() {
    let dir = TempDir::new().unwrap();
    write_player_file(
        dir.path(),
        ALEX,
        &player_root(vec![legacy_item(1, 64, 0, 0), named_item("minecraft:diamond", 3, 5)]),
    );
    write_player_file(dir.path(), STEVE, &player_root(vec![legacy_item(264, 1, 26, 0)]));
    write_player_file(dir.path(), EMPTY, &player_root(Vec::new()));
    std::fs::write(dir.path().join(format!("{BROKEN}.dat")), b"\x1f\x8b\x08garbage").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let store = MemoryStore::new();
    let stats = migrate_directory(dir.path(), &item_table(), &store, &options())
        .await
        .unwrap();

    assert_eq!(stats.scanned, 4);
    assert_eq!(stats.migrated, 2);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.written, 2);

    // One bulk insert for all banks
    assert_eq!(store.bulk_writes(), 1);

    // Users are created only for players with a non-empty bank
    let users = store.users();
    assert_eq!(users.len(), 2);
    let alex_id = store.find_user_id(ALEX).await.unwrap().unwrap();
    assert!(store.find_user_id(EMPTY).await.unwrap().is_none());

    let banks = store.banks();
    let alex_bank = banks
        .iter()
        .find(|b| b.get_document("user").unwrap().get("$id") == Some(&alex_id))
        .unwrap();
    let user_ref = alex_bank.get_document("user").unwrap();
    assert_eq!(user_ref.get_str("$ref").unwrap(), "users");

    let items = alex_bank.get_array("items").unwrap();
    assert_eq!(items.len(), 2);
    let first = items[0].as_document().unwrap();
    assert_eq!(first.get_str("type").unwrap(), "STONE");
    assert_eq!(first.get_i32("amount").unwrap(), 64);
    assert_eq!(first.get_i32("slot").unwrap(), 0);
    assert!(!first.contains_key("meta"));

    let second = items[1].as_document().unwrap();
    assert_eq!(second.get_str("type").unwrap(), "DIAMOND");
    assert_eq!(second.get_i32("slot").unwrap(), 5);
}

#[tokio::test]
async fn test_existing_user_is_referenced_not_duplicated() {
    let dir = TempDir::new().unwrap();
    write_player_file(dir.path(), ALEX, &player_root(vec![legacy_item(1, 1, 0, 0)]));

    let store = MemoryStore::new();
    let existing = store.insert_user(ALEX).await.unwrap();

    migrate_directory(dir.path(), &item_table(), &store, &options())
        .await
        .unwrap();

    assert_eq!(store.users().len(), 1);
    let bank = &store.banks()[0];
    assert_eq!(bank.get_document("user").unwrap().get("$id"), Some(&existing));
}

#[tokio::test]
async fn test_unknown_names_map_to_air() {
    let dir = TempDir::new().unwrap();
    write_player_file(
        dir.path(),
        ALEX,
        &player_root(vec![named_item("minecraft:netherite_ingot", 1, 0)]),
    );

    let store = MemoryStore::new();
    migrate_directory(dir.path(), &item_table(), &store, &options())
        .await
        .unwrap();

    let items = store.banks()[0].get_array("items").unwrap().clone();
    assert_eq!(
        items[0].as_document().unwrap().get_str("type").unwrap(),
        "AIR"
    );
}

#[tokio::test]
async fn test_item_metadata_is_written() {
    let enchant = |id: i16, lvl: i16| {
        Tag::Compound(compound([("id", Tag::Short(id)), ("lvl", Tag::Short(lvl))]))
    };
    let book = Tag::Compound(compound([
        ("id", Tag::String("minecraft:enchanted_book".to_string())),
        ("Count", Tag::Byte(1)),
        ("Slot", Tag::Byte(2)),
        ("Damage", Tag::Short(0)),
        (
            "tag",
            Tag::Compound(compound([
                (
                    "StoredEnchantments",
                    Tag::List(List::new(TagKind::Compound, vec![enchant(16, 5), enchant(99, 1)]).unwrap()),
                ),
                (
                    "display",
                    Tag::Compound(compound([("Name", Tag::String("Sharp".to_string()))])),
                ),
            ])),
        ),
    ]));

    let dir = TempDir::new().unwrap();
    write_player_file(dir.path(), ALEX, &player_root(vec![book]));

    let store = MemoryStore::new();
    migrate_directory(dir.path(), &item_table(), &store, &options())
        .await
        .unwrap();

    let items = store.banks()[0].get_array("items").unwrap().clone();
    let meta = items[0].as_document().unwrap().get_document("meta").unwrap().clone();
    assert_eq!(meta.get_str("==").unwrap(), "ItemMeta");
    assert_eq!(meta.get_str("meta-type").unwrap(), "ENCHANTED");
    assert_eq!(meta.get_str("display-name").unwrap(), "Sharp");
    assert_eq!(
        meta.get_document("stored-enchants").unwrap(),
        &doc! { "DAMAGE_ALL": 5, "null": 1 }
    );
}

#[tokio::test]
async fn test_missing_ender_items_skips_file() {
    let dir = TempDir::new().unwrap();
    write_player_file(dir.path(), ALEX, &compound([("Health", Tag::Float(20.0))]));
    write_player_file(dir.path(), STEVE, &player_root(vec![legacy_item(1, 1, 0, 0)]));

    let store = MemoryStore::new();
    let stats = migrate_directory(dir.path(), &item_table(), &store, &options())
        .await
        .unwrap();

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.migrated, 1);
    assert_eq!(store.banks().len(), 1);
}

#[tokio::test]
async fn test_empty_directory_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    let stats = migrate_directory(dir.path(), &item_table(), &store, &options())
        .await
        .unwrap();

    assert_eq!(stats.scanned, 0);
    assert_eq!(stats.written, 0);
    assert_eq!(store.bulk_writes(), 0);
}

#[tokio::test]
async fn test_dry_run_through_registry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "type": 1, "meta": 0, "name": "Stone", "text_type": "stone" }
        ])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_player_file(dir.path(), ALEX, &player_root(vec![named_item("minecraft:stone", 1, 0)]));

    let mut config = MigrationConfig::default();
    config.item_table.url = format!("{}/items.json", server.uri());
    config.options.dry_run = true;

    let player_dir = dir.path().to_string_lossy().into_owned();
    let prompter = ScriptedPrompter::new([player_dir.as_str()]);
    let mut ctx = MigrationContext::new(config, Box::new(prompter));

    let registry = MigratorRegistry::with_builtin();
    let migrator = registry.get("EnderChest").unwrap();
    assert!(migrator.migrate(&mut ctx).await);
}

#[tokio::test]
async fn test_unreachable_item_table_fails_migration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = MigrationConfig::default();
    config.item_table.url = format!("{}/items.json", server.uri());
    config.options.dry_run = true;

    let player_dir = dir.path().to_string_lossy().into_owned();
    let mut ctx = MigrationContext::new(config, Box::new(ScriptedPrompter::new([player_dir.as_str()])));

    let registry = MigratorRegistry::with_builtin();
    assert!(!registry.get("enderchest").unwrap().migrate(&mut ctx).await);
}

#[test]
fn test_user_reference_shape() {
    let user = playerdata_migrate::writer::UserRef::new(Bson::Int32(7));
    let document = mongodb::bson::to_document(&user).unwrap();
    assert_eq!(document, doc! { "$ref": "users", "$id": 7 });
}
