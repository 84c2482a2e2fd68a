use super::*;

#[tokio::test]
async fn missing_setting_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.get_setting("theme").await.expect("read"), None);
}

#[tokio::test]
async fn put_setting_round_trips_and_overwrites() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .put_setting("theme", "theme-dark")
        .await
        .expect("write");
    assert_eq!(
        storage.get_setting("theme").await.expect("read").as_deref(),
        Some("theme-dark")
    );

    storage
        .put_setting("theme", "theme-light")
        .await
        .expect("overwrite");
    assert_eq!(
        storage.get_setting("theme").await.expect("read").as_deref(),
        Some("theme-light")
    );
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn settings_survive_reopening_database_file() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("co2_dashboard_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("settings.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let storage = Storage::new(&database_url).await.expect("db");
        storage
            .put_setting("theme", "theme-dark")
            .await
            .expect("write");
        storage.pool().close().await;
    }

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.get_setting("theme").await.expect("read").as_deref(),
        Some("theme-dark")
    );
    reopened.pool().close().await;

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn memory_urls_have_no_parent_dir() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/settings.db?mode=rwc"),
        Some(PathBuf::from("./data/settings.db"))
    );
}
