use mockdock_domain::container::{Container, ContainerStatus, ContainerStore};
use mockdock_infra_fs::{CatalogError, ContainerCatalog, StorageLayout};
use std::collections::HashSet;
use tempfile::TempDir;

fn layout() -> (TempDir, StorageLayout) {
    let tmp = TempDir::new().unwrap();
    let layout = StorageLayout::new(tmp.path());
    (tmp, layout)
}

fn on_disk(layout: &StorageLayout) -> Vec<Container> {
    let text = std::fs::read_to_string(layout.containers_file()).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn status_round_trip() {
    let (_tmp, layout) = layout();
    let containers = ContainerCatalog::open(layout.containers_file());
    let web = containers.create("web", "nginx:latest").unwrap();
    let db = containers.create("db", "postgres:16").unwrap();
    assert_eq!(web.status(), &ContainerStatus::Running);

    assert!(containers.set_status(web.id(), ContainerStatus::Stopped).unwrap());
    assert_eq!(containers.get(web.id()).unwrap().status(), &ContainerStatus::Stopped);

    assert!(!containers.set_status("c999", ContainerStatus::Stopped).unwrap());
    assert_eq!(containers.get(db.id()).unwrap(), db);
    assert_eq!(on_disk(&layout), containers.list());
}

#[test]
fn remove_by_name_or_id() {
    let (_tmp, layout) = layout();
    let seeded = serde_json::json!([
        {"id": "c006", "name": "old", "image": "busybox:latest", "status": "stopped"}
    ]);
    std::fs::write(layout.containers_file(), seeded.to_string()).unwrap();

    for key in ["web1", "c007"] {
        let containers = ContainerCatalog::open(layout.containers_file());
        let web = containers.create("web1", "nginx:latest").unwrap();
        assert_eq!(web.id(), "c007");

        assert!(containers.remove(key).unwrap());
        assert!(containers.get("web1").is_none());
        assert!(containers.get("c007").is_none());
        assert!(!containers.remove(key).unwrap());
    }
}

#[test]
fn persistence_survives_reload() {
    let (_tmp, layout) = layout();
    let expected = {
        let containers = ContainerCatalog::open(layout.containers_file());
        containers.create("a", "nginx:latest").unwrap();
        let b = containers.create("b", "redis:7").unwrap();
        containers.set_status(b.id(), ContainerStatus::Stopped).unwrap();
        containers.list()
    };

    let reopened = ContainerCatalog::open(layout.containers_file());
    assert_eq!(reopened.list(), expected);
    assert_eq!(reopened.create("c", "nginx:latest").unwrap().id(), "c003");
}

#[test]
fn unknown_status_survives_a_rewrite() {
    let (_tmp, layout) = layout();
    let seeded = serde_json::json!([
        {"id": "c001", "name": "paused-one", "image": "nginx:latest", "status": "paused"}
    ]);
    std::fs::write(layout.containers_file(), seeded.to_string()).unwrap();

    let containers = ContainerCatalog::open(layout.containers_file());
    containers.create("fresh", "nginx:latest").unwrap();

    let text = std::fs::read_to_string(layout.containers_file()).unwrap();
    assert!(text.contains("\"status\": \"paused\""));
}

#[test]
fn concurrent_creates_get_unique_ids() {
    const WORKERS: usize = 8;
    const PER_WORKER: usize = 25;

    let (_tmp, layout) = layout();
    let containers = ContainerCatalog::open(layout.containers_file());

    let ids: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..WORKERS)
            .map(|w| {
                let containers = &containers;
                s.spawn(move || {
                    (0..PER_WORKER)
                        .map(|n| {
                            containers
                                .create(&format!("w{w}-{n}"), "nginx:latest")
                                .unwrap()
                                .id()
                                .to_string()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), WORKERS * PER_WORKER);
    assert_eq!(unique.len(), ids.len());

    let persisted = on_disk(&layout);
    assert_eq!(persisted.len(), WORKERS * PER_WORKER);
    let persisted_ids: HashSet<String> = persisted.iter().map(|c| c.id().to_string()).collect();
    assert_eq!(persisted_ids.len(), ids.len());
}

#[test]
fn malformed_file_starts_empty_and_recovers() {
    let (_tmp, layout) = layout();
    std::fs::write(layout.containers_file(), "[{\"id\": \"c001\", ").unwrap();

    let containers = ContainerCatalog::open(layout.containers_file());
    assert!(containers.list().is_empty());
    assert!(matches!(containers.load(), Err(CatalogError::Corrupt { .. })));

    let web = containers.create("web", "nginx:latest").unwrap();
    assert_eq!(web.id(), "c001");
    assert_eq!(on_disk(&layout), vec![web]);
}

#[test]
fn largest_id_refuses_new_containers() {
    let (_tmp, layout) = layout();
    let last = format!("c{}", u64::MAX);
    let seeded = serde_json::json!([
        {"id": last, "name": "keep", "image": "nginx:latest", "status": "running"}
    ]);
    std::fs::write(layout.containers_file(), seeded.to_string()).unwrap();

    let containers = ContainerCatalog::open(layout.containers_file());
    let err = containers.create("new", "nginx:latest").unwrap_err();
    assert_eq!(err.code(), "CATALOG_IDS_EXHAUSTED");

    let all = containers.list();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), last);
    assert_eq!(all[0].name(), "keep");
    assert_eq!(on_disk(&layout), all);
}
