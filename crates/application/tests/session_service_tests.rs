use application::SessionService;
use chrono::{DateTime, Duration, Utc};
use domain::scan::{DeviceId, NewScan, ScanAttributes, ScanRepository};
use domain::session::{MockSessionRepository, SessionId};
use domain::{DomainError, ErrorKind, FixedClock};
use infrastructure::InMemoryInventoryStore;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    "2024-03-15T10:00:00Z".parse().unwrap()
}

fn service_over(store: &InMemoryInventoryStore, at: DateTime<Utc>) -> SessionService {
    SessionService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(FixedClock(at)),
    )
}

#[tokio::test]
async fn test_create_session_uses_clock() {
    let store = InMemoryInventoryStore::new();
    let service = service_over(&store, now());

    let created = service.create_session().await.unwrap();

    assert_eq!(created.session.id.value(), 1);
    assert_eq!(created.session.date, now());
    assert_eq!(created.session.created_at, now());
    assert_eq!(created.message, "New inventory session #1 created");

    let second = service.create_session().await.unwrap();
    assert_eq!(second.session.id.value(), 2);
}

#[tokio::test]
async fn test_list_sessions_newest_first_with_counts() {
    let store = InMemoryInventoryStore::new();
    let older = service_over(&store, now() - Duration::days(2))
        .create_session()
        .await
        .unwrap()
        .session;
    let newer = service_over(&store, now()).create_session().await.unwrap().session;

    for device in ["111", "222"] {
        store
            .insert(&NewScan::new(
                DeviceId::new(device).unwrap(),
                older.id,
                &ScanAttributes::default(),
                now(),
            ))
            .await
            .unwrap();
    }

    let listed = service_over(&store, now()).list_sessions().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].session.id, newer.id);
    assert_eq!(listed[0].scan_count, 0);
    assert_eq!(listed[1].session.id, older.id);
    assert_eq!(listed[1].scan_count, 2);
}

#[tokio::test]
async fn test_count_scans_matches_records() {
    let store = InMemoryInventoryStore::new();
    let service = service_over(&store, now());
    let session = service.create_session().await.unwrap().session;

    assert_eq!(service.count_scans(session.id).await.unwrap(), 0);

    store
        .insert(&NewScan::new(
            DeviceId::new("111").unwrap(),
            session.id,
            &ScanAttributes::default(),
            now(),
        ))
        .await
        .unwrap();

    assert_eq!(service.count_scans(session.id).await.unwrap(), 1);
    assert_eq!(
        service
            .count_scans(SessionId::new(99))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_create_session_storage_fault() {
    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_create()
        .returning(|_| Err(DomainError::storage("database is locked")));

    let store = InMemoryInventoryStore::new();
    let service = SessionService::new(
        Arc::new(sessions),
        Arc::new(store),
        Arc::new(FixedClock(now())),
    );

    let err = service.create_session().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}
