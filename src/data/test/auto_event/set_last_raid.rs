use super::*;

/// Tests recording and clearing the last published raid.
///
/// Expected: Ok with the column updated each time
#[tokio::test]
async fn records_last_raid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_auto_event(db, "1").await?;

    let repo = AutoEventRepository::new(db);
    repo.set_last_raid(event.id, Some(4711)).await?;
    let stored = repo.get_by_id(event.id).await?.unwrap();
    assert_eq!(stored.last_raid_id, Some("4711".to_string()));
    assert_eq!(stored.name, event.name);

    repo.set_last_raid(event.id, None).await?;
    let stored = repo.get_by_id(event.id).await?.unwrap();
    assert_eq!(stored.last_raid_id, None);

    Ok(())
}
