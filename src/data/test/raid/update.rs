use super::*;

/// Tests updating metadata and roles of a raid.
///
/// Expected: Ok with the new values stored
#[tokio::test]
async fn updates_metadata_and_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    let mut raid = sample_raid(1000);
    repo.create(&raid).await?;

    raid.name = "Renamed".to_string();
    raid.description = String::new();
    raid.add_role(RaidRole::new(3, "DPS"));
    repo.update(&raid).await?;

    let stored = repo.get_by_id(1000).await?.unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.description, None);
    assert_eq!(stored.roles, "2:Tank;1:!Support;3:DPS");

    Ok(())
}

/// Tests updating a raid that was never stored.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_missing_raid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RaidRepository::new(db).update(&sample_raid(4242)).await;

    assert!(result.is_err());

    Ok(())
}
