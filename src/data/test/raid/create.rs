use super::*;

/// Tests creating a raid row.
///
/// Verifies that ids are stored as strings and roles and groups use their text encoding.
///
/// Expected: Ok with encoded columns
#[tokio::test]
async fn creates_raid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    let model = repo.create(&sample_raid(555)).await?;

    assert_eq!(model.id, "555");
    assert_eq!(model.channel_id, "10");
    assert_eq!(model.roles, "2:Tank;1:!Support");
    assert_eq!(model.permitted_groups, "Static");
    assert_eq!(model.description, Some("Full clear".to_string()));

    Ok(())
}

/// Tests that a duplicate raid id is rejected.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    repo.create(&sample_raid(555)).await?;
    let result = repo.create(&sample_raid(555)).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests that a stored row converts back into an equal raid.
///
/// Expected: Raid::from_entity reproduces metadata and roles
#[tokio::test]
async fn converts_back_to_domain_model() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let raid = sample_raid(777);
    let model = RaidRepository::new(db).create(&raid).await?;

    let restored = Raid::from_entity(model).unwrap();
    assert_eq!(restored, raid);

    Ok(())
}
