use super::*;

/// Tests removing a role together with everyone holding it.
///
/// Expected: Ok(2), the stored role list no longer has the role and only the other
/// role's participant row is left
#[tokio::test]
async fn removes_role_and_its_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    let mut raid = sample_raid(1000);
    repo.create(&raid).await?;
    factory::create_raid_user(db, "1000", "Tank").await?;
    factory::create_raid_user_flex(db, "1000", "Tank").await?;
    factory::create_raid_user(db, "1000", "Support").await?;

    assert!(raid.remove_role("Tank").is_some());
    let removed = repo.remove_role(&raid, "Tank").await?;

    assert_eq!(removed, 2);
    let stored = repo.get_by_id(1000).await?.unwrap();
    assert_eq!(stored.roles, "1:!Support");
    let remaining = entity::prelude::RaidUser::find()
        .filter(entity::raid_user::Column::RaidId.eq("1000"))
        .all(db)
        .await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].role, "Support");
    assert_eq!(entity::prelude::RaidUserFlex::find().count(db).await?, 0);

    Ok(())
}

/// Tests that a failed participant delete leaves the raid row untouched.
///
/// Expected: Err and the stored role list still holds both roles
#[tokio::test]
async fn failure_keeps_role_list() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Raid)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidRepository::new(db);
    let mut raid = sample_raid(1000);
    repo.create(&raid).await?;

    assert!(raid.remove_role("Tank").is_some());
    let result = repo.remove_role(&raid, "Tank").await;

    assert!(result.is_err());
    let stored = repo.get_by_id(1000).await?.unwrap();
    assert_eq!(stored.roles, "2:Tank;1:!Support");

    Ok(())
}
