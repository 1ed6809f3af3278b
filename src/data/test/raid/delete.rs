use super::*;

/// Tests deleting a raid removes its participants from both tables.
///
/// Expected: Ok(true) and no rows left for the raid
#[tokio::test]
async fn deletes_raid_and_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let raid = factory::create_raid(db).await?;
    let other = factory::create_raid(db).await?;
    factory::create_raid_user(db, &raid.id, "Tank").await?;
    factory::create_raid_user_flex(db, &raid.id, "Support").await?;
    factory::create_raid_user(db, &other.id, "Tank").await?;

    let repo = RaidRepository::new(db);
    let deleted = repo.delete(raid.id.parse().unwrap()).await?;

    assert!(deleted);
    assert!(entity::prelude::Raid::find_by_id(raid.id.clone())
        .one(db)
        .await?
        .is_none());

    let primary = entity::prelude::RaidUser::find()
        .filter(entity::raid_user::Column::RaidId.eq(raid.id.as_str()))
        .count(db)
        .await?;
    let flex = entity::prelude::RaidUserFlex::find()
        .filter(entity::raid_user_flex::Column::RaidId.eq(raid.id.as_str()))
        .count(db)
        .await?;
    assert_eq!(primary, 0);
    assert_eq!(flex, 0);

    // Other raids are untouched
    let remaining = entity::prelude::RaidUser::find().count(db).await?;
    assert_eq!(remaining, 1);

    Ok(())
}

/// Tests deleting a raid that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_raid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = RaidRepository::new(db).delete(31337).await?;

    assert!(!deleted);

    Ok(())
}
