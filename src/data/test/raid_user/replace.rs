use super::*;

/// Tests storing a primary participant.
///
/// Expected: Ok with one primary row and no flex row
#[tokio::test]
async fn stores_primary_participant() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidUserRepository::new(db);
    repo.replace(10, &participant(7, "Tank", false)).await?;

    let primary = repo.get_all_primary().await?;
    assert_eq!(primary.len(), 1);
    assert_eq!(primary[0].raid_id, "10");
    assert_eq!(primary[0].user_id, "7");
    assert_eq!(primary[0].role, "Tank");
    assert!(repo.get_all_flex().await?.is_empty());

    Ok(())
}

/// Tests that switching from primary to flex moves the row between tables.
///
/// Expected: Ok with only the flex row left
#[tokio::test]
async fn moves_between_tables() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidUserRepository::new(db);
    repo.replace(10, &participant(7, "Tank", false)).await?;
    repo.replace(10, &participant(7, "Support", true)).await?;

    assert!(repo.get_all_primary().await?.is_empty());
    let flex = repo.get_all_flex().await?;
    assert_eq!(flex.len(), 1);
    assert_eq!(flex[0].role, "Support");

    let (raid_id, user) = RaidUser::from_flex_entity(flex[0].clone()).unwrap();
    assert_eq!(raid_id, 10);
    assert_eq!(user, participant(7, "Support", true));

    Ok(())
}

/// Tests that the same user in another raid is unaffected.
///
/// Expected: Ok with both rows present
#[tokio::test]
async fn keeps_other_raids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RaidUserRepository::new(db);
    repo.replace(10, &participant(7, "Tank", false)).await?;
    repo.replace(11, &participant(7, "Healer", false)).await?;

    let count = entity::prelude::RaidUser::find().count(db).await?;
    assert_eq!(count, 2);

    Ok(())
}
