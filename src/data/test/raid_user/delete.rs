use super::*;

/// Tests removing a participant.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_participant() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let raid = factory::create_raid(db).await?;
    let user = factory::create_raid_user(db, &raid.id, "Tank").await?;

    let repo = RaidUserRepository::new(db);
    let deleted = repo
        .delete(raid.id.parse().unwrap(), user.user_id.parse().unwrap())
        .await?;

    assert!(deleted);
    assert!(repo.get_all_primary().await?.is_empty());

    Ok(())
}

/// Tests removing a user without rows.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = RaidUserRepository::new(db).delete(1, 2).await?;

    assert!(!deleted);

    Ok(())
}
