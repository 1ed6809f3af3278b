use super::*;

/// Tests deleting an auto event.
///
/// Expected: Ok(true) then Ok(false) for the second attempt
#[tokio::test]
async fn deletes_auto_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_auto_event(db, "1").await?;

    let repo = AutoEventRepository::new(db);
    assert!(repo.delete(event.id).await?);
    assert!(!repo.delete(event.id).await?);
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}
