use super::*;

/// Tests creating an auto event and converting it back.
///
/// Expected: Ok with weekday stored as days from Monday and the template preserved
#[tokio::test]
async fn creates_auto_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AutoEventRepository::new(db);
    let model = repo.create(&params(1)).await?;

    assert_eq!(model.weekday, 5);
    assert_eq!(model.lead_days, 2);
    assert_eq!(model.roles, "5:Participants");

    let event = AutoEvent::from_entity(model).unwrap();
    assert_eq!(event.weekday, Weekday::Sat);
    assert_eq!(event.template, params(1).template);
    assert_eq!(event.last_raid_id, None);

    Ok(())
}

/// Tests counting auto events per guild.
///
/// Expected: counts only include the requested guild
#[tokio::test]
async fn counts_by_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_auto_event(db, "1").await?;
    factory::create_auto_event(db, "1").await?;
    factory::create_auto_event(db, "2").await?;

    let repo = AutoEventRepository::new(db);
    assert_eq!(repo.count_by_guild(1).await?, 2);
    assert_eq!(repo.count_by_guild(3).await?, 0);
    assert_eq!(repo.get_by_guild(1).await?.len(), 2);

    Ok(())
}
