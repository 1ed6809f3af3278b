use super::*;

/// Tests setting the fractal channel twice.
///
/// Expected: unset at first, then the latest channel name
#[tokio::test]
async fn replaces_fractal_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingRepository::new(db);
    assert_eq!(repo.get_fractal_channel(1).await?, None);

    repo.set_fractal_channel(1, "fractals").await?;
    repo.set_fractal_channel(1, "fractal-runs").await?;

    assert_eq!(
        repo.get_fractal_channel(1).await?,
        Some("fractal-runs".to_string())
    );
    assert_eq!(repo.get_fractal_channel(2).await?, None);

    Ok(())
}

/// Tests reading a channel stored by the factory.
///
/// Expected: the stored name
#[tokio::test]
async fn reads_stored_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild_setting(db, "3", "fractals").await?;

    let channel = GuildSettingRepository::new(db).get_fractal_channel(3).await?;
    assert_eq!(channel, Some("fractals".to_string()));

    Ok(())
}
