use super::*;

/// Tests storing a template and reading its roles back.
///
/// Expected: Ok with the role list preserved including flex-only roles
#[tokio::test]
async fn stores_template_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let roles = vec![RaidRole::new(2, "Tank"), RaidRole::flex(1, "Support")];

    let repo = RoleTemplateRepository::new(db);
    let model = repo.upsert(1, "Standard", &roles).await?;
    assert_eq!(model.roles, "2:Tank;1:!Support");

    let template = RoleTemplate::from_entity(model).unwrap();
    assert_eq!(template.roles, roles);

    Ok(())
}

/// Tests deleting a template only affects its own guild.
///
/// Expected: Ok(true) and the other guild's template remains
#[tokio::test]
async fn deletes_template_in_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_template(db, "1", "Standard", "2:Tank").await?;
    factory::create_role_template(db, "2", "Standard", "2:Tank").await?;

    let repo = RoleTemplateRepository::new(db);
    assert!(repo.delete(1, "Standard").await?);

    assert!(repo.get_by_guild(1).await?.is_empty());
    assert_eq!(repo.get_by_guild(2).await?.len(), 1);

    Ok(())
}
