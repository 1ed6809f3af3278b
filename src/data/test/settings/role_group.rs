use super::*;

/// Tests that upserting an existing group replaces its roles.
///
/// Expected: Ok with one group holding the new roles
#[tokio::test]
async fn upsert_replaces_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleGroupRepository::new(db);
    repo.upsert(1, "Static", &["Raider".to_string()]).await?;
    repo.upsert(1, "Static", &["Raider".to_string(), "Officer".to_string()])
        .await?;

    let groups = repo.get_by_guild(1).await?;
    assert_eq!(groups.len(), 1);

    let group = RoleGroup::from_entity(groups[0].clone()).unwrap();
    assert_eq!(group.roles, vec!["Raider".to_string(), "Officer".to_string()]);

    Ok(())
}

/// Tests that groups are scoped to their guild and sorted by name.
///
/// Expected: only the requested guild's groups, alphabetically
#[tokio::test]
async fn lists_by_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_group(db, "1", "Zeta", "A").await?;
    factory::create_role_group(db, "1", "Alpha", "B").await?;
    factory::create_role_group(db, "2", "Other", "C").await?;

    let groups = RoleGroupRepository::new(db).get_by_guild(1).await?;
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();

    assert_eq!(names, vec!["Alpha", "Zeta"]);

    Ok(())
}

/// Tests deleting existing and missing groups.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn deletes_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_settings_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role_group(db, "1", "Static", "Raider").await?;

    let repo = RoleGroupRepository::new(db);
    assert!(repo.delete(1, "Static").await?);
    assert!(!repo.delete(1, "Static").await?);

    Ok(())
}
