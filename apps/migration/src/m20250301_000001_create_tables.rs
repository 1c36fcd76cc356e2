use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Authors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Authors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Authors::FirstName).string().not_null())
                    .col(ColumnDef::new(Authors::LastName).string().not_null())
                    .col(ColumnDef::new(Authors::UserName).string().null())
                    .to_owned(),
            )
            .await?;

        // Uniqueness lives here, not in application code; nullable, so
        // authors without a user name never collide.
        manager
            .create_index(
                Index::create()
                    .name("idx-authors-user-name")
                    .table(Authors::Table)
                    .col(Authors::UserName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Deliberately no foreign key: author deletes do not
                    // cascade and may leave dangling references.
                    .col(ColumnDef::new(BlogPosts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(BlogPosts::Title).string().not_null())
                    .col(ColumnDef::new(BlogPosts::Content).text().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::PublishDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Comments)
                            .json_binary()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Authors {
    Table,
    Id,
    FirstName,
    LastName,
    UserName,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    PublishDate,
    Comments,
}
