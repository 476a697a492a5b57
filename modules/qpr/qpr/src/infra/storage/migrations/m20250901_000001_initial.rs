use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_column(name: impl IntoIden) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn report_fk(
    table: impl IntoIden + 'static,
    column: impl IntoIden + 'static,
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .from(table, column)
        .to(QprReports::Table, QprReports::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(id_column(Accounts::Id))
                    .col(
                        ColumnDef::new(Accounts::EmployeeCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(id_column(Profiles::Id))
                    .col(
                        ColumnDef::new(Profiles::AccountId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::EmployeeCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::Role).string().not_null())
                    .col(ColumnDef::new(Profiles::HodGroup).string())
                    .col(ColumnDef::new(Profiles::Name).string())
                    .col(ColumnDef::new(Profiles::Email).string())
                    .col(ColumnDef::new(Profiles::OfficeName).string())
                    .col(ColumnDef::new(Profiles::OfficeCode).string())
                    .col(
                        ColumnDef::new(Profiles::Finalized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Profiles::Table, Profiles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QprReports::Table)
                    .if_not_exists()
                    .col(id_column(QprReports::Id))
                    .col(ColumnDef::new(QprReports::AccountId).big_integer().not_null())
                    .col(ColumnDef::new(QprReports::OfficeName).string().not_null())
                    .col(ColumnDef::new(QprReports::OfficeCode).string().not_null())
                    .col(ColumnDef::new(QprReports::Region).string().not_null())
                    .col(ColumnDef::new(QprReports::Quarter).string().not_null())
                    .col(ColumnDef::new(QprReports::Year).string().not_null())
                    .col(ColumnDef::new(QprReports::Status).string().not_null())
                    .col(ColumnDef::new(QprReports::Phone).string().not_null())
                    .col(ColumnDef::new(QprReports::Email).string().not_null())
                    .col(
                        ColumnDef::new(QprReports::Submitted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QprReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QprReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QprReports::Table, QprReports::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_qpr_reports_account_id")
                    .table(QprReports::Table)
                    .col(QprReports::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EditRequests::Table)
                    .if_not_exists()
                    .col(id_column(EditRequests::Id))
                    .col(
                        ColumnDef::new(EditRequests::RequesterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EditRequests::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EditRequests::Kind).string().not_null())
                    .col(ColumnDef::new(EditRequests::Reason).text().not_null())
                    .col(ColumnDef::new(EditRequests::Status).string().not_null())
                    .col(
                        ColumnDef::new(EditRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EditRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EditRequests::Table, EditRequests::RequesterId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EditRequests::Table, EditRequests::RecipientId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section1Files::Table)
                    .if_not_exists()
                    .col(id_column(Section1Files::Id))
                    .col(
                        ColumnDef::new(Section1Files::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section1Files::TotalFiles).integer())
                    .col(ColumnDef::new(Section1Files::HindiFiles).integer())
                    .foreign_key(&mut report_fk(Section1Files::Table, Section1Files::ReportId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section2Meetings::Table)
                    .if_not_exists()
                    .col(id_column(Section2Meetings::Id))
                    .col(
                        ColumnDef::new(Section2Meetings::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section2Meetings::MeetingsCount).integer())
                    .col(ColumnDef::new(Section2Meetings::HindiMinutes).integer())
                    .col(ColumnDef::new(Section2Meetings::TotalPapers).integer())
                    .col(ColumnDef::new(Section2Meetings::HindiPapers).integer())
                    .foreign_key(&mut report_fk(
                        Section2Meetings::Table,
                        Section2Meetings::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section3OfficialLanguages::Table)
                    .if_not_exists()
                    .col(id_column(Section3OfficialLanguages::Id))
                    .col(
                        ColumnDef::new(Section3OfficialLanguages::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section3OfficialLanguages::TotalDocuments).integer())
                    .col(ColumnDef::new(Section3OfficialLanguages::BilingualDocuments).integer())
                    .col(ColumnDef::new(Section3OfficialLanguages::EnglishOnlyDocuments).integer())
                    .col(ColumnDef::new(Section3OfficialLanguages::HindiOnlyDocuments).integer())
                    .foreign_key(&mut report_fk(
                        Section3OfficialLanguages::Table,
                        Section3OfficialLanguages::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section4HindiLetters::Table)
                    .if_not_exists()
                    .col(id_column(Section4HindiLetters::Id))
                    .col(
                        ColumnDef::new(Section4HindiLetters::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section4HindiLetters::TotalLetters).integer())
                    .col(ColumnDef::new(Section4HindiLetters::NoReplyLetters).integer())
                    .col(ColumnDef::new(Section4HindiLetters::RepliedHindiLetters).integer())
                    .col(ColumnDef::new(Section4HindiLetters::RepliedEnglishLetters).integer())
                    .foreign_key(&mut report_fk(
                        Section4HindiLetters::Table,
                        Section4HindiLetters::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section5EnglishRepliedHindi::Table)
                    .if_not_exists()
                    .col(id_column(Section5EnglishRepliedHindi::Id))
                    .col(
                        ColumnDef::new(Section5EnglishRepliedHindi::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Section5EnglishRepliedHindi::RegionAEnglishLetters)
                            .integer(),
                    )
                    .col(ColumnDef::new(Section5EnglishRepliedHindi::RegionARepliedHindi).integer())
                    .col(
                        ColumnDef::new(Section5EnglishRepliedHindi::RegionARepliedEnglish)
                            .integer(),
                    )
                    .col(ColumnDef::new(Section5EnglishRepliedHindi::RegionANoReply).integer())
                    .foreign_key(&mut report_fk(
                        Section5EnglishRepliedHindi::Table,
                        Section5EnglishRepliedHindi::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section6IssuedLetters::Table)
                    .if_not_exists()
                    .col(id_column(Section6IssuedLetters::Id))
                    .col(
                        ColumnDef::new(Section6IssuedLetters::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section6IssuedLetters::RegionAHindiBilingual).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionAEnglishOnly).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionATotal).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionBHindiBilingual).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionBEnglishOnly).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionBTotal).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionCHindiBilingual).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionCEnglishOnly).integer())
                    .col(ColumnDef::new(Section6IssuedLetters::RegionCTotal).integer())
                    .foreign_key(&mut report_fk(
                        Section6IssuedLetters::Table,
                        Section6IssuedLetters::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section7Notings::Table)
                    .if_not_exists()
                    .col(id_column(Section7Notings::Id))
                    .col(
                        ColumnDef::new(Section7Notings::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section7Notings::HindiPages).integer())
                    .col(ColumnDef::new(Section7Notings::EnglishPages).integer())
                    .col(ColumnDef::new(Section7Notings::TotalPages).integer())
                    .col(ColumnDef::new(Section7Notings::EofficeNotings).integer())
                    .foreign_key(&mut report_fk(
                        Section7Notings::Table,
                        Section7Notings::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section8Workshops::Table)
                    .if_not_exists()
                    .col(id_column(Section8Workshops::Id))
                    .col(
                        ColumnDef::new(Section8Workshops::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section8Workshops::FullDayWorkshops).integer())
                    .col(ColumnDef::new(Section8Workshops::OfficersTrained).integer())
                    .col(ColumnDef::new(Section8Workshops::EmployeesTrained).integer())
                    .foreign_key(&mut report_fk(
                        Section8Workshops::Table,
                        Section8Workshops::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section9ImplementationCommittee::Table)
                    .if_not_exists()
                    .col(id_column(Section9ImplementationCommittee::Id))
                    .col(
                        ColumnDef::new(Section9ImplementationCommittee::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section9ImplementationCommittee::MeetingDate).date())
                    .col(
                        ColumnDef::new(Section9ImplementationCommittee::SubCommitteesCount)
                            .integer(),
                    )
                    .col(
                        ColumnDef::new(Section9ImplementationCommittee::MeetingsOrganized)
                            .integer(),
                    )
                    .col(ColumnDef::new(Section9ImplementationCommittee::AgendaHindi).string())
                    .foreign_key(&mut report_fk(
                        Section9ImplementationCommittee::Table,
                        Section9ImplementationCommittee::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section10HindiAdvisory::Table)
                    .if_not_exists()
                    .col(id_column(Section10HindiAdvisory::Id))
                    .col(
                        ColumnDef::new(Section10HindiAdvisory::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section10HindiAdvisory::MeetingDate).date())
                    .foreign_key(&mut report_fk(
                        Section10HindiAdvisory::Table,
                        Section10HindiAdvisory::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section11Achievements::Table)
                    .if_not_exists()
                    .col(id_column(Section11Achievements::Id))
                    .col(
                        ColumnDef::new(Section11Achievements::ReportId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Section11Achievements::InnovativeWork).text())
                    .col(ColumnDef::new(Section11Achievements::SpecialEvents).text())
                    .col(ColumnDef::new(Section11Achievements::HindiMediumWorks).text())
                    .foreign_key(&mut report_fk(
                        Section11Achievements::Table,
                        Section11Achievements::ReportId,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Section11Achievements::Table.into_iden(),
            Section10HindiAdvisory::Table.into_iden(),
            Section9ImplementationCommittee::Table.into_iden(),
            Section8Workshops::Table.into_iden(),
            Section7Notings::Table.into_iden(),
            Section6IssuedLetters::Table.into_iden(),
            Section5EnglishRepliedHindi::Table.into_iden(),
            Section4HindiLetters::Table.into_iden(),
            Section3OfficialLanguages::Table.into_iden(),
            Section2Meetings::Table.into_iden(),
            Section1Files::Table.into_iden(),
            EditRequests::Table.into_iden(),
            QprReports::Table.into_iden(),
            Profiles::Table.into_iden(),
            Accounts::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    EmployeeCode,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    AccountId,
    EmployeeCode,
    Role,
    HodGroup,
    Name,
    Email,
    OfficeName,
    OfficeCode,
    Finalized,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QprReports {
    Table,
    Id,
    AccountId,
    OfficeName,
    OfficeCode,
    Region,
    Quarter,
    Year,
    Status,
    Phone,
    Email,
    Submitted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EditRequests {
    Table,
    Id,
    RequesterId,
    RecipientId,
    Kind,
    Reason,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Section1Files {
    Table,
    Id,
    ReportId,
    TotalFiles,
    HindiFiles,
}

#[derive(DeriveIden)]
enum Section2Meetings {
    Table,
    Id,
    ReportId,
    MeetingsCount,
    HindiMinutes,
    TotalPapers,
    HindiPapers,
}

#[derive(DeriveIden)]
enum Section3OfficialLanguages {
    Table,
    Id,
    ReportId,
    TotalDocuments,
    BilingualDocuments,
    EnglishOnlyDocuments,
    HindiOnlyDocuments,
}

#[derive(DeriveIden)]
enum Section4HindiLetters {
    Table,
    Id,
    ReportId,
    TotalLetters,
    NoReplyLetters,
    RepliedHindiLetters,
    RepliedEnglishLetters,
}

#[derive(DeriveIden)]
enum Section5EnglishRepliedHindi {
    Table,
    Id,
    ReportId,
    RegionAEnglishLetters,
    RegionARepliedHindi,
    RegionARepliedEnglish,
    RegionANoReply,
}

#[derive(DeriveIden)]
enum Section6IssuedLetters {
    Table,
    Id,
    ReportId,
    RegionAHindiBilingual,
    RegionAEnglishOnly,
    RegionATotal,
    RegionBHindiBilingual,
    RegionBEnglishOnly,
    RegionBTotal,
    RegionCHindiBilingual,
    RegionCEnglishOnly,
    RegionCTotal,
}

#[derive(DeriveIden)]
enum Section7Notings {
    Table,
    Id,
    ReportId,
    HindiPages,
    EnglishPages,
    TotalPages,
    EofficeNotings,
}

#[derive(DeriveIden)]
enum Section8Workshops {
    Table,
    Id,
    ReportId,
    FullDayWorkshops,
    OfficersTrained,
    EmployeesTrained,
}

#[derive(DeriveIden)]
enum Section9ImplementationCommittee {
    Table,
    Id,
    ReportId,
    MeetingDate,
    SubCommitteesCount,
    MeetingsOrganized,
    AgendaHindi,
}

#[derive(DeriveIden)]
enum Section10HindiAdvisory {
    Table,
    Id,
    ReportId,
    MeetingDate,
}

#[derive(DeriveIden)]
enum Section11Achievements {
    Table,
    Id,
    ReportId,
    InnovativeWork,
    SpecialEvents,
    HindiMediumWorks,
}
