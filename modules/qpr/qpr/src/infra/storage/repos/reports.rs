use anyhow::Context as _;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::domain::model::{Report, ReportHeader, ReportSummary};
use crate::domain::repos::ReportsRepository;
use crate::domain::sections::{
    Section1Files, Section2Meetings, Section3OfficialLanguages, Section4HindiLetters,
    Section5EnglishRepliedHindi, Section6IssuedLetters, Section7Notings, Section8Workshops,
    Section9ImplementationCommittee, Section10HindiAdvisory, Section11Achievements, SectionSet,
};
use crate::domain::workflow;
use crate::infra::storage::entities::report;
use crate::infra::storage::entities::sections::{
    section1_files, section2_meetings, section3_official_languages, section4_hindi_letters,
    section5_english_replied_hindi, section6_issued_letters, section7_notings, section8_workshops,
    section9_implementation_committee, section10_hindi_advisory, section11_achievements,
};

pub struct SeaOrmReportsRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_report(model: report::Model, sections: SectionSet) -> Report {
    Report {
        id: model.id,
        account_id: model.account_id,
        submitted: model.submitted,
        header: ReportHeader {
            office_name: model.office_name,
            office_code: model.office_code,
            region: model.region,
            quarter: model.quarter,
            year: model.year,
            status: model.status,
            phone: model.phone,
            email: model.email,
        },
        sections,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn to_summary(model: report::Model) -> ReportSummary {
    ReportSummary {
        id: model.id,
        account_id: model.account_id,
        office_name: model.office_name,
        office_code: model.office_code,
        quarter: model.quarter,
        year: model.year,
        status: model.status,
        submitted: model.submitted,
    }
}

async fn load_sections<C: ConnectionTrait>(conn: &C, report_id: i64) -> anyhow::Result<SectionSet> {
    let mut set = SectionSet::default();

    if let Some(m) = section1_files::Entity::find()
        .filter(section1_files::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.files = Some(Section1Files {
            total_files: m.total_files,
            hindi_files: m.hindi_files,
        });
    }
    if let Some(m) = section2_meetings::Entity::find()
        .filter(section2_meetings::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.meetings = Some(Section2Meetings {
            meetings_count: m.meetings_count,
            hindi_minutes: m.hindi_minutes,
            total_papers: m.total_papers,
            hindi_papers: m.hindi_papers,
        });
    }
    if let Some(m) = section3_official_languages::Entity::find()
        .filter(section3_official_languages::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.official_languages = Some(Section3OfficialLanguages {
            total_documents: m.total_documents,
            bilingual_documents: m.bilingual_documents,
            english_only_documents: m.english_only_documents,
            hindi_only_documents: m.hindi_only_documents,
        });
    }
    if let Some(m) = section4_hindi_letters::Entity::find()
        .filter(section4_hindi_letters::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.hindi_letters = Some(Section4HindiLetters {
            total_letters: m.total_letters,
            no_reply_letters: m.no_reply_letters,
            replied_hindi_letters: m.replied_hindi_letters,
            replied_english_letters: m.replied_english_letters,
        });
    }
    if let Some(m) = section5_english_replied_hindi::Entity::find()
        .filter(section5_english_replied_hindi::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.english_replied_hindi = Some(Section5EnglishRepliedHindi {
            region_a_english_letters: m.region_a_english_letters,
            region_a_replied_hindi: m.region_a_replied_hindi,
            region_a_replied_english: m.region_a_replied_english,
            region_a_no_reply: m.region_a_no_reply,
        });
    }
    if let Some(m) = section6_issued_letters::Entity::find()
        .filter(section6_issued_letters::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.issued_letters = Some(Section6IssuedLetters {
            region_a_hindi_bilingual: m.region_a_hindi_bilingual,
            region_a_english_only: m.region_a_english_only,
            region_a_total: m.region_a_total,
            region_b_hindi_bilingual: m.region_b_hindi_bilingual,
            region_b_english_only: m.region_b_english_only,
            region_b_total: m.region_b_total,
            region_c_hindi_bilingual: m.region_c_hindi_bilingual,
            region_c_english_only: m.region_c_english_only,
            region_c_total: m.region_c_total,
        });
    }
    if let Some(m) = section7_notings::Entity::find()
        .filter(section7_notings::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.notings = Some(Section7Notings {
            hindi_pages: m.hindi_pages,
            english_pages: m.english_pages,
            total_pages: m.total_pages,
            eoffice_notings: m.eoffice_notings,
        });
    }
    if let Some(m) = section8_workshops::Entity::find()
        .filter(section8_workshops::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.workshops = Some(Section8Workshops {
            full_day_workshops: m.full_day_workshops,
            officers_trained: m.officers_trained,
            employees_trained: m.employees_trained,
        });
    }
    if let Some(m) = section9_implementation_committee::Entity::find()
        .filter(section9_implementation_committee::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.implementation_committee = Some(Section9ImplementationCommittee {
            meeting_date: m.meeting_date,
            sub_committees_count: m.sub_committees_count,
            meetings_organized: m.meetings_organized,
            agenda_hindi: m.agenda_hindi,
        });
    }
    if let Some(m) = section10_hindi_advisory::Entity::find()
        .filter(section10_hindi_advisory::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.hindi_advisory = Some(Section10HindiAdvisory {
            meeting_date: m.meeting_date,
        });
    }
    if let Some(m) = section11_achievements::Entity::find()
        .filter(section11_achievements::Column::ReportId.eq(report_id))
        .one(conn)
        .await?
    {
        set.achievements = Some(Section11Achievements {
            innovative_work: m.innovative_work,
            special_events: m.special_events,
            hindi_medium_works: m.hindi_medium_works,
        });
    }

    Ok(set)
}

macro_rules! upsert_section {
    ($conn:expr, $report_id:expr, $src:expr, $entity:ident, { $($field:ident),+ $(,)? }) => {
        if let Some(section) = $src {
            let existing = $entity::Entity::find()
                .filter($entity::Column::ReportId.eq($report_id))
                .one($conn)
                .await?;
            match existing {
                Some(model) => {
                    let mut active: $entity::ActiveModel = model.into();
                    $(active.$field = Set(section.$field.clone());)+
                    active.update($conn).await?;
                }
                None => {
                    let mut active = $entity::ActiveModel {
                        report_id: Set($report_id),
                        ..Default::default()
                    };
                    $(active.$field = Set(section.$field.clone());)+
                    active.insert($conn).await?;
                }
            }
        }
    };
}

async fn save_sections<C: ConnectionTrait>(
    conn: &C,
    report_id: i64,
    sections: &SectionSet,
) -> anyhow::Result<()> {
    upsert_section!(conn, report_id, &sections.files, section1_files, {
        total_files,
        hindi_files,
    });
    upsert_section!(conn, report_id, &sections.meetings, section2_meetings, {
        meetings_count,
        hindi_minutes,
        total_papers,
        hindi_papers,
    });
    upsert_section!(
        conn,
        report_id,
        &sections.official_languages,
        section3_official_languages,
        {
            total_documents,
            bilingual_documents,
            english_only_documents,
            hindi_only_documents,
        }
    );
    upsert_section!(
        conn,
        report_id,
        &sections.hindi_letters,
        section4_hindi_letters,
        {
            total_letters,
            no_reply_letters,
            replied_hindi_letters,
            replied_english_letters,
        }
    );
    upsert_section!(
        conn,
        report_id,
        &sections.english_replied_hindi,
        section5_english_replied_hindi,
        {
            region_a_english_letters,
            region_a_replied_hindi,
            region_a_replied_english,
            region_a_no_reply,
        }
    );
    upsert_section!(
        conn,
        report_id,
        &sections.issued_letters,
        section6_issued_letters,
        {
            region_a_hindi_bilingual,
            region_a_english_only,
            region_a_total,
            region_b_hindi_bilingual,
            region_b_english_only,
            region_b_total,
            region_c_hindi_bilingual,
            region_c_english_only,
            region_c_total,
        }
    );
    upsert_section!(conn, report_id, &sections.notings, section7_notings, {
        hindi_pages,
        english_pages,
        total_pages,
        eoffice_notings,
    });
    upsert_section!(conn, report_id, &sections.workshops, section8_workshops, {
        full_day_workshops,
        officers_trained,
        employees_trained,
    });
    upsert_section!(
        conn,
        report_id,
        &sections.implementation_committee,
        section9_implementation_committee,
        {
            meeting_date,
            sub_committees_count,
            meetings_organized,
            agenda_hindi,
        }
    );
    upsert_section!(
        conn,
        report_id,
        &sections.hindi_advisory,
        section10_hindi_advisory,
        { meeting_date }
    );
    upsert_section!(
        conn,
        report_id,
        &sections.achievements,
        section11_achievements,
        {
            innovative_work,
            special_events,
            hindi_medium_works,
        }
    );
    Ok(())
}

async fn delete_sections<C: ConnectionTrait>(conn: &C, report_id: i64) -> anyhow::Result<()> {
    section1_files::Entity::delete_many()
        .filter(section1_files::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section2_meetings::Entity::delete_many()
        .filter(section2_meetings::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section3_official_languages::Entity::delete_many()
        .filter(section3_official_languages::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section4_hindi_letters::Entity::delete_many()
        .filter(section4_hindi_letters::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section5_english_replied_hindi::Entity::delete_many()
        .filter(section5_english_replied_hindi::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section6_issued_letters::Entity::delete_many()
        .filter(section6_issued_letters::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section7_notings::Entity::delete_many()
        .filter(section7_notings::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section8_workshops::Entity::delete_many()
        .filter(section8_workshops::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section9_implementation_committee::Entity::delete_many()
        .filter(section9_implementation_committee::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section10_hindi_advisory::Entity::delete_many()
        .filter(section10_hindi_advisory::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    section11_achievements::Entity::delete_many()
        .filter(section11_achievements::Column::ReportId.eq(report_id))
        .exec(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ReportsRepository for SeaOrmReportsRepository {
    async fn list_by_owner(&self, account_id: i64) -> anyhow::Result<Vec<Report>> {
        let models = report::Entity::find()
            .filter(report::Column::AccountId.eq(account_id))
            .order_by_desc(report::Column::Id)
            .all(&self.db)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let sections = load_sections(&self.db, model.id).await?;
            out.push(to_report(model, sections));
        }
        Ok(out)
    }

    async fn find_owned(&self, id: i64, account_id: i64) -> anyhow::Result<Option<Report>> {
        let Some(model) = report::Entity::find_by_id(id)
            .filter(report::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let sections = load_sections(&self.db, model.id).await?;
        Ok(Some(to_report(model, sections)))
    }

    async fn create(
        &self,
        account_id: i64,
        header: ReportHeader,
        sections: SectionSet,
    ) -> anyhow::Result<Report> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let model = report::ActiveModel {
            account_id: Set(account_id),
            office_name: Set(header.office_name),
            office_code: Set(header.office_code),
            region: Set(header.region),
            quarter: Set(header.quarter),
            year: Set(header.year),
            submitted: Set(workflow::is_submitted(&header.status)),
            status: Set(header.status),
            phone: Set(header.phone),
            email: Set(header.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        save_sections(&txn, model.id, &sections).await?;
        txn.commit().await?;
        Ok(to_report(model, sections))
    }

    async fn update(
        &self,
        id: i64,
        header: ReportHeader,
        sections: SectionSet,
    ) -> anyhow::Result<Report> {
        let txn = self.db.begin().await?;

        let model = report::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .context("report missing")?;
        let mut active: report::ActiveModel = model.into();
        active.office_name = Set(header.office_name);
        active.office_code = Set(header.office_code);
        active.region = Set(header.region);
        active.quarter = Set(header.quarter);
        active.year = Set(header.year);
        active.submitted = Set(workflow::is_submitted(&header.status));
        active.status = Set(header.status);
        active.phone = Set(header.phone);
        active.email = Set(header.email);
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        save_sections(&txn, id, &sections).await?;
        txn.commit().await?;
        Ok(to_report(model, sections))
    }

    async fn delete_owned(&self, id: i64, account_id: i64) -> anyhow::Result<u64> {
        let txn = self.db.begin().await?;

        let exists = report::Entity::find_by_id(id)
            .filter(report::Column::AccountId.eq(account_id))
            .one(&txn)
            .await?
            .is_some();
        if !exists {
            txn.commit().await?;
            return Ok(0);
        }

        delete_sections(&txn, id).await?;
        let result = report::Entity::delete_many()
            .filter(report::Column::Id.eq(id))
            .filter(report::Column::AccountId.eq(account_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }

    async fn summaries(&self) -> anyhow::Result<Vec<ReportSummary>> {
        Ok(report::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_summary)
            .collect())
    }
}
