//! The eleven section child tables, each in a strict one-to-one relation
//! with a report row (`report_id` unique, cascade delete).

macro_rules! report_relation {
    () => {
        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {
            #[sea_orm(
                belongs_to = "super::super::report::Entity",
                from = "Column::ReportId",
                to = "super::super::report::Column::Id",
                on_delete = "Cascade"
            )]
            Report,
        }

        impl ActiveModelBehavior for ActiveModel {}
    };
}

pub mod section1_files {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section1_files")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub total_files: Option<i32>,
        pub hindi_files: Option<i32>,
    }

    report_relation!();
}

pub mod section2_meetings {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section2_meetings")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub meetings_count: Option<i32>,
        pub hindi_minutes: Option<i32>,
        pub total_papers: Option<i32>,
        pub hindi_papers: Option<i32>,
    }

    report_relation!();
}

pub mod section3_official_languages {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section3_official_languages")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub total_documents: Option<i32>,
        pub bilingual_documents: Option<i32>,
        pub english_only_documents: Option<i32>,
        pub hindi_only_documents: Option<i32>,
    }

    report_relation!();
}

pub mod section4_hindi_letters {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section4_hindi_letters")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub total_letters: Option<i32>,
        pub no_reply_letters: Option<i32>,
        pub replied_hindi_letters: Option<i32>,
        pub replied_english_letters: Option<i32>,
    }

    report_relation!();
}

pub mod section5_english_replied_hindi {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section5_english_replied_hindi")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub region_a_english_letters: Option<i32>,
        pub region_a_replied_hindi: Option<i32>,
        pub region_a_replied_english: Option<i32>,
        pub region_a_no_reply: Option<i32>,
    }

    report_relation!();
}

pub mod section6_issued_letters {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section6_issued_letters")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub region_a_hindi_bilingual: Option<i32>,
        pub region_a_english_only: Option<i32>,
        pub region_a_total: Option<i32>,
        pub region_b_hindi_bilingual: Option<i32>,
        pub region_b_english_only: Option<i32>,
        pub region_b_total: Option<i32>,
        pub region_c_hindi_bilingual: Option<i32>,
        pub region_c_english_only: Option<i32>,
        pub region_c_total: Option<i32>,
    }

    report_relation!();
}

pub mod section7_notings {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section7_notings")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub hindi_pages: Option<i32>,
        pub english_pages: Option<i32>,
        pub total_pages: Option<i32>,
        pub eoffice_notings: Option<i32>,
    }

    report_relation!();
}

pub mod section8_workshops {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section8_workshops")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub full_day_workshops: Option<i32>,
        pub officers_trained: Option<i32>,
        pub employees_trained: Option<i32>,
    }

    report_relation!();
}

pub mod section9_implementation_committee {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section9_implementation_committee")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub meeting_date: Option<Date>,
        pub sub_committees_count: Option<i32>,
        pub meetings_organized: Option<i32>,
        pub agenda_hindi: Option<String>,
    }

    report_relation!();
}

pub mod section10_hindi_advisory {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section10_hindi_advisory")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        pub meeting_date: Option<Date>,
    }

    report_relation!();
}

pub mod section11_achievements {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "section11_achievements")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub report_id: i64,
        #[sea_orm(column_type = "Text", nullable)]
        pub innovative_work: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub special_events: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub hindi_medium_works: Option<String>,
    }

    report_relation!();
}
