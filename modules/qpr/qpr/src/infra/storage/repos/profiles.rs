use anyhow::Context as _;
use async_trait::async_trait;
use chrono::Utc;
use qpr_sdk::Role;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};

use crate::domain::model::{HodRename, NewAccountRecord, Profile};
use crate::domain::repos::ProfilesRepository;
use crate::infra::storage::entities::{account, profile};

pub struct SeaOrmProfilesRepository {
    db: DatabaseConnection,
}

impl SeaOrmProfilesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(m: profile::Model) -> anyhow::Result<Profile> {
    let role = Role::parse(&m.role)
        .with_context(|| format!("unknown role '{}' on profile {}", m.role, m.id))?;
    Ok(Profile {
        id: m.id,
        account_id: m.account_id,
        employee_code: m.employee_code,
        role,
        hod_group: m.hod_group,
        name: m.name,
        email: m.email,
        office_name: m.office_name,
        office_code: m.office_code,
        finalized: m.finalized,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

#[async_trait]
impl ProfilesRepository for SeaOrmProfilesRepository {
    async fn create_account(&self, new: NewAccountRecord) -> anyhow::Result<Profile> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let account = account::ActiveModel {
            employee_code: Set(new.employee_code.clone()),
            password_hash: Set(new.password_hash),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let created = profile::ActiveModel {
            account_id: Set(account.id),
            employee_code: Set(new.employee_code),
            role: Set(new.role.as_str().to_owned()),
            hod_group: Set(new.hod_group),
            name: Set(new.name),
            email: Set(new.email),
            office_name: Set(None),
            office_code: Set(None),
            finalized: Set(new.finalized),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        to_domain(created)
    }

    async fn find_by_employee_code(&self, employee_code: &str) -> anyhow::Result<Option<Profile>> {
        profile::Entity::find()
            .filter(profile::Column::EmployeeCode.eq(employee_code))
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_account(&self, account_id: i64) -> anyhow::Result<Option<Profile>> {
        profile::Entity::find()
            .filter(profile::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn password_hash(&self, account_id: i64) -> anyhow::Result<Option<String>> {
        Ok(account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .map(|m| m.password_hash))
    }

    async fn set_password_hash(&self, account_id: i64, hash: &str) -> anyhow::Result<()> {
        let model = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .context("account missing")?;
        let mut active: account::ActiveModel = model.into();
        active.password_hash = Set(hash.to_owned());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn list_by_role(&self, role: Role) -> anyhow::Result<Vec<Profile>> {
        profile::Entity::find()
            .filter(profile::Column::Role.eq(role.as_str()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn update_details(
        &self,
        account_id: i64,
        name: &str,
        email: &str,
        hod_group: &str,
    ) -> anyhow::Result<Profile> {
        let model = profile::Entity::find()
            .filter(profile::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await?
            .context("profile missing")?;
        let mut active: profile::ActiveModel = model.into();
        active.name = Set(Some(name.to_owned()));
        active.email = Set(Some(email.to_owned()));
        active.hod_group = Set(Some(hod_group.to_owned()));
        active.finalized = Set(true);
        active.updated_at = Set(Utc::now());
        to_domain(active.update(&self.db).await?)
    }

    async fn update_office(
        &self,
        account_id: i64,
        office_name: &str,
        office_code: &str,
    ) -> anyhow::Result<Profile> {
        let model = profile::Entity::find()
            .filter(profile::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await?
            .context("profile missing")?;
        let mut active: profile::ActiveModel = model.into();
        active.office_name = Set(Some(office_name.to_owned()));
        active.office_code = Set(Some(office_code.to_owned()));
        active.updated_at = Set(Utc::now());
        to_domain(active.update(&self.db).await?)
    }

    async fn rename_hod(&self, hod_account_id: i64, rename: &HodRename) -> anyhow::Result<u64> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let hod = profile::Entity::find()
            .filter(profile::Column::AccountId.eq(hod_account_id))
            .one(&txn)
            .await?
            .context("HOD profile missing")?;
        let mut active: profile::ActiveModel = hod.into();
        active.name = Set(Some(rename.new_name.clone()));
        active.hod_group = Set(Some(rename.new_name.clone()));
        active.employee_code = Set(rename.new_employee_code.clone());
        active.updated_at = Set(now);
        active.update(&txn).await?;

        let account = account::Entity::find_by_id(hod_account_id)
            .one(&txn)
            .await?
            .context("HOD account missing")?;
        let mut active: account::ActiveModel = account.into();
        active.employee_code = Set(rename.new_employee_code.clone());
        active.update(&txn).await?;

        // The group label is a denormalized string join; the cascade matches
        // it case-insensitively.
        let old_norm = norm(&rename.old_name);
        let mut cascaded = 0u64;
        let members = profile::Entity::find()
            .filter(profile::Column::Role.eq(Role::User.as_str()))
            .all(&txn)
            .await?;
        for member in members {
            if member.hod_group.as_deref().map(norm) == Some(old_norm.clone()) {
                let mut active: profile::ActiveModel = member.into();
                active.hod_group = Set(Some(rename.new_name.clone()));
                active.updated_at = Set(now);
                active.update(&txn).await?;
                cascaded += 1;
            }
        }

        txn.commit().await?;
        Ok(cascaded)
    }
}
