use anyhow::Context as _;
use async_trait::async_trait;
use chrono::Utc;
use qpr_sdk::{RequestKind, RequestStatus};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::model::EditRequest;
use crate::domain::repos::RequestsRepository;
use crate::infra::storage::entities::request;

pub struct SeaOrmRequestsRepository {
    db: DatabaseConnection,
}

impl SeaOrmRequestsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(m: request::Model) -> anyhow::Result<EditRequest> {
    let kind = RequestKind::parse(&m.kind)
        .with_context(|| format!("unknown request kind '{}' on request {}", m.kind, m.id))?;
    let status = RequestStatus::parse(&m.status)
        .with_context(|| format!("unknown request status '{}' on request {}", m.status, m.id))?;
    Ok(EditRequest {
        id: m.id,
        requester_id: m.requester_id,
        recipient_id: m.recipient_id,
        kind,
        reason: m.reason,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

/// Kinds whose grants cover `kind`: the kind itself plus `both`.
fn covering_kinds(kind: RequestKind) -> Vec<&'static str> {
    if kind == RequestKind::Both {
        vec![RequestKind::Both.as_str()]
    } else {
        vec![kind.as_str(), RequestKind::Both.as_str()]
    }
}

#[async_trait]
impl RequestsRepository for SeaOrmRequestsRepository {
    async fn create(
        &self,
        requester_id: i64,
        recipient_id: i64,
        kind: RequestKind,
        reason: &str,
    ) -> anyhow::Result<EditRequest> {
        let now = Utc::now();
        let model = request::ActiveModel {
            requester_id: Set(requester_id),
            recipient_id: Set(recipient_id),
            kind: Set(kind.as_str().to_owned()),
            reason: Set(reason.to_owned()),
            status: Set(RequestStatus::Pending.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        to_domain(model)
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<EditRequest>> {
        request::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn set_status(&self, id: i64, status: RequestStatus) -> anyhow::Result<()> {
        let model = request::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .context("request missing")?;
        let mut active: request::ActiveModel = model.into();
        active.status = Set(status.as_str().to_owned());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn pending_for_recipient(&self, recipient_id: i64) -> anyhow::Result<Vec<EditRequest>> {
        request::Entity::find()
            .filter(request::Column::RecipientId.eq(recipient_id))
            .filter(request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .order_by_desc(request::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn has_approved(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<bool> {
        let count = request::Entity::find()
            .filter(request::Column::RequesterId.eq(requester_id))
            .filter(request::Column::Status.eq(RequestStatus::Approved.as_str()))
            .filter(request::Column::Kind.is_in(covering_kinds(kind)))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn has_pending(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<bool> {
        let count = request::Entity::find()
            .filter(request::Column::RequesterId.eq(requester_id))
            .filter(request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .filter(request::Column::Kind.is_in(covering_kinds(kind)))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn delete_approved(&self, requester_id: i64, kind: RequestKind) -> anyhow::Result<u64> {
        let result = request::Entity::delete_many()
            .filter(request::Column::RequesterId.eq(requester_id))
            .filter(request::Column::Status.eq(RequestStatus::Approved.as_str()))
            .filter(request::Column::Kind.is_in(covering_kinds(kind)))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn pending_requester_ids(&self, kind: RequestKind) -> anyhow::Result<Vec<i64>> {
        let mut ids: Vec<i64> = request::Entity::find()
            .filter(request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .filter(request::Column::Kind.is_in(covering_kinds(kind)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.requester_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}
