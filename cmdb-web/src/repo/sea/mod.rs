//! repos

mod asset;
mod component;
mod event_log;
mod pending;
mod sub_asset;

pub use asset::*;
pub use component::*;
pub use event_log::*;
pub use pending::*;
pub use sub_asset::*;

use sea_orm::sea_query::ConditionExpression;
use sea_orm::{Condition, DbConn, EntityTrait, PaginatorTrait, PrimaryKeyTrait, QueryFilter};

/// 空串一律落库为 NULL
pub(crate) fn opt(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub(crate) fn flat(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

pub struct SeaRepo;

impl SeaRepo {
    pub async fn page_with_default<E>(
        db: &DbConn,
        pg: (u64, u64),
        search: Option<Vec<ConditionExpression>>,
    ) -> anyhow::Result<(u64, Vec<E::Model>)>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let (page, size) = pg;
        let mut cond = Condition::all();
        if let Some(exprs) = search {
            for expr in exprs {
                cond = cond.add(expr);
            }
        }
        let paginator = E::find().filter(cond).paginate(db, size);
        let total = paginator.num_items().await?;
        let list = paginator.fetch_page(page - 1).await?;
        Ok((total, list))
    }

    pub async fn delete_by_id<E>(db: &DbConn, id: &str) -> anyhow::Result<u64>
    where
        E: EntityTrait,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
    {
        let res = E::delete_by_id(id.to_string()).exec(db).await?;
        Ok(res.rows_affected)
    }
}
