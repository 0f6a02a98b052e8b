//! WHERE-clause builders for post queries.

use postboard_core::domain::PostFilter;
use sea_orm::{ColumnTrait, Condition};

use super::entity::post;

/// Compose `filter` into a single conjunctive condition.
///
/// Always constrains the owner; the likes threshold and published flag are
/// only added when present.
pub fn post_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all().add(post::Column::UserId.eq(filter.user_id));

    if let Some(min_likes) = filter.min_likes {
        condition = condition.add(post::Column::LikesCount.gte(min_likes));
    }

    if let Some(published) = filter.published {
        condition = condition.add(post::Column::Published.eq(published));
    }

    condition
}
