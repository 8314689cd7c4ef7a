//! 選択中アカウント宛ての通知を購読する

use std::sync::Arc;

use super::session::Session;
use crate::domain::{AppError, ChainEvent, EventCategory};
use crate::ports::{EventSubscription, SubscriptionHandle};

/// Notifications カテゴリを購読し、session の選択アカウント宛てだけを handler に渡す
///
/// 購読時点のアカウントで固定します（後で選択を変えても追従しない）。
pub async fn watch_notifications<F>(
    subscription: &dyn EventSubscription,
    session: &Session,
    handler: F,
) -> Result<SubscriptionHandle, AppError>
where
    F: Fn(ChainEvent) + Send + Sync + 'static,
{
    let account = session.require_account()?.clone();
    tracing::debug!(%account, "watching notifications");

    let handle = subscription
        .subscribe(
            EventCategory::Notifications,
            Arc::new(move |event: ChainEvent| {
                if event.recipient() == Some(&account) {
                    handler(event);
                }
            }),
        )
        .await?;
    Ok(handle)
}
