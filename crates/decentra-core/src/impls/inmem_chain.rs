//! InMemoryChain - 開発・テスト用のチェーン代替実装
//!
//! 本物のノードの代わりに、すべてのポートをメモリ上で実装します。
//! ランタイムの主要な検証（権限・状態遷移・投票・評価）と評判の集計を再現しています。
//!
//! # 学習ポイント
//! - tokio::sync::RwLock で状態を共有（読み取りは並行、書き込みは排他）
//! - tokio::sync::broadcast でイベントバス（購読者ごとに受信側を持つ）
//! - 書き込みロックを保持したままイベントを送らない（ロック外で publish）
//! - コマンドは「検証・計画 → 失敗しうる確保 → 失敗しない反映」の順で進める。
//!   エラーで返るときは状態に何も残らない

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};

use crate::domain::{
    AccountId, ChainError, ChainEvent, EventCategory, Notification, NotificationId,
    NotificationKind, ReputationRules, ScoreChange, Task, TaskId, TaskStatus, UserReputation,
};
use crate::ports::{
    Clock, EventHandler, EventSubscription, SubscriptionHandle, SystemClock, TaskCommands,
    TaskDraft, TaskSource,
};

/// 投票がこの数に達すると検証を確定する
pub const VERIFICATION_QUORUM: usize = 3;

const EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub task_id: TaskId,
    /// 評価時点の担当者（評判の加点先）
    pub assignee: Option<AccountId>,
    pub evaluator: AccountId,
    pub rating: u8,
    pub comment: String,
    pub evaluated_at: DateTime<Utc>,
}

/// 保存前の通知
struct Notice {
    recipient: AccountId,
    kind: NotificationKind,
    task_id: TaskId,
    message: String,
}

/// 反映前の評判更新
struct ReputationUpdate {
    account: AccountId,
    task_id: TaskId,
    reputation: UserReputation,
    change: ScoreChange,
}

impl ReputationUpdate {
    fn level_up_notice(&self) -> Option<Notice> {
        self.change.leveled_up().then(|| Notice {
            recipient: self.account.clone(),
            kind: NotificationKind::ReputationLevelUp,
            task_id: self.task_id,
            message: format!("Reputation level up: {}", self.change.new_level),
        })
    }

    fn events(&self) -> Vec<ChainEvent> {
        let mut events = vec![ChainEvent::ReputationChanged {
            account: self.account.clone(),
            task_id: self.task_id,
            old_score: self.change.old_score,
            new_score: self.change.new_score,
        }];
        if self.change.leveled_up() {
            events.push(ChainEvent::ReputationLevelUp {
                account: self.account.clone(),
                old_level: self.change.old_level,
                new_level: self.change.new_level,
            });
        }
        events
    }
}

#[derive(Debug, Default)]
struct ChainState {
    tasks: BTreeMap<TaskId, Task>,
    next_task_id: u32,
    votes: BTreeMap<TaskId, BTreeMap<AccountId, bool>>,
    evaluations: Vec<Evaluation>,
    notifications: BTreeMap<NotificationId, Notification>,
    next_notification_id: u32,
    achievers: BTreeSet<AccountId>,
    reputations: BTreeMap<AccountId, UserReputation>,
    rules: ReputationRules,
    offline: bool,
}

impl ChainState {
    fn ensure_online(&self) -> Result<(), ChainError> {
        if self.offline {
            Err(ChainError::Disconnected("in-memory chain is offline".into()))
        } else {
            Ok(())
        }
    }

    fn task(&self, task_id: TaskId) -> Result<&Task, ChainError> {
        self.tasks
            .get(&task_id)
            .ok_or(ChainError::TaskNotFound(task_id))
    }

    fn allocate_task_id(&mut self) -> Result<TaskId, ChainError> {
        let next = self
            .next_task_id
            .checked_add(1)
            .ok_or_else(|| ChainError::Rejected("task id space exhausted".into()))?;
        let id = TaskId::new(next).map_err(|err| ChainError::Rejected(err.to_string()))?;
        self.next_task_id = next;
        Ok(id)
    }

    fn reputation(&self, account: &AccountId) -> UserReputation {
        self.reputations.get(account).cloned().unwrap_or_default()
    }

    /// 通知をまとめて保存し、発行すべきイベントを返す
    ///
    /// id はすべて先に確保するので、Err のときは何も保存されていません。
    fn deliver(
        &mut self,
        notices: Vec<Notice>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChainEvent>, ChainError> {
        if notices.is_empty() {
            return Ok(Vec::new());
        }
        let exhausted = || ChainError::Rejected("notification id space exhausted".into());
        let count = u32::try_from(notices.len()).map_err(|_| exhausted())?;
        let last = self.next_notification_id.checked_add(count).ok_or_else(exhausted)?;
        let ids = (self.next_notification_id + 1..=last)
            .map(NotificationId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ChainError::Rejected(err.to_string()))?;
        self.next_notification_id = last;

        let mut events = Vec::with_capacity(notices.len() * 2);
        for (id, notice) in ids.into_iter().zip(notices) {
            events.push(ChainEvent::NotificationCreated {
                recipient: notice.recipient.clone(),
                notification_id: id,
            });
            events.push(ChainEvent::RealtimeNotificationPushed {
                recipient: notice.recipient.clone(),
                kind: notice.kind,
            });
            self.notifications.insert(
                id,
                Notification {
                    id,
                    recipient: notice.recipient,
                    kind: notice.kind,
                    task_id: Some(notice.task_id),
                    message: notice.message,
                    read: false,
                    created_at: now,
                },
            );
        }
        Ok(events)
    }

    fn commit_reputation(&mut self, update: ReputationUpdate) -> Vec<ChainEvent> {
        let events = update.events();
        self.reputations.insert(update.account, update.reputation);
        events
    }

    /// 状態を変更し、関係者への通知・実績・評判のイベントを返す
    ///
    /// 完了で担当者に加点、キャンセルで担当者から減点します。
    fn apply_status(
        &mut self,
        actor: &AccountId,
        task_id: TaskId,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChainEvent>, ChainError> {
        let task = self.task(task_id)?;
        let old_status = task.status;
        let creator = task.creator.clone();
        let assignee = task.assignee.clone();
        let title = task.title.clone();
        let difficulty = task.difficulty;

        let kind = if status == TaskStatus::PendingVerification {
            NotificationKind::VerificationRequested
        } else {
            NotificationKind::TaskStatusChanged
        };
        let parties = std::iter::once(creator).chain(assignee.clone());
        let mut notices: Vec<Notice> = parties
            .filter(|party| party != actor)
            .map(|recipient| Notice {
                recipient,
                kind,
                task_id,
                message: format!("\"{title}\" moved from {old_status} to {status}"),
            })
            .collect();

        let unlocked = assignee
            .as_ref()
            .filter(|a| status == TaskStatus::Completed && !self.achievers.contains(*a))
            .cloned();
        if let Some(account) = &unlocked {
            notices.push(Notice {
                recipient: account.clone(),
                kind: NotificationKind::AchievementUnlocked,
                task_id,
                message: "Achievement unlocked: first task completed".into(),
            });
        }

        let reputation = assignee.and_then(|account| {
            let mut reputation = self.reputation(&account);
            let change = match status {
                TaskStatus::Completed => reputation.record_completion(&self.rules, difficulty, now),
                TaskStatus::Cancelled => reputation.record_cancellation(&self.rules, now),
                _ => return None,
            };
            Some(ReputationUpdate {
                account,
                task_id,
                reputation,
                change,
            })
        });
        notices.extend(reputation.as_ref().and_then(ReputationUpdate::level_up_notice));

        let notified = self.deliver(notices, now)?;

        if let Some(task) = self.tasks.get_mut(&task_id) {
            task.status = status;
            task.updated_at = now.max(task.created_at);
        }
        let mut events = vec![ChainEvent::TaskStatusChanged {
            task_id,
            old_status,
            new_status: status,
        }];
        events.extend(notified);
        if let Some(account) = unlocked {
            self.achievers.insert(account.clone());
            events.push(ChainEvent::AchievementUnlocked {
                account,
                achievement: "first_task_completed".into(),
            });
        }
        if let Some(update) = reputation {
            events.extend(self.commit_reputation(update));
        }
        Ok(events)
    }
}

/// InMemoryChain はすべてのポートを実装するチェーンの代替
///
/// # 使用例
/// ```ignore
/// let chain = InMemoryChain::from_snapshot(tasks, Arc::new(SystemClock));
/// let page = search(&chain.list_tasks().await?, &SearchRequest::default())?;
/// ```
pub struct InMemoryChain {
    state: RwLock<ChainState>,
    events: broadcast::Sender<ChainEvent>,
    clock: Arc<dyn Clock>,
}

impl InMemoryChain {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_snapshot(Vec::new(), clock)
    }

    /// 既存のスナップショットから開始（id の採番は最大 id の次から）
    pub fn from_snapshot(tasks: impl IntoIterator<Item = Task>, clock: Arc<dyn Clock>) -> Self {
        let mut state = ChainState::default();
        for task in tasks {
            state.next_task_id = state.next_task_id.max(task.id.get());
            state.tasks.insert(task.id, task);
        }
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            state: RwLock::new(state),
            events,
            clock,
        }
    }

    pub fn with_reputation_rules(mut self, rules: ReputationRules) -> Self {
        self.state.get_mut().rules = rules;
        self
    }

    /// 接続断をシミュレート（すべての呼び出しが Disconnected になる）
    pub async fn set_offline(&self, offline: bool) {
        self.state.write().await.offline = offline;
    }

    pub async fn evaluations(&self, task_id: TaskId) -> Vec<Evaluation> {
        let state = self.state.read().await;
        state
            .evaluations
            .iter()
            .filter(|e| e.task_id == task_id)
            .cloned()
            .collect()
    }

    /// 評価の平均（評価がなければ 0.0）
    pub async fn average_rating(&self, task_id: TaskId) -> f64 {
        let state = self.state.read().await;
        let ratings: Vec<f64> = state
            .evaluations
            .iter()
            .filter(|e| e.task_id == task_id)
            .map(|e| f64::from(e.rating))
            .collect();
        if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        }
    }

    /// スコアの高い順（同点はアカウント名順）に最大 limit 件
    pub async fn leaderboard(&self, limit: usize) -> Vec<(AccountId, UserReputation)> {
        let state = self.state.read().await;
        let mut board: Vec<(AccountId, UserReputation)> = state
            .reputations
            .iter()
            .map(|(account, rep)| (account.clone(), rep.clone()))
            .collect();
        board.sort_by(|a, b| {
            b.1.total_score
                .cmp(&a.1.total_score)
                .then_with(|| a.0.cmp(&b.0))
        });
        board.truncate(limit);
        board
    }

    fn publish(&self, events: Vec<ChainEvent>) {
        for event in events {
            tracing::debug!(category = ?event.category(), ?event, "chain event");
            // 購読者がいないときの送信失敗は無視してよい
            let _ = self.events.send(event);
        }
    }
}

impl Default for InMemoryChain {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait::async_trait]
impl TaskSource for InMemoryChain {
    async fn list_tasks(&self) -> Result<Vec<Task>, ChainError> {
        let state = self.state.read().await;
        state.ensure_online()?;
        Ok(state.tasks.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl TaskCommands for InMemoryChain {
    async fn create_task(
        &self,
        signer: &AccountId,
        draft: TaskDraft,
    ) -> Result<TaskId, ChainError> {
        if draft.title.trim().is_empty() {
            return Err(ChainError::Rejected("title must not be empty".into()));
        }

        let mut state = self.state.write().await;
        state.ensure_online()?;
        let id = state.allocate_task_id()?;
        let mut task = Task::new(id, draft.title, signer.clone(), self.clock.now())
            .with_description(draft.description)
            .with_priority(draft.priority)
            .with_difficulty(draft.difficulty)
            .with_reward(draft.reward);
        task.deadline = draft.deadline;

        let event = ChainEvent::TaskCreated {
            task_id: id,
            creator: signer.clone(),
            title: task.title.clone(),
        };
        state.tasks.insert(id, task);
        drop(state);

        self.publish(vec![event]);
        Ok(id)
    }

    async fn assign_task(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        assignee: AccountId,
    ) -> Result<(), ChainError> {
        let mut state = self.state.write().await;
        state.ensure_online()?;
        let now = self.clock.now();
        let task = state.task(task_id)?;

        if task.creator != *signer {
            return Err(ChainError::NotAuthorized {
                account: signer.clone(),
                action: "assign this task",
            });
        }
        if task.creator == assignee {
            return Err(ChainError::Rejected(
                "cannot assign a task to its creator".into(),
            ));
        }
        if task.is_assigned() {
            return Err(ChainError::Rejected(format!("{task_id} is already assigned")));
        }

        let notice = Notice {
            recipient: assignee.clone(),
            kind: NotificationKind::TaskAssigned,
            task_id,
            message: format!("You were assigned \"{}\"", task.title),
        };
        let notified = state.deliver(vec![notice], now)?;

        if let Some(task) = state.tasks.get_mut(&task_id) {
            task.assignee = Some(assignee.clone());
            task.updated_at = now.max(task.created_at);
        }
        drop(state);

        let mut events = vec![ChainEvent::TaskAssigned { task_id, assignee }];
        events.extend(notified);
        self.publish(events);
        Ok(())
    }

    async fn change_task_status(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<(), ChainError> {
        let mut state = self.state.write().await;
        state.ensure_online()?;
        let task = state.task(task_id)?;

        if task.creator != *signer && task.assignee.as_ref() != Some(signer) {
            return Err(ChainError::NotAuthorized {
                account: signer.clone(),
                action: "change the status of this task",
            });
        }
        if !task.status.can_transition_to(status) {
            return Err(ChainError::InvalidTransition {
                from: task.status,
                to: status,
            });
        }

        let events = state.apply_status(signer, task_id, status, self.clock.now())?;
        if status == TaskStatus::PendingVerification {
            state.votes.remove(&task_id);
        }
        drop(state);

        self.publish(events);
        Ok(())
    }

    /// 当事者（作成者・担当者）以外が投票し、定足数で確定する
    ///
    /// 賛成が過半数なら Completed、そうでなければ InProgress に戻します。
    async fn submit_verification_vote(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        approve: bool,
    ) -> Result<(), ChainError> {
        let mut state = self.state.write().await;
        state.ensure_online()?;
        let task = state.task(task_id)?;

        if task.status != TaskStatus::PendingVerification {
            return Err(ChainError::Rejected(format!(
                "{task_id} is not awaiting verification"
            )));
        }
        if task.creator == *signer || task.assignee.as_ref() == Some(signer) {
            return Err(ChainError::NotAuthorized {
                account: signer.clone(),
                action: "vote on their own task",
            });
        }

        let mut ballots = state.votes.get(&task_id).cloned().unwrap_or_default();
        if ballots.insert(signer.clone(), approve).is_some() {
            return Err(ChainError::AlreadyVoted {
                task_id,
                account: signer.clone(),
            });
        }

        let mut events = vec![ChainEvent::VerificationVoteSubmitted {
            task_id,
            voter: signer.clone(),
            approve,
        }];
        if ballots.len() >= VERIFICATION_QUORUM {
            let approvals = ballots.values().filter(|&&vote| vote).count();
            let outcome = if approvals * 2 > ballots.len() {
                TaskStatus::Completed
            } else {
                TaskStatus::InProgress
            };
            events.extend(state.apply_status(signer, task_id, outcome, self.clock.now())?);
            state.votes.remove(&task_id);
        } else {
            state.votes.insert(task_id, ballots);
        }
        drop(state);

        self.publish(events);
        Ok(())
    }

    /// 評価は担当者の評判に加点されます
    async fn evaluate_task(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        rating: u8,
        comment: String,
    ) -> Result<(), ChainError> {
        if !(1..=5).contains(&rating) {
            return Err(ChainError::InvalidRating(rating));
        }

        let mut state = self.state.write().await;
        state.ensure_online()?;
        let now = self.clock.now();
        let task = state.task(task_id)?;

        if task.status != TaskStatus::Completed {
            return Err(ChainError::Rejected(format!("{task_id} is not completed")));
        }
        if task.assignee.as_ref() == Some(signer) {
            return Err(ChainError::NotAuthorized {
                account: signer.clone(),
                action: "evaluate their own work",
            });
        }
        if state
            .evaluations
            .iter()
            .any(|e| e.task_id == task_id && e.evaluator == *signer)
        {
            return Err(ChainError::Rejected(format!(
                "{signer} already evaluated {task_id}"
            )));
        }

        let assignee = task.assignee.clone();
        let reputation = assignee.clone().map(|account| {
            let mut reputation = state.reputation(&account);
            let change = reputation.record_rating(&state.rules, rating, now);
            ReputationUpdate {
                account,
                task_id,
                reputation,
                change,
            }
        });
        let notices = reputation
            .as_ref()
            .and_then(ReputationUpdate::level_up_notice)
            .into_iter()
            .collect();
        let notified = state.deliver(notices, now)?;

        state.evaluations.push(Evaluation {
            task_id,
            assignee,
            evaluator: signer.clone(),
            rating,
            comment,
            evaluated_at: now,
        });
        let mut events = vec![ChainEvent::TaskEvaluated {
            task_id,
            evaluator: signer.clone(),
            rating,
        }];
        if let Some(update) = reputation {
            events.extend(state.commit_reputation(update));
        }
        events.extend(notified);
        drop(state);

        self.publish(events);
        Ok(())
    }

    async fn mark_notification_read(
        &self,
        signer: &AccountId,
        notification_id: NotificationId,
    ) -> Result<(), ChainError> {
        let mut state = self.state.write().await;
        state.ensure_online()?;
        let notification = state
            .notifications
            .get_mut(&notification_id)
            .ok_or(ChainError::NotificationNotFound(notification_id))?;

        if notification.recipient != *signer {
            return Err(ChainError::NotAuthorized {
                account: signer.clone(),
                action: "read this notification",
            });
        }
        notification.read = true;
        Ok(())
    }

    async fn notifications_for(
        &self,
        account: &AccountId,
    ) -> Result<Vec<Notification>, ChainError> {
        let state = self.state.read().await;
        state.ensure_online()?;
        Ok(state
            .notifications
            .values()
            .rev()
            .filter(|n| n.recipient == *account)
            .cloned()
            .collect())
    }

    async fn reputation_of(&self, account: &AccountId) -> Result<UserReputation, ChainError> {
        let state = self.state.read().await;
        state.ensure_online()?;
        Ok(state.reputation(account))
    }
}

#[async_trait::async_trait]
impl EventSubscription for InMemoryChain {
    async fn subscribe(
        &self,
        category: EventCategory,
        handler: EventHandler,
    ) -> Result<SubscriptionHandle, ChainError> {
        self.state.read().await.ensure_online()?;

        let mut rx = self.events.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.category() == category => handler(event),
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(?category, skipped, "subscriber lagged behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Ok(SubscriptionHandle::new(category, task))
    }
}
