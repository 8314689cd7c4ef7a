//! Session - ウォレット接続コンテキスト
//!
//! グローバルな「選択中アカウント」を持たず、呼び出し側が明示的に渡します。
//! connect で作成し、disconnect で消費します（切断後に使うとコンパイルエラー）。

use chrono::{DateTime, Utc};

use crate::domain::{AccountId, SessionError};
use crate::ports::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    endpoint: String,
    accounts: Vec<AccountId>,
    selected: Option<AccountId>,
    connected_at: DateTime<Utc>,
}

impl Session {
    /// 接続直後はアカウント未選択
    pub fn connect(
        endpoint: impl Into<String>,
        accounts: Vec<AccountId>,
        clock: &dyn Clock,
    ) -> Self {
        let endpoint = endpoint.into();
        tracing::info!(%endpoint, accounts = accounts.len(), "session connected");
        Self {
            endpoint,
            accounts,
            selected: None,
            connected_at: clock.now(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    pub fn selected_account(&self) -> Option<&AccountId> {
        self.selected.as_ref()
    }

    /// 署名が必要な操作の前に呼ぶ
    pub fn require_account(&self) -> Result<&AccountId, SessionError> {
        self.selected.as_ref().ok_or(SessionError::NoAccountSelected)
    }

    /// 拡張機能が公開したアカウントだけを選択できる
    pub fn select_account(&mut self, account: &AccountId) -> Result<(), SessionError> {
        if !self.accounts.contains(account) {
            return Err(SessionError::UnknownAccount(account.clone()));
        }
        tracing::debug!(%account, "account selected");
        self.selected = Some(account.clone());
        Ok(())
    }

    pub fn disconnect(self) {
        tracing::info!(endpoint = %self.endpoint, "session disconnected");
    }
}
