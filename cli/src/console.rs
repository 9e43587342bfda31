//! Admin console view model.
//!
//! DESIGN
//! ======
//! `Console` owns every piece of state the admin screens show: the session,
//! the rule list and its edit dialog, the event log and the stats report.
//! Each action runs its requests one after another and mutates the state in
//! place; nothing is shared across tasks.
//!
//! Failures never escape as `Err`. They become `Toast`s in an outbox that the
//! front end drains and prints, mirroring the notification popups of a web
//! console. The binary decides its exit status from whether any error toast
//! was produced.

use wire::{AuthRule, AuthRuleForm, EventFilter, EventRecord, LoginRequest, RuleRequest, StatsFilter, StatsRow};

use crate::api::{AdminApi, ApiError};
use crate::messages::{Locale, Message};
use crate::store::TokenStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Auth,
    Events,
    Stats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
}

pub struct Console<A, S> {
    api: A,
    store: S,
    locale: Locale,
    pub is_logged_in: bool,
    pub token: Option<String>,
    pub login_form: LoginRequest,
    pub active_tab: Tab,
    pub auth_rules: Vec<AuthRule>,
    pub show_auth_dialog: bool,
    pub dialog_title: String,
    pub auth_form: AuthRuleForm,
    pub events: Vec<EventRecord>,
    pub event_filter: EventFilter,
    pub stats_filter: StatsFilter,
    pub stats: Vec<StatsRow>,
    toasts: Vec<Toast>,
}

impl<A: AdminApi, S: TokenStore> Console<A, S> {
    /// Fresh console. The stored token is read here but the session only
    /// counts as logged in after [`Console::mount`].
    pub fn new(api: A, store: S, locale: Locale) -> Self {
        let token = store.load();
        Self {
            api,
            store,
            locale,
            is_logged_in: false,
            token,
            login_form: LoginRequest::default(),
            active_tab: Tab::Auth,
            auth_rules: Vec::new(),
            show_auth_dialog: false,
            dialog_title: Message::AddRuleTitle.text(locale).to_owned(),
            auth_form: AuthRuleForm::default(),
            events: Vec::new(),
            event_filter: EventFilter::default(),
            stats_filter: StatsFilter::default(),
            stats: Vec::new(),
            toasts: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // =========================================================================
    // TOASTS
    // =========================================================================

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.toasts.iter().any(|t| t.level == ToastLevel::Error)
    }

    fn success(&mut self, message: Message) {
        self.toasts.push(Toast { level: ToastLevel::Success, text: message.text(self.locale).to_owned() });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.toasts.push(Toast { level: ToastLevel::Error, text: text.into() });
    }

    fn fail(&mut self, message: Message, err: &ApiError) {
        tracing::debug!(error = %err, ?message, "console action failed");
        self.error(message.text(self.locale));
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Restore a stored session and load the rule list.
    pub async fn mount(&mut self) {
        if self.restore_session() {
            self.load_auth_rules().await;
        }
    }

    /// Mark the session logged in when a token is held, without any request.
    pub fn restore_session(&mut self) -> bool {
        self.is_logged_in = self.token.is_some();
        self.is_logged_in
    }

    pub async fn handle_login(&mut self) {
        match self.api.login(&self.login_form).await {
            Ok(response) => {
                if let Err(e) = self.store.save(&response.token) {
                    tracing::warn!(error = %e, "session token not persisted");
                    self.error(Message::SessionStoreFailed.text(self.locale));
                }
                self.token = Some(response.token);
                self.is_logged_in = true;
                self.load_auth_rules().await;
            }
            Err(err) if err.is_transport() => self.fail(Message::LoginRequestFailed, &err),
            Err(err) => {
                let text = err.detail().unwrap_or(Message::LoginFailed.text(self.locale)).to_owned();
                self.error(text);
            }
        }
    }

    pub fn handle_logout(&mut self) {
        self.is_logged_in = false;
        self.token = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "stored session not cleared");
            self.error(Message::SessionStoreFailed.text(self.locale));
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    // =========================================================================
    // AUTHORIZATION RULES
    // =========================================================================

    pub async fn load_auth_rules(&mut self) {
        match self.api.list_rules(self.token.as_deref()).await {
            Ok(rules) => self.auth_rules = rules,
            Err(err) => self.fail(Message::LoadRulesFailed, &err),
        }
    }

    pub fn show_add_auth_dialog(&mut self) {
        self.auth_form = AuthRuleForm::default();
        self.dialog_title = Message::AddRuleTitle.text(self.locale).to_owned();
        self.show_auth_dialog = true;
    }

    pub fn edit_auth(&mut self, rule: &AuthRule) {
        self.auth_form = AuthRuleForm::from(rule);
        self.dialog_title = Message::EditRuleTitle.text(self.locale).to_owned();
        self.show_auth_dialog = true;
    }

    /// Create or update depending on whether the form carries an id.
    pub async fn save_auth(&mut self) {
        let token = self.token.as_deref();
        let result = match self.auth_form.clone().into_request() {
            RuleRequest::Create(rule) => self.api.create_rule(token, &rule).await,
            RuleRequest::Update(rule) => self.api.update_rule(token, &rule).await,
        };
        match result {
            Ok(_) => {
                self.success(Message::Saved);
                self.show_auth_dialog = false;
                self.load_auth_rules().await;
            }
            Err(err) => self.fail(Message::SaveFailed, &err),
        }
    }

    pub async fn delete_auth(&mut self, id: i64) {
        match self.api.delete_rule(self.token.as_deref(), id).await {
            Ok(()) => {
                self.success(Message::Deleted);
                self.load_auth_rules().await;
            }
            Err(err) => self.fail(Message::DeleteFailed, &err),
        }
    }

    // =========================================================================
    // EVENTS & STATS
    // =========================================================================

    pub async fn load_events(&mut self) {
        let filter = self.event_filter.clone().normalized();
        match self.api.list_events(self.token.as_deref(), &filter).await {
            Ok(events) => self.events = events,
            Err(err) => self.fail(Message::LoadEventsFailed, &err),
        }
    }

    /// The date range is only sent when both ends are set.
    pub async fn generate_stats(&mut self) {
        let filter = match self.stats_filter.clone().normalized() {
            complete @ StatsFilter { start_date: Some(_), end_date: Some(_) } => complete,
            _ => StatsFilter::default(),
        };
        match self.api.stats(self.token.as_deref(), &filter).await {
            Ok(stats) => self.stats = stats,
            Err(err) => self.fail(Message::StatsFailed, &err),
        }
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
