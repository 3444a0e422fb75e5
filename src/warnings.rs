// Warning texts shown when a user opens a blurred contact,
// and the sink trait the host application implements to display them

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::warn;

use crate::config::{NoticeConfig, DEFAULT_NOTICE_DURATION_MS};
use crate::contact_detector::{ContactKind, ContactMatch};

pub const DEFAULT_TITLE: &str = "Увага: контактні дані приховано";

pub const GENERIC_MESSAGE: &str = "Повідомлення містить контактні дані. Обмін контактами поза платформою \
     порушує правила та позбавляє вас захисту угоди.";

/// Canonical message for each contact kind
pub fn default_message(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => {
            "Обмін адресами електронної пошти заборонено. Спілкуйтеся через чат платформи, \
             щоб зберегти захист угоди."
        }
        ContactKind::Phone => {
            "Обмін номерами телефонів заборонено. Домовляйтеся про деталі у чаті платформи."
        }
        ContactKind::Telegram => "Переведення спілкування в Telegram порушує правила платформи.",
        ContactKind::Instagram => "Передавати контакти в Instagram через чат заборонено.",
        ContactKind::WhatsApp => "Переведення спілкування у WhatsApp порушує правила платформи.",
        ContactKind::Skype => "Передавати контакти Skype заборонено правилами платформи.",
        ContactKind::Discord => "Запрошення та контакти Discord заборонено передавати в чаті.",
        ContactKind::LinkedIn => "Профілі LinkedIn не можна використовувати для зв'язку поза платформою.",
        ContactKind::Website => {
            "Посилання на зовнішні ресурси можуть бути спробою обійти платформу. Будьте обережні."
        }
    }
}

/// A resolved warning, ready to hand to a [`NotificationSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub title: String,
    pub message: String,
    pub duration_ms: u64,
}

impl Warning {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Display channel supplied by the host application (toast, banner, log)
pub trait NotificationSink {
    fn show(&self, title: &str, message: &str, duration: Duration);
}

/// Sink that writes warnings to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, title: &str, message: &str, duration: Duration) {
        warn!(title, duration_ms = duration.as_millis() as u64, "{}", message);
    }
}

/// A notification captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub duration: Duration,
}

/// Sink that keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    shown: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn notifications(&self) -> Vec<Notification> {
        self.shown.lock().map(|shown| shown.clone()).unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, title: &str, message: &str, duration: Duration) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(Notification {
                title: title.to_string(),
                message: message.to_string(),
                duration,
            });
        }
    }
}

/// Per-kind warning texts with a generic fallback
#[derive(Debug, Clone)]
pub struct WarningCatalog {
    title: String,
    generic_message: String,
    messages: BTreeMap<ContactKind, String>,
    duration_ms: u64,
}

impl Default for WarningCatalog {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            generic_message: GENERIC_MESSAGE.to_string(),
            messages: ContactKind::ALL
                .iter()
                .map(|kind| (*kind, default_message(*kind).to_string()))
                .collect(),
            duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}

impl WarningCatalog {
    /// Defaults with the overrides from `[notice]` applied
    ///
    /// Message keys that do not name a kind are ignored; `ScanConfig`
    /// rejects them at load time.
    pub fn from_config(notice: &NoticeConfig) -> Self {
        let mut catalog = Self::default();
        if let Some(title) = &notice.title {
            catalog.title = title.clone();
        }
        if let Some(generic) = &notice.generic_message {
            catalog.generic_message = generic.clone();
        }
        for (key, message) in &notice.messages {
            if let Ok(kind) = key.parse::<ContactKind>() {
                catalog.messages.insert(kind, message.clone());
            }
        }
        catalog.duration_ms = notice.duration_ms;
        catalog
    }

    pub fn for_kind(&self, kind: ContactKind) -> Warning {
        let message = self
            .messages
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| default_message(kind).to_string());
        self.warning(message)
    }

    pub fn generic(&self) -> Warning {
        self.warning(self.generic_message.clone())
    }

    /// Warning for a batch of matches
    ///
    /// `None` for an empty batch, the kind's own message when every match
    /// shares one kind, the generic message otherwise.
    pub fn for_matches(&self, matches: &[ContactMatch]) -> Option<Warning> {
        let first = matches.first()?.kind;
        if matches.iter().all(|m| m.kind == first) {
            Some(self.for_kind(first))
        } else {
            Some(self.generic())
        }
    }

    /// Show the batch warning, if any; returns whether something was shown
    pub fn notify(&self, matches: &[ContactMatch], sink: &dyn NotificationSink) -> bool {
        match self.for_matches(matches) {
            Some(warning) => {
                sink.show(&warning.title, &warning.message, warning.duration());
                true
            }
            None => false,
        }
    }

    fn warning(&self, message: String) -> Warning {
        Warning {
            title: self.title.clone(),
            message,
            duration_ms: self.duration_ms,
        }
    }
}
