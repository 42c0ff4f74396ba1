//! Notification records
//!
//! A notification is created unread, may be marked read, and is deleted
//! either explicitly or by eviction once the list grows past its cap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::icon::Icon;
use super::ids::NotificationId;

/// Urgency of a notification (also used as savings goal priority)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// How long an in-app banner for this priority stays visible, in seconds
    pub fn display_secs(&self) -> u64 {
        match self {
            Self::High => 5,
            Self::Medium => 4,
            Self::Low => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BudgetWarning,
    GoalReminder,
    PaymentDue,
    Achievement,
    Tip,
    ExpenseAlert,
}

impl NotificationKind {
    pub fn icon(&self) -> Icon {
        match self {
            Self::BudgetWarning => Icon::Warning,
            Self::GoalReminder => Icon::Target,
            Self::PaymentDue => Icon::CreditCard,
            Self::Achievement => Icon::Trophy,
            Self::Tip => Icon::Lightbulb,
            Self::ExpenseAlert => Icon::TrendUp,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BudgetWarning => "budget_warning",
            Self::GoalReminder => "goal_reminder",
            Self::PaymentDue => "payment_due",
            Self::Achievement => "achievement",
            Self::Tip => "tip",
            Self::ExpenseAlert => "expense_alert",
        };
        write!(f, "{}", name)
    }
}

/// A stored notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    /// The budget, goal or payment this notification refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Uuid>,
}

impl NotificationItem {
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

/// Content for a notification about to be added
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub action_text: Option<String>,
    pub subject: Option<Uuid>,
}

impl NewNotification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            priority,
            action_text: None,
            subject: None,
        }
    }

    pub fn with_action(mut self, action_text: impl Into<String>) -> Self {
        self.action_text = Some(action_text.into());
        self
    }

    pub fn with_subject(mut self, subject: Uuid) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Stamp the content into a stored, unread notification
    pub fn into_item(self, timestamp: DateTime<Utc>) -> NotificationItem {
        NotificationItem {
            id: NotificationId::new(),
            kind: self.kind,
            title: self.title,
            message: self.message,
            priority: self.priority,
            timestamp,
            is_read: false,
            action_text: self.action_text,
            subject: self.subject,
        }
    }
}
