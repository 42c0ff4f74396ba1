//! Notification list formatting

use crate::models::NotificationItem;
use crate::services::{AppConfigService, DateStyle};

/// One block per notification, newest first, unread ones marked with `•`
pub fn format_notification_list(items: &[NotificationItem], config: &AppConfigService) -> String {
    if items.is_empty() {
        return "Sin notificaciones.".to_string();
    }

    let mut output = String::new();
    for item in items {
        let marker = if item.is_read { " " } else { "•" };
        output.push_str(&format!(
            "{} {} {} [{}] {}\n",
            marker,
            item.kind.icon(),
            item.title,
            item.priority,
            config.format_date(item.timestamp.date_naive(), DateStyle::Medium)
        ));
        output.push_str(&format!("    {}\n", item.message));
        if let Some(action) = &item.action_text {
            output.push_str(&format!("    → {}\n", action));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewNotification, NotificationKind, Priority};
    use crate::services::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::rc::Rc;

    #[test]
    fn test_notification_list() {
        let config = AppConfigService::new(Rc::new(FixedClock::on(
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        )));
        let item = NewNotification::new(
            NotificationKind::PaymentDue,
            "Pago Hoy",
            "Renta vence hoy",
            Priority::High,
        )
        .with_action("Ver pagos")
        .into_item(Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap());

        let text = format_notification_list(&[item], &config);
        assert!(text.starts_with("• 💳 Pago Hoy [high] 20 ene 2025\n"));
        assert!(text.contains("    Renta vence hoy\n"));
        assert!(text.contains("→ Ver pagos"));

        assert_eq!(format_notification_list(&[], &config), "Sin notificaciones.");
    }
}
