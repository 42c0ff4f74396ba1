//! Notifications, savings goals and recurring payments

use super::Context;
use crate::display::{format_goal_table, format_notification_list, format_payment_table};
use crate::error::LanaResult;
use crate::models::payment::upcoming;

/// Run every notification rule once and list what fired
pub fn handle_notify(ctx: &Context) -> LanaResult<()> {
    let mut app = ctx.load_app()?;
    let fired = app.check_notifications();

    println!(
        "{} notificación(es), {} sin leer",
        fired.len(),
        app.notifications.unread_count()
    );
    print!(
        "{}",
        format_notification_list(app.notifications.notifications(), &app.config)
    );
    Ok(())
}

pub fn handle_goals(ctx: &Context) -> LanaResult<()> {
    let app = ctx.load_app()?;
    println!("{}", format_goal_table(&app.goals, app.today(), &app.config));
    Ok(())
}

/// All payments, then the next five active ones
pub fn handle_payments(ctx: &Context) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let today = app.today();
    println!("{}", format_payment_table(&app.payments, today, &app.config));

    let next = upcoming(&app.payments, 5);
    if !next.is_empty() {
        println!();
        println!("Próximos pagos:");
        for payment in next {
            println!(
                "  {}  {:<14} {}",
                payment.next_payment,
                payment.name,
                app.config.format_currency(payment.amount, true)
            );
        }
    }
    Ok(())
}
