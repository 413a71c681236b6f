//! Plain-text rendering of view state.

use std::fmt::Write;

use chrono::{Local, NaiveDateTime};

use myfit_core::{ClassSession, User};

use super::Screen;
use crate::views::admin::{PlansView, RevenueView, TrainersView, UsersView};
use crate::views::{MemberDashboard, Notice, TrainerDashboard};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn screen(screen: &Screen) -> String {
    let mut out = String::new();
    match screen {
        Screen::Landing => out.push_str(
            "MY FIT JOURNEY\nTrain smarter. Book classes, pick a plan, track your progress.\n\
             Type `login <username> <password>` to sign in.\n",
        ),
        Screen::Login(view) => {
            out.push_str("Login\n`login <username> <password>`\n");
            if let Some(error) = &view.error {
                let _ = writeln!(out, "! {error}");
            }
        }
        Screen::Member(view) => member(&mut out, view, Local::now().naive_local()),
        Screen::Trainer(view) => trainer(&mut out, view),
        Screen::Users(view) => users(&mut out, view),
        Screen::Plans(view) => plans(&mut out, view),
        Screen::Trainers(view) => trainers(&mut out, view),
        Screen::Revenue(view) => revenue(&mut out, view),
    }
    out
}

fn notice(out: &mut String, notice: &Notice) {
    if let Some(success) = &notice.success {
        let _ = writeln!(out, "+ {success}");
    }
    if let Some(error) = &notice.error {
        let _ = writeln!(out, "! {error}");
    }
}

fn when(at: &NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}

fn days(duration: Option<u32>) -> String {
    match duration {
        Some(1) => "1 day".to_string(),
        Some(n) => format!("{n} days"),
        None => "-".to_string(),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn class_line(out: &mut String, class: &ClassSession) {
    let capacity = class
        .max_capacity
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "  #{:<4} {:<20} {}  trainer: {}  capacity: {}  {}",
        class.id,
        class.class_name,
        when(&class.scheduled_at),
        class.trainer_name.as_deref().unwrap_or("Unknown"),
        capacity,
        or_dash(class.description.as_deref()),
    );
}

fn user_line(out: &mut String, user: &User) {
    let role = user.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "  #{:<4} {:<16} {:<24} {:<28} {:<8} {}",
        user.id,
        user.username,
        user.full_name,
        user.email,
        role,
        user.status_label(),
    );
}

fn member(out: &mut String, view: &MemberDashboard, now: NaiveDateTime) {
    out.push_str("Member dashboard\n");
    notice(out, &view.notice);

    out.push_str("\nAvailable classes\n");
    if view.classes.is_empty() {
        out.push_str("  No available classes for booking at this time.\n");
    }
    for class in &view.classes {
        class_line(out, class);
    }

    out.push_str("\nYour active class bookings\n");
    let mut any = false;
    for booking in view.active_class_bookings() {
        any = true;
        let _ = writeln!(
            out,
            "  booking #{:<4} {:<20} {}  booked {}",
            booking.booking_id,
            booking.class_name,
            when(&booking.scheduled_at),
            booking.booked_at.as_ref().map(when).unwrap_or_else(|| "-".to_string()),
        );
    }
    if !any {
        out.push_str("  You currently have no active class bookings.\n");
    }

    out.push_str("\nClass booking history\n");
    let mut any = false;
    for booking in view.cancelled_class_bookings() {
        any = true;
        let _ = writeln!(
            out,
            "  booking #{:<4} {:<20} {}  cancelled",
            booking.booking_id,
            booking.class_name,
            when(&booking.scheduled_at),
        );
    }
    if !any {
        out.push_str("  No cancelled class bookings.\n");
    }

    out.push_str("\nMembership plans\n");
    if view.plans.is_empty() {
        out.push_str("  No plans available.\n");
    }
    for plan in &view.plans {
        let _ = writeln!(
            out,
            "  #{:<4} {:<20} {:>8.2}  {}  {}",
            plan.id,
            plan.name,
            plan.price,
            days(plan.duration_in_days),
            or_dash(plan.description.as_deref()),
        );
    }

    out.push_str("\nYour active subscriptions\n");
    let mut any = false;
    for booking in view.active_plan_bookings() {
        any = true;
        let progress = view.progress(booking, now);
        let filled = (progress.percent / 5.0).round() as usize;
        let _ = writeln!(
            out,
            "  booking #{:<4} {:<20} since {}  [{:<20}] {} day{} remaining of {} days",
            booking.booking_id,
            booking.plan_name,
            when(&booking.booking_date),
            "#".repeat(filled.min(20)),
            progress.days_left,
            if progress.days_left == 1 { "" } else { "s" },
            progress.total_days,
        );
    }
    if !any {
        out.push_str("  You currently have no active plan subscriptions.\n");
    }

    out.push_str("\nSubscription history\n");
    let mut any = false;
    for booking in view.cancelled_plan_bookings() {
        any = true;
        let _ = writeln!(
            out,
            "  booking #{:<4} {:<20} since {}  cancelled",
            booking.booking_id,
            booking.plan_name,
            when(&booking.booking_date),
        );
    }
    if !any {
        out.push_str("  No cancelled subscriptions.\n");
    }
}

fn trainer(out: &mut String, view: &TrainerDashboard) {
    out.push_str("Trainer dashboard\n");
    notice(out, &view.notice);

    match view.editing {
        Some(id) => {
            let _ = writeln!(out, "\nEditing class #{id} (update-class / cancel-edit)");
        }
        None => out.push_str("\nNew class (new-class --name .. --when ..)\n"),
    }
    let _ = writeln!(
        out,
        "  name: {}  when: {}  capacity: {}  description: {}",
        or_dash(Some(view.form.class_name.as_str())),
        or_dash(Some(view.form.scheduled_at.as_str())),
        view.form.max_capacity,
        or_dash(Some(view.form.description.as_str())),
    );

    out.push_str("\nYour classes\n");
    if view.classes.is_empty() {
        out.push_str("  You have no classes scheduled.\n");
    }
    for class in &view.classes {
        class_line(out, class);
    }

    if let Some(members) = &view.members {
        let _ = writeln!(out, "\nBooked members of class #{}", members.class_id);
        if let Some(error) = &members.error {
            let _ = writeln!(out, "! {error}");
        } else if members.bookings.is_empty() {
            out.push_str("  No members booked.\n");
        }
        for booking in &members.bookings {
            let attendance = match booking.present {
                Some(true) => "present",
                Some(false) => "absent",
                None => "-",
            };
            let _ = writeln!(
                out,
                "  booking #{:<4} {:<24} {:<8} {}",
                booking.booking_id,
                booking.member_name.as_deref().unwrap_or("Unknown"),
                if booking.active { "active" } else { "cancelled" },
                attendance,
            );
        }
    }
}

fn admin_menu(out: &mut String, title: &str) {
    let _ = writeln!(out, "Admin / {title}");
    out.push_str("  /admin/users  /admin/plans  /admin/trainers  /admin/revenue\n");
}

fn users(out: &mut String, view: &UsersView) {
    admin_menu(out, "User management");
    notice(out, &view.notice);
    let _ = writeln!(out, "\nUsers (filter: {})", view.filter);
    if view.users.is_empty() {
        out.push_str("  No users found.\n");
    }
    for user in &view.users {
        user_line(out, user);
    }
}

fn plans(out: &mut String, view: &PlansView) {
    admin_menu(out, "Plan management");
    notice(out, &view.notice);
    out.push_str("\nPlans\n");
    if view.plans.is_empty() {
        out.push_str("  No plans found.\n");
    }
    for plan in &view.plans {
        let _ = writeln!(
            out,
            "  #{:<4} {:<20} {:>8.2}  {:>9}  {:<8} {}",
            plan.id,
            plan.name,
            plan.price,
            days(plan.duration_in_days),
            if plan.active { "active" } else { "inactive" },
            or_dash(plan.description.as_deref()),
        );
    }
}

fn trainers(out: &mut String, view: &TrainersView) {
    admin_menu(out, "Trainer management");
    notice(out, &view.notice);
    out.push_str("\nTrainers\n");
    if view.trainers.is_empty() {
        out.push_str("  No trainers found.\n");
    }
    for trainer in &view.trainers {
        user_line(out, trainer);
    }
}

fn revenue(out: &mut String, view: &RevenueView) {
    admin_menu(out, "Revenue management");
    notice(out, &view.notice);

    let summary = view.summary();
    let _ = writeln!(out, "\nTotal income:   {:>10.2}", summary.total_income);
    let _ = writeln!(out, "Total salaries: {:>10.2}", summary.total_salaries);
    let _ = writeln!(
        out,
        "Net {}:     {:>10.2}",
        if summary.is_profit() { "profit" } else { "loss  " },
        summary.net_profit
    );

    out.push_str("\nTrainer salaries\n");
    for trainer in &view.trainers {
        let current = view
            .salary_for(trainer.id)
            .map(|s| format!("{:.2}", s.salary))
            .unwrap_or_else(|| "-".to_string());
        let edit = view.salary_edits.get(&trainer.id).map(String::as_str);
        let _ = writeln!(
            out,
            "  #{:<4} {:<24} current: {:>10}  edit: {}",
            trainer.id,
            trainer.full_name,
            current,
            or_dash(edit),
        );
    }

    out.push_str("\nMember plan bookings\n");
    if view.bookings.is_empty() {
        out.push_str("  No plan bookings.\n");
    }
    for booking in &view.bookings {
        let _ = writeln!(
            out,
            "  booking #{:<4} {:<20} {:<24} {:>8.2}  {}  {:<9} {}",
            booking.booking_id,
            booking.plan_name,
            booking.member_name.as_deref().unwrap_or("-"),
            booking.plan_price.unwrap_or(0.0),
            when(&booking.booking_date),
            if booking.active { "active" } else { "cancelled" },
            if booking.payment_completed { "paid" } else { "unpaid" },
        );
    }
}
