use chrono::Duration;
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use planner_core::date::Date;
use planner_core::models::Task;

use crate::util::short_id;

/// "today", "tomorrow", "in 3 days", "2 weeks ago"...
pub fn humanize_date(date: Date, today: Date) -> String {
    match date.days_since(today) {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        days => HumanTime::from(Duration::days(days)).to_string(),
    }
}

fn date_cell(date: Date, today: Date) -> Cell {
    let text = format!("{} ({})", date, humanize_date(date, today));
    if today.is_strictly_after(date) {
        Cell::new(text).fg(Color::Red) // Overdue
    } else if date == today {
        Cell::new(text).fg(Color::Yellow) // Due today
    } else {
        Cell::new(text)
    }
}

pub fn display_tasks(tasks: &[Task], today: Date) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Title", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&task.id)));
        row.add_cell(date_cell(task.date, today));

        let mut title = String::new();
        if task.is_repeating() {
            title.push('↻');
            title.push(' ');
        }
        title.push_str(&task.title);
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));

        row.add_cell(if task.is_repeating() {
            Cell::new(&task.repeat).fg(Color::Cyan)
        } else {
            Cell::new("-").fg(Color::DarkGrey)
        });
        row.add_cell(Cell::new(&task.comment));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task(task: &Task, today: Date) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Title"), Cell::new(&task.title).add_attribute(Attribute::Bold)]);
    table.add_row(vec![Cell::new("Date"), date_cell(task.date, today)]);
    table.add_row(vec![
        Cell::new("Repeat"),
        Cell::new(if task.is_repeating() { task.repeat.as_str() } else { "does not repeat" }),
    ]);
    table.add_row(vec![Cell::new("Comment"), Cell::new(&task.comment)]);
    println!("{table}");
}
