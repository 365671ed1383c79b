use std::path::Path;

use taskdeck::clock::{Clock, SystemClock};
use taskdeck::expenses::{ExpenseFilter, ExpenseStore, TransactionKind};
use taskdeck::reconciler::notification::LogNotifier;
use taskdeck::storage::FileStorage;
use taskdeck::task_store::TaskStore;
use taskdeck::utils::comparison::compare_tasks_alpha;
use taskdeck::{Reconciler, TaskFilter};

const STORAGE_FOLDER: &str = "dashboard_storage";

fn main() {
    env_logger::init();

    let clock = SystemClock;
    let today = clock.today();

    let tasks = TaskStore::load(FileStorage::new(Path::new(STORAGE_FOLDER)));
    let expenses = ExpenseStore::load(FileStorage::new(Path::new(STORAGE_FOLDER)));
    let events = taskdeck::samples::sample_event_store(today);

    let mut reconciler = Reconciler::new(events, tasks, LogNotifier, clock);
    let mirrored = reconciler.mirror_events();
    println!("{} events have been mirrored into tasks", mirrored);

    let all_events = reconciler.events().list();

    println!("---- Today ({}) -----", today);
    taskdeck::utils::print_event_list(taskdeck::views::today_events(all_events, today));

    println!("---- Upcoming -----");
    taskdeck::utils::print_event_list(taskdeck::views::upcoming_events(all_events, today));

    println!("---- Focus time this week -----");
    println!("    {:.1} hours ({:.0}% of the goal)",
        taskdeck::views::weekly_focus_hours(all_events, today),
        taskdeck::views::focus_progress(all_events, today) * 100.0);

    let mut partitions = taskdeck::views::task_partitions(reconciler.tasks().list(), TaskFilter::Active);
    partitions.simple.sort_by(compare_tasks_alpha);
    partitions.scheduled.sort_by(compare_tasks_alpha);
    println!("---- Simple tasks -----");
    taskdeck::utils::print_task_list(partitions.simple);
    println!("---- Scheduled tasks -----");
    taskdeck::utils::print_task_list(partitions.scheduled);

    println!("---- Expenses -----");
    println!("    income {:.2}, expenses {:.2}, balance {:.2}", expenses.total_income(), expenses.total_expense(), expenses.balance());
    for (category, total) in expenses.category_totals() {
        println!("    {:<20} {:>10.2}", category, total);
    }
    let recent = ExpenseFilter::default()
        .with_kind(TransactionKind::Expense)
        .between(today.pred_opt(), Some(today));
    for expense in expenses.filter(&recent) {
        println!("    {}  {:<20} {:>10.2}  {}", expense.date(), expense.category(), expense.amount(), expense.description());
    }
}
