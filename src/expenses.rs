//! Income and expenses, persisted to a [`Storage`] on every change

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EXPENSE_CATEGORIES;
use crate::item::ItemId;
use crate::storage::{load_collection, save_collection, Storage};


/// Whether money came in or went out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}


/// A single income or expense record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: ItemId,
    amount: f64,
    category: String,
    description: String,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

impl Expense {
    /// Create a brand new record, with a random ID
    pub fn new(amount: f64, category: String, description: String, date: NaiveDate, kind: TransactionKind) -> Self {
        Self::new_with_parameters(ItemId::random_with_prefix("expense-"), amount, category, description, date, kind)
    }

    pub fn new_with_parameters(id: ItemId, amount: f64, category: String, description: String, date: NaiveDate, kind: TransactionKind) -> Self {
        Self { id, amount, category, description, date, kind }
    }

    pub fn id(&self) -> &ItemId { &self.id }
    pub fn amount(&self) -> f64 { self.amount }
    pub fn category(&self) -> &str { &self.category }
    pub fn description(&self) -> &str { &self.description }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn kind(&self) -> TransactionKind { self.kind }
}


/// Criteria to select expenses. Criteria that are `None` match everything
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    /// First day of the range (included)
    pub from: Option<NaiveDate>,
    /// Last day of the range (included)
    pub to: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.as_deref().map_or(true, |c| expense.category() == c)
            && self.kind.map_or(true, |k| expense.kind() == k)
            && self.from.map_or(true, |from| expense.date() >= from)
            && self.to.map_or(true, |to| expense.date() <= to)
    }
}


/// The income and expense records of the dashboard, newest first
///
/// Every mutation is written to the backing storage right away
#[derive(Debug)]
pub struct ExpenseStore<S: Storage> {
    storage: S,
    storage_key: String,
    writable: bool,
    expenses: Vec<Expense>,
}

impl<S: Storage> ExpenseStore<S> {
    /// Load the expenses from the storage, under the key configured in [`crate::config::EXPENSES_STORAGE_KEY`]
    pub fn load(storage: S) -> Self {
        let key = crate::config::expenses_storage_key();
        Self::load_from_key(storage, &key)
    }

    /// Load the expenses from the storage, under a custom key.
    ///
    /// Missing or invalid stored data is logged and results in an empty collection
    pub fn load_from_key(storage: S, key: &str) -> Self {
        let (expenses, writable) = match load_collection(&storage, key) {
            Ok(expenses) => (expenses, true),
            Err(err) => {
                log::warn!("Unable to read stored expenses: {}. Changes to the expenses will not be saved", err);
                (Vec::new(), false)
            },
        };

        Self {
            storage,
            storage_key: key.to_string(),
            writable,
            expenses,
        }
    }

    fn save(&mut self) {
        if !self.writable {
            log::debug!("Not saving expenses under {:?}, the stored data could not be read", self.storage_key);
            return;
        }
        save_collection(&mut self.storage, &self.storage_key, &self.expenses);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Record an income or an expense. It is put first in the list.
    ///
    /// Amounts must be finite and non-negative: the direction of the money is given by its kind
    pub fn add(&mut self, expense: Expense) -> Result<Expense, Box<dyn Error>> {
        if !expense.amount().is_finite() || expense.amount() < 0.0 {
            return Err(format!("Invalid amount {} for {}", expense.amount(), expense.id()).into());
        }
        if self.get(expense.id()).is_some() {
            return Err(format!("An expense already exists for id {}", expense.id()).into());
        }

        log::debug!("Adding {} of {:.2} ({})", expense.kind(), expense.amount(), expense.category());
        self.expenses.insert(0, expense.clone());
        self.save();
        Ok(expense)
    }

    /// Remove a record. Returns the removed record, or `None` if there was no such record
    pub fn delete(&mut self, id: &ItemId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id() == id)?;
        let removed = self.expenses.remove(index);
        self.save();
        Some(removed)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    /// Every record, newest first
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        self.expenses.iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    pub fn total_income(&self) -> f64 {
        self.total_of(TransactionKind::Income)
    }

    pub fn total_expense(&self) -> f64 {
        self.total_of(TransactionKind::Expense)
    }

    /// Total income minus total expense
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    /// The total spent per category. Categories with nothing spent are omitted.
    ///
    /// Known categories (see [`EXPENSE_CATEGORIES`]) come first, in their usual order, then the other ones, in order of appearance
    pub fn category_totals(&self) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = EXPENSE_CATEGORIES.iter()
            .map(|c| (c.to_string(), 0.0))
            .collect();

        for expense in self.expenses.iter().filter(|e| e.kind() == TransactionKind::Expense) {
            match totals.iter_mut().find(|(c, _)| c == expense.category()) {
                Some((_, total)) => *total += expense.amount(),
                None => totals.push((expense.category().to_string(), expense.amount())),
            }
        }

        totals.retain(|(_, total)| *total > 0.0);
        totals
    }

    fn total_of(&self, kind: TransactionKind) -> f64 {
        self.expenses.iter()
            .filter(|e| e.kind() == kind)
            .map(|e| e.amount())
            .sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn record(id: &str, amount: f64, category: &str, date: NaiveDate, kind: TransactionKind) -> Expense {
        Expense::new_with_parameters(ItemId::from(id), amount, category.to_string(), id.to_string(), date, kind)
    }

    /// A few days of April 2025
    fn april() -> ExpenseStore<MemoryStorage> {
        let mut store = ExpenseStore::load_from_key(MemoryStorage::new(), "expenses");
        store.add(record("rent", 800.0, "Housing", day(1), TransactionKind::Expense)).unwrap();
        store.add(record("salary", 1200.0, "Income", day(1), TransactionKind::Income)).unwrap();
        store.add(record("uber", 15.0, "Transportation", day(1), TransactionKind::Expense)).unwrap();
        store.add(record("groceries", 42.5, "Food & Dining", day(2), TransactionKind::Expense)).unwrap();
        store.add(record("gift", 20.0, "Birthdays", day(3), TransactionKind::Expense)).unwrap();
        store.add(record("market", 7.5, "Food & Dining", day(4), TransactionKind::Expense)).unwrap();
        store
    }

    #[test]
    fn totals_and_balance() {
        let store = april();
        assert_eq!(store.total_income(), 1200.0);
        assert_eq!(store.total_expense(), 885.0);
        assert_eq!(store.balance(), 315.0);

        let empty = ExpenseStore::load_from_key(MemoryStorage::new(), "expenses");
        assert_eq!(empty.balance(), 0.0);
    }

    #[test]
    fn totals_per_category() {
        let totals = april().category_totals();
        assert_eq!(totals, vec![
            ("Food & Dining".to_string(), 50.0),
            ("Transportation".to_string(), 15.0),
            ("Housing".to_string(), 800.0),
            ("Birthdays".to_string(), 20.0),
        ]);
    }

    #[test]
    fn filters() {
        let store = april();
        let ids = |filter: ExpenseFilter| -> Vec<String> {
            store.filter(&filter).iter().map(|e| e.id().to_string()).collect()
        };

        assert_eq!(ids(ExpenseFilter::default()).len(), 6);
        assert_eq!(ids(ExpenseFilter::default().with_category("Food & Dining")), vec!["market", "groceries"]);
        assert_eq!(ids(ExpenseFilter::default().with_kind(TransactionKind::Income)), vec!["salary"]);
        assert_eq!(ids(ExpenseFilter::default().between(Some(day(2)), Some(day(3)))), vec!["gift", "groceries"]);
        assert_eq!(ids(ExpenseFilter::default().between(Some(day(4)), None)), vec!["market"]);
        assert_eq!(
            ids(ExpenseFilter::default().with_kind(TransactionKind::Expense).between(None, Some(day(1)))),
            vec!["uber", "rent"]
        );
    }

    #[test]
    fn add_and_delete_are_persisted() {
        let mut store = ExpenseStore::load_from_key(MemoryStorage::new(), "expenses");
        let coffee = store.add(Expense::new(3.2, "Food & Dining".to_string(), "Coffee".to_string(), day(5), TransactionKind::Expense)).unwrap();
        assert!(coffee.id().as_str().starts_with("expense-"));

        let reloaded = ExpenseStore::load_from_key(store.storage().clone(), "expenses");
        assert_eq!(reloaded.list(), store.list());

        assert!(store.delete(coffee.id()).is_some());
        assert!(store.delete(coffee.id()).is_none());
        let reloaded = ExpenseStore::load_from_key(store.storage().clone(), "expenses");
        assert!(reloaded.is_empty());
    }

    #[test]
    fn invalid_records_are_refused() {
        let mut store = april();
        assert!(store.add(record("nan", f64::NAN, "Other", day(5), TransactionKind::Expense)).is_err());
        assert!(store.add(record("negative", -3.0, "Other", day(5), TransactionKind::Expense)).is_err());
        assert!(store.add(record("rent", 10.0, "Housing", day(5), TransactionKind::Expense)).is_err());
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn json_shape() {
        let expense = record("1", 42.5, "Food & Dining", day(2), TransactionKind::Expense);
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json, serde_json::json!({
            "id": "1",
            "amount": 42.5,
            "category": "Food & Dining",
            "description": "1",
            "date": "2025-04-02",
            "type": "expense",
        }));

        let mut storage = MemoryStorage::new();
        storage.set_item("expenses", "not json").unwrap();
        assert!(ExpenseStore::load_from_key(storage, "expenses").is_empty());
    }
}
