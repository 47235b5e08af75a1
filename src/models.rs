#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Income {
    pub id: i64,
    pub source: String,
    pub amount: f64,
    pub date: String,
    pub is_recurring: bool,
    pub recurring_date: Option<String>,
    pub last_materialized: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: i64,
    pub item: String,
    pub amount: f64,
    pub date: String,
    pub is_recurring: bool,
    pub recurring_date: Option<String>,
    pub last_materialized: Option<String>,
    pub purchase_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct PlannedPurchase {
    pub id: i64,
    pub item: String,
    pub amount: f64,
    pub purchased: bool,
    pub due_date: Option<String>,
}
