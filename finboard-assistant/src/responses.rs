//! Canned assistant responses and the ordered rule table that selects them.
//!
//! Rule order is significant: the matcher takes the first rule with any
//! keyword hit, so more specific topics are declared before general ones.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Response {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Whole-query match, compared after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactEntry {
    pub query: String,
    pub response: Response,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub response: Response,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTable {
    #[serde(default)]
    pub exact: Vec<ExactEntry>,
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    pub fallback: Response,
}

impl ResponseTable {
    /// Load a table from TOML. Array order is kept as rule order.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: ResponseTable = toml::from_str(text).context("parse response table toml")?;
        for (i, rule) in table.rules.iter().enumerate() {
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                bail!("rule {} ({}) has no keywords", i + 1, rule.response.id);
            }
        }
        Ok(table)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load {}", path.display()))
    }
}

fn exact(query: &str, response: Response) -> ExactEntry {
    ExactEntry {
        query: query.to_string(),
        response,
    }
}

fn rule(keywords: &[&str], response: Response) -> KeywordRule {
    KeywordRule {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        response,
    }
}

/// The dashboard's built-in replies.
pub fn default_table() -> ResponseTable {
    let help = Response::new(
        "help",
        "I can break down your spending, check budgets, summarize investments, \
         and tell you how your savings goals are tracking.",
    )
    .with_suggestions(&["Where did my money go this month?", "Am I on track for my goals?"]);
    let greeting = |text: &str| {
        Response::new("greeting", text)
            .with_suggestions(&["How is my budget looking?", "What is my net worth?"])
    };
    let thanks = Response::new(
        "thanks",
        "Anytime. Let me know if you want to dig into anything else.",
    );

    ResponseTable {
        exact: vec![
            exact("hi", greeting("Hi! Ask me anything about your finances.")),
            exact("hello", greeting("Hello! Ask me anything about your finances.")),
            exact("help", help.clone()),
            exact("thanks", thanks.clone()),
            exact("thank you", thanks),
        ],
        rules: vec![
            // budget before spending: "overspent my budget" is a budget question
            rule(
                &["budget", "overspent", "over budget", "limit"],
                Response::new(
                    "budget",
                    "Your fixed costs are on plan. Dining is running slightly over its budget; \
                     groceries and shopping still have room this month.",
                )
                .with_suggestions(&[
                    "Which categories are over budget?",
                    "Show my fixed vs flexible costs",
                ]),
            ),
            rule(
                &["spend", "spent", "spending", "expense", "money go"],
                Response::new(
                    "spending",
                    "Housing is your largest expense, followed by groceries and dining. \
                     Filter transactions by category to see the details.",
                )
                .with_suggestions(&["Show dining transactions", "Compare with last month"]),
            ),
            rule(
                &["goal", "on track", "emergency fund", "vacation", "down payment"],
                Response::new(
                    "goals",
                    "One goal is on track, one is complete, and the rest need a bigger monthly \
                     contribution to hit their target dates.",
                )
                .with_suggestions(&[
                    "How much should I save each month?",
                    "When will I reach my goal?",
                ]),
            ),
            rule(
                &["save", "saving", "savings rate"],
                Response::new(
                    "savings",
                    "You are keeping a healthy share of your income this month. Saving 20% of \
                     income is a good baseline to aim for.",
                )
                .with_suggestions(&["What is my savings rate?", "Am I on track for my goals?"]),
            ),
            rule(
                &["invest", "portfolio", "stock", "crypto", "market"],
                Response::new(
                    "investments",
                    "Your portfolio is mostly stocks, with smaller positions in crypto, \
                     commodities, and real estate. Overall it is up since purchase.",
                )
                .with_suggestions(&["How did my portfolio do today?", "Show my allocation"]),
            ),
            rule(
                &["net worth", "networth", "worth", "assets", "debt"],
                Response::new(
                    "net-worth",
                    "Net worth is your assets minus your credit card balances. \
                     The trend chart shows how it has moved over time.",
                )
                .with_suggestions(&["Show my net worth trend", "How much debt do I have?"]),
            ),
            rule(
                &["bill", "subscription", "rent", "utilities", "due"],
                Response::new(
                    "bills",
                    "Rent, utilities, and subscriptions make up your recurring bills. \
                     Subscriptions are a little above their budget.",
                )
                .with_suggestions(&["List my subscriptions", "What are my fixed costs?"]),
            ),
            rule(&["help", "what can you do", "how do i"], help),
        ],
        fallback: Response::new(
            "fallback",
            "I'm not sure about that one yet. Try asking about your spending, budgets, \
             investments, or goals.",
        )
        .with_suggestions(&["Where did my money go this month?", "How is my budget looking?"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[[exact]]
query = "ping"
[exact.response]
id = "pong"
text = "pong"

[[rules]]
keywords = ["rent", "lease"]
[rules.response]
id = "housing"
text = "Rent is due on the 1st."
suggestions = ["Show housing costs"]

[[rules]]
keywords = ["rent", "car"]
[rules.response]
id = "cars"
text = "Car costs."

[fallback]
id = "fallback"
text = "No idea."
"#;

    #[test]
    fn test_from_toml_keeps_order() {
        let table = ResponseTable::from_toml_str(TABLE).unwrap();
        assert_eq!(table.exact.len(), 1);
        assert_eq!(table.rules[0].response.id, "housing");
        assert_eq!(table.rules[1].response.id, "cars");
        assert_eq!(table.rules[0].response.suggestions, vec!["Show housing costs"]);
        assert!(table.fallback.suggestions.is_empty());
    }

    #[test]
    fn test_from_toml_requires_fallback() {
        let without = TABLE.split("[fallback]").next().unwrap();
        assert!(ResponseTable::from_toml_str(without).is_err());
    }

    #[test]
    fn test_rule_without_keywords_rejected() {
        let bad = r#"
[[rules]]
keywords = ["", "  "]
[rules.response]
id = "empty"
text = "never"

[fallback]
id = "fallback"
text = "No idea."
"#;
        let err = ResponseTable::from_toml_str(bad).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_default_table_shape() {
        let table = default_table();
        assert!(!table.exact.is_empty());
        assert_eq!(table.rules[0].response.id, "budget");
        assert!(table.rules.iter().all(|r| r.keywords.iter().any(|k| !k.trim().is_empty())));
    }
}
