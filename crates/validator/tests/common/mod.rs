//! Shared fixture: the `Dto` shape and its rule set.

#![allow(dead_code)]

use cascade_validator::prelude::*;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Dto {
    pub foo: Option<String>,
    pub bar: Option<String>,
    pub fizz: Option<i32>,
    pub buzz: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A `Dto` that passes every rule.
pub fn valid_dto() -> Dto {
    Dto {
        foo: Some("ok".into()),
        bar: Some("ok".into()),
        fizz: Some(50),
        buzz: None,
        start_date: Some(date(2020, 6, 1)),
        end_date: Some(date(2020, 6, 1)),
    }
}

pub fn dto_rules() -> RuleSet<Dto> {
    dto_rules_with_config(ValidatorConfig::default())
}

pub fn dto_rules_with_config(config: ValidatorConfig) -> RuleSet<Dto> {
    RuleSet::builder_with_config("Dto", config)
        .rule_for("Foo", |d: &Dto| &d.foo, |c| {
            c.not_null()
                .with_message("Foo should not be null")
                .check(not_empty())
                .with_message("Foo should not be empty")
                .check(max_length(100))
                .with_message("Foo should have a max length of 100")
        })
        .rule_for("Bar", |d: &Dto| &d.bar, |c| {
            c.check(not_empty())
                .when(|d: &Dto| d.bar.is_some())
                .with_message("Bar should not be empty")
                .check(max_length(100))
                .when(|d: &Dto| d.bar.is_some())
                .with_message("Bar should have a max length of 100")
        })
        .rule_for("Fizz", |d: &Dto| &d.fizz, |c| {
            c.not_null()
                .with_message("Fizz should not be null")
                .try_check(inclusive_between(1, 100))
                .with_message("Fizz should have a value between 1 and 100")
        })
        .rule_for("Buzz", |d: &Dto| &d.buzz, |c| {
            c.try_check(inclusive_between(1, 100))
                .when(|d: &Dto| d.buzz.is_some())
                .with_message("Buzz should have a value between 1 and 100")
        })
        .rule_for("StartDate", |d: &Dto| &d.start_date, |c| {
            c.not_null()
                .with_message("Start date should not be null")
                .try_check(inclusive_between(date(2000, 1, 1), date(3000, 1, 1)))
                .with_message("Start date should have a value between {from} and {to}")
        })
        .rule_for("EndDate", |d: &Dto| &d.end_date, |c| {
            c.not_null()
                .with_message("End date should not be null")
                .try_check(inclusive_between(date(2000, 1, 1), date(3000, 1, 1)))
                .with_message("End date should have a value between {from} and {to}")
        })
        .build()
        .unwrap()
}

/// `(field, message)` pairs of a result, in order.
pub fn pairs(result: &ValidationResult) -> Vec<(String, String)> {
    result
        .failures()
        .iter()
        .map(|f| (f.field.clone(), f.message.clone()))
        .collect()
}
