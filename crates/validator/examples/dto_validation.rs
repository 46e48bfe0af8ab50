//! Validating a request DTO and mapping the result to an error payload
//!
//! Run with `RUST_LOG=cascade_validator=trace` to see each skipped and
//! failed step.

use cascade_validator::prelude::*;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WithoutAttributeDto {
    foo: Option<String>,
    bar: Option<String>,
    fizz: Option<i32>,
    buzz: Option<i32>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| "invalid date".into())
}

fn dto_rules() -> Result<RuleSet<WithoutAttributeDto>, Box<dyn std::error::Error>> {
    let earliest = date(2000, 1, 1)?;
    let latest = date(3000, 1, 1)?;

    let rules = RuleSet::builder("WithoutAttributeDto")
        .rule_for("Foo", |d: &WithoutAttributeDto| &d.foo, |c| {
            c.not_null()
                .with_message("Foo should not be null")
                .check(not_empty())
                .with_message("Foo should not be empty")
                .check(max_length(100))
                .with_message("Foo should have a max length of 100")
        })
        .rule_for("Bar", |d: &WithoutAttributeDto| &d.bar, |c| {
            c.check(not_empty())
                .when(|d: &WithoutAttributeDto| d.bar.is_some())
                .with_message("Bar should not be empty")
                .check(max_length(100))
                .when(|d: &WithoutAttributeDto| d.bar.is_some())
                .with_message("Bar should have a max length of 100")
        })
        .rule_for("Fizz", |d: &WithoutAttributeDto| &d.fizz, |c| {
            c.not_null()
                .with_message("Fizz should not be null")
                .try_check(inclusive_between(1, 100))
                .with_message("Fizz should have a value between 1 and 100")
        })
        .rule_for("Buzz", |d: &WithoutAttributeDto| &d.buzz, |c| {
            c.try_check(inclusive_between(1, 100))
                .when(|d: &WithoutAttributeDto| d.buzz.is_some())
                .with_message("Buzz should have a value between 1 and 100")
        })
        .rule_for("StartDate", |d: &WithoutAttributeDto| &d.start_date, |c| {
            c.not_null()
                .with_message("Start date should not be null")
                .try_check(inclusive_between(earliest, latest))
                .with_message("Start date should have a value between {from} and {to}")
        })
        .rule_for("EndDate", |d: &WithoutAttributeDto| &d.end_date, |c| {
            c.not_null()
                .with_message("End date should not be null")
                .try_check(inclusive_between(earliest, latest))
                .with_message("End date should have a value between {from} and {to}")
        })
        .build()?;

    Ok(rules)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rules = dto_rules()?;

    let requests = [
        r#"{ "foo": "ok", "bar": "ok", "fizz": 50, "startDate": "2020-06-01", "endDate": "2020-06-02" }"#,
        r#"{ "foo": "", "bar": null, "fizz": 0, "buzz": 500, "startDate": "1999-01-01" }"#,
    ];

    for body in requests {
        let dto: WithoutAttributeDto = serde_json::from_str(body)?;
        let result = rules.validate(&dto);

        if result.is_valid() {
            println!("200 OK");
        } else {
            println!("400 Bad Request");
            println!("{}", serde_json::to_string_pretty(&result.by_field())?);
        }
    }

    Ok(())
}
