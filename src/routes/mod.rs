use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tera::{Tera, Value};

use crate::domain::money::format_inr;

pub mod api;
pub mod expenses;
pub mod finder;
pub mod leads;
pub mod main;
pub mod payments;
pub mod quotations;
pub mod rates;
pub mod trips;
pub mod vendors;

/// Nesting depth accepted for bracketed form keys such as `rooms[0][place]`.
const FORM_NESTING_DEPTH: usize = 5;

/// Parse an urlencoded body that carries nested rows.
pub(crate) fn parse_nested_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_qs::Error> {
    serde_qs::Config::new(FORM_NESTING_DEPTH, false).deserialize_bytes(body)
}

fn paise_arg(value: &Value, filter: &str) -> tera::Result<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| tera::Error::msg(format!("`{filter}` expects whole paise"))),
        _ => Err(tera::Error::msg(format!("`{filter}` expects a number"))),
    }
}

/// Tera filter rendering paise as `₹12,34,567.50`. Null renders empty.
pub fn inr_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(match paise_arg(value, "inr")? {
        Some(paise) => Value::String(format_inr(paise)),
        None => Value::String(String::new()),
    })
}

/// Tera filter rendering paise as a plain rupee amount for form inputs.
pub fn rupees_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(match paise_arg(value, "rupees")? {
        Some(paise) if paise % 100 == 0 => Value::String((paise / 100).to_string()),
        Some(paise) => Value::String(format!("{}.{:02}", paise / 100, (paise % 100).abs())),
        None => Value::String(String::new()),
    })
}

/// Registers the filters used by the templates.
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("inr", inr_filter);
    tera.register_filter("rupees", rupees_filter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_filter_formats_paise() {
        let rendered = inr_filter(&Value::from(1_250_050), &HashMap::new()).expect("number");
        assert_eq!(rendered, Value::String("₹12,500.50".to_string()));

        let rendered = inr_filter(&Value::Null, &HashMap::new()).expect("null");
        assert_eq!(rendered, Value::String(String::new()));

        assert!(inr_filter(&Value::from("abc"), &HashMap::new()).is_err());
    }

    #[test]
    fn rupees_filter_keeps_inputs_plain() {
        let rendered = rupees_filter(&Value::from(1_850_000), &HashMap::new()).expect("number");
        assert_eq!(rendered, Value::String("18500".to_string()));

        let rendered = rupees_filter(&Value::from(1_205), &HashMap::new()).expect("number");
        assert_eq!(rendered, Value::String("12.05".to_string()));
    }
}
