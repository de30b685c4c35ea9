//! Numeric request fields arrive either as JSON numbers or as numeric strings
//! (HTML forms post everything as text).

use serde::{Deserialize, Deserializer, de::Error};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

fn resolve<T, E>(raw: NumberOrText<T>) -> Result<Option<T>, E>
where
    T: FromStr,
    E: Error,
{
    match raw {
        NumberOrText::Number(value) => Ok(Some(value)),
        NumberOrText::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<T>()
                .map(Some)
                .map_err(|_| E::custom(format!("'{text}' is not a valid number")))
        }
    }
}

/// Missing, `null` and blank strings all become `None`.
pub fn opt_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        Some(raw) => resolve(raw),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_number")]
        quantity: Option<i32>,
        #[serde(default, deserialize_with = "opt_number")]
        price: Option<Decimal>,
    }

    fn sample(value: serde_json::Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn numbers_and_numeric_strings_are_equivalent() {
        let a = sample(json!({"quantity": 4, "price": "19.99"})).unwrap();
        let b = sample(json!({"quantity": " 4 ", "price": 19.99})).unwrap();
        assert_eq!(a.quantity, Some(4));
        assert_eq!(a.quantity, b.quantity);
        assert_eq!(a.price, Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn blank_null_and_missing_are_none() {
        assert!(sample(json!({"quantity": ""})).unwrap().quantity.is_none());
        assert!(sample(json!({"quantity": null})).unwrap().quantity.is_none());
        assert!(sample(json!({})).unwrap().quantity.is_none());
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        assert!(sample(json!({"quantity": "four"})).is_err());
    }
}
