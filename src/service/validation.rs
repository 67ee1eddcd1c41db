//! Request validation: required fields and type coercion for emission records.

use crate::error::{AppError, FieldErrors};
use crate::schema::EmissionRecord;
use serde_json::{Map, Number, Value};

#[derive(Clone, Copy, Debug)]
enum FieldKind {
    Text,
    Float,
    Integer,
}

const EMISSION_FIELDS: &[(&str, FieldKind)] = &[
    ("country", FieldKind::Text),
    ("country_code", FieldKind::Text),
    ("Year", FieldKind::Integer),
    ("total", FieldKind::Float),
    ("coal", FieldKind::Float),
    ("oil", FieldKind::Float),
    ("gas", FieldKind::Float),
    ("cement", FieldKind::Float),
    ("flaring", FieldKind::Float),
    ("other", FieldKind::Float),
    ("per_capita", FieldKind::Float),
    ("number_code", FieldKind::Integer),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate and coerce a request body into an `EmissionRecord`.
    /// Every field is required; failures are collected per field. Unknown keys are ignored.
    pub fn emission_record(body: Value) -> Result<EmissionRecord, AppError> {
        let Value::Object(body) = body else {
            return Err(AppError::BadRequest("body must be a JSON object".into()));
        };
        let mut coerced = Map::new();
        let mut errors = FieldErrors::new();
        for (name, kind) in EMISSION_FIELDS {
            match body.get(*name) {
                None | Some(Value::Null) => {
                    errors.insert(name.to_string(), "field required".into());
                }
                Some(v) => match coerce(v, *kind) {
                    Ok(v) => {
                        coerced.insert(name.to_string(), v);
                    }
                    Err(msg) => {
                        errors.insert(name.to_string(), msg.into());
                    }
                },
            }
        }
        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }
        serde_json::from_value(Value::Object(coerced)).map_err(|e| AppError::Validation(e.to_string()))
    }

    /// Parse an integer path parameter, naming it on failure.
    pub fn path_int(name: &str, raw: &str) -> Result<i32, AppError> {
        raw.trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("{} must be an integer, got '{}'", name, raw)))
    }
}

fn coerce(v: &Value, kind: FieldKind) -> Result<Value, &'static str> {
    match kind {
        FieldKind::Text => match v {
            Value::String(_) => Ok(v.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            _ => Err("must be a string"),
        },
        FieldKind::Float => {
            let f = match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            f.and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or("must be a number")
        }
        FieldKind::Integer => {
            let i = match v {
                Value::Number(n) => n.as_i64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                        .map(|f| f as i64)
                }),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            i.and_then(|i| i32::try_from(i).ok())
                .map(|i| Value::Number(i.into()))
                .ok_or("must be an integer")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn testland() -> Value {
        json!({
            "country": "Testland",
            "country_code": "TL",
            "Year": 2020,
            "total": 1.0,
            "coal": 0.1,
            "oil": 0.2,
            "gas": 0.3,
            "cement": 0.1,
            "flaring": 0.0,
            "other": 0.3,
            "per_capita": 4,
            "number_code": 999
        })
    }

    #[test]
    fn valid_body_becomes_record() {
        let rec = RequestValidator::emission_record(testland()).unwrap();
        assert_eq!(rec.country, "Testland");
        assert_eq!(rec.year, 2020);
        assert_eq!(rec.per_capita, 4.0);
        assert_eq!(rec.number_code, 999);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut body = testland();
        body["Year"] = json!("2021");
        body["total"] = json!(" 12.5 ");
        body["number_code"] = json!(840.0);
        let rec = RequestValidator::emission_record(body).unwrap();
        assert_eq!(rec.year, 2021);
        assert_eq!(rec.total, 12.5);
        assert_eq!(rec.number_code, 840);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let mut body = testland();
        body.as_object_mut().unwrap().remove("coal");
        body["Year"] = json!(2020.5);
        body["gas"] = json!("lots");
        body["country"] = Value::Null;
        match RequestValidator::emission_record(body) {
            Err(AppError::InvalidFields(fields)) => {
                assert_eq!(fields.len(), 4);
                assert_eq!(fields["coal"], "field required");
                assert_eq!(fields["country"], "field required");
                assert_eq!(fields["Year"], "must be an integer");
                assert_eq!(fields["gas"], "must be a number");
            }
            other => panic!("expected InvalidFields, got {:?}", other.map(|r| r.country)),
        }
    }

    #[test]
    fn integers_out_of_range_are_rejected() {
        let mut body = testland();
        body["number_code"] = json!(i64::from(i32::MAX) + 1);
        assert!(matches!(
            RequestValidator::emission_record(body),
            Err(AppError::InvalidFields(_))
        ));
    }

    #[test]
    fn non_object_body_is_bad_request() {
        assert!(matches!(
            RequestValidator::emission_record(json!([1, 2, 3])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn path_ints() {
        assert_eq!(RequestValidator::path_int("year", "1999").unwrap(), 1999);
        assert!(matches!(
            RequestValidator::path_int("year", "last"),
            Err(AppError::Validation(_))
        ));
    }
}
