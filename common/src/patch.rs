use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Res};

/// Tri-state field of a partial update request.
///
/// Distinguishes a field that was absent from the JSON body (`Missing`,
/// leave the column untouched) from an explicit `null` (`Null`, clear the
/// column) and from a concrete value (`Value`). Request structs mark every
/// field `#[serde(default)]` so absent keys become `Missing`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Collapses into the nullable-column shape: `None` leaves the column
    /// alone, `Some(None)` writes SQL NULL, `Some(Some(v))` writes `v`.
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    /// Collapses into the non-nullable-column shape. Explicit `null` on a
    /// required field is a field-level validation failure.
    pub fn into_required(self, field: &str) -> Res<Option<T>> {
        match self {
            Patch::Missing => Ok(None),
            Patch::Null => Err(AppError::validation(field, "must not be null")),
            Patch::Value(v) => Ok(Some(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        company: Patch<String>,
        #[serde(default)]
        rating: Patch<i32>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let body: Body =
            serde_json::from_str(r#"{"name":"Ada","company":null}"#).unwrap();
        assert_eq!(body.name, Patch::Value("Ada".to_string()));
        assert_eq!(body.company, Patch::Null);
        assert_eq!(body.rating, Patch::Missing);
    }

    #[test]
    fn into_nullable_maps_all_three_states() {
        assert_eq!(Patch::<i32>::Missing.into_nullable(), None);
        assert_eq!(Patch::<i32>::Null.into_nullable(), Some(None));
        assert_eq!(Patch::Value(4).into_nullable(), Some(Some(4)));
    }

    #[test]
    fn into_required_rejects_explicit_null() {
        assert_eq!(Patch::<String>::Missing.into_required("name").unwrap(), None);
        assert!(Patch::<String>::Null.into_required("name").is_err());
        assert_eq!(
            Patch::Value("x".to_string()).into_required("name").unwrap(),
            Some("x".to_string())
        );
    }
}
