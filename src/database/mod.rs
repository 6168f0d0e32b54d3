pub mod pool;

use crate::error::{Error, Result};

/// Collapses a multi-row fetch into the single row the caller expects.
/// Zero rows is `NotFound`; more than one is a data problem, never "take the first".
pub fn expect_one<T>(mut rows: Vec<T>, what: impl FnOnce() -> String) -> Result<T> {
    match rows.len() {
        0 => Err(Error::NotFound(what())),
        1 => Ok(rows.remove(0)),
        n => Err(Error::Ambiguous(format!("{} ({} rows matched)", what(), n))),
    }
}

/// Like [`expect_one`] for lookups where no match is a normal outcome.
pub fn expect_at_most_one<T>(mut rows: Vec<T>, what: impl FnOnce() -> String) -> Result<Option<T>> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => Err(Error::Ambiguous(format!("{} ({} rows matched)", what(), n))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_row_is_returned() {
        let row = expect_one(vec![7], || "row".to_string()).unwrap();
        assert_eq!(row, 7);
    }

    #[test]
    fn zero_rows_is_not_found() {
        let err = expect_one(Vec::<i32>::new(), || "Application with id 4 not found".into())
            .unwrap_err();
        match err {
            Error::NotFound(msg) => assert_eq!(msg, "Application with id 4 not found"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn optional_lookup_refuses_to_pick_among_many() {
        assert_eq!(expect_at_most_one(Vec::<i32>::new(), || "x".into()).unwrap(), None);
        assert_eq!(expect_at_most_one(vec![3], || "x".into()).unwrap(), Some(3));
        let err = expect_at_most_one(vec![3, 4], || "Teacher with email a@b".into()).unwrap_err();
        assert!(matches!(err, Error::Ambiguous(_)));
    }

    #[test]
    fn many_rows_are_ambiguous_not_first() {
        let err = expect_one(vec![1, 2], || "Teacher with email x".into()).unwrap_err();
        assert!(matches!(err, Error::Ambiguous(_)));
    }
}
