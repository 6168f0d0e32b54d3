use std::borrow::Cow;

use validator::ValidationError;

/// Text fields must carry something besides whitespace. The value is stored as given.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Every element of a list field must carry some text.
pub fn non_blank_items(items: &Vec<String>) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        let mut err = ValidationError::new("blank_item");
        err.message = Some(Cow::from("list entries must not be blank"));
        return Err(err);
    }
    Ok(())
}
