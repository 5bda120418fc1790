// src/utils/error_helper.rs

//! バリデーションエラーをAppErrorへ寄せるヘルパー

use crate::error::AppError;
use tracing::warn;
use validator::ValidationErrors;

/// validatorの結果を `field: message` 形式のリストに畳み込む
pub fn convert_validation_errors(validation_errors: ValidationErrors, context: &str) -> AppError {
    let mut errors: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: Invalid value", field),
            })
        })
        .collect();
    // field_errorsはHashMap由来なので順序を安定させる
    errors.sort();

    warn!(context = %context, error_count = errors.len(), "Validation failed");

    AppError::ValidationErrors(errors)
}

/// 単一フィールドのバリデーションエラー
pub fn validation_error(field: &str, message: &str) -> AppError {
    AppError::ValidationError(format!("{}: {}", field, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn collects_field_messages() {
        let mut validation_errors = ValidationErrors::new();
        let mut length_error = ValidationError::new("length");
        length_error.message = Some("Must be 1-255 characters".into());
        validation_errors.add("full_name", length_error);

        match convert_validation_errors(validation_errors, "test") {
            AppError::ValidationErrors(errors) => {
                assert_eq!(
                    errors,
                    vec!["full_name: Must be 1-255 characters".to_string()]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn single_field_error_formats_message() {
        match validation_error("status", "must be ACTIVE or INACTIVE") {
            AppError::ValidationError(message) => {
                assert_eq!(message, "status: must be ACTIVE or INACTIVE");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
