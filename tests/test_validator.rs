//! Integration tests for input validation.

use paperpress::validator::validate;
use paperpress::{InputFile, MimeType, RejectionReason, ValidationResult, Validator};
use proptest::prelude::*;

fn sized(mime: &str, size: u64) -> InputFile {
    InputFile::with_declared_size("file", MimeType::parse(mime), size, Vec::<u8>::new())
}

mod accepted {
    use super::*;

    #[test]
    fn test_small_png_accepted() {
        assert_eq!(validate(&sized("image/png", 1000)), ValidationResult::Ok);
    }

    #[test]
    fn test_text_at_exact_limit_accepted() {
        assert_eq!(validate(&sized("text/plain", 5_242_880)), ValidationResult::Ok);
    }

    #[test]
    fn test_mime_parameters_ignored() {
        assert!(validate(&sized("text/plain; charset=utf-8", 10)).is_ok());
        assert!(validate(&sized("IMAGE/JPEG", 10)).is_ok());
    }

    #[test]
    fn test_custom_limit() {
        let validator = Validator::new(100);
        assert!(validator.validate(&sized("image/jpeg", 100)).is_ok());
        assert_eq!(
            validator.validate(&sized("image/jpeg", 101)),
            ValidationResult::Rejected(RejectionReason::TooLarge)
        );
    }
}

mod rejected {
    use super::*;

    #[test]
    fn test_one_byte_over_limit() {
        assert_eq!(
            validate(&sized("image/jpeg", 5_242_881)),
            ValidationResult::Rejected(RejectionReason::TooLarge)
        );
    }

    #[test]
    fn test_gif_rejected() {
        assert_eq!(
            validate(&sized("image/gif", 10)),
            ValidationResult::Rejected(RejectionReason::UnsupportedType)
        );
    }

    #[test]
    fn test_large_pdf_reports_type() {
        assert_eq!(
            validate(&sized("application/pdf", 10_000_000)),
            ValidationResult::Rejected(RejectionReason::UnsupportedType)
        );
    }

    #[test]
    fn test_content_not_inspected() {
        // A PNG signature under a text/plain label is still text.
        let file = InputFile::new("x.txt", MimeType::PlainText, b"\x89PNG\r\n\x1a\n".to_vec());
        assert!(validate(&file).is_ok());
    }
}

proptest! {
    #[test]
    fn prop_unknown_types_always_rejected(sub in "[a-z]{1,8}", size in 0u64..20_000_000) {
        let mime = format!("application/{}", sub);
        prop_assert_eq!(
            validate(&sized(&mime, size)),
            ValidationResult::Rejected(RejectionReason::UnsupportedType)
        );
    }

    #[test]
    fn prop_supported_types_follow_limit(
        idx in 0usize..3,
        size in 0u64..10_000_000,
    ) {
        let mime = ["image/jpeg", "image/png", "text/plain"][idx];
        let result = validate(&sized(mime, size));
        if size <= 5_242_880 {
            prop_assert_eq!(result, ValidationResult::Ok);
        } else {
            prop_assert_eq!(result, ValidationResult::Rejected(RejectionReason::TooLarge));
        }
    }

    #[test]
    fn prop_validation_is_idempotent(idx in 0usize..5, size in 0u64..10_000_000) {
        let mime = ["image/jpeg", "image/png", "text/plain", "image/gif", "video/mp4"][idx];
        let file = sized(mime, size);
        prop_assert_eq!(validate(&file), validate(&file));
    }
}
