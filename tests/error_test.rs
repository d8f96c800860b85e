//! Error classification and messages.

use std::path::PathBuf;

use nutrilens::NutrilensError;

#[test]
fn only_image_errors_are_input_errors() {
    assert!(NutrilensError::InvalidImage("empty".into()).is_input_error());
    assert!(
        NutrilensError::ImageDecode {
            path: PathBuf::from("meal.jpg"),
            message: "truncated".into(),
        }
        .is_input_error()
    );

    assert!(
        !NutrilensError::FeatureMismatch {
            expected: 2048,
            actual: 1866,
        }
        .is_input_error()
    );
    assert!(!NutrilensError::Configuration("bad".into()).is_input_error());
    assert!(!NutrilensError::Inference("bad".into()).is_input_error());
}

#[test]
fn messages_name_the_problem() {
    let err = NutrilensError::FeatureMismatch {
        expected: 2048,
        actual: 1866,
    };
    let msg = err.to_string();
    assert!(msg.contains("2048") && msg.contains("1866"), "{msg}");

    let err = NutrilensError::ImageDecode {
        path: PathBuf::from("/tmp/meal.jpg"),
        message: "unsupported format".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("meal.jpg") && msg.contains("unsupported format"), "{msg}");
}

#[test]
fn io_and_json_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(NutrilensError::from(io), NutrilensError::Io(_)));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: NutrilensError = json.into();
    assert!(matches!(err, NutrilensError::Json(_)));
    assert!(!err.is_input_error());
}
