use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GenoError::structure("$.views[0]", "x")
            .to_string()
            .contains("structure error: $.views[0]:")
    );
    assert!(
        GenoError::template("x")
            .to_string()
            .contains("template error:")
    );
    assert!(
        GenoError::validity("x")
            .to_string()
            .contains("validity error:")
    );
    assert!(
        GenoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GenoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert_to_serde_variant() {
    let err: GenoError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, GenoError::Serde(_)));
}
