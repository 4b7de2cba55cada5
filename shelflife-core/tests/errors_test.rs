use shelflife_core::errors::*;

#[test]
fn snapshot_conflict_names_the_timestamp() {
    let err = ShelfError::SnapshotConflict {
        timestamp: "2025-06-01T12:00:00Z".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("2025-06-01T12:00:00Z"));
    assert!(msg.contains("overwrite"));
}

#[test]
fn snapshot_not_found_carries_namespace_and_timestamp() {
    let err = ShelfError::SnapshotNotFound {
        namespace: "user-42".into(),
        timestamp: "2025-06-01T12:00:00Z".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("user-42"));
    assert!(msg.contains("2025-06-01T12:00:00Z"));
}

#[test]
fn secret_not_found_and_decryption_are_distinct() {
    let not_found = ShelfError::SecretNotFound {
        namespace: "user-42".into(),
    };
    let decryption = ShelfError::Decryption {
        reason: "ciphertext failed authentication".into(),
    };
    assert!(not_found.to_string().contains("user-42"));
    assert!(decryption.to_string().contains("authentication"));
    assert!(!matches!(not_found, ShelfError::Decryption { .. }));
}

#[test]
fn validation_shorthand_carries_reason() {
    let err = ShelfError::validation("token cannot be empty");
    assert!(err.to_string().contains("token cannot be empty"));
}

// --- From impls ---

#[test]
fn storage_error_converts_to_shelf_error() {
    let storage_err = StorageError::Sqlite {
        message: "disk full".into(),
    };
    let err: ShelfError = storage_err.into();
    assert!(err.to_string().contains("disk full"));
    assert!(matches!(err, ShelfError::Storage(_)));
}

#[test]
fn storage_timeout_is_its_own_variant() {
    let err: ShelfError = StorageError::Timeout {
        message: "database is locked".into(),
    }
    .into();
    assert!(matches!(
        err,
        ShelfError::Storage(StorageError::Timeout { .. })
    ));
}

#[test]
fn vault_corruption_carries_lengths() {
    let err: ShelfError = VaultError::CorruptKeyMaterial {
        path: "/tmp/master.key".into(),
        expected: 32,
        actual: 7,
    }
    .into();
    let msg = err.to_string();
    assert!(msg.contains("32"));
    assert!(msg.contains('7'));
    assert!(msg.contains("/tmp/master.key"));
}
