use super::*;

// =============================================================
// validate_login_input
// =============================================================

#[test]
fn login_input_trims_email() {
    assert_eq!(
        validate_login_input("  police@example.com ", "123456"),
        Ok(("police@example.com".to_owned(), "123456".to_owned()))
    );
}

#[test]
fn login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "123456"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter both email and password."));
}

#[test]
fn login_input_keeps_password_whitespace() {
    assert_eq!(validate_login_input("a@b.com", " pw "), Ok(("a@b.com".to_owned(), " pw ".to_owned())));
}

// =============================================================
// validate_registration
// =============================================================

#[test]
fn registration_accepts_complete_form() {
    assert_eq!(
        validate_registration(" Ward Nurse ", "nurse@example.com", "secret1", "secret1", "hospital"),
        Ok(RegistrationForm {
            name: "Ward Nurse".to_owned(),
            email: "nurse@example.com".to_owned(),
            password: "secret1".to_owned(),
            role: Role::Hospital,
        })
    );
}

#[test]
fn registration_requires_every_field() {
    assert_eq!(validate_registration("", "a@b.com", "secret1", "secret1", "public"), Err("Fill in every field."));
    assert_eq!(validate_registration("A", "  ", "secret1", "secret1", "public"), Err("Fill in every field."));
}

#[test]
fn registration_rejects_email_without_at() {
    assert_eq!(
        validate_registration("A", "example.com", "secret1", "secret1", "public"),
        Err("Enter a valid email address.")
    );
}

#[test]
fn registration_rejects_short_password() {
    assert_eq!(
        validate_registration("A", "a@b.com", "12345", "12345", "public"),
        Err("Password must be at least 6 characters.")
    );
}

#[test]
fn registration_rejects_mismatched_confirmation() {
    assert_eq!(validate_registration("A", "a@b.com", "secret1", "secret2", "public"), Err("Passwords do not match."));
}

#[test]
fn registration_rejects_unknown_role() {
    assert_eq!(validate_registration("A", "a@b.com", "secret1", "secret1", "pilot"), Err("Choose a role."));
}
